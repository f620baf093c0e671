use std::{
    env,
    fs::{self, OpenOptions},
    panic,
    path::{Path, PathBuf},
    process,
    sync::Mutex,
};

use chrono::Local;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use config::{ColorConfig, Palette};
use display::{Headless, TerminalApp, TerminalGuard};
use error::Result;
use timer::{Countdown, TimerSpec};

mod config;
mod display;
mod duration;
mod error;
mod file;
mod signals;
mod time_format;
mod timer;

const USAGE: &str = "Usage: cursedtimer \"Timer name\" \"Timer length\"";
const LOG_ENV: &str = "CURSEDTIMER_LOG";
const LOG_FILE: &str = "timer.log";

fn main() {
    let matches = cli().get_matches();

    let (name, length) = match (
        matches.get_one::<String>("name"),
        matches.get_one::<String>("length"),
    ) {
        (Some(name), Some(length)) => (name.clone(), length.clone()),
        _ => {
            println!("{}", USAGE);
            return;
        }
    };

    if let Err(err) = run(&matches, name, &length) {
        eprintln!("cursedtimer: {}", err);
        process::exit(err.exit_code());
    }
}

fn cli() -> Command {
    Command::new("cursedtimer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Time yourself with a terminal")
        .arg(
            Arg::new("name")
                .index(1)
                .value_name("NAME")
                .help("Name shown above the progress bar"),
        )
        .arg(
            Arg::new("length")
                .index(2)
                .value_name("LENGTH")
                .allow_negative_numbers(true)
                .help("Timer length as [[[days:]hours:]minutes:]seconds"),
        )
        .arg(
            Arg::new("rest")
                .index(3)
                .action(ArgAction::Append)
                .num_args(1..)
                .allow_hyphen_values(true)
                .hide(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Color file to use instead of ~/.config/cursedtimer/timer.conf"),
        )
}

fn run(matches: &ArgMatches, name: String, length: &str) -> Result<()> {
    let config_path = match matches.get_one::<PathBuf>("config") {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    init_logging(&config_path);

    let colors = ColorConfig::load_or_init(&config_path)?;
    let spec = TimerSpec::parse(name, length);
    signals::install()?;

    let countdown = Countdown::start(spec);
    tracing::info!(
        started_at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        "timer {:?} started for {} seconds",
        countdown.spec().name(),
        countdown.spec().total_seconds()
    );

    let (width, height) = crossterm::terminal::size()?;
    if display::fits(width, height) {
        let mut guard = TerminalGuard::acquire()?;
        install_panic_hook();
        let mut app = TerminalApp::with_stdout(Palette::new(&colors), &countdown)?;
        app.run(&mut guard, &countdown)?;
    } else {
        tracing::warn!(
            "terminal is {}x{}, running without a display",
            width,
            height
        );
        Headless::new(&countdown).run()?;
    }

    println!("{}", completion_message(countdown.spec().name()));
    Ok(())
}

fn completion_message(name: &str) -> String {
    format!(
        "Your timer for {} is complete!\nFinished at {}.\nThank you for using cursed timer.",
        name,
        Local::now().format("%H:%M:%S")
    )
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        display::restore_best_effort();
        default_hook(info);
    }));
}

/// Logs to `timer.log` next to the color file when `CURSEDTIMER_LOG` holds a
/// filter; the terminal itself belongs to the timer face.
fn init_logging(config_path: &Path) {
    let filter = match env::var(LOG_ENV) {
        Ok(directive) if !directive.is_empty() => EnvFilter::new(directive),
        _ => return,
    };

    let dir = config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let _ = fs::create_dir_all(dir);
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cursedtimer: logging disabled: {}", err);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
