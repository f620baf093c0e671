use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tui::style::{Color, Style};

use crate::{
    error::{Error, Result},
    file,
};

const APP_DIR: &str = "cursedtimer";
const CONFIG_FILE: &str = "timer.conf";

/// Upper bound of a color channel, on the curses 0-1000 intensity scale.
pub const CHANNEL_MAX: u16 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConfig {
    pub text_foreground_r: u16,
    pub text_foreground_g: u16,
    pub text_foreground_b: u16,
    pub text_background_r: u16,
    pub text_background_g: u16,
    pub text_background_b: u16,
    pub bar_foreground_r: u16,
    pub bar_foreground_g: u16,
    pub bar_foreground_b: u16,
    pub bar_background_r: u16,
    pub bar_background_g: u16,
    pub bar_background_b: u16,
    pub done_foreground_r: u16,
    pub done_foreground_g: u16,
    pub done_foreground_b: u16,
    pub done_background_r: u16,
    pub done_background_g: u16,
    pub done_background_b: u16,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            text_foreground_r: 1000,
            text_foreground_g: 1000,
            text_foreground_b: 0,
            text_background_r: 0,
            text_background_g: 0,
            text_background_b: 0,
            bar_foreground_r: 200,
            bar_foreground_g: 800,
            bar_foreground_b: 200,
            bar_background_r: 400,
            bar_background_g: 0,
            bar_background_b: 0,
            done_foreground_r: 1000,
            done_foreground_g: 1000,
            done_foreground_b: 1000,
            done_background_r: 0,
            done_background_g: 0,
            done_background_b: 0,
        }
    }
}

impl ColorConfig {
    pub fn text(&self) -> (Rgb, Rgb) {
        (
            Rgb::new(
                self.text_foreground_r,
                self.text_foreground_g,
                self.text_foreground_b,
            ),
            Rgb::new(
                self.text_background_r,
                self.text_background_g,
                self.text_background_b,
            ),
        )
    }

    pub fn bar(&self) -> (Rgb, Rgb) {
        (
            Rgb::new(
                self.bar_foreground_r,
                self.bar_foreground_g,
                self.bar_foreground_b,
            ),
            Rgb::new(
                self.bar_background_r,
                self.bar_background_g,
                self.bar_background_b,
            ),
        )
    }

    pub fn done(&self) -> (Rgb, Rgb) {
        (
            Rgb::new(
                self.done_foreground_r,
                self.done_foreground_g,
                self.done_foreground_b,
            ),
            Rgb::new(
                self.done_background_r,
                self.done_background_g,
                self.done_background_b,
            ),
        )
    }

    fn channels(&self) -> [(&'static str, u16); 18] {
        [
            ("text_foreground_r", self.text_foreground_r),
            ("text_foreground_g", self.text_foreground_g),
            ("text_foreground_b", self.text_foreground_b),
            ("text_background_r", self.text_background_r),
            ("text_background_g", self.text_background_g),
            ("text_background_b", self.text_background_b),
            ("bar_foreground_r", self.bar_foreground_r),
            ("bar_foreground_g", self.bar_foreground_g),
            ("bar_foreground_b", self.bar_foreground_b),
            ("bar_background_r", self.bar_background_r),
            ("bar_background_g", self.bar_background_g),
            ("bar_background_b", self.bar_background_b),
            ("done_foreground_r", self.done_foreground_r),
            ("done_foreground_g", self.done_foreground_g),
            ("done_foreground_b", self.done_foreground_b),
            ("done_background_r", self.done_background_r),
            ("done_background_g", self.done_background_g),
            ("done_background_b", self.done_background_b),
        ]
    }

    /// Checks every channel against `0..=CHANNEL_MAX`.
    pub fn validate(&self, path: &Path) -> Result<()> {
        match self
            .channels()
            .into_iter()
            .find(|(_, value)| *value > CHANNEL_MAX)
        {
            Some((key, value)) => Err(Error::OutOfRange {
                path: path.to_path_buf(),
                key,
                value,
                max: CHANNEL_MAX,
            }),
            None => Ok(()),
        }
    }

    /// Reads the color file at `path`, writing the defaults there first if it
    /// does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
            ColorConfig::default().save(path)?;
            tracing::info!("wrote default colors to {}", path.display());
        }

        let config: ColorConfig = file::read_config(path)?;
        config.validate(path)?;
        tracing::debug!("loaded colors from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate(path)?;
        file::write_config(path, self)
    }
}

/// A color on the curses 0-1000 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb {
    pub fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

fn scale(channel: u16) -> u8 {
    let channel = u32::from(channel.min(CHANNEL_MAX));
    ((channel * 255 + u32::from(CHANNEL_MAX) / 2) / u32::from(CHANNEL_MAX)) as u8
}

/// Styles used to paint one timer face.
///
/// Bar cells are blank, so the filled and empty segments carry their color
/// in the background: the filled part uses the bar foreground, the rest the
/// bar background, and a finished bar the done foreground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Style,
    pub bar_filled: Style,
    pub bar_empty: Style,
    pub done: Style,
}

impl Palette {
    pub fn new(config: &ColorConfig) -> Self {
        let (text_fg, text_bg) = config.text();
        let (bar_fg, bar_bg) = config.bar();
        let (done_fg, done_bg) = config.done();

        Self {
            text: Style::default().fg(text_fg.to_color()).bg(text_bg.to_color()),
            bar_filled: Style::default().fg(bar_bg.to_color()).bg(bar_fg.to_color()),
            bar_empty: Style::default().fg(bar_fg.to_color()).bg(bar_bg.to_color()),
            done: Style::default().fg(done_bg.to_color()).bg(done_fg.to_color()),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(&ColorConfig::default())
    }
}

/// `$HOME/.config/cursedtimer`
pub fn config_dir() -> Result<PathBuf> {
    let home = env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .ok_or(Error::NoHome)?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColorConfig {
        ColorConfig {
            text_foreground_r: 0,
            text_foreground_g: 1,
            text_foreground_b: 2,
            text_background_r: 999,
            text_background_g: 1000,
            text_background_b: 500,
            bar_foreground_r: 12,
            bar_foreground_g: 34,
            bar_foreground_b: 56,
            bar_background_r: 78,
            bar_background_g: 90,
            bar_background_b: 123,
            done_foreground_r: 456,
            done_foreground_g: 789,
            done_foreground_b: 1000,
            done_background_r: 0,
            done_background_g: 0,
            done_background_b: 7,
        }
    }

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("timer.conf");

        let config = ColorConfig::load_or_init(&path).unwrap();

        assert_eq!(config, ColorConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timer.conf");
        sample().save(&path).unwrap();

        assert_eq!(ColorConfig::load_or_init(&path).unwrap(), sample());
    }

    #[test]
    fn saved_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timer.conf");

        for config in [ColorConfig::default(), sample()] {
            config.save(&path).unwrap();
            assert_eq!(ColorConfig::load_or_init(&path).unwrap(), config);
        }
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timer.conf");
        let text = file::render(&ColorConfig::default())
            .unwrap()
            .replace("bar_background_r 400", "bar_background_r 1001");
        fs::write(&path, text).unwrap();

        let err = ColorConfig::load_or_init(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange {
                key: "bar_background_r",
                value: 1001,
                ..
            }
        ));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn channels_scale_to_eight_bits() {
        assert_eq!(scale(0), 0);
        assert_eq!(scale(1000), 255);
        assert_eq!(scale(200), 51);
        assert_eq!(scale(800), 204);
        assert_eq!(scale(400), 102);
    }

    #[test]
    fn bar_segments_use_inverted_colors() {
        let palette = Palette::default();
        assert_eq!(palette.bar_filled.bg, Some(Color::Rgb(51, 204, 51)));
        assert_eq!(palette.bar_empty.bg, Some(Color::Rgb(102, 0, 0)));
        assert_eq!(palette.done.bg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(palette.text.fg, Some(Color::Rgb(255, 255, 0)));
    }
}
