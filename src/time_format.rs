const CSEC_DAY: u64 = 8_640_000;
const CSEC_HOUR: u64 = 360_000;
const CSEC_MINUTE: u64 = 6_000;
const CSEC_SECOND: u64 = 100;

pub struct TimeFormat {
    pub hours: usize,
    pub minutes: usize,
    pub seconds: usize,
    pub csecs: usize,
}

impl TimeFormat {
    /// Formats a duration given in seconds as `D:HH:MM:SS.ss`, leaving out
    /// the day and hour segments while they are zero.
    ///
    /// Negative and non-finite input is clamped to zero. A zero duration is
    /// rendered as bare seconds (`00.00`).
    pub fn format_time(&self, seconds: f64) -> String {
        let mut time = to_centiseconds(seconds);
        if time == 0 {
            return format!(
                "{}.{}",
                pad_zeroes(0, self.seconds),
                pad_zeroes(0, self.csecs)
            );
        }

        let days = time / CSEC_DAY;
        time -= days * CSEC_DAY;
        let hours = time / CSEC_HOUR;
        time -= hours * CSEC_HOUR;
        let minutes = time / CSEC_MINUTE;
        time -= minutes * CSEC_MINUTE;
        let seconds = time / CSEC_SECOND;
        time -= seconds * CSEC_SECOND;

        let mut out = String::new();
        if days > 0 {
            out.push_str(&format!("{}:", days));
        }
        if days > 0 || hours > 0 {
            out.push_str(&format!("{}:", pad_zeroes(hours, self.hours)));
        }
        out.push_str(&format!(
            "{}:{}.{}",
            pad_zeroes(minutes, self.minutes),
            pad_zeroes(seconds, self.seconds),
            pad_zeroes(time, self.csecs),
        ));
        out
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            hours: 2,
            minutes: 2,
            seconds: 2,
            csecs: 2,
        }
    }
}

pub fn format_time(seconds: f64) -> String {
    TimeFormat::default().format_time(seconds)
}

// Rounding happens once, up front, so `59.999` carries into the minute
// instead of printing as `60.00`.
fn to_centiseconds(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 100.0).round() as u64
}

fn pad_zeroes(time: u64, length: usize) -> String {
    format!("{:0>width$}", time, width = length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_bare_seconds() {
        assert_eq!(format_time(0.0), "00.00");
    }

    #[test]
    fn minutes_are_always_shown_for_nonzero_durations() {
        assert_eq!(format_time(5.0), "00:05.00");
        assert_eq!(format_time(65.0), "01:05.00");
        assert_eq!(format_time(5.3), "00:05.30");
    }

    #[test]
    fn hours_appear_once_nonzero() {
        assert_eq!(format_time(3661.5), "01:01:01.50");
        assert_eq!(format_time(3600.0), "01:00:00.00");
        assert_eq!(format_time(36000.0), "10:00:00.00");
    }

    #[test]
    fn days_force_the_hour_segment() {
        assert_eq!(format_time(90000.0), "1:01:00:00.00");
        assert_eq!(format_time(86400.0), "1:00:00:00.00");
        assert_eq!(format_time(86400.0 * 12.0 + 61.0), "12:00:01:01.00");
    }

    #[test]
    fn rounding_carries_into_the_next_unit() {
        assert_eq!(format_time(59.999), "01:00.00");
        assert_eq!(format_time(0.004), "00.00");
    }

    #[test]
    fn invalid_input_is_clamped() {
        assert_eq!(format_time(-3.0), "00.00");
        assert_eq!(format_time(f64::NAN), "00.00");
        assert_eq!(format_time(f64::INFINITY), "00.00");
    }
}
