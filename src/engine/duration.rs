//! Duration input parsing and countdown display formatting

use serde::{Deserialize, Serialize};

use crate::error::DurationError;

/// Unit selected next to the duration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[serde(alias = "s", alias = "seconds")]
    Sec,
    #[default]
    #[serde(alias = "m", alias = "minutes")]
    Min,
}

impl TimeUnit {
    pub fn seconds_per_unit(self) -> f64 {
        match self {
            TimeUnit::Sec => 1.0,
            TimeUnit::Min => 60.0,
        }
    }
}

/// Parse the free-text amount into a number of seconds.
///
/// Text containing a colon ("12:00") is rejected rather than read as a clock
/// value. Fractions are allowed: "0.5" seconds is a valid, very short countdown.
pub fn parse_duration(amount: &str, unit: TimeUnit) -> Result<f64, DurationError> {
    let text = amount.trim();
    if text.is_empty() {
        return Err(DurationError::Empty);
    }
    if text.contains(':') {
        return Err(DurationError::ClockFormat(text.to_string()));
    }

    let value: f64 = text
        .parse()
        .map_err(|_| DurationError::NotANumber(text.to_string()))?;

    let seconds = value * unit.seconds_per_unit();
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(DurationError::NotPositive(seconds));
    }
    Ok(seconds)
}

/// Format remaining seconds as whole minutes and zero-padded whole seconds
pub fn format_clock(remaining_seconds: f64) -> String {
    let remaining = remaining_seconds.max(0.0);
    let minutes = (remaining / 60.0).floor() as u64;
    let seconds = (remaining % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_are_converted() {
        assert_eq!(parse_duration("5", TimeUnit::Min), Ok(300.0));
        assert_eq!(parse_duration(" 1.5 ", TimeUnit::Min), Ok(90.0));
    }

    #[test]
    fn test_fractional_seconds() {
        assert_eq!(parse_duration("0.5", TimeUnit::Sec), Ok(0.5));
    }

    #[test]
    fn test_colon_is_rejected() {
        assert_eq!(
            parse_duration("12:00", TimeUnit::Min),
            Err(DurationError::ClockFormat("12:00".to_string()))
        );
        assert!(parse_duration("4:59", TimeUnit::Sec).is_err());
    }

    #[test]
    fn test_garbage_and_non_positive_are_rejected() {
        assert_eq!(parse_duration("", TimeUnit::Sec), Err(DurationError::Empty));
        assert!(matches!(
            parse_duration("five", TimeUnit::Sec),
            Err(DurationError::NotANumber(_))
        ));
        assert!(matches!(
            parse_duration("0", TimeUnit::Min),
            Err(DurationError::NotPositive(_))
        ));
        assert!(parse_duration("-3", TimeUnit::Sec).is_err());
        assert!(parse_duration("NaN", TimeUnit::Sec).is_err());
        assert!(parse_duration("inf", TimeUnit::Sec).is_err());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(300.0), "5:00");
        assert_eq!(format_clock(299.0), "4:59");
        assert_eq!(format_clock(0.5), "0:00");
        assert_eq!(format_clock(61.9), "1:01");
        assert_eq!(format_clock(-1.0), "0:00");
        assert_eq!(format_clock(3600.0), "60:00");
    }

    #[test]
    fn test_unit_deserialization() {
        let unit: TimeUnit = serde_json::from_str("\"sec\"").unwrap();
        assert_eq!(unit, TimeUnit::Sec);
        let unit: TimeUnit = serde_json::from_str("\"minutes\"").unwrap();
        assert_eq!(unit, TimeUnit::Min);
        assert_eq!(TimeUnit::default(), TimeUnit::Min);
    }
}
