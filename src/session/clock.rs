//! Wall-clock timestamps for log entries
//!
//! Entries carry a locale-formatted time of day (no date, no timezone).
//! The clock is a trait so tests can pin time to a fixed instant.

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, Local, Locale};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Render the time-of-day portion of `at` the way `locale` writes it (`%X`).
pub fn format_time_of_day(at: DateTime<FixedOffset>, locale: Locale) -> String {
    at.format_localized("%X", locale).to_string()
}

/// Parse a locale name such as `fr_FR` or `en_US`
pub fn parse_locale(name: &str) -> Result<Locale> {
    Locale::try_from(name).map_err(|_| anyhow!("unknown locale '{}'", name))
}

/// Stamps new log entries using a clock and a locale
pub struct Timestamper {
    clock: Box<dyn Clock>,
    locale: Locale,
}

impl Timestamper {
    pub fn new(clock: impl Clock + 'static, locale: Locale) -> Self {
        Self {
            clock: Box::new(clock),
            locale,
        }
    }

    /// System clock, given locale
    pub fn system(locale: Locale) -> Self {
        Self::new(SystemClock, locale)
    }

    pub fn stamp(&self) -> String {
        format_time_of_day(self.clock.now(), self.locale)
    }
}

impl Default for Timestamper {
    fn default() -> Self {
        Self::system(Locale::fr_FR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn afternoon() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 15, 14, 5, 9)
            .unwrap()
    }

    #[test]
    fn french_time_of_day_is_24_hour() {
        assert_eq!(format_time_of_day(afternoon(), Locale::fr_FR), "14:05:09");
    }

    #[test]
    fn formatting_never_includes_the_date() {
        let text = format_time_of_day(afternoon(), Locale::fr_FR);
        assert!(!text.contains("2024"));
        assert!(!text.contains("+02"));
    }

    #[test]
    fn fixed_clock_stamps_are_stable() {
        let stamper = Timestamper::new(FixedClock(afternoon()), Locale::fr_FR);
        assert_eq!(stamper.stamp(), stamper.stamp());
        assert_eq!(stamper.stamp(), "14:05:09");
    }

    #[test]
    fn parse_known_and_unknown_locales() {
        assert!(parse_locale("fr_FR").is_ok());
        assert!(parse_locale("en_US").is_ok());
        assert!(parse_locale("xx_NOPE").is_err());
    }
}
