//! Date/time formatting utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Renders a timestamp in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_time_shape() {
        let ts = Timestamp::from_second(1_757_000_000).unwrap();
        let rendered = LocalDateTime(&ts).to_string();
        assert_eq!(rendered.len(), "2025-09-04 15:33".len());
        assert!(rendered.starts_with("2025-09-0"));
    }
}
