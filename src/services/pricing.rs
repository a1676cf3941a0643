//! Slot arithmetic for reservations.
//!
//! Bookings are made in whole hours. A start time is `HH:00` with `HH` in
//! `0..=23`; an end time may additionally be `24:00` for end of day.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:00")]
    InvalidTime(String),

    #[error("End time must be after start time")]
    EmptyWindow,
}

/// Which end of the window a time is parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// Parse `HH:MM` into an hour of the day. Minutes must be `00`.
pub fn parse_hour(value: &str, boundary: Boundary) -> Result<u32, PricingError> {
    let invalid = || PricingError::InvalidTime(value.to_string());

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }

    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = minutes.parse().map_err(|_| invalid())?;
    if minute != 0 {
        return Err(invalid());
    }

    let max_hour = match boundary {
        Boundary::Start => 23,
        Boundary::End => 24,
    };
    if hour > max_hour {
        return Err(invalid());
    }

    Ok(hour)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, PricingError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| PricingError::InvalidDate(value.to_string()))
}

/// A validated `[start_hour, end_hour)` slot on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl BookingWindow {
    pub fn parse(date: &str, start_time: &str, end_time: &str) -> Result<Self, PricingError> {
        let date = parse_date(date)?;
        let start_hour = parse_hour(start_time, Boundary::Start)?;
        let end_hour = parse_hour(end_time, Boundary::End)?;

        if end_hour <= start_hour {
            return Err(PricingError::EmptyWindow);
        }

        Ok(Self {
            date,
            start_hour,
            end_hour,
        })
    }

    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// Half-open overlap on the same day; back-to-back slots do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.date == other.date
            && self.start_hour < other.end_hour
            && other.start_hour < self.end_hour
    }

    #[must_use]
    pub fn total_price(&self, price_per_hour: f64) -> f64 {
        f64::from(self.hours()) * price_per_hour
    }

    /// Canonical `YYYY-MM-DD` form of the date.
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    #[must_use]
    pub fn start_time(&self) -> String {
        format!("{:02}:00", self.start_hour)
    }

    #[must_use]
    pub fn end_time(&self) -> String {
        format!("{:02}:00", self.end_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_hours_at_forty() {
        let window = BookingWindow::parse("2025-03-01", "10:00", "12:00").unwrap();
        assert_eq!(window.hours(), 2);
        assert!((window.total_price(40.0) - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_is_hours_times_rate() {
        for (start, end, rate) in [(0, 1, 15.0), (9, 17, 25.5), (8, 24, 120.0)] {
            let window = BookingWindow::parse(
                "2025-01-31",
                &format!("{start:02}:00"),
                &format!("{end:02}:00"),
            )
            .unwrap();
            let expected = f64::from(end - start) * rate;
            assert!((window.total_price(rate) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn end_not_after_start_is_rejected() {
        assert_eq!(
            BookingWindow::parse("2025-03-01", "12:00", "12:00"),
            Err(PricingError::EmptyWindow)
        );
        assert_eq!(
            BookingWindow::parse("2025-03-01", "14:00", "10:00"),
            Err(PricingError::EmptyWindow)
        );
    }

    #[test]
    fn midnight_is_only_an_end() {
        assert_eq!(parse_hour("24:00", Boundary::End), Ok(24));
        assert!(parse_hour("24:00", Boundary::Start).is_err());
        assert_eq!(parse_hour("9:00", Boundary::Start), Ok(9));
    }

    #[test]
    fn malformed_times() {
        for bad in ["", "10", "10:30", "25:00", "ab:00", "10:0", "-1:00", "100:00"] {
            assert!(
                parse_hour(bad, Boundary::End).is_err(),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn malformed_dates() {
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("03/01/2025").is_err());
        assert_eq!(
            parse_date("2025-03-01").unwrap().to_string(),
            "2025-03-01"
        );
    }

    #[test]
    fn overlap_is_half_open() {
        let morning = BookingWindow::parse("2025-03-01", "09:00", "11:00").unwrap();
        let late_morning = BookingWindow::parse("2025-03-01", "10:00", "12:00").unwrap();
        let noon = BookingWindow::parse("2025-03-01", "11:00", "13:00").unwrap();
        let next_day = BookingWindow::parse("2025-03-02", "09:00", "11:00").unwrap();

        assert!(morning.overlaps(&late_morning));
        assert!(late_morning.overlaps(&morning));
        assert!(!morning.overlaps(&noon));
        assert!(!morning.overlaps(&next_day));
    }

    #[test]
    fn canonical_formatting() {
        let window = BookingWindow::parse("2025-03-01", "9:00", "24:00").unwrap();
        assert_eq!(window.start_time(), "09:00");
        assert_eq!(window.end_time(), "24:00");
        assert_eq!(window.date_string(), "2025-03-01");
    }
}
