//! Display-time unit conversions. Nothing here is ever written back into the
//! model.

use chrono::{DateTime, TimeZone, Utc};

const MPS_TO_KMH: f64 = 3.6;

/// Nearest whole number, halves toward positive infinity (`-2.5` -> `-2`).
pub fn round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// `21.4` -> `"21°"`
pub fn temperature(celsius: f64) -> String {
    format!("{}°", round(celsius))
}

/// `21.4` -> `"21°C"`
pub fn temperature_c(celsius: f64) -> String {
    format!("{}°C", round(celsius))
}

/// m/s to whole km/h.
pub fn wind_kmh(mps: f64) -> i64 {
    round(mps * MPS_TO_KMH)
}

/// `10.0` -> `"36 km/h"`
pub fn wind(mps: f64) -> String {
    format!("{} km/h", wind_kmh(mps))
}

/// `8000.0` -> `"8 km"`, `8500.0` -> `"8.5 km"`
pub fn visibility(meters: f64) -> String {
    format!("{} km", meters / 1000.0)
}

pub fn humidity(percent: u8) -> String {
    format!("{percent}%")
}

pub fn pressure(hpa: f64) -> String {
    format!("{} hPa", round(hpa))
}

/// 12-hour clock time, e.g. `"06:05 AM"`.
pub fn clock_time<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%I:%M %p").to_string()
}

/// Short weekday name, e.g. `"Mon"`.
pub fn weekday<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%a").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_speed_converts_to_kmh() {
        assert_eq!(wind(10.0), "36 km/h");
        assert_eq!(wind_kmh(4.12), 15);
        assert_eq!(wind(0.0), "0 km/h");
    }

    #[test]
    fn temperatures_round_to_nearest_integer() {
        assert_eq!(temperature(21.4), "21°");
        assert_eq!(temperature(21.5), "22°");
        assert_eq!(temperature(-0.3), "0°");
        assert_eq!(temperature(-3.6), "-4°");
        assert_eq!(temperature(-2.5), "-2°");
        assert_eq!(temperature(2.5), "3°");
        assert_eq!(temperature_c(29.4), "29°C");
    }

    #[test]
    fn visibility_in_kilometers() {
        assert_eq!(visibility(8000.0), "8 km");
        assert_eq!(visibility(10000.0), "10 km");
        assert_eq!(visibility(8500.0), "8.5 km");
    }

    #[test]
    fn clock_and_weekday_use_given_zone() {
        // 2024-06-03 00:35:00 UTC, a Monday
        let at = DateTime::from_timestamp(1717374900, 0).unwrap();
        assert_eq!(clock_time(at, &Utc), "12:35 AM");
        assert_eq!(weekday(at, &Utc), "Mon");

        let colombo = chrono::FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(clock_time(at, &colombo), "06:05 AM");
    }

    #[test]
    fn humidity_and_pressure_labels() {
        assert_eq!(humidity(74), "74%");
        assert_eq!(pressure(1009.0), "1009 hPa");
    }
}
