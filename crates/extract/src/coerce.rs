//! Typed coercions applied to captured text at the extraction boundary.

use exn::{OptionExt, ResultExt};
use time::{Date, Month};

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::page::parse;

/// A difficulty or terrain rating, bounded to `[1.0, 5.0]`.
pub(crate) fn rating(value: &str, field: &'static str) -> Result<f64> {
    Some(parse::<f64>(value, field)?)
        .filter(|rating| (1.0..=5.0).contains(rating))
        .ok_or_raise(|| ErrorKind::ExtractionFailed(field))
}

/// Signed decimal degrees, bounded to `[-limit, limit]`.
pub(crate) fn degrees(value: &str, limit: f64, field: &'static str) -> Result<f64> {
    Some(parse::<f64>(value, field)?)
        .filter(|degrees| degrees.is_finite() && degrees.abs() <= limit)
        .ok_or_raise(|| ErrorKind::ExtractionFailed(field))
}

/// A non-negative decimal with optional thousands separators.
pub(crate) fn distance(value: &str, field: &'static str) -> Result<f64> {
    Some(parse::<f64>(&value.replace(',', ""), field)?)
        .filter(|distance| distance.is_finite() && *distance >= 0.0)
        .ok_or_raise(|| ErrorKind::ExtractionFailed(field))
}

/// A calendar date from numeric month, day and year components.
pub(crate) fn date(year: &str, month: &str, day: &str, field: &'static str) -> Result<Date> {
    let month = Month::try_from(parse::<u8>(month, field)?).or_raise(|| ErrorKind::ExtractionFailed(field))?;
    self::calendar_date(year, month, day, field)
}

/// A calendar date in `M/D/YYYY` form.
pub(crate) fn us_date(value: &str, field: &'static str) -> Result<Date> {
    let captures = consts::US_DATE_REGEX.captures(value).ok_or_raise(|| ErrorKind::ExtractionFailed(field))?;
    self::date(&captures[3], &captures[1], &captures[2], field)
}

/// A calendar date in `D MonthName YYYY` form, e.g. `11 June 2010`.
pub(crate) fn long_date(value: &str, field: &'static str) -> Result<Date> {
    let captures = consts::LONG_DATE_REGEX.captures(value).ok_or_raise(|| ErrorKind::ExtractionFailed(field))?;
    let month = self::month_from_name(&captures[2]).ok_or_raise(|| ErrorKind::ExtractionFailed(field))?;
    self::calendar_date(&captures[3], month, &captures[1], field)
}

fn calendar_date(year: &str, month: Month, day: &str, field: &'static str) -> Result<Date> {
    Date::from_calendar_date(parse::<i32>(year, field)?, month, parse::<u8>(day, field)?)
        .or_raise(|| ErrorKind::ExtractionFailed(field))
}

fn month_from_name(name: &str) -> Option<Month> {
    (1..=12u8)
        .filter_map(|n| Month::try_from(n).ok())
        .find(|month| month.to_string().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1.0)]
    #[case("3.5", 3.5)]
    #[case("5", 5.0)]
    fn test_rating_in_bounds(#[case] value: &str, #[case] expected: f64) {
        assert_eq!(rating(value, "difficulty").unwrap(), expected);
    }

    #[rstest]
    #[case("0.5")]
    #[case("5.5")]
    #[case("...")]
    fn test_rating_out_of_bounds(#[case] value: &str) {
        let err = rating(value, "terrain").unwrap_err();
        assert_eq!(&*err, &ErrorKind::ExtractionFailed("terrain"));
    }

    #[rstest]
    #[case("49.741541", 90.0, 49.741541)]
    #[case("-8.5", 180.0, -8.5)]
    fn test_degrees(#[case] value: &str, #[case] limit: f64, #[case] expected: f64) {
        assert_eq!(degrees(value, limit, "latitude").unwrap(), expected);
    }

    #[test]
    fn test_degrees_rejects_out_of_range() {
        assert!(degrees("91.0", 90.0, "latitude").is_err());
        assert!(degrees("-", 90.0, "latitude").is_err());
    }

    #[rstest]
    #[case("923.4", 923.4)]
    #[case("12,345.6", 12345.6)]
    fn test_distance(#[case] value: &str, #[case] expected: f64) {
        assert_eq!(distance(value, "distance_travelled").unwrap(), expected);
    }

    #[test]
    fn test_us_date() {
        let date = us_date("5/21/2024", "hidden_at").unwrap();
        assert_eq!(date, Date::from_calendar_date(2024, Month::May, 21).unwrap());
        assert!(us_date("13/01/2024", "hidden_at").is_err());
        assert!(us_date("2/30/2024", "hidden_at").is_err());
    }

    #[rstest]
    #[case("11 June 2010", 2010, Month::June, 11)]
    #[case("1 january 2000", 2000, Month::January, 1)]
    fn test_long_date(#[case] value: &str, #[case] year: i32, #[case] month: Month, #[case] day: u8) {
        assert_eq!(long_date(value, "released_at").unwrap(), Date::from_calendar_date(year, month, day).unwrap());
    }

    #[test]
    fn test_long_date_rejects_unknown_month() {
        let err = long_date("11 Juneteenth 2010", "released_at").unwrap_err();
        assert_eq!(&*err, &ErrorKind::ExtractionFailed("released_at"));
    }
}
