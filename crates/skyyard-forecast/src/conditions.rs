//! Evening-period selection and sky-condition estimates.
//!
//! Pure functions over `(periods, now)` so the selection policy and the
//! heuristics can be tested without a network.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::types::{ForecastPeriod, NightForecast, SkyQuality};

/// Earliest local start hour that counts as "evening".
const EVENING_START_HOUR: u32 = 17;

/// Wind below this (mph) estimates Excellent seeing.
const SEEING_EXCELLENT_MPH: u32 = 5;
/// Wind below this (mph) estimates Fair seeing.
const SEEING_FAIR_MPH: u32 = 10;

/// Pick the evening period to report, first match wins:
/// this evening (same day-of-month as `now`, local start hour >= 17), else
/// the first future period with local start hour >= 17.
///
/// The day match compares day-of-month only, so it can collide across
/// month boundaries. Kept as-is; see DESIGN.md.
pub fn select_evening_period<'a>(
    periods: &'a [ForecastPeriod],
    now: DateTime<FixedOffset>,
) -> Option<&'a ForecastPeriod> {
    let tonight = periods
        .iter()
        .find(|p| p.start_time.day() == now.day() && p.start_time.hour() >= EVENING_START_HOUR);

    tonight.or_else(|| {
        periods
            .iter()
            .find(|p| p.start_time > now && p.start_time.hour() >= EVENING_START_HOUR)
    })
}

/// Transparency estimate from forecast prose. Case-insensitive substring
/// match, first match wins: clear > partly > cloudy.
pub fn transparency_from_text(text: &str) -> SkyQuality {
    let text = text.to_lowercase();
    if text.contains("clear") {
        SkyQuality::Excellent
    } else if text.contains("partly") {
        SkyQuality::Fair
    } else if text.contains("cloudy") {
        SkyQuality::Poor
    } else {
        SkyQuality::Unknown
    }
}

/// Seeing estimate from the leading integer of a free-form wind-speed
/// string ("10 to 15 mph" reads as 10). No leading integer means Unknown.
pub fn seeing_from_wind(wind_speed: &str) -> SkyQuality {
    match leading_integer(wind_speed) {
        None => SkyQuality::Unknown,
        Some(mph) if mph < SEEING_EXCELLENT_MPH => SkyQuality::Excellent,
        Some(mph) if mph < SEEING_FAIR_MPH => SkyQuality::Fair,
        Some(_) => SkyQuality::Poor,
    }
}

fn leading_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Derive the full evening forecast for a period list, or `None` when no
/// usable evening period exists.
pub fn interpret(periods: &[ForecastPeriod], now: DateTime<FixedOffset>) -> Option<NightForecast> {
    let period = select_evening_period(periods, now)?;

    Some(NightForecast {
        forecast: period.detailed_forecast.clone(),
        icon: period.icon.clone(),
        forecast_day: period.name.clone(),
        seeing: seeing_from_wind(&period.wind_speed),
        transparency: transparency_from_text(&period.detailed_forecast),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(name: &str, start: &str, forecast: &str, wind: &str) -> ForecastPeriod {
        ForecastPeriod {
            name: name.to_string(),
            start_time: DateTime::parse_from_rfc3339(start).unwrap(),
            detailed_forecast: forecast.to_string(),
            wind_speed: wind.to_string(),
            icon: String::new(),
        }
    }

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn test_selects_this_evening() {
        let periods = vec![
            period("This Afternoon", "2025-06-10T14:00:00-07:00", "Sunny", "5 mph"),
            period("Tonight", "2025-06-10T19:00:00-07:00", "Clear", "3 mph"),
        ];
        let chosen = select_evening_period(&periods, at("2025-06-10T12:00:00-07:00")).unwrap();
        assert_eq!(chosen.name, "Tonight");
    }

    #[test]
    fn test_falls_back_to_next_evening() {
        // Tonight's evening period is missing; tomorrow night qualifies.
        let periods = vec![
            period("This Afternoon", "2025-06-10T14:00:00-07:00", "Sunny", "5 mph"),
            period("Tuesday", "2025-06-11T08:00:00-07:00", "Sunny", "5 mph"),
            period("Tuesday Night", "2025-06-11T18:00:00-07:00", "Partly cloudy", "8 mph"),
        ];
        let chosen = select_evening_period(&periods, at("2025-06-10T22:30:00-07:00")).unwrap();
        assert_eq!(chosen.name, "Tuesday Night");
    }

    #[test]
    fn test_no_evening_period_anywhere() {
        let periods = vec![
            period("Morning", "2025-06-10T08:00:00-07:00", "Sunny", "5 mph"),
            period("Afternoon", "2025-06-10T14:00:00-07:00", "Sunny", "5 mph"),
            period("Tomorrow Morning", "2025-06-11T08:00:00-07:00", "Sunny", "5 mph"),
        ];
        assert!(select_evening_period(&periods, at("2025-06-10T12:00:00-07:00")).is_none());
    }

    #[test]
    fn test_empty_period_list() {
        assert!(interpret(&[], at("2025-06-10T12:00:00-07:00")).is_none());
    }

    #[test]
    fn test_day_match_ignores_month() {
        // Day-of-month collision: a July 10 period matches "today" on
        // June 10 even though it is a month away. Pins the quirk.
        let periods = vec![period(
            "Thursday Night",
            "2025-07-10T19:00:00-07:00",
            "Clear",
            "3 mph",
        )];
        let chosen = select_evening_period(&periods, at("2025-06-10T12:00:00-07:00")).unwrap();
        assert_eq!(chosen.name, "Thursday Night");
    }

    #[test]
    fn test_past_same_day_period_still_matches() {
        // The "this evening" arm has no future check, only day + hour.
        let periods = vec![period("Tonight", "2025-06-10T19:00:00-07:00", "Clear", "3 mph")];
        let chosen = select_evening_period(&periods, at("2025-06-10T23:00:00-07:00")).unwrap();
        assert_eq!(chosen.name, "Tonight");
    }

    #[test]
    fn test_transparency_clear_wins_over_cloudy() {
        assert_eq!(
            transparency_from_text("Becoming clear, then partly cloudy after midnight"),
            SkyQuality::Excellent
        );
    }

    #[test]
    fn test_transparency_partly_before_cloudy() {
        assert_eq!(transparency_from_text("Partly cloudy"), SkyQuality::Fair);
    }

    #[test]
    fn test_transparency_cloudy() {
        assert_eq!(transparency_from_text("Mostly cloudy with showers"), SkyQuality::Poor);
    }

    #[test]
    fn test_transparency_case_insensitive() {
        assert_eq!(transparency_from_text("CLEAR skies tonight"), SkyQuality::Excellent);
    }

    #[test]
    fn test_transparency_unknown() {
        assert_eq!(transparency_from_text("Patchy fog before 9pm"), SkyQuality::Unknown);
    }

    #[test]
    fn test_seeing_thresholds() {
        assert_eq!(seeing_from_wind("4 mph"), SkyQuality::Excellent);
        assert_eq!(seeing_from_wind("7 mph"), SkyQuality::Fair);
        assert_eq!(seeing_from_wind("12 mph"), SkyQuality::Poor);
    }

    #[test]
    fn test_seeing_reads_leading_integer_of_range() {
        assert_eq!(seeing_from_wind("10 to 15 mph"), SkyQuality::Poor);
        assert_eq!(seeing_from_wind("3 to 8 mph"), SkyQuality::Excellent);
    }

    #[test]
    fn test_seeing_non_numeric_is_unknown() {
        assert_eq!(seeing_from_wind("gusty"), SkyQuality::Unknown);
        assert_eq!(seeing_from_wind(""), SkyQuality::Unknown);
    }

    #[test]
    fn test_interpret_scenario() {
        // From the observable contract: 14:00 Sunny + 19:00 Mostly Clear
        // at noon selects the 19:00 period with Excellent/Excellent.
        let periods = vec![
            period("This Afternoon", "2025-06-10T14:00:00-07:00", "Sunny", "5 mph"),
            period(
                "Tonight",
                "2025-06-10T19:00:00-07:00",
                "Mostly Clear, wind 3 mph",
                "3 mph",
            ),
        ];

        let result = interpret(&periods, at("2025-06-10T12:00:00-07:00")).unwrap();
        assert_eq!(result.forecast_day, "Tonight");
        assert_eq!(result.transparency, SkyQuality::Excellent);
        assert_eq!(result.seeing, SkyQuality::Excellent);
        assert_eq!(result.forecast, "Mostly Clear, wind 3 mph");
    }
}
