use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use anyhow::{anyhow, Result};

/// Parses a reminder time of the form `HH:MM`.
pub fn parse_reminder_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| anyhow!("Invalid time '{}', expected HH:MM", input))
}

/// Parses the last day of the term relative to `today`.
///
/// Accepts `YYYY-MM-DD`, relative offsets (`+10d`, `+6w`), `eow` and `eom`.
pub fn parse_term_end(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "eow" => {
            // End of week (Sunday)
            let days_to_sunday = 6 - today.weekday().num_days_from_monday() as i64;
            return Ok(today + Duration::days(days_to_sunday));
        }
        "eom" => return end_of_month(today),
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw)
    if let Some(rest) = input.strip_prefix('+') {
        if rest.len() < 2 {
            return Err(anyhow!("Invalid relative format: {}", input));
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: i64 = num_str.parse().map_err(|_| anyhow!("Invalid relative format: {}", input))?;
        return match unit {
            "d" => Ok(today + Duration::days(count)),
            "w" => Ok(today + Duration::weeks(count)),
            _ => Err(anyhow!("Unknown unit in relative time: {}", unit)),
        };
    }

    // 3. Fallback to ISO date
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| anyhow!("Could not parse date: {}", input))
}

/// Whole weeks left from `today` through `end`, counting a partial week as one.
pub fn weeks_until(today: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - today).num_days();
    if days <= 0 {
        return 0;
    }
    u32::try_from((days as u64).div_ceil(7)).unwrap_or(u32::MAX)
}

pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

fn end_of_month(today: NaiveDate) -> Result<NaiveDate> {
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    next_month
        .map(|d| d - Duration::days(1))
        .ok_or_else(|| anyhow!("Date out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_reminder_time() {
        assert_eq!(parse_reminder_time("08:00").unwrap(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(parse_reminder_time(" 19:45 ").unwrap(), NaiveTime::from_hms_opt(19, 45, 0).unwrap());
        assert!(parse_reminder_time("25:00").is_err());
        assert!(parse_reminder_time("8am").is_err());
    }

    #[test]
    fn test_parse_term_end() {
        // 2026-10-16 is a Friday
        let today = date(2026, 10, 16);
        assert_eq!(parse_term_end("2026-12-11", today).unwrap(), date(2026, 12, 11));
        assert_eq!(parse_term_end("+6w", today).unwrap(), date(2026, 11, 27));
        assert_eq!(parse_term_end("+10d", today).unwrap(), date(2026, 10, 26));
        assert_eq!(parse_term_end("eow", today).unwrap(), date(2026, 10, 18));
        assert_eq!(parse_term_end("eom", today).unwrap(), date(2026, 10, 31));
        assert_eq!(parse_term_end("eom", date(2026, 12, 3)).unwrap(), date(2026, 12, 31));
        assert!(parse_term_end("+6y", today).is_err());
        assert!(parse_term_end("+", today).is_err());
        assert!(parse_term_end("someday", today).is_err());
    }

    #[test]
    fn test_weeks_until() {
        let today = date(2026, 10, 16);
        assert_eq!(weeks_until(today, today), 0);
        assert_eq!(weeks_until(today, date(2026, 10, 10)), 0);
        assert_eq!(weeks_until(today, date(2026, 10, 17)), 1);
        assert_eq!(weeks_until(today, date(2026, 10, 30)), 2);
        assert_eq!(weeks_until(today, date(2026, 10, 31)), 3);
    }

    #[test]
    fn test_is_week_start() {
        assert!(is_week_start(date(2026, 10, 19)));
        assert!(!is_week_start(date(2026, 10, 16)));
    }
}
