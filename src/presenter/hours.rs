use std::collections::HashMap;

use time::OffsetDateTime;

pub const WEEK_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Placeholder for days with no reported hours.
pub const NO_HOURS: &str = "—";

// Prefix-matched against the cleaned lowercased day token. Only English
// tokens and their common abbreviations are recognized.
const DAY_ALIASES: &[(&str, &str)] = &[
    ("monday", "Monday"),
    ("mon", "Monday"),
    ("tuesday", "Tuesday"),
    ("tues", "Tuesday"),
    ("tue", "Tuesday"),
    ("wednesday", "Wednesday"),
    ("weds", "Wednesday"),
    ("wed", "Wednesday"),
    ("thursday", "Thursday"),
    ("thurs", "Thursday"),
    ("thur", "Thursday"),
    ("thu", "Thursday"),
    ("friday", "Friday"),
    ("fri", "Friday"),
    ("saturday", "Saturday"),
    ("sat", "Saturday"),
    ("sunday", "Sunday"),
    ("sun", "Sunday"),
];

/// One row of the rendered weekly table.
#[derive(Clone, Debug, PartialEq)]
pub struct HoursRow {
    pub day: &'static str,
    pub hours: String,
    pub is_today: bool,
}

/// Map an upstream day token to its canonical weekday name, or None for
/// anything unrecognized.
pub fn normalize_day(input: &str) -> Option<&'static str> {
    let clean = input.trim_end_matches(':').trim().to_lowercase();
    DAY_ALIASES
        .iter()
        .find(|(alias, _)| clean.starts_with(alias))
        .map(|(_, day)| *day)
}

/// Parse upstream "day: hours" lines into canonical-day → hours text.
/// Unrecognized day tokens are dropped; empty hours become the placeholder.
pub fn parse_opening_hours(lines: &[String]) -> HashMap<&'static str, String> {
    let mut parsed = HashMap::new();
    for line in lines {
        let Some(idx) = line.find(':') else { continue };
        let Some(day) = normalize_day(&line[..idx]) else { continue };
        let hours = line[idx + 1..].trim();
        let hours = if hours.is_empty() { NO_HOURS } else { hours };
        parsed.insert(day, hours.to_string());
    }
    parsed
}

/// Render the fixed Monday→Sunday table, with placeholders for unreported
/// days and the current local weekday flagged.
pub fn weekly_hours_table(lines: &[String]) -> Vec<HoursRow> {
    table_with_today(lines, today_name())
}

fn table_with_today(lines: &[String], today: Option<&'static str>) -> Vec<HoursRow> {
    let parsed = parse_opening_hours(lines);
    WEEK_ORDER
        .iter()
        .map(|&day| HoursRow {
            day,
            hours: parsed
                .get(day)
                .cloned()
                .unwrap_or_else(|| NO_HOURS.to_string()),
            is_today: today == Some(day),
        })
        .collect()
}

/// Current weekday from the local clock, or None when the local UTC offset
/// cannot be determined.
pub fn today_name() -> Option<&'static str> {
    let now = OffsetDateTime::now_local().ok()?;
    Some(match now.weekday() {
        time::Weekday::Monday => "Monday",
        time::Weekday::Tuesday => "Tuesday",
        time::Weekday::Wednesday => "Wednesday",
        time::Weekday::Thursday => "Thursday",
        time::Weekday::Friday => "Friday",
        time::Weekday::Saturday => "Saturday",
        time::Weekday::Sunday => "Sunday",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalizes_abbreviations_and_casing() {
        assert_eq!(normalize_day("Mon"), Some("Monday"));
        assert_eq!(normalize_day(" tuesday "), Some("Tuesday"));
        assert_eq!(normalize_day("WEDS"), Some("Wednesday"));
        assert_eq!(normalize_day("Thur"), Some("Thursday"));
        assert_eq!(normalize_day("Sun:"), Some("Sunday"));
        assert_eq!(normalize_day("Foo"), None);
        assert_eq!(normalize_day(""), None);
    }

    #[test]
    fn parses_known_days_and_drops_the_rest() {
        let parsed = parse_opening_hours(&lines(&[
            "Mon: 9–18",
            "tuesday : closed",
            "Foo: 10-20",
        ]));

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("Monday").map(String::as_str), Some("9–18"));
        assert_eq!(parsed.get("Tuesday").map(String::as_str), Some("closed"));
    }

    #[test]
    fn lines_without_a_colon_are_ignored() {
        assert!(parse_opening_hours(&lines(&["Monday 9-18"])).is_empty());
    }

    #[test]
    fn empty_hours_text_becomes_placeholder() {
        let parsed = parse_opening_hours(&lines(&["Fri: "]));
        assert_eq!(parsed.get("Friday").map(String::as_str), Some(NO_HOURS));
    }

    #[test]
    fn table_covers_the_whole_week_in_canonical_order() {
        let table = table_with_today(&lines(&["Wed: 10:00 – 22:00"]), Some("Wednesday"));

        assert_eq!(table.len(), 7);
        let days: Vec<&str> = table.iter().map(|row| row.day).collect();
        assert_eq!(days, WEEK_ORDER);

        assert_eq!(table[2].hours, "10:00 – 22:00");
        assert!(table[2].is_today);
        assert!(table.iter().filter(|row| row.is_today).count() == 1);
        assert!(table
            .iter()
            .filter(|row| row.day != "Wednesday")
            .all(|row| row.hours == NO_HOURS));
    }

    #[test]
    fn table_with_unknown_today_flags_nothing() {
        let table = table_with_today(&[], None);
        assert!(table.iter().all(|row| !row.is_today));
        assert!(table.iter().all(|row| row.hours == NO_HOURS));
    }
}
