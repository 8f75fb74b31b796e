use crate::models::{RecurrenceKind, RecurrencePattern, WeekdaySet};

/// Day tokens in the canonical Monday..Sunday order used by BYDAY
const DAY_TOKENS: [(u8, &str); 7] = [
    (WeekdaySet::MONDAY, "MO"),
    (WeekdaySet::TUESDAY, "TU"),
    (WeekdaySet::WEDNESDAY, "WE"),
    (WeekdaySet::THURSDAY, "TH"),
    (WeekdaySet::FRIDAY, "FR"),
    (WeekdaySet::SATURDAY, "SA"),
    (WeekdaySet::SUNDAY, "SU"),
];

/// Translate a source recurrence pattern into an iCalendar RRULE string.
///
/// Returns an empty string for recurrence types that have no RRULE
/// equivalent; callers must omit the recurrence field in that case rather
/// than send a malformed rule.
pub fn translate(pattern: &RecurrencePattern) -> String {
    let frequency = match pattern.kind {
        RecurrenceKind::Daily => "DAILY",
        RecurrenceKind::Weekly => "WEEKLY",
        RecurrenceKind::Monthly | RecurrenceKind::MonthlyByWeekday => "MONTHLY",
        RecurrenceKind::Yearly | RecurrenceKind::YearlyByWeekday => "YEARLY",
        // Unsupported recurrence type
        RecurrenceKind::Unsupported => return String::new(),
    };

    let mut rule = format!("RRULE:FREQ={}", frequency);

    if pattern.interval > 1 {
        rule.push_str(&format!(";INTERVAL={}", pattern.interval));
    }

    // BYDAY applies to weekly recurrence only
    if pattern.kind == RecurrenceKind::Weekly && !pattern.weekdays.is_empty() {
        let days: Vec<&str> = DAY_TOKENS
            .iter()
            .filter(|(day, _)| pattern.weekdays.contains(*day))
            .map(|(_, token)| *token)
            .collect();
        rule.push_str(&format!(";BYDAY={}", days.join(",")));
    }

    rule
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(kind: RecurrenceKind, interval: u32, weekdays: WeekdaySet) -> RecurrencePattern {
        RecurrencePattern {
            kind,
            interval,
            weekdays,
        }
    }

    #[test]
    fn test_daily_rule() {
        let rule = translate(&pattern(RecurrenceKind::Daily, 1, WeekdaySet::default()));
        assert_eq!(rule, "RRULE:FREQ=DAILY");
    }

    #[test]
    fn test_interval_appended_only_above_one() {
        let rule = translate(&pattern(RecurrenceKind::Daily, 3, WeekdaySet::default()));
        assert_eq!(rule, "RRULE:FREQ=DAILY;INTERVAL=3");

        let rule = translate(&pattern(RecurrenceKind::Monthly, 1, WeekdaySet::default()));
        assert_eq!(rule, "RRULE:FREQ=MONTHLY");
    }

    #[test]
    fn test_weekly_with_interval_and_days() {
        let days = WeekdaySet::from_days(&[WeekdaySet::MONDAY, WeekdaySet::WEDNESDAY]);
        let rule = translate(&pattern(RecurrenceKind::Weekly, 2, days));
        assert_eq!(rule, "RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE");
    }

    #[test]
    fn test_weekly_day_order_is_monday_first() {
        let days = WeekdaySet::from_days(&[
            WeekdaySet::SUNDAY,
            WeekdaySet::FRIDAY,
            WeekdaySet::MONDAY,
        ]);
        let rule = translate(&pattern(RecurrenceKind::Weekly, 1, days));
        assert_eq!(rule, "RRULE:FREQ=WEEKLY;BYDAY=MO,FR,SU");
    }

    #[test]
    fn test_byday_only_for_weekly() {
        let days = WeekdaySet::from_days(&[WeekdaySet::MONDAY]);
        let rule = translate(&pattern(RecurrenceKind::Monthly, 1, days));
        assert_eq!(rule, "RRULE:FREQ=MONTHLY");
    }

    #[test]
    fn test_by_weekday_variants_map_to_base_frequency() {
        let rule = translate(&pattern(
            RecurrenceKind::MonthlyByWeekday,
            1,
            WeekdaySet::default(),
        ));
        assert_eq!(rule, "RRULE:FREQ=MONTHLY");

        let rule = translate(&pattern(
            RecurrenceKind::YearlyByWeekday,
            2,
            WeekdaySet::default(),
        ));
        assert_eq!(rule, "RRULE:FREQ=YEARLY;INTERVAL=2");
    }

    #[test]
    fn test_unsupported_kind_yields_empty_string() {
        let rule = translate(&pattern(
            RecurrenceKind::Unsupported,
            2,
            WeekdaySet::from_days(&[WeekdaySet::MONDAY]),
        ));
        assert_eq!(rule, "");
    }
}
