use crate::models::{Countdown, TimeInfo};
use chrono::{DateTime, NaiveDate, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Days left until `due_date` and gestational age measured from `lmp`.
///
/// Both dates are taken at UTC midnight. `days_to_go` rounds up and goes
/// negative once the due date has passed.
pub fn derive_time_info(now: DateTime<Utc>, due_date: NaiveDate, lmp: NaiveDate) -> TimeInfo {
    let until_due = (midnight(due_date) - now).num_milliseconds();
    let days_to_go = -(-until_due).div_euclid(DAY_MS);

    let since_lmp = (now - midnight(lmp)).num_milliseconds();
    let days_pregnant = since_lmp.div_euclid(DAY_MS);

    TimeInfo {
        days_to_go,
        weeks: days_pregnant.div_euclid(7),
        days: days_pregnant.rem_euclid(7),
    }
}

pub fn build_countdown(now: DateTime<Utc>, due_date: NaiveDate, lmp: NaiveDate) -> Countdown {
    let info = derive_time_info(now, due_date, lmp);
    Countdown {
        due_date: due_date.format("%Y-%m-%d").to_string(),
        due_date_label: due_date_label(due_date),
        fetal_age: fetal_age_label(&info),
        info,
    }
}

pub fn fetal_age_label(info: &TimeInfo) -> String {
    if info.days > 0 {
        format!("{} weeks, {} days", info.weeks, info.days)
    } else {
        format!("{} weeks", info.weeks)
    }
}

pub fn due_date_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn partial_day_rounds_days_to_go_up() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let info = derive_time_info(now, date(2025, 3, 14), date(2024, 6, 7));
        assert_eq!(info.days_to_go, 4);
    }

    #[test]
    fn days_to_go_is_negative_after_due_date() {
        let now = Utc.with_ymd_and_hms(2025, 3, 16, 12, 0, 0).unwrap();
        let info = derive_time_info(now, date(2025, 3, 14), date(2024, 6, 7));
        assert_eq!(info.days_to_go, -2);
    }

    #[test]
    fn gestational_age_splits_into_weeks_and_days() {
        // 2024-06-07 + 200 days = 2024-12-24
        let now = Utc.with_ymd_and_hms(2024, 12, 24, 18, 0, 0).unwrap();
        let info = derive_time_info(now, date(2025, 3, 14), date(2024, 6, 7));
        assert_eq!(info.weeks, 28);
        assert_eq!(info.days, 4);
        assert_eq!(fetal_age_label(&info), "28 weeks, 4 days");
    }

    #[test]
    fn whole_weeks_omit_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let info = derive_time_info(now, date(2025, 3, 14), date(2024, 6, 7));
        assert_eq!((info.weeks, info.days), (2, 0));
        assert_eq!(fetal_age_label(&info), "2 weeks");
    }

    #[test]
    fn remainder_stays_in_range_before_reference_date() {
        let now = Utc.with_ymd_and_hms(2024, 6, 4, 0, 0, 0).unwrap();
        let info = derive_time_info(now, date(2025, 3, 14), date(2024, 6, 7));
        assert_eq!((info.weeks, info.days), (-1, 4));
    }

    #[test]
    fn countdown_labels() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();
        let countdown = build_countdown(now, date(2025, 3, 14), date(2024, 6, 7));
        assert_eq!(countdown.due_date, "2025-03-14");
        assert_eq!(countdown.due_date_label, "Mar 14, 2025");
        assert_eq!(countdown.info.days_to_go, 0);
        assert_eq!(countdown.fetal_age, "40 weeks");
    }
}
