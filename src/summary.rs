use crate::config::Config;
use crate::countdown::build_countdown;
use crate::models::{DailySummary, Dashboard, Kick, date_key};
use crate::store::Snapshot;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Kicks needed on one day before "time to 10" is reported.
pub const KICK_TARGET: usize = 10;

/// One summary per distinct day, most recent day first.
pub fn summarize(kicks: &[Kick]) -> Vec<DailySummary> {
    let mut by_date: BTreeMap<&str, Vec<&Kick>> = BTreeMap::new();
    for kick in kicks {
        by_date.entry(kick.date.as_str()).or_default().push(kick);
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, day)| {
            let time_to_10_kicks = time_to_nth(day.iter().copied(), KICK_TARGET)
                .map(|span| format_minutes(span.num_minutes()));
            DailySummary {
                date: date.to_string(),
                label: short_label(date),
                kick_count: day.len(),
                time_to_10_kicks,
            }
        })
        .collect()
}

/// Span between the first and the `n`th kick in chronological order.
pub fn time_to_nth<'a>(kicks: impl IntoIterator<Item = &'a Kick>, n: usize) -> Option<Duration> {
    let mut stamps: Vec<DateTime<Utc>> = kicks.into_iter().map(|kick| kick.timestamp).collect();
    if n == 0 || stamps.len() < n {
        return None;
    }
    stamps.sort();
    Some(stamps[n - 1] - stamps[0])
}

pub fn format_minutes(minutes: i64) -> String {
    if minutes < 60 {
        format!("{minutes}m")
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// Today's kick count and time to 10, `today` being a UTC calendar day.
pub fn today_figures(kicks: &[Kick], today: NaiveDate) -> (usize, Option<String>) {
    let key = date_key(today);
    let todays: Vec<&Kick> = kicks.iter().filter(|kick| kick.date == key).collect();
    let time_to_10 = time_to_nth(todays.iter().copied(), KICK_TARGET)
        .map(|span| format_minutes(span.num_minutes()));
    (todays.len(), time_to_10)
}

pub fn build_dashboard(snapshot: &Snapshot, config: &Config) -> Dashboard {
    build_dashboard_at(snapshot, Utc::now(), config)
}

pub fn build_dashboard_at(snapshot: &Snapshot, now: DateTime<Utc>, config: &Config) -> Dashboard {
    let today = now.date_naive();
    let (kick_count, time_to_10_kicks) = today_figures(&snapshot.kicks, today);
    let countdown = match (config.due_date, config.lmp) {
        (Some(due), Some(lmp)) => Some(build_countdown(now, due, lmp)),
        _ => None,
    };

    Dashboard {
        date: date_key(today),
        kick_count,
        time_to_10_kicks,
        countdown,
        history: summarize(&snapshot.kicks),
        loading: !snapshot.loaded,
        version: snapshot.version,
    }
}

fn short_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|day| day.format("%b %-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn kicks_at(day: (i32, u32, u32), minute_offsets: &[i64]) -> Vec<Kick> {
        let start = Utc.with_ymd_and_hms(day.0, day.1, day.2, 9, 0, 0).unwrap();
        minute_offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| Kick::new(format!("{}-{i}", day.2), start + Duration::minutes(*offset)))
            .collect()
    }

    fn config(due_date: Option<NaiveDate>) -> Config {
        Config {
            port: 0,
            data_path: PathBuf::from("unused.json"),
            due_date,
            lmp: due_date.map(|due| due - Duration::days(280)),
        }
    }

    #[test]
    fn ten_kicks_over_seventy_minutes() {
        let kicks = kicks_at((2024, 1, 1), &[0, 5, 10, 15, 20, 25, 30, 35, 40, 70]);
        let summaries = summarize(&kicks);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date, "2024-01-01");
        assert_eq!(summaries[0].label, "Jan 1");
        assert_eq!(summaries[0].kick_count, 10);
        assert_eq!(summaries[0].time_to_10_kicks.as_deref(), Some("1h 10m"));
    }

    #[test]
    fn nine_kicks_have_no_time_to_10() {
        let kicks = kicks_at((2024, 1, 1), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let summaries = summarize(&kicks);
        assert_eq!(summaries[0].kick_count, 9);
        assert!(summaries[0].time_to_10_kicks.is_none());
    }

    #[test]
    fn same_instant_kicks_take_zero_minutes() {
        let kicks = kicks_at((2024, 1, 1), &[0; 10]);
        assert_eq!(summarize(&kicks)[0].time_to_10_kicks.as_deref(), Some("0m"));
    }

    #[test]
    fn empty_input_yields_empty_figures() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(summarize(&[]).is_empty());
        assert_eq!(today_figures(&[], today), (0, None));
    }

    #[test]
    fn kicks_after_the_tenth_are_ignored_and_order_does_not_matter() {
        let mut kicks = kicks_at((2024, 1, 1), &[300, 45, 0, 5, 10, 15, 20, 25, 30, 35, 40, 500]);
        kicks.reverse();
        let summary = &summarize(&kicks)[0];
        assert_eq!(summary.kick_count, 12);
        assert_eq!(summary.time_to_10_kicks.as_deref(), Some("45m"));
    }

    #[test]
    fn partial_minutes_round_down() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut kicks: Vec<Kick> = (0..9).map(|i| Kick::new(format!("k{i}"), start)).collect();
        kicks.push(Kick::new("k9", start + Duration::seconds(119)));
        assert_eq!(time_to_nth(&kicks, 10), Some(Duration::seconds(119)));
        assert_eq!(summarize(&kicks)[0].time_to_10_kicks.as_deref(), Some("1m"));
    }

    #[test]
    fn summaries_cover_each_date_once_newest_first() {
        let mut kicks = kicks_at((2024, 1, 1), &[0, 1]);
        kicks.extend(kicks_at((2024, 1, 3), &[0]));
        kicks.extend(kicks_at((2023, 12, 31), &[0, 1, 2]));
        kicks.extend(kicks_at((2024, 1, 1), &[9]));

        let summaries = summarize(&kicks);
        let dates: Vec<&str> = summaries.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-01", "2023-12-31"]);
        for summary in &summaries {
            let expected = kicks.iter().filter(|k| k.date == summary.date).count();
            assert_eq!(summary.kick_count, expected);
            assert_eq!(summary.time_to_10_kicks.is_some(), summary.kick_count >= KICK_TARGET);
        }
        assert_eq!(summaries, summarize(&kicks));
    }

    #[test]
    fn time_to_nth_needs_n_kicks() {
        let kicks = kicks_at((2024, 1, 1), &[0, 3, 7]);
        assert_eq!(time_to_nth(&kicks, 3), Some(Duration::minutes(7)));
        assert_eq!(time_to_nth(&kicks, 4), None);
        assert_eq!(time_to_nth(&kicks, 0), None);
    }

    #[test]
    fn format_minutes_switches_to_hours_at_sixty() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(59), "59m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(125), "2h 5m");
    }

    #[test]
    fn today_figures_only_count_today() {
        let mut kicks = kicks_at((2024, 1, 2), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 12]);
        kicks.extend(kicks_at((2024, 1, 1), &[0, 1, 2]));
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(today_figures(&kicks, today), (10, Some("12m".to_string())));
    }

    #[test]
    fn dashboard_combines_today_history_and_countdown() {
        let snapshot = Snapshot {
            version: 7,
            loaded: true,
            kicks: Arc::new(kicks_at((2024, 1, 2), &[0, 1])),
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 20, 0, 0).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 1, 12);

        let dashboard = build_dashboard_at(&snapshot, now, &config(due));
        assert_eq!(dashboard.date, "2024-01-02");
        assert_eq!(dashboard.kick_count, 2);
        assert!(dashboard.time_to_10_kicks.is_none());
        assert_eq!(dashboard.history.len(), 1);
        assert_eq!(dashboard.version, 7);
        assert!(!dashboard.loading);
        let countdown = dashboard.countdown.expect("countdown");
        assert_eq!(countdown.info.days_to_go, 10);

        let without_due = build_dashboard_at(&Snapshot::default(), now, &config(None));
        assert!(without_due.countdown.is_none());
        assert!(without_due.loading);
        assert_eq!(without_due.kick_count, 0);
    }
}
