use crate::models::SummaryResponse;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;

/// Identifier assigned by the ledger when a habit is first added.
/// Stable for the lifetime of the ledger, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HabitId(u64);

impl HabitId {
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no record for {0}")]
    DateNotFound(NaiveDate),
    #[error("no habit {0} recorded on {1}")]
    HabitNotFound(HabitId, NaiveDate),
}

#[derive(Debug, Clone)]
pub struct HabitEntry {
    pub name: String,
    pub done: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DayRecord {
    pub habits: BTreeMap<HabitId, HabitEntry>,
    pub mood: Option<u8>,
}

impl DayRecord {
    fn counts(&self) -> (usize, usize) {
        let done = self.habits.values().filter(|habit| habit.done).count();
        (done, self.habits.len())
    }
}

/// Running streak of consecutive fully-completed days. `last_success`
/// remembers the most recent qualifying date so that repeated calls within
/// the same day can neither re-increment nor re-reset the counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakState {
    pub count: u32,
    pub last_success: Option<NaiveDate>,
}

/// Date-keyed store of habit completion flags. Day records are created
/// lazily on first reference and live for the session; nothing is ever
/// deleted or written to disk.
#[derive(Debug, Default)]
pub struct Ledger {
    days: BTreeMap<NaiveDate, DayRecord>,
    next_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    /// Seeds a fresh day with the configured habit list. Days that already
    /// have a record are left untouched, so user edits survive refreshes.
    pub fn seed_day(&mut self, date: NaiveDate, names: &[String]) {
        if self.days.contains_key(&date) {
            return;
        }
        self.days.entry(date).or_default();
        for name in names {
            self.add_habit(date, name);
        }
    }

    /// Adds a habit with completion=false to that date's record. Idempotent
    /// by name: adding a name the day already has returns the existing id.
    pub fn add_habit(&mut self, date: NaiveDate, name: &str) -> HabitId {
        if let Some(record) = self.days.get(&date) {
            if let Some((id, _)) = record.habits.iter().find(|(_, habit)| habit.name == name) {
                return *id;
            }
        }
        self.next_id += 1;
        let id = HabitId(self.next_id);
        self.days.entry(date).or_default().habits.insert(
            id,
            HabitEntry {
                name: name.to_string(),
                done: false,
            },
        );
        id
    }

    pub fn set_completion(
        &mut self,
        date: NaiveDate,
        id: HabitId,
        done: bool,
    ) -> Result<(), LedgerError> {
        let record = self
            .days
            .get_mut(&date)
            .ok_or(LedgerError::DateNotFound(date))?;
        let habit = record
            .habits
            .get_mut(&id)
            .ok_or(LedgerError::HabitNotFound(id, date))?;
        habit.done = done;
        Ok(())
    }

    pub fn set_mood(&mut self, date: NaiveDate, score: u8) {
        self.days.entry(date).or_default().mood = Some(score);
    }

    /// Percentage of the day's habits marked done, truncated toward zero.
    /// A day with no habits (or no record at all) has rate 0.
    pub fn completion_rate(&self, date: NaiveDate) -> u8 {
        let Some(record) = self.days.get(&date) else {
            return 0;
        };
        let (done, total) = record.counts();
        if total == 0 {
            0
        } else {
            (done * 100 / total) as u8
        }
    }

    /// Computes the next streak state for `today`. The counter grows only
    /// when every habit defined for today is done and yesterday was the
    /// previous qualifying date; a gap starts the count over at 1. An
    /// incomplete day resets the state once, on the first call after the
    /// day transition. At most one increment per calendar date.
    pub fn advance_streak(&self, today: NaiveDate, state: &StreakState) -> StreakState {
        let (done, total) = self
            .days
            .get(&today)
            .map(DayRecord::counts)
            .unwrap_or((0, 0));

        if total > 0 && done == total {
            match state.last_success {
                Some(date) if date == today => state.clone(),
                Some(date) if date + Duration::days(1) == today => StreakState {
                    count: state.count + 1,
                    last_success: Some(today),
                },
                _ => StreakState {
                    count: 1,
                    last_success: Some(today),
                },
            }
        } else {
            match state.last_success {
                Some(date) if date != today => StreakState::default(),
                _ => state.clone(),
            }
        }
    }

    /// Plain summary handed to the presentation layer and to an external
    /// report generator: who finished, who didn't, the rate, the streak.
    pub fn day_summary(&self, date: NaiveDate, streak: &StreakState) -> SummaryResponse {
        let mut completed = Vec::new();
        let mut incomplete = Vec::new();
        if let Some(record) = self.days.get(&date) {
            for habit in record.habits.values() {
                if habit.done {
                    completed.push(habit.name.clone());
                } else {
                    incomplete.push(habit.name.clone());
                }
            }
        }
        SummaryResponse {
            date: date.to_string(),
            completed,
            incomplete,
            rate: self.completion_rate(date),
            streak: streak.count,
        }
    }
}

/// Growth stage of the forest decoration, saturating at a full tree.
pub fn forest_level(streak: u32) -> u8 {
    streak.min(5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn complete_all(ledger: &mut Ledger, day: NaiveDate) {
        let ids: Vec<HabitId> = ledger.day(day).unwrap().habits.keys().copied().collect();
        for id in ids {
            ledger.set_completion(day, id, true).unwrap();
        }
    }

    #[test]
    fn rate_is_zero_for_unknown_or_empty_day() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.completion_rate(date(1)), 0);

        ledger.seed_day(date(1), &[]);
        assert_eq!(ledger.completion_rate(date(1)), 0);
    }

    #[test]
    fn rate_truncates_toward_zero() {
        let mut ledger = Ledger::new();
        let day = date(1);
        let id = ledger.add_habit(day, "water");
        ledger.add_habit(day, "run");
        ledger.add_habit(day, "read");

        ledger.set_completion(day, id, true).unwrap();
        assert_eq!(ledger.completion_rate(day), 33);
    }

    #[test]
    fn rate_is_monotonic_as_habits_complete() {
        let mut ledger = Ledger::new();
        let day = date(1);
        let ids: Vec<HabitId> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| ledger.add_habit(day, name))
            .collect();

        let mut previous = ledger.completion_rate(day);
        for id in ids {
            ledger.set_completion(day, id, true).unwrap();
            let rate = ledger.completion_rate(day);
            assert!(rate >= previous);
            previous = rate;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn single_completed_habit_is_full_rate() {
        let mut ledger = Ledger::new();
        let day = date(1);
        let id = ledger.add_habit(day, "only one");
        ledger.set_completion(day, id, true).unwrap();
        assert_eq!(ledger.completion_rate(day), 100);
    }

    #[test]
    fn add_habit_is_idempotent_by_name() {
        let mut ledger = Ledger::new();
        let day = date(1);
        let first = ledger.add_habit(day, "water");
        let second = ledger.add_habit(day, "water");

        assert_eq!(first, second);
        assert_eq!(ledger.day(day).unwrap().habits.len(), 1);
    }

    #[test]
    fn same_name_on_different_days_gets_distinct_ids() {
        let mut ledger = Ledger::new();
        let monday = ledger.add_habit(date(2), "water");
        let tuesday = ledger.add_habit(date(3), "water");
        assert_ne!(monday, tuesday);
    }

    #[test]
    fn set_completion_reports_missing_date_and_habit() {
        let mut ledger = Ledger::new();
        let day = date(1);
        let id = ledger.add_habit(day, "water");

        assert_eq!(
            ledger.set_completion(date(2), id, true),
            Err(LedgerError::DateNotFound(date(2)))
        );
        let missing = HabitId::from_u64(9999);
        assert_eq!(
            ledger.set_completion(day, missing, true),
            Err(LedgerError::HabitNotFound(missing, day))
        );
    }

    #[test]
    fn streak_counts_consecutive_full_days_and_resets_on_a_miss() {
        let mut ledger = Ledger::new();
        let names: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        for day in 1..=4 {
            ledger.seed_day(date(day), &names);
        }

        complete_all(&mut ledger, date(1));
        let streak = ledger.advance_streak(date(1), &StreakState::default());
        assert_eq!(streak.count, 1);

        complete_all(&mut ledger, date(2));
        let streak = ledger.advance_streak(date(2), &streak);
        assert_eq!(streak.count, 2);

        // day 3 stays at 0/3
        let streak = ledger.advance_streak(date(3), &streak);
        assert_eq!(streak.count, 0);
        assert_eq!(streak.last_success, None);

        complete_all(&mut ledger, date(4));
        let streak = ledger.advance_streak(date(4), &streak);
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn streak_does_not_double_count_the_same_day() {
        let mut ledger = Ledger::new();
        let day = date(1);
        let id = ledger.add_habit(day, "water");
        ledger.set_completion(day, id, true).unwrap();

        let once = ledger.advance_streak(day, &StreakState::default());
        let twice = ledger.advance_streak(day, &once);
        assert_eq!(once.count, 1);
        assert_eq!(twice, once);
    }

    #[test]
    fn streak_restarts_at_one_after_a_gap_in_dates() {
        let mut ledger = Ledger::new();
        let names = vec!["a".to_string()];
        ledger.seed_day(date(1), &names);
        ledger.seed_day(date(5), &names);
        complete_all(&mut ledger, date(1));
        complete_all(&mut ledger, date(5));

        let streak = ledger.advance_streak(date(1), &StreakState::default());
        // days 2-4 were never visited, so no reset ran in between
        let streak = ledger.advance_streak(date(5), &streak);
        assert_eq!(streak.count, 1);
        assert_eq!(streak.last_success, Some(date(5)));
    }

    #[test]
    fn empty_day_never_continues_a_streak() {
        let mut ledger = Ledger::new();
        let names = vec!["a".to_string()];
        ledger.seed_day(date(1), &names);
        complete_all(&mut ledger, date(1));
        ledger.seed_day(date(2), &[]);

        let streak = ledger.advance_streak(date(1), &StreakState::default());
        let streak = ledger.advance_streak(date(2), &streak);
        assert_eq!(streak.count, 0);
    }

    #[test]
    fn incomplete_day_does_not_reset_twice_within_the_day() {
        let mut ledger = Ledger::new();
        let names = vec!["a".to_string()];
        ledger.seed_day(date(1), &names);
        ledger.seed_day(date(2), &names);
        complete_all(&mut ledger, date(1));

        let streak = ledger.advance_streak(date(1), &StreakState::default());
        let reset = ledger.advance_streak(date(2), &streak);
        assert_eq!(reset, StreakState::default());
        // a second refresh on the incomplete day is a no-op
        let again = ledger.advance_streak(date(2), &reset);
        assert_eq!(again, reset);
    }

    #[test]
    fn summary_splits_completed_and_incomplete_names() {
        let mut ledger = Ledger::new();
        let day = date(1);
        let water = ledger.add_habit(day, "water");
        ledger.add_habit(day, "run");
        ledger.set_completion(day, water, true).unwrap();

        let summary = ledger.day_summary(
            day,
            &StreakState {
                count: 3,
                last_success: Some(day),
            },
        );
        assert_eq!(summary.completed, vec!["water".to_string()]);
        assert_eq!(summary.incomplete, vec!["run".to_string()]);
        assert_eq!(summary.rate, 50);
        assert_eq!(summary.streak, 3);
    }

    #[test]
    fn forest_level_saturates() {
        assert_eq!(forest_level(0), 0);
        assert_eq!(forest_level(3), 3);
        assert_eq!(forest_level(12), 5);
    }
}
