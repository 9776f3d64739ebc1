//! In-memory journal with a derived "shown" view.
//!
//! Index-based commands address the shown view, which is a 1-based
//! renumbering of whatever the last `list`/`find` selected. The view is
//! recomputed after every mutation under the same filter.

use crate::datetime::{is_same_day, is_same_week};
use crate::types::{CalorieGoal, WorkoutGoal};
use crate::{Entry, Error, Result};
use chrono::NaiveDateTime;

/// Selection applied to produce the shown view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    /// Type tag, matched case-insensitively
    Kind(String),
    /// Substring of the entry description
    Keyword(String),
}

impl Filter {
    fn accepts(&self, entry: &Entry) -> bool {
        match self {
            Filter::All => true,
            Filter::Kind(tag) => entry.kind().matches(tag),
            Filter::Keyword(keyword) => entry.contains(keyword),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EntryList {
    entries: Vec<Entry>,
    filter: Filter,
    /// Positions in `entries`, in display order
    shown: Vec<usize>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut list = Self {
            entries,
            ..Self::default()
        };
        list.refresh();
        list
    }

    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.refresh();
    }

    pub fn full_size(&self) -> usize {
        self.entries.len()
    }

    pub fn shown_size(&self) -> usize {
        self.shown.len()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn filter_by_type(&mut self, tag: &str) {
        self.set_filter(Filter::Kind(tag.trim().to_string()));
    }

    pub fn filter_by_keyword(&mut self, keyword: &str) {
        self.set_filter(Filter::Keyword(keyword.to_string()));
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(Filter::All);
    }

    /// Remove the entry at `index` (0-based) of the shown view
    ///
    /// The bound is re-checked here even when the caller validated it, since
    /// the view may have changed since then.
    pub fn delete_by_shown_index(&mut self, index: usize) -> Result<Entry> {
        let position = *self.shown.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            size: self.shown.len(),
        })?;
        let removed = self.entries.remove(position);
        self.refresh();
        Ok(removed)
    }

    /// Backing position of the entry at `index` (0-based) of the shown view
    pub fn backing_position(&self, index: usize) -> Option<usize> {
        self.shown.get(index).copied()
    }

    /// Put a removed entry back at its old backing position
    pub(crate) fn restore(&mut self, position: usize, entry: Entry) {
        let position = position.min(self.entries.len());
        self.entries.insert(position, entry);
        self.refresh();
    }

    /// Take back the most recent `add`
    pub(crate) fn undo_add(&mut self) -> Option<Entry> {
        let entry = self.entries.pop();
        self.refresh();
        entry
    }

    /// All entries in insertion order, ignoring the shown view
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entries of the shown view, in display order
    pub fn shown(&self) -> impl Iterator<Item = &Entry> {
        self.shown.iter().map(move |&position| &self.entries[position])
    }

    /// All-time pumped volume across the live milk entries
    pub fn total_milk_ml(&self) -> u64 {
        self.iter()
            .filter_map(|entry| match entry {
                Entry::Milk(milk) => Some(u64::from(milk.volume_ml)),
                _ => None,
            })
            .sum()
    }

    /// Latest workout goal set during the week containing `now`
    pub fn active_workout_goal(&self, now: &NaiveDateTime) -> Option<&WorkoutGoal> {
        self.iter()
            .filter_map(|entry| match entry {
                Entry::WorkoutGoal(goal) if is_same_week(&goal.timestamp, now) => Some(goal),
                _ => None,
            })
            // max_by_key keeps the last maximum, so later insertions win ties
            .max_by_key(|goal| goal.timestamp)
    }

    /// Latest calorie goal set on the day of `now`
    pub fn active_calorie_goal(&self, now: &NaiveDateTime) -> Option<&CalorieGoal> {
        self.iter()
            .filter_map(|entry| match entry {
                Entry::CalorieGoal(goal) if is_same_day(&goal.timestamp, now) => Some(goal),
                _ => None,
            })
            .max_by_key(|goal| goal.timestamp)
    }

    pub fn workout_minutes_in_week(&self, now: &NaiveDateTime) -> u64 {
        self.iter()
            .filter_map(|entry| match entry {
                Entry::Workout(w) if is_same_week(&w.timestamp, now) => {
                    Some(u64::from(w.duration_mins))
                }
                _ => None,
            })
            .sum()
    }

    /// Calories of meals logged on the day of `now`; undated meals never count
    pub fn calories_on_day(&self, now: &NaiveDateTime) -> u64 {
        self.iter()
            .filter_map(|entry| match entry {
                Entry::Meal(meal) => meal
                    .timestamp
                    .filter(|ts| is_same_day(ts, now))
                    .map(|_| u64::from(meal.calories)),
                _ => None,
            })
            .sum()
    }

    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.refresh();
    }

    fn refresh(&mut self) {
        let filter = &self.filter;
        self.shown = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter.accepts(entry))
            .map(|(position, _)| position)
            .collect();
    }
}
