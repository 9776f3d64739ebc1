//! The `Entry` sum type and its line-oriented storage codec.
//!
//! Storage lines are pipe-delimited, led by the entry's type tag:
//!
//! ```text
//! MILK|150ml|28/10/25 01:14
//! WORKOUT|yoga|30|5|28/10/25 07:00
//! ```
//!
//! Fields are not escaped, so free text must never contain `|`.

use crate::datetime::{format_timestamp, parse_timestamp};
use crate::types::*;
use crate::{Error, Result};
use chrono::NaiveDateTime;

pub const FIELD_SEPARATOR: char = '|';

/// One persisted journal record
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Meal(Meal),
    Workout(Workout),
    WorkoutGoal(WorkoutGoal),
    CalorieGoal(CalorieGoal),
    Milk(Milk),
    Weight(Weight),
    Measurement(Measurement),
    Note(Note),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Meal(_) => EntryKind::Meal,
            Entry::Workout(_) => EntryKind::Workout,
            Entry::WorkoutGoal(_) => EntryKind::WorkoutGoal,
            Entry::CalorieGoal(_) => EntryKind::CalorieGoal,
            Entry::Milk(_) => EntryKind::Milk,
            Entry::Weight(_) => EntryKind::Weight,
            Entry::Measurement(_) => EntryKind::Measurement,
            Entry::Note(_) => EntryKind::Note,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Entry::Meal(meal) => meal.description(),
            Entry::Workout(workout) => workout.description(),
            Entry::WorkoutGoal(goal) => goal.description(),
            Entry::CalorieGoal(goal) => goal.description(),
            Entry::Milk(milk) => milk.description(),
            Entry::Weight(weight) => weight.description(),
            Entry::Measurement(m) => m.description(),
            Entry::Note(note) => note.text.clone(),
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Entry::Meal(meal) => meal.timestamp,
            Entry::Workout(workout) => Some(workout.timestamp),
            Entry::WorkoutGoal(goal) => Some(goal.timestamp),
            Entry::CalorieGoal(goal) => Some(goal.timestamp),
            Entry::Milk(milk) => Some(milk.timestamp),
            Entry::Weight(weight) => Some(weight.timestamp),
            Entry::Measurement(m) => Some(m.timestamp),
            Entry::Note(note) => Some(note.timestamp),
        }
    }

    /// One-line display form, e.g. `[MILK] 150ml (28/10/25 01:14)`
    pub fn to_list_line(&self) -> String {
        let base = format!("[{}] {}", self.kind(), self.description());
        match self {
            // Meals keep the plain form even when they carry a timestamp
            Entry::Meal(_) => base,
            _ => match self.timestamp() {
                Some(ts) => format!("{} ({})", base, format_timestamp(&ts)),
                None => base,
            },
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.description().contains(keyword)
    }

    pub fn to_storage_string(&self) -> String {
        let mut fields = vec![self.kind().tag().to_string()];
        match self {
            Entry::Meal(meal) => {
                fields.push(meal.name.clone());
                fields.push(meal.calories.to_string());
            }
            Entry::Workout(workout) => {
                fields.push(workout.label.clone());
                fields.push(workout.duration_mins.to_string());
                fields.push(workout.feel.to_string());
            }
            Entry::WorkoutGoal(goal) => fields.push(goal.minutes.to_string()),
            Entry::CalorieGoal(goal) => fields.push(goal.calories.to_string()),
            Entry::Milk(milk) => fields.push(milk.description()),
            Entry::Weight(weight) => fields.push(weight.kg.to_string()),
            Entry::Measurement(m) => {
                for (_, value) in m.fields() {
                    fields.push(value.map(|v| v.to_string()).unwrap_or_default());
                }
            }
            Entry::Note(note) => fields.push(note.text.clone()),
        }
        if let Some(ts) = self.timestamp() {
            fields.push(format_timestamp(&ts));
        }
        fields.join("|")
    }

    /// Decode one storage line, dispatching on its leading type tag
    pub fn from_storage_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let kind: EntryKind = fields[0].trim().parse()?;
        let line = Line { kind, raw: line };

        let entry = match kind {
            EntryKind::Meal => {
                line.expect_len(&fields, &[3, 4])?;
                Entry::Meal(Meal {
                    name: line.text(fields[1])?,
                    calories: line.number(fields[2])?,
                    timestamp: match fields.get(3) {
                        Some(ts) => Some(parse_timestamp(ts)?),
                        None => None,
                    },
                })
            }
            EntryKind::Workout => {
                line.expect_len(&fields, &[5])?;
                let feel: u8 = line.number(fields[3])?;
                if !(1..=5).contains(&feel) {
                    return Err(line.invalid());
                }
                Entry::Workout(Workout {
                    label: line.text(fields[1])?,
                    duration_mins: line.number(fields[2])?,
                    feel,
                    timestamp: parse_timestamp(fields[4])?,
                })
            }
            EntryKind::WorkoutGoal => {
                line.expect_len(&fields, &[3])?;
                Entry::WorkoutGoal(WorkoutGoal {
                    minutes: line.number(fields[1])?,
                    timestamp: parse_timestamp(fields[2])?,
                })
            }
            EntryKind::CalorieGoal => {
                line.expect_len(&fields, &[3])?;
                Entry::CalorieGoal(CalorieGoal {
                    calories: line.number(fields[1])?,
                    timestamp: parse_timestamp(fields[2])?,
                })
            }
            EntryKind::Milk => {
                line.expect_len(&fields, &[3])?;
                Entry::Milk(Milk {
                    volume_ml: line.number(strip_unit(fields[1], "ml"))?,
                    timestamp: parse_timestamp(fields[2])?,
                })
            }
            EntryKind::Weight => {
                line.expect_len(&fields, &[3])?;
                Entry::Weight(Weight {
                    kg: line.number(fields[1])?,
                    timestamp: parse_timestamp(fields[2])?,
                })
            }
            EntryKind::Measurement => {
                line.expect_len(&fields, &[7])?;
                Entry::Measurement(Measurement {
                    waist: line.number(fields[1])?,
                    hips: line.number(fields[2])?,
                    chest: line.optional_number(fields[3])?,
                    thigh: line.optional_number(fields[4])?,
                    arm: line.optional_number(fields[5])?,
                    timestamp: parse_timestamp(fields[6])?,
                })
            }
            EntryKind::Note => {
                line.expect_len(&fields, &[3])?;
                Entry::Note(Note {
                    text: line.text(fields[1])?,
                    timestamp: parse_timestamp(fields[2])?,
                })
            }
        };
        Ok(entry)
    }
}

/// Strip a trailing unit such as `ml`, ignoring case
pub(crate) fn strip_unit<'a>(s: &'a str, unit: &str) -> &'a str {
    let s = s.trim();
    match s.len().checked_sub(unit.len()) {
        Some(split) if s.is_char_boundary(split) && s[split..].eq_ignore_ascii_case(unit) => {
            s[..split].trim_end()
        }
        _ => s,
    }
}

/// Field decoding helpers bound to the line being parsed
struct Line<'a> {
    kind: EntryKind,
    raw: &'a str,
}

impl Line<'_> {
    fn invalid(&self) -> Error {
        Error::Format(format!("Invalid {} entry line: {}", self.kind, self.raw))
    }

    fn expect_len(&self, fields: &[&str], allowed: &[usize]) -> Result<()> {
        if allowed.contains(&fields.len()) {
            Ok(())
        } else {
            Err(self.invalid())
        }
    }

    fn text(&self, field: &str) -> Result<String> {
        let field = field.trim();
        if field.is_empty() {
            return Err(self.invalid());
        }
        Ok(field.to_string())
    }

    fn number<T: std::str::FromStr>(&self, field: &str) -> Result<T> {
        let field = field.trim();
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.invalid());
        }
        field.parse().map_err(|_| self.invalid())
    }

    fn optional_number(&self, field: &str) -> Result<Option<u32>> {
        if field.trim().is_empty() {
            Ok(None)
        } else {
            self.number(field).map(Some)
        }
    }
}
