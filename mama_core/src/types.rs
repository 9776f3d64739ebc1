//! Core domain types for the mama journal.
//!
//! One struct per record kind. Each struct owns its payload and knows how
//! to describe itself; the storage codec lives in `entry.rs`.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Entry kinds
// ============================================================================

/// Fixed type tag of an entry, as written at the start of a storage line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Meal,
    Workout,
    WorkoutGoal,
    CalorieGoal,
    Milk,
    Weight,
    Measurement,
    Note,
}

impl EntryKind {
    pub const ALL: [EntryKind; 8] = [
        EntryKind::Meal,
        EntryKind::Workout,
        EntryKind::WorkoutGoal,
        EntryKind::CalorieGoal,
        EntryKind::Milk,
        EntryKind::Weight,
        EntryKind::Measurement,
        EntryKind::Note,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::Meal => "MEAL",
            EntryKind::Workout => "WORKOUT",
            EntryKind::WorkoutGoal => "WORKOUT_GOAL",
            EntryKind::CalorieGoal => "CALORIE_GOAL",
            EntryKind::Milk => "MILK",
            EntryKind::Weight => "WEIGHT",
            EntryKind::Measurement => "MEASURE",
            EntryKind::Note => "NOTE",
        }
    }

    /// Case-insensitive tag comparison used by `list /t TYPE`
    pub fn matches(self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag.trim())
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntryKind {
    type Err = crate::Error;

    /// Exact (case-sensitive) tag lookup, as stored on disk
    fn from_str(s: &str) -> crate::Result<Self> {
        EntryKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| crate::Error::Format(format!("Unknown type: {}", s)))
    }
}

// ============================================================================
// Record payloads
// ============================================================================

/// A meal and its energy content
///
/// Meals loaded from older files may have no timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meal {
    pub name: String,
    pub calories: u32,
    pub timestamp: Option<NaiveDateTime>,
}

impl Meal {
    pub fn description(&self) -> String {
        format!("{} ({} kcal)", self.name, self.calories)
    }
}

/// A workout session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workout {
    pub label: String,
    pub duration_mins: u32,
    /// Perceived effort, 1 (worst) to 5 (best)
    pub feel: u8,
    pub timestamp: NaiveDateTime,
}

impl Workout {
    pub fn description(&self) -> String {
        format!(
            "{} ({} mins, feel {}/5)",
            self.label, self.duration_mins, self.feel
        )
    }
}

/// Weekly workout target in minutes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutGoal {
    pub minutes: u32,
    pub timestamp: NaiveDateTime,
}

impl WorkoutGoal {
    pub fn description(&self) -> String {
        format!("{} mins/week", self.minutes)
    }
}

/// Daily calorie target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalorieGoal {
    pub calories: u32,
    pub timestamp: NaiveDateTime,
}

impl CalorieGoal {
    pub fn description(&self) -> String {
        format!("{} kcal/day", self.calories)
    }
}

/// A milk-pumping session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Milk {
    pub volume_ml: u32,
    pub timestamp: NaiveDateTime,
}

impl Milk {
    pub fn description(&self) -> String {
        format!("{}ml", self.volume_ml)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weight {
    pub kg: u32,
    pub timestamp: NaiveDateTime,
}

impl Weight {
    pub fn description(&self) -> String {
        format!("{}kg", self.kg)
    }
}

/// Body measurements in centimetres
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measurement {
    pub waist: u32,
    pub hips: u32,
    pub chest: Option<u32>,
    pub thigh: Option<u32>,
    pub arm: Option<u32>,
    pub timestamp: NaiveDateTime,
}

impl Measurement {
    /// Named fields in storage order; absent optionals are `None`
    pub fn fields(&self) -> [(&'static str, Option<u32>); 5] {
        [
            ("waist", Some(self.waist)),
            ("hips", Some(self.hips)),
            ("chest", self.chest),
            ("thigh", self.thigh),
            ("arm", self.arm),
        ]
    }

    pub fn description(&self) -> String {
        self.fields()
            .iter()
            .filter_map(|(name, value)| value.map(|v| format!("{} {}cm", name, v)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub text: String,
    pub timestamp: NaiveDateTime,
}
