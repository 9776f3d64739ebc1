//! Text commands: parsing and execution.
//!
//! Parsing (`Command::parse`) only checks syntax and never looks at the
//! journal. Execution checks everything that depends on the current journal
//! state, applies the change and persists it.

mod calorie_goal;
mod dashboard;
mod delete;
mod find;
mod list;
mod meal;
mod measure;
mod milk;
mod note;
mod session;
mod weight;
mod workout;
mod workout_goal;

pub use calorie_goal::CalorieGoalCommand;
pub use dashboard::DashboardCommand;
pub use delete::DeleteCommand;
pub use find::FindCommand;
pub use list::ListCommand;
pub use meal::AddMealCommand;
pub use measure::AddMeasurementCommand;
pub use milk::AddMilkCommand;
pub use note::AddNoteCommand;
pub use session::{ByeCommand, HelpCommand};
pub use weight::AddWeightCommand;
pub use workout::AddWorkoutCommand;
pub use workout_goal::WorkoutGoalCommand;

use crate::{Entry, EntryList, Error, Result, Storage};
use chrono::NaiveDateTime;

pub const HELP_HINT: &str = "Type 'help' to see all commands.";

pub const WORKOUT_GOAL_REMINDER: &str =
    "No workout goal set for this week. Set one with: workout goal MINUTES";

pub const CALORIE_GOAL_REMINDER: &str =
    "No calorie goal set for today. Set one with: goal CALORIES";

/// Everything a command may read or change
pub struct Context<'a> {
    pub list: &'a mut EntryList,
    pub storage: &'a Storage,
    /// Wall-clock time the command runs at
    pub now: NaiveDateTime,
}

impl Context<'_> {
    /// Save the full journal, logging the cause on failure
    pub(crate) fn persist(&self, action: &str) -> Result<()> {
        self.storage.save(&*self.list).map_err(|e| {
            tracing::error!("Failed to persist after {}: {:?}", action, e);
            e
        })
    }

    /// Append `entry` and save, taking the entry back out if the save fails
    pub(crate) fn add_and_persist(&mut self, entry: Entry, action: &str) -> Result<()> {
        self.list.add(entry);
        if let Err(e) = self.persist(action) {
            self.list.undo_add();
            return Err(e);
        }
        Ok(())
    }
}

/// Outcome of a successful command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    /// Set by `bye`; the caller should stop reading commands
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: false,
        }
    }

    pub fn exit(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: true,
        }
    }
}

/// Execution half of a command
pub trait Execute {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult>;
}

/// A syntactically valid command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    List(ListCommand),
    Find(FindCommand),
    Delete(DeleteCommand),
    Meal(AddMealCommand),
    Workout(AddWorkoutCommand),
    WorkoutGoal(WorkoutGoalCommand),
    Milk(AddMilkCommand),
    Weight(AddWeightCommand),
    Measure(AddMeasurementCommand),
    CalorieGoal(CalorieGoalCommand),
    Note(AddNoteCommand),
    Dashboard(DashboardCommand),
    Help(HelpCommand),
    Bye(ByeCommand),
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Error::Syntax` or `Error::Validation` carrying the usage text
    /// of the offending command.
    pub fn parse(input: &str) -> Result<Command> {
        let input = input.trim();
        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "" => return Err(Error::syntax("Please enter a command.", HELP_HINT)),
            "list" => Command::List(ListCommand::from_input(rest)?),
            "find" => Command::Find(FindCommand::from_input(rest)?),
            "delete" => Command::Delete(DeleteCommand::from_input(rest)?),
            "meal" => Command::Meal(AddMealCommand::from_input(rest)?),
            "workout" => match rest.split_once(char::is_whitespace) {
                Some((first, args)) if first.eq_ignore_ascii_case("goal") => {
                    Command::WorkoutGoal(WorkoutGoalCommand::from_input(args.trim())?)
                }
                None if rest.eq_ignore_ascii_case("goal") => {
                    Command::WorkoutGoal(WorkoutGoalCommand::from_input("")?)
                }
                _ => Command::Workout(AddWorkoutCommand::from_input(rest)?),
            },
            "milk" => Command::Milk(AddMilkCommand::from_input(rest)?),
            "weight" => Command::Weight(AddWeightCommand::from_input(rest)?),
            "measure" => Command::Measure(AddMeasurementCommand::from_input(rest)?),
            "goal" => Command::CalorieGoal(CalorieGoalCommand::from_input(rest)?),
            "note" => Command::Note(AddNoteCommand::from_input(rest)?),
            "dashboard" => Command::Dashboard(DashboardCommand::from_input(rest)?),
            "help" => Command::Help(HelpCommand::from_input(rest)?),
            "bye" => Command::Bye(ByeCommand::from_input(rest)?),
            _ => {
                return Err(Error::syntax(
                    format!("Unknown command: {}", verb),
                    HELP_HINT,
                ))
            }
        };
        tracing::debug!("Parsed {:?}", command);
        Ok(command)
    }

    pub fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        match self {
            Command::List(c) => c.execute(ctx),
            Command::Find(c) => c.execute(ctx),
            Command::Delete(c) => c.execute(ctx),
            Command::Meal(c) => c.execute(ctx),
            Command::Workout(c) => c.execute(ctx),
            Command::WorkoutGoal(c) => c.execute(ctx),
            Command::Milk(c) => c.execute(ctx),
            Command::Weight(c) => c.execute(ctx),
            Command::Measure(c) => c.execute(ctx),
            Command::CalorieGoal(c) => c.execute(ctx),
            Command::Note(c) => c.execute(ctx),
            Command::Dashboard(c) => c.execute(ctx),
            Command::Help(c) => c.execute(ctx),
            Command::Bye(c) => c.execute(ctx),
        }
    }
}

// ============================================================================
// Argument helpers shared by the command parsers
// ============================================================================

/// Strictly positive whole number; no sign, no decimals
pub(crate) fn parse_positive(token: &str, what: &str, usage: &'static str) -> Result<u32> {
    let value = parse_whole(token, what, usage)?;
    if value == 0 {
        return Err(Error::validation(
            format!("{} must be greater than 0.", what),
            usage,
        ));
    }
    Ok(value)
}

/// Whole number that may be zero
pub(crate) fn parse_whole(token: &str, what: &str, usage: &'static str) -> Result<u32> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::syntax(format!("Missing {}.", what.to_lowercase()), usage));
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::syntax(
            format!("{} must be a whole number.", what),
            usage,
        ));
    }
    token
        .parse()
        .map_err(|_| Error::validation(format!("{} is too large.", what), usage))
}

/// Free text destined for a storage field
pub(crate) fn check_text(text: &str, what: &str, usage: &'static str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::syntax(format!("Missing {}.", what.to_lowercase()), usage));
    }
    if text.contains(crate::entry::FIELD_SEPARATOR) {
        return Err(Error::validation(
            format!("{} must not contain '|'.", what),
            usage,
        ));
    }
    Ok(text.to_string())
}

/// Text split around `/marker` arguments such as `/dur` and `/feel`
pub(crate) struct Marked<'a> {
    pub head: &'a str,
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> Marked<'a> {
    /// Split `text` on `markers`, each of which must appear exactly once
    ///
    /// Markers may be spaced (`/dur 45`) or compact (`/dur45/feel3`) and
    /// may come in any order. A marker only counts at the start of a word
    /// or straight after another marker's value, so `pizza/calzone` is
    /// plain text. The head is the text before the first marker.
    pub fn split(text: &'a str, markers: &[&'static str], usage: &'static str) -> Result<Self> {
        let mut candidates: Vec<(usize, &'static str)> = markers
            .iter()
            .flat_map(|&marker| text.match_indices(marker).map(move |(i, _)| (i, marker)))
            .collect();
        candidates.sort_unstable();

        let mut found: Vec<(usize, &'static str)> = Vec::new();
        for (position, marker) in candidates {
            if starts_marker(text, position, found.last().copied()) {
                found.push((position, marker));
            }
        }

        for &marker in markers {
            match found.iter().filter(|&&(_, m)| m == marker).count() {
                0 => return Err(Error::syntax(format!("Missing {}.", marker), usage)),
                1 => {}
                _ => {
                    return Err(Error::syntax(
                        format!("{} must appear only once.", marker),
                        usage,
                    ))
                }
            }
        }

        let head = found
            .first()
            .map(|&(position, _)| text[..position].trim())
            .unwrap_or_else(|| text.trim());

        let mut values = Vec::with_capacity(found.len());
        for (i, &(position, marker)) in found.iter().enumerate() {
            let end = found.get(i + 1).map(|&(next, _)| next).unwrap_or(text.len());
            let value = text[position + marker.len()..end].trim();
            if value.is_empty() {
                return Err(Error::syntax(format!("Missing value for {}.", marker), usage));
            }
            if value.contains(char::is_whitespace) {
                return Err(Error::syntax(
                    format!("Unexpected extra input after {}: '{}'.", marker, value),
                    usage,
                ));
            }
            values.push((marker, value));
        }
        Ok(Self { head, values })
    }

    pub fn value(&self, marker: &str) -> &'a str {
        self.values
            .iter()
            .find(|(m, _)| *m == marker)
            .map(|&(_, value)| value)
            .unwrap_or("")
    }
}

/// True when the match at `position` begins a word, or directly follows the
/// value of the previous marker as in `/dur45/feel3`
fn starts_marker(text: &str, position: usize, previous: Option<(usize, &str)>) -> bool {
    let at_word_start = text[..position]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    if at_word_start {
        return true;
    }
    match previous {
        Some((start, marker)) if position >= start + marker.len() => {
            let value = text[start + marker.len()..position].trim_start();
            !value.is_empty() && !value.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// Numbered rendering of the shown view
pub(crate) fn render_shown(list: &EntryList, header: &str, empty: &str) -> String {
    if list.shown_size() == 0 {
        return empty.to_string();
    }
    let mut out = String::from(header);
    for (i, entry) in list.shown().enumerate() {
        out.push('\n');
        out.push_str(&format!("{}. {}", i + 1, entry.to_list_line()));
    }
    out
}

/// This week's workout total measured against the active goal
pub(crate) fn workout_progress(list: &EntryList, now: &NaiveDateTime) -> String {
    let total = list.workout_minutes_in_week(now);
    match list.active_workout_goal(now) {
        None => WORKOUT_GOAL_REMINDER.to_string(),
        Some(goal) if total >= u64::from(goal.minutes) => format!(
            "Weekly workout goal reached! ({}/{} mins)",
            total, goal.minutes
        ),
        Some(goal) => format!(
            "{} mins left to reach this week's goal of {} mins.",
            u64::from(goal.minutes) - total,
            goal.minutes
        ),
    }
}

/// Today's calories measured against the active goal
pub(crate) fn calorie_progress(list: &EntryList, now: &NaiveDateTime) -> String {
    let total = list.calories_on_day(now);
    match list.active_calorie_goal(now) {
        None => CALORIE_GOAL_REMINDER.to_string(),
        Some(goal) if total > u64::from(goal.calories) => format!(
            "You are {} kcal over today's goal of {} kcal.",
            total - u64::from(goal.calories),
            goal.calories
        ),
        Some(goal) => format!(
            "{} kcal left of today's goal of {} kcal.",
            u64::from(goal.calories) - total,
            goal.calories
        ),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Fixture;
    use super::*;

    #[test]
    fn test_unknown_and_empty_input() {
        let err = Command::parse("dance now").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown command: dance\nType 'help' to see all commands."
        );
        assert!(matches!(Command::parse("   "), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_verbs_are_case_insensitive() {
        assert!(matches!(Command::parse("LIST"), Ok(Command::List(_))));
        assert!(matches!(Command::parse("Milk 20"), Ok(Command::Milk(_))));
    }

    #[test]
    fn test_workout_goal_is_routed_separately() {
        assert!(matches!(
            Command::parse("workout goal"),
            Ok(Command::WorkoutGoal(WorkoutGoalCommand { minutes: None }))
        ));
        assert!(matches!(
            Command::parse("workout goal 150"),
            Ok(Command::WorkoutGoal(WorkoutGoalCommand { minutes: Some(150) }))
        ));
        assert!(matches!(
            Command::parse("workout run /dur 20 /feel 3"),
            Ok(Command::Workout(_))
        ));
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("45", "Duration", "u").unwrap(), 45);
        assert!(matches!(
            parse_positive("0", "Duration", "u"),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            parse_positive("-5", "Duration", "u"),
            Err(Error::Syntax { .. })
        ));
        assert!(matches!(
            parse_positive("4.5", "Duration", "u"),
            Err(Error::Syntax { .. })
        ));
        assert!(matches!(
            parse_positive("99999999999", "Duration", "u"),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_marked_spaced_and_compact() {
        let spaced = Marked::split("yoga flow /dur 45 /feel 3", &["/dur", "/feel"], "u").unwrap();
        assert_eq!(spaced.head, "yoga flow");
        assert_eq!(spaced.value("/dur"), "45");
        assert_eq!(spaced.value("/feel"), "3");

        let compact = Marked::split("run /dur45/feel3", &["/dur", "/feel"], "u").unwrap();
        assert_eq!(compact.head, "run");
        assert_eq!(compact.value("/dur"), "45");
        assert_eq!(compact.value("/feel"), "3");

        let reversed = Marked::split("swim /feel 4 /dur 20", &["/dur", "/feel"], "u").unwrap();
        assert_eq!(reversed.value("/dur"), "20");
        assert_eq!(reversed.value("/feel"), "4");
    }

    #[test]
    fn test_marked_ignores_markers_inside_words() {
        let marked = Marked::split("pizza/calzone /cal 800", &["/cal"], "u").unwrap();
        assert_eq!(marked.head, "pizza/calzone");
        assert_eq!(marked.value("/cal"), "800");

        let marked = Marked::split("run/durable /dur 20 /feel 4", &["/dur", "/feel"], "u").unwrap();
        assert_eq!(marked.head, "run/durable");
        assert_eq!(marked.value("/dur"), "20");

        let mixed = Marked::split("row /dur 45/feel 3", &["/dur", "/feel"], "u").unwrap();
        assert_eq!(mixed.value("/dur"), "45");
        assert_eq!(mixed.value("/feel"), "3");

        // Only inside a word, so the marker is missing
        assert!(Marked::split("pizza/cal800", &["/cal"], "u").is_err());
    }

    #[test]
    fn test_meal_name_may_contain_a_slash() {
        let mut fx = Fixture::new();
        assert!(fx
            .feedback("meal pizza/calzone /cal 800")
            .starts_with("Added: [MEAL] pizza/calzone (800 kcal)"));
        assert_eq!(fx.stored_lines(), vec!["MEAL|pizza/calzone|800|29/10/25 12:00"]);
    }

    #[test]
    fn test_marked_rejects_missing_duplicate_and_trailing() {
        let markers = ["/dur", "/feel"];
        assert!(Marked::split("run /dur 20", &markers, "u").is_err());
        assert!(Marked::split("run /dur 20 /dur 30 /feel 3", &markers, "u").is_err());
        assert!(Marked::split("run /dur 20 mins /feel 3", &markers, "u").is_err());
        assert!(Marked::split("run /dur /feel 3", &markers, "u").is_err());
    }

    #[test]
    fn test_rejected_commands_do_not_touch_the_journal() {
        let mut fx = Fixture::new();
        fx.feedback("milk 100");
        for input in ["delete 0", "delete -1", "delete abc", "delete", "milk -3"] {
            assert!(fx.run(input).is_err(), "accepted: {}", input);
        }
        assert_eq!(fx.list.full_size(), 1);
        assert_eq!(fx.stored_lines().len(), 1);
    }

    #[test]
    fn test_help_lists_every_command() {
        let mut fx = Fixture::new();
        let help = fx.feedback("help");
        for verb in [
            "list", "find", "delete", "meal", "workout", "milk", "weight", "measure", "goal",
            "note", "dashboard", "bye",
        ] {
            assert!(help.contains(verb), "help is missing {}", verb);
        }
    }
}
