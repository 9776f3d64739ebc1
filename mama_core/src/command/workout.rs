use super::{check_text, parse_positive, workout_progress, CommandResult, Context, Execute, Marked};
use crate::types::Workout;
use crate::{Entry, Error, Result};

pub const WORKOUT_USAGE: &str = "Usage: workout TYPE /dur MINUTES /feel RATING\n\
    • MINUTES must be a positive whole number.\n\
    • RATING must be a whole number from 1 to 5.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddWorkoutCommand {
    pub label: String,
    pub duration_mins: u32,
    pub feel: u8,
}

impl AddWorkoutCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        let marked = Marked::split(args, &["/dur", "/feel"], WORKOUT_USAGE)?;
        let label = check_text(marked.head, "Workout type", WORKOUT_USAGE)?;
        let duration_mins = parse_positive(marked.value("/dur"), "Duration", WORKOUT_USAGE)?;
        let feel = parse_positive(marked.value("/feel"), "Feel", WORKOUT_USAGE)?;
        let feel = u8::try_from(feel)
            .ok()
            .filter(|f| (1..=5).contains(f))
            .ok_or_else(|| {
                Error::validation("Feel must be a whole number from 1 to 5.", WORKOUT_USAGE)
            })?;
        Ok(Self {
            label,
            duration_mins,
            feel,
        })
    }
}

impl Execute for AddWorkoutCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let entry = Entry::Workout(Workout {
            label: self.label.clone(),
            duration_mins: self.duration_mins,
            feel: self.feel,
            timestamp: ctx.now,
        });
        let line = entry.to_list_line();
        ctx.add_and_persist(entry, "workout")?;
        tracing::info!("Added {}", line);

        Ok(CommandResult::new(format!(
            "Added: {}\n{}",
            line,
            workout_progress(ctx.list, &ctx.now)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::Fixture;
    use crate::command::WORKOUT_GOAL_REMINDER;

    #[test]
    fn test_parse_spaced_and_compact() {
        let expected = AddWorkoutCommand {
            label: "yoga".into(),
            duration_mins: 45,
            feel: 3,
        };
        assert_eq!(
            AddWorkoutCommand::from_input("yoga /dur 45 /feel 3").unwrap(),
            expected
        );
        assert_eq!(
            AddWorkoutCommand::from_input("yoga /dur45/feel3").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_rejections() {
        for input in [
            "/dur 45 /feel 3",
            "yoga /feel 3",
            "yoga /dur 45",
            "yoga /dur 0 /feel 3",
            "yoga /dur 45 /feel 0",
            "yoga /dur 45 /feel 6",
            "yoga /dur 45 /feel 300",
            "yoga /dur 45 /feel 3 extra",
            "yoga /dur 45 mins /feel 3",
            "yoga /dur 4.5 /feel 3",
            "yoga /dur 45 /feel 3 /feel 4",
        ] {
            assert!(
                AddWorkoutCommand::from_input(input).is_err(),
                "accepted: {}",
                input
            );
        }
    }

    #[test]
    fn test_goal_reminder_then_goal_reached() {
        let mut fx = Fixture::new();

        let first = fx.feedback("workout yoga /dur 30 /feel 5");
        assert_eq!(
            first,
            format!(
                "Added: [WORKOUT] yoga (30 mins, feel 5/5) (29/10/25 12:00)\n{}",
                WORKOUT_GOAL_REMINDER
            )
        );
        assert_eq!(fx.stored_lines(), vec!["WORKOUT|yoga|30|5|29/10/25 12:00"]);

        fx.feedback("workout goal 30");
        let second = fx.feedback("workout yoga /dur 30 /feel 5");
        assert!(second.ends_with("Weekly workout goal reached! (60/30 mins)"));
    }

    #[test]
    fn test_minutes_left() {
        let mut fx = Fixture::new();
        fx.feedback("workout goal 150");
        assert!(fx
            .feedback("workout swim /dur 40 /feel 4")
            .ends_with("110 mins left to reach this week's goal of 150 mins."));
    }
}
