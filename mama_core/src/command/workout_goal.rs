use super::{parse_positive, workout_progress, CommandResult, Context, Execute};
use crate::types::WorkoutGoal;
use crate::{Entry, Error, Result};

pub const WORKOUT_GOAL_USAGE: &str = "Usage: workout goal [MINUTES]\n\
    • Without MINUTES, shows this week's goal.\n\
    • MINUTES must be a positive whole number.";

/// Views or sets the weekly workout goal
///
/// A new goal supersedes earlier goals of the same week without deleting them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutGoalCommand {
    pub minutes: Option<u32>,
}

impl WorkoutGoalCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Ok(Self { minutes: None }),
            [minutes] => Ok(Self {
                minutes: Some(parse_positive(minutes, "Minutes", WORKOUT_GOAL_USAGE)?),
            }),
            _ => Err(Error::syntax("Too many arguments.", WORKOUT_GOAL_USAGE)),
        }
    }
}

impl Execute for WorkoutGoalCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let Some(minutes) = self.minutes else {
            let feedback = match ctx.list.active_workout_goal(&ctx.now) {
                Some(goal) => format!(
                    "Your workout goal for this week is {} mins.\n{}",
                    goal.minutes,
                    workout_progress(ctx.list, &ctx.now)
                ),
                None => super::WORKOUT_GOAL_REMINDER.to_string(),
            };
            return Ok(CommandResult::new(feedback));
        };

        let goal = Entry::WorkoutGoal(WorkoutGoal {
            minutes,
            timestamp: ctx.now,
        });
        ctx.add_and_persist(goal, "workout goal")?;
        tracing::info!("Set workout goal of {} mins", minutes);

        Ok(CommandResult::new(format!(
            "Workout goal set: {} mins for this week.",
            minutes
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::Fixture;
    use chrono::Duration;

    #[test]
    fn test_parse() {
        assert_eq!(WorkoutGoalCommand::from_input("").unwrap().minutes, None);
        assert_eq!(
            WorkoutGoalCommand::from_input("150").unwrap().minutes,
            Some(150)
        );
        assert!(WorkoutGoalCommand::from_input("0").is_err());
        assert!(WorkoutGoalCommand::from_input("abc").is_err());
        assert!(WorkoutGoalCommand::from_input("150 200").is_err());
    }

    #[test]
    fn test_view_without_goal() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.feedback("workout goal"),
            crate::command::WORKOUT_GOAL_REMINDER
        );
    }

    #[test]
    fn test_later_goal_supersedes_earlier_in_same_week() {
        let mut fx = Fixture::new();
        fx.feedback("workout goal 150");
        fx.now += Duration::hours(1);
        fx.feedback("workout goal 200");

        assert!(fx
            .feedback("workout goal")
            .starts_with("Your workout goal for this week is 200 mins."));

        fx.feedback("list /t workout_goal");
        assert_eq!(fx.list.shown_size(), 2);
    }

    #[test]
    fn test_goal_expires_with_the_week() {
        let mut fx = Fixture::new();
        fx.feedback("workout goal 150");
        // Following Monday 00:00
        fx.now += Duration::days(5) - Duration::hours(12);
        assert_eq!(
            fx.feedback("workout goal"),
            crate::command::WORKOUT_GOAL_REMINDER
        );
    }
}
