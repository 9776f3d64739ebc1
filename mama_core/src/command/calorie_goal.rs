use super::{calorie_progress, parse_positive, CommandResult, Context, Execute};
use crate::types::CalorieGoal;
use crate::{Entry, Error, Result};

pub const CALORIE_GOAL_USAGE: &str = "Usage: goal [CALORIES]\n\
    • Without CALORIES, shows today's calorie goal.\n\
    • CALORIES must be a positive whole number.";

/// Views or sets today's calorie goal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalorieGoalCommand {
    pub calories: Option<u32>,
}

impl CalorieGoalCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Ok(Self { calories: None }),
            [calories] => Ok(Self {
                calories: Some(parse_positive(calories, "Calories", CALORIE_GOAL_USAGE)?),
            }),
            _ => Err(Error::syntax("Too many arguments.", CALORIE_GOAL_USAGE)),
        }
    }
}

impl Execute for CalorieGoalCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let Some(calories) = self.calories else {
            let feedback = match ctx.list.active_calorie_goal(&ctx.now) {
                Some(goal) => format!(
                    "Your calorie goal for today is {} kcal.\n{}",
                    goal.calories,
                    calorie_progress(ctx.list, &ctx.now)
                ),
                None => super::CALORIE_GOAL_REMINDER.to_string(),
            };
            return Ok(CommandResult::new(feedback));
        };

        let goal = Entry::CalorieGoal(CalorieGoal {
            calories,
            timestamp: ctx.now,
        });
        ctx.add_and_persist(goal, "calorie goal")?;
        tracing::info!("Set calorie goal of {} kcal", calories);

        Ok(CommandResult::new(format!(
            "Calorie goal set: {} kcal for today.",
            calories
        )))
    }
}
