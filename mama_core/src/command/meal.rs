use super::{calorie_progress, check_text, parse_positive, CommandResult, Context, Execute, Marked};
use crate::types::Meal;
use crate::{Entry, Result};

pub const MEAL_USAGE: &str = "Usage: meal NAME /cal CALORIES\n\
    • CALORIES must be a positive whole number.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddMealCommand {
    pub name: String,
    pub calories: u32,
}

impl AddMealCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        let marked = Marked::split(args, &["/cal"], MEAL_USAGE)?;
        Ok(Self {
            name: check_text(marked.head, "Meal name", MEAL_USAGE)?,
            calories: parse_positive(marked.value("/cal"), "Calories", MEAL_USAGE)?,
        })
    }
}

impl Execute for AddMealCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let entry = Entry::Meal(Meal {
            name: self.name.clone(),
            calories: self.calories,
            timestamp: Some(ctx.now),
        });
        let line = entry.to_list_line();
        ctx.add_and_persist(entry, "meal")?;
        tracing::info!("Added {}", line);

        Ok(CommandResult::new(format!(
            "Added: {}\n{}",
            line,
            calorie_progress(ctx.list, &ctx.now)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::Fixture;
    use crate::command::CALORIE_GOAL_REMINDER;

    #[test]
    fn test_parse() {
        let meal = AddMealCommand::from_input("chicken rice /cal 550").unwrap();
        assert_eq!(meal.name, "chicken rice");
        assert_eq!(meal.calories, 550);

        assert!(AddMealCommand::from_input("/cal 550").is_err());
        assert!(AddMealCommand::from_input("toast").is_err());
        assert!(AddMealCommand::from_input("toast /cal 0").is_err());
        assert!(AddMealCommand::from_input("toast /cal ten").is_err());
        assert!(AddMealCommand::from_input("toast /cal 100 /cal 200").is_err());
        assert!(AddMealCommand::from_input("to|ast /cal 100").is_err());
    }

    #[test]
    fn test_meal_without_goal_reminds() {
        let mut fx = Fixture::new();
        let feedback = fx.feedback("meal toast /cal 120");
        assert_eq!(
            feedback,
            format!("Added: [MEAL] toast (120 kcal)\n{}", CALORIE_GOAL_REMINDER)
        );
        assert_eq!(fx.stored_lines(), vec!["MEAL|toast|120|29/10/25 12:00"]);
    }

    #[test]
    fn test_meal_against_goal() {
        let mut fx = Fixture::new();
        fx.feedback("goal 1000");
        assert!(fx
            .feedback("meal pasta /cal 700")
            .ends_with("300 kcal left of today's goal of 1000 kcal."));
        assert!(fx
            .feedback("meal cake /cal 450")
            .ends_with("You are 150 kcal over today's goal of 1000 kcal."));
    }
}
