use super::{CommandResult, Context, Execute, CALORIE_GOAL_REMINDER, WORKOUT_GOAL_REMINDER};
use crate::datetime::format_timestamp;
use crate::{Error, Result};

pub const DASHBOARD_USAGE: &str = "Usage: dashboard\n\
    Shows today's calories and this week's workout minutes against your goals.";

/// Read-only summary of today's meals and this week's workouts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardCommand;

impl DashboardCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        if !args.trim().is_empty() {
            return Err(Error::syntax("dashboard takes no arguments.", DASHBOARD_USAGE));
        }
        Ok(Self)
    }
}

impl Execute for DashboardCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let list = &*ctx.list;
        let now = &ctx.now;
        let mut lines = vec![format!("Dashboard ({})", format_timestamp(now))];

        let calories = list.calories_on_day(now);
        match list.active_calorie_goal(now) {
            Some(goal) => lines.push(format!(
                "Calories today: {} / {} kcal",
                calories, goal.calories
            )),
            None => {
                lines.push(format!("Calories today: {} kcal", calories));
                lines.push(format!("Reminder: {}", CALORIE_GOAL_REMINDER));
            }
        }

        let minutes = list.workout_minutes_in_week(now);
        match list.active_workout_goal(now) {
            Some(goal) => lines.push(format!(
                "Workouts this week: {} / {} mins",
                minutes, goal.minutes
            )),
            None => {
                lines.push(format!("Workouts this week: {} mins", minutes));
                lines.push(format!("Reminder: {}", WORKOUT_GOAL_REMINDER));
            }
        }

        Ok(CommandResult::new(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::Fixture;
    use chrono::Duration;

    #[test]
    fn test_dashboard_without_goals_reminds() {
        let mut fx = Fixture::new();
        fx.feedback("meal toast /cal 120");
        assert_eq!(
            fx.feedback("dashboard"),
            format!(
                "Dashboard (29/10/25 12:00)\n\
                 Calories today: 120 kcal\n\
                 Reminder: {}\n\
                 Workouts this week: 0 mins\n\
                 Reminder: {}",
                CALORIE_GOAL_REMINDER, WORKOUT_GOAL_REMINDER
            )
        );
    }

    #[test]
    fn test_dashboard_with_goals() {
        let mut fx = Fixture::new();
        fx.feedback("goal 1800");
        fx.feedback("workout goal 150");
        fx.feedback("meal pasta /cal 700");
        fx.feedback("workout run /dur 40 /feel 4");

        // Yesterday's meal and workout: only the workout counts
        fx.now -= Duration::days(1);
        fx.feedback("meal cake /cal 400");
        fx.feedback("workout swim /dur 20 /feel 3");
        fx.now += Duration::days(1);

        let dashboard = fx.feedback("dashboard");
        assert!(dashboard.contains("Calories today: 700 / 1800 kcal"));
        assert!(dashboard.contains("Workouts this week: 60 / 150 mins"));
        assert!(!dashboard.contains("Reminder"));
    }

    #[test]
    fn test_dashboard_does_not_persist() {
        let mut fx = Fixture::new();
        fx.feedback("dashboard");
        assert!(!fx.storage.path().exists());
        assert!(DashboardCommand::from_input("now").is_err());
    }
}
