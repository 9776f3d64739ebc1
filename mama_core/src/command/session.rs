use super::calorie_goal::CALORIE_GOAL_USAGE;
use super::dashboard::DASHBOARD_USAGE;
use super::delete::DELETE_USAGE;
use super::find::FIND_USAGE;
use super::list::LIST_USAGE;
use super::meal::MEAL_USAGE;
use super::measure::MEASURE_USAGE;
use super::milk::MILK_USAGE;
use super::note::NOTE_USAGE;
use super::weight::WEIGHT_USAGE;
use super::workout::WORKOUT_USAGE;
use super::workout_goal::WORKOUT_GOAL_USAGE;
use super::{CommandResult, Context, Execute};
use crate::{Error, Result};

pub const HELP_USAGE: &str = "Usage: help";

pub const BYE_USAGE: &str = "Usage: bye\n\
    Saves the journal and exits.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpCommand;

impl HelpCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        no_arguments(args, "help", HELP_USAGE)?;
        Ok(Self)
    }
}

impl Execute for HelpCommand {
    fn execute(&self, _ctx: &mut Context<'_>) -> Result<CommandResult> {
        let usages = [
            LIST_USAGE,
            FIND_USAGE,
            DELETE_USAGE,
            MEAL_USAGE,
            WORKOUT_USAGE,
            WORKOUT_GOAL_USAGE,
            MILK_USAGE,
            WEIGHT_USAGE,
            MEASURE_USAGE,
            CALORIE_GOAL_USAGE,
            NOTE_USAGE,
            DASHBOARD_USAGE,
            BYE_USAGE,
        ];
        // First line of each usage block
        let lines: Vec<&str> = usages
            .iter()
            .filter_map(|usage| usage.lines().next())
            .map(|line| line.trim_start_matches("Usage: "))
            .collect();
        Ok(CommandResult::new(format!(
            "Available commands:\n  {}",
            lines.join("\n  ")
        )))
    }
}

/// Saves once more and tells the caller to stop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByeCommand;

impl ByeCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        no_arguments(args, "bye", BYE_USAGE)?;
        Ok(Self)
    }
}

impl Execute for ByeCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        ctx.persist("bye")?;
        tracing::info!("Exiting with {} entries saved", ctx.list.full_size());
        Ok(CommandResult::exit("Bye. See you again soon!"))
    }
}

fn no_arguments(args: &str, verb: &str, usage: &'static str) -> Result<()> {
    if args.trim().is_empty() {
        Ok(())
    } else {
        Err(Error::syntax(format!("{} takes no arguments.", verb), usage))
    }
}
