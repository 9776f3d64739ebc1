use super::{parse_whole, CommandResult, Context, Execute};
use crate::entry::strip_unit;
use crate::types::Milk;
use crate::{Entry, Result};

pub const MILK_USAGE: &str = "Usage: milk VOLUME\n\
    • VOLUME is in ml and must be a whole number (0 or more).";

/// Logs a milk-pumping session; zero volume is allowed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddMilkCommand {
    pub volume_ml: u32,
}

impl AddMilkCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        Ok(Self {
            volume_ml: parse_whole(strip_unit(args, "ml"), "Volume", MILK_USAGE)?,
        })
    }
}

impl Execute for AddMilkCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let entry = Entry::Milk(Milk {
            volume_ml: self.volume_ml,
            timestamp: ctx.now,
        });
        let line = entry.to_list_line();
        ctx.add_and_persist(entry, "milk")?;
        tracing::info!("Added {}", line);

        Ok(CommandResult::new(format!(
            "Added: {}\nTotal breast milk pumped: {}ml",
            line,
            ctx.list.total_milk_ml()
        )))
    }
}
