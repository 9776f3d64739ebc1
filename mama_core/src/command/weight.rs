use super::{parse_positive, CommandResult, Context, Execute};
use crate::entry::strip_unit;
use crate::types::Weight;
use crate::{Entry, Result};

pub const WEIGHT_USAGE: &str = "Usage: weight VALUE\n\
    • VALUE is in kg and must be a positive whole number.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddWeightCommand {
    pub kg: u32,
}

impl AddWeightCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        Ok(Self {
            kg: parse_positive(strip_unit(args, "kg"), "Weight", WEIGHT_USAGE)?,
        })
    }
}

impl Execute for AddWeightCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let entry = Entry::Weight(Weight {
            kg: self.kg,
            timestamp: ctx.now,
        });
        let line = entry.to_list_line();
        ctx.add_and_persist(entry, "weight")?;
        tracing::info!("Added {}", line);

        Ok(CommandResult::new(format!("Added: {}", line)))
    }
}
