use super::{check_text, CommandResult, Context, Execute};
use crate::types::Note;
use crate::{Entry, Result};

pub const NOTE_USAGE: &str = "Usage: note TEXT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddNoteCommand {
    pub text: String,
}

impl AddNoteCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        Ok(Self {
            text: check_text(args, "Note text", NOTE_USAGE)?,
        })
    }
}

impl Execute for AddNoteCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let entry = Entry::Note(Note {
            text: self.text.clone(),
            timestamp: ctx.now,
        });
        let line = entry.to_list_line();
        ctx.add_and_persist(entry, "note")?;
        tracing::info!("Added {}", line);

        Ok(CommandResult::new(format!("Added: {}", line)))
    }
}
