use super::{render_shown, CommandResult, Context, Execute};
use crate::{Error, Result};

pub const LIST_USAGE: &str = "Usage: list [/t TYPE]\n\
    Lists all entries, or only those of TYPE.\n\
    • TYPE is one of: meal, workout, workout_goal, calorie_goal, milk, weight, measure, note.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListCommand {
    /// Type tag to filter on; `None` lists everything
    pub kind: Option<String>,
}

impl ListCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        let args = args.trim();
        if args.is_empty() {
            return Ok(Self { kind: None });
        }
        // Accepts both `/t milk` and `/tmilk`
        let Some(tag) = args.strip_prefix("/t") else {
            return Err(Error::syntax(
                format!("Unexpected input: '{}'.", args),
                LIST_USAGE,
            ));
        };
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(Error::syntax("Missing TYPE after /t.", LIST_USAGE));
        }
        if tag.contains(char::is_whitespace) {
            return Err(Error::syntax("TYPE must be a single word.", LIST_USAGE));
        }
        Ok(Self {
            kind: Some(tag.to_string()),
        })
    }
}

impl Execute for ListCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let header = match &self.kind {
            Some(tag) => {
                ctx.list.filter_by_type(tag);
                format!("Here are your {} entries:", tag.to_uppercase())
            }
            None => {
                ctx.list.clear_filter();
                "Here are your entries:".to_string()
            }
        };
        tracing::debug!(
            "Listing {} of {} entries",
            ctx.list.shown_size(),
            ctx.list.full_size()
        );
        Ok(CommandResult::new(render_shown(
            ctx.list,
            &header,
            "No entries found.",
        )))
    }
}
