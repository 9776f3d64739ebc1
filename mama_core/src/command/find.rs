use super::{render_shown, CommandResult, Context, Execute};
use crate::{Error, Result};

pub const FIND_USAGE: &str = "Usage: find KEYWORD\n\
    Lists the entries whose description contains KEYWORD (case-sensitive).";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindCommand {
    pub keyword: String,
}

impl FindCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        let keyword = args.trim();
        if keyword.is_empty() {
            return Err(Error::syntax("Missing keyword.", FIND_USAGE));
        }
        Ok(Self {
            keyword: keyword.to_string(),
        })
    }
}

impl Execute for FindCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        ctx.list.filter_by_keyword(&self.keyword);
        Ok(CommandResult::new(render_shown(
            ctx.list,
            "Here are the matching entries:",
            "No matching entries found.",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::Fixture;

    #[test]
    fn test_find_then_delete_by_match_index() {
        let mut fx = Fixture::new();
        fx.feedback("note bad night");
        fx.feedback("meal oatmeal /cal 300");
        fx.feedback("note good night");

        assert_eq!(
            fx.feedback("find good"),
            "Here are the matching entries:\n1. [NOTE] good night (29/10/25 12:00)"
        );
        fx.feedback("delete 1");
        assert_eq!(fx.list.full_size(), 2);
        assert!(fx.list.iter().all(|e| !e.contains("good night")));
    }

    #[test]
    fn test_find_without_match() {
        let mut fx = Fixture::new();
        fx.feedback("note bad night");
        assert_eq!(fx.feedback("find Night"), "No matching entries found.");
        assert!(FindCommand::from_input("  ").is_err());
    }
}
