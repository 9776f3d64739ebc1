use super::{CommandResult, Context, Execute};
use crate::{Entry, Error, Result};

pub const DELETE_USAGE: &str = "Usage: delete INDEX\n\
    Deletes the entry at INDEX from the currently shown list.\n\
    • INDEX must be a positive whole number (1, 2, 3, ...).";

/// Deletes an entry from the currently shown list by its index
///
/// The index is validated against the shown (filtered) view, not the full
/// journal. Zero, negatives and non-numbers are rejected while parsing; the
/// upper bound can only be checked at execution time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteCommand {
    /// One-based index into the shown list
    pub index: usize,
}

impl DeleteCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        let arg = args.trim();
        if arg.is_empty() {
            return Err(Error::syntax("Missing index.", DELETE_USAGE));
        }
        if !arg.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::syntax(
                "Index must be a positive whole number.",
                DELETE_USAGE,
            ));
        }
        let index: usize = arg
            .parse()
            .map_err(|_| Error::validation("Index is too large.", DELETE_USAGE))?;
        if index == 0 {
            return Err(Error::validation("Index must be greater than 0.", DELETE_USAGE));
        }
        Ok(Self { index })
    }
}

impl Execute for DeleteCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let shown_size = ctx.list.shown_size();
        if shown_size == 0 {
            tracing::warn!("Delete attempted on empty shown list");
            return Err(Error::EmptyList {
                usage: DELETE_USAGE,
            });
        }
        if self.index > shown_size {
            tracing::warn!(
                "Delete index out of bounds (shown list): {} / size={}",
                self.index,
                shown_size
            );
            return Err(out_of_range(self.index, shown_size));
        }

        let position = ctx.list.backing_position(self.index - 1);
        let removed = match ctx.list.delete_by_shown_index(self.index - 1) {
            Ok(removed) => removed,
            Err(Error::IndexOutOfBounds { size, .. }) => {
                tracing::info!(
                    "Delete index went out of range during execution: {} / size={}",
                    self.index,
                    size
                );
                if size == 0 {
                    return Err(Error::EmptyList {
                        usage: DELETE_USAGE,
                    });
                }
                return Err(out_of_range(self.index, size));
            }
            Err(e) => return Err(e),
        };
        if let Err(e) = ctx.persist(&format!("delete index={}", self.index)) {
            if let Some(position) = position {
                ctx.list.restore(position, removed);
            }
            return Err(e);
        }
        tracing::info!(
            "Deleted (shown view) index {}: {}",
            self.index,
            removed.to_list_line()
        );

        let mut feedback = format!("Deleted: {}", removed.to_list_line());
        if matches!(removed, Entry::Milk(_)) {
            feedback.push_str(&format!(
                "\nTotal breast milk pumped: {}ml",
                ctx.list.total_milk_ml()
            ));
        }
        Ok(CommandResult::new(feedback))
    }
}

fn out_of_range(index: usize, size: usize) -> Error {
    let range = if size == 1 {
        "Valid index: 1.".to_string()
    } else {
        format!("Valid range: 1..{}.", size)
    };
    Error::OutOfRange {
        reason: format!("Index {} is out of bounds (shown list). {}", index, range),
        usage: DELETE_USAGE,
    }
}
