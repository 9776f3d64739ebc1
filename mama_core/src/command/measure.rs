use super::{parse_positive, CommandResult, Context, Execute};
use crate::types::Measurement;
use crate::{Entry, Error, Result};

pub const MEASURE_USAGE: &str = "Usage: measure waist/W hips/H [chest/C] [thigh/T] [arm/A]\n\
    • All values are in cm and must be positive whole numbers.";

const FIELDS: [&str; 5] = ["waist", "hips", "chest", "thigh", "arm"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddMeasurementCommand {
    pub waist: u32,
    pub hips: u32,
    pub chest: Option<u32>,
    pub thigh: Option<u32>,
    pub arm: Option<u32>,
}

impl AddMeasurementCommand {
    pub fn from_input(args: &str) -> Result<Self> {
        let mut values: [Option<u32>; 5] = [None; 5];

        for token in args.split_whitespace() {
            let Some((name, value)) = token.split_once('/') else {
                return Err(Error::syntax(
                    format!("Invalid field '{}'. Expected NAME/VALUE.", token),
                    MEASURE_USAGE,
                ));
            };
            let name = name.to_lowercase();
            let Some(slot) = FIELDS.iter().position(|f| *f == name) else {
                return Err(Error::validation(
                    format!("Unknown field '{}'.", name),
                    MEASURE_USAGE,
                ));
            };
            if values[slot].is_some() {
                return Err(Error::syntax(
                    format!("Duplicate field '{}'.", name),
                    MEASURE_USAGE,
                ));
            }
            values[slot] = Some(parse_positive(value, FIELDS[slot], MEASURE_USAGE)?);
        }

        let required = |slot: usize| {
            values[slot].ok_or_else(|| {
                Error::syntax(format!("Missing {}.", FIELDS[slot]), MEASURE_USAGE)
            })
        };
        Ok(Self {
            waist: required(0)?,
            hips: required(1)?,
            chest: values[2],
            thigh: values[3],
            arm: values[4],
        })
    }
}

impl Execute for AddMeasurementCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> Result<CommandResult> {
        let entry = Entry::Measurement(Measurement {
            waist: self.waist,
            hips: self.hips,
            chest: self.chest,
            thigh: self.thigh,
            arm: self.arm,
            timestamp: ctx.now,
        });
        let line = entry.to_list_line();
        ctx.add_and_persist(entry, "measure")?;
        tracing::info!("Added {}", line);

        Ok(CommandResult::new(format!("Added: {}", line)))
    }
}
