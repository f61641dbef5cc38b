use colored::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Apply,
    Revert,
    Skip,
}

impl StepAction {
    pub fn to_colored_string(&self) -> String {
        match self {
            StepAction::Apply => "apply".magenta().bold().to_string(),
            StepAction::Revert => "revert".magenta().bold().to_string(),
            StepAction::Skip => "skip".bright_black().to_string(),
        }
    }
}
