mod migration_status;
mod step_action;
mod step_outcome;

pub use migration_status::MigrationStatus;
pub use step_action::StepAction;
pub use step_outcome::{StepOutcome, StepReport};
