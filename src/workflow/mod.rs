//! Ingredient list and recipe search workflow.
//!
//! `update` is the pure transition table; `IngredientSearchWorkflow` drives it
//! and runs the resulting effects against the lookup and notifier.
mod effect;
mod msg;
mod notify;
mod session;
mod state;
mod update;

pub use effect::Effect;
pub use msg::{Msg, SearchOutcome};
pub use notify::{LogNotifier, Notification, NotificationKind, Notifier, RecordingNotifier};
pub use session::IngredientSearchWorkflow;
pub use state::{SearchId, WorkflowState};
pub use update::update;
