//! Model-backed planning workflow.
//!
//! Three stages run in a fixed order per session: analyze the project,
//! generate tasks from the analysis, assign tasks to the team. Each stage
//! gates on the previous one's output being present.

mod session;

pub use session::{SessionStage, WorkflowError, WorkflowSession};
