//! Workflow session state and stage gating.
//!
//! A session holds the text produced by each model-backed stage for one
//! interactive run. Nothing here is persisted; restarting the process
//! starts every session back at Idle while the roster survives on disk.

use crate::ai::{ModelError, ModelProvider};
use crate::ai::prompts;
use crate::team::Roster;

/// Where a session currently stands.
///
/// The stage is derived from which results are present, so it can never
/// disagree with the stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStage {
    Idle,
    Analyzed,
    TasksGenerated,
    Assigned,
}

/// Workflow action error types.
///
/// Validation variants are raised before any model call; `Model` wraps an
/// upstream failure after validation passed.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("please enter a project description")]
    EmptyDescription,

    #[error("please analyze the project first")]
    AnalysisRequired,

    #[error("please generate tasks first")]
    TasksRequired,

    #[error("please add team members first")]
    EmptyRoster,

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl WorkflowError {
    /// Whether this is a validation reject (no model call was made).
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Model(_))
    }
}

/// One user's in-memory workflow progress.
#[derive(Debug, Default)]
pub struct WorkflowSession {
    /// Analysis text from the analyze stage.
    pub project_analysis: Option<String>,

    /// Task list text from the task-generation stage.
    pub tasks: Option<String>,

    /// Assignment text from the assignment stage.
    pub assignments: Option<String>,
}

impl WorkflowSession {
    /// Create a fresh session in the Idle stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage, derived from stored results.
    pub fn stage(&self) -> SessionStage {
        if self.assignments.is_some() {
            SessionStage::Assigned
        } else if self.tasks.is_some() {
            SessionStage::TasksGenerated
        } else if self.project_analysis.is_some() {
            SessionStage::Analyzed
        } else {
            SessionStage::Idle
        }
    }

    /// Run the analyze stage.
    ///
    /// A blank description is rejected before any model call. An upstream
    /// failure leaves the session untouched so the stage can be retried.
    pub async fn analyze(
        &mut self,
        provider: &dyn ModelProvider,
        description: &str,
    ) -> Result<&str, WorkflowError> {
        if description.trim().is_empty() {
            return Err(WorkflowError::EmptyDescription);
        }

        let analysis = provider.complete(&prompts::analyze_project(description)).await?;
        tracing::debug!(chars = analysis.len(), "project analysis complete");
        Ok(self.project_analysis.insert(analysis))
    }

    /// Run the task-generation stage. Requires a prior analysis.
    pub async fn generate_tasks(
        &mut self,
        provider: &dyn ModelProvider,
    ) -> Result<&str, WorkflowError> {
        let analysis = self.project_analysis.as_deref().ok_or(WorkflowError::AnalysisRequired)?;

        let tasks = provider.complete(&prompts::create_tasks(analysis)).await?;
        tracing::debug!(chars = tasks.len(), "task generation complete");
        Ok(self.tasks.insert(tasks))
    }

    /// Run the assignment stage. Requires generated tasks and a non-empty
    /// roster; the two preconditions fail with distinct guidance.
    pub async fn assign(
        &mut self,
        provider: &dyn ModelProvider,
        roster: &Roster,
    ) -> Result<&str, WorkflowError> {
        let tasks = self.tasks.as_deref().ok_or(WorkflowError::TasksRequired)?;
        if roster.is_empty() {
            return Err(WorkflowError::EmptyRoster);
        }

        let roster_json = serde_json::to_string_pretty(roster).unwrap_or_default();
        let assignments =
            provider.complete(&prompts::match_tasks_to_team(tasks, &roster_json)).await?;
        tracing::debug!(chars = assignments.len(), "task assignment complete");
        Ok(self.assignments.insert(assignments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::{Experience, MemberProfile};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that records calls and returns a canned or failed response.
    struct StubProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubProvider {
        fn ok() -> Self {
            Self { calls: AtomicUsize::new(0), fail: false }
        }

        fn failing() -> Self {
            Self { calls: AtomicUsize::new(0), fail: true }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelProvider for StubProvider {
        async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ModelError::Api { status: 500, body: "boom".to_string() })
            } else {
                Ok(format!("response to: {}", &prompt[..prompt.len().min(30)]))
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn one_member_roster() -> Roster {
        let mut roster = Roster::new();
        roster.insert(
            "Alice".to_string(),
            MemberProfile::new(vec!["Rust".into()], Experience::Senior),
        );
        roster
    }

    #[tokio::test]
    async fn test_stages_advance_in_order() {
        let provider = StubProvider::ok();
        let mut session = WorkflowSession::new();
        assert_eq!(session.stage(), SessionStage::Idle);

        session.analyze(&provider, "Build a CRM").await.unwrap();
        assert_eq!(session.stage(), SessionStage::Analyzed);

        session.generate_tasks(&provider).await.unwrap();
        assert_eq!(session.stage(), SessionStage::TasksGenerated);

        session.assign(&provider, &one_member_roster()).await.unwrap();
        assert_eq!(session.stage(), SessionStage::Assigned);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_description_makes_no_model_call() {
        let provider = StubProvider::ok();
        let mut session = WorkflowSession::new();

        let result = session.analyze(&provider, "   \n ").await;
        assert!(matches!(result, Err(WorkflowError::EmptyDescription)));
        assert_eq!(provider.call_count(), 0);
        assert_eq!(session.stage(), SessionStage::Idle);
    }

    #[tokio::test]
    async fn test_task_generation_requires_analysis() {
        let provider = StubProvider::ok();
        let mut session = WorkflowSession::new();

        let result = session.generate_tasks(&provider).await;
        assert!(matches!(result, Err(WorkflowError::AnalysisRequired)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_assignment_requires_tasks_then_roster() {
        let provider = StubProvider::ok();
        let mut session = WorkflowSession::new();

        // No tasks yet: distinct from the empty-roster reject.
        let result = session.assign(&provider, &one_member_roster()).await;
        assert!(matches!(result, Err(WorkflowError::TasksRequired)));

        session.analyze(&provider, "Build a CRM").await.unwrap();
        session.generate_tasks(&provider).await.unwrap();

        let result = session.assign(&provider, &Roster::new()).await;
        assert!(matches!(result, Err(WorkflowError::EmptyRoster)));

        // Both rejects happened after exactly the two successful stage calls.
        assert_eq!(provider.call_count(), 2);
        assert_eq!(session.stage(), SessionStage::TasksGenerated);
    }

    #[tokio::test]
    async fn test_model_failure_leaves_session_unchanged() {
        let ok = StubProvider::ok();
        let failing = StubProvider::failing();
        let mut session = WorkflowSession::new();

        session.analyze(&ok, "Build a CRM").await.unwrap();
        let analysis_before = session.project_analysis.clone();

        let result = session.generate_tasks(&failing).await;
        assert!(matches!(result, Err(WorkflowError::Model(_))));
        assert_eq!(session.stage(), SessionStage::Analyzed);
        assert_eq!(session.project_analysis, analysis_before);
        assert!(session.tasks.is_none());

        // Manual retry against a healthy provider succeeds.
        session.generate_tasks(&ok).await.unwrap();
        assert_eq!(session.stage(), SessionStage::TasksGenerated);
    }

    #[tokio::test]
    async fn test_rerunning_a_stage_replaces_its_result() {
        let provider = StubProvider::ok();
        let mut session = WorkflowSession::new();

        session.analyze(&provider, "v1 of the idea").await.unwrap();
        let first = session.project_analysis.clone().unwrap();

        session.analyze(&provider, "v2 of the idea").await.unwrap();
        let second = session.project_analysis.clone().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_validation_classification() {
        assert!(WorkflowError::EmptyDescription.is_validation());
        assert!(WorkflowError::EmptyRoster.is_validation());
        assert!(!WorkflowError::Model(ModelError::Empty).is_validation());
    }
}
