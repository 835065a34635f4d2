use std::fmt::{Display, Formatter, Result as FmtResult};

/// Progress of one invocation through the pipeline.
///
/// States only move forward. `Failed` is reachable from every non-terminal state; the
/// orchestrator reports the last state reached when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Received,
    Decoded,
    Transformed,
    Encoded,
    Persisted,
    Recorded,
    Notified,
    Succeeded,
    Failed,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Received => "Received",
            PipelineState::Decoded => "Decoded",
            PipelineState::Transformed => "Transformed",
            PipelineState::Encoded => "Encoded",
            PipelineState::Persisted => "Persisted",
            PipelineState::Recorded => "Recorded",
            PipelineState::Notified => "Notified",
            PipelineState::Succeeded => "Succeeded",
            PipelineState::Failed => "Failed",
        }
    }

    /// The state reached when the step leaving `self` succeeds.
    pub fn next(self) -> PipelineState {
        match self {
            PipelineState::Received => PipelineState::Decoded,
            PipelineState::Decoded => PipelineState::Transformed,
            PipelineState::Transformed => PipelineState::Encoded,
            PipelineState::Encoded => PipelineState::Persisted,
            PipelineState::Persisted => PipelineState::Recorded,
            PipelineState::Recorded => PipelineState::Notified,
            PipelineState::Notified => PipelineState::Succeeded,
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed)
    }
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
