use thiserror::Error;

/// Upstream record the pipeline cannot proceed without.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dependency {
    Organization,
    BillingPlan,
    Project,
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Dependency::Organization => "organization",
            Dependency::BillingPlan => "billing plan",
            Dependency::Project => "project",
        };
        f.write_str(s)
    }
}

/// Errors from the survey view resolution pipeline.
///
/// None of these is a user-facing state; every legitimate state is a
/// `ResolvedOutcome` variant instead.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("{dependency} not found for {id}")]
    DependencyNotFound { dependency: Dependency, id: String },

    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("gate {gate} failed: {reason}")]
    GateFailed { gate: String, reason: String },

    #[error("pipeline misconfigured: {0}")]
    PipelineMisconfigured(String),
}

impl ResolutionError {
    pub fn is_dependency_not_found(&self) -> bool {
        matches!(self, ResolutionError::DependencyNotFound { .. })
    }
}

/// Errors reported by external collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),
}
