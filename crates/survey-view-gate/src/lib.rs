//! Survey View Resolution: ordered gate pipeline for public survey links.
//!
//! For one request to view a survey, the pipeline yields exactly one
//! [`ResolvedOutcome`]: not found, inactive, choose language, enter PIN, or
//! render the survey.
//!
//! ## Invariants
//!
//! - **Single outcome**: the first gate that resolves ends the chain; no two
//!   gates can both produce an outcome.
//! - **Availability first**: lifecycle and activity gates precede language and
//!   PIN gates, so an unavailable survey never reveals either.
//! - **No lookups for hidden surveys**: drafts and non-link surveys are
//!   rejected before any collaborator is called.
//! - **Fail-closed configuration**: resolution is refused unless all nine gates
//!   are present in canonical order.
//! - **Read-only**: nothing is written; resolving twice with unchanged
//!   collaborator state yields the same outcome.
//!
//! ## Gates
//!
//! 1. **Lifecycle**: drafts and non-link surveys are not found
//! 2. **Dependency Lookup**: organization billing plan and project
//! 3. **Active**: closed surveys show their closed message (previews pass)
//! 4. **Entitlement**: is multi-language delivery allowed for the plan
//! 5. **Verification**: email verification status of the request
//! 6. **Language Selection**: force a language choice when several exist
//! 7. **Language Resolution**: concrete language code or `"default"`
//! 8. **PIN**: PIN screen for protected surveys
//! 9. **Render**: the survey itself

pub mod config;
pub mod context;
pub mod error;
pub mod mocks;
pub mod pipeline;
pub mod stages;
pub mod traits;

pub use config::{RecaptchaConfig, ViewConfig};
pub use context::{GateResult, GateTrace, ResolutionContext};
pub use error::{Dependency, LookupError, ResolutionError};
pub use mocks::{MockBackend, MockEntitlementResolver};
pub use pipeline::{Collaborators, Resolution, SurveyViewPipeline, CANONICAL_GATE_COUNT};
pub use stages::{
    requires_pin, resolve_language_code, ActiveGate, DependencyLookupGate,
    EntitlementGate, LanguageResolutionGate, LanguageSelectionGate, LicenseEntitlementResolver,
    LifecycleGate, PinGate, RenderGate, VerificationGate,
};
pub use traits::{
    EmailVerificationStore, EntitlementResolver, OrganizationDirectory, ProjectDirectory,
    ResponseCounter, ViewGate,
};

pub use survey_view_types::ResolvedOutcome;
