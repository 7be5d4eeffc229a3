//! Core type definitions for survey view resolution.
//!
//! This crate provides the shared data model only; no business logic.
//! The resolution pipeline (`survey-view-gate`) and anything presenting its
//! outcomes depend on this crate.

pub mod billing;
pub mod ids;
pub mod locale;
pub mod outcome;
pub mod request;
pub mod survey;
pub mod verification;

// Re-export primary types at crate root for ergonomic use.
pub use billing::{BillingPlan, EntitlementResult, LicenseFeatures, LicenseState, Project};
pub use ids::{ContactId, EnvironmentId, OrganizationId, ProjectId, SurveyId};
pub use locale::{BuiltinLocaleDisplay, LocaleDisplay, LocaleDisplayProvider};
pub use outcome::{
    LanguageOption, LanguageSelection, PinChallenge, RenderContext, ResolvedOutcome, SurveyView,
};
pub use request::{RequestContext, SingleUseResponse};
pub use survey::{
    LanguageBinding, LanguageConfigError, RecaptchaSettings, SurveyClosedMessage,
    SurveyDescriptor, SurveyStatus, SurveyType, WelcomeCard,
};
pub use verification::{TokenStatus, TokenVerification, VerificationOutcome, VerificationStatus};

/// Sentinel language code meaning "render the survey's base, unlocalized content".
pub const DEFAULT_LANGUAGE: &str = "default";
