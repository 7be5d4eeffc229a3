pub mod lifecycle;
pub mod dependencies;
pub mod active;
pub mod entitlement;
pub mod verification;
pub mod language;
pub mod pin;
pub mod render;

pub use lifecycle::LifecycleGate;
pub use dependencies::DependencyLookupGate;
pub use active::ActiveGate;
pub use entitlement::{EntitlementGate, LicenseEntitlementResolver};
pub use verification::VerificationGate;
pub use language::{resolve_language_code, LanguageResolutionGate, LanguageSelectionGate};
pub use pin::{requires_pin, PinGate};
pub(crate) use pin::unlock_with_pin;
pub use render::RenderGate;
