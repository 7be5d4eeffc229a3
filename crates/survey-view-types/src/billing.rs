use serde::{Deserialize, Serialize};

use crate::ids::{EnvironmentId, OrganizationId, ProjectId};

/// Billing plan of an organization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingPlan {
    Free,
    Startup,
    Scale,
    Enterprise,
}

/// Feature bundle unlocked by an enterprise license.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseFeatures {
    #[serde(default)]
    pub multi_language: bool,
}

/// Already-evaluated license state. How it is fetched or cached is not our concern.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseState {
    pub active: bool,
    #[serde(default)]
    pub features: Option<LicenseFeatures>,
}

impl LicenseState {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active(features: LicenseFeatures) -> Self {
        Self {
            active: true,
            features: Some(features),
        }
    }
}

/// Plan-derived capabilities for one resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResult {
    pub multi_language_allowed: bool,
}

/// Project owning the survey's environment; carries branding for the screens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub environment_id: EnvironmentId,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    #[serde(default)]
    pub link_survey_branding: bool,
    #[serde(default)]
    pub logo_url: Option<String>,
}
