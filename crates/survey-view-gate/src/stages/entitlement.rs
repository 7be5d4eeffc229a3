use std::sync::Arc;

use async_trait::async_trait;
use survey_view_types::{BillingPlan, EntitlementResult, LicenseState};

use crate::context::{GateResult, ResolutionContext};
use crate::error::{LookupError, ResolutionError};
use crate::traits::{EntitlementResolver, ViewGate};

/// Entitlements derived from an already-evaluated license.
///
/// Hosted deployments gate features by plan (any paid plan with an active
/// license). Self-hosted deployments gate them by the license feature bundle.
pub struct LicenseEntitlementResolver {
    license: LicenseState,
    is_cloud: bool,
}

impl LicenseEntitlementResolver {
    pub fn new(license: LicenseState, is_cloud: bool) -> Self {
        Self { license, is_cloud }
    }
}

#[async_trait]
impl EntitlementResolver for LicenseEntitlementResolver {
    async fn is_multi_language_allowed(&self, plan: &BillingPlan) -> Result<bool, LookupError> {
        if !self.license.active {
            return Ok(false);
        }
        if self.is_cloud {
            return Ok(*plan != BillingPlan::Free);
        }
        Ok(self
            .license
            .features
            .as_ref()
            .is_some_and(|f| f.multi_language))
    }
}

/// Gate 4: Entitlement
///
/// Asks the entitlement resolver whether the organization's plan allows
/// multi-language delivery. The answer lives only in this resolution's context.
pub struct EntitlementGate {
    resolver: Arc<dyn EntitlementResolver>,
}

impl EntitlementGate {
    pub fn new(resolver: Arc<dyn EntitlementResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ViewGate for EntitlementGate {
    fn gate_name(&self) -> &str {
        "Entitlement"
    }

    fn gate_number(&self) -> u8 {
        4
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        let plan = *ResolutionContext::require(
            self.gate_name(),
            context.billing_plan.as_ref(),
            "billing plan",
        )?;
        let multi_language_allowed = self.resolver.is_multi_language_allowed(&plan).await?;
        context.entitlements = Some(EntitlementResult {
            multi_language_allowed,
        });
        Ok(GateResult::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockEntitlementResolver;
    use survey_view_types::{LicenseFeatures, RequestContext, SurveyDescriptor};

    fn multi_language() -> LicenseFeatures {
        LicenseFeatures {
            multi_language: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn cloud_free_plan_is_denied() {
        let resolver = LicenseEntitlementResolver::new(LicenseState::active(multi_language()), true);
        assert!(!resolver.is_multi_language_allowed(&BillingPlan::Free).await.unwrap());
        assert!(resolver.is_multi_language_allowed(&BillingPlan::Startup).await.unwrap());
    }

    #[tokio::test]
    async fn inactive_license_denies_everything() {
        let resolver = LicenseEntitlementResolver::new(LicenseState::inactive(), true);
        assert!(!resolver
            .is_multi_language_allowed(&BillingPlan::Enterprise)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn self_hosted_follows_feature_bundle() {
        let with = LicenseEntitlementResolver::new(LicenseState::active(multi_language()), false);
        let without =
            LicenseEntitlementResolver::new(LicenseState::active(LicenseFeatures::default()), false);
        assert!(with.is_multi_language_allowed(&BillingPlan::Free).await.unwrap());
        assert!(!without.is_multi_language_allowed(&BillingPlan::Free).await.unwrap());
    }

    #[tokio::test]
    async fn gate_records_entitlement() {
        let gate = EntitlementGate::new(Arc::new(MockEntitlementResolver::allow_all()));
        let mut ctx = ResolutionContext::new(
            Arc::new(SurveyDescriptor::link("s1", "e1")),
            RequestContext::default(),
        );
        ctx.billing_plan = Some(BillingPlan::Scale);
        assert!(gate.evaluate(&mut ctx).await.unwrap().is_continue());
        assert!(ctx.multi_language_allowed());
    }

    #[tokio::test]
    async fn gate_fails_without_plan() {
        let gate = EntitlementGate::new(Arc::new(MockEntitlementResolver::allow_all()));
        let mut ctx = ResolutionContext::new(
            Arc::new(SurveyDescriptor::link("s1", "e1")),
            RequestContext::default(),
        );
        assert!(matches!(
            gate.evaluate(&mut ctx).await,
            Err(ResolutionError::GateFailed { .. })
        ));
    }
}
