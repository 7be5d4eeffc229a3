use serde::{Deserialize, Serialize};

/// Email verification state of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationStatus {
    /// Survey does not require email verification
    NotRequired,
    /// Verification required but no token supplied
    NotAttempted,
    Verified,
    Invalid,
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub status: VerificationStatus,
    #[serde(default)]
    pub verified_email: Option<String>,
}

impl VerificationOutcome {
    pub fn not_required() -> Self {
        Self {
            status: VerificationStatus::NotRequired,
            verified_email: None,
        }
    }

    pub fn not_attempted() -> Self {
        Self {
            status: VerificationStatus::NotAttempted,
            verified_email: None,
        }
    }

    pub fn verified(email: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Verified,
            verified_email: Some(email.into()),
        }
    }

    pub fn invalid() -> Self {
        Self {
            status: VerificationStatus::Invalid,
            verified_email: None,
        }
    }

    pub fn expired() -> Self {
        Self {
            status: VerificationStatus::Expired,
            verified_email: None,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }
}

/// Answer of the verification-token store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenStatus {
    Verified,
    Invalid,
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenVerification {
    pub status: TokenStatus,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_verified_status_counts_as_verified() {
        assert!(VerificationOutcome::verified("a@b.co").is_verified());
        assert!(!VerificationOutcome::not_required().is_verified());
        assert!(!VerificationOutcome::not_attempted().is_verified());
        assert!(!VerificationOutcome::invalid().is_verified());
        assert!(!VerificationOutcome::expired().is_verified());
    }
}
