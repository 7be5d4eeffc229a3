//! Strong typed IDs used throughout survey view resolution.
//!
//! All ids are opaque strings owned by the persistence layer.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

macro_rules! id_impls {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_impls!(SurveyId, "srv");
id_impls!(EnvironmentId, "env");
id_impls!(OrganizationId, "org");
id_impls!(ProjectId, "prj");
id_impls!(ContactId, "ctc");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(format!("{}", SurveyId::new("abc")), "srv:abc");
        assert_eq!(format!("{}", EnvironmentId::new("e1")), "env:e1");
        assert_eq!(format!("{}", OrganizationId::new("o1")), "org:o1");
        assert_eq!(format!("{}", ProjectId::new("p1")), "prj:p1");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = SurveyId::new("clx123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"clx123\"");
        let restored: SurveyId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
