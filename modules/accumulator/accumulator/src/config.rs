//! Configuration for the accumulator module.

use std::sync::Arc;

use accumulator_sdk::CallerId;
use serde::{Deserialize, Serialize};

use crate::domain::policy::{AccessPolicyRef, AllowAll, OwnerOnly};

/// Configuration for the accumulator module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccumulatorConfig {
    /// Who may open sessions.
    /// Default: only the root identity.
    pub access: AccessPolicyConfig,
}

/// Open-time access policy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AccessPolicyConfig {
    /// Any caller may open a session.
    AllowAll,
    /// Only `owner` may open a session.
    OwnerOnly {
        #[serde(default = "root_owner")]
        owner: CallerId,
    },
}

fn root_owner() -> CallerId {
    CallerId::ROOT
}

impl Default for AccessPolicyConfig {
    fn default() -> Self {
        Self::OwnerOnly {
            owner: CallerId::ROOT,
        }
    }
}

impl AccessPolicyConfig {
    /// Instantiates the configured policy.
    #[must_use]
    pub fn build(&self) -> AccessPolicyRef {
        match *self {
            Self::AllowAll => Arc::new(AllowAll),
            Self::OwnerOnly { owner } => Arc::new(OwnerOnly::new(owner)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::AccessPolicy;
    use serde_json::json;

    #[test]
    fn test_default_config_is_root_only() {
        let cfg = AccumulatorConfig::default();
        assert_eq!(
            cfg.access,
            AccessPolicyConfig::OwnerOnly {
                owner: CallerId::ROOT
            }
        );
        let policy = cfg.access.build();
        assert!(policy.allows(CallerId::ROOT));
        assert!(!policy.allows(CallerId::new(1000)));
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let cfg: AccumulatorConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(cfg, AccumulatorConfig::default());
    }

    #[test]
    fn test_allow_all_from_json() {
        let cfg: AccumulatorConfig =
            serde_json::from_value(json!({ "access": { "policy": "allow_all" } })).unwrap();
        assert_eq!(cfg.access, AccessPolicyConfig::AllowAll);
        assert!(cfg.access.build().allows(CallerId::new(1000)));
    }

    #[test]
    fn test_owner_only_from_json() {
        let cfg: AccumulatorConfig = serde_json::from_value(json!({
            "access": { "policy": "owner_only", "owner": 1000 }
        }))
        .unwrap();
        let policy = cfg.access.build();
        assert!(policy.allows(CallerId::new(1000)));
        assert!(!policy.allows(CallerId::ROOT));

        let cfg: AccumulatorConfig =
            serde_json::from_value(json!({ "access": { "policy": "owner_only" } })).unwrap();
        assert_eq!(cfg, AccumulatorConfig::default());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let res: Result<AccumulatorConfig, _> =
            serde_json::from_value(json!({ "initial_value": 5 }));
        assert!(res.is_err());
        let res: Result<AccumulatorConfig, _> =
            serde_json::from_value(json!({ "access": { "policy": "everyone" } }));
        assert!(res.is_err());
    }
}
