//! Feature flag evaluation results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of the flag gating the gun safe weight ticket endpoints.
pub const GUN_SAFE_FLAG: &str = "gun_safe";

/// Extra attributes passed to the flag evaluator for targeting.
pub type FlagAttributes = BTreeMap<String, String>;

/// Result of evaluating a boolean flag for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    /// Flag key that was evaluated.
    pub key: String,
    /// Whether the flag matched (is on) for the user.
    pub is_enabled: bool,
}

impl FeatureFlag {
    /// Build an evaluation result.
    pub fn new(key: impl Into<String>, is_enabled: bool) -> Self {
        Self {
            key: key.into(),
            is_enabled,
        }
    }

    /// The result the handlers fall back to when evaluation fails.
    pub fn disabled(key: impl Into<String>) -> Self {
        Self::new(key, false)
    }
}
