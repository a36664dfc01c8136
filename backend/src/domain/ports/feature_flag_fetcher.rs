//! Driven port for evaluating feature flags.
//!
//! Handlers receive the evaluator as an injected capability. A failing
//! evaluator never fails the request: callers treat errors as "flag off".

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{FeatureFlag, FlagAttributes, RequestContext};

define_port_error! {
    /// Errors raised while evaluating a flag.
    pub enum FeatureFlagError {
        /// The evaluator could not be reached or answered with garbage.
        Unavailable { message: String } => "feature flag service unavailable: {message}",
        /// The evaluator does not know the flag.
        UnknownFlag { key: String } => "unknown feature flag: {key}",
    }
}

/// Boolean flag evaluation for the calling user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureFlagFetcher: Send + Sync {
    /// Evaluate `key` for the user attached to `ctx`.
    ///
    /// # Errors
    /// Returns [`FeatureFlagError`] when the flag cannot be evaluated.
    async fn get_boolean_flag_for_user(
        &self,
        ctx: &RequestContext,
        key: &str,
        attributes: &FlagAttributes,
    ) -> Result<FeatureFlag, FeatureFlagError>;
}

/// Evaluator backed by a fixed set of enabled keys.
///
/// Every key outside the set evaluates to off. Used when no remote flag
/// service is configured.
///
/// # Examples
/// ```
/// use ghc_api::domain::ports::StaticFeatureFlagFetcher;
///
/// let flags = StaticFeatureFlagFetcher::from_csv("gun_safe, boat");
/// assert!(flags.is_enabled("gun_safe"));
/// assert!(!flags.is_enabled("mobile_home"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticFeatureFlagFetcher {
    enabled: BTreeSet<String>,
}

impl StaticFeatureFlagFetcher {
    /// Enable exactly the given keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Enable the keys in a comma-separated list, ignoring blanks.
    #[must_use]
    pub fn from_csv(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty()),
        )
    }

    /// Whether `key` is enabled.
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        self.enabled.contains(key)
    }
}

#[async_trait]
impl FeatureFlagFetcher for StaticFeatureFlagFetcher {
    async fn get_boolean_flag_for_user(
        &self,
        _ctx: &RequestContext,
        key: &str,
        _attributes: &FlagAttributes,
    ) -> Result<FeatureFlag, FeatureFlagError> {
        Ok(FeatureFlag::new(key, self.is_enabled(key)))
    }
}
