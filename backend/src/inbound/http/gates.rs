//! Precondition checks run at the top of audited handler bodies.
//!
//! Order matters: feature flag, then session presence, then application,
//! then role. A failing gate returns before any service is invoked.

use tracing::warn;

use super::error::{ApiError, ErrorCode};
use super::rejection::Rejection;
use crate::domain::ports::FeatureFlagFetcher;
use crate::domain::{FeatureFlag, FlagAttributes, RequestContext, RoleType, Session};

/// Refuse the request unless `flag` is on for the caller.
///
/// A fetcher failure is logged and treated as the flag being off.
pub(crate) async fn require_flag(
    flags: &dyn FeatureFlagFetcher,
    request: &RequestContext,
    flag: &str,
) -> Result<(), Rejection> {
    let evaluated = match flags
        .get_boolean_flag_for_user(request, flag, &FlagAttributes::new())
        .await
    {
        Ok(evaluated) => evaluated,
        Err(error) => {
            warn!(flag, %error, "feature flag evaluation failed; treating as disabled");
            FeatureFlag::disabled(flag)
        }
    };
    if evaluated.is_enabled {
        Ok(())
    } else {
        Err(Rejection::feature_disabled(flag))
    }
}

/// Return the caller's session or `401`.
pub(crate) fn require_session(request: &RequestContext) -> Result<&Session, Rejection> {
    request
        .session()
        .ok_or_else(|| ApiError::tagged(ErrorCode::Unauthorized, "Login required.").into())
}

/// Refuse callers outside the office application with a tagged `403`.
pub(crate) fn require_office_app(session: &Session) -> Result<(), Rejection> {
    if session.is_office_app() {
        Ok(())
    } else {
        Err(Rejection::denied_with_message("Request should come from the office app."))
    }
}

/// Refuse callers without an office user record with a bare `403`.
pub(crate) fn require_office_user(session: &Session) -> Result<(), Rejection> {
    if session.is_office_user() {
        Ok(())
    } else {
        Err(Rejection::denied("caller is not an office user"))
    }
}

/// Refuse callers holding none of `roles` with a bare `403`.
pub(crate) fn require_any_role(session: &Session, roles: &[RoleType]) -> Result<(), Rejection> {
    if session.has_any_role(roles) {
        Ok(())
    } else {
        Err(Rejection::denied(format!(
            "caller holds none of the required roles {roles:?}"
        )))
    }
}
