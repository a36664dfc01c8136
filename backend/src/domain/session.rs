//! Authenticated identity carried by a request.
//!
//! A [`Session`] is established elsewhere (login flows are out of scope) and
//! persisted in the cookie session store. Handlers only read it, and only
//! through the typed predicates below.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Client application a session was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationName {
    /// Staff-facing office application.
    Office,
    /// Customer-facing application used by service members.
    Mil,
    /// Administrative console.
    Admin,
}

/// Office role granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    /// Task ordering officer.
    TaskOrderingOfficer,
    /// Task invoicing officer.
    TaskInvoicingOfficer,
    /// Services counselor.
    ServicesCounselor,
    /// Quality assurance evaluator.
    Qae,
    /// Headquarters staff with cross-GBLOC visibility.
    Headquarters,
    /// Service member using the customer application.
    Customer,
}

/// Validation errors for [`Gbloc`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GblocValidationError {
    /// Codes are exactly four characters.
    #[error("GBLOC must be four characters (got {0:?})")]
    WrongLength(String),
    /// Codes use upper-case letters and digits only.
    #[error("GBLOC must be upper-case alphanumeric (got {0:?})")]
    InvalidCharacters(String),
}

/// Government bill of lading office code scoping which records a user sees.
///
/// ## Invariants
/// - Exactly four ASCII characters, each an upper-case letter or digit.
///
/// # Examples
/// ```
/// use ghc_api::domain::Gbloc;
///
/// let gbloc = Gbloc::new("KKFA").expect("valid code");
/// assert_eq!(gbloc.as_str(), "KKFA");
/// assert!(Gbloc::new("kkfa").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gbloc(String);

impl Gbloc {
    /// Validate and wrap a GBLOC code.
    ///
    /// # Errors
    /// Returns [`GblocValidationError`] when the code is malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, GblocValidationError> {
        let raw = value.into();
        if raw.chars().count() != 4 {
            return Err(GblocValidationError::WrongLength(raw));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(GblocValidationError::InvalidCharacters(raw));
        }
        Ok(Self(raw))
    }

    /// Borrow the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Gbloc {
    type Error = GblocValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Gbloc> for String {
    fn from(value: Gbloc) -> Self {
        value.0
    }
}

impl fmt::Display for Gbloc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Login identity.
    pub user_id: Uuid,
    /// Office user record, present for staff sessions.
    pub office_user_id: Option<Uuid>,
    /// Service member record, present for customer sessions.
    pub service_member_id: Option<Uuid>,
    /// Application the session was issued for.
    pub application: ApplicationName,
    /// Roles granted to the user.
    #[serde(default)]
    pub roles: Vec<RoleType>,
    /// GBLOCs assigned to the office user.
    #[serde(default)]
    pub gblocs: Vec<Gbloc>,
    /// Login e-mail address.
    pub email: String,
}

impl Session {
    /// Whether the request came through the staff-facing office application.
    #[must_use]
    pub fn is_office_app(&self) -> bool {
        self.application == ApplicationName::Office
    }

    /// Whether the session belongs to an office user.
    #[must_use]
    pub fn is_office_user(&self) -> bool {
        self.is_office_app() && self.office_user_id.is_some()
    }

    /// Whether the session carries `role`.
    #[must_use]
    pub fn has_role(&self, role: RoleType) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the session carries at least one of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[RoleType]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }

    /// Whether `gbloc` is among the office user's assigned GBLOCs.
    #[must_use]
    pub fn owns_gbloc(&self, gbloc: &Gbloc) -> bool {
        self.gblocs.contains(gbloc)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for session predicates.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn office_session() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            office_user_id: Some(Uuid::new_v4()),
            service_member_id: None,
            application: ApplicationName::Office,
            roles: vec![RoleType::TaskOrderingOfficer],
            gblocs: vec![Gbloc::new("KKFA").expect("valid gbloc")],
            email: "too@example.mil".to_owned(),
        }
    }

    #[rstest]
    fn office_session_predicates(office_session: Session) {
        assert!(office_session.is_office_app());
        assert!(office_session.is_office_user());
        assert!(office_session.has_role(RoleType::TaskOrderingOfficer));
        assert!(!office_session.has_role(RoleType::Headquarters));
        assert!(office_session.has_any_role(&[RoleType::Headquarters, RoleType::TaskOrderingOfficer]));
        assert!(!office_session.has_any_role(&[]));
    }

    #[rstest]
    fn customer_session_is_not_office(mut office_session: Session) {
        office_session.application = ApplicationName::Mil;
        assert!(!office_session.is_office_app());
        assert!(!office_session.is_office_user());
    }

    #[rstest]
    fn owns_only_assigned_gblocs(office_session: Session) {
        assert!(office_session.owns_gbloc(&Gbloc::new("KKFA").expect("valid gbloc")));
        assert!(!office_session.owns_gbloc(&Gbloc::new("LKNQ").expect("valid gbloc")));
    }

    #[rstest]
    #[case("KKF")]
    #[case("KKFAA")]
    #[case("kkfa")]
    #[case("KK-A")]
    fn gbloc_rejects_malformed_codes(#[case] raw: &str) {
        assert!(Gbloc::new(raw).is_err());
    }

    #[rstest]
    fn session_round_trips_through_json(office_session: Session) {
        let json = serde_json::to_string(&office_session).expect("serialise");
        let restored: Session = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(restored, office_session);
    }
}
