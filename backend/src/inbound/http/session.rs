//! Session cookie access for handlers.
//!
//! Wraps the Actix session so the rest of the adapter works with the domain
//! [`Session`] value only. The identity is stored as JSON under one key.

use actix_session::Session as CookieSession;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use super::error::{ApiError, ErrorCode};
use crate::domain::Session;

pub(crate) const SESSION_KEY: &str = "session";

/// Newtype wrapper that exposes the authenticated identity.
#[derive(Clone)]
pub struct SessionContext(CookieSession);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }

    /// Persist the identity in the session cookie.
    pub fn persist(&self, session: &Session) -> Result<(), ApiError> {
        self.0.insert(SESSION_KEY, session).map_err(|error| {
            ApiError::new(
                ErrorCode::InternalError,
                format!("failed to persist session: {error}"),
            )
        })
    }

    /// Identity stored in the cookie. Unreadable data counts as no session.
    pub fn session(&self) -> Option<Session> {
        match self.0.get::<Session>(SESSION_KEY) {
            Ok(session) => session,
            Err(error) => {
                warn!(%error, "discarding unreadable session cookie");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CookieSession::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
