//! Test helpers for inbound HTTP components.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};
use serde_json::Value;
use tracing::subscriber::DefaultGuard;
use uuid::Uuid;

use super::session::SessionContext;
use crate::domain::{ApplicationName, Gbloc, RoleType, Session};

const SEED_SESSION_PATH: &str = "/__test__/session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Register a route that stores the posted identity in the session cookie.
pub fn seed_session_route(cfg: &mut web::ServiceConfig) {
    cfg.route(
        SEED_SESSION_PATH,
        web::post().to(|session: SessionContext, body: web::Json<Session>| async move {
            session.persist(&body)?;
            Ok::<_, super::error::ApiError>(HttpResponse::NoContent().finish())
        }),
    );
}

/// Seed `session` through [`seed_session_route`] and return the cookie.
pub async fn session_cookie<S>(app: &S, session: &Session) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(SEED_SESSION_PATH)
            .set_json(session)
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "seeding session failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Office-app session for a user holding `roles`.
pub fn office_session_with(roles: &[RoleType]) -> Session {
    Session {
        user_id: Uuid::new_v4(),
        office_user_id: Some(Uuid::new_v4()),
        service_member_id: None,
        application: ApplicationName::Office,
        roles: roles.to_vec(),
        gblocs: vec![Gbloc::new("KKFA").expect("valid gbloc")],
        email: "office.user@example.mil".to_owned(),
    }
}

/// Office-app session for a quality assurance evaluator.
pub fn office_session() -> Session {
    office_session_with(&[RoleType::Qae])
}

/// Customer-app session.
pub fn customer_session() -> Session {
    Session {
        user_id: Uuid::new_v4(),
        office_user_id: None,
        service_member_id: Some(Uuid::new_v4()),
        application: ApplicationName::Mil,
        roles: vec![RoleType::Customer],
        gblocs: Vec::new(),
        email: "customer@example.com".to_owned(),
    }
}

/// In-memory sink for JSON log lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Install a JSON subscriber for the current thread that writes here.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    /// Parsed log records written so far.
    pub fn records(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Records emitted for `operation` at `level` (e.g. `"ERROR"`).
    pub fn records_for(&self, operation: &str, level: &str) -> Vec<Value> {
        self.records()
            .into_iter()
            .filter(|record| record["operation"] == operation && record["level"] == level)
            .collect()
    }
}

/// Application wired like the server: trace and session middleware, every
/// `/ghc/v1` route, plus the session seeding route.
pub fn test_app(
    state: super::state::HttpState,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    actix_web::App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .wrap(crate::middleware::Trace)
        .configure(seed_session_route)
        .configure(super::configure)
}

/// State with fixture ports and the given feature flags switched on.
pub fn fixture_state(flags: &[&str]) -> super::state::HttpState {
    super::state::HttpState::with_fixtures(Arc::new(
        crate::domain::ports::StaticFeatureFlagFetcher::new(flags.iter().copied()),
    ))
}

/// Value of the `trace-id` response header.
pub fn trace_header(res: &ServiceResponse) -> String {
    res.headers()
        .get(crate::domain::TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .expect("trace-id header")
}
