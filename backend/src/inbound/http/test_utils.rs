//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::test_fixtures::fixture_clock;
use crate::domain::{AccountService, MatchingBoardService, QuestionBoardService};
use crate::inbound::http::api_routes;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCommunityStore;

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

/// Extract the `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Handler state backed by a fresh in-memory store and a fixed clock.
pub fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryCommunityStore::new());
    HttpState::from_services(
        Arc::new(AccountService::new(Arc::clone(&store), fixture_clock())),
        Arc::new(QuestionBoardService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            fixture_clock(),
        )),
        Arc::new(MatchingBoardService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            store,
            fixture_clock(),
        )),
    )
}

/// The `/api/v1` surface over the given state, with test sessions.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(api_routes))
}

/// Signup payload for a user called `local`.
pub fn signup_body(local: &str) -> Value {
    json!({
        "email": format!("{local}@titto.ac.kr"),
        "name": format!("Student {local}"),
        "nickname": local,
        "studentNo": "20240001",
        "department": "Computer Science",
    })
}

/// Sign `local` up through the API and return the session cookie.
pub async fn signup_cookie<S, B>(app: &S, local: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/signup")
            .set_json(signup_body(local))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "signup of {local} failed");
    session_cookie(&res)
}

/// Issue a JSON request with an optional session cookie.
pub async fn send_json<S, B>(
    app: &S,
    request: test::TestRequest,
    cookie: Option<&Cookie<'static>>,
    body: Option<Value>,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let mut request = request;
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    if let Some(body) = body {
        request = request.set_json(body);
    }
    test::call_service(app, request.to_request()).await
}
