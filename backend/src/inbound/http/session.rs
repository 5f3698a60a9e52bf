//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie carries nothing but the resolved caller id; every handler that
//! needs a caller asks [`SessionContext::require_user_id`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// The session is renewed first so a login never reuses a cookie issued
    /// before authentication.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A value that does not decode as an id is treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        match self.0.get::<i64>(USER_ID_KEY) {
            Ok(id) => Ok(id.map(UserId::new)),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
