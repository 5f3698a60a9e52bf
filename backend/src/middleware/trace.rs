//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each request runs inside [`TraceId::scope`], so domain errors built while
//! handling it carry the identifier, and the response echoes it in the
//! `trace-id` header. A well-formed `trace-id` sent by an upstream proxy is
//! reused; anything else is replaced with a fresh UUID.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

fn inbound_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.parse().ok())
}

/// Middleware factory for request trace identifiers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use titto_backend::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(TraceId::generate);
        let span = info_span!(
            "http_request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(
            trace_id,
            async move {
                let mut res = fut.await?;
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            }
            .instrument(span),
        ))
    }
}
