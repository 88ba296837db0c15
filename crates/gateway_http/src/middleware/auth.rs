//! Frontend session authentication middleware
//!
//! Requires a valid `Authorization: Bearer <token>` issued by `/login` on
//! every route except the login and health endpoints. Rejections use the
//! standard error envelope so the frontend never sees a bare status.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use tracing::debug;

use crate::error::ApiError;
use crate::sessions::SessionStore;

/// Layer that applies frontend session authentication
#[derive(Clone, Debug)]
pub struct SessionAuthLayer {
    sessions: Arc<SessionStore>,
    /// Paths that should be excluded from authentication
    excluded_paths: Vec<String>,
}

impl SessionAuthLayer {
    /// Create an auth layer backed by the given session store
    #[must_use]
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self {
            sessions,
            excluded_paths: vec![
                "/login".to_string(),
                "/health".to_string(),
                "/ready".to_string(),
            ],
        }
    }

}

impl<S> Layer<S> for SessionAuthLayer {
    type Service = SessionAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionAuth {
            inner,
            sessions: Arc::clone(&self.sessions),
            excluded_paths: self.excluded_paths.clone(),
        }
    }
}

/// Middleware service for frontend session authentication
#[derive(Clone, Debug)]
pub struct SessionAuth<S> {
    inner: S,
    sessions: Arc<SessionStore>,
    excluded_paths: Vec<String>,
}

impl<S> Service<Request> for SessionAuth<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let sessions = Arc::clone(&self.sessions);
        let excluded_paths = self.excluded_paths.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // CORS preflight is answered by the CORS layer, never gated here
            if req.method() == axum::http::Method::OPTIONS {
                return inner.call(req).await;
            }

            // Exact match only, so a route merely prefixed with an open
            // path never bypasses auth
            let path = req.uri().path();
            if excluded_paths.iter().any(|p| p == path) {
                return inner.call(req).await;
            }

            let auth_header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok());

            match auth_header {
                Some(header) if header.starts_with("Bearer ") => {
                    let token = &header[7..];
                    if sessions.validate(token) {
                        return inner.call(req).await;
                    }
                    debug!("Rejected request with unknown or expired session token");
                    Ok(unauthorized_response("Invalid or expired session"))
                }
                Some(_) => Ok(unauthorized_response(
                    "Invalid authorization format, expected Bearer token",
                )),
                None => Ok(unauthorized_response("Missing Authorization header")),
            }
        })
    }
}

fn unauthorized_response(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
