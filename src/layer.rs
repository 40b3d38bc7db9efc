//! Middleware that checks incoming Flask session cookies against known secrets.
//!
//! The layer never rewrites a cookie. It classifies what the client sent and inserts a
//! [`SessionCookie`] into the request extensions for the inner service.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use http::{Request, Response};
use tower_cookies::{Cookie, CookieManager, Cookies};
use tower_layer::Layer;
use tower_service::Service;

use crate::{config::FlaskSessionConfig, cookie::FlaskCookie};

/// What the client sent under the configured cookie name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCookie {
    Missing,
    /// Oversized, or not in Flask's format.
    Rejected,
    /// Well-formed, but no configured secret reproduces the signature.
    Unverified(FlaskCookie),
    Verified {
        cookie: FlaskCookie,
        /// Position of the matching secret in the configured list.
        key_index: usize,
    },
}

impl SessionCookie {
    fn classify(value: &str, config: &FlaskSessionConfig) -> Self {
        if value.len() > config.max_cookie_bytes {
            tracing::warn!(
                len = value.len(),
                max = config.max_cookie_bytes,
                "flask session cookie exceeds max_cookie_bytes"
            );
            return Self::Rejected;
        }

        let cookie = match FlaskCookie::parse(value) {
            Ok(cookie) => cookie,
            Err(err) => {
                tracing::warn!(err = %err, "flask session cookie parse failed");
                return Self::Rejected;
            }
        };

        match config.matching_key(&cookie) {
            Some(key_index) => {
                tracing::debug!(key_index, algorithm = %cookie.algorithm(), "flask session verified");
                Self::Verified { cookie, key_index }
            }
            None => {
                tracing::debug!(algorithm = %cookie.algorithm(), "flask session signature mismatch");
                Self::Unverified(cookie)
            }
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// The parsed cookie, verified or not.
    pub fn cookie(&self) -> Option<&FlaskCookie> {
        match self {
            Self::Unverified(cookie) | Self::Verified { cookie, .. } => Some(cookie),
            Self::Missing | Self::Rejected => None,
        }
    }

    fn should_clear(&self) -> bool {
        matches!(self, Self::Rejected | Self::Unverified(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlaskSessionLayer {
    config: FlaskSessionConfig,
}

impl FlaskSessionLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: FlaskSessionConfig) -> Self {
        self.config = config;
        self
    }
}

#[derive(Debug, Clone)]
pub struct FlaskSessionManager<S> {
    inner: S,
    config: FlaskSessionConfig,
}

impl<S> Layer<S> for FlaskSessionLayer {
    type Service = CookieManager<FlaskSessionManager<S>>;

    fn layer(&self, inner: S) -> Self::Service {
        CookieManager::new(FlaskSessionManager {
            inner,
            config: self.config.clone(),
        })
    }
}

impl<ReqBody, ResBody, S> Service<Request<ReqBody>> for FlaskSessionManager<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Default + Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let config = self.config.clone();

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            // `FlaskSessionLayer` always wraps this service in `CookieManager`; only a manager built
            // without it gets here.
            let Some(cookies) = req.extensions().get::<Cookies>().cloned() else {
                tracing::error!("flask session manager reached without tower_cookies::Cookies");
                let mut res = Response::default();
                *res.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
                return Ok(res);
            };

            let session = match cookies.get(&config.name) {
                Some(cookie) => SessionCookie::classify(cookie.value(), &config),
                None => SessionCookie::Missing,
            };

            if config.clear_on_reject && session.should_clear() {
                let mut removal = Cookie::new(config.name.clone(), "");
                removal.set_path("/");
                cookies.remove(removal);
            }

            req.extensions_mut().insert(session);
            inner.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use tower::ServiceExt as _;

    use super::*;

    const SHA512_COOKIE: &str = "eyJ1c2VyIjoiYWxpY2UifQ.ZVPxAA.JIB6YEF1tCNlQM-RUbCXCqSWiXkHNCKuqiXJ3hbZ5KhRdZAnPHnO9qM87Tq8SxdoTlHjCYE60dlv45eWpeFuNw";

    #[test]
    fn classify_verified() {
        let config = FlaskSessionConfig::default().with_secret_keys(["old", "test-secret"]);
        let session = SessionCookie::classify(SHA512_COOKIE, &config);

        assert!(session.is_verified());
        assert!(matches!(session, SessionCookie::Verified { key_index: 1, .. }));
    }

    #[test]
    fn classify_unverified() {
        let config = FlaskSessionConfig::default().with_secret_key("wrong-secret");
        let session = SessionCookie::classify(SHA512_COOKIE, &config);

        assert!(!session.is_verified());
        assert!(session.should_clear());
        assert!(session.cookie().is_some());
    }

    #[test]
    fn classify_rejected() {
        let config = FlaskSessionConfig::default().with_secret_key("test-secret");
        assert_eq!(
            SessionCookie::classify("bogus", &config),
            SessionCookie::Rejected
        );

        let config = config.with_max_cookie_bytes(16);
        assert_eq!(
            SessionCookie::classify(SHA512_COOKIE, &config),
            SessionCookie::Rejected
        );
    }

    #[tokio::test]
    async fn missing_cookie_manager_is_a_server_error() {
        let manager = FlaskSessionManager {
            inner: tower::service_fn(|_: Request<()>| async {
                Ok::<_, Infallible>(Response::new(String::from("reached")))
            }),
            config: FlaskSessionConfig::default().with_secret_key("test-secret"),
        };

        let req = Request::builder()
            .body(())
            .expect("request builds successfully");
        let res = manager.oneshot(req).await.expect("service call succeeds");

        assert_eq!(res.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.into_body().is_empty());
    }
}
