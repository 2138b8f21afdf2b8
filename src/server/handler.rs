// src/server/handler.rs
// Fixture endpoints used to exercise the health checks:
//   /healthz  -> 200
//   /healthz2 -> 301 (no Location header)
//   /healthz3 -> 200 after `slow_delay`
use hyper::{Body, Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::time::Duration;
use tokio::time::sleep;
use tower::Service;

pub const DEFAULT_SLOW_DELAY: Duration = Duration::from_secs(3);

#[derive(Clone, Debug)]
pub struct FixtureHandler {
    slow_delay: Duration,
}

impl Default for FixtureHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureHandler {
    pub fn new() -> Self {
        Self {
            slow_delay: DEFAULT_SLOW_DELAY,
        }
    }

    pub fn with_slow_delay(mut self, delay: Duration) -> Self {
        self.slow_delay = delay;
        self
    }

    pub async fn handle(&self, req: Request<Body>) -> Response<Body> {
        if *req.method() != Method::GET && *req.method() != Method::HEAD {
            return plain(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
        }

        match req.uri().path() {
            "/healthz" => plain(StatusCode::OK, "healthy"),
            "/healthz2" => plain(StatusCode::MOVED_PERMANENTLY, "healthy"),
            "/healthz3" => {
                sleep(self.slow_delay).await;
                plain(StatusCode::OK, "healthy")
            }
            _ => plain(StatusCode::NOT_FOUND, "not found"),
        }
    }
}

fn plain(status: StatusCode, body: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
}

impl Service<Request<Body>> for FixtureHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let handler = self.clone();
        Box::pin(async move {
            tracing::debug!(method = %req.method(), path = %req.uri().path(), "fixture request");
            Ok(handler.handle(req).await)
        })
    }
}
