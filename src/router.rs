//! Radix-tree request router with a middleware stack and a fallback.
//!
//! One tree per HTTP method. O(path-length) lookup. A request runs through
//! every layer first; whatever the layers delegate is matched against the
//! routes, and whatever no route claims goes to the fallback.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{BoxedMiddleware, Middleware};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Every builder method returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    pub(crate) middleware: Vec<BoxedMiddleware>,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), middleware: Vec::new(), fallback: None }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use dirview::{Method, Request, Response, Router};
    /// # async fn ping(_: Request) -> Response { Response::text("pong") }
    /// Router::new().on(Method::Get, "/__dirview/{probe}", ping);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or collides with an
    /// existing one. Routes are fixed at startup, so this is a programming
    /// error rather than a runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Append a middleware layer. Layers run in registration order.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Handler for requests no route matches. Without one they get `404`.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// The end of the chain: matched route, then fallback, then 404.
    pub(crate) async fn endpoint(&self, mut req: Request) -> Response {
        let routed = Method::try_from(&req.method)
            .ok()
            .and_then(|method| self.lookup(method, &req.path));

        if let Some((handler, params)) = routed {
            req.params = params;
            return handler.call(req).await;
        }
        match &self.fallback {
            Some(fallback) => fallback.call(req).await,
            None => Response::status(Status::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
