//! Middleware layer.
//!
//! Middleware intercepts a request before it reaches routing. Each layer
//! either answers the request itself by returning a [`Response`], or
//! delegates by calling [`Next::run`], which hands the request to the next
//! layer, then to the matched route, then to the router's fallback.
//!
//! ```rust,no_run
//! use dirview::{Request, Router};
//! use dirview::middleware::{DirectoryListing, ListingConfig, Next};
//!
//! # fn build() -> Result<Router, dirview::Error> {
//! let listing = DirectoryListing::new(ListingConfig::new(".")?);
//!
//! let app = Router::new()
//!     .layer(|req: Request, next: Next| async move {
//!         tracing::debug!(path = req.path(), "incoming");
//!         next.run(req).await
//!     })
//!     .layer(listing);
//! # Ok(app)
//! # }
//! ```
//!
//! Built-in middleware:
//! - [`DirectoryListing`]: HTML index pages for directories without an
//!   `index.html`

mod dir_listing;

use std::future::Future;
use std::sync::Arc;

use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;

pub use dir_listing::{DEFAULT_INDEX, DirectoryListing, ListingConfig};

/// A request hook installed with [`Router::layer`].
///
/// Implemented automatically for closures of the shape
/// `Fn(Request, Next) -> impl Future<Output = impl IntoResponse>`;
/// implement it by hand for middleware that carries configuration.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

impl<F, Fut, R> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let fut = (self)(req, next);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// The rest of the handling chain after the current middleware.
///
/// Consumed by [`run`](Next::run): a request is delegated at most once.
pub struct Next {
    router: Arc<Router>,
    index: usize,
}

impl Next {
    pub(crate) fn new(router: Arc<Router>) -> Self {
        Self { router, index: 0 }
    }

    /// Passes `req` on to the remaining middleware, then the router.
    pub async fn run(self, req: Request) -> Response {
        match self.router.middleware.get(self.index) {
            Some(mw) => {
                let mw = Arc::clone(mw);
                let next = Next { router: self.router, index: self.index + 1 };
                mw.handle(req, next).await
            }
            None => self.router.endpoint(req).await,
        }
    }
}
