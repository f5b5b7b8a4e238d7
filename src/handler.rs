//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of *different* types (route handlers, the
//! fallback) behind one interface, so each one is erased to
//! `dyn ErasedHandler`:
//!
//! ```text
//! async fn ping(req: Request) -> Response { … }    ← user writes this
//!        ↓ router.on(Method::Get, "/ping", ping)
//! ping.into_boxed_handler()                        ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(ping))                        ← stored as BoxedHandler
//!        ↓
//! handler.call(req) at request time                ← one vtable dispatch
//! ```
//!
//! Per request that costs one `Arc` clone and one virtual call, which is
//! noise next to the filesystem reads a listing does.
//!
//! [`Middleware`](crate::middleware::Middleware) is erased the same way.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// Pinned because the runtime polls it in place; `Send + 'static` so tokio
/// can move it between worker threads. Also the return type of
/// [`Middleware::handle`](crate::middleware::Middleware::handle).
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)`: it appears in the return
/// type of the public `Handler::into_boxed_handler`.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route or fallback handler.
///
/// Automatically satisfied for any function or closure with the shape:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// `Sealed` is private, so other crates cannot name it and cannot implement
/// `Handler` for their own types.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds a concrete handler `F` and implements [`ErasedHandler`] for it.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        // The concrete future is mapped through `IntoResponse` and boxed so
        // every handler returns the same type.
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
