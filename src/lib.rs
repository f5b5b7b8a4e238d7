//! # dirview
//!
//! Directory listings for a development file server.
//!
//! A request for a directory that has no `index.html` gets a styled HTML
//! page listing the directory's children, with breadcrumb navigation back
//! to the root. Everything else (files, directories with an index, missing
//! paths) is handed on untouched to whatever serves files behind it.
//!
//! The listing is a [`Middleware`](middleware::Middleware) on a small
//! hyper-based host:
//!
//! - Radix-tree routing via [`matchit`], plus a middleware stack and a
//!   fallback handler
//! - Async I/O on tokio, HTTP/1.1 and HTTP/2 through hyper-util
//! - Graceful shutdown on SIGTERM / Ctrl-C
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use dirview::middleware::{DirectoryListing, ListingConfig};
//! use dirview::{Router, Server, StaticFiles};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dirview::Error> {
//!     let config = ListingConfig::new(".")?;
//!
//!     let app = Router::new()
//!         .fallback(StaticFiles::from_config(&config).into_handler())
//!         .layer(DirectoryListing::new(config));
//!
//!     Server::bind("127.0.0.1:5173").serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod path;
mod request;
mod response;
mod router;
mod server;
mod static_files;
mod status;

pub mod listing;
pub mod middleware;

pub use error::{Error, ListingError};
pub use handler::{BoxFuture, Handler};
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use static_files::StaticFiles;
pub use status::Status;
