//! Static file handler: the host side of the listing middleware.
//!
//! Whatever [`DirectoryListing`](crate::middleware::DirectoryListing)
//! delegates ends up here when installed as the router fallback: regular
//! files, directories with an index document, and paths that do not exist.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::error::Error;
use crate::handler::Handler;
use crate::middleware::{DEFAULT_INDEX, ListingConfig};
use crate::path;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Serves files below a fixed root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: Arc<PathBuf>,
    index_file: Arc<str>,
}

impl StaticFiles {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self {
            root: Arc::new(path::canonical_root(root.as_ref())?),
            index_file: Arc::from(DEFAULT_INDEX),
        })
    }

    /// Same root and index document as the listing middleware.
    pub fn from_config(config: &ListingConfig) -> Self {
        Self {
            root: Arc::new(config.root().to_path_buf()),
            index_file: Arc::from(config.index_name()),
        }
    }

    /// Wraps `self` as a router handler.
    pub fn into_handler(self) -> impl Handler {
        move |req: Request| {
            let this = self.clone();
            async move { this.serve(&req).await }
        }
    }

    pub async fn serve(&self, req: &Request) -> Response {
        let Some(decoded) = path::decode(req.path()) else {
            return Response::status(Status::BadRequest);
        };
        let Some(mut resolved) = path::resolve(&self.root, &decoded) else {
            return Response::builder().status(Status::Forbidden).text("Forbidden");
        };

        if tokio::fs::metadata(&resolved).await.is_ok_and(|m| m.is_dir()) {
            resolved.push(&*self.index_file);
        }

        match tokio::fs::read(&resolved).await {
            Ok(bytes) => Response::builder().typed(&content_type(&resolved), bytes),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::IsADirectory) => {
                Response::status(Status::NotFound)
            }
            Err(e) => {
                warn!(path = %resolved.display(), error = %e, "failed to read file");
                Response::status(Status::InternalServerError)
            }
        }
    }
}

/// Content type from the file extension alone; text types are served as UTF-8.
fn content_type(path: &Path) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() == mime_guess::mime::TEXT {
        format!("{}; charset=utf-8", mime.essence_str())
    } else {
        mime.essence_str().to_owned()
    }
}
