//! Directory listing middleware.
//!
//! For every request the middleware walks one decision tree:
//!
//! | Request path resolves to                  | Outcome                          |
//! |-------------------------------------------|----------------------------------|
//! | somewhere outside the serving root        | `403 Forbidden`                  |
//! | nothing, or a regular file                | delegate to [`Next`]             |
//! | a directory holding the index document    | delegate to [`Next`]             |
//! | any other directory                       | `200` HTML listing               |
//! | a directory that cannot be enumerated     | `500 Internal Server Error`      |
//!
//! The filesystem is read fresh on every request; there is no cache.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error};

use crate::error::{Error, ListingError};
use crate::handler::BoxFuture;
use crate::listing::{self, Listing};
use crate::path;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

use super::{Middleware, Next};

/// Document whose presence hands a directory back to the host server.
pub const DEFAULT_INDEX: &str = "index.html";

/// Settings for [`DirectoryListing`], fixed for the middleware's lifetime.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    root: PathBuf,
    index_file: String,
}

impl ListingConfig {
    /// Serves `root`, which is canonicalized now and must be a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self {
            root: path::canonical_root(root.as_ref())?,
            index_file: DEFAULT_INDEX.to_owned(),
        })
    }

    /// Replaces the index document name (default `index.html`).
    pub fn index_file(mut self, name: impl Into<String>) -> Self {
        self.index_file = name.into();
        self
    }

    pub fn root(&self) -> &Path { &self.root }
    pub fn index_name(&self) -> &str { &self.index_file }
}

/// Renders HTML listings for directories that have no index document.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    config: Arc<ListingConfig>,
}

enum Outcome {
    Delegate,
    Forbidden,
    Listed(Listing),
    Failed(ListingError),
}

impl DirectoryListing {
    pub fn new(config: ListingConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    pub fn config(&self) -> &ListingConfig { &self.config }

    async fn decide(&self, raw_path: &str) -> Outcome {
        let Some(decoded) = path::decode(raw_path) else {
            debug!(path = raw_path, "path is not valid UTF-8 once decoded, delegating");
            return Outcome::Delegate;
        };
        let Some(resolved) = path::resolve(&self.config.root, &decoded) else {
            debug!(path = %decoded, "rejected path outside serving root");
            return Outcome::Forbidden;
        };

        let Ok(meta) = tokio::fs::metadata(&resolved).await else {
            return Outcome::Delegate;
        };
        if !meta.is_dir() {
            return Outcome::Delegate;
        }
        let index = resolved.join(&self.config.index_file);
        if tokio::fs::try_exists(&index).await.unwrap_or(false) {
            return Outcome::Delegate;
        }

        match Listing::read(&resolved, &decoded).await {
            Ok(listing) => Outcome::Listed(listing),
            Err(e) => Outcome::Failed(e),
        }
    }
}

impl Middleware for DirectoryListing {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let this = self.clone();
        Box::pin(async move {
            match this.decide(req.path()).await {
                Outcome::Delegate => next.run(req).await,
                Outcome::Forbidden => Response::builder()
                    .status(Status::Forbidden)
                    .text("Forbidden"),
                Outcome::Listed(page) => {
                    debug!(path = %page.path, entries = page.rows.len(), "rendered directory listing");
                    Response::html(listing::render(&page))
                }
                Outcome::Failed(e) => {
                    error!(error = %e, cause = %e.io_error(), "directory listing failed");
                    Response::builder()
                        .status(Status::InternalServerError)
                        .text("Internal Server Error")
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::router::Router;

    const PASSTHROUGH: &str = "passed through";

    async fn passthrough(_req: Request) -> Response {
        Response::builder().status(Status::NotFound).text(PASSTHROUGH)
    }

    /// ```text
    /// root/
    ///   b.txt      (5 bytes)
    ///   a.txt      (0 bytes)
    ///   a/
    ///     x.md
    ///   c/
    ///   app/
    ///     index.html
    /// ```
    fn build_tree() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("b.txt"), "hello").unwrap();
        fs::write(root.join("a.txt"), "").unwrap();
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("a/x.md"), "# x").unwrap();
        fs::create_dir(root.join("c")).unwrap();
        fs::create_dir(root.join("app")).unwrap();
        fs::write(root.join("app/index.html"), "<html></html>").unwrap();
        dir
    }

    async fn request(root: &Path, uri: &str) -> Response {
        let router = Router::new()
            .layer(DirectoryListing::new(ListingConfig::new(root).unwrap()))
            .fallback(passthrough);
        Next::new(Arc::new(router)).run(Request::get(uri)).await
    }

    fn body(res: &Response) -> &str {
        std::str::from_utf8(res.body()).unwrap()
    }

    fn is_passthrough(res: &Response) -> bool {
        res.body() == PASSTHROUGH.as_bytes()
    }

    #[tokio::test]
    async fn traversal_is_forbidden() {
        let dir = build_tree();
        for uri in ["/../../etc/passwd", "/a/../../..", "/%2e%2e/%2e%2e/etc"] {
            let res = request(dir.path(), uri).await;
            assert_eq!(res.status_code(), 403, "{uri}");
            assert_eq!(body(&res), "Forbidden");
        }
    }

    #[tokio::test]
    async fn files_and_missing_paths_delegate() {
        let dir = build_tree();
        assert!(is_passthrough(&request(dir.path(), "/b.txt").await));
        assert!(is_passthrough(&request(dir.path(), "/a/x.md").await));
        assert!(is_passthrough(&request(dir.path(), "/nope/").await));
    }

    #[tokio::test]
    async fn directory_with_index_delegates() {
        let dir = build_tree();
        assert!(is_passthrough(&request(dir.path(), "/app/").await));
        assert!(is_passthrough(&request(dir.path(), "/app").await));
    }

    #[tokio::test]
    async fn custom_index_file_name() {
        let dir = build_tree();
        let router = Router::new()
            .layer(DirectoryListing::new(
                ListingConfig::new(dir.path()).unwrap().index_file("x.md"),
            ))
            .fallback(passthrough);
        let router = Arc::new(router);

        let res = Next::new(Arc::clone(&router)).run(Request::get("/a/")).await;
        assert!(is_passthrough(&res));
        let res = Next::new(router).run(Request::get("/app/")).await;
        assert_eq!(res.status_code(), 200);
    }

    #[tokio::test]
    async fn root_listing_orders_directories_first() {
        let dir = build_tree();
        let res = request(dir.path(), "/").await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("content-type"), Some("text/html;charset=utf-8"));

        let html = body(&res);
        let positions: Vec<_> = [r#"href="/a/""#, r#"href="/app/""#, r#"href="/c/""#, r#"href="/a.txt""#, r#"href="/b.txt""#]
            .iter()
            .map(|needle| html.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");

        // Five children, no parent row at the root.
        assert_eq!(html.matches(r#"class="file-item "#).count(), 5);
        assert!(html.contains("0 B"));
        assert!(html.contains("5 B"));
    }

    #[tokio::test]
    async fn nested_listing_has_parent_row_and_breadcrumbs() {
        let dir = build_tree();
        let res = request(dir.path(), "/a/").await;
        assert_eq!(res.status_code(), 200);

        let html = body(&res);
        assert!(html.contains(r#"<a href="/" class="file-item parent-dir">"#));
        assert!(html.contains(r#"<a href="/a">a</a>"#));
        assert!(html.contains(r#"href="/a/x.md""#));
        assert_eq!(html.matches(r#"class="file-item "#).count(), 2);
    }

    #[tokio::test]
    async fn percent_encoded_directory_names_resolve() {
        let dir = build_tree();
        fs::create_dir(dir.path().join("my docs")).unwrap();
        let res = request(dir.path(), "/my%20docs/").await;
        assert_eq!(res.status_code(), 200);
        assert!(body(&res).contains("Empty directory"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_child_is_a_500_without_partial_body() {
        let dir = build_tree();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("c/broken")).unwrap();

        let res = request(dir.path(), "/c/").await;
        assert_eq!(res.status_code(), 500);
        assert_eq!(body(&res), "Internal Server Error");
    }
}
