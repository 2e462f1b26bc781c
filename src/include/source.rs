// src/include/source.rs
// =============================================================================
// Where fragment markup comes from.
//
// The loader only knows "give me the text at this absolute path". Two
// implementations:
// - HttpSource: GET against a site (the page's own origin, usually)
// - DirSource: read from a directory on disk (assembling a static site)
// =============================================================================

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};

/// Fetches the text at an absolute site path such as `/components/header.html`.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    async fn fetch(&self, resolved_path: &str) -> Result<String>;
}

/// Fetches fragments over HTTP from one site.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    /// `base` supplies scheme, host and port; resolved paths replace its path.
    /// With `timeout` set, a request that takes longer fails instead of
    /// leaving its element untouched forever.
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().redirect(reqwest::redirect::Policy::limited(5));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    /// Fetches a full URL (used for the page itself in URL mode).
    pub async fn fetch_url(&self, url: Url) -> Result<String> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl FragmentSource for HttpSource {
    async fn fetch(&self, resolved_path: &str) -> Result<String> {
        // resolved_path is absolute, so only the origin of `base` survives
        let url = self.base.join(resolved_path)?;
        self.fetch_url(url).await
    }
}

/// Serves fragments from a directory; `/a/b.html` is `<root>/a/b.html`.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, resolved_path: &str) -> Result<PathBuf> {
        // Query strings and anchors mean nothing on disk
        let path = resolved_path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_start_matches('/');

        let relative = Path::new(path);
        // Absolute declared paths skip resolution, so they may still
        // contain ".."; never let them leave the root
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || path.is_empty() {
            return Err(ClientError::InvalidPath {
                path: resolved_path.to_string(),
            });
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FragmentSource for DirSource {
    async fn fetch(&self, resolved_path: &str) -> Result<String> {
        let file = self.file_path(resolved_path)?;
        debug!(file = %file.display(), "reading fragment");
        Ok(tokio::fs::read_to_string(&file).await?)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - It lets traits have async methods that work behind `dyn`
//    - The method returns a boxed future under the hood
//
// 2. Why is FragmentSource Send + Sync?
//    - A source may be shared between tasks (reqwest's Client is)
//    - The page is single-threaded, but the fetching does not have to be
//
// 3. What does Url::join do with an absolute path?
//    - "http://host/shop/index.html".join("/a.html") is "http://host/a.html"
//    - The scheme, host and port stay; the path is replaced
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_dir_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("components")).unwrap();
        std::fs::write(dir.path().join("components/header.html"), "<nav>Home</nav>").unwrap();

        let source = DirSource::new(dir.path());
        let markup = source.fetch("/components/header.html?v=2").await.unwrap();
        assert_eq!(markup, "<nav>Home</nav>");
    }

    #[tokio::test]
    async fn test_dir_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path());
        assert!(matches!(
            source.fetch("/nope.html").await,
            Err(ClientError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_dir_source_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path());
        for path in ["/../secret.html", "/a/../../secret.html", "/"] {
            assert!(matches!(
                source.fetch(path).await,
                Err(ClientError::InvalidPath { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_http_source_joins_onto_origin() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/components/footer.html");
                then.status(200).body("<small>footer</small>");
            })
            .await;

        // The page path of the base is replaced by the resolved path
        let base = Url::parse(&server.url("/shop/index.html")).unwrap();
        let source = HttpSource::new(base, Some(Duration::from_secs(5))).unwrap();
        let markup = source.fetch("/components/footer.html").await.unwrap();

        mock.assert_async().await;
        assert_eq!(markup, "<small>footer</small>");
    }

    #[tokio::test]
    async fn test_http_source_not_found_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing.html");
                then.status(404);
            })
            .await;

        let base = Url::parse(&server.base_url()).unwrap();
        let source = HttpSource::new(base, None).unwrap();
        let err = source.fetch("/missing.html").await.unwrap_err();
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[tokio::test]
    async fn test_http_source_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow.html");
                then.status(200)
                    .body("late")
                    .delay(Duration::from_millis(500));
            })
            .await;

        let base = Url::parse(&server.base_url()).unwrap();
        let source = HttpSource::new(base, Some(Duration::from_millis(50))).unwrap();
        match source.fetch("/slow.html").await {
            Err(ClientError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {:?}", other),
        }
    }
}
