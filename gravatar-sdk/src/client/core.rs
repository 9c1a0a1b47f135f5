use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::http::{validate_response, HttpClient, HttpRequest, HttpResponse};
use crate::errors::{BuildError, RequestError};

const DEFAULT_USER_AGENT: &str = concat!("gravatar-rs", "@", env!("CARGO_PKG_VERSION"),);

#[derive(Debug, Clone, Default)]
#[must_use]
/// Configures a [`GravatarHttpClient`] before construction.
///
/// # Defaults
/// - HTTP request timeout: reqwest default (no global timeout) unless set via
///   [`Self::request_timeout`]
/// - User-agent: `gravatar-rs@<crate-version>` plus any [`Self::user_agent_extra`]
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// # use gravatar::GravatarHttpClient;
/// let client = GravatarHttpClient::builder()
///     .request_timeout(Duration::from_secs(10))
///     .user_agent_extra("myapp/1.2.3")
///     .build()?;
/// # Ok::<_, gravatar::BuildError>(())
/// ```
pub struct GravatarHttpClientBuilder {
    http_request_timeout: Option<Duration>,

    /// Optional user-agent segment appended to the default UA for app-level telemetry.
    user_agent_extra: Option<String>,
}

impl GravatarHttpClientBuilder {
    /// Set HTTP requests timeout.
    pub fn request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.http_request_timeout = Some(timeout);

        self
    }

    /// Append an extra user-agent segment after the default `gravatar-rs@<version>`.
    /// Example: `.user_agent_extra("myapp/1.2.3")`
    pub fn user_agent_extra<S: Into<String>>(&mut self, extra: S) -> &mut Self {
        self.user_agent_extra = Some(extra.into());
        self
    }

    /// Build [GravatarHttpClient]
    pub fn build(&self) -> Result<GravatarHttpClient, BuildError> {
        // Compose user agent with optional extra part.
        let user_agent = match &self.user_agent_extra {
            Some(extra) if !extra.trim().is_empty() => {
                format!("{DEFAULT_USER_AGENT} {}", extra.trim())
            }
            _ => DEFAULT_USER_AGENT.to_string(),
        };

        let mut http_builder = reqwest::Client::builder().user_agent(user_agent);

        if let Some(timeout) = self.http_request_timeout {
            http_builder = http_builder.timeout(timeout);
        }

        Ok(GravatarHttpClient {
            http: http_builder.build()?,
        })
    }
}

/// reqwest-backed [`HttpClient`].
///
/// Stateless across requests: every call is independent, and clones share the
/// same connection pool. Safe to use from any number of tasks at once.
///
/// ### Examples
/// ```no_run
/// # use gravatar::{GravatarHttpClient, HttpClient, HttpRequest, Result};
/// # async fn run() -> Result<()> {
/// let client = GravatarHttpClient::new()?;
/// let url = url::Url::parse("https://gravatar.com/avatar/abc")?;
/// let (bytes, response) = client.fetch(HttpRequest::get(url)).await?;
/// assert!(response.status.is_success());
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct GravatarHttpClient {
    pub(crate) http: reqwest::Client,
}

impl GravatarHttpClient {
    /// Creates a client with default settings.
    pub fn new() -> Result<GravatarHttpClient, BuildError> {
        Self::builder().build()
    }

    /// Returns a builder to edit settings before creating [`GravatarHttpClient`].
    pub fn builder() -> GravatarHttpClientBuilder {
        GravatarHttpClientBuilder::default()
    }

    async fn send(
        &self,
        request: HttpRequest,
        payload: Option<Bytes>,
    ) -> Result<(Bytes, HttpResponse), RequestError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut rb = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = payload.or(request.body) {
            rb = rb.body(body);
        }

        let response = rb.send().await.map_err(|e| {
            tracing::debug!("transport failure: {e}");
            RequestError::from(e)
        })?;

        let meta = HttpResponse {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        };
        let body = response.bytes().await?;

        validate_response(body, meta)
    }
}

#[async_trait]
impl HttpClient for GravatarHttpClient {
    async fn fetch(&self, request: HttpRequest) -> Result<(Bytes, HttpResponse), RequestError> {
        self.send(request, None).await
    }

    async fn upload(
        &self,
        request: HttpRequest,
        payload: Bytes,
    ) -> Result<(Bytes, HttpResponse), RequestError> {
        self.send(request, Some(payload)).await
    }
}

#[cfg(test)]
mod test {
    use httpmock::prelude::*;
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn fetch_returns_body_and_metadata() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/hello").header("x-test", "1");
                then.status(200).header("content-type", "text/plain").body("hi");
            })
            .await;

        let client = GravatarHttpClient::new().unwrap();
        let mut request = HttpRequest::get(Url::parse(&server.url("/hello")).unwrap());
        request
            .headers
            .insert("x-test", reqwest::header::HeaderValue::from_static("1"));

        let (body, response) = client.fetch(request).await.unwrap();
        mock.assert_async().await;
        assert_eq!(body, Bytes::from_static(b"hi"));
        assert_eq!(response.status, 200);
        assert_eq!(response.headers["content-type"], "text/plain");
    }

    #[tokio::test]
    async fn upload_sends_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/upload").body("payload");
                then.status(201);
            })
            .await;

        let client = GravatarHttpClient::new().unwrap();
        let request = HttpRequest::post(Url::parse(&server.url("/upload")).unwrap());
        let (_, response) = client
            .upload(request, Bytes::from_static(b"payload"))
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn server_error_is_a_status_error_with_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).body("{\"error\":\"Profile not found\"}");
            })
            .await;

        let client = GravatarHttpClient::new().unwrap();
        let err = client
            .fetch(HttpRequest::get(
                Url::parse(&server.url("/missing")).unwrap(),
            ))
            .await
            .unwrap_err();

        match err {
            RequestError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, Bytes::from_static(b"{\"error\":\"Profile not found\"}"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        // Port 9 (discard) on localhost is not listening in test environments.
        let client = GravatarHttpClient::builder()
            .request_timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let err = client
            .fetch(HttpRequest::get(Url::parse("http://127.0.0.1:9/").unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }

    #[tokio::test]
    async fn user_agent_extra_is_appended() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/ua")
                    .header("user-agent", format!("{DEFAULT_USER_AGENT} myapp/1.0"));
                then.status(204);
            })
            .await;

        let client = GravatarHttpClient::builder()
            .user_agent_extra(" myapp/1.0 ")
            .build()
            .unwrap();
        client
            .fetch(HttpRequest::get(Url::parse(&server.url("/ua")).unwrap()))
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
