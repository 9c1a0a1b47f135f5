use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::HeaderMap, Method, StatusCode};
use url::Url;

use crate::errors::RequestError;

/// An outgoing HTTP request.
///
/// Plain value: building or transforming it never touches the network. See
/// the `with_*` builders for authorization and content negotiation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Optional request body. Uploads pass their payload separately.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// A request with no headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// `GET url`.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// `POST url`.
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }
}

/// Metadata of a received HTTP response. The body travels next to it.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL, after redirects.
    pub url: Url,
}

impl HttpResponse {
    /// A response with no headers.
    pub fn new(status: StatusCode, url: Url) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            url,
        }
    }
}

/// Abstract interface for the transport.
///
/// Exactly two operations, both returning the body and response metadata of a
/// validated exchange. Implementations must:
/// - wrap connection/timeout/cancellation failures as [`RequestError::Transport`]
///   (or [`RequestError::Cancelled`]);
/// - run the received response through [`validate_response`].
///
/// [`crate::GravatarHttpClient`] is the reqwest implementation; tests and
/// embedders can substitute their own.
#[async_trait]
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Perform `request` and return its body.
    async fn fetch(&self, request: HttpRequest) -> Result<(Bytes, HttpResponse), RequestError>;

    /// Perform `request` with `payload` as the body.
    async fn upload(
        &self,
        request: HttpRequest,
        payload: Bytes,
    ) -> Result<(Bytes, HttpResponse), RequestError>;
}

/// Validate a completed exchange.
///
/// - A status outside `100..=599` is not a well-formed HTTP response:
///   [`RequestError::MalformedResponse`].
/// - A status in `400..=599` is [`RequestError::Status`], carrying the body.
/// - Everything else is returned unchanged.
pub fn validate_response(
    body: Bytes,
    response: HttpResponse,
) -> Result<(Bytes, HttpResponse), RequestError> {
    let code = response.status.as_u16();
    if !(100..600).contains(&code) {
        return Err(RequestError::MalformedResponse {
            message: format!("unexpected status code {code} from {}", response.url),
        });
    }
    if is_error_status(response.status) {
        tracing::debug!(status = %response.status, url = %response.url, "HTTP error status");
        return Err(RequestError::Status {
            status: response.status,
            body,
        });
    }
    Ok((body, response))
}

fn is_error_status(status: StatusCode) -> bool {
    (400..600).contains(&status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(code: u16) -> HttpResponse {
        HttpResponse::new(
            StatusCode::from_u16(code).unwrap(),
            Url::parse("https://api.gravatar.com/v3/profiles/x").unwrap(),
        )
    }

    #[test]
    fn success_passes_through() {
        let (body, meta) = validate_response(Bytes::from_static(b"ok"), response(200)).unwrap();
        assert_eq!(body, Bytes::from_static(b"ok"));
        assert_eq!(meta.status, StatusCode::OK);

        validate_response(Bytes::new(), response(304)).unwrap();
    }

    #[test]
    fn error_statuses_keep_the_body() {
        for code in [400, 401, 404, 429, 500, 599] {
            let err = validate_response(Bytes::from_static(b"oops"), response(code)).unwrap_err();
            match err {
                RequestError::Status { status, body } => {
                    assert_eq!(status.as_u16(), code);
                    assert_eq!(body, Bytes::from_static(b"oops"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn out_of_range_status_is_malformed() {
        for code in [600, 799, 999] {
            assert!(matches!(
                validate_response(Bytes::new(), response(code)),
                Err(RequestError::MalformedResponse { .. })
            ));
        }
    }
}
