//! Avatar image upload and download.

use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use gravatar_common::{normalize_email, AvatarUrl, ImageQueryOptions, ProfileIdentifier};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use super::endpoint;
use crate::{
    client::http::{HttpClient, HttpRequest},
    config::Configuration,
    errors::{BuildError, Error, Result},
    global::global_client,
};

const UPLOAD_FILE_NAME: &str = "profile.png";
const UPLOAD_CONTENT_TYPE: &str = "image/png";

/// A downloaded avatar image. The bytes are not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDownloadResult {
    /// Raw image bytes.
    pub bytes: Bytes,
    /// URL the image was finally served from.
    pub url: Url,
    /// `Content-Type` of the response, if any.
    pub content_type: Option<String>,
}

/// Uploads and downloads avatar images.
#[derive(Debug, Clone)]
pub struct ImageService {
    client: Arc<dyn HttpClient>,
    config: Configuration,
}

impl ImageService {
    /// A service on the global client and global configuration.
    pub fn new() -> std::result::Result<Self, BuildError> {
        Ok(Self::with_client(
            Arc::new(global_client()?),
            Configuration::global(),
        ))
    }

    /// A service on an explicit transport and configuration.
    pub fn with_client(client: Arc<dyn HttpClient>, config: Configuration) -> Self {
        Self { client, config }
    }

    /// Upload `image` (PNG) as a new avatar of `email`, authorized by `token`.
    ///
    /// An empty email or token fails with [`Error::InvalidAccountInfo`]
    /// without sending anything.
    pub async fn upload_image(&self, image: Bytes, email: &str, token: &str) -> Result<()> {
        let account = normalize_email(email);
        if account.is_empty() || token.is_empty() {
            return Err(Error::InvalidAccountInfo);
        }

        let url = endpoint(self.config.api_base(), ["v1", "upload-image"])?;
        let boundary = format!("Boundary-{}", uuid::Uuid::new_v4().simple());
        let payload = multipart_body(&boundary, &account, &image);

        let request = HttpRequest::post(url)
            .with_authorization(token)?
            .with_header(
                CONTENT_TYPE,
                &format!("multipart/form-data; boundary={boundary}"),
            )?;

        tracing::debug!(bytes = image.len(), "uploading avatar image");
        self.client.upload(request, payload).await?;
        Ok(())
    }

    /// Download the avatar of `email`, resolved against the configured avatar base.
    pub async fn fetch_image(
        &self,
        email: &str,
        options: &ImageQueryOptions,
    ) -> Result<ImageDownloadResult> {
        let identifier = ProfileIdentifier::email(email);
        let url = AvatarUrl::resolved_with_base(self.config.avatar_base(), &identifier, options)?;
        self.fetch_image_url(&url).await
    }

    /// Download the image at `url`.
    pub async fn fetch_image_url(&self, url: &Url) -> Result<ImageDownloadResult> {
        let (bytes, response) = self.client.fetch(HttpRequest::get(url.clone())).await?;
        let content_type = response
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(ImageDownloadResult {
            bytes,
            url: response.url,
            content_type,
        })
    }
}

fn multipart_body(boundary: &str, account: &str, image: &[u8]) -> Bytes {
    let mut body = BytesMut::with_capacity(image.len() + 512);

    body.put_slice(format!("--{boundary}\r\n").as_bytes());
    body.put_slice(b"Content-Disposition: form-data; name=\"account\"\r\n\r\n");
    body.put_slice(account.as_bytes());
    body.put_slice(b"\r\n");

    body.put_slice(format!("--{boundary}\r\n").as_bytes());
    body.put_slice(
        format!(
            "Content-Disposition: form-data; name=\"filedata\"; filename=\"{UPLOAD_FILE_NAME}\"\r\n"
        )
        .as_bytes(),
    );
    body.put_slice(format!("Content-Type: {UPLOAD_CONTENT_TYPE}\r\n\r\n").as_bytes());
    body.put_slice(image);
    body.put_slice(b"\r\n");

    body.put_slice(format!("--{boundary}--\r\n").as_bytes());
    body.freeze()
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;
    use reqwest::Method;

    use super::*;
    use crate::client::mock::MockHttpClient;

    fn service(mock: MockHttpClient) -> (ImageService, Arc<MockHttpClient>) {
        let mock = Arc::new(mock);
        (
            ImageService::with_client(Arc::clone(&mock) as Arc<dyn HttpClient>, Configuration::default()),
            mock,
        )
    }

    #[tokio::test]
    async fn empty_credentials_fail_fast() {
        let (service, mock) = service(MockHttpClient::new());
        let image = Bytes::from_static(b"\x89PNG");

        for (email, token) in [("", "token"), ("  ", "token"), ("a@b.com", "")] {
            let err = service
                .upload_image(image.clone(), email, token)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::InvalidAccountInfo));
        }
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn upload_sends_multipart() {
        let (service, mock) = service(MockHttpClient::new().with_body(200, ""));

        service
            .upload_image(Bytes::from_static(b"\x89PNGDATA"), " Some@Email.com ", "token")
            .await
            .unwrap();

        let call = mock.last_call();
        assert_eq!(call.request.method, Method::POST);
        assert_eq!(
            call.request.url.as_str(),
            "https://api.gravatar.com/v1/upload-image"
        );
        assert_eq!(call.request.headers[AUTHORIZATION], "Bearer token");

        let content_type = call.request.headers[CONTENT_TYPE].to_str().unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();

        let payload = call.payload.unwrap();
        let text = String::from_utf8_lossy(&payload);
        assert!(text.starts_with(&format!("--{boundary}\r\n")));
        assert!(text.contains("name=\"account\"\r\n\r\nsome@email.com\r\n"));
        assert!(text.contains("name=\"filedata\"; filename=\"profile.png\""));
        assert!(text.contains("Content-Type: image/png\r\n\r\n\u{FFFD}PNGDATA\r\n"));
        assert!(text.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[tokio::test]
    async fn upload_failure_is_surfaced() {
        let (service, _) = service(MockHttpClient::new().with_body(401, "unauthorized"));

        let err = service
            .upload_image(Bytes::from_static(b"png"), "a@b.com", "token")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn fetch_image_resolves_the_avatar_url() {
        let (service, mock) = service(MockHttpClient::new().with_body(200, &b"img"[..]));

        let result = service
            .fetch_image("some@email.com", &ImageQueryOptions::new().size(80))
            .await
            .unwrap();
        assert_eq!(result.bytes, Bytes::from_static(b"img"));
        assert_eq!(result.content_type, None);

        assert_eq!(
            mock.last_call().request.url.as_str(),
            "https://gravatar.com/avatar/676212ff796c79a3c06261eb10e3f455aa93998ee6e45263da13679c74b1e674?s=80"
        );
    }

    #[tokio::test]
    async fn fetch_image_reports_an_unusable_avatar_base() {
        let mock = Arc::new(MockHttpClient::new());
        let config = Configuration::builder()
            .avatar_base(Url::parse("mailto:avatars@example.com").unwrap())
            .build();
        let service = ImageService::with_client(Arc::clone(&mock) as Arc<dyn HttpClient>, config);

        let err = service
            .fetch_image("some@email.com", &ImageQueryOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase)
        ));
        assert!(mock.calls().is_empty());
    }
}
