//! The older, narrower service API.
//!
//! Kept for call sites written against it. Failures are collapsed into
//! [`GravatarServiceError`]; new code should use [`ProfileService`] and
//! [`ImageService`], which report the full [`Error`] taxonomy.

use std::sync::Arc;

use bytes::Bytes;
use gravatar_common::{normalize_email, GravatarProfile};

use super::{image::ImageService, profile::ProfileService};
use crate::{
    client::http::HttpClient,
    config::Configuration,
    errors::{BuildError, Error, GravatarServiceError},
    global::global_client,
};

/// Legacy profile fetch and image upload.
#[derive(Debug, Clone)]
pub struct GravatarService {
    profiles: ProfileService,
    images: ImageService,
}

impl GravatarService {
    /// A service on the global client and global configuration.
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self::with_client(
            Arc::new(global_client()?),
            Configuration::global(),
        ))
    }

    /// A service on an explicit transport and configuration.
    pub fn with_client(client: Arc<dyn HttpClient>, config: Configuration) -> Self {
        Self {
            profiles: ProfileService::with_client(Arc::clone(&client), config.clone()),
            images: ImageService::with_client(client, config),
        }
    }

    /// Fetch the legacy profile summary of `email`.
    ///
    /// Every failure, including HTTP and decoding errors, is reported as
    /// [`GravatarServiceError::InvalidAccountInfo`].
    pub async fn fetch_profile(&self, email: &str) -> Result<GravatarProfile, GravatarServiceError> {
        if email.is_empty() {
            return Err(GravatarServiceError::InvalidAccountInfo);
        }

        self.profiles
            .fetch_user_profile(&normalize_email(email))
            .await
            .map(GravatarProfile::from)
            .map_err(|err| {
                tracing::debug!("legacy profile fetch failed: {err}");
                GravatarServiceError::InvalidAccountInfo
            })
    }

    /// Upload `image` as the avatar of `account_email`.
    ///
    /// Empty credentials are [`GravatarServiceError::InvalidAccountInfo`];
    /// anything else that goes wrong is [`GravatarServiceError::Unexpected`].
    pub async fn upload_image(
        &self,
        image: Bytes,
        account_email: &str,
        account_token: &str,
    ) -> Result<(), GravatarServiceError> {
        if account_email.is_empty() || account_token.is_empty() {
            return Err(GravatarServiceError::InvalidAccountInfo);
        }

        self.images
            .upload_image(image, account_email, account_token)
            .await
            .map_err(|err| match err {
                Error::InvalidAccountInfo => GravatarServiceError::InvalidAccountInfo,
                Error::Url(_) => GravatarServiceError::InvalidUrl,
                other => GravatarServiceError::Unexpected(other),
            })
    }
}
