//! Profile and avatar-gallery endpoints.

use std::sync::Arc;

use gravatar_common::{
    de::decode_json, hash_email, normalize_email, Avatar, Profile, ProfileIdentifier,
    ProfileIdentity, UserProfile,
};
use serde::Serialize;

use super::endpoint;
use crate::{
    client::http::{HttpClient, HttpRequest},
    config::Configuration,
    errors::{BuildError, Error, Result},
    global::global_client,
    session::SessionStore,
};

#[derive(Serialize)]
struct SelectAvatarBody<'a> {
    avatar_id: &'a str,
}

/// Fetches profiles and manages a user's avatar gallery.
///
/// Unauthenticated [`ProfileService::fetch`] calls return the public subset of
/// a profile. Configure an API key (see [`Configuration`]) to get the rest.
///
/// ```no_run
/// # use gravatar::{ProfileIdentifier, ProfileService};
/// # async fn run() -> gravatar::Result<()> {
/// let service = ProfileService::new()?;
/// let profile = service.fetch(&ProfileIdentifier::email("someone@example.com")).await?;
/// println!("{}", profile.display_name);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct ProfileService {
    client: Arc<dyn HttpClient>,
    config: Configuration,
}

impl ProfileService {
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

    /// The configuration this service was built with.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// `GET <api>/v3/profiles/<id>`, authorized with the API key when one is configured.
    pub async fn fetch(&self, identifier: &ProfileIdentifier) -> Result<Profile> {
        let url = endpoint(
            self.config.api_base(),
            ["v3", "profiles", identifier.id()],
        )?;
        let request = HttpRequest::get(url)
            .accepting_json()?
            .with_api_key_if_configured(&self.config)?;

        tracing::debug!(%identifier, "fetching profile");
        let (body, _) = self.client.fetch(request).await?;
        Ok(Profile::from_json(&body)?)
    }

    /// `GET <api>/v3/me/avatars?selected_email=<id>`: the avatars of the
    /// authenticated user, flagged with the one selected for `identifier`.
    pub async fn fetch_avatars(
        &self,
        token: &str,
        identifier: &ProfileIdentifier,
    ) -> Result<Vec<Avatar>> {
        let mut url = endpoint(self.config.api_base(), ["v3", "me", "avatars"])?;
        url.query_pairs_mut()
            .append_pair("selected_email", identifier.id());
        let request = HttpRequest::get(url)
            .accepting_json()?
            .with_authorization(token)?;

        let (body, _) = self.client.fetch(request).await?;
        let avatars: Vec<Avatar> = decode_json(&body)?;
        tracing::debug!(%identifier, count = avatars.len(), "fetched avatars");
        Ok(avatars)
    }

    /// [`Self::fetch_avatars`] with the token kept in `sessions` for `email`.
    ///
    /// Fails with [`Error::InvalidAccountInfo`] before any request when there
    /// is no session for `email`.
    pub async fn fetch_avatars_with_session(
        &self,
        sessions: &dyn SessionStore,
        email: &str,
    ) -> Result<Vec<Avatar>> {
        let token = sessions.retrieve_access_token(email)?;
        self.fetch_avatars(&token, &ProfileIdentifier::email(email))
            .await
    }

    /// `POST <api>/v3/me/identities/<id>/avatar`: make `avatar_id` the avatar of `identifier`.
    pub async fn select_avatar(
        &self,
        token: &str,
        identifier: &ProfileIdentifier,
        avatar_id: &str,
    ) -> Result<ProfileIdentity> {
        let url = endpoint(
            self.config.api_base(),
            ["v3", "me", "identities", identifier.id(), "avatar"],
        )?;
        let request = HttpRequest::post(url)
            .accepting_json()?
            .with_authorization(token)?
            .with_json_body(&SelectAvatarBody { avatar_id })?;

        let (body, _) = self.client.fetch(request).await?;
        tracing::debug!(%identifier, avatar_id, "avatar selected");
        Ok(decode_json(&body)?)
    }

    /// `GET <legacy>/<hash>.json`: the legacy profile of `email`.
    ///
    /// An empty `entry` list is [`Error::NoProfileInResponse`].
    pub async fn fetch_user_profile(&self, email: &str) -> Result<UserProfile> {
        if normalize_email(email).is_empty() {
            return Err(Error::InvalidAccountInfo);
        }
        let document = format!("{}.json", hash_email(email));
        let url = endpoint(self.config.legacy_profile_base(), [document])?;

        let (body, _) = self.client.fetch(HttpRequest::get(url)).await?;
        Ok(UserProfile::from_entry_json(&body)?)
    }
}
