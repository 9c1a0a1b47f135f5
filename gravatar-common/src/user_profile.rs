//! Legacy "user profile" schema, served as `{"entry": [ ... ]}`.
//!
//! The legacy schema mixes camelCase and snake_case keys per field, so every
//! multi-word field carries an explicit `rename` instead of a blanket
//! `rename_all`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::de::{legacy_datetime_opt, lenient_bool, DecodeError};

/// A profile as returned by the legacy JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    /// Numeric profile id, when provided.
    #[serde(default, rename = "id")]
    pub profile_id: Option<String>,
    /// Hash of the primary email.
    pub hash: String,
    /// Hash used in the request.
    #[serde(rename = "requestHash")]
    pub request_hash: String,
    /// Username (profile slug).
    #[serde(rename = "preferredUsername")]
    pub preferred_username: String,
    /// Name displayed on the profile.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Structured name.
    #[serde(default)]
    pub name: Option<Name>,
    /// Pronouns.
    #[serde(default)]
    pub pronouns: Option<String>,
    /// The "about me" text.
    #[serde(default, rename = "aboutMe")]
    pub about_me: Option<String>,
    /// Links on the profile.
    #[serde(default)]
    pub urls: Vec<LinkUrl>,
    /// Photos on the profile.
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Emails on the profile (authenticated requests only).
    #[serde(default)]
    pub emails: Option<Vec<Email>>,
    /// Verified accounts on the profile.
    #[serde(default)]
    pub accounts: Option<Vec<Account>>,
    /// URL of the profile page.
    #[serde(rename = "profileUrl")]
    pub profile_url: Url,
    /// URL of the profile thumbnail.
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: Url,
    /// Last edit date.
    #[serde(
        default,
        rename = "last_profile_edit",
        deserialize_with = "legacy_datetime_opt"
    )]
    pub last_profile_edit_date: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Decode the first profile of a `{"entry": [..]}` response body.
    ///
    /// A missing or empty `entry` list, or an empty first entry, is
    /// [`DecodeError::NoProfileInResponse`]. A present entry that does not
    /// match the schema is [`DecodeError::Json`].
    pub fn from_entry_json(bytes: &[u8]) -> Result<UserProfile, DecodeError> {
        #[derive(Deserialize)]
        struct Entries {
            #[serde(default)]
            entry: Option<Vec<Value>>,
        }

        let entries: Entries = serde_json::from_slice(bytes)?;
        let first = entries
            .entry
            .and_then(|entry| entry.into_iter().next())
            .filter(|first| match first {
                Value::Null => false,
                Value::Object(map) => !map.is_empty(),
                _ => true,
            })
            .ok_or(DecodeError::NoProfileInResponse)?;

        Ok(serde_json::from_value(first)?)
    }
}

/// Structured name of a legacy profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Name {
    /// Given name.
    #[serde(default, rename = "givenName")]
    pub given_name: Option<String>,
    /// Family name.
    #[serde(default, rename = "familyName")]
    pub family_name: Option<String>,
    /// Full formatted name.
    #[serde(default)]
    pub formatted: Option<String>,
}

/// A link of a legacy profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkUrl {
    /// Title of the link.
    pub title: String,
    /// Target URL.
    pub value: String,
    /// Slug of the link.
    #[serde(default, rename = "link_slug")]
    pub link_slug: Option<String>,
}

/// A photo of a legacy profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Photo {
    /// Image URL.
    pub value: String,
    /// Photo kind, e.g. `thumbnail`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// An email of a legacy profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Email {
    /// The address.
    pub value: String,
    /// Primary flag. `true` or `"true"` only; anything else is `false`.
    #[serde(default, rename = "primary", deserialize_with = "lenient_bool")]
    pub is_primary: bool,
}

/// A verified third-party account of a legacy profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Account domain.
    pub domain: String,
    /// Display value.
    pub display: String,
    /// Account URL.
    pub url: String,
    /// Icon URL.
    #[serde(rename = "iconUrl")]
    pub icon_url: String,
    /// Username on the service.
    pub username: String,
    /// Verified flag. `true` or `"true"` only; anything else is `false`.
    #[serde(default, rename = "verified", deserialize_with = "lenient_bool")]
    pub is_verified: bool,
    /// Service name.
    pub name: String,
    /// Service short name.
    pub shortname: String,
}

/// A summary of a legacy profile, as exposed by the older service facade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravatarProfile {
    /// Numeric profile id (empty when not provided).
    pub profile_id: String,
    /// Hash of the primary email.
    pub hash: String,
    /// Hash used in the request.
    pub request_hash: String,
    /// URL of the profile page.
    pub profile_url: String,
    /// Username.
    pub preferred_username: String,
    /// URL of the profile thumbnail.
    pub thumbnail_url: String,
    /// Formatted name (empty when not provided).
    pub name: String,
    /// Name displayed on the profile.
    pub display_name: String,
}

impl From<UserProfile> for GravatarProfile {
    fn from(profile: UserProfile) -> Self {
        GravatarProfile {
            profile_id: profile.profile_id.unwrap_or_default(),
            hash: profile.hash,
            request_hash: profile.request_hash,
            profile_url: profile.profile_url.to_string(),
            preferred_username: profile.preferred_username,
            thumbnail_url: profile.thumbnail_url.to_string(),
            name: profile
                .name
                .and_then(|name| name.formatted)
                .unwrap_or_default(),
            display_name: profile.display_name,
        }
    }
}
