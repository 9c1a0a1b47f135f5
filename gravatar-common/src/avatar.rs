//! Avatar gallery entries and the identity record returned when selecting one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de::{datetime_opt, lenient_bool_opt};

/// One image of a user's avatar gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    /// Unique identifier of the image.
    pub image_id: String,
    /// Image URL.
    pub image_url: String,
    /// Content rating (`G`, `PG`, `R`, `X`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Alt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// Whether the image is the one selected for the queried email.
    #[serde(
        default,
        deserialize_with = "lenient_bool_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected: Option<bool>,
    /// Last update of the image.
    #[serde(
        default,
        deserialize_with = "datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<DateTime<Utc>>,
}

impl Avatar {
    /// Identifier used when selecting this avatar.
    pub fn id(&self) -> &str {
        &self.image_id
    }

    /// Image URL.
    pub fn url(&self) -> &str {
        &self.image_url
    }

    /// `selected` defaults to `false` when upstream omits it.
    pub fn is_selected(&self) -> bool {
        self.selected == Some(true)
    }
}

/// The identity record returned after selecting an avatar for an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileIdentity {
    /// Hash of the email the avatar is now attached to.
    pub email_hash: String,
    /// Rating of the selected image.
    pub rating: String,
    /// Id of the selected image.
    pub image_id: String,
    /// URL of the selected image.
    pub image_url: String,
}
