//! Profile model of the v3 REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de::{datetime_opt, decode_json, lenient_bool, DecodeError};

/// A user's profile information.
///
/// The required fields are always present on a decoded profile. The optional
/// ones are only sent for authenticated requests; `None` means the field was
/// not in the payload, which is not the same as an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// SHA-256 hash of the user's primary email address.
    pub hash: String,
    /// Name displayed on the profile.
    pub display_name: String,
    /// Full URL of the profile page.
    pub profile_url: String,
    /// URL of the avatar image, if one has been set.
    pub avatar_url: String,
    /// Alt text of the avatar image, if one has been set.
    pub avatar_alt_text: String,
    /// The user's location.
    pub location: String,
    /// The "about" section of the profile.
    pub description: String,
    /// The user's job title.
    pub job_title: String,
    /// The user's current company.
    pub company: String,
    /// Verified accounts shown on the profile. Limited to 4 for unauthenticated requests.
    pub verified_accounts: Vec<VerifiedAccount>,
    /// Phonetic pronunciation of the user's name.
    pub pronunciation: String,
    /// The user's pronouns.
    pub pronouns: String,

    /// Links added to the profile. Authenticated requests only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    /// Interests added to the profile. Authenticated requests only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<Interest>>,
    /// Payment links and crypto wallets. Authenticated requests only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<ProfilePayments>,
    /// Contact information. Authenticated requests only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ProfileContactInfo>,
    /// Additional uploaded images. Authenticated requests only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<GalleryImage>>,
    /// Number of verified accounts, hidden ones included. Authenticated requests only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_verified_accounts: Option<u32>,
    /// Last time (UTC) the profile was edited. Authenticated requests only.
    #[serde(
        default,
        deserialize_with = "datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_profile_edit: Option<DateTime<Utc>>,
    /// Registration date of the account. Authenticated requests only.
    #[serde(
        default,
        deserialize_with = "datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_date: Option<DateTime<Utc>>,
}

impl Profile {
    /// Decode a profile from a response body.
    pub fn from_json(bytes: &[u8]) -> Result<Profile, DecodeError> {
        decode_json(bytes)
    }
}

/// A third-party account verified on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedAccount {
    /// Service type, e.g. `github`.
    pub service_type: String,
    /// Human readable service name.
    pub service_label: String,
    /// URL of the service icon.
    pub service_icon: String,
    /// URL of the account on the service.
    pub url: String,
    /// Whether the account is hidden from the public profile.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_hidden: bool,
}

/// A link on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Label of the link.
    pub label: String,
    /// Target URL.
    pub url: String,
}

/// An interest on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    /// Interest id.
    pub id: i64,
    /// Interest name.
    pub name: String,
}

/// Payment methods on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePayments {
    /// Payment links (PayPal, Patreon, ...).
    pub links: Vec<Link>,
    /// Crypto wallet addresses.
    pub crypto_wallets: Vec<CryptoWalletAddress>,
}

/// A crypto currency wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoWalletAddress {
    /// Name of the currency.
    pub label: String,
    /// Wallet address.
    pub address: String,
}

/// Contact information on the profile. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileContactInfo {
    /// Home phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_phone: Option<String>,
    /// Work phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,
    /// Cell phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_phone: Option<String>,
    /// Contact email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// URL of a contact form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_form: Option<String>,
    /// URL of a calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<String>,
}

/// An image from the profile gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Image URL.
    pub url: String,
    /// Alt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}
