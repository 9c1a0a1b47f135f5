//! Types in common between the Gravatar client crates.
//!
//! Everything in here is pure: hashing identifiers, canonicalizing avatar
//! URLs, and decoding the profile payloads served by Gravatar. Nothing in this
//! crate performs I/O.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(any(), deny(clippy::unwrap_used))]

pub mod avatar;
pub mod avatar_url;
pub mod constants;
pub mod de;
pub mod hash;
pub mod identifier;
pub mod options;
pub mod profile;
pub mod user_profile;

pub use avatar::{Avatar, ProfileIdentity};
pub use avatar_url::{is_avatar_url, is_gravatar_url, AvatarUrl};
pub use de::DecodeError;
pub use hash::{hash_email, normalize_email};
pub use identifier::ProfileIdentifier;
pub use options::{DefaultImageOption, ImageQueryOptions, ImageRating, UnknownOptionError};
pub use profile::Profile;
pub use user_profile::{GravatarProfile, UserProfile};
