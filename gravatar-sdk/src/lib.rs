#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(any(), deny(clippy::unwrap_used))]

mod client;
pub mod config;
pub mod errors;
mod global;
pub mod request;
pub mod services;
pub mod session;

pub mod prelude;

// --- PUBLIC API EXPORTS ---
// Transport
pub use client::cancel::cancellable;
pub use client::core::{GravatarHttpClient, GravatarHttpClientBuilder};
pub use client::http::{validate_response, HttpClient, HttpRequest, HttpResponse};
// Services
pub use services::image::{ImageDownloadResult, ImageService};
pub use services::legacy::GravatarService;
pub use services::profile::ProfileService;
pub use session::{MemorySessionStore, SessionStore};

// Configuration, errors and global client
pub use config::{Configuration, ConfigurationBuilder};
pub use errors::{BuildError, Error, GravatarServiceError, RequestError, Result};
pub use global::{drop_global_client, global_client, set_global_client};
pub use request::{quality_encoded, LanguagePreferenceProvider, SystemLanguagePreferences};

// Re-exports
pub use gravatar_common::{
    avatar::{Avatar, ProfileIdentity},
    avatar_url::{is_avatar_url, is_gravatar_url, AvatarUrl},
    hash::{hash_email, is_identifier_hash, normalize_email},
    identifier::{IdentifierKind, ProfileIdentifier},
    options::{DefaultImageOption, ImageQueryOptions, ImageRating, UnknownOptionError},
    profile::Profile,
    user_profile::{GravatarProfile, UserProfile},
    DecodeError,
};
pub use reqwest::{Method, StatusCode};
pub use tokio_util::sync::CancellationToken;
