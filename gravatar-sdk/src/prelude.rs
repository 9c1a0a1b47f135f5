//! Common imports for quick starts.

// Common
pub use crate::{BuildError, Error, GravatarServiceError, RequestError};

// Configuration
pub use crate::{Configuration, ConfigurationBuilder};

// Transport
pub use crate::{GravatarHttpClient, GravatarHttpClientBuilder, HttpClient};

// Services
pub use crate::{GravatarService, ImageService, ProfileService};
// Bearer-token sessions
pub use crate::{MemorySessionStore, SessionStore};

// Identifiers, avatar URLs and image options
pub use crate::{AvatarUrl, DefaultImageOption, ImageQueryOptions, ImageRating, ProfileIdentifier};
// Decoded models
pub use crate::{Avatar, Profile, UserProfile};
