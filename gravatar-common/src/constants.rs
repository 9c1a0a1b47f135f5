//! Constants shared by the Gravatar crates.

/// Scheme every canonical avatar URL is rewritten to.
pub const CANONICAL_SCHEME: &str = "https";

/// Host every canonical avatar URL is rewritten to.
pub const CANONICAL_HOST: &str = "secure.gravatar.com";

/// Registrable domain of the service. Hosts equal to it, or ending in
/// `.gravatar.com`, are considered Gravatar hosts.
pub const SERVICE_DOMAIN: &str = "gravatar.com";

/// Hash of `unknown@gravatar.com`. An avatar URL ending in it means "no avatar".
pub const UNKNOWN_HASH: &str = "ad516503a11cd5ca435acc9bb6523536";

/// Default base for resolved avatar image URLs.
pub const DEFAULT_AVATAR_BASE: &str = "https://gravatar.com/avatar/";

/// Path prefix of the avatar image endpoint.
pub const AVATAR_PATH_PREFIX: &str = "/avatar/";

/// Date-time format of the legacy profile schema (`yyyy-MM-dd HH:mm:ss`, UTC).
pub const LEGACY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
