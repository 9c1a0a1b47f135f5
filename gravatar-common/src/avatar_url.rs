//! Canonical avatar URLs.
//!
//! Gravatar serves the same avatar from many equivalent URLs
//! (`http://0.gravatar.com/avatar/<hash>?s=80`,
//! `https://secure.gravatar.com/avatar/<hash>`, ...). [`AvatarUrl`] rewrites
//! them into a single form so they can be compared and deduplicated.

use std::fmt;

use url::Url;

use crate::{
    constants::{
        AVATAR_PATH_PREFIX, CANONICAL_HOST, CANONICAL_SCHEME, DEFAULT_AVATAR_BASE, SERVICE_DOMAIN,
        UNKNOWN_HASH,
    },
    identifier::ProfileIdentifier,
    options::ImageQueryOptions,
};

/// Returns true if `url` points at a Gravatar host (`gravatar.com` or any subdomain).
///
/// No network access is performed.
pub fn is_gravatar_url(url: &Url) -> bool {
    match url.host_str() {
        Some(host) => {
            host == SERVICE_DOMAIN
                || host
                    .strip_suffix(SERVICE_DOMAIN)
                    .is_some_and(|sub| sub.ends_with('.'))
        }
        None => false,
    }
}

/// Returns true if `url` is a Gravatar avatar image URL (Gravatar host and `/avatar/` path).
pub fn is_avatar_url(url: &Url) -> bool {
    is_gravatar_url(url) && url.path().starts_with(AVATAR_PATH_PREFIX)
}

/// Last non-empty path segment, so `/avatar/<hash>/` still yields `<hash>`.
fn last_path_segment(url: &Url) -> Option<&str> {
    url.path_segments()?.filter(|s| !s.is_empty()).next_back()
}

/// An avatar URL in canonical form: `https://secure.gravatar.com/<path>`
/// with no query, port or fragment.
///
/// Two `AvatarUrl`s are equal iff their canonical URLs are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarUrl {
    canonical: Url,
}

impl AvatarUrl {
    /// Canonicalize an arbitrary URL.
    ///
    /// Returns `None` if the host is not a Gravatar host, or if the URL points
    /// at the reserved "unknown" avatar, which is treated as no avatar at all.
    pub fn canonicalize(url: &Url) -> Option<AvatarUrl> {
        if !is_gravatar_url(url) {
            return None;
        }
        if last_path_segment(url) == Some(UNKNOWN_HASH) {
            return None;
        }

        let canonical =
            Url::parse(&format!("{CANONICAL_SCHEME}://{CANONICAL_HOST}{}", url.path())).ok()?;

        Some(AvatarUrl { canonical })
    }

    /// Canonical avatar URL for a profile identifier.
    pub fn from_identifier(identifier: &ProfileIdentifier) -> Option<AvatarUrl> {
        let resolved = Self::resolved(identifier, &ImageQueryOptions::default()).ok()?;
        Self::canonicalize(&resolved)
    }

    /// Build `<base><id>` with the given query options, using the default
    /// `https://gravatar.com/avatar/` base.
    pub fn resolved(
        identifier: &ProfileIdentifier,
        options: &ImageQueryOptions,
    ) -> Result<Url, url::ParseError> {
        let base = Url::parse(DEFAULT_AVATAR_BASE)?;
        Self::resolved_with_base(&base, identifier, options)
    }

    /// Build `<base>/<id>` with the given query options.
    ///
    /// The identifier is appended as a single escaped path segment, so it can
    /// never change the host, scheme or directory of `base`. Fails if `base`
    /// cannot carry a path (e.g. `mailto:`).
    pub fn resolved_with_base(
        base: &Url,
        identifier: &ProfileIdentifier,
        options: &ImageQueryOptions,
    ) -> Result<Url, url::ParseError> {
        let mut url = base.clone();
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(identifier.id());
        options.apply_to(&mut url);
        Ok(url)
    }

    /// The canonical URL, without query options.
    pub fn canonical_url(&self) -> &Url {
        &self.canonical
    }

    /// The avatar hash (last path segment).
    pub fn hash(&self) -> Option<&str> {
        last_path_segment(&self.canonical)
    }

    /// The canonical URL with `options` appended as query parameters.
    pub fn url_with(&self, options: &ImageQueryOptions) -> Url {
        let mut url = self.canonical.clone();
        options.apply_to(&mut url);
        url
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical.as_str())
    }
}

impl From<AvatarUrl> for Url {
    fn from(value: AvatarUrl) -> Self {
        value.canonical
    }
}
