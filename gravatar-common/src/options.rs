//! Query options for avatar image URLs.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// A rating or default-image name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownOptionError {
    kind: &'static str,
    value: String,
}

/// Self-assigned content rating of an avatar image.
///
/// Only `G` rated images are served unless a higher rating is requested. If
/// the user has no image at or below the requested rating, the default image
/// is served instead (see [`DefaultImageOption`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageRating {
    /// Suitable for display on all websites with any audience type.
    #[default]
    G,
    /// May contain rude gestures, provocatively dressed individuals, the lesser swear words, or mild violence.
    Pg,
    /// May contain such things as harsh profanity, intense violence, nudity, or hard drug use.
    R,
    /// May contain sexual imagery or extremely disturbing violence.
    X,
}

impl ImageRating {
    /// Wire value of the `r` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRating::G => "g",
            ImageRating::Pg => "pg",
            ImageRating::R => "r",
            ImageRating::X => "x",
        }
    }
}

impl fmt::Display for ImageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageRating {
    type Err = UnknownOptionError;

    /// Case-insensitive wire value: `g`, `pg`, `r` or `x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "g" => Ok(ImageRating::G),
            "pg" => Ok(ImageRating::Pg),
            "r" => Ok(ImageRating::R),
            "x" => Ok(ImageRating::X),
            _ => Err(UnknownOptionError {
                kind: "image rating",
                value: s.to_string(),
            }),
        }
    }
}

/// What to serve when the user has no avatar (or none matching the rating).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultImageOption {
    /// Respond with `404 Not Found` instead of an image.
    Status404,
    /// A simple, cartoon-style silhouetted outline of a person.
    MysteryPerson,
    /// A geometric pattern based on the identifier hash.
    Identicon,
    /// A generated monster with different colors, faces, etc.
    MonsterId,
    /// Generated faces with differing features and backgrounds.
    Wavatar,
    /// Generated 8-bit arcade-style pixelated faces.
    Retro,
    /// A generated robot with different colors, faces, etc.
    RoboHash,
    /// A transparent PNG image.
    TransparentPng,
    /// A publicly reachable image URL of your own.
    Custom(Url),
}

impl DefaultImageOption {
    /// Wire value of the `d` query parameter (not yet percent-encoded).
    pub fn query_value(&self) -> String {
        match self {
            DefaultImageOption::Status404 => "404".to_string(),
            DefaultImageOption::MysteryPerson => "mp".to_string(),
            DefaultImageOption::Identicon => "identicon".to_string(),
            DefaultImageOption::MonsterId => "monsterid".to_string(),
            DefaultImageOption::Wavatar => "wavatar".to_string(),
            DefaultImageOption::Retro => "retro".to_string(),
            DefaultImageOption::RoboHash => "robohash".to_string(),
            DefaultImageOption::TransparentPng => "blank".to_string(),
            DefaultImageOption::Custom(url) => url.to_string(),
        }
    }
}

impl FromStr for DefaultImageOption {
    type Err = UnknownOptionError;

    /// A wire value (`404`, `mp`, `identicon`, ...) or an absolute `http(s)` URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let option = match s {
            "404" => DefaultImageOption::Status404,
            "mp" => DefaultImageOption::MysteryPerson,
            "identicon" => DefaultImageOption::Identicon,
            "monsterid" => DefaultImageOption::MonsterId,
            "wavatar" => DefaultImageOption::Wavatar,
            "retro" => DefaultImageOption::Retro,
            "robohash" => DefaultImageOption::RoboHash,
            "blank" => DefaultImageOption::TransparentPng,
            other => match Url::parse(other) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {
                    DefaultImageOption::Custom(url)
                }
                _ => {
                    return Err(UnknownOptionError {
                        kind: "default image",
                        value: s.to_string(),
                    })
                }
            },
        };
        Ok(option)
    }
}

/// Options appended to an avatar URL as query parameters.
///
/// Unset options produce no parameter, and an empty option set produces no
/// query string at all.
///
/// # Example
/// ```
/// use gravatar_common::{ImageQueryOptions, ImageRating};
///
/// let options = ImageQueryOptions::new().size(120).rating(ImageRating::Pg);
/// assert_eq!(
///     options.query_items(),
///     vec![("s", "120".to_string()), ("r", "pg".to_string())]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[must_use]
pub struct ImageQueryOptions {
    size: Option<u32>,
    rating: Option<ImageRating>,
    default_image: Option<DefaultImageOption>,
    force_default: bool,
}

impl ImageQueryOptions {
    /// Empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target pixel dimension (images are square). Zero is treated as unset.
    pub fn size(mut self, size: u32) -> Self {
        self.size = (size > 0).then_some(size);
        self
    }

    /// Highest content rating to serve.
    pub fn rating(mut self, rating: ImageRating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Fallback image strategy.
    pub fn default_image(mut self, option: DefaultImageOption) -> Self {
        self.default_image = Some(option);
        self
    }

    /// Always serve the default image, even when the user has an avatar.
    pub fn force_default(mut self, force: bool) -> Self {
        self.force_default = force;
        self
    }

    /// Returns true when no option is set.
    pub fn is_empty(&self) -> bool {
        self.query_items().is_empty()
    }

    /// Ordered `(name, value)` query parameters.
    pub fn query_items(&self) -> Vec<(&'static str, String)> {
        let mut items = Vec::new();
        if let Some(size) = self.size {
            items.push(("s", size.to_string()));
        }
        if let Some(rating) = self.rating {
            items.push(("r", rating.as_str().to_string()));
        }
        if let Some(default_image) = &self.default_image {
            items.push(("d", default_image.query_value()));
        }
        if self.force_default {
            items.push(("f", "y".to_string()));
        }
        items
    }

    /// Replace the query of `url` with these options.
    ///
    /// An empty option set removes the query entirely.
    pub fn apply_to(&self, url: &mut Url) {
        let items = self.query_items();
        if items.is_empty() {
            url.set_query(None);
            return;
        }
        url.query_pairs_mut().clear().extend_pairs(items);
    }
}
