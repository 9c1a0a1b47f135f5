//! High-level services built on an [`crate::HttpClient`].

pub mod image;
pub mod legacy;
pub mod profile;

use url::Url;

/// `base` with `segments` appended as percent-encoded path segments.
///
/// A trailing empty segment on `base` is dropped first, so `https://h/` and
/// `https://h` give the same result.
pub(crate) fn endpoint<I>(base: &Url, segments: I) -> Result<Url, url::ParseError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
