//! Subcommand implementations. Results are written to stdout, as JSON where
//! there is structured data.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use gravatar::{
    is_identifier_hash, AvatarUrl, DefaultImageOption, GravatarService, ImageQueryOptions,
    ImageRating, ImageService, ProfileIdentifier, ProfileService,
};
use serde::Serialize;

/// Interpret a command line identifier: an email if it contains `@`, a hash
/// if it looks like one, a username otherwise.
pub fn parse_identifier(value: &str) -> ProfileIdentifier {
    let lowercase = value.to_ascii_lowercase();
    if value.contains('@') {
        ProfileIdentifier::email(value)
    } else if is_identifier_hash(&lowercase) {
        ProfileIdentifier::hash_id(lowercase)
    } else {
        ProfileIdentifier::username(value)
    }
}

/// Image options from command line values.
pub fn image_options(
    size: Option<u32>,
    rating: Option<ImageRating>,
    default_image: Option<DefaultImageOption>,
    force_default: bool,
) -> ImageQueryOptions {
    let mut options = ImageQueryOptions::new().force_default(force_default);
    if let Some(size) = size {
        options = options.size(size);
    }
    if let Some(rating) = rating {
        options = options.rating(rating);
    }
    if let Some(default_image) = default_image {
        options = options.default_image(default_image);
    }
    options
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Print the avatar URL of `identifier`, or its canonical form.
pub fn avatar_url(
    out: &mut impl Write,
    identifier: &ProfileIdentifier,
    options: &ImageQueryOptions,
    canonical: bool,
) -> anyhow::Result<()> {
    let url = if canonical {
        AvatarUrl::from_identifier(identifier)
            .map(|avatar| avatar.url_with(options))
            .context("identifier has no avatar URL")?
    } else {
        AvatarUrl::resolved(identifier, options).context("could not build the avatar URL")?
    };
    writeln!(out, "{url}")?;
    Ok(())
}

/// Fetch and print a profile.
pub async fn profile(
    out: &mut impl Write,
    service: &ProfileService,
    identifier: &ProfileIdentifier,
) -> anyhow::Result<()> {
    let profile = service
        .fetch(identifier)
        .await
        .with_context(|| format!("fetching profile {identifier}"))?;
    print_json(out, &profile)
}

/// Fetch and print the legacy profile summary of `email`.
pub async fn legacy_profile(
    out: &mut impl Write,
    service: &GravatarService,
    email: &str,
) -> anyhow::Result<()> {
    let profile = service
        .fetch_profile(email)
        .await
        .context("fetching legacy profile")?;

    writeln!(out, "id:           {}", profile.profile_id)?;
    writeln!(out, "hash:         {}", profile.hash)?;
    writeln!(out, "username:     {}", profile.preferred_username)?;
    writeln!(out, "display name: {}", profile.display_name)?;
    writeln!(out, "name:         {}", profile.name)?;
    writeln!(out, "profile:      {}", profile.profile_url)?;
    writeln!(out, "thumbnail:    {}", profile.thumbnail_url)?;
    Ok(())
}

/// List the avatars of the signed-in user.
pub async fn avatars(
    out: &mut impl Write,
    service: &ProfileService,
    token: &str,
    email: &str,
) -> anyhow::Result<()> {
    let avatars = service
        .fetch_avatars(token, &ProfileIdentifier::email(email))
        .await
        .context("listing avatars")?;
    print_json(out, &avatars)
}

/// Select the avatar of `email`.
pub async fn select(
    out: &mut impl Write,
    service: &ProfileService,
    token: &str,
    email: &str,
    avatar_id: &str,
) -> anyhow::Result<()> {
    let identity = service
        .select_avatar(token, &ProfileIdentifier::email(email), avatar_id)
        .await
        .with_context(|| format!("selecting avatar {avatar_id}"))?;
    print_json(out, &identity)
}

/// Upload the PNG at `path` as a new avatar of `email`.
pub async fn upload(
    out: &mut impl Write,
    service: &ImageService,
    token: &str,
    email: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let image = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let size = image.len();

    service
        .upload_image(image.into(), email, token)
        .await
        .context("uploading image")?;
    tracing::info!(bytes = size, "image uploaded");
    writeln!(out, "uploaded {} ({size} bytes)", path.display())?;
    Ok(())
}

/// Download the avatar of `email` into `path`.
pub async fn download(
    out: &mut impl Write,
    service: &ImageService,
    email: &str,
    options: &ImageQueryOptions,
    path: &Path,
) -> anyhow::Result<()> {
    let image = service
        .fetch_image(email, options)
        .await
        .context("downloading avatar")?;
    tokio::fs::write(path, &image.bytes)
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    writeln!(
        out,
        "saved {} ({} bytes, {})",
        path.display(),
        image.bytes.len(),
        image.content_type.as_deref().unwrap_or("unknown type")
    )?;
    Ok(())
}
