use std::num::NonZeroU64;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gravatar::{
    Configuration, DefaultImageOption, GravatarHttpClient, GravatarService, HttpClient,
    ImageRating, ImageService, ProfileService,
};
use url::Url;

mod commands;
mod config_toml;
mod tracing;

use config_toml::{ConfigToml, Overrides, API_KEY_ENV, SAMPLE_CONFIG};

#[derive(Parser, Debug)]
#[command(version, about = "Gravatar profiles and avatars from the command line")]
struct Cli {
    /// [tracing_subscriber::EnvFilter]
    #[clap(short, long)]
    tracing_env_filter: Option<String>,
    /// TOML configuration file.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// API key; overrides the config file and $GRAVATAR_API_KEY.
    #[clap(long)]
    api_key: Option<String>,
    /// Base URL of the REST API.
    #[clap(long)]
    api_base: Option<Url>,
    /// Per-request timeout in seconds.
    #[clap(long)]
    timeout_secs: Option<NonZeroU64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the avatar URL of an email, hash or username. No network access.
    AvatarUrl {
        identifier: String,
        #[clap(short, long)]
        size: Option<u32>,
        #[clap(short, long)]
        rating: Option<ImageRating>,
        /// 404, mp, identicon, monsterid, wavatar, retro, robohash, blank or a URL.
        #[clap(short, long)]
        default_image: Option<DefaultImageOption>,
        #[clap(long)]
        force_default: bool,
        /// Print the canonical secure.gravatar.com form.
        #[clap(long)]
        canonical: bool,
    },
    /// Fetch a profile by email, hash or username.
    Profile {
        identifier: String,
        /// Use the legacy JSON profile endpoint (email only).
        #[clap(long)]
        legacy: bool,
    },
    /// List the avatars of the signed-in user.
    Avatars {
        email: String,
        #[clap(long, env = "GRAVATAR_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Select which avatar is shown for an email.
    Select {
        email: String,
        avatar_id: String,
        #[clap(long, env = "GRAVATAR_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Upload a PNG as a new avatar.
    Upload {
        email: String,
        file: PathBuf,
        #[clap(long, env = "GRAVATAR_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Download the avatar image of an email.
    Download {
        email: String,
        output: PathBuf,
        #[clap(short, long)]
        size: Option<u32>,
    },
    /// Print an example configuration file.
    SampleConfig,
}

fn load_config(args: &Cli) -> Result<ConfigToml> {
    let file = match &args.config {
        Some(path) => ConfigToml::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigToml::default(),
    };
    let overrides = Overrides {
        api_key: args.api_key.clone(),
        api_base: args.api_base.clone(),
        request_timeout_secs: args.timeout_secs,
    };
    Ok(file.with_overrides(overrides, std::env::var(API_KEY_ENV).ok()))
}

fn http_client(config: &Configuration) -> Result<Arc<dyn HttpClient>> {
    let mut builder = GravatarHttpClient::builder();
    if let Some(timeout) = config.request_timeout() {
        builder.request_timeout(timeout);
    }
    builder.user_agent_extra(
        config
            .user_agent_extra()
            .map(|extra| format!("gravatar-cli/{} {extra}", env!("CARGO_PKG_VERSION")))
            .unwrap_or_else(|| format!("gravatar-cli/{}", env!("CARGO_PKG_VERSION"))),
    );
    Ok(Arc::new(builder.build()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config_toml = load_config(&args)?;
    crate::tracing::init_tracing_logs(args.tracing_env_filter.as_deref(), config_toml.logging.as_ref())?;

    let config = config_toml.to_configuration();
    let mut out = std::io::stdout().lock();

    match args.command {
        Command::AvatarUrl {
            identifier,
            size,
            rating,
            default_image,
            force_default,
            canonical,
        } => {
            let options = commands::image_options(size, rating, default_image, force_default);
            commands::avatar_url(
                &mut out,
                &commands::parse_identifier(&identifier),
                &options,
                canonical,
            )
        }
        Command::Profile { identifier, legacy } => {
            let client = http_client(&config)?;
            if legacy {
                let service = GravatarService::with_client(client, config);
                commands::legacy_profile(&mut out, &service, &identifier).await
            } else {
                let service = ProfileService::with_client(client, config);
                let identifier = commands::parse_identifier(&identifier);
                commands::profile(&mut out, &service, &identifier).await
            }
        }
        Command::Avatars { email, token } => {
            let service = ProfileService::with_client(http_client(&config)?, config);
            commands::avatars(&mut out, &service, &token, &email).await
        }
        Command::Select {
            email,
            avatar_id,
            token,
        } => {
            let service = ProfileService::with_client(http_client(&config)?, config);
            commands::select(&mut out, &service, &token, &email, &avatar_id).await
        }
        Command::Upload { email, file, token } => {
            let service = ImageService::with_client(http_client(&config)?, config);
            commands::upload(&mut out, &service, &token, &email, &file).await
        }
        Command::Download {
            email,
            output,
            size,
        } => {
            let service = ImageService::with_client(http_client(&config)?, config);
            let options = commands::image_options(size, None, None, false);
            commands::download(&mut out, &service, &email, &options, &output).await
        }
        Command::SampleConfig => {
            use std::io::Write;
            write!(out, "{SAMPLE_CONFIG}")?;
            Ok(())
        }
    }
}
