//! Global, resettable `GravatarHttpClient` shared by the service constructors.
//!
//! [`crate::ProfileService::new`], [`crate::ImageService::new`] and
//! [`crate::GravatarService::new`] reuse this client so one connection pool
//! serves the whole process. Services that need a different transport take
//! one explicitly through their `with_client` constructors.
//!
//! - Backing storage is an `ArcSwapOption<GravatarHttpClient>` inside a `OnceLock`.
//! - Reads are lock-free; [`global_client`] returns a cheap clone.
//! - [`set_global_client`] and [`drop_global_client`] publish a new instance
//!   (or `None`). Clones handed out earlier keep working.
//! - The lazily built default honours the request timeout and user-agent of
//!   [`crate::Configuration::global`].
//!
//! Concurrent first calls may each build a client; the last one stored wins.
//!
//! ```
//! # use gravatar::{drop_global_client, global_client, set_global_client, GravatarHttpClient};
//! let client = global_client()?;
//! set_global_client(GravatarHttpClient::builder().user_agent_extra("app/1").build()?);
//! drop_global_client();
//! # Ok::<(), gravatar::BuildError>(())
//! ```

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::sync::OnceLock;

use crate::{BuildError, Configuration, GravatarHttpClient};

static GLOBAL_CLIENT: OnceLock<ArcSwapOption<GravatarHttpClient>> = OnceLock::new();

#[inline]
fn slot() -> &'static ArcSwapOption<GravatarHttpClient> {
    GLOBAL_CLIENT.get_or_init(|| ArcSwapOption::from(None))
}

fn client_for(config: &Configuration) -> Result<GravatarHttpClient, BuildError> {
    let mut builder = GravatarHttpClient::builder();
    if let Some(timeout) = config.request_timeout() {
        builder.request_timeout(timeout);
    }
    if let Some(extra) = config.user_agent_extra() {
        builder.user_agent_extra(extra);
    }
    builder.build()
}

/// Get-or-init the process-wide default client.
pub fn global_client() -> Result<GravatarHttpClient, BuildError> {
    if let Some(current) = slot().load_full() {
        return Ok(current.as_ref().clone());
    }

    let fresh = client_for(&Configuration::global())?;
    slot().store(Some(Arc::new(fresh.clone())));
    Ok(fresh)
}

/// Replace the global default client.
pub fn set_global_client(new_client: GravatarHttpClient) {
    slot().store(Some(Arc::new(new_client)));
}

/// Clear the global default client. The next [`global_client`] call builds a fresh one.
pub fn drop_global_client() {
    slot().store(None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazily_initialized_and_resettable() {
        let first = global_client().unwrap();
        set_global_client(first.clone());
        assert!(slot().load().is_some());

        drop_global_client();
        assert!(slot().load().is_none());

        global_client().unwrap();
        assert!(slot().load().is_some());
    }
}
