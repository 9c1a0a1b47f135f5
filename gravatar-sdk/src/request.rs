//! Request builders.
//!
//! Pure transformations on an [`HttpRequest`]: each consumes the request and
//! returns a new one with a header or body set. Only header values that are
//! not valid HTTP can fail.

use reqwest::header::{HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

use crate::{
    client::http::HttpRequest,
    config::Configuration,
    errors::{Error, Result},
};

/// Default cap on the number of languages sent in `Accept-Language`.
pub const DEFAULT_MAX_PREFERRED_LANGUAGES: usize = 6;

/// Encode an ordered language preference list as an `Accept-Language` value.
///
/// The first entry is unweighted, each following entry gets a q-value 0.1
/// lower than the previous one (never below `0.1`):
///
/// ```
/// # use gravatar::quality_encoded;
/// assert_eq!(
///     quality_encoded(["da", "en-gb", "en"]),
///     "da, en-gb;q=0.9, en;q=0.8"
/// );
/// ```
///
/// See [RFC 9110 §12.5.4](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.4).
pub fn quality_encoded<I, S>(tags: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .enumerate()
        .map(|(index, tag)| {
            let tag = tag.as_ref();
            if index == 0 {
                return tag.to_string();
            }
            let tenths = 10usize.saturating_sub(index).max(1);
            format!("{tag};q=0.{tenths}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Source of the user's preferred languages, most preferred first.
pub trait LanguagePreferenceProvider {
    /// Language tags, most preferred first.
    fn preferred_languages(&self) -> Vec<String>;

    /// How many of them to send.
    fn max_preferred_languages(&self) -> usize {
        DEFAULT_MAX_PREFERRED_LANGUAGES
    }
}

impl LanguagePreferenceProvider for Vec<String> {
    fn preferred_languages(&self) -> Vec<String> {
        self.clone()
    }
}

impl LanguagePreferenceProvider for &[&str] {
    fn preferred_languages(&self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

/// Reads the preferred languages from the POSIX locale environment.
///
/// `LANGUAGE` (a `:`-separated list) wins, then `LC_ALL`, then `LANG`.
/// `en_GB.UTF-8` becomes `en-GB`; the `C` and `POSIX` locales are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLanguagePreferences;

impl SystemLanguagePreferences {
    fn from_vars(language: Option<&str>, lc_all: Option<&str>, lang: Option<&str>) -> Vec<String> {
        let raw: Vec<&str> = match (language, lc_all, lang) {
            (Some(list), _, _) if !list.trim().is_empty() => list.split(':').collect(),
            (_, Some(single), _) if !single.trim().is_empty() => vec![single],
            (_, _, Some(single)) => vec![single],
            _ => Vec::new(),
        };

        let mut tags: Vec<String> = Vec::new();
        for tag in raw.into_iter().filter_map(posix_locale_to_tag) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

impl LanguagePreferenceProvider for SystemLanguagePreferences {
    fn preferred_languages(&self) -> Vec<String> {
        let var = |name: &str| std::env::var(name).ok();
        Self::from_vars(
            var("LANGUAGE").as_deref(),
            var("LC_ALL").as_deref(),
            var("LANG").as_deref(),
        )
    }
}

/// `en_GB.UTF-8@euro` -> `en-GB`. `None` for empty, `C` and `POSIX` locales.
fn posix_locale_to_tag(locale: &str) -> Option<String> {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })
}

impl HttpRequest {
    /// Set an arbitrary header, replacing any previous value.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Result<Self> {
        let value = header_value(&name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// `Authorization: Bearer <token>`.
    pub fn with_authorization(self, token: &str) -> Result<Self> {
        let mut request = self.with_header(AUTHORIZATION, &format!("Bearer {token}"))?;
        if let Some(value) = request.headers.get_mut(AUTHORIZATION) {
            value.set_sensitive(true);
        }
        Ok(request)
    }

    /// Bearer authorization with the configured API key, if there is one.
    /// No-op otherwise.
    pub fn with_api_key_if_configured(self, config: &Configuration) -> Result<Self> {
        match config.api_key() {
            Some(key) => self.with_authorization(key),
            None => Ok(self),
        }
    }

    /// `Accept-Language: <value>`.
    pub fn with_accept_language(self, value: &str) -> Result<Self> {
        self.with_header(ACCEPT_LANGUAGE, value)
    }

    /// `Accept-Language` from an ordered list of language tags.
    pub fn with_preferred_languages<I, S>(self, tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_accept_language(&quality_encoded(tags))
    }

    /// `Accept-Language` from a [`LanguagePreferenceProvider`], capped at its
    /// `max_preferred_languages`. No-op when the provider has no languages.
    pub fn with_default_accept_language<P>(self, provider: &P) -> Result<Self>
    where
        P: LanguagePreferenceProvider + ?Sized,
    {
        let languages = provider.preferred_languages();
        if languages.is_empty() {
            return Ok(self);
        }
        self.with_preferred_languages(
            languages
                .iter()
                .take(provider.max_preferred_languages()),
        )
    }

    /// `Accept: application/json`.
    pub fn accepting_json(self) -> Result<Self> {
        self.with_header(ACCEPT, "application/json")
    }

    /// Serialize `body` as the JSON request body.
    pub fn with_json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?.into());
        self.with_header(CONTENT_TYPE, "application/json")
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn request() -> HttpRequest {
        HttpRequest::get(Url::parse("https://api.gravatar.com/v3/profiles/abc").unwrap())
    }

    #[test]
    fn quality_encoding() {
        assert_eq!(
            quality_encoded(["da", "en-gb", "en"]),
            "da, en-gb;q=0.9, en;q=0.8"
        );
        assert_eq!(quality_encoded(["fr"]), "fr");
        assert_eq!(quality_encoded(Vec::<String>::new()), "");

        let many: Vec<String> = (0..12).map(|i| format!("l{i}")).collect();
        let encoded = quality_encoded(&many);
        assert!(encoded.starts_with("l0, l1;q=0.9, l2;q=0.8"));
        assert!(encoded.contains("l9;q=0.1"));
        assert!(encoded.ends_with("l10;q=0.1, l11;q=0.1"));
    }

    #[test]
    fn authorization_header() {
        let request = request().with_authorization("token123").unwrap();
        let value = &request.headers[AUTHORIZATION];
        assert_eq!(value, "Bearer token123");
        assert!(value.is_sensitive());
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        assert!(matches!(
            request().with_authorization("bad\ntoken"),
            Err(Error::InvalidHeader { .. })
        ));
    }

    #[test]
    fn api_key_only_when_configured() {
        let bare = request()
            .with_api_key_if_configured(&Configuration::default())
            .unwrap();
        assert!(bare.headers.get(AUTHORIZATION).is_none());

        let config = Configuration::builder().api_key("key").build();
        let authorized = request().with_api_key_if_configured(&config).unwrap();
        assert_eq!(authorized.headers[AUTHORIZATION], "Bearer key");
    }

    #[test]
    fn accept_language_from_provider() {
        struct TwoOnly;
        impl LanguagePreferenceProvider for TwoOnly {
            fn preferred_languages(&self) -> Vec<String> {
                vec!["pt-PT".into(), "pt".into(), "en".into()]
            }
            fn max_preferred_languages(&self) -> usize {
                2
            }
        }

        let request = request().with_default_accept_language(&TwoOnly).unwrap();
        assert_eq!(request.headers[ACCEPT_LANGUAGE], "pt-PT, pt;q=0.9");

        let empty: Vec<String> = Vec::new();
        let request = self::request().with_default_accept_language(&empty).unwrap();
        assert!(request.headers.get(ACCEPT_LANGUAGE).is_none());
    }

    #[test]
    fn posix_locales() {
        assert_eq!(
            SystemLanguagePreferences::from_vars(Some("da:en_GB:en"), None, Some("C")),
            vec!["da", "en-GB", "en"]
        );
        assert_eq!(
            SystemLanguagePreferences::from_vars(None, None, Some("en_GB.UTF-8")),
            vec!["en-GB"]
        );
        assert_eq!(
            SystemLanguagePreferences::from_vars(Some(""), Some("de_DE@euro"), Some("en_US")),
            vec!["de-DE"]
        );
        assert!(SystemLanguagePreferences::from_vars(None, None, Some("POSIX")).is_empty());
        assert!(SystemLanguagePreferences::from_vars(None, None, None).is_empty());
    }

    #[test]
    fn json_body() {
        let request = HttpRequest::post(Url::parse("https://api.gravatar.com/x").unwrap())
            .with_json_body(&serde_json::json!({ "avatar_id": "abc" }))
            .unwrap();
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            request.body.as_deref(),
            Some(&b"{\"avatar_id\":\"abc\"}"[..])
        );
    }
}
