use std::sync::{Arc, OnceLock};

use percent_encoding::percent_decode_str;
use reqwest::Url;
use serde::Deserialize;

use crate::constants::{DEFAULT_CSRF_COOKIE, DEFAULT_CSRF_HEADER, SAFE_METHODS};
use crate::errors::LikeButtonError;

static TOKEN_PROVIDER: OnceLock<Arc<TokenProvider>> = OnceLock::new();

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            header_name: DEFAULT_CSRF_HEADER.to_string(),
        }
    }
}

/// Anti-forgery token source.
///
/// The token is read from the cookie header once, when the provider is built, and stays
/// read-only for the rest of the process.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    config: CsrfConfig,
    token: Option<String>,
}

impl TokenProvider {
    pub fn new(config: CsrfConfig, cookie_header: Option<&str>) -> Self {
        let token = cookie_header.and_then(|header| parse_cookie(header, &config.cookie_name));

        if token.is_none() {
            log::warn!("{}", LikeButtonError::MissingToken);
        }

        Self { config, token }
    }

    /// Installs the process-wide provider. Fails if one is already installed.
    pub fn init(provider: TokenProvider) -> Result<Arc<TokenProvider>, LikeButtonError> {
        let provider = Arc::new(provider);

        TOKEN_PROVIDER
            .set(provider.clone())
            .map_err(|_| LikeButtonError::ConfigError("token provider already initialized".to_string()))?;

        Ok(provider)
    }

    pub fn global() -> Option<Arc<TokenProvider>> {
        TOKEN_PROVIDER.get().cloned()
    }

    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn header_name(&self) -> &str {
        &self.config.header_name
    }

    /// Safe methods never carry the token. Matching is exact and case-sensitive.
    pub fn requires_token(method: &str) -> bool {
        !SAFE_METHODS.contains(&method)
    }

    /// Header to attach to a request from `page` to `target`, if any.
    ///
    /// `Err(MissingToken)` means the request needed a token and none was found; callers
    /// send the request anyway and let the server reject it.
    pub fn header_for(
        &self,
        method: &str,
        page: &Url,
        target: &Url,
    ) -> Result<Option<(&str, &str)>, LikeButtonError> {
        if !Self::requires_token(method) || !is_same_origin(page, target) {
            return Ok(None);
        }

        match self.get_token() {
            Some(token) => Ok(Some((self.header_name(), token))),
            None => Err(LikeButtonError::MissingToken),
        }
    }
}

/// Looks up `name` in a `name=value; name2=value2` cookie header. First match wins and values
/// are percent-decoded.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|value| percent_decode_str(value).decode_utf8_lossy().into_owned())
}

pub fn is_same_origin(page: &Url, target: &Url) -> bool {
    page.origin() == target.origin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(cookie: Option<&str>) -> TokenProvider {
        TokenProvider::new(CsrfConfig::default(), cookie)
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn parses_token_from_cookie_header() {
        let p = provider(Some("sessionid=xyz; csrftoken=abc123; theme=dark"));

        assert_eq!(p.get_token(), Some("abc123"));
    }

    #[test]
    fn first_match_wins_and_values_are_decoded() {
        assert_eq!(parse_cookie("csrftoken=a%20b; csrftoken=second", "csrftoken").as_deref(), Some("a b"));
    }

    #[test]
    fn name_must_match_exactly() {
        assert_eq!(parse_cookie("xcsrftoken=nope; csrftokens=nope", "csrftoken"), None);
        assert_eq!(parse_cookie("CSRFTOKEN=nope", "csrftoken"), None);
        assert_eq!(parse_cookie("csrftoken=", "csrftoken").as_deref(), Some(""));
    }

    #[test]
    fn absent_when_cookie_store_missing_or_empty() {
        assert_eq!(provider(None).get_token(), None);
        assert_eq!(provider(Some("")).get_token(), None);
        assert_eq!(provider(Some("theme=dark")).get_token(), None);
    }

    #[test]
    fn custom_cookie_name() {
        let config = CsrfConfig {
            cookie_name: "XSRF-TOKEN".to_string(),
            header_name: "X-XSRF-TOKEN".to_string(),
        };
        let p = TokenProvider::new(config, Some("csrftoken=a; XSRF-TOKEN=b"));

        assert_eq!(p.get_token(), Some("b"));
        assert_eq!(p.header_name(), "X-XSRF-TOKEN");
    }

    #[test]
    fn safe_methods_do_not_require_token() {
        for method in ["GET", "HEAD", "OPTIONS", "TRACE"] {
            assert!(!TokenProvider::requires_token(method));
        }
        for method in ["POST", "PUT", "PATCH", "DELETE", "get"] {
            assert!(TokenProvider::requires_token(method));
        }
    }

    #[test]
    fn header_attached_only_for_same_origin_mutations() {
        let p = provider(Some("csrftoken=abc123"));
        let page = url("https://example.com/posts/");

        assert_eq!(
            p.header_for("POST", &page, &url("https://example.com/posts/like/42")).unwrap(),
            Some(("X-CSRFToken", "abc123"))
        );
        assert_eq!(p.header_for("GET", &page, &url("https://example.com/posts/")).unwrap(), None);
        assert_eq!(p.header_for("POST", &page, &url("https://evil.com/posts/like/42")).unwrap(), None);
        assert_eq!(p.header_for("POST", &page, &url("http://example.com/posts/like/42")).unwrap(), None);
        assert_eq!(p.header_for("POST", &page, &url("https://example.com:8443/like/42")).unwrap(), None);
    }

    #[test]
    fn global_provider_is_installed_once() {
        let installed = TokenProvider::init(provider(Some("csrftoken=abc123"))).unwrap();

        assert_eq!(TokenProvider::global().unwrap().get_token(), installed.get_token());
        assert!(TokenProvider::init(provider(None)).is_err());
        assert_eq!(TokenProvider::global().unwrap().get_token(), Some("abc123"));
    }

    #[test]
    fn missing_token_is_reported_for_mutations() {
        let p = provider(Some(""));
        let page = url("https://example.com/");

        assert!(matches!(
            p.header_for("POST", &page, &url("https://example.com/like/1")),
            Err(LikeButtonError::MissingToken)
        ));
    }
}
