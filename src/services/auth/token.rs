/*
 * Responsibility
 * - Bearer credential extraction (RFC 6750 §2.1 Authorization header, §2.3 query parameter)
 * - token68 (RFC 7235 §2.1) lexical validation
 * - Failure classification only. Resolution to an identity is the resolver's job.
 */
use std::fmt;
use std::sync::LazyLock;

use axum::http::{HeaderMap, Uri, header};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

const TOKEN68: &str = r"[A-Za-z0-9\-._~+/]+";
const BEARER_SCHEME: &str = "Bearer";
const ACCESS_TOKEN_PARAM: &str = "access_token";

static BEARER_CREDENTIALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{BEARER_SCHEME} ({TOKEN68})")).expect("Invalid bearer pattern")
});

static TOKEN68_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{TOKEN68}$")).expect("Invalid token68 pattern"));

/// An opaque credential that passed token68 validation.
///
/// Only the extractor hands these out, so holding one means the lexical check
/// already happened. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(token: &str) -> Self {
        Self(token.to_owned())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no bearer credential presented")]
    MissingCredential,
    #[error("bearer credential is malformed")]
    MalformedCredential,
}

/// Locate the request's bearer credential.
///
/// The header wins whenever it yields a token; the query string is only
/// consulted after the header failed. A query parameter that is absent leaves
/// the header's failure in place, anything else the query says replaces it.
pub fn extract(headers: &HeaderMap, uri: &Uri) -> Result<BearerToken, ExtractError> {
    let header_err = match from_header(headers) {
        Ok(token) => {
            debug!(channel = "header", "bearer token presented");
            return Ok(token);
        }
        Err(err) => err,
    };

    match from_query(uri.query()) {
        Ok(token) => {
            debug!(channel = "query", "bearer token presented");
            Ok(token)
        }
        Err(ExtractError::MissingCredential) => {
            debug!(reason = ?header_err, "bearer token not taken from header");
            Err(header_err)
        }
        Err(err) => {
            debug!(reason = ?err, "bearer token not taken from query");
            Err(err)
        }
    }
}

pub fn from_header(headers: &HeaderMap) -> Result<BearerToken, ExtractError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ExtractError::MissingCredential)?;

    if value.is_empty() {
        return Err(ExtractError::MissingCredential);
    }

    // Non visible-ASCII bytes can never be token68.
    let value = value
        .to_str()
        .map_err(|_| ExtractError::MalformedCredential)?;

    parse_authorization(value)
}

/// Parse an `Authorization` header value.
///
/// `Bearer <token68>` anywhere in the value is accepted. A value using a
/// different scheme (e.g. `Basic ...`) carries no bearer credential at all,
/// while a `Bearer` value without a valid token is malformed.
pub fn parse_authorization(value: &str) -> Result<BearerToken, ExtractError> {
    if value.is_empty() {
        return Err(ExtractError::MissingCredential);
    }

    if let Some(caps) = BEARER_CREDENTIALS.captures(value)
        && let Some(token) = caps.get(1)
    {
        return Ok(BearerToken(token.as_str().to_owned()));
    }

    if value.split_whitespace().next() == Some(BEARER_SCHEME) {
        Err(ExtractError::MalformedCredential)
    } else {
        Err(ExtractError::MissingCredential)
    }
}

/// Whether the whole of `s` is a token68 string.
pub fn is_token68(s: &str) -> bool {
    TOKEN68_EXACT.is_match(s)
}

/// Read `access_token` from a raw query string. Only the first occurrence counts.
pub fn from_query(query: Option<&str>) -> Result<BearerToken, ExtractError> {
    let query = query.ok_or(ExtractError::MissingCredential)?;

    let value = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| *key == ACCESS_TOKEN_PARAM)
        .map(|(_, value)| value)
        .ok_or(ExtractError::MissingCredential)?;

    if is_token68(&value) {
        Ok(BearerToken(value.into_owned()))
    } else {
        Err(ExtractError::MalformedCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(authorization: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = authorization {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn header_token_is_captured() {
        let token = from_header(&headers(Some("Bearer abc.DEF-123_~+/="))).unwrap();
        // '=' is outside the character class, the capture stops before it.
        assert_eq!(token.as_str(), "abc.DEF-123_~+/");
    }

    #[test]
    fn header_missing_or_empty_is_missing() {
        assert_eq!(
            from_header(&headers(None)),
            Err(ExtractError::MissingCredential)
        );
        assert_eq!(
            from_header(&headers(Some(""))),
            Err(ExtractError::MissingCredential)
        );
    }

    #[test]
    fn header_other_scheme_is_missing() {
        assert_eq!(
            parse_authorization("Basic xyz"),
            Err(ExtractError::MissingCredential)
        );
        assert_eq!(
            parse_authorization("bearer lowercase"),
            Err(ExtractError::MissingCredential)
        );
    }

    #[test]
    fn header_bearer_without_valid_token_is_malformed() {
        assert_eq!(
            parse_authorization("Bearer"),
            Err(ExtractError::MalformedCredential)
        );
        assert_eq!(
            parse_authorization("Bearer !!!"),
            Err(ExtractError::MalformedCredential)
        );
        assert_eq!(
            parse_authorization("Bearer  double-space"),
            Err(ExtractError::MalformedCredential)
        );
    }

    #[test]
    fn header_match_is_not_anchored() {
        let token = parse_authorization("Bearer abc trailing").unwrap();
        assert_eq!(token.as_str(), "abc");
    }

    #[test]
    fn header_non_ascii_is_malformed() {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert_eq!(from_header(&map), Err(ExtractError::MalformedCredential));
    }

    #[test]
    fn query_token_is_taken_from_first_value() {
        let token = from_query(Some("x=1&access_token=first&access_token=second")).unwrap();
        assert_eq!(token.as_str(), "first");
    }

    #[test]
    fn query_token_is_percent_decoded() {
        let token = from_query(Some("access_token=a%2Fb")).unwrap();
        assert_eq!(token.as_str(), "a/b");
    }

    #[test]
    fn query_without_parameter_is_missing() {
        assert_eq!(from_query(None), Err(ExtractError::MissingCredential));
        assert_eq!(
            from_query(Some("token=abc")),
            Err(ExtractError::MissingCredential)
        );
    }

    #[test]
    fn query_value_must_match_entirely() {
        assert_eq!(
            from_query(Some("access_token=bad%20token")),
            Err(ExtractError::MalformedCredential)
        );
        assert_eq!(
            from_query(Some("access_token=")),
            Err(ExtractError::MalformedCredential)
        );
        assert_eq!(
            from_query(Some("access_token=abc%21")),
            Err(ExtractError::MalformedCredential)
        );
    }

    #[test]
    fn header_takes_precedence_over_query() {
        let token = extract(&headers(Some("Bearer t1")), &uri("/p?access_token=t2")).unwrap();
        assert_eq!(token.as_str(), "t1");
    }

    #[test]
    fn query_is_used_when_header_fails() {
        let token = extract(&headers(Some("Basic xyz")), &uri("/p?access_token=t2")).unwrap();
        assert_eq!(token.as_str(), "t2");

        let token = extract(&headers(Some("Bearer !!!")), &uri("/p?access_token=t2")).unwrap();
        assert_eq!(token.as_str(), "t2");
    }

    #[test]
    fn nothing_offered_is_missing() {
        assert_eq!(
            extract(&headers(None), &uri("/p")),
            Err(ExtractError::MissingCredential)
        );
        assert_eq!(
            extract(&headers(Some("Basic xyz")), &uri("/p?other=1")),
            Err(ExtractError::MissingCredential)
        );
    }

    #[test]
    fn malformed_header_without_query_is_malformed() {
        assert_eq!(
            extract(&headers(Some("Bearer !!!")), &uri("/p")),
            Err(ExtractError::MalformedCredential)
        );
    }

    #[test]
    fn malformed_query_outranks_missing_header() {
        assert_eq!(
            extract(&headers(None), &uri("/p?access_token=bad%20token")),
            Err(ExtractError::MalformedCredential)
        );
        assert_eq!(
            extract(&headers(Some("Basic xyz")), &uri("/p?access_token=bad%20token")),
            Err(ExtractError::MalformedCredential)
        );
    }

    #[test]
    fn extraction_is_repeatable() {
        let map = headers(Some("Bearer repeat"));
        let target = uri("/p?access_token=other");
        assert_eq!(extract(&map, &target), extract(&map, &target));
    }

    #[test]
    fn debug_output_hides_token() {
        let token = BearerToken::new_unchecked("secret");
        assert!(!format!("{token:?}").contains("secret"));
    }
}
