//! OAuth 1.0a request signing (HMAC-SHA1).

use crate::config::Credentials;
use crate::types::{PosterError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// Per-request values that make each signature unique
#[derive(Debug, Clone)]
pub struct OAuthNonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl OAuthNonce {
    pub fn generate() -> Self {
        Self {
            nonce: uuid::Uuid::new_v4().simple().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// RFC 3986 percent-encoding; everything but `A-Z a-z 0-9 - . _ ~` is escaped
pub fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

fn oauth_params(credentials: &Credentials, nonce: &OAuthNonce) -> Vec<(String, String)> {
    vec![
        ("oauth_consumer_key".to_string(), credentials.api_key.clone()),
        ("oauth_nonce".to_string(), nonce.nonce.clone()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), nonce.timestamp.to_string()),
        ("oauth_token".to_string(), credentials.access_token.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ]
}

/// Signature base string: `METHOD&enc(base_url)&enc(sorted params)`.
///
/// Query parameters of `url` and any `extra_params` (form fields) are signed together
/// with the oauth_* set. JSON bodies are not part of the signature.
pub fn signature_base_string(
    method: &str,
    url: &Url,
    oauth: &[(String, String)],
    extra_params: &[(&str, &str)],
) -> String {
    let mut params: Vec<(String, String)> = oauth
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .chain(
            url.query_pairs()
                .map(|(k, v)| (percent_encode(&k), percent_encode(&v))),
        )
        .chain(
            extra_params
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    params.sort();

    let param_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url.as_str()),
        percent_encode(&param_string)
    )
}

/// base64(HMAC-SHA1(consumer_secret&token_secret, base_string))
pub fn sign(base_string: &str, credentials: &Credentials) -> Result<String> {
    let key = format!(
        "{}&{}",
        percent_encode(&credentials.api_secret),
        percent_encode(&credentials.access_token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PosterError::Config(format!("Invalid signing key: {}", e)))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Value for the `Authorization` header of a signed request
pub fn authorization_header(
    method: &str,
    url: &Url,
    credentials: &Credentials,
    nonce: &OAuthNonce,
    extra_params: &[(&str, &str)],
) -> Result<String> {
    let mut oauth = oauth_params(credentials, nonce);
    let base_string = signature_base_string(method, url, &oauth, extra_params);
    oauth.push(("oauth_signature".to_string(), sign(&base_string, credentials)?));
    oauth.sort();

    let fields = oauth
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", fields))
}
