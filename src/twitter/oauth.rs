//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Every platform request carries an `Authorization: OAuth ...` header.
//! The signature covers the HTTP method, the bare request URL, and the
//! full parameter set (query plus oauth protocol parameters), each
//! RFC 3986 percent-encoded and sorted.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// The four credential strings of an OAuth 1.0a user context.
#[derive(Debug, Clone)]
pub struct OauthKeys {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

/// Build the `Authorization` header for one request. `url` is the bare
/// endpoint (no query string); `params` are the request's unencoded
/// query parameters.
pub fn authorization_header(
    keys: &OauthKeys,
    method: &str,
    url: &str,
    params: &[(&str, String)],
) -> String {
    let timestamp = chrono::Utc::now().timestamp().to_string();
    sign_request(keys, method, url, params, &timestamp, &nonce())
}

fn nonce() -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Deterministic core, split out so tests can pin timestamp and nonce.
fn sign_request(
    keys: &OauthKeys,
    method: &str,
    url: &str,
    params: &[(&str, String)],
    timestamp: &str,
    nonce: &str,
) -> String {
    let oauth_params: [(&str, &str); 6] = [
        ("oauth_consumer_key", keys.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", keys.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let mut encoded: Vec<(String, String)> = oauth_params
        .iter()
        .map(|(k, v)| (percent(k), percent(v)))
        .chain(params.iter().map(|(k, v)| (percent(k), percent(v))))
        .collect();
    encoded.sort();
    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent(url),
        percent(&parameter_string)
    );
    let signing_key = format!(
        "{}&{}",
        percent(&keys.consumer_secret),
        percent(&keys.access_token_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(signing_key.as_bytes()).expect("hmac accepts any key length");
    mac.update(base.as_bytes());
    let signature = B64.encode(mac.finalize().into_bytes());

    let mut header_params: Vec<(&str, String)> = oauth_params
        .iter()
        .map(|(k, v)| (*k, (*v).to_string()))
        .collect();
    header_params.push(("oauth_signature", signature));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!(r#"{}="{}""#, percent(k), percent(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {fields}")
}

fn percent(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}
