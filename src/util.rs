use regex::Regex;
use ring::hmac;
use serde::{Deserialize, Deserializer};

use std::sync::OnceLock;

/// Current unix timestamp in milliseconds, as Binance expects in signed requests.
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// HMAC-SHA256 of `payload` keyed with `secret`, as lowercase hex.
pub fn sign_payload(secret: &str, payload: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, payload.as_bytes());
    hex::encode(tag.as_ref())
}

/// Replace the value of a `signature` query parameter so URLs can be logged.
pub fn redact_signature(url: &str) -> String {
    static SIGNATURE_RE: OnceLock<Regex> = OnceLock::new();
    let re = SIGNATURE_RE
        .get_or_init(|| Regex::new(r"signature=[0-9A-Fa-f]+").expect("signature pattern is valid"));
    re.replace_all(url, "signature=<redacted>").into_owned()
}

/// Parse a user supplied number, returning it only when finite and strictly positive.
pub fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Binance sends decimals as JSON strings ("0.00000"), occasionally as numbers.
/// Accept both; a missing, null or empty value is `None`.
pub fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match Option::<NumOrStr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrStr::Num(v)) => Ok(Some(v)),
        Some(NumOrStr::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(NumOrStr::Str(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid decimal '{s}': {e}"))),
    }
}
