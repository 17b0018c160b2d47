/**
 * Signed Cookies
 *
 * Cookie values are signed with HMAC-SHA256 under the server secret and
 * carried as `s:<value>.<signature>` (percent-encoded), the signature being
 * unpadded standard base64. A value whose signature does not verify is
 * treated as if the cookie were absent.
 *
 * This module also renders the `Set-Cookie` values used by the service and
 * reads cookies back from request headers.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::COOKIE, HeaderMap};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Auth cookie holding `"true"` once the caller has logged in
pub const IS_AUTHENTICATED_COOKIE: &str = "isAuthenticated";

/// Auth cookie holding the logged-in user's id
pub const USER_ID_COOKIE: &str = "userId";

/// Cookie naming the server-side session
pub const SESSION_COOKIE: &str = "sid";

const SIGNED_PREFIX: &str = "s:";
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Signs and verifies cookie values
#[derive(Clone)]
pub struct CookieSigner {
    mac: Arc<HmacSha256>,
}

impl CookieSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .expect("HMAC accepts keys of any length");
        Self { mac: Arc::new(mac) }
    }

    fn signature(&self, value: &str) -> String {
        let mut mac = (*self.mac).clone();
        mac.update(value.as_bytes());
        STANDARD_NO_PAD.encode(mac.finalize().into_bytes())
    }

    /// Sign a value: `s:<value>.<signature>`
    pub fn sign(&self, value: &str) -> String {
        format!("{SIGNED_PREFIX}{value}.{}", self.signature(value))
    }

    /// Verify a signed value and return the original
    ///
    /// Returns `None` for unsigned, malformed or tampered values.
    pub fn unsign(&self, signed: &str) -> Option<String> {
        let body = signed.strip_prefix(SIGNED_PREFIX)?;
        let (value, signature) = body.rsplit_once('.')?;
        let expected = STANDARD_NO_PAD.decode(signature).ok()?;

        let mut mac = (*self.mac).clone();
        mac.update(value.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&expected).ok()?;
        Some(value.to_string())
    }

    /// Read and verify a signed cookie from request headers
    pub fn read_signed(&self, headers: &HeaderMap, name: &str) -> Option<String> {
        read_cookie(headers, name).and_then(|raw| self.unsign(&raw))
    }

    /// `Set-Cookie` value for a signed, HttpOnly auth cookie
    ///
    /// Both `Max-Age` and `Expires` are set to `ttl` from now. `Expires` is
    /// left out when `ttl` is beyond the representable date range.
    pub fn auth_cookie(&self, name: &str, value: &str, ttl: Duration, secure: bool) -> String {
        let signed = self.sign(value);
        let mut cookie = format!(
            "{name}={}; Max-Age={}; Path=/",
            urlencoding::encode(&signed),
            ttl.as_secs(),
        );
        if let Some(expires) = expires_after(ttl) {
            cookie.push_str(&format!("; Expires={}", expires.format(HTTP_DATE)));
        }
        cookie.push_str("; HttpOnly");
        if secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

fn expires_after(ttl: Duration) -> Option<DateTime<Utc>> {
    let ttl = chrono::Duration::from_std(ttl).ok()?;
    Utc::now().checked_add_signed(ttl)
}

/// `Set-Cookie` value that removes a cookie
pub fn clear_cookie(name: &str, secure: bool) -> String {
    let mut cookie = format!("{name}=; Max-Age=0; Path=/; Expires={EPOCH_HTTP_DATE}; HttpOnly");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// All cookies sent with a request, percent-decoded
///
/// Later duplicates do not override the first occurrence.
pub fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let Some((key, val)) = pair.trim().split_once('=') else {
                continue;
            };
            let val = val.trim().trim_matches('"');
            let decoded = urlencoding::decode(val)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| val.to_string());
            cookies.entry(key.trim().to_string()).or_insert(decoded);
        }
    }
    cookies
}

/// A single cookie from request headers, percent-decoded
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    parse_cookies(headers).remove(name)
}
