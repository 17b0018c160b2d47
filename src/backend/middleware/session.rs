/**
 * Session Layer
 *
 * Configures the `tower-sessions` manager that runs on every request. The
 * `sid` cookie is HttpOnly, `SameSite=Lax`, and records expire after the
 * configured idle timeout. Nothing is stored, and no cookie is sent, until a
 * handler writes to the session.
 */

use tower_sessions::cookie::{time::Duration as CookieDuration, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::backend::auth::cookies::SESSION_COOKIE;
use crate::backend::server::config::ServerConfig;

pub fn session_layer<S>(store: S, config: &ServerConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    let idle = i64::try_from(config.session_idle_timeout_secs).unwrap_or(i64::MAX);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(CookieDuration::seconds(idle)))
}
