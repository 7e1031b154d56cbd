//! Session cookie construction. Parsing and `Set-Cookie` emission are left
//! to `tower_cookies::CookieManagerLayer`.

use std::time::Duration;

use tower_cookies::cookie::{time, SameSite};
use tower_cookies::Cookie;

/// Cookie that stores `token` for `max_age`.
pub fn session(name: &str, token: String, max_age: Duration) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_owned(), token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::try_from(max_age).unwrap_or(time::Duration::MAX));
    cookie
}

/// Cookie to hand to `Cookies::remove`. The path has to match the one set by
/// [`session`] or browsers keep the original.
pub fn removal(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_owned(), "");
    cookie.set_path("/");
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let c = session("session", "abc=".into(), Duration::from_secs(60));
        assert_eq!(c.name(), "session");
        assert_eq!(c.value(), "abc=");
        assert_eq!(c.path(), Some("/"));
        assert_eq!(c.http_only(), Some(true));
        assert_eq!(c.same_site(), Some(SameSite::Lax));
        assert_eq!(c.max_age(), Some(time::Duration::seconds(60)));
    }

    #[test]
    fn removal_cookie_targets_root_path() {
        let c = removal("session");
        assert_eq!(c.name(), "session");
        assert_eq!(c.value(), "");
        assert_eq!(c.path(), Some("/"));
    }
}
