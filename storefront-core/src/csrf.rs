//! CSRF token lookup in a `document.cookie` style string.

/// Name of the cookie Django stores its CSRF token under.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Header that carries the token on POST requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Find `name` in a `k1=v1; k2=v2` cookie string and percent-decode its value.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        })
}
