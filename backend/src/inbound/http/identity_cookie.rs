//! Transport of the identity token in the `token` cookie.
//!
//! The cookie is always `HttpOnly` on path `/`. Production deployments serve
//! the frontend from another origin, so they need `Secure; SameSite=None`;
//! everywhere else the cookie is `SameSite=Strict` and not marked secure.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

/// Name of the cookie carrying the identity token.
pub const TOKEN_COOKIE: &str = "token";

/// Attribute set applied to every identity cookie the service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    secure: bool,
    same_site: SameSite,
}

impl CookiePolicy {
    /// `Secure; SameSite=None`, for cross-site production frontends.
    pub const fn production() -> Self {
        Self {
            secure: true,
            same_site: SameSite::None,
        }
    }

    /// Not secure, `SameSite=Strict`.
    pub const fn development() -> Self {
        Self {
            secure: false,
            same_site: SameSite::Strict,
        }
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn same_site(&self) -> SameSite {
        self.same_site
    }

    /// Cookie carrying `token`.
    ///
    /// No `Max-Age` is set, so browsers treat it as a session cookie; the
    /// token's own expiry bounds its validity.
    ///
    /// # Examples
    /// ```
    /// use volunteer_backend::inbound::http::identity_cookie::CookiePolicy;
    ///
    /// let cookie = CookiePolicy::development().issue("abc");
    /// assert_eq!(cookie.name(), "token");
    /// assert_eq!(cookie.http_only(), Some(true));
    /// ```
    pub fn issue(&self, token: &str) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, token.to_owned())
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish()
    }

    /// Cookie that makes the browser drop the identity token.
    pub fn clear(&self) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(Duration::ZERO)
            .finish()
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::development()
    }
}
