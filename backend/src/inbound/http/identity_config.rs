//! Identity token configuration parsing and validation.
//!
//! Centralises the environment-driven token settings (signing secret and
//! deployment environment) so they are validated consistently and can be
//! tested in isolation.

use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use tracing::{info, warn};
use zeroize::{Zeroize, Zeroizing};

use super::identity_cookie::CookiePolicy;

/// Inline signing secret.
pub const TOKEN_SECRET_ENV: &str = "VOLUNTEER_TOKEN_SECRET";
/// Path to a file holding the signing secret.
pub const TOKEN_SECRET_FILE_ENV: &str = "VOLUNTEER_TOKEN_SECRET_FILE";
/// Deployment environment; `production` switches cookie attributes.
pub const ENVIRONMENT_ENV: &str = "VOLUNTEER_ENV";
/// Minimum secret length accepted by release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Build mode for identity configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing secret and emit warnings.
    Debug,
    /// Release builds require an explicit, adequately long secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use volunteer_backend::inbound::http::identity_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Identity settings derived from the environment.
pub struct IdentitySettings {
    secret: Zeroizing<Vec<u8>>,
    /// Attributes for the `token` cookie.
    pub cookie_policy: CookiePolicy,
}

impl IdentitySettings {
    /// Signing secret bytes. Wiped when the settings are dropped.
    pub fn secret(&self) -> &[u8] {
        self.secret.as_slice()
    }
}

impl std::fmt::Debug for IdentitySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentitySettings")
            .field("secret", &"<redacted>")
            .field("cookie_policy", &self.cookie_policy)
            .finish()
    }
}

/// Errors raised while validating identity configuration.
#[derive(thiserror::Error, Debug)]
pub enum IdentityConfigError {
    /// No secret was configured in a release build.
    #[error("missing required environment variable: {TOKEN_SECRET_ENV} or {TOKEN_SECRET_FILE_ENV}")]
    MissingSecret,
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret is too short for release builds.
    #[error("token secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Build identity settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use volunteer_backend::inbound::http::identity_config::{
///     identity_settings_from_env, BuildMode,
/// };
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "VOLUNTEER_TOKEN_SECRET" => Some("x".repeat(48)),
///     "VOLUNTEER_ENV" => Some("production".to_owned()),
///     _ => None,
/// });
///
/// let settings = identity_settings_from_env(&env, BuildMode::Release).unwrap();
/// assert!(settings.cookie_policy.secure());
/// ```
pub fn identity_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<IdentitySettings, IdentityConfigError> {
    let cookie_policy = cookie_policy_from_env(env);
    let secret = secret_from_env(env, mode)?;
    Ok(IdentitySettings {
        secret,
        cookie_policy,
    })
}

fn cookie_policy_from_env<E: Env>(env: &E) -> CookiePolicy {
    match env.string(ENVIRONMENT_ENV) {
        Some(value) if value.trim().eq_ignore_ascii_case("production") => {
            CookiePolicy::production()
        }
        Some(value) => {
            info!(environment = %value, "non-production environment; strict cookies");
            CookiePolicy::development()
        }
        None => CookiePolicy::development(),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, IdentityConfigError> {
    let configured = match env.string(TOKEN_SECRET_ENV) {
        Some(mut value) if !value.is_empty() => {
            let bytes = Zeroizing::new(value.as_bytes().to_vec());
            value.zeroize();
            Some(bytes)
        }
        _ => match env.string(TOKEN_SECRET_FILE_ENV) {
            Some(path) => read_secret_file(PathBuf::from(path))?,
            None => None,
        },
    };

    let Some(secret) = configured else {
        if mode.is_debug() {
            warn!("no token secret configured; using ephemeral secret (dev only)");
            return Ok(ephemeral_secret());
        }
        return Err(IdentityConfigError::MissingSecret);
    };

    let length = secret.len();
    if length < TOKEN_SECRET_MIN_LEN {
        if !mode.is_debug() {
            return Err(IdentityConfigError::SecretTooShort {
                length,
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
        warn!(length, "token secret shorter than recommended");
    }
    Ok(secret)
}

/// Read a secret file, trimming trailing whitespace.
///
/// A file holding nothing but whitespace counts as no secret at all.
fn read_secret_file(path: PathBuf) -> Result<Option<Zeroizing<Vec<u8>>>, IdentityConfigError> {
    let mut bytes = std::fs::read(&path)
        .map(Zeroizing::new)
        .map_err(|source| IdentityConfigError::SecretRead { path, source })?;
    let trimmed_len = bytes
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(0, |index| index + 1);
    if trimmed_len == 0 {
        warn!("token secret file is empty; ignoring it");
        return Ok(None);
    }
    bytes.truncate(trimmed_len);
    Ok(Some(bytes))
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    rand::thread_rng().fill_bytes(bytes.as_mut_slice());
    bytes
}
