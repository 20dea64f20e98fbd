//! JWT configuration loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse, env_required};

/// Minimum accepted length of the signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Token lifetime used when `JWT_TTL_HOURS` is unset.
pub const DEFAULT_TTL_HOURS: i64 = 48;

/// Longest accepted token lifetime: one year.
pub const MAX_TTL_HOURS: i64 = 24 * 365;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, at least 32 characters). There is no fallback secret.
/// - `JWT_TTL_HOURS` (optional, default 48, at most 8760)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Lifetime of issued tokens, in hours
    pub ttl_hours: i64,
}

impl JwtConfig {
    /// Build a config, applying the same checks as [`FromEnv::from_env`].
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Result<Self, ConfigError> {
        let secret = secret.into();

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                    MIN_SECRET_LEN,
                    secret.len()
                ),
            });
        }

        if !(1..=MAX_TTL_HOURS).contains(&ttl_hours) {
            return Err(ConfigError::ParseError {
                key: "JWT_TTL_HOURS".to_string(),
                details: format!(
                    "must be between 1 and {} hours (got {})",
                    MAX_TTL_HOURS, ttl_hours
                ),
            });
        }

        Ok(Self { secret, ttl_hours })
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        let ttl_hours = env_parse("JWT_TTL_HOURS", &DEFAULT_TTL_HOURS.to_string())?;

        Self::new(secret, ttl_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_from_env_valid() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_HOURS", None)],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.ttl_hours, DEFAULT_TTL_HOURS);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing_secret_fails() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_rejects_short_secret() {
        temp_env::with_var("JWT_SECRET", Some("fallback-secret"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }

    #[test]
    fn test_jwt_config_custom_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_HOURS", Some("12"))],
            || {
                assert_eq!(JwtConfig::from_env().unwrap().ttl_hours, 12);
            },
        );
    }

    #[test]
    fn test_jwt_config_rejects_non_positive_ttl() {
        assert!(JwtConfig::new(SECRET, 0).is_err());
        assert!(JwtConfig::new(SECRET, -5).is_err());
    }

    #[test]
    fn test_jwt_config_rejects_ttl_longer_than_a_year() {
        assert_eq!(JwtConfig::new(SECRET, MAX_TTL_HOURS).unwrap().ttl_hours, MAX_TTL_HOURS);
        assert!(JwtConfig::new(SECRET, MAX_TTL_HOURS + 1).is_err());

        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_TTL_HOURS", Some("9223372036854775807")),
            ],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_TTL_HOURS"));
            },
        );
    }
}
