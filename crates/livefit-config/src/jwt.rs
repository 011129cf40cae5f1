use crate::{ConfigError, parsed_or, required};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in days.
    pub expires_days: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expires_days: i64) -> Self {
        Self {
            secret: secret.into(),
            expires_days,
        }
    }

    /// Reads `JWT_SECRET` (required) and `JWT_EXPIRES_DAY` (default 30).
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = required("JWT_SECRET")?;
        let expires_days = parsed_or("JWT_EXPIRES_DAY", 30);
        if expires_days <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRES_DAY",
                value: expires_days.to_string(),
            });
        }

        Ok(Self::new(secret, expires_days))
    }

    pub fn expires_in_seconds(&self) -> i64 {
        self.expires_days * SECONDS_PER_DAY
    }
}
