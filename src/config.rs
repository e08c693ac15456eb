use crate::services::auth_service::PasswordPolicy;
use crate::utils::ConfigError;
use std::path::PathBuf;

/// Runtime settings, read from the environment (and `.env`) at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub users_file: PathBuf,
    pub public_dir: PathBuf,
    pub password_policy: PasswordPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?,
            None => 3000,
        };

        let users_file = lookup("USERS_FILE").unwrap_or_else(|| "users.json".to_string());
        let public_dir = lookup("PUBLIC_DIR").unwrap_or_else(|| "public".to_string());

        let cost = match lookup("BCRYPT_COST") {
            Some(value) => match value.parse::<u32>() {
                // bcrypt only accepts costs in 4..=31
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => return Err(ConfigError::InvalidValue { key: "BCRYPT_COST", value }),
            },
            None => bcrypt::DEFAULT_COST,
        };

        let password_policy = match lookup("PASSWORD_HASHING").as_deref() {
            None | Some("plaintext") => PasswordPolicy::Plaintext,
            Some("bcrypt") => PasswordPolicy::Bcrypt { cost },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "PASSWORD_HASHING",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            users_file: PathBuf::from(users_file),
            public_dir: PathBuf::from(public_dir),
            password_policy,
        })
    }
}
