use crate::{
    database::UserStore,
    models::User,
    utils::AppError,
};
use serde::Deserialize;

/// How passwords are written to and checked against the users file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPolicy {
    /// Literal value stored and compared as-is
    #[default]
    Plaintext,
    Bcrypt { cost: u32 },
}

impl PasswordPolicy {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        match self {
            PasswordPolicy::Plaintext => Ok(password.to_string()),
            PasswordPolicy::Bcrypt { cost } => bcrypt::hash(password, *cost)
                .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e))),
        }
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        match self {
            PasswordPolicy::Plaintext => password == stored,
            PasswordPolicy::Bcrypt { .. } => match bcrypt::verify(password, stored) {
                Ok(valid) => valid,
                Err(e) => {
                    log::warn!("⚠️  Stored password is not a bcrypt hash: {}", e);
                    false
                }
            },
        }
    }
}

/// Request body for both `/signup` and `/login`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Both fields must be present and non-empty.
    pub fn require(&self) -> Result<(&str, &str), AppError> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(AppError::MissingField),
        }
    }
}

// Create account
pub async fn signup(
    store: &UserStore,
    policy: &PasswordPolicy,
    credentials: &Credentials,
) -> Result<(), AppError> {
    let (email, password) = credentials.require()?;

    let _guard = store.lock().await;
    let mut users = store.load().await?;

    if users.iter().any(|user| user.email == email) {
        return Err(AppError::EmailExists);
    }

    let stored_password = policy.hash(password)?;
    users.push(User::new(email.to_string(), stored_password));

    store.save(&users).await?;

    log::info!("✅ User registered: {} ({} users total)", email, users.len());
    Ok(())
}

// Verify credentials
pub async fn login(
    store: &UserStore,
    policy: &PasswordPolicy,
    credentials: &Credentials,
) -> Result<(), AppError> {
    let (email, password) = credentials.require()?;

    let users = store.load().await?;

    let user = users
        .iter()
        .find(|user| user.email == email)
        .ok_or(AppError::InvalidCredentials)?;

    if !policy.verify(password, &user.password) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(())
}
