use crate::config::SessionConfig;
use crate::error::AppError;

/// Login state for the single configured user.
#[derive(Debug)]
pub struct Session {
    credentials: SessionConfig,
    user: Option<String>,
}

impl Session {
    pub fn new(credentials: SessionConfig) -> Self {
        Self {
            credentials,
            user: None,
        }
    }

    /// Surrounding whitespace on either field is ignored.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AppError> {
        let username = username.trim();
        if username == self.credentials.username && password.trim() == self.credentials.password {
            tracing::info!("User {} logged in", username);
            self.user = Some(username.to_string());
            Ok(())
        } else {
            tracing::warn!("Rejected login attempt for {:?}", username);
            Err(AppError::InvalidCredentials)
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("User {} logged out", user);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn require_login(&self) -> Result<(), AppError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
