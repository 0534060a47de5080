use validator::Validate;

use super::TaskService;
use crate::auth::{AuthResponse, SignInRequest, SignUpRequest};
use crate::error::AppError;
use crate::models::{normalize_email, User};

impl TaskService {
    /// Registers a new user and opens a session for it.
    ///
    /// # Errors
    /// - `ValidationError` for malformed input.
    /// - `BadRequest` if the email is already registered.
    pub async fn sign_up(&self, input: SignUpRequest) -> Result<AuthResponse, AppError> {
        input.validate()?;
        let email = normalize_email(&input.email);

        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".into()));
        }

        let password_hash = self.hash_blocking(input.password).await?;
        let user = User::new(input.name, &email, password_hash, input.avatar);
        // The gateway's uniqueness check covers a concurrent sign-up with the same email.
        let user = self.store.insert_user(&user).await?;
        log::info!("registered user {}", user.id);

        let token = self.credentials.issue_token(user.id)?;
        Ok(AuthResponse { user, token })
    }

    /// Verifies email and password and opens a session.
    ///
    /// Unknown email and wrong password fail identically with
    /// `InvalidCredentials`.
    pub async fn sign_in(&self, input: SignInRequest) -> Result<AuthResponse, AppError> {
        input.validate()?;
        let email = normalize_email(&input.email);

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            // Unknown emails pay for one bcrypt verification too.
            let dummy = self.credentials.dummy_credential().to_string();
            self.verify_blocking(input.password, dummy).await?;
            return Err(AppError::InvalidCredentials);
        };
        if !self
            .verify_blocking(input.password, user.password_hash.clone())
            .await?
        {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.credentials.issue_token(user.id)?;
        Ok(AuthResponse { user, token })
    }

    async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let credentials = self.credentials.clone();
        tokio::task::spawn_blocking(move || credentials.hash(&password))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Password hashing aborted: {}", e)))?
    }

    async fn verify_blocking(&self, password: String, credential: String) -> Result<bool, AppError> {
        let credentials = self.credentials.clone();
        tokio::task::spawn_blocking(move || credentials.verify(&password, &credential))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Password check aborted: {}", e)))
    }
}
