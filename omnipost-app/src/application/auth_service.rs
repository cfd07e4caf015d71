use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use tracing::info;

use crate::data::feed_store::{FeedStore, UserRecord};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};

/// How passwords are sealed into the stored user record and verified at
/// login. Pluggable so the historical plain-text records keep working while
/// fresh deployments can opt into hashing; swapping schemes never changes
/// the service API.
pub trait CredentialScheme: Send + Sync {
    fn seal(&self, raw: &str) -> Result<String, DomainError>;
    fn verify(&self, raw: &str, sealed: &str) -> bool;

    /// Spend one verification without a stored credential, so a login
    /// against an unknown email does not return observably faster.
    fn burn(&self, raw: &str) {
        let _ = raw;
    }
}

/// Exact string comparison, credential stored as typed. This is what the
/// historical records contain; the default scheme for compatibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextCredentials;

impl CredentialScheme for PlainTextCredentials {
    fn seal(&self, raw: &str) -> Result<String, DomainError> {
        Ok(raw.to_string())
    }

    fn verify(&self, raw: &str, sealed: &str) -> bool {
        raw == sealed
    }
}

/// Salted argon2id hashing for fresh deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Credentials;

impl Argon2Credentials {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl CredentialScheme for Argon2Credentials {
    fn seal(&self, raw: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let sealed = Self::argon2()?
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(sealed.to_string())
    }

    fn verify(&self, raw: &str, sealed: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(sealed) else {
            return false;
        };
        let Ok(argon2) = Self::argon2() else {
            return false;
        };
        argon2.verify_password(raw.as_bytes(), &parsed).is_ok()
    }

    fn burn(&self, raw: &str) {
        // стремимся к одинаковому времени проверки если user не найден
        let _ = self.verify(raw, Self::DUMMY_PASSWORD_HASH);
    }
}

pub struct AuthService<S: FeedStore> {
    store: S,
    credentials: Box<dyn CredentialScheme>,
}

impl<S: FeedStore> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self::with_credentials(store, Box::new(PlainTextCredentials))
    }

    pub fn with_credentials(store: S, credentials: Box<dyn CredentialScheme>) -> Self {
        Self { store, credentials }
    }

    /// Creates the user, appends it to the user collection, and establishes
    /// it as the active session.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        let mut users = self.store.load_users().await?;
        if users
            .iter()
            .any(|record| record.user.email.eq_ignore_ascii_case(&req.email))
        {
            return Err(DomainError::DuplicateEmail);
        }
        if users.iter().any(|record| record.user.handle == req.handle) {
            return Err(DomainError::DuplicateHandle);
        }

        let user = User::create(req.name, req.handle, req.email, Utc::now());
        let password = self.credentials.seal(&req.password)?;
        users.push(UserRecord {
            user: user.clone(),
            password,
        });
        self.store.save_users(&users).await?;

        // регистрация сразу устанавливает сессию
        self.store.save_session(&user).await?;

        info!(user_id = %user.id, handle = %user.handle, "registered user");
        Ok(user)
    }

    /// Establishes the matching user as the active session.
    pub async fn login(&self, req: LoginRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        let users = self.store.load_users().await?;
        let record = users
            .iter()
            .find(|record| record.user.email.eq_ignore_ascii_case(&req.email));

        let Some(record) = record else {
            self.credentials.burn(&req.password);
            return Err(DomainError::InvalidCredentials);
        };

        if !self.credentials.verify(&req.password, &record.password) {
            return Err(DomainError::InvalidCredentials);
        }

        self.store.save_session(&record.user).await?;

        info!(user_id = %record.user.id, "logged in");
        Ok(record.user.clone())
    }

    /// Clears the active session; safe to call when nobody is logged in.
    pub async fn logout(&self) -> Result<(), DomainError> {
        self.store.clear_session().await
    }

    pub async fn current_session(&self) -> Result<Option<User>, DomainError> {
        self.store.load_session().await
    }
}
