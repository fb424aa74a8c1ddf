use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{NewUser, User, UserCreate, UserId, UserStatus, UserUpdate};
use super::repository::{MailError, MailMessage, MailSender, Modified, UserRepository};
use crate::storage::RepositoryError;
use crate::support::{CertificationCodeGenerator, Clock, SystemClock, UuidCodeGenerator};

pub const CERTIFICATION_MAIL_SUBJECT: &str = "Please certify your email address";

/// Settings for the links embedded in verification mails.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Externally reachable origin of this service, without trailing slash.
    pub public_base_url: String,
}

/// User lifecycle: registration, verification, lookups, profile updates and
/// login bookkeeping.
pub struct UserService<R, M> {
    repository: Arc<R>,
    mailer: Arc<M>,
    clock: Arc<dyn Clock>,
    codes: Arc<dyn CertificationCodeGenerator>,
    config: UserServiceConfig,
}

impl<R, M> UserService<R, M>
where
    R: UserRepository + 'static,
    M: MailSender + 'static,
{
    pub fn new(repository: Arc<R>, mailer: Arc<M>, config: UserServiceConfig) -> Self {
        Self {
            repository,
            mailer,
            clock: Arc::new(SystemClock),
            codes: Arc::new(UuidCodeGenerator),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_code_generator(mut self, codes: Arc<dyn CertificationCodeGenerator>) -> Self {
        self.codes = codes;
        self
    }

    /// Return the active user registered under `email`.
    pub fn get_by_email(&self, email: &str) -> Result<User, UserServiceError> {
        self.repository
            .fetch_by_email(email)?
            .filter(User::is_active)
            .ok_or_else(|| UserServiceError::NotFound(UserLookup::Email(email.to_string())))
    }

    /// Return the active user with `id`.
    pub fn get_by_id(&self, id: UserId) -> Result<User, UserServiceError> {
        active_user(self.repository.as_ref(), id)
    }

    /// Register a pending user and mail them their certification code.
    pub fn create(&self, request: UserCreate) -> Result<User, UserServiceError> {
        if self.repository.fetch_by_email(&request.email)?.is_some() {
            return Err(UserServiceError::DuplicateEmail(request.email));
        }

        let email = request.email.clone();
        let draft = NewUser {
            email: request.email,
            nickname: request.nickname,
            address: request.address,
            status: UserStatus::Pending,
            certification_code: self.codes.generate(),
        };

        let user = self.repository.insert(draft).map_err(|err| match err {
            RepositoryError::Conflict => UserServiceError::DuplicateEmail(email),
            other => other.into(),
        })?;
        info!(user_id = %user.id, "user registered, awaiting email verification");

        self.mailer.send(self.certification_mail(&user))?;
        Ok(user)
    }

    /// Apply the supplied profile fields to an active user.
    pub fn update(&self, id: UserId, update: UserUpdate) -> Result<User, UserServiceError> {
        let modified = self.repository.modify(id, &mut |user: &mut User| {
            if !user.is_active() {
                return false;
            }
            update.apply(user);
            true
        })?;

        match modified {
            Modified::Applied(user) => Ok(user),
            Modified::Missing | Modified::Declined(_) => {
                Err(UserServiceError::NotFound(UserLookup::Id(id)))
            }
        }
    }

    /// Record a login at the current time.
    pub fn login(&self, id: UserId) -> Result<User, UserServiceError> {
        let now = self.clock.millis();
        let modified = self.repository.modify(id, &mut |user: &mut User| {
            user.last_login_at = Some(now);
            true
        })?;

        match modified {
            Modified::Applied(user) | Modified::Declined(user) => {
                debug!(user_id = %id, "login recorded");
                Ok(user)
            }
            Modified::Missing => Err(UserServiceError::NotFound(UserLookup::Id(id))),
        }
    }

    /// Activate a pending user presenting the code that was mailed to them.
    /// The code is single use: an already active user is rejected.
    pub fn verify_email(
        &self,
        id: UserId,
        certification_code: &str,
    ) -> Result<User, UserServiceError> {
        let modified = self.repository.modify(id, &mut |user: &mut User| {
            if user.status != UserStatus::Pending || user.certification_code != certification_code
            {
                return false;
            }
            user.status = UserStatus::Active;
            true
        })?;

        match modified {
            Modified::Applied(user) => {
                info!(user_id = %id, "email verified, user activated");
                Ok(user)
            }
            Modified::Declined(_) => Err(UserServiceError::CertificationCodeMismatch),
            Modified::Missing => Err(UserServiceError::NotFound(UserLookup::Id(id))),
        }
    }

    fn certification_mail(&self, user: &User) -> MailMessage {
        let link = format!(
            "{}/api/users/{}/verify?certificationCode={}",
            self.config.public_base_url, user.id, user.certification_code
        );
        MailMessage {
            to: user.email.clone(),
            subject: CERTIFICATION_MAIL_SUBJECT.to_string(),
            body: format!("Please click the following link to certify your email address: {link}"),
        }
    }
}

/// Lookup shared with services that reference users, such as post writers.
/// Pending users are reported as missing.
pub(crate) fn active_user<R>(repository: &R, id: UserId) -> Result<User, UserServiceError>
where
    R: UserRepository + ?Sized,
{
    repository
        .fetch(id)?
        .filter(User::is_active)
        .ok_or(UserServiceError::NotFound(UserLookup::Id(id)))
}

/// Key used for a failed user lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(UserId),
    Email(String),
}

impl fmt::Display for UserLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserLookup::Id(id) => write!(f, "id {id}"),
            UserLookup::Email(email) => write!(f, "email {email}"),
        }
    }
}

/// Error raised by the user service.
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("user with {0} not found")]
    NotFound(UserLookup),
    #[error("certification code does not match")]
    CertificationCodeMismatch,
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Mail(#[from] MailError),
}
