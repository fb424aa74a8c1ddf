use serde::{Deserialize, Serialize};

use super::domain::{NewUser, User, UserId};
use crate::storage::RepositoryError;

/// Storage abstraction over user records.
///
/// Implementations assign ids on insert and must reject a second record with
/// the same email with [`RepositoryError::Conflict`].
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
    /// Run `change` against the stored user and persist the result, without
    /// letting another write interleave. `change` returning `false` leaves the
    /// record untouched. The email is the unique key and must not change.
    fn modify(
        &self,
        id: UserId,
        change: &mut dyn FnMut(&mut User) -> bool,
    ) -> Result<Modified, RepositoryError>;
    fn fetch(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
    fn fetch_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}

/// Outcome of [`UserRepository::modify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modified {
    Missing,
    /// The change declined; carries the record as stored.
    Declined(User),
    Applied(User),
}

/// Outbound mail hook (SMTP relay, transactional mail API, or a log sink).
pub trait MailSender: Send + Sync {
    fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}
