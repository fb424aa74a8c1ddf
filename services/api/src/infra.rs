use member_board::posts::{NewPost, PostId, PostRecord, PostRepository};
use member_board::storage::RepositoryError;
use member_board::users::{
    MailError, MailMessage, MailSender, Modified, NewUser, User, UserId, UserRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct UserTable {
    rows: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

pub(crate) struct InMemoryUserRepository {
    table: Mutex<UserTable>,
    sequence: AtomicU64,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            table: Mutex::new(UserTable::default()),
            sequence: AtomicU64::new(1),
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut guard = self.table.lock().expect("repository mutex poisoned");
        if guard.by_email.contains_key(&user.email) {
            return Err(RepositoryError::Conflict);
        }
        let user = user.with_id(UserId(self.sequence.fetch_add(1, Ordering::Relaxed)));
        guard.by_email.insert(user.email.clone(), user.id);
        guard.rows.insert(user.id, user.clone());
        Ok(user)
    }

    fn modify(
        &self,
        id: UserId,
        change: &mut dyn FnMut(&mut User) -> bool,
    ) -> Result<Modified, RepositoryError> {
        let mut guard = self.table.lock().expect("repository mutex poisoned");
        let Some(stored) = guard.rows.get(&id) else {
            return Ok(Modified::Missing);
        };
        let mut candidate = stored.clone();
        if !change(&mut candidate) {
            return Ok(Modified::Declined(stored.clone()));
        }
        // Email is the unique key; it never changes after insert.
        if candidate.email != stored.email {
            return Err(RepositoryError::Conflict);
        }
        guard.rows.insert(id, candidate.clone());
        Ok(Modified::Applied(candidate))
    }

    fn fetch(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.table.lock().expect("repository mutex poisoned");
        Ok(guard.rows.get(&id).cloned())
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let guard = self.table.lock().expect("repository mutex poisoned");
        Ok(guard
            .by_email
            .get(email)
            .and_then(|id| guard.rows.get(id))
            .cloned())
    }
}

pub(crate) struct InMemoryPostRepository {
    records: Mutex<HashMap<PostId, PostRecord>>,
    sequence: AtomicU64,
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(1),
        }
    }
}

impl PostRepository for InMemoryPostRepository {
    fn insert(&self, post: NewPost) -> Result<PostRecord, RepositoryError> {
        let record = post.with_id(PostId(self.sequence.fetch_add(1, Ordering::Relaxed)));
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, post: PostRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&post.id) {
            guard.insert(post.id, post);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: PostId) -> Result<Option<PostRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

/// Writes outgoing mail to the log instead of delivering it.
#[derive(Default, Clone)]
pub(crate) struct LoggingMailSender;

impl MailSender for LoggingMailSender {
    fn send(&self, message: MailMessage) -> Result<(), MailError> {
        info!(to = %message.to, subject = %message.subject, body = %message.body, "mail queued");
        Ok(())
    }
}
