use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::posts::{NewPost, PostId, PostRecord, PostRepository, PostService};
use crate::storage::RepositoryError;
use crate::support::{FixedClock, FixedCodeGenerator};
use crate::users::{
    MailError, MailMessage, MailSender, Modified, NewUser, User, UserId, UserRepository,
    UserService, UserServiceConfig, UserStatus,
};

pub(crate) const NOW: i64 = 1_678_530_673_958;
pub(crate) const ACTIVE_CODE: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";
pub(crate) const PENDING_CODE: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaab";
pub(crate) const ISSUED_CODE: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaac";
pub(crate) const BASE_URL: &str = "http://localhost:8080";

#[derive(Default, Clone)]
pub(crate) struct MemoryUserRepository {
    records: Arc<Mutex<BTreeMap<UserId, User>>>,
}

impl MemoryUserRepository {
    pub(crate) fn seed(&self, user: User) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(user.id, user);
    }

    pub(crate) fn stored(&self, id: UserId) -> Option<User> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(&id)
            .cloned()
    }
}

impl UserRepository for MemoryUserRepository {
    fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::Conflict);
        }
        let id = UserId(guard.keys().next_back().map_or(1, |last| last.0 + 1));
        let user = user.with_id(id);
        guard.insert(id, user.clone());
        Ok(user)
    }

    fn modify(
        &self,
        id: UserId,
        change: &mut dyn FnMut(&mut User) -> bool,
    ) -> Result<Modified, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let Some(slot) = guard.get_mut(&id) else {
            return Ok(Modified::Missing);
        };
        let mut candidate = slot.clone();
        if change(&mut candidate) {
            *slot = candidate.clone();
            Ok(Modified::Applied(candidate))
        } else {
            Ok(Modified::Declined(slot.clone()))
        }
    }

    fn fetch(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.stored(id))
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().find(|user| user.email == email).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryPostRepository {
    records: Arc<Mutex<BTreeMap<PostId, PostRecord>>>,
}

impl MemoryPostRepository {
    pub(crate) fn seed(&self, post: PostRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(post.id, post);
    }
}

impl PostRepository for MemoryPostRepository {
    fn insert(&self, post: NewPost) -> Result<PostRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = PostId(guard.keys().next_back().map_or(1, |last| last.0 + 1));
        let record = post.with_id(id);
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, post: PostRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&post.id) {
            Some(slot) => {
                *slot = post;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: PostId) -> Result<Option<PostRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

pub(crate) struct UnavailableUserRepository;

impl UserRepository for UnavailableUserRepository {
    fn insert(&self, _user: NewUser) -> Result<User, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn modify(
        &self,
        _id: UserId,
        _change: &mut dyn FnMut(&mut User) -> bool,
    ) -> Result<Modified, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: UserId) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_by_email(&self, _email: &str) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(crate) struct RecordingMailer {
    sent: Arc<Mutex<Vec<MailMessage>>>,
}

impl RecordingMailer {
    pub(crate) fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl MailSender for RecordingMailer {
    fn send(&self, message: MailMessage) -> Result<(), MailError> {
        self.sent.lock().expect("mailer mutex poisoned").push(message);
        Ok(())
    }
}

pub(crate) struct OfflineMailer;

impl MailSender for OfflineMailer {
    fn send(&self, _message: MailMessage) -> Result<(), MailError> {
        Err(MailError::Transport("smtp relay refused connection".to_string()))
    }
}

pub(crate) fn active_user() -> User {
    User {
        id: UserId(1),
        email: "meme@naver.com".to_string(),
        nickname: "meme".to_string(),
        address: "Seoul".to_string(),
        status: UserStatus::Active,
        certification_code: ACTIVE_CODE.to_string(),
        last_login_at: Some(0),
    }
}

pub(crate) fn pending_user() -> User {
    User {
        id: UserId(2),
        email: "mymy@naver.com".to_string(),
        nickname: "mymy".to_string(),
        address: "Seoul".to_string(),
        status: UserStatus::Pending,
        certification_code: PENDING_CODE.to_string(),
        last_login_at: None,
    }
}

pub(crate) fn first_post() -> PostRecord {
    PostRecord {
        id: PostId(1),
        writer_id: UserId(1),
        content: "helloworld".to_string(),
        created_at: 1_678_530_673_958,
        modified_at: None,
    }
}

/// Repository holding one active and one pending user.
pub(crate) fn seeded_users() -> Arc<MemoryUserRepository> {
    let repository = Arc::new(MemoryUserRepository::default());
    repository.seed(active_user());
    repository.seed(pending_user());
    repository
}

pub(crate) fn user_service(
    repository: Arc<MemoryUserRepository>,
) -> (UserService<MemoryUserRepository, RecordingMailer>, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let service = UserService::new(
        repository,
        mailer.clone(),
        UserServiceConfig {
            public_base_url: BASE_URL.to_string(),
        },
    )
    .with_clock(Arc::new(FixedClock(NOW)))
    .with_code_generator(Arc::new(FixedCodeGenerator(ISSUED_CODE.to_string())));
    (service, mailer)
}

/// Post service over the seeded users and a single stored post.
pub(crate) fn post_service() -> (
    PostService<MemoryPostRepository, MemoryUserRepository>,
    Arc<MemoryPostRepository>,
) {
    let posts = Arc::new(MemoryPostRepository::default());
    posts.seed(first_post());
    let service =
        PostService::new(posts.clone(), seeded_users()).with_clock(Arc::new(FixedClock(NOW)));
    (service, posts)
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
