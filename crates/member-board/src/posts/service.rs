use std::sync::Arc;

use tracing::info;

use super::domain::{NewPost, Post, PostCreate, PostId, PostRecord, PostUpdate};
use super::repository::PostRepository;
use crate::storage::RepositoryError;
use crate::support::{Clock, SystemClock};
use crate::users::service::{active_user, UserLookup};
use crate::users::{User, UserId, UserRepository, UserServiceError};

/// Post create/read/update with writers resolved from the user store.
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PostService<P, U>
where
    P: PostRepository + 'static,
    U: UserRepository + 'static,
{
    pub fn new(posts: Arc<P>, users: Arc<U>) -> Self {
        Self {
            posts,
            users,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn get_by_id(&self, id: PostId) -> Result<Post, PostServiceError> {
        let record = self.record(id)?;
        self.resolve(record)
    }

    /// Create a post authored by an active user.
    pub fn create(&self, request: PostCreate) -> Result<Post, PostServiceError> {
        let writer = active_user(self.users.as_ref(), request.writer_id)?;
        let record = self.posts.insert(NewPost {
            writer_id: writer.id,
            content: request.content,
            created_at: self.clock.millis(),
        })?;
        info!(post_id = %record.id, writer_id = %writer.id, "post created");
        Ok(Post::resolve(record, writer))
    }

    /// Replace the content of an existing post and stamp the modification time.
    pub fn update(&self, id: PostId, update: PostUpdate) -> Result<Post, PostServiceError> {
        let mut record = self.record(id)?;
        let writer = self.writer(record.writer_id)?;
        record.content = update.content;
        record.modified_at = Some(self.clock.millis());
        self.posts.update(record.clone())?;
        Ok(Post::resolve(record, writer))
    }

    fn record(&self, id: PostId) -> Result<PostRecord, PostServiceError> {
        self.posts.fetch(id)?.ok_or(PostServiceError::NotFound(id))
    }

    fn resolve(&self, record: PostRecord) -> Result<Post, PostServiceError> {
        let writer = self.writer(record.writer_id)?;
        Ok(Post::resolve(record, writer))
    }

    /// Writer at any status; pending writers still own their posts.
    fn writer(&self, id: UserId) -> Result<User, PostServiceError> {
        let writer = self
            .users
            .fetch(id)?
            .ok_or(UserServiceError::NotFound(UserLookup::Id(id)))?;
        Ok(writer)
    }
}

/// Error raised by the post service.
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    #[error("post {0} not found")]
    NotFound(PostId),
    #[error("writer lookup failed: {0}")]
    User(#[from] UserServiceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
