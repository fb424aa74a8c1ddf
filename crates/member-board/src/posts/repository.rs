use super::domain::{NewPost, PostId, PostRecord};
use crate::storage::RepositoryError;

/// Storage abstraction over post records. Ids are assigned on insert.
pub trait PostRepository: Send + Sync {
    fn insert(&self, post: NewPost) -> Result<PostRecord, RepositoryError>;
    fn update(&self, post: PostRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: PostId) -> Result<Option<PostRecord>, RepositoryError>;
}
