use std::fmt;

use serde::{Deserialize, Serialize};

use crate::users::{User, UserId, UserResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored form of a post; the writer is kept by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub writer_id: UserId,
    pub content: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds of the last update, `None` until the first one.
    pub modified_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub writer_id: UserId,
    pub content: String,
    pub created_at: i64,
}

impl NewPost {
    pub fn with_id(self, id: PostId) -> PostRecord {
        PostRecord {
            id,
            writer_id: self.writer_id,
            content: self.content,
            created_at: self.created_at,
            modified_at: None,
        }
    }
}

/// A post with its writer resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub created_at: i64,
    pub modified_at: Option<i64>,
    pub writer: User,
}

impl Post {
    pub(crate) fn resolve(record: PostRecord, writer: User) -> Self {
        Self {
            id: record.id,
            content: record.content,
            created_at: record.created_at,
            modified_at: record.modified_at,
            writer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreate {
    pub writer_id: UserId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdate {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub content: String,
    pub created_at: i64,
    pub modified_at: Option<i64>,
    pub writer: UserResponse,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            content: post.content.clone(),
            created_at: post.created_at,
            modified_at: post.modified_at,
            writer: UserResponse::from(&post.writer),
        }
    }
}
