//! Posts owned by users.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{NewPost, Post, PostCreate, PostId, PostRecord, PostResponse, PostUpdate};
pub use repository::PostRepository;
pub use router::post_router;
pub use service::{PostService, PostServiceError};
