//! User registration, email verification and profile management.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{
    MyProfileResponse, NewUser, User, UserCreate, UserId, UserResponse, UserStatus, UserUpdate,
};
pub use repository::{MailError, MailMessage, MailSender, Modified, UserRepository};
pub use router::{user_router, EMAIL_HEADER};
pub use service::{
    UserLookup, UserService, UserServiceConfig, UserServiceError, CERTIFICATION_MAIL_SUBJECT,
};
