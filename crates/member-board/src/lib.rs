//! Member board core: user registration with email verification, post
//! management, and a small two-operand calculator.

pub mod calculator;
pub mod config;
pub mod error;
pub mod posts;
pub mod storage;
pub mod support;
pub mod telemetry;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
