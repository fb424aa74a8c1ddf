//! Seams for the two non-deterministic inputs of the services: wall-clock time
//! and certification code generation.

use chrono::Utc;
use uuid::Uuid;

/// Source of the current time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn millis(&self) -> i64 {
        self.0
    }
}

/// Issues the one-time code mailed to a newly registered user.
pub trait CertificationCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Hyphenated random UUID v4, e.g. `aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaab`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidCodeGenerator;

impl CertificationCodeGenerator for UuidCodeGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Always hands out the same code.
#[derive(Debug, Clone)]
pub struct FixedCodeGenerator(pub String);

impl CertificationCodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        self.0.clone()
    }
}
