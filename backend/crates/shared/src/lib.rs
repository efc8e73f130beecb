//! Shared Kernel - Vocabulary shared by every backend crate
//!
//! This crate holds only what has the same meaning everywhere:
//! - The unified error type and its classification
//! - Typed identifiers for users, organizations and protected records
//!
//! Authorization policy itself lives in the `rbac` crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
