//! # Repository Module
//!
//! Database repository implementations for shoecart.
//!
//! ## Available Repositories
//!
//! - [`kv::KeyValueRepository`] - String snapshots addressed by key

pub mod kv;
