//! # Commands Module
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── show, add, remove, update
//! └── config.rs   ◄─── Effective configuration
//! ```
//!
//! Every cart command answers with the cart as it stands afterwards, so a
//! rejected mutation still shows the user what they have.

pub mod cart;
pub mod config;
