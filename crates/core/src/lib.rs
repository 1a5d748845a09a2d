//! # CampusChat Core
//!
//! Domain types, traits, and error definitions for the CampusChat university
//! assistant. This crate has **zero framework dependencies**: it defines the
//! request/reply model and the `Provider` seam that the other crates build on.
//!
//! ## Layout
//!
//! - [`message`]: the inbound `ChatRequest`, outbound `ChatReply`, and the
//!   fixed reply texts every layer agrees on
//! - [`provider`]: the trait the remote text-generation fallback implements
//! - [`error`]: `thiserror` error types, one enum per bounded context

pub mod error;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ErrorKind, ProviderError, Result};
pub use message::{ChatReply, ChatRequest};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
