//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **directory**: PostgREST-style account directory over reqwest
//! - **session**: file-backed session store laid out like browser storage
//! - **admin**: sentinel administrator check built from configuration
//! - **navigation**: navigator that reports transitions through tracing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod admin;
pub mod directory;
pub mod navigation;
pub mod session;
