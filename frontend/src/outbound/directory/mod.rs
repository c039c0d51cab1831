//! Account directory outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `AccountDirectory` port.

mod dto;
mod rest_directory;

pub use rest_directory::RestAccountDirectory;
