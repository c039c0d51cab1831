//! Inbound adapters that translate external requests into login flow calls
//! while keeping framework details at the edge.
//!
//! The terminal front end lives under [`cli`].

pub mod cli;
