//! Maddad Karo login flow library.
//!
//! Role-switching sign-in for receivers and donors, behind ports for the
//! account directory, session storage, navigation and timers.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

pub mod app;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod presentation;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
