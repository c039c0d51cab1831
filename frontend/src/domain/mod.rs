//! Domain primitives, the login flow controller and its ports.
//!
//! Purpose: model sign-in for the two portal roles without touching any
//! transport, storage or rendering technology. Adapters plug in through the
//! traits in [`ports`].
//!
//! Public surface:
//! - DomainError / ErrorCode: failure payload surfaced to the visitor.
//! - LoginCredentials: validated email and zeroised password.
//! - PortalRole / SessionRole: selectable roles and stored role tags.
//! - Account / SessionRecord: directory rows and the persisted session.
//! - RoleToggle: flip animation state machine.
//! - LoginFlow: form state and submission orchestration.

pub mod account;
pub mod auth;
pub mod error;
pub mod feedback;
pub mod login_flow;
pub mod ports;
pub mod role;
pub mod role_toggle;
pub mod session;

pub use self::account::{Account, AccountId, VerifyStatus};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{DomainError, ErrorCode};
pub use self::feedback::{FeedbackMessage, Severity};
pub use self::login_flow::{
    LoginFlow, LoginFlowPorts, LoginFlowRuntime, LoginFormView, LoginOutcome,
};
pub use self::role::{PortalRole, SessionRole, UnknownRoleError};
pub use self::role_toggle::{FlipEvent, IgnoredReason, RoleToggle, ToggleState};
pub use self::session::SessionRecord;
