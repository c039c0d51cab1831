//! Behaviour tests for the login flow.
//!
//! These scenarios drive `LoginFlow` end to end against a stub directory and
//! the file-backed session store in a temporary directory.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::sync::Arc;

use frontend::domain::login_flow::{
    DEFAULT_NAVIGATION_DELAY, DIRECTORY_UNAVAILABLE_MESSAGE, MISSING_FIELDS_MESSAGE,
    NOT_VERIFIED_MESSAGE,
};
use frontend::domain::ports::{
    AccountDirectoryError, AdminAuthenticator, Destination, DisabledAdminAuthenticator,
    NavigationRequest, RecordingNavigator, SessionStore,
};
use frontend::domain::{
    LoginFlow, LoginFlowPorts, LoginFlowRuntime, LoginOutcome, PortalRole, SessionRole, Severity,
};
use frontend::outbound::admin::SentinelAdminAuthenticator;
use frontend::outbound::session::FileSessionStore;
use frontend::test_support::cap_fs::temp_dir;
use frontend::test_support::login_flow::{
    MutableClock, RecordingSleeper, StubAccountDirectory, pending_account, verified_account,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use tokio::runtime::Runtime;

struct LoginWorld {
    runtime: Runtime,
    _root: TempDir,
    directory: Arc<StubAccountDirectory>,
    sessions: Arc<FileSessionStore>,
    navigator: Arc<RecordingNavigator>,
    admin: RefCell<Option<Arc<dyn AdminAuthenticator>>>,
    flow: RefCell<Option<LoginFlow>>,
    outcome: RefCell<Option<LoginOutcome>>,
}

impl LoginWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let root = temp_dir().expect("temp dir");
        let sessions = Arc::new(FileSessionStore::new(root.path().join("store")));
        Self {
            runtime,
            _root: root,
            directory: Arc::new(StubAccountDirectory::new()),
            sessions,
            navigator: Arc::new(RecordingNavigator::new()),
            admin: RefCell::new(None),
            flow: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn with_flow<R>(&self, f: impl FnOnce(&LoginFlow) -> R) -> R {
        let mut slot = self.flow.borrow_mut();
        let flow = slot.get_or_insert_with(|| {
            let admin = self
                .admin
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Arc::new(DisabledAdminAuthenticator));
            LoginFlow::new(
                LoginFlowPorts {
                    directory: self.directory.clone(),
                    admin,
                    sessions: self.sessions.clone(),
                    navigator: self.navigator.clone(),
                },
                LoginFlowRuntime {
                    sleeper: Arc::new(RecordingSleeper::default()),
                    clock: Arc::new(MutableClock::default()),
                    navigation_delay: DEFAULT_NAVIGATION_DELAY,
                },
            )
        });
        f(flow)
    }

    fn submit(&self, email: &str, password: &str) {
        let outcome = self.with_flow(|flow| {
            flow.set_email(email);
            flow.set_password(password);
            self.runtime.block_on(flow.submit_form())
        });
        *self.outcome.borrow_mut() = Some(outcome);
    }

    fn with_outcome<F>(&self, f: F)
    where
        F: FnOnce(&LoginOutcome),
    {
        let outcome = self.outcome.borrow();
        f(outcome.as_ref().expect("a submission should have run"));
    }
}

#[fixture]
fn world() -> LoginWorld {
    LoginWorld::new()
}

#[given("a directory with a verified donor {email} using password {password}")]
fn a_directory_with_a_verified_donor(world: &LoginWorld, email: String, password: String) {
    world
        .directory
        .insert(PortalRole::Donor, &password, verified_account("12", &email, "Dan"));
}

#[given("a directory with an unverified donor {email} using password {password}")]
fn a_directory_with_an_unverified_donor(world: &LoginWorld, email: String, password: String) {
    world
        .directory
        .insert(PortalRole::Donor, &password, pending_account("13", &email, "Pat"));
}

#[given("a configured administrator {email} using password {password}")]
fn a_configured_administrator(world: &LoginWorld, email: String, password: String) {
    let sentinel = SentinelAdminAuthenticator::from_config(Some(&email), Some(&password))
        .expect("sentinel configuration");
    *world.admin.borrow_mut() = Some(Arc::new(sentinel));
}

#[given("an unreachable directory")]
fn an_unreachable_directory(world: &LoginWorld) {
    world
        .directory
        .fail_with(AccountDirectoryError::connection("connection refused"));
}

#[when("the visitor switches to the donor role")]
fn the_visitor_switches_to_the_donor_role(world: &LoginWorld) {
    world.with_flow(|flow| world.runtime.block_on(flow.switch_role(PortalRole::Donor)));
    world.with_flow(|flow| assert_eq!(flow.view().active_role, PortalRole::Donor));
}

#[when("the visitor submits {email} with password {password}")]
fn the_visitor_submits(world: &LoginWorld, email: String, password: String) {
    world.submit(&email, &password);
}

#[when("the visitor submits an empty form")]
fn the_visitor_submits_an_empty_form(world: &LoginWorld) {
    world.submit("", "");
}

#[then("the visitor is welcomed as {name}")]
fn the_visitor_is_welcomed(world: &LoginWorld, name: String) {
    world.with_outcome(|outcome| {
        let feedback = outcome.feedback();
        assert_eq!(feedback.severity(), Severity::Success);
        assert_eq!(feedback.text(), format!("Welcome, {name}!"));
    });
}

#[then("a donor session is stored")]
fn a_donor_session_is_stored(world: &LoginWorld) {
    let session = world
        .sessions
        .current_session()
        .expect("read session")
        .expect("session stored");
    assert_eq!(session.role, SessionRole::Donor);
    assert_eq!(
        world.sessions.current_role().expect("read role"),
        Some(SessionRole::Donor)
    );
}

#[then("an admin session is stored")]
fn an_admin_session_is_stored(world: &LoginWorld) {
    assert_eq!(
        world.sessions.current_role().expect("read role"),
        Some(SessionRole::Admin)
    );
}

#[then("no session is stored")]
fn no_session_is_stored(world: &LoginWorld) {
    assert!(world.sessions.current_session().expect("read").is_none());
    assert!(world.navigator.requests().is_empty());
}

#[then("the visitor is sent to the landing page with a reload")]
fn the_visitor_is_sent_to_the_landing_page(world: &LoginWorld) {
    assert_eq!(
        world.navigator.requests(),
        vec![NavigationRequest::with_reload(Destination::Landing)]
    );
}

#[then("the visitor is sent to the admin dashboard")]
fn the_visitor_is_sent_to_the_admin_dashboard(world: &LoginWorld) {
    assert_eq!(
        world.navigator.requests(),
        vec![NavigationRequest::to(Destination::AdminDashboard)]
    );
}

#[then("the visitor is warned the account is not verified")]
fn the_visitor_is_warned(world: &LoginWorld) {
    world.with_outcome(|outcome| {
        assert_eq!(outcome, &LoginOutcome::PendingVerification);
        assert_eq!(outcome.feedback().text(), NOT_VERIFIED_MESSAGE);
    });
}

#[then("the visitor is asked to fill in all fields")]
fn the_visitor_is_asked_to_fill_in_all_fields(world: &LoginWorld) {
    world.with_outcome(|outcome| {
        assert_eq!(outcome.feedback().text(), MISSING_FIELDS_MESSAGE);
    });
}

#[then("the visitor is told the directory is unavailable")]
fn the_visitor_is_told_the_directory_is_unavailable(world: &LoginWorld) {
    world.with_outcome(|outcome| {
        let LoginOutcome::Failed(error) = outcome else {
            panic!("expected a failure, got {outcome:?}");
        };
        assert!(error.is_retryable());
        assert_eq!(error.message(), DIRECTORY_UNAVAILABLE_MESSAGE);
    });
}

#[then("the directory was not queried")]
fn the_directory_was_not_queried(world: &LoginWorld) {
    assert_eq!(world.directory.lookups(), 0);
}

#[scenario(
    path = "tests/features/login_flow.feature",
    name = "Verified donor signs in after switching role"
)]
fn verified_donor_signs_in_after_switching_role(world: LoginWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/login_flow.feature",
    name = "Unverified accounts are held back"
)]
fn unverified_accounts_are_held_back(world: LoginWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/login_flow.feature",
    name = "Empty fields never reach the directory"
)]
fn empty_fields_never_reach_the_directory(world: LoginWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/login_flow.feature",
    name = "Configured administrator bypasses the directory"
)]
fn configured_administrator_bypasses_the_directory(world: LoginWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/login_flow.feature",
    name = "Unreachable directory is reported as retryable"
)]
fn unreachable_directory_is_reported_as_retryable(world: LoginWorld) {
    drop(world);
}
