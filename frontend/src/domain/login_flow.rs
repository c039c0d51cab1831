//! Login flow controller.
//!
//! Owns the login form state (role toggle, credentials, password visibility,
//! feedback message) and runs submissions: privileged bypass, email
//! validation, directory lookup, verification gate, session creation and
//! deferred navigation. Every collaborator is injected through a port.

use std::sync::atomic::{AtomicBool, Ordering};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mockable::{Clock, DefaultClock};
use serde_json::json;
use tokio::sync::Notify;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountDirectory, AccountDirectoryError, AdminAuthenticator, Destination, FlowSleeper,
    NavigationRequest, Navigator, SessionStore, TokioSleeper,
};
use crate::domain::role_toggle::{FLIP_TICK, FlipEvent, RoleToggle, ToggleState};
use crate::domain::{
    Account, DomainError, FeedbackMessage, LoginCredentials, LoginValidationError, PortalRole,
    SessionRecord,
};

/// Delay between a successful sign-in and the page transition.
pub const DEFAULT_NAVIGATION_DELAY: Duration = Duration::from_millis(500);

/// Shown when email or password is blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
/// Shown when the email fails the syntax check.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
/// Shown when no single account matches.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
/// Shown on directory connection faults and timeouts.
pub const DIRECTORY_UNAVAILABLE_MESSAGE: &str =
    "Could not reach the account directory, please try again";
/// Shown when the directory rejects the query or answers garbage.
pub const DIRECTORY_FAILURE_MESSAGE: &str = "Sign-in is unavailable right now";
/// Shown for accounts awaiting verification.
pub const NOT_VERIFIED_MESSAGE: &str = "Your account is not verified yet";
/// Shown when the session could not be persisted.
pub const SESSION_SAVE_MESSAGE: &str = "Could not save your session, please try again";
/// Shown for a submission overlapping a running one.
pub const BUSY_MESSAGE: &str = "Sign-in already in progress";
/// Reported for attempts cut short by teardown.
pub const DISPOSED_MESSAGE: &str = "Sign-in cancelled";

/// Port bundle required by the login flow.
pub struct LoginFlowPorts {
    /// Role-specific account lookups.
    pub directory: Arc<dyn AccountDirectory>,
    /// Privileged sign-in check, consulted before the directory.
    pub admin: Arc<dyn AdminAuthenticator>,
    /// Session persistence.
    pub sessions: Arc<dyn SessionStore>,
    /// Page transitions.
    pub navigator: Arc<dyn Navigator>,
}

/// Time sources used by the flow.
pub struct LoginFlowRuntime {
    /// Waits for animation ticks and the navigation delay.
    pub sleeper: Arc<dyn FlowSleeper>,
    /// Stamps `createdAt` on new sessions.
    pub clock: Arc<dyn Clock>,
    /// Pause between sign-in and the page transition.
    pub navigation_delay: Duration,
}

impl Default for LoginFlowRuntime {
    fn default() -> Self {
        Self {
            sleeper: Arc::new(TokioSleeper),
            clock: Arc::new(DefaultClock),
            navigation_delay: DEFAULT_NAVIGATION_DELAY,
        }
    }
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Form input failed validation; nothing left the process.
    Invalid(LoginValidationError),
    /// Another submission is still running.
    Busy,
    /// Sign-in failed; see the error code for whether a retry makes sense.
    Failed(DomainError),
    /// The account exists but is not verified.
    PendingVerification,
    /// The flow was torn down before the attempt finished; nothing was
    /// recorded.
    Disposed,
    /// A session was written.
    SignedIn {
        /// The stored session.
        session: SessionRecord,
        /// Page the flow navigates to.
        destination: Destination,
        /// False when the flow was torn down before navigation fired.
        navigated: bool,
    },
}

impl LoginOutcome {
    /// Message shown to the visitor for this outcome.
    pub fn feedback(&self) -> FeedbackMessage {
        match self {
            Self::Invalid(err) if err.is_missing_field() => {
                FeedbackMessage::error(MISSING_FIELDS_MESSAGE)
            }
            Self::Invalid(_) => FeedbackMessage::error(INVALID_EMAIL_MESSAGE),
            Self::Busy => FeedbackMessage::info(BUSY_MESSAGE),
            Self::Failed(err) => FeedbackMessage::error(err.message()),
            Self::PendingVerification => FeedbackMessage::warning(NOT_VERIFIED_MESSAGE),
            Self::Disposed => FeedbackMessage::info(DISPOSED_MESSAGE),
            Self::SignedIn { session, .. } => {
                FeedbackMessage::success(format!("Welcome, {}!", session.name))
            }
        }
    }

    /// Categorised failure behind a refused attempt.
    ///
    /// `None` when a session was created or the attempt never ran
    /// ([`Self::Busy`], [`Self::Disposed`]).
    pub fn error(&self) -> Option<DomainError> {
        match self {
            Self::Invalid(err) => Some(
                DomainError::invalid_request(self.feedback().text())
                    .with_details(json!({ "reason": err.to_string() })),
            ),
            Self::Failed(err) => Some(err.clone()),
            Self::PendingVerification => Some(DomainError::forbidden(NOT_VERIFIED_MESSAGE)),
            Self::Busy | Self::Disposed | Self::SignedIn { .. } => None,
        }
    }

    /// True when a session was created.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }
}

/// Read-only snapshot of the form for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFormView {
    /// Role whose tab is marked active.
    pub active_role: PortalRole,
    /// Flip machine state.
    pub toggle: ToggleState,
    /// CSS transform of the toggle card.
    pub card_transform: String,
    /// Email as typed.
    pub email: String,
    /// Whether the password is shown in clear.
    pub password_visible: bool,
    /// Message under the form, if any.
    pub feedback: Option<FeedbackMessage>,
    /// Role tabs accept input only while no sweep runs.
    pub role_inputs_enabled: bool,
    /// Submit accepts input only while no request is in flight.
    pub submit_enabled: bool,
}

#[derive(Default)]
struct LoginForm {
    toggle: RoleToggle,
    email: String,
    password: Zeroizing<String>,
    password_visible: bool,
    feedback: Option<FeedbackMessage>,
}

type SuccessHook = Box<dyn Fn(&SessionRecord) + Send + Sync>;

/// Holds a busy flag raised; lowers it on drop, including when the owning
/// future is cancelled.
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Option<Self> {
        (!flag.swap(true, Ordering::AcqRel)).then_some(Self(flag))
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Login flow controller.
pub struct LoginFlow {
    ports: LoginFlowPorts,
    runtime: LoginFlowRuntime,
    form: Mutex<LoginForm>,
    in_flight: AtomicBool,
    animating: AtomicBool,
    disposed: AtomicBool,
    teardown_signal: Notify,
    on_success: Option<SuccessHook>,
}

impl LoginFlow {
    /// Build a flow idle on the receiver role.
    pub fn new(ports: LoginFlowPorts, runtime: LoginFlowRuntime) -> Self {
        Self {
            ports,
            runtime,
            form: Mutex::new(LoginForm::default()),
            in_flight: AtomicBool::new(false),
            animating: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            teardown_signal: Notify::new(),
            on_success: None,
        }
    }

    /// Invoke `hook` with every session created by this flow.
    pub fn with_success_hook(
        mut self,
        hook: impl Fn(&SessionRecord) + Send + Sync + 'static,
    ) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    fn form(&self) -> MutexGuard<'_, LoginForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot the form for rendering.
    pub fn view(&self) -> LoginFormView {
        let form = self.form();
        LoginFormView {
            active_role: form.toggle.active_role(),
            toggle: form.toggle.state(),
            card_transform: form.toggle.card_transform(),
            email: form.email.clone(),
            password_visible: form.password_visible,
            feedback: form.feedback.clone(),
            role_inputs_enabled: !form.toggle.is_flipping(),
            submit_enabled: !self.in_flight.load(Ordering::Acquire),
        }
    }

    /// The message currently displayed, if any.
    pub fn feedback(&self) -> Option<FeedbackMessage> {
        self.form().feedback.clone()
    }

    /// Replace the email field.
    pub fn set_email(&self, email: &str) {
        self.form().email = email.to_owned();
    }

    /// Replace the password field.
    pub fn set_password(&self, password: &str) {
        self.form().password = Zeroizing::new(password.to_owned());
    }

    /// Flip password masking; returns the new visibility.
    pub fn toggle_password_visibility(&self) -> bool {
        let mut form = self.form();
        form.password_visible = !form.password_visible;
        form.password_visible
    }

    /// Request a role switch. Starts a sweep unless `role` is already active
    /// or a sweep is running.
    pub fn select_role(&self, role: PortalRole) -> FlipEvent {
        let event = self.form().toggle.select(role);
        debug!(?event, role = %role, "role selection");
        event
    }

    /// Advance the flip animation by one tick.
    pub fn tick_animation(&self) -> FlipEvent {
        self.form().toggle.tick()
    }

    /// Drive the current sweep to completion, one tick per [`FLIP_TICK`].
    ///
    /// Returns the role the toggle settled on, or `None` when no sweep was
    /// running, another driver already owns it, or the flow was torn down.
    /// A driver dropped mid-sweep leaves the card where it stopped; the next
    /// driver resumes from there.
    pub async fn run_flip_animation(&self) -> Option<PortalRole> {
        let Some(_driving) = FlagGuard::raise(&self.animating) else {
            debug!("flip animation already driven elsewhere");
            return None;
        };

        loop {
            if !self.form().toggle.is_flipping() {
                break None;
            }
            if !self.wait_unless_disposed(FLIP_TICK).await {
                break None;
            }
            if let FlipEvent::Completed { role } = self.tick_animation() {
                break Some(role);
            }
        }
    }

    /// Select `role` and drive the resulting sweep.
    pub async fn switch_role(&self, role: PortalRole) -> FlipEvent {
        let event = self.select_role(role);
        if matches!(event, FlipEvent::Started { .. }) {
            self.run_flip_animation().await;
        }
        event
    }

    /// Submit the form using its current role and credentials.
    pub async fn submit_form(&self) -> LoginOutcome {
        let (role, email, password) = {
            let form = self.form();
            (
                form.toggle.active_role(),
                form.email.clone(),
                form.password.clone(),
            )
        };
        self.submit(role, &email, password.as_str()).await
    }

    /// Attempt a sign-in.
    ///
    /// Only one attempt runs at a time; overlapping calls return
    /// [`LoginOutcome::Busy`] without side effects. Dropping the returned
    /// future abandons the attempt and re-enables submission. After
    /// [`Self::teardown`] every call returns [`LoginOutcome::Disposed`].
    pub async fn submit(&self, role: PortalRole, email: &str, password: &str) -> LoginOutcome {
        if self.is_disposed() {
            debug!(role = %role, "submission ignored after teardown");
            return LoginOutcome::Disposed;
        }
        let Some(_in_flight) = FlagGuard::raise(&self.in_flight) else {
            debug!(role = %role, "submission ignored while another is in flight");
            return LoginOutcome::Busy;
        };

        let span = info_span!("login_submit", role = %role, attempt = %Uuid::new_v4());
        self.attempt(role, email, password).instrument(span).await
    }

    /// Dispose of the flow: pending lookups, navigation and animation stop,
    /// and no further feedback or session is recorded.
    pub fn teardown(&self) {
        self.disposed.store(true, Ordering::Release);
        self.teardown_signal.notify_waiters();
    }

    /// True once [`Self::teardown`] ran.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    async fn attempt(&self, role: PortalRole, email: &str, password: &str) -> LoginOutcome {
        let credentials = match LoginCredentials::try_from_parts(email, password) {
            Ok(credentials) => credentials,
            Err(err) => return self.settle(LoginOutcome::Invalid(err)),
        };

        if role == PortalRole::Receiver {
            let Some(checked) = self
                .until_disposed(self.ports.admin.authenticate_admin(&credentials))
                .await
            else {
                return LoginOutcome::Disposed;
            };
            match checked {
                Ok(Some(identity)) => {
                    info!("privileged sign-in accepted");
                    let session = SessionRecord::admin(identity.email, self.runtime.clock.utc());
                    return self
                        .sign_in(session, NavigationRequest::to(Destination::AdminDashboard))
                        .await;
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(%error, "privileged authenticator failed");
                    return self.settle(LoginOutcome::Failed(error));
                }
            }
        }

        if let Err(err) = credentials.require_valid_email() {
            return self.settle(LoginOutcome::Invalid(err));
        }

        let Some(found) = self
            .until_disposed(self.ports.directory.find_accounts(role, &credentials))
            .await
        else {
            debug!("account lookup abandoned by teardown");
            return LoginOutcome::Disposed;
        };
        let accounts = match found {
            Ok(accounts) => accounts,
            Err(error) => {
                warn!(%error, transient = error.is_transient(), "account lookup failed");
                return self.settle(LoginOutcome::Failed(map_directory_error(&error)));
            }
        };

        let account = match single_account(accounts) {
            Ok(account) => account,
            Err(error) => return self.settle(LoginOutcome::Failed(error)),
        };

        if !account.verify().is_verified() {
            info!(account = %account.id(), "account awaiting verification");
            return self.settle(LoginOutcome::PendingVerification);
        }

        let session = SessionRecord::for_account(account, role, self.runtime.clock.utc());
        self.sign_in(session, NavigationRequest::with_reload(Destination::Landing))
            .await
    }

    async fn sign_in(&self, session: SessionRecord, request: NavigationRequest) -> LoginOutcome {
        if self.is_disposed() {
            return LoginOutcome::Disposed;
        }
        if let Err(error) = self.ports.sessions.create_session(&session) {
            warn!(%error, "session write failed");
            let failure = DomainError::internal(SESSION_SAVE_MESSAGE)
                .with_details(json!({ "cause": error.to_string() }));
            return self.settle(LoginOutcome::Failed(failure));
        }
        info!(account = %session.id, role = %session.role, "session created");

        if let Some(hook) = &self.on_success {
            hook(&session);
        }

        let mut outcome = self.settle(LoginOutcome::SignedIn {
            session,
            destination: request.destination,
            navigated: false,
        });
        let navigated_now = self.navigate_after_delay(request).await;
        if let LoginOutcome::SignedIn { navigated, .. } = &mut outcome {
            *navigated = navigated_now;
        }
        outcome
    }

    async fn navigate_after_delay(&self, request: NavigationRequest) -> bool {
        if !self.wait_unless_disposed(self.runtime.navigation_delay).await {
            debug!(destination = %request.destination, "navigation cancelled by teardown");
            return false;
        }
        info!(destination = %request.destination, reload = request.reload, "navigating");
        self.ports.navigator.navigate(request);
        true
    }

    /// Sleep for `duration`; false when the flow is (or becomes) disposed.
    async fn wait_unless_disposed(&self, duration: Duration) -> bool {
        self.until_disposed(self.runtime.sleeper.sleep(duration))
            .await
            .is_some()
    }

    /// Run `work` unless teardown happens first; `None` when it does.
    async fn until_disposed<F: Future>(&self, work: F) -> Option<F::Output> {
        let torn_down = self.teardown_signal.notified();
        if self.is_disposed() {
            return None;
        }
        let output = tokio::select! {
            biased;
            () = torn_down => None,
            output = work => Some(output),
        }?;
        (!self.is_disposed()).then_some(output)
    }

    /// Record the outcome's feedback unless the flow is disposed.
    fn settle(&self, outcome: LoginOutcome) -> LoginOutcome {
        if self.is_disposed() {
            return if outcome.is_signed_in() {
                outcome
            } else {
                LoginOutcome::Disposed
            };
        }
        let feedback = outcome.feedback();
        debug!(severity = feedback.severity().as_str(), "feedback updated");
        self.form().feedback = Some(feedback);
        outcome
    }
}

fn single_account(accounts: Vec<Account>) -> Result<Account, DomainError> {
    let count = accounts.len();
    let mut accounts = accounts.into_iter();
    match (accounts.next(), count) {
        (Some(account), 1) => Ok(account),
        (None, _) => Err(DomainError::unauthorized(INVALID_CREDENTIALS_MESSAGE)),
        (Some(_), _) => {
            warn!(matches = count, "ambiguous account lookup");
            Err(DomainError::unauthorized(INVALID_CREDENTIALS_MESSAGE)
                .with_details(json!({ "matches": count })))
        }
    }
}

fn map_directory_error(error: &AccountDirectoryError) -> DomainError {
    let details = json!({ "cause": error.to_string() });
    if error.is_transient() {
        DomainError::service_unavailable(DIRECTORY_UNAVAILABLE_MESSAGE).with_details(details)
    } else {
        DomainError::internal(DIRECTORY_FAILURE_MESSAGE).with_details(details)
    }
}

#[cfg(test)]
#[path = "login_flow_tests.rs"]
mod tests;
