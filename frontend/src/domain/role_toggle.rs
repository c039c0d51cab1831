//! Role toggle flip animation.
//!
//! The toggle card rotates a full turn whenever the visitor switches role.
//! The active role swaps exactly when the card is edge-on (half a turn) and
//! the sweep stops when the card faces front again. Time is supplied from
//! outside: callers invoke [`RoleToggle::tick`] once per [`FLIP_TICK`].

use std::time::Duration;

use crate::domain::PortalRole;

/// Degrees advanced per tick.
pub const FLIP_STEP_DEGREES: u32 = 18;
/// Interval between ticks.
pub const FLIP_TICK: Duration = Duration::from_millis(25);

const FULL_TURN: u32 = 360;
const HALF_TURN: u32 = 180;
// Cumulative rotation wraps on a whole number of turns so the rendered angle
// never jumps.
const ROTATION_WRAP: u32 = FULL_TURN * 10_000;

// Commit and stop detection use exact equality, so the step must land on
// both the half and the full turn.
const _: () = assert!(FULL_TURN % FLIP_STEP_DEGREES == 0);
const _: () = assert!(HALF_TURN % FLIP_STEP_DEGREES == 0);

/// Ticks in one complete sweep.
pub const TICKS_PER_SWEEP: u32 = FULL_TURN / FLIP_STEP_DEGREES;

/// Observable toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// Resting on the active role.
    Idle(PortalRole),
    /// Mid-sweep; role inputs are locked.
    Flipping {
        /// Role active when the sweep began.
        from: PortalRole,
        /// Role active once the card passes edge-on.
        to: PortalRole,
        /// Degrees travelled in the current sweep, `0..360`.
        degree: u32,
    },
}

/// Why a selection or tick had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The selected role is already active.
    AlreadyActive,
    /// A sweep is running; selections wait for it to finish.
    SweepInProgress,
    /// A tick arrived while idle.
    NotFlipping,
}

/// Result of feeding an input into the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipEvent {
    /// A sweep towards `to` began.
    Started { from: PortalRole, to: PortalRole },
    /// The card rotated but nothing else changed.
    Advanced { degree: u32 },
    /// The active role swapped at the half turn.
    Committed { role: PortalRole },
    /// The sweep finished; the toggle is idle again.
    Completed { role: PortalRole },
    /// The input was rejected.
    Ignored(IgnoredReason),
}

/// Two-state machine behind the receiver/donor switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleToggle {
    state: ToggleState,
    active: PortalRole,
    rotation: u32,
}

impl RoleToggle {
    /// Start idle on `role`.
    pub fn new(role: PortalRole) -> Self {
        Self {
            state: ToggleState::Idle(role),
            active: role,
            rotation: 0,
        }
    }

    /// Current machine state.
    pub fn state(&self) -> ToggleState {
        self.state
    }

    /// Role whose tab is currently marked active.
    pub fn active_role(&self) -> PortalRole {
        self.active
    }

    /// True while a sweep runs.
    pub fn is_flipping(&self) -> bool {
        matches!(self.state, ToggleState::Flipping { .. })
    }

    /// Cumulative rotation in degrees.
    pub fn rotation_degrees(&self) -> u32 {
        self.rotation
    }

    /// CSS transform applied to the toggle card.
    pub fn card_transform(&self) -> String {
        format!("rotateY({}deg)", self.rotation)
    }

    /// Request a switch to `role`.
    pub fn select(&mut self, role: PortalRole) -> FlipEvent {
        match self.state {
            ToggleState::Flipping { .. } => FlipEvent::Ignored(IgnoredReason::SweepInProgress),
            ToggleState::Idle(current) if current == role => {
                FlipEvent::Ignored(IgnoredReason::AlreadyActive)
            }
            ToggleState::Idle(current) => {
                self.state = ToggleState::Flipping {
                    from: current,
                    to: role,
                    degree: 0,
                };
                FlipEvent::Started {
                    from: current,
                    to: role,
                }
            }
        }
    }

    /// Advance one timer tick.
    pub fn tick(&mut self) -> FlipEvent {
        let ToggleState::Flipping { from, to, .. } = self.state else {
            return FlipEvent::Ignored(IgnoredReason::NotFlipping);
        };

        self.rotation = (self.rotation + FLIP_STEP_DEGREES) % ROTATION_WRAP;
        let degree = self.rotation % FULL_TURN;

        if degree == 0 {
            self.state = ToggleState::Idle(to);
            return FlipEvent::Completed { role: to };
        }

        self.state = ToggleState::Flipping { from, to, degree };
        if degree == HALF_TURN {
            self.active = to;
            return FlipEvent::Committed { role: to };
        }
        FlipEvent::Advanced { degree }
    }
}

impl Default for RoleToggle {
    fn default() -> Self {
        Self::new(PortalRole::default())
    }
}
