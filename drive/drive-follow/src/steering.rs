//! Steering state threaded through the per-tick calls.

/// Accumulated steering state for the line follower.
///
/// The two error accumulators are mutually exclusive: setting one zeroes
/// the other, so the correction always pushes towards one side. All
/// counters are in ticks. The struct is mutated by exactly one
/// [`crate::LineFollower`] per mission; nothing here is shared between
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteeringState {
    /// Accumulated leftward drift, corrected by boosting the left wheel.
    pub(crate) left_error: u32,
    /// Accumulated rightward drift, corrected by boosting the right wheel.
    pub(crate) right_error: u32,
    /// Ticks since the line was last seen.
    pub(crate) lost_time: u32,
    /// Set while a committed turn has swung off the departure line.
    pub(crate) lost_turning_line: bool,
    /// Intermediate lines reacquired and skipped during the current turn.
    pub(crate) lines_seen: u8,
}

impl SteeringState {
    /// A zeroed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirmed on the line: clears both errors and the lost counter.
    pub(crate) fn on_line(&mut self) {
        self.left_error = 0;
        self.right_error = 0;
        self.lost_time = 0;
    }

    /// Accumulates leftward drift, displacing any rightward error.
    pub(crate) fn add_left_error(&mut self, amount: u32) {
        self.left_error += amount;
        self.right_error = 0;
        self.lost_time = 0;
    }

    /// Accumulates rightward drift, displacing any leftward error.
    pub(crate) fn add_right_error(&mut self, amount: u32) {
        self.right_error += amount;
        self.left_error = 0;
        self.lost_time = 0;
    }

    /// Extends whichever error is active while the line is out of sight,
    /// steering harder towards the last known direction.
    pub(crate) fn extend_active_error(&mut self) {
        if self.left_error > 0 {
            self.left_error += 1;
        } else if self.right_error > 0 {
            self.right_error += 1;
        }
    }

    /// Current leftward error magnitude.
    #[must_use]
    pub const fn left_error(&self) -> u32 {
        self.left_error
    }

    /// Current rightward error magnitude.
    #[must_use]
    pub const fn right_error(&self) -> u32 {
        self.right_error
    }

    /// Ticks since the line was last seen.
    #[must_use]
    pub const fn lost_time(&self) -> u32 {
        self.lost_time
    }

    /// Whether a committed turn is currently off the departure line.
    #[must_use]
    pub const fn lost_turning_line(&self) -> bool {
        self.lost_turning_line
    }

    /// Intermediate lines skipped so far in the current turn.
    #[must_use]
    pub const fn lines_seen(&self) -> u8 {
        self.lines_seen
    }
}
