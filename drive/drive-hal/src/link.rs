//! The hardware link trait and the shared speed guard.

use drive_types::{LineSnapshot, MOTOR_MAX_SPEED};
use tracing::warn;

use crate::LinkError;

/// Checks a motor speed against [`MOTOR_MAX_SPEED`].
///
/// Returns `false` (and logs a warning) for out-of-range speeds. Link
/// implementations drop the command in that case rather than saturating,
/// so the motors keep their previous setting.
///
/// # Example
///
/// ```
/// use drive_hal::speed_permitted;
///
/// assert!(speed_permitted(127));
/// assert!(!speed_permitted(128));
/// ```
#[must_use]
pub fn speed_permitted(speed: u8) -> bool {
    if speed > MOTOR_MAX_SPEED {
        warn!(speed, max = MOTOR_MAX_SPEED, "motor speed out of range, command dropped");
        return false;
    }
    true
}

/// Synchronous interface to the robot's I/O controller.
///
/// Speeds are magnitudes in `0..=MOTOR_MAX_SPEED`; direction is in the
/// method name. Implementations must apply [`speed_permitted`] and treat
/// a rejected speed as a no-op.
///
/// The clamp queries (`bobbin_present`, `box_present`) are consumed by
/// the router's mission tasks for fine positioning, not by the core
/// manoeuvre logic.
pub trait HardwareLink {
    /// Drives both wheels forward at `speed`.
    fn motors_forward(&mut self, speed: u8) -> Result<(), LinkError>;

    /// Drives both wheels backward at `speed`.
    fn motors_backward(&mut self, speed: u8) -> Result<(), LinkError>;

    /// Drives the left wheel forward at `speed`.
    fn motor_left_forward(&mut self, speed: u8) -> Result<(), LinkError>;

    /// Drives the left wheel backward at `speed`.
    fn motor_left_backward(&mut self, speed: u8) -> Result<(), LinkError>;

    /// Drives the right wheel forward at `speed`.
    fn motor_right_forward(&mut self, speed: u8) -> Result<(), LinkError>;

    /// Drives the right wheel backward at `speed`.
    fn motor_right_backward(&mut self, speed: u8) -> Result<(), LinkError>;

    /// Stops both wheels.
    fn motors_stop(&mut self) -> Result<(), LinkError>;

    /// Reads the four line-following sensors.
    fn line_sensors(&mut self) -> Result<LineSnapshot, LinkError>;

    /// Returns `true` when a bobbin sits in the clamp's jaws.
    fn bobbin_present(&mut self) -> Result<bool, LinkError>;

    /// Returns `true` when a box sits in front of the clamp.
    fn box_present(&mut self) -> Result<bool, LinkError>;
}
