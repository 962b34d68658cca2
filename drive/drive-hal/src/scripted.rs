//! Queue-driven link double for tests and simulation.

use std::collections::VecDeque;

use drive_types::LineSnapshot;

use crate::{speed_permitted, HardwareLink, LinkError};

/// A motor command as recorded by [`ScriptedLink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCommand {
    /// Both wheels forward.
    BothForward(u8),
    /// Both wheels backward.
    BothBackward(u8),
    /// Left wheel forward.
    LeftForward(u8),
    /// Left wheel backward.
    LeftBackward(u8),
    /// Right wheel forward.
    RightForward(u8),
    /// Right wheel backward.
    RightBackward(u8),
    /// Both wheels stopped.
    Stop,
}

impl MotorCommand {
    /// Returns `true` for a command that drives a wheel backward.
    #[must_use]
    pub const fn is_backward(self) -> bool {
        matches!(self, Self::BothBackward(_) | Self::LeftBackward(_) | Self::RightBackward(_))
    }
}

/// A [`HardwareLink`] that replays scripted sensor readings and records
/// every motor command.
///
/// Sensor snapshots are served from a queue; once the queue drains, the
/// last snapshot repeats forever, so a script only needs to cover the
/// interesting transitions. Presence queries follow the same rule and
/// default to `false` when never scripted.
///
/// # Example
///
/// ```
/// use drive_hal::{HardwareLink, MotorCommand, ScriptedLink};
/// use drive_types::LineSnapshot;
///
/// let mut link = ScriptedLink::new([LineSnapshot::blank(), LineSnapshot::centred()]);
///
/// assert!(link.line_sensors().unwrap().is_blank());
/// assert!(link.line_sensors().unwrap().is_centred());
/// // Queue drained: the centred snapshot repeats.
/// assert!(link.line_sensors().unwrap().is_centred());
///
/// link.motors_forward(90).unwrap();
/// assert_eq!(link.commands(), &[MotorCommand::BothForward(90)]);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedLink {
    snapshots: VecDeque<LineSnapshot>,
    last_snapshot: Option<LineSnapshot>,
    bobbin_script: VecDeque<bool>,
    last_bobbin: bool,
    box_script: VecDeque<bool>,
    last_box: bool,
    commands: Vec<MotorCommand>,
}

impl ScriptedLink {
    /// Creates a link that serves the given snapshots in order.
    #[must_use]
    pub fn new(snapshots: impl IntoIterator<Item = LineSnapshot>) -> Self {
        Self {
            snapshots: snapshots.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Appends further snapshots to the sensor script.
    pub fn extend_snapshots(&mut self, snapshots: impl IntoIterator<Item = LineSnapshot>) {
        self.snapshots.extend(snapshots);
    }

    /// Scripts the answers to `bobbin_present`, repeating the last once
    /// drained.
    #[must_use]
    pub fn with_bobbin_script(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.bobbin_script = answers.into_iter().collect();
        self
    }

    /// Scripts the answers to `box_present`, repeating the last once
    /// drained.
    #[must_use]
    pub fn with_box_script(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.box_script = answers.into_iter().collect();
        self
    }

    /// Every motor command issued so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[MotorCommand] {
        &self.commands
    }

    /// The most recent motor command, if any.
    #[must_use]
    pub fn last_command(&self) -> Option<MotorCommand> {
        self.commands.last().copied()
    }

    /// Discards the recorded command history.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    fn record(&mut self, command: MotorCommand, speed: u8) -> Result<(), LinkError> {
        if speed_permitted(speed) {
            self.commands.push(command);
        }
        Ok(())
    }
}

impl HardwareLink for ScriptedLink {
    fn motors_forward(&mut self, speed: u8) -> Result<(), LinkError> {
        self.record(MotorCommand::BothForward(speed), speed)
    }

    fn motors_backward(&mut self, speed: u8) -> Result<(), LinkError> {
        self.record(MotorCommand::BothBackward(speed), speed)
    }

    fn motor_left_forward(&mut self, speed: u8) -> Result<(), LinkError> {
        self.record(MotorCommand::LeftForward(speed), speed)
    }

    fn motor_left_backward(&mut self, speed: u8) -> Result<(), LinkError> {
        self.record(MotorCommand::LeftBackward(speed), speed)
    }

    fn motor_right_forward(&mut self, speed: u8) -> Result<(), LinkError> {
        self.record(MotorCommand::RightForward(speed), speed)
    }

    fn motor_right_backward(&mut self, speed: u8) -> Result<(), LinkError> {
        self.record(MotorCommand::RightBackward(speed), speed)
    }

    fn motors_stop(&mut self) -> Result<(), LinkError> {
        self.commands.push(MotorCommand::Stop);
        Ok(())
    }

    fn line_sensors(&mut self) -> Result<LineSnapshot, LinkError> {
        if let Some(snapshot) = self.snapshots.pop_front() {
            self.last_snapshot = Some(snapshot);
        }
        self.last_snapshot
            .ok_or_else(|| LinkError::request_failed("no snapshot scripted"))
    }

    fn bobbin_present(&mut self) -> Result<bool, LinkError> {
        if let Some(answer) = self.bobbin_script.pop_front() {
            self.last_bobbin = answer;
        }
        Ok(self.last_bobbin)
    }

    fn box_present(&mut self) -> Result<bool, LinkError> {
        if let Some(answer) = self.box_script.pop_front() {
            self.last_box = answer;
        }
        Ok(self.last_box)
    }
}
