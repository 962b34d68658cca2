//! The line-following controller.

use drive_hal::{HardwareLink, LinkError};
use drive_types::{
    headroom, FollowStatus, JunctionStatus, LineStatus, TurnDirection, MOTOR_MAX_SPEED,
};
use tracing::{debug, info, warn};

use crate::classify::{classify, line_status, SteerCase};
use crate::steering::SteeringState;
use crate::tuning::{cap_correction, Tuning, EDGE_ERROR};

/// Per-tick line-following and turning controller.
///
/// Owns the steering accumulators and the speed-derived tuning; borrows
/// the hardware link on every call. See the crate docs for the polling
/// contract.
#[derive(Debug)]
pub struct LineFollower {
    steering: SteeringState,
    speed: u8,
    tuning: Tuning,
}

impl Default for LineFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFollower {
    /// Creates a follower at speed zero with baseline tuning.
    ///
    /// Callers are expected to [`set_speed`](Self::set_speed) before the
    /// first tick; following at speed zero is logged as a warning.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steering: SteeringState::new(),
            speed: 0,
            tuning: Tuning::baseline(),
        }
    }

    /// Reads the sensors once and corrects steering to stay on the line.
    ///
    /// Reports junctions through the `*TurnFound` variants without
    /// leaving the line-following regime; returns
    /// [`FollowStatus::Lost`] once the line has been out of sight past
    /// the straight timeout. Lost does not stop the motors.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`] from the sensor read or the motor
    /// commands.
    pub fn follow_line<L: HardwareLink>(&mut self, link: &mut L) -> Result<FollowStatus, LinkError> {
        if self.speed == 0 {
            warn!("follow_line called with speed 0");
        }

        // Not turning, so the turn bookkeeping cannot be trusted.
        self.steering.lost_turning_line = false;
        self.steering.lines_seen = 0;

        let snap = link.line_sensors()?;
        match classify(snap) {
            SteerCase::Centred => {
                self.steering.on_line();
                self.correct_steering(link)?;
                Ok(FollowStatus::InProgress)
            }
            SteerCase::DriftLeft => {
                debug!("compensating slight left drift");
                self.steering.add_left_error(1);
                self.correct_steering(link)?;
                Ok(FollowStatus::InProgress)
            }
            SteerCase::DriftRight => {
                debug!("compensating slight right drift");
                self.steering.add_right_error(1);
                self.correct_steering(link)?;
                Ok(FollowStatus::InProgress)
            }
            SteerCase::FarLeft => {
                debug!("compensating large left drift");
                self.steering.add_left_error(EDGE_ERROR);
                self.correct_steering(link)?;
                Ok(FollowStatus::InProgress)
            }
            SteerCase::FarRight => {
                debug!("compensating large right drift");
                self.steering.add_right_error(EDGE_ERROR);
                self.correct_steering(link)?;
                Ok(FollowStatus::InProgress)
            }
            SteerCase::JunctionLeft => {
                info!("left turn found");
                self.steering.on_line();
                self.correct_steering(link)?;
                Ok(FollowStatus::LeftTurnFound)
            }
            SteerCase::JunctionRight => {
                info!("right turn found");
                self.steering.on_line();
                self.correct_steering(link)?;
                Ok(FollowStatus::RightTurnFound)
            }
            SteerCase::JunctionBoth => {
                info!("both turns found");
                self.steering.on_line();
                self.correct_steering(link)?;
                Ok(FollowStatus::BothTurnsFound)
            }
            SteerCase::Blank => {
                self.steering.lost_time += 1;
                if self.steering.lost_time > self.tuning.lost_timeout {
                    // Hold at the timeout so repeated lost ticks cannot
                    // grow the counter without bound.
                    self.steering.lost_time -= 1;
                    warn!("no line for {} ticks, lost", self.tuning.lost_timeout);
                    self.correct_steering(link)?;
                    Ok(FollowStatus::Lost)
                } else {
                    debug!("no line visible, steering towards last known side");
                    self.steering.extend_active_error();
                    self.correct_steering(link)?;
                    Ok(FollowStatus::InProgress)
                }
            }
            SteerCase::Unrecognised => {
                debug!("unhandled sensor pattern, keeping previous steering");
                self.correct_steering(link)?;
                Ok(FollowStatus::InProgress)
            }
        }
    }

    /// Pivots left until the next line, skipping `skip_lines` lines.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn turn_left<L: HardwareLink>(
        &mut self,
        link: &mut L,
        skip_lines: u8,
    ) -> Result<FollowStatus, LinkError> {
        self.turn(link, TurnDirection::Left, skip_lines)
    }

    /// Pivots right until the next line, skipping `skip_lines` lines.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn turn_right<L: HardwareLink>(
        &mut self,
        link: &mut L,
        skip_lines: u8,
    ) -> Result<FollowStatus, LinkError> {
        self.turn(link, TurnDirection::Right, skip_lines)
    }

    /// Spins clockwise on the spot until the line is reacquired.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn turn_around_cw<L: HardwareLink>(
        &mut self,
        link: &mut L,
        skip_lines: u8,
    ) -> Result<FollowStatus, LinkError> {
        self.turn(link, TurnDirection::AroundCw, skip_lines)
    }

    /// Spins anticlockwise on the spot until the line is reacquired.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn turn_around_ccw<L: HardwareLink>(
        &mut self,
        link: &mut L,
        skip_lines: u8,
    ) -> Result<FollowStatus, LinkError> {
        self.turn(link, TurnDirection::AroundCcw, skip_lines)
    }

    /// About-turn off the delivery platform: completes as soon as the
    /// departure line is lost, since there is no line to reacquire on
    /// the far side.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn turn_around_delivery<L: HardwareLink>(
        &mut self,
        link: &mut L,
    ) -> Result<FollowStatus, LinkError> {
        let status = self.turn(link, TurnDirection::AroundCw, 0)?;
        if self.steering.lost_turning_line {
            self.steering.lost_turning_line = false;
            self.steering.lost_time = 0;
            Ok(FollowStatus::Completed)
        } else {
            Ok(status)
        }
    }

    /// Classifies visible junction branches without commanding motors.
    ///
    /// Requires both inner sensors on the line first: with the robot
    /// drifted to one side, an outer-sensor hit is the main line, not a
    /// branch, and reporting it as a junction would corrupt the
    /// router's cache.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`] from the sensor read.
    pub fn junction_status<L: HardwareLink>(
        &self,
        link: &mut L,
    ) -> Result<JunctionStatus, LinkError> {
        let snap = link.line_sensors()?;
        if !snap.inner_on_line() {
            debug!("inner sensors off line, ignoring outer sensors");
            return Ok(JunctionStatus::NoTurns);
        }
        Ok(
            match (snap.outer_left.is_line(), snap.outer_right.is_line()) {
                (true, true) => JunctionStatus::BothTurns,
                (true, false) => JunctionStatus::LeftTurn,
                (false, true) => JunctionStatus::RightTurn,
                (false, false) => JunctionStatus::NoTurns,
            },
        )
    }

    /// Sets the drive speed, clamped to `0..=MOTOR_MAX_SPEED`, and
    /// rederives the gain and timeouts from the remaining headroom.
    pub fn set_speed(&mut self, speed: u8) {
        self.speed = speed.min(MOTOR_MAX_SPEED);
        self.tuning = Tuning::for_speed(self.speed);
        info!(
            speed = self.speed,
            gain = self.tuning.integral_gain,
            lost_timeout = self.tuning.lost_timeout,
            turning_timeout = self.tuning.turning_timeout,
            "drive speed set"
        );
    }

    /// Current drive speed.
    #[must_use]
    pub const fn speed(&self) -> u8 {
        self.speed
    }

    /// Current integral gain.
    #[must_use]
    pub const fn integral_gain(&self) -> f64 {
        self.tuning.integral_gain
    }

    /// Current straight-tracking lost timeout, in ticks.
    #[must_use]
    pub const fn lost_timeout(&self) -> u32 {
        self.tuning.lost_timeout
    }

    /// Current turning lost timeout, in ticks.
    #[must_use]
    pub const fn turning_timeout(&self) -> u32 {
        self.tuning.turning_timeout
    }

    /// Read-only view of the steering accumulators.
    #[must_use]
    pub const fn steering(&self) -> &SteeringState {
        &self.steering
    }

    /// One tick of a committed turn.
    ///
    /// The sequence runs on-line (departing) -> lost (mid-turn) ->
    /// on-line (arrival); an arrival with fewer than `skip_lines` lines
    /// seen is skipped over and the turn continues.
    fn turn<L: HardwareLink>(
        &mut self,
        link: &mut L,
        direction: TurnDirection,
        skip_lines: u8,
    ) -> Result<FollowStatus, LinkError> {
        self.set_motors_turning(link, direction)?;

        let snap = link.line_sensors()?;
        match line_status(snap, direction) {
            LineStatus::OnLine => {
                if !self.steering.lost_turning_line {
                    // Still swinging off the departure line.
                    Ok(FollowStatus::InProgress)
                } else {
                    self.steering.lost_turning_line = false;
                    if self.steering.lines_seen < skip_lines {
                        info!(
                            skipped = self.steering.lines_seen + 1,
                            of = skip_lines,
                            "skipping intermediate line"
                        );
                        self.steering.lines_seen += 1;
                        Ok(FollowStatus::InProgress)
                    } else {
                        info!("turn reacquired its line");
                        self.steering.lines_seen = 0;
                        Ok(FollowStatus::Completed)
                    }
                }
            }
            LineStatus::LostLine => {
                if !self.steering.lost_turning_line {
                    debug!("lost the departure line, mid-turn");
                    self.steering.lost_turning_line = true;
                }
                self.steering.lost_time += 1;
                if self.steering.lost_time > self.tuning.turning_timeout {
                    self.steering.lost_time -= 1;
                    warn!("no line for {} turning ticks, lost", self.tuning.turning_timeout);
                    // Safety unwind: a turn that gave up would otherwise
                    // keep spinning under the last motor command.
                    link.motors_stop()?;
                    return Ok(FollowStatus::Lost);
                }
                Ok(FollowStatus::InProgress)
            }
            LineStatus::Other => Ok(FollowStatus::InProgress),
        }
    }

    /// Commands the wheels for a turn direction.
    fn set_motors_turning<L: HardwareLink>(
        &self,
        link: &mut L,
        direction: TurnDirection,
    ) -> Result<(), LinkError> {
        match direction {
            TurnDirection::Left => {
                link.motor_left_forward(0)?;
                link.motor_right_forward(self.speed)?;
            }
            TurnDirection::Right => {
                link.motor_right_forward(0)?;
                link.motor_left_forward(self.speed)?;
            }
            TurnDirection::AroundCw => {
                link.motor_right_backward(self.speed / 2)?;
                link.motor_left_forward(self.speed / 2)?;
            }
            TurnDirection::AroundCcw => {
                link.motor_right_forward(self.speed / 2)?;
                link.motor_left_backward(self.speed / 2)?;
            }
        }
        Ok(())
    }

    /// Applies the integral correction to the wheels.
    ///
    /// The favored wheel takes as much of the correction as the speed
    /// headroom allows; the remainder comes off the opposite wheel.
    fn correct_steering<L: HardwareLink>(&self, link: &mut L) -> Result<(), LinkError> {
        let headroom = headroom(self.speed);

        if self.steering.left_error > 0 {
            let correction = self.correction(self.steering.left_error);
            debug!(correction, "correcting left error");
            if correction <= headroom {
                link.motor_left_forward(self.speed + correction)?;
                link.motor_right_forward(self.speed)?;
            } else {
                link.motor_left_forward(self.speed + headroom)?;
                link.motor_right_forward(self.speed.saturating_sub(correction - headroom))?;
            }
        } else if self.steering.right_error > 0 {
            let correction = self.correction(self.steering.right_error);
            debug!(correction, "correcting right error");
            if correction <= headroom {
                link.motor_right_forward(self.speed + correction)?;
                link.motor_left_forward(self.speed)?;
            } else {
                link.motor_right_forward(self.speed + headroom)?;
                link.motor_left_forward(self.speed.saturating_sub(correction - headroom))?;
            }
        } else {
            link.motors_forward(self.speed)?;
        }
        Ok(())
    }

    /// Gain-scaled, capped correction for an error magnitude.
    fn correction(&self, error: u32) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let raw = (f64::from(error) * self.tuning.integral_gain).round() as u32;
        cap_correction(raw)
    }
}
