//! Line-following controller for the drive layer.
//!
//! [`LineFollower`] converts raw four-sensor line snapshots into
//! differential motor commands, one tick at a time:
//!
//! - **Straight tracking** ([`LineFollower::follow_line`]): integral
//!   steering correction against drift, junction reporting, and a
//!   speed-scaled lost-line timeout
//! - **Committed turns** ([`LineFollower::turn_left`] and friends):
//!   pivot or spin until the target line is reacquired, optionally
//!   skipping intermediate lines
//! - **Junction lookahead** ([`LineFollower::junction_status`]):
//!   classify branches without touching the motors
//!
//! The follower owns its steering state but not the hardware: every
//! tick method borrows a [`drive_hal::HardwareLink`], performing one
//! sensor read and at most one motor adjustment per call. The caller
//! drives the loop:
//!
//! ```
//! use drive_follow::LineFollower;
//! use drive_hal::ScriptedLink;
//! use drive_types::{FollowStatus, LineSnapshot};
//!
//! let mut link = ScriptedLink::new([
//!     LineSnapshot::centred(),
//!     LineSnapshot::centred(),
//!     LineSnapshot::all_line(),
//! ]);
//! let mut follower = LineFollower::new();
//! follower.set_speed(100);
//!
//! loop {
//!     match follower.follow_line(&mut link).unwrap() {
//!         FollowStatus::InProgress => continue,
//!         status => {
//!             assert_eq!(status, FollowStatus::BothTurnsFound);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! Timeouts are counted in ticks, not wall-clock time; the calibration
//! assumes the caller polls at a roughly constant period.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(clippy::all)]

mod classify;
mod follower;
mod steering;
mod tuning;

pub use classify::{classify, line_status, SteerCase};
pub use follower::LineFollower;
pub use steering::SteeringState;
pub use tuning::{
    cap_correction, Tuning, BASELINE_STRAIGHT_TIMEOUT, BASELINE_TURN_TIMEOUT, EDGE_ERROR,
    MAX_CORRECTION,
};
