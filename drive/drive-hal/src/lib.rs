//! Hardware link abstraction for the drive layer.
//!
//! Everything above this crate talks to the robot through the
//! [`HardwareLink`] trait: differential motor commands, the four-sensor
//! line snapshot, and the clamp's presence switches. One call is one
//! synchronous round trip to the I/O controller; the drive and course
//! cores are polled, so each tick performs exactly one sensor read
//! followed by at most one motor command.
//!
//! Real link implementations (serial, socket) live with the mission
//! binary. This crate ships [`ScriptedLink`], a queue-driven double used
//! by the controller and router tests, so downstream crates can exercise
//! full manoeuvres without hardware.
//!
//! # Example
//!
//! ```
//! use drive_hal::{HardwareLink, ScriptedLink};
//! use drive_types::LineSnapshot;
//!
//! let mut link = ScriptedLink::new([LineSnapshot::centred()]);
//! link.motors_forward(100).unwrap();
//! assert!(link.line_sensors().unwrap().is_centred());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(clippy::all)]

mod error;
mod link;
mod scripted;

pub use error::LinkError;
pub use link::{speed_permitted, HardwareLink};
pub use scripted::{MotorCommand, ScriptedLink};
