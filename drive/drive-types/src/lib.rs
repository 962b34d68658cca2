//! Hardware-agnostic types for the drive layer.
//!
//! This crate provides the foundational types shared between the hardware
//! link, the line-following controller, and the course router:
//!
//! - [`LineSnapshot`] - one tick's reading of the four IR line sensors
//! - [`SensorReading`] - the per-sensor `Line` / `NoLine` value
//! - [`FollowStatus`] - outcome of one line-following or turning tick
//! - [`JunctionStatus`] - read-only junction lookahead classification
//! - [`LineStatus`] - line state relative to an in-progress turn
//! - [`TurnDirection`] - the four committed manoeuvres
//! - [`MOTOR_MAX_SPEED`] / [`headroom`] - the motor speed domain
//!
//! # Layer 0 Crate
//!
//! This is a leaf crate with no I/O and no hardware dependencies. It is
//! consumed identically by real link implementations, the scripted test
//! link, and simulation.
//!
//! # Example
//!
//! ```
//! use drive_types::{LineSnapshot, SensorReading};
//!
//! let snap = LineSnapshot::centred();
//! assert!(snap.is_centred());
//! assert_eq!(snap.outer_left, SensorReading::NoLine);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod sensor;
mod speed;
mod status;

pub use sensor::{LineSnapshot, SensorReading};
pub use speed::{headroom, MOTOR_MAX_SPEED};
pub use status::{FollowStatus, JunctionStatus, LineStatus, TurnDirection};
