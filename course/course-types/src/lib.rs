//! Domain types for the line-marked course.
//!
//! This crate is the pure-data description of the physical course the
//! robot drives: the eleven numbered nodes, the direction-of-travel
//! convention, and the static manoeuvre tables the router executes. It
//! contains no state machine and no I/O, so the course topology can be
//! unit-tested on its own.
//!
//! # Types
//!
//! - [`CourseNode`] - the eleven sensor-detectable positions
//! - [`Direction`] - clockwise/anticlockwise, derived from a node edge
//! - [`Maneuver`] - what to do when passing a node (TURN_MAP entries)
//! - [`JunctionShape`] - which branch lines exist physically at a node
//! - [`RouteStatus`] - outcome of one routing tick
//! - [`CourseError`] - course-topology misuse
//!
//! # Tables
//!
//! - [`turn_for`] - manoeuvre at a node for a travel direction
//! - [`route_after`] - the node ahead after executing that manoeuvre
//! - [`node_shape`] - physical branch description per node
//! - [`special_turn_around`] - edges where an about-turn needs a
//!   pre-action (start-box frame, bobbin rack)
//! - [`junction_skip_lines`] - the double-junction skip override
//!
//! The tables are fixed for the life of the process; they encode the
//! painted course layout and are never inferred from sensing.
//!
//! # Example
//!
//! ```
//! use course_types::{route_after, turn_for, CourseNode, Direction, Maneuver};
//!
//! // Passing the south-east corner clockwise mandates a right turn...
//! assert_eq!(turn_for(Direction::Clockwise, CourseNode::Node5), Maneuver::Right);
//! // ...after which the node ahead is Node6.
//! assert_eq!(
//!     route_after(Direction::Clockwise, CourseNode::Node5),
//!     Some(CourseNode::Node6),
//! );
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod maneuver;
mod node;
mod status;
mod table;

pub use error::CourseError;
pub use maneuver::{JunctionShape, Maneuver};
pub use node::{CourseNode, Direction};
pub use status::RouteStatus;
pub use table::{
    junction_skip_lines, node_shape, route_after, special_turn_around, turn_for,
    SpecialTurnAround, SPECIAL_TURN_AROUNDS,
};
