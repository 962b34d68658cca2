//! Node-to-node routing over the line-marked course.
//!
//! [`Router`] composes the line follower with the static course tables
//! to turn "go to node N" into a sequence of drive and turn commands.
//! It keeps a position estimate as the directed edge `(from, to)` with
//! `to` the node ahead, decides when an about-turn is needed, caches
//! junction classifications across the ticks of a manoeuvre, and
//! surfaces line loss to the caller without attempting recovery.
//!
//! Like the follower, the router is polled: every operation is one tick
//! of a caller-driven loop.
//!
//! ```
//! use course_router::Router;
//! use course_types::{CourseNode, RouteStatus};
//! use drive_hal::ScriptedLink;
//! use drive_types::LineSnapshot;
//!
//! // Centred snapshots forever: the robot tracks the line towards
//! // Node8 without ever seeing its junction.
//! let link = ScriptedLink::new([LineSnapshot::centred()]);
//! let mut router = Router::new(link, CourseNode::Node7, CourseNode::Node8).unwrap();
//!
//! for _ in 0..20 {
//!     let status = router.go_node(CourseNode::Node8).unwrap();
//!     assert_eq!(status, RouteStatus::Enroute);
//! }
//! ```
//!
//! The mission task operations ([`Router::find_bobbin`],
//! [`Router::go_to_delivery`], ...) are thin compositions over
//! [`Router::go_node`] plus clamp-presence fine positioning; they stage
//! the drive speed and restore it before reporting arrival.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(clippy::all)]

mod router;
mod tasks;

pub use router::Router;
pub use tasks::{APPROACH_SPEED, CREEP_SPEED, TRANSIT_SPEED};
