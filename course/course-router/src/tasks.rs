//! Mission task operations.
//!
//! Thin compositions over [`Router::go_node`]: each picks the drive
//! speed for the manoeuvre, routes to a fixed node, and where the task
//! is detection-critical finishes with a presence-poll creep so the
//! clamp lines up with the bobbin or box before the motors stop.

use course_types::{CourseNode, RouteStatus};
use drive_hal::{HardwareLink, LinkError};
use drive_types::FollowStatus;
use tracing::info;

use crate::Router;

/// Drive speed for plain transit between nodes.
pub const TRANSIT_SPEED: u8 = 127;

/// Reduced speed for detection-critical approaches, limiting overshoot.
pub const APPROACH_SPEED: u8 = 64;

/// Crawl speed for the final presence-poll positioning.
pub const CREEP_SPEED: u8 = 40;

/// Which clamp sensor confirms the fine positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PresenceTarget {
    Bobbin,
    Box,
}

impl<L: HardwareLink> Router<L> {
    /// Routes to the first rack station and lines up on a bobbin.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn find_bobbin(&mut self) -> Result<RouteStatus, LinkError> {
        self.seek_with_presence(CourseNode::Node8, PresenceTarget::Bobbin)
    }

    /// Routes to the second rack station and lines up on a bobbin.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn find_next_bobbin(&mut self) -> Result<RouteStatus, LinkError> {
        self.seek_with_presence(CourseNode::Node9, PresenceTarget::Bobbin)
    }

    /// Routes to the pickup box station and lines up on the box.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn find_box_for_pickup(&mut self) -> Result<RouteStatus, LinkError> {
        self.seek_with_presence(CourseNode::Node3, PresenceTarget::Box)
    }

    /// Routes to the drop box station and lines up on the box.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn find_box_for_drop(&mut self) -> Result<RouteStatus, LinkError> {
        self.seek_with_presence(CourseNode::Node4, PresenceTarget::Box)
    }

    /// Routes to the delivery platform at transit speed and stops there.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn go_to_delivery(&mut self) -> Result<RouteStatus, LinkError> {
        self.set_speed(TRANSIT_SPEED);
        match self.go_node(CourseNode::Node11)? {
            RouteStatus::Arrived => {
                self.link_mut().motors_stop()?;
                info!("stopped at the delivery platform");
                Ok(RouteStatus::Arrived)
            }
            other => Ok(other),
        }
    }

    /// Backs out of the delivery platform and returns to the junction
    /// above it.
    ///
    /// The platform spur has no line behind the robot, so the about-turn
    /// completes on losing the line rather than reacquiring one; after
    /// that this routes normally to the junction.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn finished_delivery(&mut self) -> Result<RouteStatus, LinkError> {
        if self.position().1 == CourseNode::Node11 {
            self.set_speed(APPROACH_SPEED);
            let (follower, link) = self.split_mut();
            return match follower.turn_around_delivery(link)? {
                FollowStatus::Completed => {
                    self.swap_edge();
                    self.set_speed(TRANSIT_SPEED);
                    info!("backed out of the delivery platform");
                    Ok(RouteStatus::Enroute)
                }
                FollowStatus::Lost => Ok(RouteStatus::Lost),
                _ => Ok(RouteStatus::Enroute),
            };
        }
        self.go_node(CourseNode::Node10)
    }

    /// Routes back to the start box and stops.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`].
    pub fn go_home(&mut self) -> Result<RouteStatus, LinkError> {
        self.set_speed(TRANSIT_SPEED);
        match self.go_node(CourseNode::Node1)? {
            RouteStatus::Arrived => {
                self.link_mut().motors_stop()?;
                info!("home");
                Ok(RouteStatus::Arrived)
            }
            other => Ok(other),
        }
    }

    /// Routes to `node` at approach speed, then creeps until the clamp
    /// confirms presence.
    fn seek_with_presence(
        &mut self,
        node: CourseNode,
        what: PresenceTarget,
    ) -> Result<RouteStatus, LinkError> {
        self.set_speed(APPROACH_SPEED);
        match self.go_node(node)? {
            RouteStatus::Arrived => match self.creep_to_presence(what)? {
                RouteStatus::Arrived => {
                    self.set_speed(TRANSIT_SPEED);
                    Ok(RouteStatus::Arrived)
                }
                other => Ok(other),
            },
            other => Ok(other),
        }
    }

    /// Crawls forward along the line until the presence sensor trips,
    /// then stops the motors.
    ///
    /// Bounded by the follower's lost timeout: creeping off the end of
    /// the line reports [`RouteStatus::Lost`] instead of spinning
    /// forever.
    fn creep_to_presence(&mut self, what: PresenceTarget) -> Result<RouteStatus, LinkError> {
        self.set_speed(CREEP_SPEED);
        loop {
            let present = match what {
                PresenceTarget::Bobbin => self.link_mut().bobbin_present()?,
                PresenceTarget::Box => self.link_mut().box_present()?,
            };
            if present {
                self.link_mut().motors_stop()?;
                info!(seeking = ?what, "presence confirmed, stopped");
                return Ok(RouteStatus::Arrived);
            }
            let (follower, link) = self.split_mut();
            if follower.follow_line(link)? == FollowStatus::Lost {
                return Ok(RouteStatus::Lost);
            }
        }
    }
}
