//! The router state machine.

use course_types::{
    junction_skip_lines, route_after, special_turn_around, turn_for, CourseError, CourseNode,
    Direction, Maneuver, RouteStatus,
};
use drive_follow::LineFollower;
use drive_hal::{HardwareLink, LinkError};
use drive_types::{FollowStatus, JunctionStatus};
use tracing::{debug, info, warn};

use crate::tasks::TRANSIT_SPEED;

/// Node-to-node router over the course graph.
///
/// Owns the hardware link and the line follower. The position estimate
/// is the directed edge `(from, to)`; `from != to` always holds, and
/// the direction of travel is derived from the edge by index
/// comparison, the convention the static tables are built around.
#[derive(Debug)]
pub struct Router<L> {
    link: L,
    follower: LineFollower,
    from: CourseNode,
    to: CourseNode,
    /// Junction classification held for the duration of one manoeuvre,
    /// so a multi-tick turn is not re-classified mid-execution.
    cached_junction: Option<JunctionStatus>,
    /// Set once a special-case about-turn has driven to the end of its
    /// edge and the junction there has been seen.
    reached_special_case_junction: bool,
    /// Set while the rotation phase of a special-case about-turn runs,
    /// so the edge-end junction can neither re-trigger the pre-action
    /// nor count as the rotation's completion.
    doing_second_turn: bool,
}

impl<L: HardwareLink> Router<L> {
    /// Creates a router on the edge `(from, to)` with `to` ahead.
    ///
    /// The follower starts at transit speed. The initial pose is the
    /// mission layer's to give; the router never guesses one.
    ///
    /// # Errors
    ///
    /// Returns [`CourseError::DegenerateEdge`] when `from == to`.
    pub fn new(link: L, from: CourseNode, to: CourseNode) -> Result<Self, CourseError> {
        if from == to {
            return Err(CourseError::DegenerateEdge(from));
        }
        let mut follower = LineFollower::new();
        follower.set_speed(TRANSIT_SPEED);
        info!(%from, %to, "router initialised");
        Ok(Self {
            link,
            follower,
            from,
            to,
            cached_junction: None,
            reached_special_case_junction: false,
            doing_second_turn: false,
        })
    }

    /// The current position estimate as `(from, to)`.
    #[must_use]
    pub const fn position(&self) -> (CourseNode, CourseNode) {
        (self.from, self.to)
    }

    /// Direction of travel along the current edge.
    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::of_travel(self.from, self.to)
    }

    /// Current drive speed.
    #[must_use]
    pub const fn speed(&self) -> u8 {
        self.follower.speed()
    }

    /// Sets the drive speed (clamped by the follower).
    pub fn set_speed(&mut self, speed: u8) {
        self.follower.set_speed(speed);
    }

    /// Borrows the hardware link, for clamp operations above this layer.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Consumes the router, returning the link.
    pub fn into_link(self) -> L {
        self.link
    }

    /// One tick of driving towards `target`.
    ///
    /// Call repeatedly until the result is [`RouteStatus::Arrived`] or
    /// [`RouteStatus::Lost`]. Lost is reported, never retried here.
    ///
    /// # Errors
    ///
    /// Propagates any [`LinkError`] from the underlying round trips.
    pub fn go_node(&mut self, target: CourseNode) -> Result<RouteStatus, LinkError> {
        if self.turn_around_required(target) {
            return self.turn_around();
        }

        let junction = match self.cached_junction {
            Some(cached) => cached,
            None => {
                let fresh = self.follower.junction_status(&mut self.link)?;
                self.cached_junction = Some(fresh);
                fresh
            }
        };

        if junction == JunctionStatus::NoTurns {
            self.cached_junction = None;
            return match self.follower.follow_line(&mut self.link)? {
                FollowStatus::Lost => {
                    warn!(from = %self.from, to = %self.to, "line lost between nodes");
                    Ok(RouteStatus::Lost)
                }
                _ => Ok(RouteStatus::Enroute),
            };
        }

        self.handle_junction(target)
    }

    /// Whether reaching `target` means reversing along the current edge.
    ///
    /// False when `target` is the node ahead; otherwise the target's
    /// direction (by index comparison against `to`) is matched against
    /// the direction of travel.
    #[must_use]
    pub fn turn_around_required(&self, target: CourseNode) -> bool {
        if target == self.to {
            return false;
        }
        Direction::of_travel(self.to, target) != self.direction()
    }

    /// One tick of an about-turn.
    ///
    /// The special-case table overrides the generic spin for the edges
    /// where rotating in place is unsafe or ambiguous; those edges are
    /// driven out to their end junction first.
    fn turn_around(&mut self) -> Result<RouteStatus, LinkError> {
        if let Some(entry) = special_turn_around(self.from, self.to) {
            if !self.doing_second_turn {
                if !self.reached_special_case_junction {
                    return match self.follower.follow_line(&mut self.link)? {
                        FollowStatus::Lost => Ok(RouteStatus::Lost),
                        status if status.is_turn_found() => {
                            info!(at = %self.to, "edge end reached, rotating here");
                            self.reached_special_case_junction = true;
                            Ok(RouteStatus::Enroute)
                        }
                        _ => Ok(RouteStatus::Enroute),
                    };
                }
                self.doing_second_turn = true;
            }
            return self.rotate(entry.skip_lines);
        }
        self.rotate(0)
    }

    /// Spins on the spot against the direction of travel.
    fn rotate(&mut self, skip_lines: u8) -> Result<RouteStatus, LinkError> {
        let status = match self.direction() {
            Direction::Clockwise => self.follower.turn_around_cw(&mut self.link, skip_lines)?,
            Direction::Anticlockwise => self.follower.turn_around_ccw(&mut self.link, skip_lines)?,
        };
        match status {
            FollowStatus::Completed => {
                std::mem::swap(&mut self.from, &mut self.to);
                self.cached_junction = None;
                self.reached_special_case_junction = false;
                self.doing_second_turn = false;
                info!(from = %self.from, to = %self.to, "about-turn complete");
                Ok(RouteStatus::Enroute)
            }
            FollowStatus::Lost => {
                warn!("line lost during about-turn");
                Ok(RouteStatus::Lost)
            }
            _ => Ok(RouteStatus::Enroute),
        }
    }

    /// Executes the mandated manoeuvre at the junction ahead.
    fn handle_junction(&mut self, target: CourseNode) -> Result<RouteStatus, LinkError> {
        let direction = self.direction();

        if self.to == target {
            info!(node = %self.to, "arrived at target junction");
            self.advance(direction);
            self.cached_junction = None;
            return Ok(RouteStatus::Arrived);
        }

        match turn_for(direction, self.to) {
            Maneuver::Straight => match self.follower.follow_line(&mut self.link)? {
                FollowStatus::Lost => Ok(RouteStatus::Lost),
                FollowStatus::InProgress => {
                    // Branches no longer in view: the junction has been
                    // driven past and normal tracking has resumed.
                    debug!(past = %self.to, "straight through junction");
                    self.advance(direction);
                    self.cached_junction = None;
                    Ok(RouteStatus::Enroute)
                }
                _ => Ok(RouteStatus::Enroute),
            },
            maneuver @ (Maneuver::Left | Maneuver::Right) => {
                let skip_lines = junction_skip_lines(direction, self.to);
                let status = match maneuver {
                    Maneuver::Left => self.follower.turn_left(&mut self.link, skip_lines)?,
                    _ => self.follower.turn_right(&mut self.link, skip_lines)?,
                };
                match status {
                    FollowStatus::Completed => {
                        debug!(past = %self.to, "turn at junction complete");
                        self.advance(direction);
                        self.cached_junction = None;
                        Ok(RouteStatus::Enroute)
                    }
                    FollowStatus::Lost => Ok(RouteStatus::Lost),
                    _ => Ok(RouteStatus::Enroute),
                }
            }
            Maneuver::EndOfLine => {
                info!(at = %self.to, "end of line, stopping");
                self.link.motors_stop()?;
                self.cached_junction = None;
                Ok(RouteStatus::Arrived)
            }
        }
    }

    /// Advances the position estimate past the junction at `to`.
    ///
    /// At a terminus the estimate stays on the approach edge, keeping
    /// `from != to` and a meaningful direction for the way back out.
    fn advance(&mut self, direction: Direction) {
        if let Some(next) = route_after(direction, self.to) {
            self.from = self.to;
            self.to = next;
            debug!(from = %self.from, to = %self.to, "position estimate advanced");
        }
    }

    pub(crate) fn split_mut(&mut self) -> (&mut LineFollower, &mut L) {
        (&mut self.follower, &mut self.link)
    }

    pub(crate) fn swap_edge(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

#[cfg(test)]
mod tests {
    use drive_hal::{MotorCommand, ScriptedLink};
    use drive_types::{LineSnapshot, SensorReading};

    use super::*;

    fn snap(ol: bool, ll: bool, lr: bool, or: bool) -> LineSnapshot {
        let r = |on: bool| {
            if on {
                SensorReading::Line
            } else {
                SensorReading::NoLine
            }
        };
        LineSnapshot::new(r(ol), r(ll), r(lr), r(or))
    }

    fn router_on(
        from: CourseNode,
        to: CourseNode,
        snapshots: impl IntoIterator<Item = LineSnapshot>,
    ) -> Router<ScriptedLink> {
        Router::new(ScriptedLink::new(snapshots), from, to).unwrap()
    }

    #[test]
    fn test_new_rejects_degenerate_edge() {
        let result = Router::new(ScriptedLink::default(), CourseNode::Node3, CourseNode::Node3);
        assert!(matches!(result, Err(CourseError::DegenerateEdge(CourseNode::Node3))));
    }

    #[test]
    fn test_turn_around_required_only_when_directions_differ() {
        let router = router_on(CourseNode::Node7, CourseNode::Node8, []);
        // Target is the node ahead: no turn.
        assert!(!router.turn_around_required(CourseNode::Node8));
        // Further clockwise: no turn.
        assert!(!router.turn_around_required(CourseNode::Node11));
        // Behind us: turn required.
        assert!(router.turn_around_required(CourseNode::Node2));
    }

    #[test]
    fn test_target_ahead_goes_straight_to_follow_line() {
        // Scenario: on (7,8) with target 8, the first tick reads the
        // junction lookahead (no turns) then tracks the line; it never
        // counter-rotates.
        let mut router = router_on(
            CourseNode::Node7,
            CourseNode::Node8,
            [LineSnapshot::centred()],
        );

        let status = router.go_node(CourseNode::Node8).unwrap();
        assert_eq!(status, RouteStatus::Enroute);
        assert_eq!(
            router.link_mut().commands(),
            &[MotorCommand::BothForward(TRANSIT_SPEED)]
        );
    }

    #[test]
    fn test_arrival_at_target_junction_advances_estimate() {
        // Drive towards Node8, then its junction (rack support spur)
        // appears: arrival, with the estimate advanced past the node.
        let mut router = router_on(
            CourseNode::Node7,
            CourseNode::Node8,
            [
                LineSnapshot::centred(), // lookahead: no turns
                LineSnapshot::centred(), // follow_line
                snap(true, true, true, false), // lookahead: left branch
            ],
        );

        assert_eq!(router.go_node(CourseNode::Node8).unwrap(), RouteStatus::Enroute);
        assert_eq!(router.go_node(CourseNode::Node8).unwrap(), RouteStatus::Arrived);
        assert_eq!(router.position(), (CourseNode::Node8, CourseNode::Node9));
    }

    #[test]
    fn test_generic_turn_around_rotates_on_first_tick() {
        // On (4,3) anticlockwise with a clockwise target, the first
        // tick must counter-rotate, not drive or classify junctions.
        let mut router = router_on(
            CourseNode::Node4,
            CourseNode::Node3,
            [LineSnapshot::centred()],
        );

        assert!(router.turn_around_required(CourseNode::Node6));
        let status = router.go_node(CourseNode::Node6).unwrap();
        assert_eq!(status, RouteStatus::Enroute);
        let commands = router.link_mut().commands().to_vec();
        assert!(commands.iter().any(|c| c.is_backward()));
    }

    #[test]
    fn test_generic_turn_around_swaps_edge_on_completion() {
        let mut router = router_on(
            CourseNode::Node4,
            CourseNode::Node3,
            [
                LineSnapshot::centred(),       // departing
                LineSnapshot::blank(),         // mid-turn
                LineSnapshot::blank(),         // mid-turn
                snap(false, true, false, false), // ccw arrival pattern
                LineSnapshot::centred(),       // next tick: lookahead
                LineSnapshot::centred(),       // next tick: follow_line
            ],
        );

        for _ in 0..3 {
            assert_eq!(router.go_node(CourseNode::Node6).unwrap(), RouteStatus::Enroute);
            assert_eq!(router.position(), (CourseNode::Node4, CourseNode::Node3));
        }
        // Arrival tick completes the rotation and swaps the edge.
        assert_eq!(router.go_node(CourseNode::Node6).unwrap(), RouteStatus::Enroute);
        assert_eq!(router.position(), (CourseNode::Node3, CourseNode::Node4));
        assert_eq!(router.direction(), Direction::Clockwise);

        // No longer turning: the next tick drives.
        assert_eq!(router.go_node(CourseNode::Node6).unwrap(), RouteStatus::Enroute);
        assert_eq!(router.link_mut().last_command(), Some(MotorCommand::BothForward(TRANSIT_SPEED)));
    }

    #[test]
    fn test_rack_edge_turn_around_drives_edge_out_first() {
        // Scenario: on the rack edge (9,8) anticlockwise, a clockwise
        // target forces a turn-around, but the rotation must wait for
        // the end of the edge.
        let mut router = router_on(
            CourseNode::Node9,
            CourseNode::Node8,
            [
                LineSnapshot::centred(),       // pre-action: follow_line
                snap(true, true, true, false), // pre-action: edge-end junction
            ],
        );

        assert!(router.turn_around_required(CourseNode::Node10));

        // First tick drives straight; nothing rotates yet.
        assert_eq!(router.go_node(CourseNode::Node10).unwrap(), RouteStatus::Enroute);
        assert!(router.link_mut().commands().iter().all(|c| !c.is_backward()));

        // Second tick sees the junction at the edge end.
        assert_eq!(router.go_node(CourseNode::Node10).unwrap(), RouteStatus::Enroute);
        assert!(router.link_mut().commands().iter().all(|c| !c.is_backward()));

        // Third tick starts the rotation proper.
        router.link_mut().clear_commands();
        router.link_mut().extend_snapshots([LineSnapshot::centred()]);
        assert_eq!(router.go_node(CourseNode::Node10).unwrap(), RouteStatus::Enroute);
        assert!(router.link_mut().commands().iter().any(|c| c.is_backward()));
        // The estimate has not moved: the rotation is still on (9,8).
        assert_eq!(router.position(), (CourseNode::Node9, CourseNode::Node8));
    }

    #[test]
    fn test_rack_edge_turn_around_skips_rack_line() {
        let arrival = snap(false, true, false, false); // ccw arrival
        let mut router = router_on(
            CourseNode::Node9,
            CourseNode::Node8,
            [
                LineSnapshot::centred(),       // pre-action
                snap(true, true, true, false), // edge end
                LineSnapshot::centred(),       // rotation: departing
                LineSnapshot::blank(),         // rotation: mid-turn
                arrival,                       // rack's parallel line: skipped
                LineSnapshot::blank(),         // mid-turn again
                arrival,                       // the real line
            ],
        );

        let mut last = RouteStatus::Enroute;
        for _ in 0..7 {
            last = router.go_node(CourseNode::Node10).unwrap();
        }
        assert_eq!(last, RouteStatus::Enroute);
        // Edge swapped: now heading clockwise out of the rack.
        assert_eq!(router.position(), (CourseNode::Node8, CourseNode::Node9));
        assert_eq!(router.direction(), Direction::Clockwise);
    }

    #[test]
    fn test_start_box_exit_skips_two_frame_lines() {
        let arrival = snap(false, true, false, false); // ccw arrival pattern
        let mut router = router_on(
            CourseNode::Node2,
            CourseNode::Node1,
            [
                snap(true, true, true, true),  // pre-action: box frame junction
                LineSnapshot::centred(),       // rotation: departing
                LineSnapshot::blank(),
                arrival,                       // frame line one: skipped
                LineSnapshot::blank(),
                arrival,                       // frame line two: skipped
                LineSnapshot::blank(),
                arrival,                       // the course line
            ],
        );

        // Facing into the start box, any clockwise target needs the
        // special exit.
        assert!(router.turn_around_required(CourseNode::Node5));

        let mut last = RouteStatus::Enroute;
        for _ in 0..8 {
            last = router.go_node(CourseNode::Node5).unwrap();
        }
        assert_eq!(last, RouteStatus::Enroute);
        assert_eq!(router.position(), (CourseNode::Node1, CourseNode::Node2));
        assert_eq!(router.direction(), Direction::Clockwise);
    }

    #[test]
    fn test_both_turns_junction_executes_mandated_right() {
        // Scenario: the south-east corner (Node5) shows both branches;
        // clockwise the mandated manoeuvre is a right pivot, and
        // completing it advances the estimate per the route table.
        let mut router = router_on(
            CourseNode::Node4,
            CourseNode::Node5,
            [
                LineSnapshot::all_line(),      // lookahead: both turns
                LineSnapshot::centred(),       // turn: departing
                LineSnapshot::blank(),         // turn: mid-pivot
                snap(false, false, true, false), // right-pivot arrival
            ],
        );

        assert_eq!(router.go_node(CourseNode::Node7).unwrap(), RouteStatus::Enroute);
        // Right pivot: right wheel parked, left wheel driven.
        assert!(router
            .link_mut()
            .commands()
            .contains(&MotorCommand::RightForward(0)));

        assert_eq!(router.go_node(CourseNode::Node7).unwrap(), RouteStatus::Enroute);
        assert_eq!(router.position(), (CourseNode::Node4, CourseNode::Node5));

        assert_eq!(router.go_node(CourseNode::Node7).unwrap(), RouteStatus::Enroute);
        assert_eq!(router.position(), (CourseNode::Node5, CourseNode::Node6));
    }

    #[test]
    fn test_straight_junction_advances_once_branches_clear() {
        // Box station Node3 clockwise: drive straight through.
        let mut router = router_on(
            CourseNode::Node2,
            CourseNode::Node3,
            [
                snap(true, true, true, false), // lookahead: left branch
                snap(true, true, true, false), // follow_line: still over it
                LineSnapshot::centred(),       // follow_line: past it
            ],
        );

        assert_eq!(router.go_node(CourseNode::Node5).unwrap(), RouteStatus::Enroute);
        assert_eq!(router.position(), (CourseNode::Node2, CourseNode::Node3));
        assert_eq!(router.go_node(CourseNode::Node5).unwrap(), RouteStatus::Enroute);
        assert_eq!(router.position(), (CourseNode::Node3, CourseNode::Node4));
    }

    #[test]
    fn test_lost_propagates_from_follow_line() {
        let mut router = router_on(
            CourseNode::Node2,
            CourseNode::Node3,
            [LineSnapshot::blank()],
        );

        let timeout = 50; // straight timeout at transit speed
        let mut last = RouteStatus::Enroute;
        for _ in 0..=timeout {
            last = router.go_node(CourseNode::Node5).unwrap();
        }
        assert_eq!(last, RouteStatus::Lost);
    }

    #[test]
    fn test_arrival_at_terminus_keeps_approach_edge() {
        // Heading anticlockwise into the start box: the route table has
        // no node past Node1, so arrival leaves the estimate on the
        // approach edge and the way out is an about-turn.
        let mut router = router_on(
            CourseNode::Node2,
            CourseNode::Node1,
            [snap(true, true, true, true)],
        );

        assert_eq!(router.go_node(CourseNode::Node1).unwrap(), RouteStatus::Arrived);
        assert_eq!(router.position(), (CourseNode::Node2, CourseNode::Node1));
        assert_eq!(router.direction(), Direction::Anticlockwise);
    }

    #[test]
    fn test_junction_cache_survives_across_turn_ticks() {
        // Once the lookahead sees the corner, later ticks of the same
        // manoeuvre must not re-read it: only the turn's own sensor
        // ticks consume snapshots.
        let mut router = router_on(
            CourseNode::Node4,
            CourseNode::Node5,
            [
                LineSnapshot::all_line(), // lookahead (cached)
                LineSnapshot::centred(),  // turn tick 1
                LineSnapshot::blank(),    // turn tick 2
                LineSnapshot::blank(),    // turn tick 3
            ],
        );

        for _ in 0..3 {
            assert_eq!(router.go_node(CourseNode::Node7).unwrap(), RouteStatus::Enroute);
        }
        // Still mid-turn on the same edge; the cache kept the turn
        // running off one classification.
        assert_eq!(router.position(), (CourseNode::Node4, CourseNode::Node5));
    }
}
