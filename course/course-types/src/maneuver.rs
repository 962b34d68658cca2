//! Manoeuvre and junction-shape vocabulary.

/// What the router must do when passing through a node.
///
/// These are the TURN_MAP entries: one per `(direction, node)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maneuver {
    /// Drive through the junction on the main line.
    Straight,
    /// Committed left pivot onto the branch.
    Left,
    /// Committed right pivot onto the branch.
    Right,
    /// The line ends here; stop.
    EndOfLine,
}

impl Maneuver {
    /// Returns `true` for the two committed pivots.
    #[must_use]
    pub const fn is_turn(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// The branch lines physically painted at a node, independent of the
/// direction of approach.
///
/// This is auxiliary data used for sanity checks and tests; the router
/// executes from the direction-indexed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JunctionShape {
    /// No branches; the node is a plain waypoint on the line.
    Plain,
    /// One branch line leaving the main line.
    SideSpur,
    /// The main line itself turns a corner.
    Corner,
    /// A corner doubled by a parallel line immediately beyond it.
    DoubleJunction,
    /// The line dead-ends.
    Terminus,
}
