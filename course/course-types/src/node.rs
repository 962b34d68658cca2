//! Course nodes and the direction-of-travel convention.

use std::fmt;

/// One of the eleven sensor-detectable positions on the course.
///
/// Node indices ascend clockwise around the circuit: the start box sits
/// at [`Node1`](Self::Node1), the box stations along the bottom
/// straight, the bobbin rack along the top edges, and the delivery
/// platform at the [`Node11`](Self::Node11) spur. The ordering is load
/// bearing: travel direction is derived by comparing node indices, and
/// the manoeuvre tables in [`crate::table`] are built around exactly
/// that convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CourseNode {
    /// Start box junction.
    Node1,
    /// First box station.
    Node2,
    /// Second box station.
    Node3,
    /// Third box station.
    Node4,
    /// South-east corner.
    Node5,
    /// East-side dogleg corner.
    Node6,
    /// North-east corner, doubled by the rack's parallel line.
    Node7,
    /// East rack support.
    Node8,
    /// West rack support.
    Node9,
    /// North-west corner above the delivery approach.
    Node10,
    /// Delivery platform spur.
    Node11,
}

impl CourseNode {
    /// All eleven nodes in index order.
    pub const ALL: [Self; 11] = [
        Self::Node1,
        Self::Node2,
        Self::Node3,
        Self::Node4,
        Self::Node5,
        Self::Node6,
        Self::Node7,
        Self::Node8,
        Self::Node9,
        Self::Node10,
        Self::Node11,
    ];

    /// Zero-based index of this node.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Looks a node up by zero-based index.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

impl fmt::Display for CourseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NODE{}", self.index() + 1)
    }
}

/// Direction of travel around the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Ascending node indices.
    Clockwise,
    /// Descending node indices.
    Anticlockwise,
}

impl Direction {
    /// Direction of travel along the edge from `from` towards `ahead`.
    ///
    /// Plain index comparison, not cyclic distance; the static tables
    /// assume this convention.
    #[must_use]
    pub fn of_travel(from: CourseNode, ahead: CourseNode) -> Self {
        if ahead > from {
            Self::Clockwise
        } else {
            Self::Anticlockwise
        }
    }

    /// The reverse direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::Anticlockwise,
            Self::Anticlockwise => Self::Clockwise,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => write!(f, "clockwise"),
            Self::Anticlockwise => write!(f, "anticlockwise"),
        }
    }
}
