//! Router status codes.

/// Outcome of one routing tick.
///
/// `Lost` mirrors the follower's lost-line failure at the routing
/// level. It is a plain result variant, not an error: the mission layer
/// decides whether to stop, reverse, or alert, and the router adds no
/// recovery of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteStatus {
    /// Still travelling; poll again next tick.
    Enroute,
    /// The requested node has been reached.
    Arrived,
    /// The guide line has been lost en route.
    Lost,
}

impl RouteStatus {
    /// Returns `true` while the route is still being driven.
    #[must_use]
    pub const fn is_enroute(self) -> bool {
        matches!(self, Self::Enroute)
    }

    /// Returns `true` once the target has been reached.
    #[must_use]
    pub const fn is_arrived(self) -> bool {
        matches!(self, Self::Arrived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(RouteStatus::Enroute.is_enroute());
        assert!(!RouteStatus::Enroute.is_arrived());
        assert!(RouteStatus::Arrived.is_arrived());
        assert!(!RouteStatus::Lost.is_enroute());
        assert!(!RouteStatus::Lost.is_arrived());
    }
}
