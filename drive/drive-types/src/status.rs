//! Status codes reported by the drive layer's per-tick operations.

/// Outcome of one line-following or turning tick.
///
/// `InProgress` is the common case; the caller keeps polling. The three
/// `*TurnFound` variants are reported by straight-line tracking when the
/// outer sensors pick up junction branch lines. `Lost` is the only hard
/// failure: the line has not been seen for longer than the speed-scaled
/// timeout. It does not stop the motors; that decision belongs to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FollowStatus {
    /// The manoeuvre is still running; poll again next tick.
    InProgress,
    /// A committed turn has reacquired its target line.
    Completed,
    /// A branch line was seen to the left.
    LeftTurnFound,
    /// A branch line was seen to the right.
    RightTurnFound,
    /// Branch lines were seen on both sides.
    BothTurnsFound,
    /// The line has been out of sight for longer than the timeout.
    Lost,
}

impl FollowStatus {
    /// Returns `true` for any of the three turn-found variants.
    #[must_use]
    pub const fn is_turn_found(self) -> bool {
        matches!(
            self,
            Self::LeftTurnFound | Self::RightTurnFound | Self::BothTurnsFound
        )
    }

    /// Returns `true` if this is the `Lost` failure.
    #[must_use]
    pub const fn is_lost(self) -> bool {
        matches!(self, Self::Lost)
    }
}

/// Read-only junction classification, cached by the router across the
/// ticks of a single manoeuvre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JunctionStatus {
    /// No branch lines visible.
    NoTurns,
    /// A branch line to the left.
    LeftTurn,
    /// A branch line to the right.
    RightTurn,
    /// Branch lines on both sides.
    BothTurns,
}

/// Line state relative to an in-progress turn.
///
/// Used by the turn state machine to sequence departure, the blind
/// mid-turn sweep, and arrival on the target line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineStatus {
    /// On a line appropriate to the turn direction.
    OnLine,
    /// No line visible anywhere.
    LostLine,
    /// A transitional pattern; keep turning.
    Other,
}

/// The four committed manoeuvres.
///
/// `Left` and `Right` pivot about the stationary wheel; the two
/// about-turns counter-rotate both wheels to spin on the spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnDirection {
    /// Pivot left: left wheel stopped, right wheel driven.
    Left,
    /// Pivot right: right wheel stopped, left wheel driven.
    Right,
    /// Spin clockwise on the spot.
    AroundCw,
    /// Spin anticlockwise on the spot.
    AroundCcw,
}

impl TurnDirection {
    /// Returns `true` for the two on-the-spot about-turns.
    #[must_use]
    pub const fn is_about_turn(self) -> bool {
        matches!(self, Self::AroundCw | Self::AroundCcw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_found_predicate() {
        assert!(FollowStatus::LeftTurnFound.is_turn_found());
        assert!(FollowStatus::RightTurnFound.is_turn_found());
        assert!(FollowStatus::BothTurnsFound.is_turn_found());
        assert!(!FollowStatus::InProgress.is_turn_found());
        assert!(!FollowStatus::Lost.is_turn_found());
    }

    #[test]
    fn test_lost_predicate() {
        assert!(FollowStatus::Lost.is_lost());
        assert!(!FollowStatus::Completed.is_lost());
    }

    #[test]
    fn test_about_turn_predicate() {
        assert!(TurnDirection::AroundCw.is_about_turn());
        assert!(TurnDirection::AroundCcw.is_about_turn());
        assert!(!TurnDirection::Left.is_about_turn());
        assert!(!TurnDirection::Right.is_about_turn());
    }
}
