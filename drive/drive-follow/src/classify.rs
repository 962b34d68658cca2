//! Snapshot classification for straight tracking and turns.

use drive_types::{LineSnapshot, LineStatus, SensorReading, TurnDirection};

/// The steering cases recognised by straight-line tracking.
///
/// One snapshot maps to exactly one case. Patterns not listed in the
/// sensor truth table land in [`SteerCase::Unrecognised`] and are
/// treated as single-tick noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerCase {
    /// Dead on the line.
    Centred,
    /// Drifted left: only the inner-right sensor sees the line.
    DriftLeft,
    /// Drifted right: only the inner-left sensor sees the line.
    DriftRight,
    /// Far off to the left: only the outer-right sensor sees the line.
    FarLeft,
    /// Far off to the right: only the outer-left sensor sees the line.
    FarRight,
    /// Centred with a branch line to the left.
    JunctionLeft,
    /// Centred with a branch line to the right.
    JunctionRight,
    /// Centred with branch lines on both sides.
    JunctionBoth,
    /// No sensor sees a line.
    Blank,
    /// Transient pattern outside the truth table.
    Unrecognised,
}

/// Classifies one snapshot for straight tracking.
#[must_use]
pub fn classify(snap: LineSnapshot) -> SteerCase {
    use SensorReading::{Line, NoLine};

    match (snap.line_left, snap.line_right, snap.outer_left, snap.outer_right) {
        (Line, Line, NoLine, NoLine) => SteerCase::Centred,
        (NoLine, Line, NoLine, NoLine) => SteerCase::DriftLeft,
        (Line, NoLine, NoLine, NoLine) => SteerCase::DriftRight,
        (NoLine, NoLine, Line, NoLine) => SteerCase::FarRight,
        (NoLine, NoLine, NoLine, Line) => SteerCase::FarLeft,
        (Line, Line, Line, NoLine) => SteerCase::JunctionLeft,
        (Line, Line, NoLine, Line) => SteerCase::JunctionRight,
        (Line, Line, Line, Line) => SteerCase::JunctionBoth,
        (NoLine, NoLine, NoLine, NoLine) => SteerCase::Blank,
        _ => SteerCase::Unrecognised,
    }
}

/// Classifies one snapshot relative to an in-progress turn.
///
/// A centred snapshot is on-line for every direction; a blank one is
/// lost for every direction. In between, each turn direction has one
/// pattern that counts as its line: the sensor that sweeps onto the
/// target line first given the rotation sense.
#[must_use]
pub fn line_status(snap: LineSnapshot, direction: TurnDirection) -> LineStatus {
    if snap.is_centred() {
        return LineStatus::OnLine;
    }
    if snap.is_blank() {
        return LineStatus::LostLine;
    }

    let on_line = match direction {
        TurnDirection::Left | TurnDirection::AroundCcw => {
            snap.line_left.is_line() && !snap.line_right.is_line()
        }
        TurnDirection::Right => !snap.line_left.is_line() && snap.line_right.is_line(),
        TurnDirection::AroundCw => snap.outer_right.is_line(),
    };

    if on_line {
        LineStatus::OnLine
    } else {
        LineStatus::Other
    }
}

#[cfg(test)]
mod tests {
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

    #[test]
    fn test_truth_table_cases() {
        assert_eq!(classify(snap(false, true, true, false)), SteerCase::Centred);
        assert_eq!(classify(snap(false, false, true, false)), SteerCase::DriftLeft);
        assert_eq!(classify(snap(false, true, false, false)), SteerCase::DriftRight);
        assert_eq!(classify(snap(true, false, false, false)), SteerCase::FarRight);
        assert_eq!(classify(snap(false, false, false, true)), SteerCase::FarLeft);
        assert_eq!(classify(snap(true, true, true, false)), SteerCase::JunctionLeft);
        assert_eq!(classify(snap(false, true, true, true)), SteerCase::JunctionRight);
        assert_eq!(classify(snap(true, true, true, true)), SteerCase::JunctionBoth);
        assert_eq!(classify(snap(false, false, false, false)), SteerCase::Blank);
    }

    #[test]
    fn test_off_table_patterns_are_unrecognised() {
        // Outer and opposite inner, a pattern the table never produces.
        assert_eq!(classify(snap(true, false, true, false)), SteerCase::Unrecognised);
        assert_eq!(classify(snap(true, true, false, false)), SteerCase::Unrecognised);
    }

    #[test]
    fn test_line_status_centred_matches_any_direction() {
        for direction in [
            TurnDirection::Left,
            TurnDirection::Right,
            TurnDirection::AroundCw,
            TurnDirection::AroundCcw,
        ] {
            assert_eq!(line_status(LineSnapshot::centred(), direction), LineStatus::OnLine);
            assert_eq!(line_status(LineSnapshot::blank(), direction), LineStatus::LostLine);
        }
    }

    #[test]
    fn test_line_status_direction_specific_patterns() {
        // Inner-left only: the left-turn and ccw-spin arrival pattern.
        let left_arrival = snap(false, true, false, false);
        assert_eq!(line_status(left_arrival, TurnDirection::Left), LineStatus::OnLine);
        assert_eq!(line_status(left_arrival, TurnDirection::AroundCcw), LineStatus::OnLine);
        assert_eq!(line_status(left_arrival, TurnDirection::Right), LineStatus::Other);

        // Inner-right only: the right-turn arrival pattern.
        let right_arrival = snap(false, false, true, false);
        assert_eq!(line_status(right_arrival, TurnDirection::Right), LineStatus::OnLine);
        assert_eq!(line_status(right_arrival, TurnDirection::Left), LineStatus::Other);

        // Outer-right: the clockwise-spin arrival pattern.
        let cw_arrival = snap(false, false, false, true);
        assert_eq!(line_status(cw_arrival, TurnDirection::AroundCw), LineStatus::OnLine);
        assert_eq!(line_status(cw_arrival, TurnDirection::Left), LineStatus::Other);
    }
}
