//! Line sensor snapshot types.

/// A single IR line sensor's reading.
///
/// The sensors are binary: either the white guide line is under the
/// sensor or it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorReading {
    /// The sensor sees the guide line.
    Line,
    /// The sensor sees the course surface.
    NoLine,
}

impl SensorReading {
    /// Returns `true` if the sensor sees the line.
    #[must_use]
    pub const fn is_line(self) -> bool {
        matches!(self, Self::Line)
    }
}

/// One tick's reading of the four line-following sensors.
///
/// The two inner sensors (`line_left`, `line_right`) straddle the guide
/// line while driving straight; the two outer sensors pick up drift and
/// junction branch lines. A snapshot is immutable once read: the
/// controller classifies it and commands the motors in the same tick.
///
/// # Example
///
/// ```
/// use drive_types::{LineSnapshot, SensorReading};
///
/// // Drifted slightly left: only the inner-right sensor sees the line.
/// let snap = LineSnapshot::new(
///     SensorReading::NoLine,
///     SensorReading::NoLine,
///     SensorReading::Line,
///     SensorReading::NoLine,
/// );
/// assert!(!snap.is_centred());
/// assert!(!snap.is_blank());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSnapshot {
    /// Leftmost sensor, outside the guide line.
    pub outer_left: SensorReading,
    /// Inner-left sensor.
    pub line_left: SensorReading,
    /// Inner-right sensor.
    pub line_right: SensorReading,
    /// Rightmost sensor, outside the guide line.
    pub outer_right: SensorReading,
}

impl LineSnapshot {
    /// Creates a snapshot from the four readings in left-to-right order.
    #[must_use]
    pub const fn new(
        outer_left: SensorReading,
        line_left: SensorReading,
        line_right: SensorReading,
        outer_right: SensorReading,
    ) -> Self {
        Self {
            outer_left,
            line_left,
            line_right,
            outer_right,
        }
    }

    /// The snapshot seen while tracking the line dead-centre: both inner
    /// sensors on the line, both outer sensors off it.
    #[must_use]
    pub const fn centred() -> Self {
        Self::new(
            SensorReading::NoLine,
            SensorReading::Line,
            SensorReading::Line,
            SensorReading::NoLine,
        )
    }

    /// The snapshot with every sensor off the line.
    #[must_use]
    pub const fn blank() -> Self {
        Self::new(
            SensorReading::NoLine,
            SensorReading::NoLine,
            SensorReading::NoLine,
            SensorReading::NoLine,
        )
    }

    /// The snapshot with every sensor on a line, seen over a crossroads.
    #[must_use]
    pub const fn all_line() -> Self {
        Self::new(
            SensorReading::Line,
            SensorReading::Line,
            SensorReading::Line,
            SensorReading::Line,
        )
    }

    /// Returns `true` when both inner sensors see the line and both
    /// outer sensors do not.
    #[must_use]
    pub const fn is_centred(self) -> bool {
        self.line_left.is_line()
            && self.line_right.is_line()
            && !self.outer_left.is_line()
            && !self.outer_right.is_line()
    }

    /// Returns `true` when no sensor sees a line.
    #[must_use]
    pub const fn is_blank(self) -> bool {
        !self.outer_left.is_line()
            && !self.line_left.is_line()
            && !self.line_right.is_line()
            && !self.outer_right.is_line()
    }

    /// Returns `true` when both inner sensors see the line.
    ///
    /// Junction lookahead requires this before the outer sensors are
    /// trusted: with an inner sensor off the line, an outer-sensor hit
    /// is more likely drift onto the main line than a branch.
    #[must_use]
    pub const fn inner_on_line(self) -> bool {
        self.line_left.is_line() && self.line_right.is_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_snapshot() {
        let snap = LineSnapshot::centred();
        assert!(snap.is_centred());
        assert!(snap.inner_on_line());
        assert!(!snap.is_blank());
    }

    #[test]
    fn test_blank_snapshot() {
        let snap = LineSnapshot::blank();
        assert!(snap.is_blank());
        assert!(!snap.is_centred());
        assert!(!snap.inner_on_line());
    }

    #[test]
    fn test_all_line_is_neither_centred_nor_blank() {
        let snap = LineSnapshot::all_line();
        assert!(!snap.is_centred());
        assert!(!snap.is_blank());
        assert!(snap.inner_on_line());
    }

    #[test]
    fn test_drift_is_not_centred() {
        let snap = LineSnapshot::new(
            SensorReading::NoLine,
            SensorReading::NoLine,
            SensorReading::Line,
            SensorReading::NoLine,
        );
        assert!(!snap.is_centred());
        assert!(!snap.inner_on_line());
    }
}
