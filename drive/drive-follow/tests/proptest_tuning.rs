//! Property-based tests for the speed-derived tuning.
//!
//! Run with: cargo test -p drive-follow -- proptest

use drive_follow::{cap_correction, LineFollower, MAX_CORRECTION};
use proptest::prelude::*;

proptest! {
    /// The cap is exactly min(c, MAX_CORRECTION) for every input.
    #[test]
    fn prop_cap_correction_is_min(c in any::<u32>()) {
        let capped = u32::from(cap_correction(c));
        prop_assert_eq!(capped, c.min(u32::from(MAX_CORRECTION)));
        prop_assert!(capped <= u32::from(MAX_CORRECTION));
    }

    /// Speeds above the motor maximum clamp to it.
    #[test]
    fn prop_set_speed_clamps(speed in 128u8..=255) {
        let mut follower = LineFollower::new();
        follower.set_speed(speed);
        prop_assert_eq!(follower.speed(), 127);
    }

    /// Gain and the two timeouts never decrease as speed decreases:
    /// more headroom means gentler correction and more patience.
    #[test]
    fn prop_tuning_monotone_in_headroom(slow in 0u8..=127, fast in 0u8..=127) {
        prop_assume!(slow <= fast);

        let mut slower = LineFollower::new();
        slower.set_speed(slow);
        let mut faster = LineFollower::new();
        faster.set_speed(fast);

        prop_assert!(slower.integral_gain() <= faster.integral_gain());
        prop_assert!(slower.lost_timeout() >= faster.lost_timeout());
        prop_assert!(slower.turning_timeout() >= faster.turning_timeout());
    }

    /// The derived gain is always positive and at most the baseline.
    #[test]
    fn prop_gain_bounded(speed in 0u8..=255) {
        let mut follower = LineFollower::new();
        follower.set_speed(speed);
        prop_assert!(follower.integral_gain() > 0.0);
        prop_assert!(follower.integral_gain() <= 5.0);
    }
}
