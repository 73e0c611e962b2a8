//! Circle overlap tests and chase steps
//!
//! Every body in the arena is a circle, so all contact checks reduce to a
//! strict distance-versus-radius-sum comparison.

use glam::Vec2;

/// True if two circles overlap (touching exactly does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Move `from` a distance of `speed` toward `to`.
///
/// Returns `from` unchanged when the points coincide, since there is no
/// direction to move in. The step may overshoot `to`.
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 {
        from + delta / dist * speed
    } else {
        from
    }
}

/// Index of the first tail segment overlapping the circle, if any
pub fn first_segment_hit(
    pos: Vec2,
    radius: f32,
    tail: &[Vec2],
    segment_radius: f32,
) -> Option<usize> {
    tail.iter().position(|&seg| circles_overlap(pos, radius, seg, segment_radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 12.0, Vec2::new(26.9, 0.0), 15.0));
        // Exactly touching is not an overlap
        assert!(!circles_overlap(a, 12.0, Vec2::new(27.0, 0.0), 15.0));
    }

    #[test]
    fn test_step_toward_unit_speed() {
        let p = step_toward(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 5.0);
        assert!((p - Vec2::new(3.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_step_toward_zero_distance_is_noop() {
        let p = Vec2::new(10.0, 10.0);
        let moved = step_toward(p, p, 1.5);
        assert_eq!(moved, p);
        assert!(moved.is_finite());
    }

    #[test]
    fn test_first_segment_hit_picks_earliest() {
        let tail = [Vec2::new(100.0, 0.0), Vec2::new(5.0, 0.0), Vec2::new(0.0, 5.0)];
        assert_eq!(first_segment_hit(Vec2::ZERO, 12.0, &tail, 12.0), Some(1));
        assert_eq!(first_segment_hit(Vec2::new(500.0, 500.0), 12.0, &tail, 12.0), None);
    }
}
