//! Property-based checks for the placement calculator.
//!
//! 1. Identical inputs always produce identical coordinates.
//! 2. The element never overlaps the target on the placement axis.
//! 3. The gap on the placement axis equals the offset.
//! 4. Centered alignment shares the target's center on the cross axis.
//! 5. The positioner never replaces a coordinate with one from missing geometry.

use glimmer::position::{compute_placement, Align, Placement, Positioner, Rect, Side};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500i32..=500, -500i32..=500, 0i32..=300, 0i32..=300)
        .prop_map(|(t, l, w, h)| Rect::new(t as f64, l as f64, w as f64, h as f64))
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right)
    ]
}

fn align_strategy() -> impl Strategy<Value = Align> {
    prop_oneof![Just(Align::Start), Just(Align::Center), Just(Align::End)]
}

fn placement_strategy() -> impl Strategy<Value = Placement> {
    (side_strategy(), align_strategy(), 0i32..=32)
        .prop_map(|(side, align, offset)| Placement::new(side, align, offset as f64))
}

proptest! {
    #[test]
    fn deterministic(target in rect_strategy(), element in rect_strategy(), p in placement_strategy()) {
        prop_assert_eq!(
            compute_placement(&target, &element, &p),
            compute_placement(&target, &element, &p)
        );
    }

    #[test]
    fn gap_equals_offset(target in rect_strategy(), element in rect_strategy(), p in placement_strategy()) {
        let c = compute_placement(&target, &element, &p);
        let gap = match p.side {
            Side::Top => target.top - (c.top + element.height),
            Side::Bottom => c.top - target.bottom(),
            Side::Left => target.left - (c.left + element.width),
            Side::Right => c.left - target.right(),
        };
        prop_assert!((gap - p.offset).abs() < 1e-9, "gap {} offset {}", gap, p.offset);
    }

    #[test]
    fn center_alignment_shares_center(target in rect_strategy(), element in rect_strategy(), side in side_strategy()) {
        let c = compute_placement(&target, &element, &Placement::new(side, Align::Center, 0.0));
        let (mine, theirs) = match side {
            Side::Top | Side::Bottom => (c.left + element.width / 2.0, target.left + target.width / 2.0),
            Side::Left | Side::Right => (c.top + element.height / 2.0, target.top + target.height / 2.0),
        };
        prop_assert!((mine - theirs).abs() < 1e-9);
    }

    #[test]
    fn positioner_keeps_last_good_coordinate(target in rect_strategy(), element in rect_strategy(), p in placement_strategy()) {
        let mut positioner = Positioner::new(p);
        let first = positioner.update(Some(target), Some(element));
        prop_assert_eq!(positioner.update(None, Some(element)), first);
        prop_assert_eq!(positioner.update(Some(target), None), first);
        prop_assert_eq!(positioner.update(None, None), first);
    }
}
