//! Drill ordering.

use std::cmp::Ordering;

use roadmapsync_discovery::natural_cmp;
use roadmapsync_shared::DrillEntry;

/// Total order over drills: numbered files first by number, then everything
/// by natural path order.
pub fn compare_drills(a: &DrillEntry, b: &DrillEntry) -> Ordering {
    let by_order = match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_order.then_with(|| natural_cmp(&a.relative_path, &b.relative_path))
}

/// Sort drills in place with [`compare_drills`].
pub fn rank_drills(drills: &mut [DrillEntry]) {
    drills.sort_by(compare_drills);
}
