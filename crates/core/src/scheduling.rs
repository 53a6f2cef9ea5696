//! Scheduling priority constants and dispatch ordering.
//!
//! A job's priority is an opaque hint to the downstream scheduler; these
//! are the conventional values used by the dispatch tooling, plus the
//! comparator the job list uses to order its emitted records.

use std::cmp::Ordering;

/// Priority value for urgent jobs. Dispatched before all others.
pub const PRIORITY_URGENT: i32 = 10;

/// Priority value for normal jobs. Default.
pub const PRIORITY_NORMAL: i32 = 0;

/// Priority value for background jobs. Dispatched last.
pub const PRIORITY_BACKGROUND: i32 = -10;

/// Compare two priorities in dispatch order: higher priority first.
///
/// Intended for stable sorts, so jobs with equal priority keep their
/// insertion order.
pub fn cmp_dispatch(a: i32, b: i32) -> Ordering {
    b.cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgent_dispatches_before_normal() {
        assert_eq!(cmp_dispatch(PRIORITY_URGENT, PRIORITY_NORMAL), Ordering::Less);
    }

    #[test]
    fn background_dispatches_after_normal() {
        assert_eq!(
            cmp_dispatch(PRIORITY_BACKGROUND, PRIORITY_NORMAL),
            Ordering::Greater
        );
    }

    #[test]
    fn equal_priorities_compare_equal() {
        assert_eq!(cmp_dispatch(3, 3), Ordering::Equal);
    }
}
