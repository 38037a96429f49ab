//! Stay window - a half-open date interval `[check_in, check_out)`
//!
//! The check-out date itself is excluded, so a booking ending on a given
//! day and another starting on that same day do not conflict.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open date interval of a stay: `[check_in, check_out)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayWindow {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayWindow {
    /// Create a new window. No ordering is enforced here; a degenerate
    /// window (`check_out <= check_in`) never overlaps anything and
    /// reports zero or negative nights.
    #[inline]
    pub const fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Whole-day length of the stay. May be zero or negative for a
    /// degenerate window; callers validate ordering separately.
    #[inline]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// True when `check_out` is strictly after `check_in`.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.check_out > self.check_in
    }

    /// Half-open overlap predicate: `[a, b)` and `[c, d)` intersect iff
    /// `a < d && c < b`. Touching endpoints (one window ending exactly
    /// when the other begins) are not an overlap. A degenerate window is
    /// empty and never overlaps anything, so the check is safe to run
    /// before ordering has been validated.
    #[inline]
    pub fn overlaps(&self, other: &StayWindow) -> bool {
        self.is_ordered()
            && other.is_ordered()
            && self.check_in < other.check_out
            && other.check_in < self.check_out
    }
}

impl fmt::Display for StayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn w(check_in: &str, check_out: &str) -> StayWindow {
        StayWindow::new(d(check_in), d(check_out))
    }

    #[test]
    fn test_nights() {
        assert_eq!(w("2024-06-01", "2024-06-05").nights(), 4);
        assert_eq!(w("2024-06-01", "2024-06-02").nights(), 1);
        assert_eq!(w("2024-06-01", "2024-06-01").nights(), 0);
        assert_eq!(w("2024-06-05", "2024-06-01").nights(), -4);
    }

    #[test]
    fn test_is_ordered() {
        assert!(w("2024-06-01", "2024-06-02").is_ordered());
        assert!(!w("2024-06-01", "2024-06-01").is_ordered());
        assert!(!w("2024-06-02", "2024-06-01").is_ordered());
    }

    #[test]
    fn test_overlap_of_intersecting_windows() {
        let a = w("2024-06-01", "2024-06-05");
        let b = w("2024-06-04", "2024-06-07");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_contained_window_overlaps() {
        let outer = w("2024-06-01", "2024-06-10");
        let inner = w("2024-06-03", "2024-06-05");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        let a = w("2024-06-01", "2024-06-05");
        let b = w("2024-06-05", "2024-06-08");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_windows_do_not_overlap() {
        let a = w("2024-06-01", "2024-06-03");
        let b = w("2024-06-10", "2024-06-12");
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_degenerate_window_never_overlaps() {
        let empty = w("2024-06-03", "2024-06-03");
        let inverted = w("2024-06-07", "2024-06-02");
        let busy = w("2024-06-01", "2024-06-10");
        assert!(!empty.overlaps(&busy));
        assert!(!busy.overlaps(&empty));
        assert!(!inverted.overlaps(&busy));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            w("2024-06-01", "2024-06-05").to_string(),
            "[2024-06-01, 2024-06-05)"
        );
    }
}
