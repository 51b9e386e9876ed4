//! In-place collection reconciliation
//!
//! Brings a collection to a target sequence while keeping the longest
//! matching prefix in place, so observers see a single change and a list
//! that already matches is never rebuilt.

/// What a reconciliation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub removed: usize,
    pub appended: usize,
}

impl ReconcileOutcome {
    pub fn changed(&self) -> bool {
        self.removed > 0 || self.appended > 0
    }
}

/// Mutate `current` so it equals `target`
///
/// Walks both sequences while **both** still have an element at `i`: equal
/// elements are kept, a mismatching element of `current` is removed in place.
/// Any surplus tail is then dropped and the rest of `target` appended.
pub fn reconcile<T, F>(current: &mut Vec<T>, target: &[T], eq: F) -> ReconcileOutcome
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let mut outcome = ReconcileOutcome::default();
    let mut i = 0;

    while i < current.len() && i < target.len() {
        if eq(&current[i], &target[i]) {
            i += 1;
        } else {
            current.remove(i);
            outcome.removed += 1;
        }
    }

    while current.len() > target.len() {
        current.pop();
        outcome.removed += 1;
    }

    while i < target.len() {
        current.push(target[i].clone());
        outcome.appended += 1;
        i += 1;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(current: &[&str], target: &[&str]) -> (Vec<String>, ReconcileOutcome) {
        let mut c: Vec<String> = current.iter().map(|s| s.to_string()).collect();
        let t: Vec<String> = target.iter().map(|s| s.to_string()).collect();
        let outcome = reconcile(&mut c, &t, |a, b| a == b);
        (c, outcome)
    }

    #[test]
    fn test_keeps_prefix_and_replaces_tail() {
        let (result, outcome) = run(&["Homura", "Madoka"], &["Homura", "Sayaka"]);
        assert_eq!(result, vec!["Homura", "Sayaka"]);
        assert_eq!(outcome, ReconcileOutcome { removed: 1, appended: 1 });
    }

    #[test]
    fn test_equal_sequences_untouched() {
        let (result, outcome) = run(&["a", "b"], &["a", "b"]);
        assert_eq!(result, vec!["a", "b"]);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_mismatch_removes_in_place_before_comparing_again() {
        // "x" is dropped and "b" then lines up with target[1]
        let (result, outcome) = run(&["a", "x", "b"], &["a", "b"]);
        assert_eq!(result, vec!["a", "b"]);
        assert_eq!(outcome, ReconcileOutcome { removed: 1, appended: 0 });
    }
}
