//! Selection synchronization between URL query, local storage and the
//! dropdowns, modelled as an explicit state machine instead of boolean
//! latches.

use crate::problems::{self, ProblemSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Problem data not loaded yet; nothing to synchronize.
    Uninitialized,
    /// Selection came from `?year=..&problem=..`. Treated as an explicit user
    /// action, so it is persisted like one.
    RestoringFromQuery,
    /// Selection came from the last-saved `pt-selected` entry.
    RestoringFromStorage,
    /// The user has touched a control; every change is persisted from here on.
    Interactive,
}

impl SyncPhase {
    /// Persist the current selection as "last selected"? Storage restores must
    /// not overwrite what they just read.
    pub fn should_persist(self) -> bool {
        matches!(self, SyncPhase::RestoringFromQuery | SyncPhase::Interactive)
    }

    /// While restoring, the clamp-to-year effect must not fire and stomp a
    /// selection that is still being applied.
    pub fn is_restoring(self) -> bool {
        matches!(
            self,
            SyncPhase::RestoringFromQuery | SyncPhase::RestoringFromStorage
        )
    }
}

/// Initial `(year, problem_id, phase)` once the problem list is available.
/// Priority: query parameters, then the stored selection, then defaults. The
/// result is always clamped onto the set.
pub fn initial_selection(
    set: &ProblemSet,
    query: Option<(String, String)>,
    stored: Option<(String, String)>,
) -> Option<(String, String, SyncPhase)> {
    if let Some((year, problem_id)) = query {
        let (year, problem_id) = problems::clamp_to_set(set, &year, &problem_id)?;
        return Some((year, problem_id, SyncPhase::RestoringFromQuery));
    }
    if let Some((year, problem_id)) = stored {
        if set.contains_key(&year) {
            let (year, problem_id) = problems::clamp_to_set(set, &year, &problem_id)?;
            return Some((year, problem_id, SyncPhase::RestoringFromStorage));
        }
    }
    let (year, problem_id) = problems::default_selection(set)?;
    Some((year, problem_id, SyncPhase::Uninitialized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::PutnamProblem;

    fn sample() -> ProblemSet {
        let mut set = ProblemSet::new();
        for (year, ids) in [("2023", vec!["A1", "B6"]), ("2024", vec!["A1", "A2"])] {
            set.insert(
                year.to_owned(),
                ids.into_iter()
                    .map(|q| PutnamProblem {
                        problem: String::new(),
                        question: q.to_owned(),
                    })
                    .collect(),
            );
        }
        set
    }

    #[test]
    fn query_wins_over_storage() {
        let got = initial_selection(
            &sample(),
            Some(("2023".into(), "B6".into())),
            Some(("2024".into(), "A2".into())),
        );
        assert_eq!(
            got,
            Some(("2023".into(), "B6".into(), SyncPhase::RestoringFromQuery))
        );
    }

    #[test]
    fn storage_used_when_no_query() {
        let got = initial_selection(&sample(), None, Some(("2024".into(), "A2".into())));
        assert_eq!(
            got,
            Some(("2024".into(), "A2".into(), SyncPhase::RestoringFromStorage))
        );
    }

    #[test]
    fn stored_year_missing_from_set_means_defaults() {
        let got = initial_selection(&sample(), None, Some(("1999".into(), "A1".into())));
        assert_eq!(
            got,
            Some(("2024".into(), "A1".into(), SyncPhase::Uninitialized))
        );
    }

    #[test]
    fn stored_problem_missing_snaps_to_first_of_year() {
        let got = initial_selection(&sample(), None, Some(("2024".into(), "B6".into())));
        assert_eq!(
            got,
            Some(("2024".into(), "A1".into(), SyncPhase::RestoringFromStorage))
        );
    }

    #[test]
    fn no_sources_means_defaults() {
        let got = initial_selection(&sample(), None, None);
        assert_eq!(
            got,
            Some(("2024".into(), "A1".into(), SyncPhase::Uninitialized))
        );
    }

    #[test]
    fn query_selection_is_persisted_but_storage_restore_is_not() {
        assert!(SyncPhase::RestoringFromQuery.should_persist());
        assert!(SyncPhase::Interactive.should_persist());
        assert!(!SyncPhase::RestoringFromStorage.should_persist());
        assert!(!SyncPhase::Uninitialized.should_persist());
    }

    #[test]
    fn restore_phases_suppress_clamping() {
        assert!(SyncPhase::RestoringFromQuery.is_restoring());
        assert!(SyncPhase::RestoringFromStorage.is_restoring());
        assert!(!SyncPhase::Interactive.is_restoring());
    }
}
