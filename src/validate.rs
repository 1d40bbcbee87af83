//! Membership filtering of parsed contradictions.
//!
//! A backend-reported contradiction survives only if both its subject and
//! object are identifiers of the artifact set, compared as exact strings.
//! Synthetic contradictions are produced by the pipeline itself and always
//! survive.

use tracing::warn;

use crate::artifact::ArtifactSet;
use crate::types::{AnalysisResult, Contradiction};

/// Candidates split by set membership, relative order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub kept: Vec<Contradiction>,
    pub discarded: Vec<Contradiction>,
}

impl FilterOutcome {
    /// Some candidates referenced files outside the set.
    pub fn is_partially_invalid(&self) -> bool {
        !self.discarded.is_empty()
    }

    /// Candidates existed but none referenced the set.
    pub fn is_fully_masked(&self) -> bool {
        self.kept.is_empty() && !self.discarded.is_empty()
    }

    /// The kept candidates as a result; masked outcomes become `Empty`.
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult::from_vec(self.kept)
    }
}

fn is_member(candidate: &Contradiction, artifacts: &ArtifactSet) -> bool {
    candidate.is_synthetic()
        || (artifacts.contains(&candidate.subject) && artifacts.contains(&candidate.object))
}

/// Split `candidates` into members and non-members of `artifacts`.
pub fn partition(candidates: Vec<Contradiction>, artifacts: &ArtifactSet) -> FilterOutcome {
    let (kept, discarded): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|c| is_member(c, artifacts));

    for c in &discarded {
        warn!(
            subject = %c.subject,
            object = %c.object,
            description = %c.description,
            "discarding contradiction that references a file outside the input set"
        );
    }

    FilterOutcome { kept, discarded }
}

/// Keep only candidates whose files are all in `artifacts`.
pub fn filter(candidates: Vec<Contradiction>, artifacts: &ArtifactSet) -> AnalysisResult {
    partition(candidates, artifacts).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Artifact;

    fn set_of(ids: &[&str]) -> ArtifactSet {
        ArtifactSet::new(ids.iter().map(|id| Artifact::new(*id, "")).collect()).unwrap()
    }

    #[test]
    fn test_drops_outside_identifiers() {
        let set = set_of(&["a.go", "b.md"]);
        let candidates = vec![
            Contradiction::new("a.go", "b.md", "one"),
            Contradiction::new("a.go", "c.txt", "two"),
            Contradiction::new("./a.go", "b.md", "three"),
            Contradiction::new("b.md", "a.go", "four"),
        ];

        let outcome = partition(candidates, &set);
        let kept: Vec<_> = outcome.kept.iter().map(|c| c.description.as_str()).collect();
        let dropped: Vec<_> = outcome.discarded.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(kept, vec!["one", "four"]);
        assert_eq!(dropped, vec!["two", "three"]);
        assert!(outcome.is_partially_invalid());
        assert!(!outcome.is_fully_masked());
    }

    #[test]
    fn test_self_pair_passes_membership() {
        let set = set_of(&["a.go", "b.md"]);
        let result = filter(vec![Contradiction::new("a.go", "a.go", "self")], &set);
        assert_eq!(result.contradictions().len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let set = set_of(&["a.go", "b.md", "c.txt"]);
        let candidates = vec![
            Contradiction::new("a.go", "b.md", "one"),
            Contradiction::new("c.txt", "a.go", "two"),
        ];

        let once = filter(candidates.clone(), &set);
        assert_eq!(once, AnalysisResult::NonEmpty(candidates));
        let twice = filter(once.clone().into_contradictions(), &set);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_all_discarded_is_empty() {
        let set = set_of(&["a.go", "b.md"]);
        let outcome = partition(vec![Contradiction::new("x.go", "y.md", "elsewhere")], &set);
        assert!(outcome.is_fully_masked());
        assert_eq!(outcome.into_result(), AnalysisResult::Empty);
    }

    #[test]
    fn test_synthetic_survives() {
        let set = set_of(&["a.go", "b.md"]);
        let result = filter(vec![Contradiction::synthetic(&set, "failed")], &set);
        assert_eq!(result.contradictions()[0].subject, "a.go,b.md");
    }
}
