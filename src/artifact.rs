//! Input artifacts compared for contradictions.
//!
//! An artifact is one text unit (an implementation file, a document, ...)
//! identified by the path or name the caller supplied. Identifiers are kept
//! exactly as given: no canonicalization, no trimming.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Minimum number of artifacts a comparison needs.
pub const MIN_ARTIFACTS: usize = 2;

/// Errors raised while assembling an artifact set.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("at least 2 files are required to compare, got {0}")]
    TooFew(usize),
    #[error("file '{0}' was supplied more than once")]
    DuplicateIdentifier(String),
    #[error("file '{0}' not found")]
    NotFound(String),
    #[error("failed to read file '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One input text unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    identifier: String,
    content: String,
}

impl Artifact {
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }

    /// Read an artifact from disk, keeping `path` verbatim as its identifier.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let identifier = path.to_string_lossy().to_string();

        // Directories and missing paths are both "not found" to the caller
        if !path.is_file() {
            return Err(ArtifactError::NotFound(identifier));
        }

        let content = fs::read_to_string(path).map_err(|source| ArtifactError::Unreadable {
            path: identifier.clone(),
            source,
        })?;

        Ok(Self::new(identifier, content))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered, immutable collection of artifacts with unique identifiers.
///
/// Supply order is preserved; the rule-based backend and prompt rendering
/// both depend on it.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    /// Build a set, rejecting fewer than two artifacts or repeated identifiers.
    pub fn new(artifacts: Vec<Artifact>) -> Result<Self, ArtifactError> {
        if artifacts.len() < MIN_ARTIFACTS {
            return Err(ArtifactError::TooFew(artifacts.len()));
        }

        let mut seen = HashSet::new();
        for artifact in &artifacts {
            if !seen.insert(artifact.identifier.as_str()) {
                return Err(ArtifactError::DuplicateIdentifier(
                    artifact.identifier.clone(),
                ));
            }
        }

        Ok(Self { artifacts })
    }

    /// Read every path from disk, stopping at the first unreadable one.
    pub fn read_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ArtifactError> {
        if paths.len() < MIN_ARTIFACTS {
            return Err(ArtifactError::TooFew(paths.len()));
        }

        let artifacts = paths
            .iter()
            .map(Artifact::read)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(artifacts)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Artifact> {
        self.artifacts.get(index)
    }

    /// Identifiers in supply order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.identifier.as_str())
    }

    /// Exact-match membership test.
    pub fn contains(&self, identifier: &str) -> bool {
        self.artifacts.iter().any(|a| a.identifier == identifier)
    }

    /// All identifiers joined with `,`, used as the sentinel subject of
    /// synthetic contradictions.
    pub fn joined_identifiers(&self) -> String {
        self.identifiers().collect::<Vec<_>>().join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set_of(ids: &[&str]) -> Result<ArtifactSet, ArtifactError> {
        ArtifactSet::new(ids.iter().map(|id| Artifact::new(*id, "")).collect())
    }

    #[test]
    fn test_rejects_single_artifact() {
        let err = set_of(&["a.go"]).unwrap_err();
        assert!(matches!(err, ArtifactError::TooFew(1)));
    }

    #[test]
    fn test_rejects_duplicate_identifier() {
        let err = set_of(&["a.go", "b.md", "a.go"]).unwrap_err();
        assert!(matches!(err, ArtifactError::DuplicateIdentifier(ref id) if id == "a.go"));
    }

    #[test]
    fn test_preserves_order_and_membership() {
        let set = set_of(&["z.md", "a.go", "m.txt"]).unwrap();
        let ids: Vec<_> = set.identifiers().collect();
        assert_eq!(ids, vec!["z.md", "a.go", "m.txt"]);
        assert!(set.contains("a.go"));
        assert!(!set.contains("./a.go"));
        assert_eq!(set.joined_identifiers(), "z.md,a.go,m.txt");
    }

    #[test]
    fn test_read_paths() {
        let temp = TempDir::new().unwrap();
        let code = temp.path().join("calc.js");
        let doc = temp.path().join("calc.md");
        std::fs::write(&code, "function add(a, b) {}").unwrap();
        std::fs::write(&doc, "# add").unwrap();

        let set = ArtifactSet::read_paths(&[&code, &doc]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().content(), "# add");
        assert_eq!(set.get(0).unwrap().identifier(), code.to_string_lossy().as_ref());
    }

    #[test]
    fn test_read_missing_path() {
        let temp = TempDir::new().unwrap();
        let code = temp.path().join("calc.js");
        std::fs::write(&code, "").unwrap();
        let missing = temp.path().join("missing.md");

        let err = ArtifactSet::read_paths(&[&code, &missing]).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn test_read_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let code = temp.path().join("calc.js");
        std::fs::write(&code, "").unwrap();

        let err = ArtifactSet::read_paths(&[code.as_path(), temp.path()]).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }
}
