use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Core types for the kinship analyzer

/// Fixed separator character of the delimited identifier form.
pub const SEPARATOR: char = '-';

/// Ordered generation indices encoding one person's position in the
/// lineage tree: index 0 is the root-most ancestor, the last element
/// is the person's own birth order among their siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationPath(Vec<u32>);

impl GenerationPath {
    pub fn new(indices: Vec<u32>) -> Self {
        Self(indices)
    }

    /// Generation depth: 1 means a direct child of the founder.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Birth order among siblings (last element), if the path is non-empty.
    pub fn last(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// Longest shared prefix with another path, compared element-wise
    /// from index 0. Only positional equality is applied.
    pub fn common_prefix(&self, other: &GenerationPath) -> GenerationPath {
        let matched = self
            .0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count();
        GenerationPath(self.0[..matched].to_vec())
    }
}

impl fmt::Display for GenerationPath {
    /// Canonical delimited form: indices joined with the separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.0 {
            if !first {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", index)?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of the lowest-common-ancestor computation.
///
/// A zero-length match is reported as `Disjoint` when both inputs were
/// non-empty, and as `EmptyInput` when either path was empty, so "no
/// shared ancestor" is never conflated with "compared empty paths".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommonAncestor {
    /// Non-empty prefix shared by both paths
    Shared(GenerationPath),
    /// Both paths are non-empty but diverge at the root
    Disjoint,
    /// At least one input parsed to the empty path
    EmptyInput,
}

impl CommonAncestor {
    /// Matched-prefix length; 0 unless a shared prefix exists.
    pub fn depth(&self) -> usize {
        match self {
            CommonAncestor::Shared(path) => path.depth(),
            _ => 0,
        }
    }

    /// The shared prefix, when one exists.
    pub fn path(&self) -> Option<&GenerationPath> {
        match self {
            CommonAncestor::Shared(path) => Some(path),
            _ => None,
        }
    }
}

/// Kinship classification between two individuals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    /// Identical generation paths
    Same,
    /// Ancestor/descendant relationship, not cousins
    DirectLine { generations: usize },
    /// Nth cousins, possibly removed
    Cousin { level: usize, removal: usize },
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relationship::Same => write!(f, "Same person"),
            Relationship::DirectLine { generations } => {
                write!(f, "Direct line ({} generations apart)", generations)
            }
            Relationship::Cousin { level, removal } => {
                write!(f, "{} cousin", crate::lineage::algebra::ordinal(*level))?;
                match removal {
                    0 => Ok(()),
                    1 => write!(f, " once removed"),
                    n => write!(f, " {} times removed", n),
                }
            }
        }
    }
}

/// Full result record for one analyzed identifier pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinshipReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub id1: String,
    pub id2: String,
    pub depth1: usize,
    pub depth2: usize,
    /// Canonical form of the shared ancestor path, when one exists
    pub common_ancestor: Option<String>,
    /// Tree distance through the nearest shared ancestor
    pub distance: usize,
    pub relationship: Relationship,
}

impl KinshipReport {
    /// Whether the two individuals share any ancestor in the tree
    pub fn is_related(&self) -> bool {
        self.common_ancestor.is_some()
    }

    /// Human-readable classification label
    pub fn classification(&self) -> String {
        self.relationship.to_string()
    }
}
