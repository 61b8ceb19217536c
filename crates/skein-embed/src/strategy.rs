//! Closed set of embedding strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The embedding strategies offered by the toolkit.
///
/// Drivers dispatch on this enum with an exhaustive match instead of passing
/// algorithm entry points around, so adding a strategy is a compile-time
/// visible change at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingAlgorithm {
    /// Randomized Steiner-tree heuristic on arbitrary hardware.
    Cmr,
    /// Iterative-compression OCT followed by virtual-hardware placement.
    OctExact,
    /// Greedy 2-peel OCT approximation.
    OctFast,
    /// Fast approximation feeding the exact minimizer.
    OctHybrid,
    /// Diagonal clique embedding.
    Triad,
    /// Duplicated-shore clique embedding.
    Klymko,
}

impl EmbeddingAlgorithm {
    /// All strategies, for help texts and exhaustive sweeps.
    pub const ALL: [EmbeddingAlgorithm; 6] = [
        EmbeddingAlgorithm::Cmr,
        EmbeddingAlgorithm::OctExact,
        EmbeddingAlgorithm::OctFast,
        EmbeddingAlgorithm::OctHybrid,
        EmbeddingAlgorithm::Triad,
        EmbeddingAlgorithm::Klymko,
    ];

    /// Canonical kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            EmbeddingAlgorithm::Cmr => "cmr",
            EmbeddingAlgorithm::OctExact => "oct-exact",
            EmbeddingAlgorithm::OctFast => "oct-fast",
            EmbeddingAlgorithm::OctHybrid => "oct-hybrid",
            EmbeddingAlgorithm::Triad => "triad",
            EmbeddingAlgorithm::Klymko => "klymko",
        }
    }
}

impl fmt::Display for EmbeddingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognized strategy names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown embedding algorithm '{}'", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for EmbeddingAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmbeddingAlgorithm::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}
