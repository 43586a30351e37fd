use std::fmt::Display;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// TSP algorithm selector. The wire identifiers are `"MST"` and
/// `"genetic"`.
#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    /// Prim's minimum spanning tree walked in preorder. Fast, and a
    /// 2-approximation on metric instances.
    #[serde(rename = "MST")]
    Mst,

    /// Genetic search over closed tours. Slower, closer to optimum.
    #[serde(rename = "genetic")]
    Genetic,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Algorithm::Mst => "MST",
                Algorithm::Genetic => "genetic",
            }
        )
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown algorithm {0:?}, expected \"MST\" or \"genetic\"")]
pub struct UnknownAlgorithm(String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mst" => Ok(Algorithm::Mst),
            "genetic" => Ok(Algorithm::Genetic),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_identifiers() {
        assert_eq!(serde_json::to_string(&Algorithm::Mst).unwrap(), "\"MST\"");
        assert_eq!(
            serde_json::to_string(&Algorithm::Genetic).unwrap(),
            "\"genetic\""
        );

        let parsed: Algorithm = serde_json::from_str("\"MST\"").unwrap();
        assert_eq!(parsed, Algorithm::Mst);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("mst".parse::<Algorithm>().unwrap(), Algorithm::Mst);
        assert_eq!("MST".parse::<Algorithm>().unwrap(), Algorithm::Mst);
        assert_eq!("genetic".parse::<Algorithm>().unwrap(), Algorithm::Genetic);
        assert!("dijkstra".parse::<Algorithm>().is_err());
    }
}
