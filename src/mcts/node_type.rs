use crate::mcts::error::MctsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scoring variant used by a search tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Upper Confidence Bound for Trees
    #[default]
    Uct,
    /// All-Moves-As-First
    Amaf,
    /// Rapid Action Value Estimation
    Rave,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Uct => write!(f, "UCT"),
            NodeType::Amaf => write!(f, "AMAF"),
            NodeType::Rave => write!(f, "RAVE"),
        }
    }
}

impl FromStr for NodeType {
    type Err = MctsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uct" => Ok(NodeType::Uct),
            "amaf" => Ok(NodeType::Amaf),
            "rave" => Ok(NodeType::Rave),
            other => Err(MctsError::InvalidConfig(format!(
                "unknown node type '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("uct".parse::<NodeType>().unwrap(), NodeType::Uct);
        assert_eq!("AMAF".parse::<NodeType>().unwrap(), NodeType::Amaf);
        assert_eq!("Rave".parse::<NodeType>().unwrap(), NodeType::Rave);
        assert!("alphazero".parse::<NodeType>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for node_type in [NodeType::Uct, NodeType::Amaf, NodeType::Rave] {
            assert_eq!(node_type.to_string().parse::<NodeType>().unwrap(), node_type);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        assert_eq!(serde_json::to_string(&NodeType::Rave).unwrap(), "\"rave\"");
        let parsed: NodeType = serde_json::from_str("\"amaf\"").unwrap();
        assert_eq!(parsed, NodeType::Amaf);
    }
}
