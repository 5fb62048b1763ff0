//! The closed set of response agents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A specialised response handler a query can be routed to.
///
/// Declaration order matters: it is the iteration order of the keyword table
/// and therefore the tie-break order when two agents score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agent {
    /// Background, education, "about me"
    Profile,
    /// Projects and technical implementations
    Project,
    /// Career advice and professional development
    Career,
    /// Live demos and walkthroughs
    Demo,
    /// Job description analysis and fit assessment
    StrategicFit,
}

impl Agent {
    /// All agents in declaration order.
    pub const ALL: [Agent; 5] = [
        Agent::Profile,
        Agent::Project,
        Agent::Career,
        Agent::Demo,
        Agent::StrategicFit,
    ];

    /// Wire label, as emitted by the routing model.
    pub fn label(&self) -> &'static str {
        match self {
            Agent::Profile => "profile",
            Agent::Project => "project",
            Agent::Career => "career",
            Agent::Demo => "demo",
            Agent::StrategicFit => "strategic_fit",
        }
    }

    /// Human-readable name reported back to the frontend as `agent_used`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Agent::Profile => "Profile Agent",
            Agent::Project => "Project Agent",
            Agent::Career => "Career Agent",
            Agent::Demo => "Demo Agent",
            Agent::StrategicFit => "Strategic Fit Agent",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A label that is not one of the known agents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown agent label: {0:?}")]
pub struct UnknownAgent(pub String);

impl FromStr for Agent {
    type Err = UnknownAgent;

    /// Case-insensitive after trimming surrounding whitespace. Nothing else is tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Agent::ALL
            .into_iter()
            .find(|agent| agent.label() == normalized)
            .ok_or_else(|| UnknownAgent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for agent in Agent::ALL {
            assert_eq!(agent.label().parse::<Agent>(), Ok(agent));
        }
    }

    #[test]
    fn test_parse_is_case_and_whitespace_insensitive() {
        assert_eq!(" Strategic_Fit\n".parse::<Agent>(), Ok(Agent::StrategicFit));
        assert_eq!("PROFILE".parse::<Agent>(), Ok(Agent::Profile));
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        assert!("recruiter".parse::<Agent>().is_err());
        assert!("profile agent".parse::<Agent>().is_err());
        assert!("".parse::<Agent>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_labels() {
        let json = serde_json::to_string(&Agent::StrategicFit).unwrap();
        assert_eq!(json, "\"strategic_fit\"");
    }
}
