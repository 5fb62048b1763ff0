//! Weighted keyword scoring.
//!
//! Every agent owns a list of high-weight and medium-weight phrases. A phrase
//! counts when it appears anywhere in the lowercased query (plain substring,
//! no word boundaries). The agent with the strictly highest total wins.

use serde::Serialize;

use super::agent::Agent;

/// Score added per high-weight phrase found.
pub const HIGH_WEIGHT: f32 = 1.0;
/// Score added per medium-weight phrase found.
pub const MEDIUM_WEIGHT: f32 = 0.5;
/// Score at which confidence saturates to 1.0.
const CONFIDENCE_SCALE: f32 = 3.0;

/// Phrase lists for one agent.
pub struct KeywordSet {
    pub agent: Agent,
    pub high: &'static [&'static str],
    pub medium: &'static [&'static str],
}

/// Keyword table in agent declaration order.
pub const KEYWORD_TABLE: &[KeywordSet] = &[
    KeywordSet {
        agent: Agent::Profile,
        // "about yourself" also contains "about you" and scores both.
        high: &[
            "about yourself",
            "about you",
            "who are you",
            "your background",
            "introduce yourself",
            "your education",
        ],
        medium: &[
            "background",
            "education",
            "degree",
            "university",
            "strengths",
            "personality",
        ],
    },
    KeywordSet {
        agent: Agent::Project,
        high: &[
            "project",
            "github",
            "what have you built",
            "portfolio piece",
            "case study",
        ],
        medium: &[
            "built",
            "implementation",
            "architecture",
            "code",
            "tech stack",
            "technical",
        ],
    },
    KeywordSet {
        agent: Agent::Career,
        high: &[
            "career advice",
            "career path",
            "interview tips",
            "job search",
            "mentorship",
        ],
        medium: &[
            "career",
            "interview",
            "advice",
            "resume",
            "networking",
            "growth",
        ],
    },
    KeywordSet {
        agent: Agent::Demo,
        high: &["live demo", "demo", "walkthrough", "walk me through", "try it"],
        medium: &["interactive", "show me", "live", "playground", "deployed"],
    },
    KeywordSet {
        agent: Agent::StrategicFit,
        high: &[
            "job description",
            "strategic fit",
            "fit analysis",
            "good fit",
            "hiring",
            "job posting",
        ],
        medium: &[
            "requirements",
            "position",
            "role",
            "match",
            "qualifications",
            "candidate",
            "analyze",
        ],
    },
];

/// Outcome of scoring one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordMatch {
    /// Best agent, or the first declared agent when nothing matched.
    pub agent: Agent,
    /// `min(score / 3.0, 1.0)`
    pub confidence: f32,
    /// Raw score of the winning agent.
    pub score: f32,
    /// Raw score per agent, in declaration order.
    pub scores: Vec<(Agent, f32)>,
    /// Phrases that contributed to the winning agent's score.
    pub matched: Vec<&'static str>,
}

impl KeywordMatch {
    /// Normalised keyword evidence for an arbitrary agent.
    pub fn confidence_for(&self, agent: Agent) -> f32 {
        self.scores
            .iter()
            .find(|(candidate, _)| *candidate == agent)
            .map(|(_, score)| normalize(*score))
            .unwrap_or(0.0)
    }
}

fn normalize(score: f32) -> f32 {
    (score / CONFIDENCE_SCALE).min(1.0)
}

/// Scores queries against a static keyword table.
pub struct KeywordMatcher {
    table: &'static [KeywordSet],
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordMatcher {
    pub fn new() -> Self {
        Self {
            table: KEYWORD_TABLE,
        }
    }

    /// Scores the whole of `query`. Callers decide how much of the query to pass in.
    pub fn score(&self, query: &str) -> KeywordMatch {
        let text = query.to_lowercase();

        let mut scores = Vec::with_capacity(self.table.len());
        let mut best: Option<(Agent, f32, Vec<&'static str>)> = None;

        for set in self.table {
            let mut score = 0.0;
            let mut matched = Vec::new();

            for phrase in set.high {
                if text.contains(phrase) {
                    score += HIGH_WEIGHT;
                    matched.push(*phrase);
                }
            }
            for phrase in set.medium {
                if text.contains(phrase) {
                    score += MEDIUM_WEIGHT;
                    matched.push(*phrase);
                }
            }

            scores.push((set.agent, score));

            // Strictly greater: the earlier agent keeps ties.
            let is_better = match &best {
                Some((_, best_score, _)) => score > *best_score,
                None => score > 0.0,
            };
            if is_better {
                best = Some((set.agent, score, matched));
            }
        }

        let (agent, score, matched) = best.unwrap_or_else(|| {
            let first = self.table.first().map(|set| set.agent).unwrap_or(Agent::Profile);
            (first, 0.0, Vec::new())
        });

        KeywordMatch {
            agent,
            confidence: normalize(score),
            score,
            scores,
            matched,
        }
    }
}
