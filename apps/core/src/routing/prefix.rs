//! Lead-in phrase detection for job-fit analysis requests.
//!
//! A pasted job description drags in a lot of generic technical vocabulary
//! that would dilute keyword scoring. A known lead-in short-circuits routing.

use super::agent::Agent;

/// Lead-in phrases, most specific first. Matched with `starts_with`.
pub const JOB_ANALYSIS_PREFIXES: &[&str] = &[
    "analyze this job description for strategic fit",
    "please analyze this job description",
    "analyze this job description",
    "analyze the following job description",
    "analyze this job posting",
    "here is a job description",
    "evaluate my fit for this role",
    "evaluate the fit for this role",
    "strategic fit analysis",
    "job description:",
];

/// Maps a recognised lead-in to its fixed agent.
pub struct PrefixMatcher {
    prefixes: &'static [&'static str],
    target: Agent,
}

impl Default for PrefixMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixMatcher {
    pub fn new() -> Self {
        Self {
            prefixes: JOB_ANALYSIS_PREFIXES,
            target: Agent::StrategicFit,
        }
    }

    /// Returns the target agent and the lead-in that matched, if any.
    pub fn match_prefix(&self, query: &str) -> Option<(Agent, &'static str)> {
        let normalized = query.trim().to_lowercase();
        self.prefixes
            .iter()
            .copied()
            .find(|prefix| normalized.starts_with(prefix))
            .map(|prefix| (self.target, prefix))
    }
}
