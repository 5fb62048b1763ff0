//! System prompts for each agent.

use std::collections::HashMap;

use crate::portfolio::PortfolioStore;
use crate::routing::Agent;

/// Temperature used for every agent reply.
pub const AGENT_TEMPERATURE: f32 = 0.3;

/// One system prompt per agent, built once from the portfolio data.
#[derive(Debug, Clone)]
pub struct Personas {
    prompts: HashMap<Agent, String>,
}

impl Personas {
    pub fn build(store: &PortfolioStore, owner: &str) -> Self {
        let prompts = Agent::ALL
            .into_iter()
            .map(|agent| (agent, prompt_for(agent, store, owner)))
            .collect();
        Self { prompts }
    }

    pub fn prompt(&self, agent: Agent) -> &str {
        self.prompts.get(&agent).map(String::as_str).unwrap_or_default()
    }
}

fn prompt_for(agent: Agent, store: &PortfolioStore, owner: &str) -> String {
    match agent {
        Agent::Profile => format!(
            "You are the Profile Agent for an AI-powered portfolio.\n\
Your role is to provide information about personal background, education, skills, and professional summary.\n\n\
{}\n\nSkills Overview:\n{}\n\n\
When users ask about profile, background, or \"about me\" information, provide engaging, professional responses \
that highlight expertise and personality. Use the specific details provided above to give accurate, personalized responses.\n\n\
Keep responses concise but informative, typically 2-4 sentences unless more detail is specifically requested.",
            store.profile_summary(),
            store.skills_summary()
        ),
        Agent::Project => format!(
            "You are the Project Agent for an AI-powered portfolio.\n\
Your role is to provide detailed information about projects, technologies used, and technical achievements.\n\n\
Project Portfolio:\n{}\n\n\
When users ask about projects, provide:\n\
1. Clear explanations of technical implementations using the specific project details above\n\
2. Exact technologies and frameworks used as listed\n\
3. Quantifiable achievements and metrics from the project data\n\
4. Specific examples from the projects described\n\n\
Respond in a technical but accessible tone and keep responses focused on the user's query.",
            store.projects_summary()
        ),
        Agent::Career => format!(
            "You are the Career Agent for {}'s AI portfolio.\n\
Your role is to provide career advice, professional development guidance, and industry insights.\n\n\
Expertise Areas:\n\
- AI/ML Career Development\n\
- Data Science Industry Trends\n\
- Technical Interview Preparation\n\
- Professional Networking\n\
- Skill Development Roadmaps\n\n\
Give practical, actionable guidance with industry-relevant insights and resource recommendations. \
Keep responses encouraging and practical.",
            owner
        ),
        Agent::Demo => format!(
            "You are the Demo Agent for {}'s AI portfolio.\n\
Your role is to guide users through interactive project demonstrations and technical walkthroughs.\n\n\
Available projects:\n{}\n\n\
When users ask about demos, provide clear instructions for accessing demos, technical context, \
key features to explore and interactive guidance. Keep responses focused on the interactive aspects.",
            owner,
            demo_listing(store)
        ),
        Agent::StrategicFit => format!(
            "You are the Strategic Fit Agent for an AI-powered portfolio analysis system.\n\
Your role is to analyze job requirements against qualifications and provide strategic fit assessments.\n\n\
Candidate Profile:\n{}\n\nProjects Portfolio:\n{}\n\nSkills Overview:\n{}\n\n{}\n\n{}\n\n\
When users provide job descriptions, return a JSON object with this exact shape:\n\
{{\n  \"kanban_data\": {{\"technicalSkills\": [], \"relevantExperience\": [], \"projectEvidence\": [], \"quantifiableImpact\": []}},\n  \
\"summary_data\": {{\"overallMatch\": \"Excellent Fit/Good Fit/Partial Fit\", \"matchPercentage\": 85, \"executiveSummary\": \"\", \
\"keyStrengths\": [], \"competitiveAdvantages\": [], \"interviewHighlights\": [], \"processingTime\": \"2.3s\", \"agentUsed\": \"Strategic Fit Agent\"}},\n  \
\"match_score\": \"85%\",\n  \"analysis\": \"\"\n}}\n\
Each kanban card is {{\"id\", \"title\", \"description\", \"score\"}} with score one of Excellent/High/Strong/Good/Moderate.\n\
Always use the exact project names, technologies, and achievements from the portfolio data above.",
            store.profile_summary(),
            store.projects_summary(),
            store.skills_summary(),
            store.core_competencies_summary(),
            store.soft_skills_summary()
        ),
    }
}

fn demo_listing(store: &PortfolioStore) -> String {
    store
        .projects()
        .iter()
        .map(|project| {
            let demo = project
                .demo_urls
                .first()
                .map(String::as_str)
                .unwrap_or("no live demo");
            format!("- {} ({}): {}", project.title, project.github_url, demo)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_every_agent_has_a_prompt() {
        let store =
            PortfolioStore::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/portfolio.json"))
                .unwrap();
        let personas = Personas::build(&store, "Alex Morgan");

        for agent in Agent::ALL {
            assert!(
                personas.prompt(agent).contains(agent.display_name()),
                "{} prompt should name itself",
                agent
            );
        }
        assert!(personas.prompt(Agent::Career).contains("Alex Morgan"));
        assert!(personas.prompt(Agent::StrategicFit).contains("\"kanban_data\""));
        assert!(personas.prompt(Agent::Project).contains(&store.projects()[0].title));
    }
}
