//! Structured job-fit analysis lifted out of model replies.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::routing::Agent;

/// Phrases that mark a query as a request to analyse a job.
const JOB_ANALYSIS_MARKERS: &[&str] = &[
    "job description",
    "requirements",
    "position",
    "role",
    "hiring",
    "job posting",
    "analyze this",
    "fit analysis",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanCard {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub score: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KanbanData {
    pub technical_skills: Vec<KanbanCard>,
    pub relevant_experience: Vec<KanbanCard>,
    pub project_evidence: Vec<KanbanCard>,
    pub quantifiable_impact: Vec<KanbanCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryData {
    #[serde(deserialize_with = "lenient_string")]
    pub overall_match: String,
    #[serde(deserialize_with = "lenient_percentage")]
    pub match_percentage: u8,
    #[serde(deserialize_with = "lenient_string")]
    pub executive_summary: String,
    pub key_strengths: Vec<String>,
    pub competitive_advantages: Vec<String>,
    pub interview_highlights: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub processing_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub agent_used: String,
}

/// Parsed analysis ready to attach to a chat response.
#[derive(Debug, Clone, PartialEq)]
pub struct FitAnalysis {
    pub kanban_data: KanbanData,
    pub summary_data: SummaryData,
    pub match_score: String,
}

#[derive(Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    kanban_data: KanbanData,
    #[serde(default)]
    summary_data: SummaryData,
    #[serde(default)]
    match_score: Option<Value>,
}

/// Models emit numbers, nulls or strings for text fields; keep whatever came.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accepts `85`, `85.5` or `"85%"`, rounded and clamped to 0..=100.
fn lenient_percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0))
}

pub fn is_job_analysis(query: &str) -> bool {
    let lowered = query.to_lowercase();
    JOB_ANALYSIS_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// The span from the first `{` to the last `}`, if any.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn score_to_string(score: Option<Value>) -> String {
    match score {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => format!("{}%", n),
        _ => "0%".to_string(),
    }
}

/// Extracts the analysis JSON embedded in `reply`.
pub fn extract_analysis(reply: &str) -> Option<FitAnalysis> {
    let json = outermost_object(reply)?;
    match serde_json::from_str::<RawAnalysis>(json) {
        Ok(raw) => {
            info!(
                technical_skills = raw.kanban_data.technical_skills.len(),
                "Strategic fit analysis parsed"
            );
            Some(FitAnalysis {
                kanban_data: raw.kanban_data,
                summary_data: raw.summary_data,
                match_score: score_to_string(raw.match_score),
            })
        }
        Err(e) => {
            warn!(error = %e, "Could not parse strategic fit JSON");
            None
        }
    }
}

/// Placeholder analysis when the model reply held no usable JSON.
pub fn failed_analysis(processing_secs: f64) -> FitAnalysis {
    FitAnalysis {
        kanban_data: KanbanData::default(),
        summary_data: SummaryData {
            overall_match: "Analysis Failed".to_string(),
            match_percentage: 0,
            executive_summary: "Could not complete analysis".to_string(),
            processing_time: format!("{:.1}s", processing_secs),
            agent_used: Agent::StrategicFit.display_name().to_string(),
            ..SummaryData::default()
        },
        match_score: "0%".to_string(),
    }
}
