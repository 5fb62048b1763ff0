//! Canned responses selected by regex category.
//!
//! Used while the model is cold or unavailable. Pure lookup: categories are
//! tried in declaration order, the first one with any matching pattern wins.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Queries longer than this (in characters) get the general answer even when
/// no category matched.
pub const GENERAL_MIN_CHARS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackCategory {
    About,
    Projects,
    Experience,
    Skills,
    Contact,
    Publications,
    General,
}

impl FallbackCategory {
    pub const ALL: [FallbackCategory; 7] = [
        FallbackCategory::About,
        FallbackCategory::Projects,
        FallbackCategory::Experience,
        FallbackCategory::Skills,
        FallbackCategory::Contact,
        FallbackCategory::Publications,
        FallbackCategory::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FallbackCategory::About => "about",
            FallbackCategory::Projects => "projects",
            FallbackCategory::Experience => "experience",
            FallbackCategory::Skills => "skills",
            FallbackCategory::Contact => "contact",
            FallbackCategory::Publications => "publications",
            FallbackCategory::General => "general",
        }
    }
}

impl fmt::Display for FallbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

/// A pre-written answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallbackResponse {
    pub text: &'static str,
    pub confidence: ConfidenceTier,
    pub category: FallbackCategory,
}

static RESPONSES: [FallbackResponse; 7] = [
    FallbackResponse {
        text: "I'm an AI engineer who enjoys turning research ideas into dependable products. \
My background spans machine learning, backend systems and data engineering, \
with a focus on shipping things people actually use. Ask me about my projects or experience for specifics.",
        confidence: ConfidenceTier::High,
        category: FallbackCategory::About,
    },
    FallbackResponse {
        text: "My portfolio includes an AI-powered portfolio assistant with multi-agent routing, \
a real-time analytics pipeline and several applied ML projects. \
Each project page lists the stack, the problem it solved and measurable results.",
        confidence: ConfidenceTier::High,
        category: FallbackCategory::Projects,
    },
    FallbackResponse {
        text: "I've worked across ML engineering and backend roles, building model-serving \
infrastructure, data pipelines and internal tooling. The experience section has \
the full timeline with achievements for each position.",
        confidence: ConfidenceTier::High,
        category: FallbackCategory::Experience,
    },
    FallbackResponse {
        text: "My core skills are Python and Rust, machine learning (PyTorch, scikit-learn), \
LLM application development, cloud deployment and data engineering. \
The skills section breaks these down by category.",
        confidence: ConfidenceTier::High,
        category: FallbackCategory::Skills,
    },
    FallbackResponse {
        text: "The best way to reach me is by email or LinkedIn; both are linked in the \
contact section. I'm happy to talk about roles, collaborations or projects.",
        confidence: ConfidenceTier::High,
        category: FallbackCategory::Contact,
    },
    FallbackResponse {
        text: "My publications cover applied machine learning and information retrieval. \
The publications section lists each paper with its venue and a link.",
        confidence: ConfidenceTier::Medium,
        category: FallbackCategory::Publications,
    },
    FallbackResponse {
        text: "The assistant is warming up, so here's the short version: I build AI systems \
end to end, from data pipelines to deployed models. Try asking about my projects, \
skills or experience, or paste a job description for a fit analysis.",
        confidence: ConfidenceTier::Low,
        category: FallbackCategory::General,
    },
];

// NOTE: expect() is fine here, the patterns are compile-time literals.
static ABOUT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\babout (yourself|you|me)\b").expect("Invalid regex: about phrases"),
        Regex::new(r"\bwho (are|is) (you|this)\b").expect("Invalid regex: who are you"),
        Regex::new(r"\b(introduce|introduction|bio|biography)\b").expect("Invalid regex: introductions"),
        Regex::new(r"\b(your )?(background|education|story)\b").expect("Invalid regex: background"),
    ]
});

static PROJECT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\bprojects?\b").expect("Invalid regex: project"),
        Regex::new(r"\b(portfolio|github|repo|repositories)\b").expect("Invalid regex: portfolio"),
        Regex::new(r"\b(built|build|created|made)\b").expect("Invalid regex: built"),
        Regex::new(r"\b(demo|case stud(y|ies))\b").expect("Invalid regex: demo"),
    ]
});

static EXPERIENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(experience|experiences)\b").expect("Invalid regex: experience"),
        Regex::new(r"\b(work(ed)?|job|jobs|employment|employer)\b").expect("Invalid regex: work"),
        Regex::new(r"\b(career|roles?|positions?|companies|company)\b").expect("Invalid regex: career"),
        Regex::new(r"\b(resume|cv)\b").expect("Invalid regex: resume"),
    ]
});

static SKILL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\bskills?\b").expect("Invalid regex: skill"),
        Regex::new(r"\b(tech stack|technologies|tools|frameworks?)\b").expect("Invalid regex: stack"),
        Regex::new(r"\b(python|rust|pytorch|tensorflow|sql|aws|gcp|docker)\b").expect("Invalid regex: technologies"),
        Regex::new(r"\b(good at|proficient|expertise)\b").expect("Invalid regex: proficiency"),
    ]
});

static CONTACT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(contact|reach|email|e-mail)\b").expect("Invalid regex: contact"),
        Regex::new(r"\b(linkedin|twitter|phone)\b").expect("Invalid regex: social"),
        Regex::new(r"\b(hire|get in touch|connect)\b").expect("Invalid regex: hire"),
    ]
});

static PUBLICATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(publications?|papers?|research)\b").expect("Invalid regex: publications"),
        Regex::new(r"\b(published|journal|conference|arxiv)\b").expect("Invalid regex: venues"),
    ]
});

static GENERAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"^(hi|hello|hey|greetings)\b").expect("Invalid regex: greetings"),
        Regex::new(r"\b(help|what can you do)\b").expect("Invalid regex: help"),
    ]
});

fn patterns_for(category: FallbackCategory) -> &'static [Regex] {
    match category {
        FallbackCategory::About => &ABOUT_PATTERNS,
        FallbackCategory::Projects => &PROJECT_PATTERNS,
        FallbackCategory::Experience => &EXPERIENCE_PATTERNS,
        FallbackCategory::Skills => &SKILL_PATTERNS,
        FallbackCategory::Contact => &CONTACT_PATTERNS,
        FallbackCategory::Publications => &PUBLICATION_PATTERNS,
        FallbackCategory::General => &GENERAL_PATTERNS,
    }
}

/// The canned response for a category.
pub fn response_for(category: FallbackCategory) -> FallbackResponse {
    RESPONSES[category as usize]
}

/// Which category's patterns match `query`, if any.
pub fn classify(query: &str) -> Option<FallbackCategory> {
    let normalized = query.trim().to_lowercase();
    FallbackCategory::ALL
        .into_iter()
        .find(|category| patterns_for(*category).iter().any(|re| re.is_match(&normalized)))
}

/// Picks a canned response for `query`, or `None` when nothing fits.
pub fn respond(query: &str) -> Option<FallbackResponse> {
    if let Some(category) = classify(query) {
        return Some(response_for(category));
    }

    let trimmed = query.trim();
    if trimmed.chars().count() > GENERAL_MIN_CHARS || trimmed.contains('?') {
        return Some(response_for(FallbackCategory::General));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_table_is_indexed_by_category() {
        for category in FallbackCategory::ALL {
            assert_eq!(response_for(category).category, category);
        }
    }

    #[test]
    fn test_about() {
        let response = respond("tell me about yourself").unwrap();
        assert_eq!(response.category, FallbackCategory::About);
        assert_eq!(response.confidence, ConfidenceTier::High);
    }

    #[test]
    fn test_long_unmatched_query_is_general() {
        let response = respond("what is your favorite programming paradigm?").unwrap();
        assert_eq!(response.category, FallbackCategory::General);
        assert_eq!(response.confidence, ConfidenceTier::Low);
    }

    #[test]
    fn test_short_unmatched_query_is_none() {
        assert_eq!(respond("random text"), None);
        assert_eq!(respond("   "), None);
        assert_eq!(respond(""), None);
    }

    #[test]
    fn test_question_mark_alone_triggers_general() {
        assert_eq!(
            respond("why?").map(|r| r.category),
            Some(FallbackCategory::General)
        );
    }

    #[test]
    fn test_length_boundary() {
        // exactly 15 characters, no match, no question mark
        let fifteen = "abcdefghijklmno";
        assert_eq!(fifteen.chars().count(), 15);
        assert_eq!(respond(fifteen), None);
        assert_eq!(
            respond("abcdefghijklmnop").map(|r| r.category),
            Some(FallbackCategory::General)
        );
    }

    #[test]
    fn test_declaration_order_wins() {
        // matches both projects ("github") and contact ("email")
        assert_eq!(
            classify("email me your github"),
            Some(FallbackCategory::Projects)
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(classify("Where have you worked?"), Some(FallbackCategory::Experience));
        assert_eq!(classify("Do you know Rust"), Some(FallbackCategory::Skills));
        assert_eq!(classify("How can I contact you"), Some(FallbackCategory::Contact));
        assert_eq!(classify("Any published papers"), Some(FallbackCategory::Publications));
        assert_eq!(classify("hello"), Some(FallbackCategory::General));
    }

    #[test]
    fn test_respond_is_pure() {
        let query = "What projects have you built?";
        assert_eq!(respond(query), respond(query));
    }
}
