use rand::seq::SliceRandom;
use rand::Rng;

/// Shown when neither a category nor the general answer applies.
pub const NO_MATCH_MESSAGE: &str =
    "I'm not sure I understood that. Could you give me a bit more detail about what you'd like to know?";

/// Rotating suggestions appended to the no-match message.
pub const TIPS: &[&str] = &[
    "Try asking \"What projects have you built?\"",
    "Try asking \"What is your tech stack?\"",
    "Try asking \"Tell me about your experience.\"",
    "Paste a job description after \"Analyze this job description:\" for a fit analysis.",
    "Try asking \"How can I contact you?\"",
    "Try asking \"Do you have any publications?\"",
];

/// Uniformly picks one tip.
pub fn pick_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TIPS.choose(rng).copied().unwrap_or_default()
}

/// Generic prompt-for-more-detail reply with a tip.
pub fn no_match_reply<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}\n\nTip: {}", NO_MATCH_MESSAGE, pick_tip(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_tip_is_deterministic_with_injected_rng() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(pick_tip(&mut rng), TIPS[0]);
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let first = pick_tip(&mut StdRng::seed_from_u64(7));
        let second = pick_tip(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert!(TIPS.contains(&first));
    }

    #[test]
    fn test_no_match_reply_contains_message_and_tip() {
        let reply = no_match_reply(&mut StepRng::new(0, 0));
        assert!(reply.starts_with(NO_MATCH_MESSAGE));
        assert!(reply.ends_with(TIPS[0]));
    }
}
