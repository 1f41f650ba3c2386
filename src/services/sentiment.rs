use crate::models::message::Sentiment;

/// Fixed lexicon scanned with case-insensitive substring matching (not
/// word-tokenized, so "now" also matches inside "snow").
const NEGATIVE_WORDS: &[&str] = &[
    "angry",
    "upset",
    "unhappy",
    "frustrated",
    "complain",
    "complaint",
    "urgent",
    "now",
    "bad",
    "terrible",
    "awful",
    "delay",
    "disappointed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SentimentAnalysis {
    pub sentiment: Sentiment,
    pub escalated: bool,
}

/// Scores free text against the negative lexicon.
///
/// Zero distinct hits is neutral, exactly one is negative, two or more is
/// negative and escalated. This function never returns
/// [`Sentiment::Positive`]; that label only appears in seeded data.
pub fn analyze(text: &str) -> SentimentAnalysis {
    let lower = text.to_lowercase();
    let negatives = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    match negatives {
        0 => SentimentAnalysis {
            sentiment: Sentiment::Neutral,
            escalated: false,
        },
        1 => SentimentAnalysis {
            sentiment: Sentiment::Negative,
            escalated: false,
        },
        _ => SentimentAnalysis {
            sentiment: Sentiment::Negative,
            escalated: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_is_neutral() {
        let a = analyze("This is fine");
        assert_eq!(a.sentiment, Sentiment::Neutral);
        assert!(!a.escalated);
    }

    #[test]
    fn single_keyword_is_negative_without_escalation() {
        let a = analyze("I am angry");
        assert_eq!(a.sentiment, Sentiment::Negative);
        assert!(!a.escalated);
    }

    #[test]
    fn two_distinct_keywords_escalate() {
        let a = analyze("angry and frustrated, this is urgent");
        assert_eq!(a.sentiment, Sentiment::Negative);
        assert!(a.escalated);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let a = analyze("bad bad bad");
        assert_eq!(a.sentiment, Sentiment::Negative);
        assert!(!a.escalated);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let a = analyze("URGENT");
        assert_eq!(a.sentiment, Sentiment::Negative);
        // "now" matches inside "snowfall"
        let b = analyze("heavy snowfall expected");
        assert_eq!(b.sentiment, Sentiment::Negative);
    }
}
