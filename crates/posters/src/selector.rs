//! Best-match selection and acceptance policy.

use crate::candidates::CandidateSet;
use crate::fuzz::{self, TextProcessing};
use crate::types::MatchResult;

/// Minimum score (inclusive) for a match to be accepted by default.
pub const DEFAULT_MIN_RATIO: u8 = 78;

/// Picks the best candidate for a comparison string and decides acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub min_ratio: u8,
    pub processing: TextProcessing,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_RATIO,
            processing: TextProcessing::Raw,
        }
    }
}

impl Selector {
    pub fn new(min_ratio: u8, processing: TextProcessing) -> Self {
        Self {
            min_ratio,
            processing,
        }
    }

    /// Scores `query` against every candidate name and returns the best one.
    pub fn select(&self, query: &str, candidates: &CandidateSet) -> MatchResult {
        match fuzz::extract_one(query, candidates.names(), self.processing) {
            Some((name, score)) => MatchResult::Found {
                name: name.to_string(),
                score,
            },
            None => MatchResult::NotFound,
        }
    }

    pub fn accepts(&self, score: u8) -> bool {
        score >= self.min_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alien_candidates() -> CandidateSet {
        [
            ("Alien (1979).png", "/posters/Alien (1979).png"),
            ("Aliens (1986).png", "/posters/Aliens (1986).png"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn selects_exact_title_over_sequel() {
        let selector = Selector::default();
        let result = selector.select("Alien (1979)", &alien_candidates());

        let MatchResult::Found { name, score } = result else {
            panic!("expected a match");
        };
        assert_eq!(name, "Alien (1979).png");
        assert!(score >= DEFAULT_MIN_RATIO);
        assert!(selector.accepts(score));
    }

    #[test]
    fn empty_candidates_not_found() {
        let selector = Selector::default();
        assert_eq!(
            selector.select("Alien (1979)", &CandidateSet::new()),
            MatchResult::NotFound
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let selector = Selector::default();
        assert!(selector.accepts(78));
        assert!(selector.accepts(100));
        assert!(!selector.accepts(77));
    }

    #[test]
    fn score_equal_to_custom_threshold_is_accepted() {
        let candidates = alien_candidates();
        let MatchResult::Found { score, .. } = Selector::default().select("Aliens (1986)", &candidates)
        else {
            panic!("expected a match");
        };
        let selector = Selector::new(score, TextProcessing::Raw);
        assert!(selector.accepts(score));
        assert!(!Selector::new(score + 1, TextProcessing::Raw).accepts(score));
    }

    #[test]
    fn raising_threshold_never_accepts_more() {
        let candidates = alien_candidates();
        let queries = ["Alien (1979)", "Aliens (1986)", "Alien Resurrection (1997)", "Predator (1987)"];

        let accepted = |min_ratio: u8| {
            let selector = Selector::new(min_ratio, TextProcessing::Raw);
            queries
                .iter()
                .filter(|q| match selector.select(q, &candidates) {
                    MatchResult::Found { score, .. } => selector.accepts(score),
                    MatchResult::NotFound => false,
                })
                .count()
        };

        let mut previous = accepted(0);
        for min_ratio in 1..=100 {
            let current = accepted(min_ratio);
            assert!(current <= previous, "threshold {min_ratio} accepted more");
            previous = current;
        }
    }

    #[test]
    fn full_processing_ignores_case_and_punctuation() {
        let candidates: CandidateSet = [("alien- covenant (2017).png", "/p/a.png")]
            .into_iter()
            .collect();
        let raw = Selector::default().select("Alien: Covenant (2017)", &candidates);
        let full = Selector::new(DEFAULT_MIN_RATIO, TextProcessing::Full)
            .select("Alien: Covenant (2017)", &candidates);

        let (MatchResult::Found { score: raw_score, .. }, MatchResult::Found { score: full_score, .. }) =
            (raw, full)
        else {
            panic!("expected matches");
        };
        assert!(full_score > raw_score);
    }
}
