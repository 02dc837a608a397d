//! Match-quality statistics for accepted matches.

use std::fmt;

use serde::Serialize;

/// Shown in place of the lowest score when nothing was accepted.
pub const NO_MATCHES_SENTINEL: &str = "no matches found";

/// Inclusive score range that accepted matches are reported against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityBand {
    pub min: u8,
    pub max: u8,
    /// Share of the band, counted down from `max`, considered "confident".
    pub percentile: u8,
}

impl Default for QualityBand {
    fn default() -> Self {
        Self {
            min: 78,
            max: 100,
            percentile: 25,
        }
    }
}

impl QualityBand {
    pub fn contains(&self, score: u8) -> bool {
        (self.min..=self.max).contains(&score)
    }

    /// Scores strictly below this value are borderline (94.5 for the default band).
    pub fn percentile_boundary(&self) -> f64 {
        let width = f64::from(self.max) - f64::from(self.min);
        f64::from(self.max) - (f64::from(self.percentile) / 100.0) * width
    }
}

/// Per-library accumulator over accepted matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStatistics {
    band: QualityBand,
    accepted_count: usize,
    lowest_accepted_score: Option<u8>,
}

impl MatchStatistics {
    pub fn new(band: QualityBand) -> Self {
        Self {
            band,
            accepted_count: 0,
            lowest_accepted_score: None,
        }
    }

    /// Records an accepted score.
    ///
    /// Scores outside the band are ignored. Returns `true` when the score
    /// falls in the band but below its percentile boundary.
    pub fn record(&mut self, score: u8) -> bool {
        if !self.band.contains(score) {
            return false;
        }
        self.accepted_count += 1;
        self.lowest_accepted_score = Some(
            self.lowest_accepted_score
                .map_or(score, |lowest| lowest.min(score)),
        );
        f64::from(score) < self.band.percentile_boundary()
    }

    pub fn band(&self) -> QualityBand {
        self.band
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted_count
    }

    pub fn lowest_accepted_score(&self) -> Option<u8> {
        self.lowest_accepted_score
    }
}

impl fmt::Display for MatchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} posters between {} - {} with lowest ratio of ",
            self.accepted_count, self.band.min, self.band.max
        )?;
        match self.lowest_accepted_score {
            Some(score) => write!(f, "{score}"),
            None => f.write_str(NO_MATCHES_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_band_boundary() {
        let band = QualityBand::default();
        assert_eq!(band.percentile_boundary(), 94.5);
    }

    #[test]
    fn band_is_inclusive() {
        let band = QualityBand::default();
        assert!(band.contains(78));
        assert!(band.contains(100));
        assert!(!band.contains(77));
    }

    #[test]
    fn record_tracks_count_and_lowest() {
        let mut stats = MatchStatistics::default();
        stats.record(100);
        stats.record(81);
        stats.record(90);

        assert_eq!(stats.accepted_count(), 3);
        assert_eq!(stats.lowest_accepted_score(), Some(81));
    }

    #[test]
    fn record_flags_borderline_scores() {
        let mut stats = MatchStatistics::default();
        assert!(stats.record(78));
        assert!(stats.record(94));
        assert!(!stats.record(95));
        assert!(!stats.record(100));
    }

    #[test]
    fn record_ignores_scores_outside_band() {
        let mut stats = MatchStatistics::default();
        assert!(!stats.record(60));
        assert_eq!(stats.accepted_count(), 0);
        assert_eq!(stats.lowest_accepted_score(), None);
    }

    #[test]
    fn display_without_matches_uses_sentinel() {
        let stats = MatchStatistics::default();
        assert_eq!(
            stats.to_string(),
            "0 posters between 78 - 100 with lowest ratio of no matches found"
        );
    }

    #[test]
    fn display_with_matches() {
        let mut stats = MatchStatistics::default();
        stats.record(86);
        stats.record(97);
        assert_eq!(
            stats.to_string(),
            "2 posters between 78 - 100 with lowest ratio of 86"
        );
    }
}
