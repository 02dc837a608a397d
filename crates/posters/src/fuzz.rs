//! Token-sorted fuzzy string similarity.
//!
//! Scores are integers in `0..=100`. Both strings are split on whitespace,
//! their tokens sorted and re-joined, and the results compared with an
//! Indel (insertion/deletion) edit-distance similarity. Token order does not
//! affect the score; missing or extra tokens, punctuation and differing
//! years do.

/// Text preprocessing applied before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextProcessing {
    /// Score strings exactly as given.
    #[default]
    Raw,
    /// Lowercase, replace every non-alphanumeric character with a space, trim.
    Full,
}

impl TextProcessing {
    pub fn apply(self, s: &str) -> String {
        match self {
            TextProcessing::Raw => s.to_string(),
            TextProcessing::Full => full_process(s),
        }
    }
}

fn full_process(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().collect::<String>()
            } else {
                " ".to_string()
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Splits on whitespace, sorts the tokens and joins them with single spaces.
pub fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Normalized Indel similarity of two strings, rounded half-to-even.
///
/// Returns 0 when either string is empty.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = a.len() + b.len();
    // Indel distance is total - 2 * LCS, so similarity reduces to 2 * LCS / total.
    let matched = 2 * lcs_len(&a, &b);
    let score = (100.0 * matched as f64 / total as f64).round_ties_even();
    score as u8
}

/// Similarity of the token-sorted forms of `a` and `b`.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sort_tokens(a), &sort_tokens(b))
}

/// Returns the best-scoring choice for `query` and its score.
///
/// Ties keep the first choice encountered. Choices that are empty after
/// preprocessing are skipped; `None` when nothing can be scored.
pub fn extract_one<'a, I>(query: &str, choices: I, processing: TextProcessing) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = processing.apply(query);
    if query.trim().is_empty() {
        return None;
    }

    let mut best: Option<(&'a str, u8)> = None;
    for choice in choices {
        let processed = processing.apply(choice);
        if processed.trim().is_empty() {
            continue;
        }
        let score = token_sort_ratio(&query, &processed);
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((choice, score)),
        }
    }
    best
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
