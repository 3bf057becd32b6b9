//! Frequency-based keyword extraction for topic cards.

use std::collections::HashMap;

/// Words never reported as keywords.
pub const STOP_WORDS: [&str; 15] = [
    "this", "that", "with", "have", "they", "been", "from", "will", "more", "like", "just",
    "what", "when", "where", "your",
];

/// Shortest word (in characters) considered a keyword.
pub const MIN_KEYWORD_LEN: usize = 4;

/// Maximum number of keywords reported per topic.
pub const MAX_KEYWORDS: usize = 5;

/// Returns up to `limit` most frequent words across `texts`.
///
/// Text is lowercased and split on every non-alphanumeric character.
/// Words shorter than [`MIN_KEYWORD_LEN`] and [`STOP_WORDS`] are skipped.
/// Equal frequencies keep first-seen order.
#[must_use]
pub fn extract_keywords<'a, I>(texts: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    // word -> (count, first-seen index)
    let mut freq: HashMap<String, (usize, usize)> = HashMap::new();
    let mut seen = 0usize;

    for text in texts {
        let lowered = text.to_lowercase();
        for word in lowered.split(|c: char| !c.is_alphanumeric()) {
            if word.chars().count() < MIN_KEYWORD_LEN || STOP_WORDS.contains(&word) {
                continue;
            }
            let entry = freq.entry(word.to_string()).or_insert((0, seen));
            entry.0 += 1;
            seen += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = freq
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);
    ranked.into_iter().map(|(word, _, _)| word).collect()
}
