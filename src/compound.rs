use serde::{Deserialize, Serialize};

use crate::corrector::SpellCorrector;
use crate::error::Result;

/// Result of correcting a whole input line: the corrected text, the summed
/// per-token distance, and the summed log10 probability of the emitted terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundSuggestion {
    pub term: String,
    pub distance: usize,
    pub score: f64,
}

/// One emitted token, with the count estimate feeding the composite score.
#[derive(Clone)]
struct Part {
    term: String,
    distance: usize,
    count_estimate: f64,
}

impl SpellCorrector {
    /// Corrects a multi-word input: each whitespace token takes its best
    /// single-word correction, a split into two corrected words, or a merge
    /// with its predecessor, whichever ranks best by distance and then by
    /// the Naive-Bayes score. Returns at most one composite suggestion.
    pub fn lookup_compound(
        &self,
        input: &str,
        max_edit_distance: usize,
    ) -> Result<Vec<CompoundSuggestion>> {
        self.lookup_compound_with(input, max_edit_distance, |_| false)
    }

    /// `lookup_compound` with a pass-through predicate: tokens accepted by
    /// `ignore_token` (already case-folded) are emitted unchanged at distance
    /// zero and never merged into a correction.
    pub fn lookup_compound_with<F>(
        &self,
        input: &str,
        max_edit_distance: usize,
        ignore_token: F,
    ) -> Result<Vec<CompoundSuggestion>>
    where
        F: Fn(&str) -> bool,
    {
        self.check_distance(max_edit_distance)?;
        let folded = input.to_lowercase();
        let tokens: Vec<&str> = folded.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let total = self.total_count().max(1) as f64;

        let mut parts: Vec<Part> = Vec::new();
        // Merging is single-step: a part produced by a merge (or protected by
        // the predicate) never merges again.
        let mut merge_blocked = false;

        for (i, &token) in tokens.iter().enumerate() {
            if ignore_token(token) {
                let count_estimate = self
                    .count_of(token)
                    .map(|count| count as f64)
                    .unwrap_or_else(|| unknown_estimate(token, total));
                parts.push(Part {
                    term: token.to_string(),
                    distance: 0,
                    count_estimate,
                });
                merge_blocked = true;
                continue;
            }

            let top = self.lookup_top_cached(token, max_edit_distance);

            // Split: every boundary competes against the unsplit suggestion,
            // on distance first and the Naive-Bayes estimate second.
            let mut chosen: Option<Part> = top.map(|suggestion| Part {
                distance: suggestion.distance,
                count_estimate: suggestion.count as f64,
                term: suggestion.term,
            });
            let chars: Vec<char> = token.chars().collect();
            for cut in 1..chars.len() {
                let left: String = chars[..cut].iter().collect();
                let right: String = chars[cut..].iter().collect();
                let Some(left_top) = self.lookup_top_cached(&left, max_edit_distance) else {
                    continue;
                };
                let Some(right_top) = self.lookup_top_cached(&right, max_edit_distance) else {
                    continue;
                };
                let split = Part {
                    term: format!("{} {}", left_top.term, right_top.term),
                    distance: left_top.distance.max(right_top.distance) + 1,
                    count_estimate: left_top.count as f64 / total * right_top.count as f64,
                };
                let better = match &chosen {
                    Some(current) => {
                        split.distance < current.distance
                            || (split.distance == current.distance
                                && split.count_estimate > current.count_estimate)
                    }
                    None => true,
                };
                if better {
                    chosen = Some(split);
                }
            }
            let current = chosen.unwrap_or_else(|| Part {
                term: token.to_string(),
                distance: max_edit_distance + 1,
                count_estimate: unknown_estimate(token, total),
            });

            // Merge: with the current suggestion settled, retry the previous
            // and current raw tokens as one word, charging one edit for the
            // dropped boundary and comparing against keeping the two apart.
            if i > 0 && !merge_blocked {
                let joined = format!("{}{}", tokens[i - 1], token);
                if let Some(merged) = self.lookup_top_cached(&joined, max_edit_distance) {
                    let (previous_distance, previous_estimate) = match parts.last() {
                        Some(previous) => (previous.distance, previous.count_estimate),
                        None => (0, 0.0),
                    };
                    let separate_distance = previous_distance + current.distance;
                    let paired_estimate = previous_estimate / total * current.count_estimate;
                    let merged_count = merged.count as f64;
                    if merged.distance + 1 < separate_distance
                        || (merged.distance + 1 == separate_distance
                            && merged_count > paired_estimate)
                    {
                        if let Some(last) = parts.last_mut() {
                            *last = Part {
                                term: merged.term,
                                distance: merged.distance + 1,
                                count_estimate: merged_count,
                            };
                            merge_blocked = true;
                            continue;
                        }
                    }
                }
            }
            merge_blocked = false;

            parts.push(current);
        }

        let mut term = String::new();
        let mut distance = 0usize;
        let mut score = 0.0f64;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                term.push(' ');
            }
            term.push_str(&part.term);
            distance += part.distance;
            score += (part.count_estimate.max(f64::MIN_POSITIVE) / total).log10();
        }
        Ok(vec![CompoundSuggestion {
            term,
            distance,
            score,
        }])
    }
}

/// Virtual count standing in for a token the vocabulary has never seen: a
/// fixed Zipfian probability of `10 / 10^len`, scaled into count space so the
/// shared normalization by the vocabulary total cancels it back out. Longer
/// unknown tokens get vanishingly small mass.
fn unknown_estimate(token: &str, total: f64) -> f64 {
    10f64 / 10f64.powi(token.chars().count() as i32) * total
}
