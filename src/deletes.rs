use std::collections::HashSet;

/// Every string reachable from `word` by removing 1 to `max_deletes`
/// characters, plus `word` itself when `keep_original` is set.
pub(crate) fn delete_variants(
    word: &str,
    max_deletes: usize,
    keep_original: bool,
) -> HashSet<String> {
    let mut variants = HashSet::new();
    if keep_original {
        variants.insert(word.to_owned());
    }
    if max_deletes > 0 {
        descend(word, 1, max_deletes, &mut variants);
    }
    variants
}

fn descend(word: &str, depth: usize, max_deletes: usize, variants: &mut HashSet<String>) {
    let chars: Vec<char> = word.chars().collect();
    for skip in 0..chars.len() {
        let mut shorter = String::with_capacity(word.len());
        shorter.extend(chars[..skip].iter());
        shorter.extend(chars[skip + 1..].iter());
        // A variant's deletion depth is fixed by its length, so a variant
        // that is already present has already been expanded.
        let fresh = variants.insert(shorter.clone());
        if fresh && depth < max_deletes {
            descend(&shorter, depth + 1, max_deletes, variants);
        }
    }
}
