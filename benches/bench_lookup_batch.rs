use spellmend::{SpellCorrector, Verbosity};
use std::time::Instant;

const WORDS: &[&str] = &[
    "the",
    "quick",
    "brown",
    "fox",
    "jumps",
    "over",
    "lazy",
    "dog",
    "pack",
    "my",
    "box",
    "with",
    "five",
    "dozen",
    "liquor",
    "jugs",
    "sphinx",
    "of",
    "black",
    "quartz",
    "judge",
    "vow",
    "information",
    "search",
    "members",
    "about",
    "other",
    "time",
    "site",
    "free",
];

fn main() {
    let mut corrector = SpellCorrector::new();
    for (rank, &word) in WORDS.iter().enumerate() {
        corrector.create_dictionary_entry(word, 1000 / (rank as u64 + 1));
    }

    // Misspell every word by dropping a middle character, repeated to a
    // batch worth measuring.
    let mut queries: Vec<String> = Vec::new();
    for _ in 0..500 {
        for word in WORDS {
            let mut chars: Vec<char> = word.chars().collect();
            if chars.len() > 2 {
                chars.remove(chars.len() / 2);
            }
            queries.push(chars.into_iter().collect());
        }
    }

    let start_time = Instant::now();

    let _ = corrector.lookup_many(&queries, Verbosity::Top, 2);

    let elapsed_time = start_time.elapsed();
    println!("Elapsed time for batch correction: {:?}", elapsed_time);
    println!(
        "Words corrected per second: {}",
        queries.len() as f64 / elapsed_time.as_secs_f64()
    );
}
