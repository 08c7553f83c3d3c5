use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use cachers::{Cache, LFUCache};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::deletes::delete_variants;
use crate::distance::damerau_levenshtein_within;
use crate::error::{CorrectorError, Result};
use crate::index::{SymDeleteIndex, TermId};

const CACHE_SIZE: usize = 10_000;

/// How much of the candidate space a lookup reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verbosity {
    /// The single best suggestion: lowest distance, ties broken by count.
    Top,
    /// Every suggestion at the lowest distance found.
    Closest,
    /// Every suggestion within the requested distance.
    All,
}

/// A vocabulary term within the requested edit distance of a lookup input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub term: String,
    pub distance: usize,
    pub count: u64,
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Construction-time parameters of a corrector. Fixed once the corrector is
/// built; the index layout depends on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorOptions {
    /// Largest edit distance the index supports. Fingerprint volume grows
    /// combinatorially with this value.
    pub max_dictionary_edit_distance: usize,
    /// Number of leading characters that participate in fingerprint
    /// generation; tails beyond it are matched by the verifier.
    pub prefix_length: usize,
    /// Minimum count before a term is indexed and surfaced.
    pub count_threshold: u64,
    /// Pre-sizing hint for the fingerprint map.
    pub initial_capacity: usize,
}

impl Default for CorrectorOptions {
    fn default() -> Self {
        Self {
            max_dictionary_edit_distance: 2,
            prefix_length: 7,
            count_threshold: 1,
            initial_capacity: 16,
        }
    }
}

/// Spelling corrector over a frequency-weighted vocabulary.
///
/// Built by ingesting `(term, count)` pairs, which populate a symmetric-delete
/// index: every deletion variant of a term's prefix points back at the term.
/// After the builder quiesces, lookups are pure reads and safe to run from
/// many threads at once.
pub struct SpellCorrector {
    pub(crate) options: CorrectorOptions,
    pub(crate) index: SymDeleteIndex,
    pub(crate) total_count: u64,
    pub(crate) skipped_records: u64,
    pub(crate) cache: LFUCache<String, Vec<Suggestion>>,
}

impl Default for SpellCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpellCorrector {
    pub fn new() -> Self {
        Self::build(CorrectorOptions::default())
    }

    pub fn with_options(options: CorrectorOptions) -> Result<Self> {
        if options.prefix_length < options.max_dictionary_edit_distance.max(1) {
            return Err(CorrectorError::PrefixTooShort {
                prefix_length: options.prefix_length,
                max_edit_distance: options.max_dictionary_edit_distance,
            });
        }
        Ok(Self::build(options))
    }

    fn build(options: CorrectorOptions) -> Self {
        let index = SymDeleteIndex::with_capacity(options.initial_capacity);
        SpellCorrector {
            options,
            index,
            total_count: 0,
            skipped_records: 0,
            cache: LFUCache::new(CACHE_SIZE),
        }
    }

    /// Number of canonical vocabulary terms.
    pub fn word_count(&self) -> usize {
        self.index.word_count()
    }

    /// Number of fingerprints in the index.
    pub fn entry_count(&self) -> usize {
        self.index.entry_count()
    }

    /// Largest edit distance lookups may request.
    pub fn max_dictionary_edit_distance(&self) -> usize {
        self.options.max_dictionary_edit_distance
    }

    /// Sum of the counts of all canonical terms.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of dictionary records that could not be parsed and were skipped.
    pub fn skipped_record_count(&self) -> u64 {
        self.skipped_records
    }

    /// Frequency count of a term, if it is in the canonical vocabulary.
    pub fn count_of(&self, term: &str) -> Option<u64> {
        let folded = term.to_lowercase();
        self.index
            .term_id(&folded)
            .map(|id| self.index.entry(id).count)
    }

    /// Ingests one `(term, count)` observation. Counts accumulate with
    /// saturation; a term is indexed the first time its accumulated count
    /// reaches the configured threshold. Returns `true` when the term entered
    /// the canonical store.
    pub fn create_dictionary_entry(&mut self, term: &str, count_increment: u64) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return false;
        }
        if count_increment == 0 && self.options.count_threshold > 0 {
            // Zero cannot lift a term over the threshold.
            return false;
        }

        if let Some(id) = self.index.term_id(&term) {
            self.index.bump_count(id, count_increment);
            self.total_count = self.total_count.saturating_add(count_increment);
            self.cache.clear();
            return false;
        }

        let threshold = self.options.count_threshold;
        let mut count = count_increment;
        if threshold > 1 {
            if let Some(accumulated) = self.index.accumulator(&term) {
                count = accumulated.saturating_add(count_increment);
                if count >= threshold {
                    self.index.take_accumulator(&term);
                }
            }
        }
        if count < threshold {
            self.index.set_accumulator(term, count);
            return false;
        }

        let id = self.index.insert_term(term.clone(), count);
        self.total_count = self.total_count.saturating_add(count);
        let prefix: String = term.chars().take(self.options.prefix_length).collect();
        for fingerprint in delete_variants(
            &prefix,
            self.options.max_dictionary_edit_distance,
            true,
        ) {
            self.index.add_fingerprint(fingerprint, id);
        }
        self.cache.clear();
        true
    }

    /// Loads `(term, count)` records from whitespace-separated columns.
    /// Blank lines, lines with too few columns, and unparsable counts are
    /// skipped and tallied; they never abort the load.
    pub fn load_dictionary_reader<R: BufRead>(
        &mut self,
        reader: R,
        term_column: usize,
        count_column: usize,
    ) -> Result<()> {
        let mut loaded = 0u64;
        for line in reader.lines() {
            let line = line?;
            let columns: Vec<&str> = line.split_whitespace().collect();
            let term = columns.get(term_column);
            let count = columns
                .get(count_column)
                .and_then(|raw| raw.parse::<u64>().ok());
            match (term, count) {
                (Some(term), Some(count)) => {
                    self.create_dictionary_entry(term, count);
                    loaded += 1;
                }
                _ => self.skipped_records += 1,
            }
        }
        debug!(
            records = loaded,
            skipped = self.skipped_records,
            terms = self.word_count(),
            "dictionary load finished"
        );
        Ok(())
    }

    pub fn load_dictionary<P: AsRef<Path>>(
        &mut self,
        path: P,
        term_column: usize,
        count_column: usize,
    ) -> Result<()> {
        let file = File::open(path)?;
        self.load_dictionary_reader(BufReader::new(file), term_column, count_column)
    }

    /// Builds counts from running text: words are maximal runs of Unicode
    /// letters, and every occurrence counts once.
    pub fn create_dictionary_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            let line = line?;
            for token in line.split(|c: char| !c.is_alphabetic()) {
                if !token.is_empty() {
                    self.create_dictionary_entry(token, 1);
                }
            }
        }
        debug!(terms = self.word_count(), "corpus ingestion finished");
        Ok(())
    }

    pub fn create_dictionary<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path)?;
        self.create_dictionary_reader(BufReader::new(file))
    }

    pub(crate) fn check_distance(&self, max_edit_distance: usize) -> Result<()> {
        if max_edit_distance > self.options.max_dictionary_edit_distance {
            return Err(CorrectorError::EditDistanceOutOfRange {
                requested: max_edit_distance,
                maximum: self.options.max_dictionary_edit_distance,
            });
        }
        Ok(())
    }

    /// Finds vocabulary terms within `max_edit_distance` of `input`, shaped by
    /// `verbosity` and ordered by distance, then count, then term.
    pub fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
    ) -> Result<Vec<Suggestion>> {
        self.check_distance(max_edit_distance)?;
        Ok(self.lookup_folded(&input.to_lowercase(), verbosity, max_edit_distance))
    }

    /// Corrects a batch of inputs in parallel. Lookups are pure reads, so the
    /// batch fans out across threads.
    pub fn lookup_many(
        &self,
        inputs: &[String],
        verbosity: Verbosity,
        max_edit_distance: usize,
    ) -> Result<Vec<Vec<Suggestion>>> {
        self.check_distance(max_edit_distance)?;
        Ok(inputs
            .par_iter()
            .map(|input| self.lookup_folded(&input.to_lowercase(), verbosity, max_edit_distance))
            .collect())
    }

    pub(crate) fn lookup_folded(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
    ) -> Vec<Suggestion> {
        let input_chars: Vec<char> = input.chars().collect();
        let input_len = input_chars.len();
        let mut suggestions: Vec<Suggestion> = Vec::new();
        let mut reported: HashSet<TermId> = HashSet::new();

        // Exact hits come straight from the canonical store.
        if let Some(id) = self.index.term_id(input) {
            let entry = self.index.entry(id);
            suggestions.push(Suggestion {
                term: entry.term.clone(),
                distance: 0,
                count: entry.count,
            });
            if matches!(verbosity, Verbosity::Top) {
                return suggestions;
            }
            reported.insert(id);
        }
        if max_edit_distance == 0 {
            return suggestions;
        }

        let prefix_len = input_len.min(self.options.prefix_length);
        let prefix: String = input_chars[..prefix_len].iter().collect();

        // Verification bound: `All` keeps the caller's bound, `Top` and
        // `Closest` tighten it to the best verified distance so far.
        let mut best_distance = match verbosity {
            Verbosity::Closest if !suggestions.is_empty() => 0,
            _ => max_edit_distance,
        };

        let mut examined: HashSet<String> = HashSet::new();
        examined.insert(prefix.clone());
        let mut queue: VecDeque<String> = VecDeque::new();
        queue.push_back(prefix);

        while let Some(candidate) = queue.pop_front() {
            let candidate_chars: Vec<char> = candidate.chars().collect();
            let depth = prefix_len - candidate_chars.len();
            // Candidates leave the queue in depth order; once the depth alone
            // exceeds the bound, nothing later can verify.
            if depth > best_distance {
                break;
            }

            if let Some(origins) = self.index.origins(&candidate) {
                for &id in origins.as_slice() {
                    if reported.contains(&id) {
                        continue;
                    }
                    let entry = self.index.entry(id);
                    let term_len = entry.term.chars().count();
                    // The fingerprint relation only bounds the prefix; length
                    // arithmetic rejects terms the verifier cannot accept.
                    if term_len.abs_diff(input_len) > best_distance
                        || term_len < candidate_chars.len()
                        || (term_len == candidate_chars.len() && entry.term != candidate)
                    {
                        continue;
                    }
                    reported.insert(id);
                    let Some(distance) =
                        damerau_levenshtein_within(input, &entry.term, best_distance)
                    else {
                        continue;
                    };
                    let next = Suggestion {
                        term: entry.term.clone(),
                        distance,
                        count: entry.count,
                    };
                    match verbosity {
                        Verbosity::All => suggestions.push(next),
                        Verbosity::Closest => {
                            if distance < best_distance {
                                suggestions.clear();
                            }
                            best_distance = distance;
                            suggestions.push(next);
                        }
                        Verbosity::Top => {
                            best_distance = distance;
                            match suggestions.first_mut() {
                                Some(best) => {
                                    if next < *best {
                                        *best = next;
                                    }
                                }
                                None => suggestions.push(next),
                            }
                        }
                    }
                }
            }

            // Grow the queue with the next deletion level while that level
            // can still verify.
            if depth < best_distance {
                for skip in 0..candidate_chars.len() {
                    let mut shorter = String::with_capacity(candidate.len());
                    shorter.extend(candidate_chars[..skip].iter());
                    shorter.extend(candidate_chars[skip + 1..].iter());
                    if examined.insert(shorter.clone()) {
                        queue.push_back(shorter);
                    }
                }
            }
        }

        if !matches!(verbosity, Verbosity::Top) {
            suggestions.sort();
        }
        suggestions
    }

    /// `Top` lookup through the LFU cache. Compound correction resolves the
    /// same tokens and split fragments over and over; the cache carries them.
    pub(crate) fn lookup_top_cached(
        &self,
        term: &str,
        max_edit_distance: usize,
    ) -> Option<Suggestion> {
        let key = format!("{max_edit_distance}:{term}");
        if let Some(cached) = self.cache.get(&key) {
            return cached.iter().next().cloned();
        }
        let found = self.lookup_folded(term, Verbosity::Top, max_edit_distance);
        self.cache.set(key, found.clone());
        found.into_iter().next()
    }
}
