//! Sheet name matching.
//!
//! Data sheets are paired with rule sheets by name similarity, so that a
//! sheet called "Employee" still finds the rules in "Employees".

use std::cmp::Ordering;
use std::collections::HashMap;

/// Default similarity a candidate must reach to be considered a match.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Picks the closest rule sheet name for a data sheet name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetMatcher {
    cutoff: f64,
}

impl Default for SheetMatcher {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl SheetMatcher {
    /// Creates a matcher with a custom cutoff, clamped to `0.0..=1.0`.
    pub fn new(cutoff: f64) -> Self {
        Self {
            cutoff: cutoff.clamp(0.0, 1.0),
        }
    }

    /// Returns the similarity cutoff.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Returns the candidate most similar to `name`, if any reaches the cutoff.
    ///
    /// Ties on similarity go to the lexicographically greatest candidate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use srs_validator::SheetMatcher;
    ///
    /// let matcher = SheetMatcher::default();
    /// let rules = ["Employees", "Departments"];
    ///
    /// assert_eq!(matcher.best_match("Employee", rules), Some("Employees"));
    /// assert_eq!(matcher.best_match("Invoices", rules), None);
    /// ```
    pub fn best_match<'a>(
        &self,
        name: &str,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Option<&'a str> {
        candidates
            .into_iter()
            .map(|candidate| (sequence_ratio(candidate, name), candidate))
            .filter(|(score, _)| *score >= self.cutoff)
            .max_by(|(left_score, left), (right_score, right)| {
                left_score
                    .partial_cmp(right_score)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| left.cmp(right))
            })
            .map(|(_, candidate)| candidate)
    }
}

/// Similarity of two strings in `0.0..=1.0`, computed as `2 * M / T`.
///
/// `M` is the number of characters in matching blocks, found by repeatedly
/// taking the longest common substring and recursing on both sides of it.
/// `T` is the total length of both strings. Two empty strings score 1.0.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_characters(&a, &b);
    2.0 * matched as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        positions.entry(*ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, &positions, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest block `a[i..i+size] == b[j..j+size]` inside the given ranges.
///
/// Among equally long blocks the one starting earliest in `a` wins, then the
/// one starting earliest in `b`.
fn longest_match(
    a: &[char],
    positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_lengths = HashMap::new();
        for &j in positions.get(ch).map(Vec::as_slice).unwrap_or_default() {
            if j < blo {
                continue;
            }
            if j >= bhi {
                break;
            }
            let size = j
                .checked_sub(1)
                .and_then(|prev| run_lengths.get(&prev))
                .copied()
                .unwrap_or(0)
                + 1;
            next_lengths.insert(j, size);
            if size > best_size {
                best_i = i + 1 - size;
                best_j = j + 1 - size;
                best_size = size;
            }
        }
        run_lengths = next_lengths;
    }

    (best_i, best_j, best_size)
}
