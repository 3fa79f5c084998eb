//! Character-level sequence similarity (longest-matching-blocks ratio).
//!
//! Equivalent to the classic `ratio` over matching blocks: find the longest
//! common block, recurse on the regions to its left and right, and divide the
//! total matched length by the combined string length. No junk heuristic is
//! applied.

use std::collections::HashMap;

/// Returns `2 * M / (len(a) + len(b))` where `M` is the total length of all
/// matching blocks between `a` and `b`, computed over characters.
///
/// Two empty strings are identical (1.0); one empty string matches nothing.
pub fn sequence_similarity(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut b_indices: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b_indices.entry(ch).or_default().push(j);
    }

    let mut matched = 0usize;
    let mut regions = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = regions.pop() {
        let (i, j, length) = longest_match(&a, &b_indices, a_lo, a_hi, b_lo, b_hi);
        if length > 0 {
            matched += length;
            regions.push((a_lo, i, b_lo, j));
            regions.push((i + length, a_hi, j + length, b_hi));
        }
    }

    (2.0 * matched as f32) / (a.len() + b.len()) as f32
}

/// Finds the longest block `a[i..i+k] == b[j..j+k]` within the given regions.
///
/// Scans `a` once; `lengths[j]` holds the length of the match ending at
/// `(i, j)`, extended from the match ending at `(i - 1, j - 1)`.
fn longest_match(
    a: &[char],
    b_indices: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let mut best = (a_lo, b_lo, 0usize);
    let mut lengths: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_lengths = HashMap::new();
        if let Some(indices) = b_indices.get(ch) {
            for &j in indices {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let run = if j == 0 {
                    1
                } else {
                    lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                next_lengths.insert(j, run);
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        lengths = next_lengths;
    }

    best
}
