//! Edit distances for spelling correction.

use std::cmp::min;

/// Levenshtein distance: insertions, deletions and substitutions.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    bounded_distance(s1, s2, false, usize::MAX).unwrap_or(usize::MAX)
}

/// Damerau-Levenshtein (optimal string alignment) distance, which also counts
/// a swap of two adjacent characters as a single edit.
pub fn damerau_levenshtein_distance(s1: &str, s2: &str) -> usize {
    bounded_distance(s1, s2, true, usize::MAX).unwrap_or(usize::MAX)
}

/// Edit distance with early termination.
///
/// Returns `None` as soon as the distance is known to exceed `threshold`.
pub fn bounded_distance(
    s1: &str,
    s2: &str,
    transpositions: bool,
    threshold: usize,
) -> Option<usize> {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.len().abs_diff(b.len()) > threshold {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        let distance = a.len().max(b.len());
        return (distance <= threshold).then_some(distance);
    }

    // Rows i-2, i-1 and i of the distance matrix.
    let mut before: Vec<usize> = vec![0; b.len() + 1];
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        let mut row_min = i;

        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut value = min(
                min(prev[j] + 1, curr[j - 1] + 1), // deletion, insertion
                prev[j - 1] + cost,                // substitution
            );

            if transpositions && i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                value = min(value, before[j - 2] + 1);
            }

            curr[j] = value;
            row_min = min(row_min, value);
        }

        if row_min > threshold {
            return None;
        }

        std::mem::swap(&mut before, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[b.len()];
    (distance <= threshold).then_some(distance)
}
