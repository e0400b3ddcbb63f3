//! Near-miss code suggestions for failed lookups.

use strsim::jaro_winkler;

use crate::models::PracticeRecord;

/// Minimum Jaro-Winkler similarity for a code to be suggested.
const MIN_SIMILARITY: f64 = 0.70;

/// Rank records by how closely their code resembles `code`.
///
/// `code` must already be normalized. Ties keep dataset order.
pub(super) fn closest_codes(
    records: &[PracticeRecord],
    code: &str,
    limit: usize,
) -> Vec<PracticeRecord> {
    if code.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &PracticeRecord)> = records
        .iter()
        .map(|p| (jaro_winkler(code, &p.code), p))
        .filter(|(score, _)| *score >= MIN_SIMILARITY)
        .collect();

    // Stable sort, highest similarity first
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, p)| p.clone())
        .collect()
}
