use super::domain::NormalizedAlternative;
use std::cmp::Ordering;

/// Order scored alternatives by final score, best first, and assign
/// position-based rankings starting at 1.
///
/// The input slice is left untouched; a new sequence is returned. The sort
/// is stable, so equal scores keep their input order.
pub fn rank(scored: &[NormalizedAlternative]) -> Vec<NormalizedAlternative> {
    let mut ranked = scored.to_vec();
    ranked.sort_by(|left, right| descending(left.final_score, right.final_score));

    for (position, alternative) in ranked.iter_mut().enumerate() {
        alternative.ranking = position as u32 + 1;
    }

    ranked
}

fn descending(left: f64, right: f64) -> Ordering {
    right.total_cmp(&left)
}
