// src/services/shuffler.rs

use rand::{Rng, seq::SliceRandom};

use crate::models::question::{index_for_marker, marker_for_index};

/// Shuffles `options` uniformly and returns them with the marker now pointing at
/// the correct option.
///
/// Returns `None` when `correct_marker` does not address one of `options`.
pub fn shuffle_options<R: Rng + ?Sized>(
    options: &[String],
    correct_marker: &str,
    rng: &mut R,
) -> Option<(Vec<String>, String)> {
    let correct_index = index_for_marker(correct_marker, options.len())?;

    // Permute positions rather than texts so duplicate texts cannot confuse the lookup.
    let mut order: Vec<usize> = (0..options.len()).collect();
    order.shuffle(rng);

    let new_index = order.iter().position(|&i| i == correct_index)?;
    let new_marker = marker_for_index(new_index)?;
    let shuffled = order.into_iter().map(|i| options[i].clone()).collect();

    Some((shuffled, new_marker.to_string()))
}
