use crate::types::Candidate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible runs, entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Uniformly random candidate of `length` genes
pub fn random_bitvector<R: Rng>(length: usize, rng: &mut R) -> Candidate {
    (0..length).map(|_| rng.gen_bool(0.5)).collect()
}

/// Copy of `incumbent` with one uniformly chosen gene flipped
pub fn random_hamming1_neighbour<R: Rng>(incumbent: &[bool], rng: &mut R) -> Candidate {
    let mut neighbour = incumbent.to_vec();
    if !neighbour.is_empty() {
        let idx = rng.gen_range(0..neighbour.len());
        neighbour[idx] = !neighbour[idx];
    }
    neighbour
}

/// Every candidate at Hamming distance one, flipping gene 0 first
pub fn hamming1_neighbours(incumbent: &[bool]) -> Vec<Candidate> {
    (0..incumbent.len())
        .map(|i| {
            let mut neighbour = incumbent.to_vec();
            neighbour[i] = !neighbour[i];
            neighbour
        })
        .collect()
}
