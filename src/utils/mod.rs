pub mod random;
pub mod stats;

pub use random::{hamming1_neighbours, make_rng, random_bitvector, random_hamming1_neighbour};
