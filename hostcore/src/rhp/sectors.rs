use blake2b_simd::Params;
use rayon::prelude::*;

use crate::merkle::{sum_leaf, sum_node, Accumulator};
use crate::types::Hash256;

pub const SEGMENT_SIZE: usize = 64;
pub const SECTOR_SIZE: usize = 1 << 22;

/// Returns the Merkle root of a single sector, the unit of storage contracts
/// account data in. Segments are leaf-hashed in parallel, then each tree
/// level is reduced pairwise until one node remains.
pub fn sector_root(sector: &[u8]) -> Hash256 {
    assert_eq!(sector.len(), SECTOR_SIZE);
    let mut params = Params::new();
    params.hash_length(32);

    let mut level = sector
        .par_chunks_exact(SEGMENT_SIZE)
        .map(|segment| sum_leaf(&params, segment))
        .collect::<Vec<_>>();
    while level.len() > 1 {
        level = level
            .par_chunks_exact(2)
            .map(|pair| sum_node(&params, &pair[0], &pair[1]))
            .collect();
    }
    level[0]
}

/// Returns the Merkle root over a contract's sector roots. This is the value
/// a revision's file Merkle root commits to; a contract with no sectors
/// commits to the zero root.
pub fn meta_root(roots: &[Hash256]) -> Hash256 {
    let mut acc = Accumulator::new();
    for root in roots {
        acc.add_leaf(root);
    }
    acc.root()
}
