//! Uniform spatial hash grid for neighbor search.
//!
//! Rebuilt from scratch every substep from the predicted positions. Cell
//! size equals the smoothing radius, so a particle's neighbors are always
//! contained in the 3x3 block of cells around it. Buckets over-approximate:
//! unrelated cells can land in the same bucket after the modulo reduction,
//! so every consumer must finish with an exact distance check.

use crate::core::math::Vec2;

use super::sort;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Odd primes for mixing the two cell coordinates into one hash.
const HASH_P1: u32 = 73_856_093;
const HASH_P2: u32 = 19_349_663;

pub struct SpatialHash {
    table_size: u32,
    cell_size: f32,

    /// Hash key per particle, indexed by original particle index.
    pub cell_keys: Vec<u32>,
    /// Permutation of [0, N) grouped by key.
    pub sorted_indices: Vec<u32>,
    /// `cell_offsets[k]..cell_offsets[k+1]` bounds key k's slice of
    /// `sorted_indices`; length `table_size + 1`.
    pub cell_offsets: Vec<u32>,

    counts: Vec<u32>,
}

impl SpatialHash {
    /// Create a hash sized for `capacity` particles. The table size is the
    /// next power of two >= capacity to keep collision chains short.
    pub fn new(capacity: usize) -> Self {
        let table_size = capacity.max(1).next_power_of_two() as u32;
        Self {
            table_size,
            cell_size: 1.0,
            cell_keys: vec![0; capacity],
            sorted_indices: vec![0; capacity],
            cell_offsets: vec![0; table_size as usize + 1],
            counts: vec![0; table_size as usize],
        }
    }

    pub fn table_size(&self) -> u32 {
        self.table_size
    }

    /// Recompute keys, sorted indices, and offsets for one substep.
    pub fn build(&mut self, predicted: &[Vec2], smoothing_radius: f32) {
        self.compute_keys(predicted, smoothing_radius);
        self.sort_and_offsets();
    }

    /// Key computation phase: one hash key per particle.
    pub fn compute_keys(&mut self, predicted: &[Vec2], smoothing_radius: f32) {
        debug_assert_eq!(predicted.len(), self.cell_keys.len());
        self.cell_size = smoothing_radius;

        let cell_size = self.cell_size;
        let table_size = self.table_size;

        #[cfg(feature = "parallel")]
        {
            self.cell_keys
                .par_iter_mut()
                .zip(predicted.par_iter())
                .for_each(|(key, p)| *key = key_of(*p, cell_size, table_size));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (key, p) in self.cell_keys.iter_mut().zip(predicted.iter()) {
                *key = key_of(*p, cell_size, table_size);
            }
        }
    }

    /// Sort phase: group particle indices by key and rebuild the offset
    /// table. Requires `compute_keys` for the same substep to have
    /// completed.
    pub fn sort_and_offsets(&mut self) {
        sort::sort_by_key(
            &self.cell_keys,
            &mut self.counts,
            &mut self.cell_offsets,
            &mut self.sorted_indices,
        );
    }

    pub fn cell_coord(&self, p: Vec2) -> (i32, i32) {
        cell_coord(p, self.cell_size)
    }

    pub fn key_for_cell(&self, cx: i32, cy: i32) -> u32 {
        hash_cell(cx, cy) % self.table_size
    }

    /// Original particle indices bucketed under `key`.
    pub fn bucket(&self, key: u32) -> &[u32] {
        let start = self.cell_offsets[key as usize] as usize;
        let end = self.cell_offsets[key as usize + 1] as usize;
        &self.sorted_indices[start..end]
    }

    /// Keys of the 3x3 cell neighborhood around `p`, deduplicated.
    ///
    /// Two distinct neighborhood cells can reduce to the same bucket;
    /// scanning that bucket twice would double-count every particle in it,
    /// so duplicates are dropped here rather than filtered downstream.
    pub fn neighbor_keys(&self, p: Vec2) -> impl Iterator<Item = u32> {
        let (cx, cy) = self.cell_coord(p);
        let mut keys = [0u32; 9];
        let mut len = 0usize;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let key = self.key_for_cell(cx + dx, cy + dy);
                if !keys[..len].contains(&key) {
                    keys[len] = key;
                    len += 1;
                }
            }
        }
        (0..len).map(move |i| keys[i])
    }
}

fn cell_coord(p: Vec2, cell_size: f32) -> (i32, i32) {
    ((p.x / cell_size).floor() as i32, (p.y / cell_size).floor() as i32)
}

fn hash_cell(cx: i32, cy: i32) -> u32 {
    (cx as u32).wrapping_mul(HASH_P1) ^ (cy as u32).wrapping_mul(HASH_P2)
}

fn key_of(p: Vec2, cell_size: f32, table_size: u32) -> u32 {
    let (cx, cy) = cell_coord(p, cell_size);
    hash_cell(cx, cy) % table_size
}
