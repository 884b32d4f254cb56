//! Counting sort over hash keys.
//!
//! Two strictly ordered phases: a counting round that produces the per-key
//! prefix offsets, then a scatter round that places particle indices. The
//! scatter must not start until every count is in, because the offsets are
//! the scatter's write cursors. Ordering within one key is unspecified.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
const COUNT_CHUNK: usize = 4096;

/// Group particle indices by key.
///
/// `counts` is scratch of length `table_size`, `offsets` has length
/// `table_size + 1`, `sorted` has the same length as `keys`. After the call
/// `sorted[offsets[k]..offsets[k + 1]]` holds exactly the indices whose key
/// is k; empty keys collapse to an empty range.
pub(super) fn sort_by_key(keys: &[u32], counts: &mut [u32], offsets: &mut [u32], sorted: &mut [u32]) {
    debug_assert_eq!(offsets.len(), counts.len() + 1);
    debug_assert_eq!(sorted.len(), keys.len());

    counts.fill(0);

    // Phase 1: counting. Per-chunk histograms merged serially; the merge
    // order does not matter because the counts are exact integers.
    #[cfg(feature = "parallel")]
    {
        let table_size = counts.len();
        let histograms: Vec<Vec<u32>> = keys
            .par_chunks(COUNT_CHUNK)
            .map(|chunk| {
                let mut histogram = vec![0u32; table_size];
                for &key in chunk {
                    histogram[key as usize] += 1;
                }
                histogram
            })
            .collect();
        for histogram in &histograms {
            for (count, part) in counts.iter_mut().zip(histogram) {
                *count += part;
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        for &key in keys {
            counts[key as usize] += 1;
        }
    }

    // Exclusive prefix sum over the counts.
    offsets[0] = 0;
    for k in 0..counts.len() {
        offsets[k + 1] = offsets[k] + counts[k];
    }

    // Phase 2: scatter. Reuse the counts as per-key write cursors.
    counts.copy_from_slice(&offsets[..counts.len()]);
    for (i, &key) in keys.iter().enumerate() {
        let cursor = &mut counts[key as usize];
        sorted[*cursor as usize] = i as u32;
        *cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(keys: &[u32], table_size: usize) -> (Vec<u32>, Vec<u32>) {
        let mut counts = vec![0u32; table_size];
        let mut offsets = vec![0u32; table_size + 1];
        let mut sorted = vec![0u32; keys.len()];
        sort_by_key(keys, &mut counts, &mut offsets, &mut sorted);
        (offsets, sorted)
    }

    #[test]
    fn ranges_partition_and_match_keys() {
        let keys = [3u32, 0, 3, 1, 7, 3, 0, 7];
        let (offsets, sorted) = run(&keys, 8);

        assert_eq!(offsets[0], 0);
        assert_eq!(offsets[8], keys.len() as u32);

        let mut seen = [false; 8];
        for k in 0..8 {
            for slot in offsets[k]..offsets[k + 1] {
                let i = sorted[slot as usize] as usize;
                assert_eq!(keys[i], k as u32);
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn empty_keys_collapse_to_empty_ranges() {
        let keys = [2u32, 2, 2];
        let (offsets, _) = run(&keys, 4);
        assert_eq!(offsets[0], offsets[1]);
        assert_eq!(offsets[1], offsets[2]);
        assert_eq!(offsets[3] - offsets[2], 3);
        assert_eq!(offsets[3], offsets[4]);
    }

    #[test]
    fn empty_input_produces_zero_offsets() {
        let (offsets, sorted) = run(&[], 4);
        assert!(sorted.is_empty());
        assert!(offsets.iter().all(|&o| o == 0));
    }
}
