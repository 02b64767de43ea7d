//! In-memory flat vector index with exhaustive squared-L2 search.
//!
//! `FlatIndex` holds two parallel sequences — embedding vectors and their
//! chunk payloads — where position is the only join key. Construction fixes
//! the dimension; there is no per-entry deletion, only a full rebuild via a
//! fresh index.

use docqa_core::{AppError, AppResult};

/// Brute-force nearest-neighbor store over chunk embeddings.
///
/// `vectors[i]` always corresponds to `payloads[i]`; the two sequences grow
/// in lockstep and a divergence is a programming error, not a recoverable
/// state.
#[derive(Debug)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    payloads: Vec<String>,
}

impl FlatIndex {
    /// Create a fresh, empty index with a fixed embedding dimension.
    ///
    /// Creating a new index is the only way to reset: all prior content is
    /// owned by the discarded value.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
            payloads: Vec::new(),
        }
    }

    /// The embedding dimension fixed at construction.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.vectors.len(), self.payloads.len());
        self.vectors.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append a batch of vectors with their parallel chunk payloads.
    ///
    /// The whole batch is validated before anything is appended, so a
    /// failed call leaves the index untouched. Relative order within the
    /// batch is preserved; nothing is deduplicated or reordered.
    ///
    /// # Errors
    /// - `LengthMismatch` if the batch counts differ
    /// - `DimensionMismatch` if any vector's length differs from the index
    ///   dimension (never truncated or padded)
    /// - `InvalidVector` if any component is NaN or infinite
    pub fn add(&mut self, vectors: Vec<Vec<f32>>, chunks: Vec<String>) -> AppResult<()> {
        if vectors.len() != chunks.len() {
            return Err(AppError::LengthMismatch {
                vectors: vectors.len(),
                chunks: chunks.len(),
            });
        }

        for (i, vector) in vectors.iter().enumerate() {
            if vector.len() != self.dimension {
                return Err(AppError::DimensionMismatch {
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(AppError::InvalidVector(format!(
                    "vector {} in batch contains a non-finite component",
                    i
                )));
            }
        }

        self.vectors.extend(vectors);
        self.payloads.extend(chunks);
        debug_assert_eq!(self.vectors.len(), self.payloads.len());

        tracing::debug!("Index now holds {} entries", self.len());
        Ok(())
    }

    /// Return the `k` payloads closest to `query`, ascending by squared
    /// Euclidean distance, with the distance retained for each hit.
    ///
    /// Ties resolve to the earlier-inserted entry. Fewer than `k` stored
    /// entries returns all of them; an empty index returns an empty vec.
    ///
    /// # Errors
    /// `DimensionMismatch` if the query length differs from the index
    /// dimension.
    pub fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<(String, f32)>> {
        if query.len() != self.dimension {
            return Err(AppError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, squared_l2(query, v)))
            .collect();

        // Stable sort keeps insertion order for equal distances
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, dist)| (self.payloads[i].clone(), dist))
            .collect())
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_batch(chunks: &[&str]) -> Vec<String> {
        chunks.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_new_index_is_empty() {
        let index = FlatIndex::new(4);
        assert_eq!(index.dimension(), 4);
        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_add_grows_by_batch_size() {
        let mut index = FlatIndex::new(4);
        index
            .add(
                vec![vec![0.0; 4], vec![1.0; 4], vec![2.0; 4]],
                chunk_batch(&["a", "b", "c"]),
            )
            .unwrap();
        assert_eq!(index.len(), 3);

        index
            .add(vec![vec![3.0; 4]], chunk_batch(&["d"]))
            .unwrap();
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_add_length_mismatch() {
        let mut index = FlatIndex::new(4);
        let err = index
            .add(
                vec![vec![0.0; 4], vec![1.0; 4]],
                chunk_batch(&["a", "b", "c"]),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::LengthMismatch {
                vectors: 2,
                chunks: 3
            }
        ));
        // Failed add leaves the index untouched
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let mut index = FlatIndex::new(4);
        let err = index
            .add(vec![vec![0.0; 3]], chunk_batch(&["a"]))
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        ));
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_add_rejects_non_finite() {
        let mut index = FlatIndex::new(2);
        let err = index
            .add(
                vec![vec![0.0, 0.0], vec![f32::NAN, 1.0]],
                chunk_batch(&["ok", "bad"]),
            )
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidVector(_)));
        // Whole batch rejected, including the valid leading vector
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_search_empty_index() {
        let index = FlatIndex::new(4);
        let results = index.search(&[0.0; 4], 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_dimension_mismatch() {
        let index = FlatIndex::new(4);
        let err = index.search(&[0.0; 5], 1).unwrap_err();
        assert!(matches!(err, AppError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_search_reflexivity() {
        let mut index = FlatIndex::new(4);
        index
            .add(
                vec![
                    vec![0.1, 0.2, 0.3, 0.4],
                    vec![1.0, 1.0, 1.0, 1.0],
                    vec![-0.5, 0.5, -0.5, 0.5],
                ],
                chunk_batch(&["first", "second", "third"]),
            )
            .unwrap();

        let results = index.search(&[1.0, 1.0, 1.0, 1.0], 3).unwrap();
        assert_eq!(results[0].0, "second");
        assert_eq!(results[0].1, 0.0);
    }

    #[test]
    fn test_search_exact_match_scenario() {
        // Three chunks with embeddings E1, E2, E3; querying with exactly E2
        // must return the chunk paired with E2 first.
        let e1 = vec![0.9, 0.1, 0.0, 0.0];
        let e2 = vec![0.0, 0.8, 0.2, 0.0];
        let e3 = vec![0.0, 0.0, 0.7, 0.3];

        let mut index = FlatIndex::new(4);
        index
            .add(
                vec![e1, e2.clone(), e3],
                chunk_batch(&["chunk one", "chunk two", "chunk three"]),
            )
            .unwrap();

        let results = index.search(&e2, 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "chunk two");
        assert_eq!(results[0].1, 0.0);
    }

    #[test]
    fn test_search_k_exceeds_len_returns_all_ordered() {
        let mut index = FlatIndex::new(2);
        index
            .add(
                vec![vec![3.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0]],
                chunk_batch(&["far", "near", "mid"]),
            )
            .unwrap();

        let results = index.search(&[0.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 3);
        let order: Vec<&str> = results.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(order, vec!["near", "mid", "far"]);

        let distances: Vec<f32> = results.iter().map(|(_, d)| *d).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_search_tie_breaks_by_insertion_order() {
        let mut index = FlatIndex::new(2);
        index
            .add(
                vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]],
                chunk_batch(&["east", "north", "west"]),
            )
            .unwrap();

        // All three are equidistant from the origin
        let results = index.search(&[0.0, 0.0], 3).unwrap();
        let order: Vec<&str> = results.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(order, vec!["east", "north", "west"]);
    }

    #[test]
    fn test_search_never_invents_payloads() {
        let mut index = FlatIndex::new(2);
        index
            .add(
                vec![vec![0.0, 1.0], vec![1.0, 0.0]],
                chunk_batch(&["a", "b"]),
            )
            .unwrap();

        let results = index.search(&[0.5, 0.5], 2).unwrap();
        for (chunk, _) in &results {
            assert!(chunk == "a" || chunk == "b");
        }
    }

    #[test]
    fn test_k_zero_returns_empty() {
        let mut index = FlatIndex::new(2);
        index
            .add(vec![vec![0.0, 0.0]], chunk_batch(&["only"]))
            .unwrap();

        let results = index.search(&[0.0, 0.0], 0).unwrap();
        assert!(results.is_empty());
    }
}
