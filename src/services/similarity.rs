//! Cosine similarity over a fitted [`VectorSpace`].
//!
//! Two strategies produce identical scores: `Eager` materializes the whole
//! N×N matrix at build time, `Lazy` keeps an inverted index and scores one
//! row per query.

use serde::{Deserialize, Serialize};

use super::vectorizer::{TermVector, VectorSpace};

/// How similarity rows are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMode {
    /// Full matrix computed once; O(N²) memory
    Eager,
    /// One row computed per query from postings
    #[default]
    Lazy,
}

/// Cosine similarity from an integer dot product and squared norms
///
/// Returns 0 when either vector is zero. Self-similarity of a non-zero vector
/// is exactly 1.0 since `sqrt(n * n) == n` for the norms involved.
pub fn cosine_from_parts(dot: u64, squared_norm_a: u64, squared_norm_b: u64) -> f64 {
    if squared_norm_a == 0 || squared_norm_b == 0 {
        return 0.0;
    }
    let denominator = (squared_norm_a as f64 * squared_norm_b as f64).sqrt();
    (dot as f64 / denominator).min(1.0)
}

pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    cosine_from_parts(a.dot(b), a.squared_norm(), b.squared_norm())
}

#[derive(Debug, Clone, Copy)]
struct Posting {
    row: u32,
    count: u32,
}

#[derive(Debug)]
enum Scores {
    /// Row-major N×N matrix
    Matrix(Vec<f64>),
    /// Per-term postings, each sorted by row
    Postings(Vec<Vec<Posting>>),
}

/// Similarity lookups over all rows of a vector space
#[derive(Debug)]
pub struct SimilarityIndex {
    space: VectorSpace,
    mode: SimilarityMode,
    scores: Scores,
}

impl SimilarityIndex {
    pub fn build(space: VectorSpace, mode: SimilarityMode) -> Self {
        let zero_rows = space.rows().iter().filter(|row| row.is_zero()).count();
        if zero_rows > 0 {
            tracing::warn!(zero_rows, "Titles without usable terms score 0 against every title");
        }

        let postings = build_postings(&space);
        let scores = match mode {
            SimilarityMode::Lazy => Scores::Postings(postings),
            SimilarityMode::Eager => Scores::Matrix(build_matrix(&space, &postings)),
        };

        tracing::debug!(
            rows = space.len(),
            vocabulary = space.vocabulary_size(),
            mode = ?mode,
            "Similarity index built"
        );

        Self { space, mode, scores }
    }

    pub fn len(&self) -> usize {
        self.space.len()
    }

    pub fn is_empty(&self) -> bool {
        self.space.is_empty()
    }

    pub fn mode(&self) -> SimilarityMode {
        self.mode
    }

    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Similarity of `row` against every row, in row order
    pub fn row_scores(&self, row: usize) -> Vec<f64> {
        match &self.scores {
            Scores::Matrix(matrix) => {
                let n = self.len();
                matrix[row * n..(row + 1) * n].to_vec()
            }
            Scores::Postings(postings) => {
                let dots = accumulate_dots(&self.space, postings, row, 0);
                let query_norm = self.space.row(row).squared_norm();
                dots.iter()
                    .zip(self.space.rows())
                    .map(|(dot, other)| cosine_from_parts(*dot, query_norm, other.squared_norm()))
                    .collect()
            }
        }
    }

    #[cfg(test)]
    pub fn score(&self, a: usize, b: usize) -> f64 {
        match &self.scores {
            Scores::Matrix(matrix) => matrix[a * self.len() + b],
            Scores::Postings(_) => cosine(self.space.row(a), self.space.row(b)),
        }
    }
}

fn build_postings(space: &VectorSpace) -> Vec<Vec<Posting>> {
    let mut postings: Vec<Vec<Posting>> = vec![Vec::new(); space.vocabulary_size()];
    // rows are visited in order, so every posting list ends up sorted by row
    for (row, vector) in space.rows().iter().enumerate() {
        for &(term, count) in vector.entries() {
            postings[term as usize].push(Posting {
                row: row as u32,
                count,
            });
        }
    }
    postings
}

/// Dot products of `row` against every row `>= from`; earlier slots stay 0
fn accumulate_dots(
    space: &VectorSpace,
    postings: &[Vec<Posting>],
    row: usize,
    from: usize,
) -> Vec<u64> {
    let mut dots = vec![0u64; space.len()];
    for &(term, count) in space.row(row).entries() {
        let list = &postings[term as usize];
        let start = list.partition_point(|p| (p.row as usize) < from);
        for posting in &list[start..] {
            dots[posting.row as usize] += u64::from(count) * u64::from(posting.count);
        }
    }
    dots
}

/// Fills the full matrix, computing each unordered pair once and mirroring it
fn build_matrix(space: &VectorSpace, postings: &[Vec<Posting>]) -> Vec<f64> {
    let n = space.len();
    if n > 10_000 {
        tracing::warn!(rows = n, "Materializing a large similarity matrix");
    }

    let mut matrix = vec![0.0f64; n * n];
    for i in 0..n {
        let dots = accumulate_dots(space, postings, i, i);
        let norm_i = space.row(i).squared_norm();
        for j in i..n {
            let sim = cosine_from_parts(dots[j], norm_i, space.row(j).squared_norm());
            matrix[i * n + j] = sim;
            matrix[j * n + i] = sim;
        }
    }
    matrix
}
