// * Similarity Engine
// * TF-IDF vector space over every page's normalized text plus the dense all-pairs
// * cosine similarity matrix. Rebuilt wholesale whenever the page set changes.
// *
// * Weighting:
// *   idf(t)   = ln((1 + n) / (1 + df(t))) + 1
// *   w(t, d)  = count(t, d) * idf(t), then each document vector is L2-normalized
// * Cosine similarity of normalized vectors is their dot product.

use super::cancel::CancelFlag;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sparse document vector: (term index, weight), sorted by term index
pub type SparseVector = Vec<(usize, f64)>;

/// Fits a capped vocabulary and produces L2-normalized TF-IDF vectors
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    max_features: usize,
}

/// Fitted vocabulary, idf weights and per-document vectors
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

// * Corpus statistics for one term
#[derive(Debug, Default, Clone, Copy)]
struct TermStats {
    document_frequency: usize,
    total_frequency: usize,
}

impl TfIdfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Fits the vocabulary on `documents` (whitespace-separated normalized tokens)
    /// and transforms each into a TF-IDF vector
    pub fn fit_transform(&self, documents: &[&str]) -> TfIdfModel {
        let counts: Vec<HashMap<&str, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for token in doc.split_whitespace() {
                    *counts.entry(token).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut stats: HashMap<&str, TermStats> = HashMap::new();
        for doc_counts in &counts {
            for (&term, &count) in doc_counts {
                let entry = stats.entry(term).or_default();
                entry.document_frequency += 1;
                entry.total_frequency += count;
            }
        }

        // * Cap: most widespread terms first, then most frequent, then lexicographic
        let mut terms: Vec<(&str, TermStats)> = stats.into_iter().collect();
        terms.sort_by(|a, b| {
            b.1.document_frequency
                .cmp(&a.1.document_frequency)
                .then(b.1.total_frequency.cmp(&a.1.total_frequency))
                .then(a.0.cmp(b.0))
        });
        terms.truncate(self.max_features);

        // * Column order is lexicographic, independent of hash order
        terms.sort_by(|a, b| a.0.cmp(b.0));

        let n_documents = documents.len() as f64;
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(index, (term, _))| (term.to_string(), index))
            .collect();
        let idf: Vec<f64> = terms
            .iter()
            .map(|(_, s)| ((1.0 + n_documents) / (1.0 + s.document_frequency as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .iter()
            .map(|doc_counts| {
                let mut vector: SparseVector = doc_counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        vocabulary
                            .get(*term)
                            .map(|&index| (index, count as f64 * idf[index]))
                    })
                    .collect();
                vector.sort_by_key(|(index, _)| *index);
                l2_normalize(&mut vector);
                vector
            })
            .collect();

        TfIdfModel {
            vocabulary,
            idf,
            vectors,
        }
    }
}

impl TfIdfModel {
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }
}

fn l2_normalize(vector: &mut SparseVector) {
    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in vector.iter_mut() {
            *weight /= norm;
        }
    }
}

/// Dot product of two index-sorted sparse vectors
pub fn sparse_dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Dense, symmetric, page-count-square similarity matrix with a unit diagonal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes all pairwise cosine similarities; None if cancelled mid-build
    pub fn build(vectors: &[SparseVector], cancel: &CancelFlag) -> Option<Self> {
        let size = vectors.len();

        // * Upper triangle only, one row per task
        let upper: Vec<Vec<f64>> = (0..size)
            .into_par_iter()
            .map(|i| {
                if cancel.is_cancelled() {
                    return None;
                }
                Some(
                    ((i + 1)..size)
                        .map(|j| sparse_dot(&vectors[i], &vectors[j]).clamp(0.0, 1.0))
                        .collect(),
                )
            })
            .collect::<Option<Vec<_>>>()?;

        let mut values = vec![0.0; size * size];
        for (i, row) in upper.iter().enumerate() {
            values[i * size + i] = 1.0;
            for (offset, &score) in row.iter().enumerate() {
                let j = i + 1 + offset;
                values[i * size + j] = score;
                values[j * size + i] = score;
            }
        }

        Some(Self { size, values })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity between pages `i` and `j`; None when out of range
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.size && j < self.size).then(|| self.values[i * self.size + j])
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.size).then(|| &self.values[i * self.size..(i + 1) * self.size])
    }

    /// The `top_n` most similar other pages to page `i`, descending by score;
    /// equal scores keep page order
    pub fn nearest(&self, i: usize, top_n: usize) -> Vec<(usize, f64)> {
        let Some(row) = self.row(i) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(top_n);
        ranked
    }

    /// Row-major copy for serialization
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values
            .chunks(self.size.max(1))
            .take(self.size)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

/// A neighbor returned by a nearest-page query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPage {
    pub url: String,
    pub title: String,
    pub similarity_score: f64,
    pub keywords: Vec<String>,
}
