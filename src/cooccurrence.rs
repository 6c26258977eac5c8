
use std::collections::HashMap;
use ndarray::Array2;

use crate::vocab::{normalize, Vocab};

// symmetric weighted adjacency over vocabulary indices, sparse since
// most token pairs never meet inside a window
pub struct CoocGraph {
    weights: HashMap<(usize, usize), f32>,
    size: usize,
}

impl CoocGraph {

    // slide a window of radius 1 over the token stream and count
    // immediate left/right neighbor pairs of each center token
    pub fn build(tokens: &[String], vocab: &Vocab) -> CoocGraph {

        let mut graph = CoocGraph {
            weights: HashMap::new(),
            size: vocab.len(),
        };

        if tokens.len() < 3 {
            return graph;
        }

        // boundary tokens contribute no edges
        for i in 1..tokens.len() - 1 {

            let a = vocab.get(&normalize(&tokens[i - 1]));
            let b = vocab.get(&normalize(&tokens[i]));
            let c = vocab.get(&normalize(&tokens[i + 1]));

            if let (Some(a), Some(b)) = (a, b) {
                graph.bump(a, b);
            }
            if let (Some(c), Some(b)) = (c, b) {
                graph.bump(c, b);
            }
        }

        graph
    }

    // increment (i,j) and its mirror cell together, keeping the
    // structure value-symmetric. the diagonal is never written.
    fn bump(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        *self.weights.entry((i, j)).or_insert(0.0) += 1.0;
        *self.weights.entry((j, i)).or_insert(0.0) += 1.0;
    }

    pub fn weight(&self, i: usize, j: usize) -> f32 {
        *self.weights.get(&(i, j)).unwrap_or(&0.0)
    }

    // vocabulary size, the dimension of the adjacency matrix
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    // number of stored (non-zero) cells
    pub fn nnz(&self) -> usize {
        self.weights.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &f32)> {
        self.weights.iter()
    }

    // both strategies consume the graph as a dense matrix
    pub fn to_dense(&self) -> Array2<f32> {

        let mut dense: Array2<f32> = Array2::zeros((self.size, self.size));
        for (&(i, j), &w) in &self.weights {
            dense[[i, j]] = w;
        }
        dense
    }
}
