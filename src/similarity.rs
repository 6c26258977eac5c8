
use ndarray::prelude::*;
use std::error::Error;

use crate::vocab::Vocab;

#[derive(Clone, Debug)]
pub struct RankEntry {
    pub token: String,
    pub index: usize,
    pub score: f32,
}

#[derive(Debug)]
pub struct Ranking {
    // every vocabulary entry, sorted ascending by similarity
    pub entries: Vec<RankEntry>,
    // highest-scoring entry other than the query itself
    pub best: Option<RankEntry>,
}

// zero-norm operands rank at 0 instead of propagating NaN, which keeps
// the degenerate all-zero embedding case sortable
pub fn cosine(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {

    let dot = a.dot(&b);
    let x = a.dot(&a).sqrt();
    let y = b.dot(&b).sqrt();
    if x == 0.0 || y == 0.0 {
        return 0.0;
    }
    dot / (x * y)
}

pub struct Ranker {
    w: Array2<f32>,
}

impl Ranker {

    pub fn new(w: Array2<f32>) -> Ranker {
        Self { w }
    }

    pub fn rank(&self, vocab: &Vocab, query: &str) -> Result<Ranking, Box<dyn Error>> {

        let query_index = match vocab.get(query) {
            Some(i) => i,
            None => return Err(format!("unknown query token `{}`", query).into()),
        };
        let query_vec = self.w.row(query_index);

        // walk the vocabulary in index order so the best-match tie-break
        // is reproducible across runs
        let mut entries: Vec<RankEntry> = Vec::new();
        let mut best: Option<RankEntry> = None;
        for index in 0..vocab.len() {

            let token = match vocab.token(index) {
                Some(token) => token.to_string(),
                None => continue,
            };
            let score = cosine(query_vec, self.w.row(index));
            let entry = RankEntry { token, index, score };

            if index != query_index {
                let improved = match &best {
                    Some(current) => score > current.score,
                    None => true,
                };
                if improved {
                    best = Some(entry.clone());
                }
            }
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.score.total_cmp(&b.score));

        Ok(Ranking { entries, best })
    }
}
