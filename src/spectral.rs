
use ndarray::Array2;
use ndarray_linalg::Eig;
use std::error::Error;

use crate::cooccurrence::CoocGraph;

// embeds each word as the magnitudes of its row across all right
// eigenvectors of the adjacency matrix. the solver takes the general
// path, so eigenpairs come back complex even for this symmetric input,
// and their order is whatever the decomposition yields.
pub fn embed(graph: &CoocGraph) -> Result<Array2<f32>, Box<dyn Error>> {

    let adjacency = graph.to_dense();
    let (values, vectors) = adjacency.eig()?;
    println!("computed eigenvectors");

    for (i, value) in values.iter().enumerate() {
        println!("{} {}", i, value.norm());
    }

    Ok(vectors.mapv(|z| z.norm()))
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::vocab::{tokenize, Vocab};

    const TOY_CORPUS: &str = "the cat sat on the mat the cat ran";

    #[test]
    fn toy_corpus_embeds_cleanly() {

        let tokens = tokenize(TOY_CORPUS);
        let vocab = Vocab::build(&tokens);
        let graph = CoocGraph::build(&tokens, &vocab);

        let embeddings = embed(&graph).unwrap();
        assert_eq!(embeddings.dim(), (vocab.len(), vocab.len()));
        assert!(embeddings.iter().all(|v| v.is_finite()));
        // magnitudes, so every coordinate is non-negative
        assert!(embeddings.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn embeddings_are_not_all_zero() {

        let tokens = tokenize(TOY_CORPUS);
        let vocab = Vocab::build(&tokens);
        let graph = CoocGraph::build(&tokens, &vocab);

        let embeddings = embed(&graph).unwrap();
        assert!(embeddings.iter().any(|&v| v > 0.0));
    }
}
