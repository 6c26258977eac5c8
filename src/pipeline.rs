

// imports
use crate::config::{Config, Mode, Params, USAGE};
use crate::cooccurrence::CoocGraph;
use crate::similarity::Ranker;
use crate::spectral;
use crate::train::{self, Train};
use crate::vocab::{self, Vocab};

use core::panic;
use ndarray::Array2;
use std::env;
use std::error::Error;
use std::fs;

pub struct Pipeline {}

impl Pipeline {

    // runs the single-shot batch procedure -
    // -> configuration of arguments
    // -> vocabulary and co-occurrence graph over the corpus
    // -> embeddings via the selected strategy
    // -> similarity ranking against the query token

    pub fn run() {

        let args: Vec<String> = env::args().collect();

        let params = match Config::new(&args) {
            Ok(config) => config.get_params(),
            Err(e) => {
                // bad or missing mode is a usage error, not a crash
                println!("{}", e);
                println!("{}", USAGE);
                return;
            }
        };

        if let Err(e) = Pipeline::execute(&params) {
            panic!("{}", e)
        }
    }

    fn execute(params: &Params) -> Result<(), Box<dyn Error>> {

        let corpus = fs::read_to_string(&params.corpus_file)
            .map_err(|e| format!("could not read corpus file {}: {}", params.corpus_file, e))?;
        let tokens = vocab::tokenize(&corpus);
        let vocab = Vocab::build(&tokens);
        println!("{}", vocab.len());

        let graph = CoocGraph::build(&tokens, &vocab);
        println!("built co-occurrence graph");

        let embeddings: Array2<f32> = match params.mode {
            Mode::Gradient | Mode::GradientTrainedX => {
                let trainer = Train::run(&graph, &params.train)?;
                train::draw_cost_curve(trainer.trajectory(), &params.plot_file)?;
                trainer.embeddings()
            }
            Mode::Spectral => spectral::embed(&graph)?,
        };

        let ranker = Ranker::new(embeddings);
        let ranking = ranker.rank(&vocab, &params.query)?;

        if let Some(best) = &ranking.best {
            println!("{} {}", best.token, best.index);
        }
        for entry in &ranking.entries {
            println!("{} {}", entry.token, entry.score);
        }

        Ok(())
    }
}
