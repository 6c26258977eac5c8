
mod config;
mod cooccurrence;
mod pipeline;
mod similarity;
mod spectral;
mod train;
mod vocab;

pub use config::{Config, Mode, Params, TrainParams};
pub use cooccurrence::CoocGraph;
pub use pipeline::Pipeline;
pub use similarity::{RankEntry, Ranker, Ranking};
pub use train::Train;
pub use vocab::Vocab;
