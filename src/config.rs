

use std::error::Error;
use std::fmt::Display;

// the embedding strategy, selected by the first command line argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Gradient,
    // alternate gradient mode that also applies updates to the X matrix,
    // so the read-out embeddings are actually trained
    GradientTrainedX,
    Spectral,
}

impl Mode {

    pub fn parse(raw: &str) -> Result<Mode, Box<dyn Error>> {
        match raw {
            "gradient" => Ok(Mode::Gradient),
            "gradient-x" => Ok(Mode::GradientTrainedX),
            "gonum" | "spectral" => Ok(Mode::Spectral),
            other => Err(format!("unrecognized mode `{}`", other).into()),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Gradient => "gradient",
            Mode::GradientTrainedX => "gradient-x",
            Mode::Spectral => "spectral",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug)]
pub struct TrainParams {
    pub iterations: usize,
    pub learning_rate: f32,
    pub momentum: f32,
    pub clip_threshold: f32,
    pub update_x: bool,
}

impl TrainParams {

    // the fixed schedule of the reference run, no early stop
    pub fn new(update_x: bool) -> TrainParams {
        Self {
            iterations: 1024,
            learning_rate: 0.3,
            momentum: 0.3,
            clip_threshold: 1.0,
            update_x,
        }
    }
}

impl Display for TrainParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "training hyper parameters:
        iterations: {},
        learning_rate: {},
        momentum: {},
        clip_threshold: {},
        update_x: {}",
        self.iterations, self.learning_rate, self.momentum, self.clip_threshold, self.update_x
        )
    }
}

#[derive(Clone, Debug)]
pub struct Params {
    pub corpus_file: String,
    pub mode: Mode,
    pub query: String,
    pub plot_file: String,
    pub train: TrainParams,
}

impl Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using hyper-params:
        corpus_file: {}
        mode: {}
        query: {}
        plot_file: {}
        {}",
        self.corpus_file, self.mode, self.query, self.plot_file, self.train)
    }
}

pub const USAGE: &str = "usage: eigenwords <mode> [corpus-file] [query]
    mode: gradient | gradient-x | gonum | spectral";

pub struct Config {
    params: Params,
}

impl Config {

    pub fn get_params(&self) -> Params {
        self.params.clone()
    }

    // arguments are positional: mode, then optional corpus file and query
    pub fn new(args: &[String]) -> Result<Config, Box<dyn Error>> {

        if args.len() < 2 || args.len() > 4 {
            return Err("expected a mode argument".into());
        }

        let mode = Mode::parse(&args[1])?;
        let corpus_file = args.get(2).cloned().unwrap_or_else(|| "84-0.txt".to_string());
        let query = args.get(3).cloned().unwrap_or_else(|| "good".to_string());

        let params = Params {
            corpus_file,
            mode,
            query,
            plot_file: "cost.png".to_string(),
            train: TrainParams::new(mode == Mode::GradientTrainedX),
        };

        Ok(Self { params })
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn recognized_modes() {
        assert_eq!(Mode::parse("gradient").unwrap(), Mode::Gradient);
        assert_eq!(Mode::parse("gradient-x").unwrap(), Mode::GradientTrainedX);
        assert_eq!(Mode::parse("gonum").unwrap(), Mode::Spectral);
        assert_eq!(Mode::parse("spectral").unwrap(), Mode::Spectral);
        assert!(Mode::parse("newton").is_err());
        assert!(Mode::parse("").is_err());
    }

    #[test]
    fn defaults_and_overrides() {

        let config = Config::new(&args(&["eigenwords", "gradient"])).unwrap();
        let params = config.get_params();
        assert_eq!(params.corpus_file, "84-0.txt");
        assert_eq!(params.query, "good");
        assert_eq!(params.train.iterations, 1024);
        assert!(!params.train.update_x);

        let config = Config::new(&args(&["eigenwords", "gradient-x", "corpus.txt", "bad"])).unwrap();
        let params = config.get_params();
        assert_eq!(params.corpus_file, "corpus.txt");
        assert_eq!(params.query, "bad");
        assert!(params.train.update_x);
    }

    #[test]
    fn missing_or_bad_mode_is_an_error() {
        assert!(Config::new(&args(&["eigenwords"])).is_err());
        assert!(Config::new(&args(&["eigenwords", "bogus"])).is_err());
    }
}
