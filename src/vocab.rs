
use std::collections::HashMap;

// only the first 4096 raw tokens of a corpus are considered,
// larger corpora are silently truncated
pub const MAX_TOKENS: usize = 4096;

const BOUNDARY_CHARS: &[char] = &[' ', '\t', '\n', '\r', '.', '?', '!', ',', ';'];

// lower case, strip boundary punctuation and whitespace from both ends
pub fn normalize(token: &str) -> String {
    token.to_lowercase().trim_matches(BOUNDARY_CHARS).to_string()
}

// split the corpus on runs of whitespace and apply the token cap
pub fn tokenize(corpus: &str) -> Vec<String> {
    corpus
        .split_whitespace()
        .take(MAX_TOKENS)
        .map(|x| x.to_string())
        .collect()
}

pub struct Vocab {
    t2i: HashMap<String, usize>,
    i2t: Vec<String>,
}

impl Vocab {

    // assign dense indices to unique normalized tokens in first-seen order
    pub fn build(tokens: &[String]) -> Vocab {

        let mut t2i: HashMap<String, usize> = HashMap::new();
        let mut i2t: Vec<String> = Vec::new();

        for token in tokens {
            let normalized = normalize(token);
            if !t2i.contains_key(&normalized) {
                t2i.insert(normalized.clone(), i2t.len());
                i2t.push(normalized);
            }
        }

        Self { t2i, i2t }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.t2i.get(token).copied()
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.i2t.get(index).map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i2t.is_empty()
    }
}
