//! Phrase Pool: the two labelled phrase sets decks are dealt from

use std::fs;
use std::path::Path;

use rand::Rng;
use tracing::info;

use crate::core::deck::build_deck;
use crate::types::Deck;
use crate::{GameError, Result};

/// Voice messages logged from 4625 kHz
const BUILTIN_AUTHENTIC: &[&str] = &[
    "НЖТИ 95402 ДОМОКЛАДКА 4915 4071",
    "МДЖБ 63141 ОБЛИСЕЛЬ 8563 4230",
    "ЖУОТ 64535 ШЕЛЕСТОЧКА 3015 7381",
    "НЖТИ 36146 БРОНЕБУС 9052 2715",
    "МДЖБ 38917 УЖИЛОСЬЕ 7744 6013",
    "ЖУОТ 27492 КОЛЮЧЕЛЬНИК 5133 8240",
    "НЖТИ 79413 ДИСКЕРОН 1648 0372",
    "МДЖБ 12770 ТРАГОЛОГИЯ 6259 4904",
];

/// Look-alikes produced by a language model
const BUILTIN_FABRICATED: &[&str] = &[
    "НЖТИ 48210 ЗЕРКАЛОВОД 3391 5576",
    "МДЖБ 90318 ТИХОПЛАВ 2084 6619",
    "ЖУОТ 51177 СНЕГОБОРЬЕ 7420 1938",
    "НЖТИ 66024 ПОЛУНОЧНИК 8812 3057",
    "МДЖБ 23589 ЛУНОВЕРТ 4176 9902",
    "ЖУОТ 70841 ЖЕЛЕЗНОЦВЕТ 6350 2243",
    "НЖТИ 14456 ВЕТРОКРУГ 5097 8164",
    "МДЖБ 87603 ОКЕАНИТ 1239 7045",
];

/// Authentic and fabricated phrase texts
#[derive(Debug, Clone, Default)]
pub struct PhrasePool {
    pub authentic: Vec<String>,
    pub fabricated: Vec<String>,
}

impl PhrasePool {
    pub fn new(authentic: Vec<String>, fabricated: Vec<String>) -> Self {
        Self { authentic, fabricated }
    }

    /// Compiled-in phrase sets
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_AUTHENTIC.iter().map(|s| s.to_string()).collect(),
            BUILTIN_FABRICATED.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Load both sets from files, one phrase per line
    pub fn from_files(authentic: impl AsRef<Path>, fabricated: impl AsRef<Path>) -> Result<Self> {
        let pool = Self::new(read_phrases(authentic.as_ref())?, read_phrases(fabricated.as_ref())?);
        info!(
            authentic = pool.authentic.len(),
            fabricated = pool.fabricated.len(),
            "phrase pool loaded"
        );
        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.authentic.len() + self.fabricated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deal a fresh shuffled deck; an empty pool is [`GameError::DeckUnavailable`]
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Deck> {
        if self.is_empty() {
            return Err(GameError::DeckUnavailable("phrase pool is empty".to_string()));
        }
        Ok(build_deck(&self.authentic, &self.fabricated, rng))
    }
}

/// Non-blank lines that are not `#` comments
fn parse_phrases(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn read_phrases(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| GameError::PoolIo {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_phrases(&content))
}
