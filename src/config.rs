use crate::board::Board;
use crate::cell::Cell;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;
use thiserror::Error;

/// Errors produced while loading and validating an input file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't open file: {0}")]
    Io(#[from] std::io::Error),

    #[error("file is not correctly formatted: expected {0}")]
    Malformed(&'static str),

    #[error("board dimensions must be positive")]
    InvalidDimensions,

    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("coordinate ({row}, {col}) is occupied twice")]
    Collision { row: usize, col: usize },
}

/// A fully validated initial configuration for the simulation.
///
/// The input format is a plain whitespace-separated token stream: the board
/// dimensions as `rows cols`, the iteration budget, the similarity
/// threshold, then each occupant list as a count followed by that many
/// `row col` pairs (type A first, then type B).
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub iterations: usize,
    pub threshold: f64,
    pub type_a: Vec<(usize, usize)>,
    pub type_b: Vec<(usize, usize)>,
}

impl Config {
    /// Reads and parses an input file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Config::parse(&contents)
    }

    /// Parses and validates an input file's contents.
    ///
    /// A successful parse guarantees positive dimensions, every placement in
    /// bounds and no two placements on the same cell, so the engine never
    /// needs to re-validate.
    pub fn parse(contents: &str) -> Result<Config, ConfigError> {
        let mut tokens = Tokens::new(contents);

        let rows = tokens.next_usize("the number of rows")?;
        let cols = tokens.next_usize("the number of columns")?;
        let iterations = tokens.next_usize("the iteration budget")?;
        let threshold = tokens.next_f64("the similarity threshold")?;

        if rows == 0 || cols == 0 {
            return Err(ConfigError::InvalidDimensions);
        }

        let type_a = tokens.next_placements("a type A coordinate")?;
        let type_b = tokens.next_placements("a type B coordinate")?;

        let config = Config {
            rows,
            cols,
            iterations,
            threshold,
            type_a,
            type_b,
        };
        config.validate_placements()?;

        Ok(config)
    }

    /// Builds the initial board from the validated placements.
    pub fn to_board(&self) -> Board {
        let mut board = Board::new(self.cols, self.rows);

        for &(row, col) in &self.type_a {
            board.set(row, col, Cell::TypeA);
        }
        for &(row, col) in &self.type_b {
            board.set(row, col, Cell::TypeB);
        }

        board
    }

    fn validate_placements(&self) -> Result<(), ConfigError> {
        let mut taken = HashSet::new();

        for &(row, col) in self.type_a.iter().chain(self.type_b.iter()) {
            if row >= self.rows || col >= self.cols {
                return Err(ConfigError::OutOfBounds { row, col });
            }
            if !taken.insert((row, col)) {
                return Err(ConfigError::Collision { row, col });
            }
        }

        Ok(())
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(contents: &'a str) -> Tokens<'a> {
        Tokens {
            inner: contents.split_whitespace(),
        }
    }

    fn next_usize(&mut self, what: &'static str) -> Result<usize, ConfigError> {
        self.inner
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or(ConfigError::Malformed(what))
    }

    fn next_f64(&mut self, what: &'static str) -> Result<f64, ConfigError> {
        self.inner
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or(ConfigError::Malformed(what))
    }

    fn next_placements(&mut self, what: &'static str) -> Result<Vec<(usize, usize)>, ConfigError> {
        let count = self.next_usize("an occupant count")?;
        let mut placements = Vec::with_capacity(count);

        for _ in 0..count {
            let row = self.next_usize(what)?;
            let col = self.next_usize(what)?;
            placements.push((row, col));
        }

        Ok(placements)
    }
}
