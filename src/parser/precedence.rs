//! Binary operator precedence table
//!
//! Maps an operator character to a positive rank; a higher rank binds
//! tighter. Anything not in the table (or mapped to a rank `<= 0`) is not a
//! binary operator and reports [`NOT_AN_OPERATOR`], which stops precedence
//! climbing.
//!
//! # Default ranks
//!
//! | Operators       | Rank |
//! |-----------------|-----:|
//! | `<` `>` `=`     | 10   |
//! | `+` `-`         | 20   |
//! | `*` `/` `%`     | 40   |

use rustc_hash::FxHashMap;
use std::fmt;

/// Precedence reported for tokens that are not binary operators
pub const NOT_AN_OPERATOR: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceTable {
    ranks: FxHashMap<char, i32>,
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for op in ['<', '>', '='] {
            table.insert(op, 10);
        }
        for op in ['+', '-'] {
            table.insert(op, 20);
        }
        for op in ['*', '/', '%'] {
            table.insert(op, 40);
        }
        table
    }
}

impl PrecedenceTable {
    /// A table with no operators at all
    pub fn empty() -> Self {
        Self {
            ranks: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, op: char, rank: i32) {
        self.ranks.insert(op, rank);
    }

    /// Rank of `op`, or [`NOT_AN_OPERATOR`]
    pub fn get(&self, op: char) -> i32 {
        match self.ranks.get(&op) {
            Some(&rank) if rank > 0 => rank,
            _ => NOT_AN_OPERATOR,
        }
    }

    /// Operators in the table, ordered by rank then character
    pub fn operators(&self) -> Vec<(char, i32)> {
        let mut ops: Vec<(char, i32)> = self
            .ranks
            .iter()
            .filter(|(_, rank)| **rank > 0)
            .map(|(&op, &rank)| (op, rank))
            .collect();
        ops.sort_by_key(|&(op, rank)| (rank, op));
        ops
    }

    /// Apply `op=rank` pairs separated by commas, e.g. `"^=50,<=5"`.
    ///
    /// A rank of 0 removes the operator.
    /// Nothing is applied unless every entry is well formed.
    pub fn parse_overrides(&mut self, overrides: &str) -> Result<(), PrecedenceError> {
        let mut parsed = Vec::new();
        for entry in overrides.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let mut chars = entry.chars();
            let (Some(op), Some('=')) = (chars.next(), chars.next()) else {
                return Err(PrecedenceError::new(entry, "expected `op=rank`"));
            };
            if op.is_ascii_alphanumeric() || op.is_whitespace() || !op.is_ascii() {
                return Err(PrecedenceError::new(entry, "operator must be an ASCII symbol"));
            }
            let rank: i32 = chars
                .as_str()
                .trim()
                .parse()
                .map_err(|_| PrecedenceError::new(entry, "rank is not an integer"))?;
            parsed.push((op, rank));
        }
        for (op, rank) in parsed {
            self.insert(op, rank);
        }
        Ok(())
    }
}

/// A malformed precedence override
#[derive(Debug, Clone)]
pub struct PrecedenceError {
    pub entry: String,
    pub message: String,
}

impl PrecedenceError {
    fn new(entry: &str, message: &str) -> Self {
        Self {
            entry: entry.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for PrecedenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid precedence entry '{}': {}", self.entry, self.message)
    }
}

impl std::error::Error for PrecedenceError {}
