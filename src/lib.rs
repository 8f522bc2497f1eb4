//! Crossword generation as a constraint satisfaction problem.
//!
//! Slots of the grid are variables, the word list is every variable's
//! initial domain, and crossing slots must agree on their shared cell. The
//! solver prunes domains with node and arc consistency, then runs a
//! backtracking search that re-establishes arc consistency after each
//! choice.

pub mod consistency;
pub mod crossword;
pub mod domain;
pub mod error;
pub mod fill;
pub mod order;
pub mod parse;
pub mod render;
pub mod words;

pub use crate::crossword::{Crossword, Direction, Structure, Variable};
pub use crate::error::{Error, Result};
pub use crate::fill::{backtrack::BacktrackFiller, Assignment, FillStats, Filler, SolverConfig};

use std::path::Path;

/// Fills `crossword` with the default configuration.
pub fn solve(crossword: &Crossword) -> Result<Option<Assignment>> {
    BacktrackFiller::new().fill(crossword)
}

/// Reads a structure file and a word list into a puzzle.
pub fn load_crossword(structure: impl AsRef<Path>, words: impl AsRef<Path>) -> Result<Crossword> {
    let structure = parse::load_structure(structure)?;
    let words = words::load_words(words)?;
    Crossword::new(structure, words)
}
