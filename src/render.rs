use crate::{crossword::Crossword, fill::Assignment};
use std::fmt;

/// Letters of `assignment` laid out on the grid, `None` where no word covers
/// a cell.
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width()]; crossword.height()];
    for (variable, word) in assignment.words(crossword) {
        for ((row, col), c) in variable.cells().zip(word.chars()) {
            letters[row][col] = Some(c);
        }
    }
    letters
}

/// Terminal rendering of a (possibly partial) fill. Blocked cells print as
/// `█`, empty fillable cells as a space.
pub struct Rendered<'s> {
    crossword: &'s Crossword,
    letters: Vec<Vec<Option<char>>>,
}

impl<'s> Rendered<'s> {
    pub fn new(crossword: &'s Crossword, assignment: &Assignment) -> Rendered<'s> {
        Rendered {
            crossword,
            letters: letter_grid(crossword, assignment),
        }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let structure = self.crossword.structure();
        for (row, letters) in self.letters.iter().enumerate() {
            for (col, letter) in letters.iter().enumerate() {
                if structure.is_fillable(row, col) {
                    write!(f, "{}", letter.unwrap_or(' '))?;
                } else {
                    write!(f, "█")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
