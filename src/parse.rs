use crate::{
    crossword::{Direction, Structure, Variable},
    error::{Error, Result},
};
use std::path::Path;

/// Parses the text grid format: one line per row, `_` is a fillable cell and
/// anything else is blocked. Short lines are padded with blocked cells.
pub fn parse_structure(contents: &str) -> Result<Structure> {
    let mut lines: Vec<&str> = contents.lines().map(|l| l.trim_end_matches('\r')).collect();
    while lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    if width == 0 {
        return Err(Error::invalid_structure("grid has no cells"));
    }

    let rows = lines
        .iter()
        .map(|line| {
            let mut row: Vec<bool> = line.chars().map(|c| c == '_').collect();
            row.resize(width, false);
            row
        })
        .collect();
    Structure::from_rows(rows)
}

pub fn load_structure(path: impl AsRef<Path>) -> Result<Structure> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_structure(&contents)
}

/// Every maximal run of at least two fillable cells, across slots in
/// row-major order followed by down slots in column-major order.
pub fn parse_variables(structure: &Structure) -> Vec<Variable> {
    let mut result = vec![];

    for row in 0..structure.height() {
        scan_runs(structure.width(), |col| structure.is_fillable(row, col), |col, length| {
            result.push(Variable::new(row, col, Direction::Across, length))
        });
    }

    for col in 0..structure.width() {
        scan_runs(structure.height(), |row| structure.is_fillable(row, col), |row, length| {
            result.push(Variable::new(row, col, Direction::Down, length))
        });
    }

    result
}

fn scan_runs(
    len: usize,
    is_fillable: impl Fn(usize) -> bool,
    mut emit: impl FnMut(usize, usize),
) {
    let mut start = None;

    // one past the end closes a run that reaches the edge
    for index in 0..=len {
        let fillable = index < len && is_fillable(index);
        match (start, fillable) {
            (None, true) => start = Some(index),
            (Some(first), false) => {
                if index - first >= 2 {
                    emit(first, index - first);
                }
                start = None;
            }
            _ => {}
        }
    }
}
