use crate::{
    error::{Error, Result},
    parse::parse_variables,
};
use rustc_hash::FxHashMap;
use std::fmt;

/// Index of a variable in [`Crossword::variables`].
pub type VarId = usize;

/// Index of a word in [`Crossword::words`].
pub type WordId = usize;

/// Where two slots cross: `(i, j)` means letter `i` of the first slot sits in
/// the same cell as letter `j` of the second.
pub type Overlap = (usize, usize);

/// Rectangular grid of fillable (`true`) and blocked (`false`) cells.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Structure {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Structure {
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Structure> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_structure("grid has no cells"));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            Error::invalid_structure(format!("a {}x{} grid is too large", width, height))
        })?;
        if cells.len() != expected {
            return Err(Error::invalid_structure(format!(
                "expected {} cells for a {}x{} grid, found {}",
                expected,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Structure {
            cells,
            width,
            height,
        })
    }

    /// Builds a structure from rows, which must all have the same length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Structure> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::invalid_structure(format!(
                "row {} has {} cells, expected {}",
                row,
                bad.len(),
                width
            )));
        }
        let height = rows.len();
        Structure::new(width, height, rows.into_iter().flatten().collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A slot in the grid that takes one word.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub struct Variable {
    pub start_row: usize,
    pub start_col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(start_row: usize, start_col: usize, direction: Direction, length: usize) -> Variable {
        Variable {
            start_row,
            start_col,
            direction,
            length,
        }
    }

    /// Grid cell holding letter `index` of this slot.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.start_row, self.start_col + index),
            Direction::Down => (self.start_row + index, self.start_col),
        }
    }

    pub fn cells(&self) -> VariableCells<'_> {
        VariableCells {
            variable: self,
            index: 0,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.start_row, self.start_col, self.direction, self.length
        )
    }
}

/// Walks the `(row, col)` cells of a variable from its first letter.
#[derive(Clone, Debug)]
pub struct VariableCells<'s> {
    variable: &'s Variable,
    index: usize,
}

impl<'s> Iterator for VariableCells<'s> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.variable.length {
            return None;
        }
        let result = self.variable.cell(self.index);
        self.index += 1;
        Some(result)
    }
}

/// The puzzle: grid structure, its slots, the vocabulary and the overlap
/// geometry between every pair of slots. Read-only once built.
#[derive(Debug, Clone)]
pub struct Crossword {
    structure: Structure,
    variables: Vec<Variable>,
    variable_ids: FxHashMap<Variable, VarId>,
    words: Vec<String>,
    letters: Vec<Vec<char>>,
    // n * n, indexed by x * n + y
    overlaps: Vec<Option<Overlap>>,
    neighbors: Vec<Vec<VarId>>,
}

impl Crossword {
    /// Derives one variable per maximal run (length >= 2) of fillable cells.
    pub fn new<I, S>(structure: Structure, words: I) -> Result<Crossword>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variables = parse_variables(&structure);
        Crossword::with_variables(structure, variables, words)
    }

    /// Builds a puzzle over caller-supplied slots, validating that each one
    /// fits on fillable cells and that no two slots share more than one cell.
    pub fn with_variables<I, S>(
        structure: Structure,
        variables: Vec<Variable>,
        words: I,
    ) -> Result<Crossword>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut variable_ids = FxHashMap::default();
        for (id, variable) in variables.iter().enumerate() {
            if variable.length == 0 {
                return Err(Error::invalid_variable(variable, "slot has no cells"));
            }
            if let Some((row, col)) = variable
                .cells()
                .find(|&(row, col)| !structure.is_fillable(row, col))
            {
                return Err(Error::invalid_variable(
                    variable,
                    format!("cell ({}, {}) is blocked or out of bounds", row, col),
                ));
            }
            if variable_ids.insert(variable.clone(), id).is_some() {
                return Err(Error::invalid_variable(variable, "duplicate slot"));
            }
        }

        let overlaps = compute_overlaps(&variables)?;
        let count = variables.len();
        let neighbors: Vec<Vec<VarId>> = (0..count)
            .map(|x| {
                (0..count)
                    .filter(|&y| overlaps[x * count + y].is_some())
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
        words.sort();
        words.dedup();
        let letters: Vec<Vec<char>> = words.iter().map(|w| w.chars().collect()).collect();

        let crossword = Crossword {
            structure,
            variables,
            variable_ids,
            words,
            letters,
            overlaps,
            neighbors,
        };
        crossword.check_overlaps()?;
        Ok(crossword)
    }

    fn check_overlaps(&self) -> Result<()> {
        for x in 0..self.variables.len() {
            for y in 0..self.variables.len() {
                let (vx, vy) = (&self.variables[x], &self.variables[y]);
                match (self.overlap(x, y), self.overlap(y, x)) {
                    (None, None) => {}
                    (Some((i, j)), Some((j2, i2))) if i == i2 && j == j2 => {
                        if i >= vx.length || j >= vy.length {
                            return Err(Error::invalid_overlap(vx, vy, "index out of range"));
                        }
                        if vx.cell(i) != vy.cell(j) {
                            return Err(Error::invalid_overlap(vx, vy, "indices name different cells"));
                        }
                    }
                    _ => return Err(Error::invalid_overlap(vx, vy, "table is not symmetric")),
                }
            }
        }
        Ok(())
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn width(&self) -> usize {
        self.structure.width
    }

    pub fn height(&self) -> usize {
        self.structure.height
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id]
    }

    pub fn variable_id(&self, variable: &Variable) -> Option<VarId> {
        self.variable_ids.get(variable).copied()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// The deduplicated vocabulary in sorted order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.words.binary_search_by(|w| w.as_str().cmp(word)).ok()
    }

    pub fn letters(&self, id: WordId) -> &[char] {
        &self.letters[id]
    }

    /// Length of a word in letters.
    pub fn word_len(&self, id: WordId) -> usize {
        self.letters[id].len()
    }

    pub fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.overlaps[x * self.variables.len() + y]
    }

    pub fn neighbors(&self, x: VarId) -> &[VarId] {
        &self.neighbors[x]
    }

    pub fn degree(&self, x: VarId) -> usize {
        self.neighbors[x].len()
    }

    /// Whether `word` and `other` agree on the cell shared by `x` and `y`.
    /// Slots that do not cross always agree.
    pub fn agrees(&self, x: VarId, word: WordId, y: VarId, other: WordId) -> bool {
        match self.overlap(x, y) {
            Some((i, j)) => self.letters[word].get(i) == self.letters[other].get(j),
            None => true,
        }
    }
}

fn compute_overlaps(variables: &[Variable]) -> Result<Vec<Option<Overlap>>> {
    let count = variables.len();
    let mut occupants: FxHashMap<(usize, usize), Vec<(VarId, usize)>> = FxHashMap::default();
    for (id, variable) in variables.iter().enumerate() {
        for (index, cell) in variable.cells().enumerate() {
            occupants.entry(cell).or_default().push((id, index));
        }
    }

    let mut overlaps = vec![None; count * count];
    for shared in occupants.values().filter(|o| o.len() > 1) {
        for (a, &(x, i)) in shared.iter().enumerate() {
            for &(y, j) in &shared[a + 1..] {
                if overlaps[x * count + y].is_some() {
                    return Err(Error::invalid_overlap(
                        &variables[x],
                        &variables[y],
                        "slots share more than one cell",
                    ));
                }
                overlaps[x * count + y] = Some((i, j));
                overlaps[y * count + x] = Some((j, i));
            }
        }
    }
    Ok(overlaps)
}

#[cfg(test)]
mod tests {
    use super::{Crossword, Direction, Structure, Variable};
    use crate::{error::Error, parse::parse_structure};

    fn small() -> Crossword {
        let structure = parse_structure(
            "
#___#
#_##_
#_##_
#_##_
#____
"
            .trim_start_matches('\n'),
        )
        .unwrap();
        Crossword::new(structure, vec!["ONE", "TWO", "THREE", "ONE"]).unwrap()
    }

    #[test]
    fn variables_and_overlaps() {
        let c = small();
        assert_eq!(4, c.variable_count());

        let across = c.variable_id(&Variable::new(0, 1, Direction::Across, 3)).unwrap();
        let down = c.variable_id(&Variable::new(0, 1, Direction::Down, 5)).unwrap();
        let right = c.variable_id(&Variable::new(1, 4, Direction::Down, 4)).unwrap();
        let bottom = c.variable_id(&Variable::new(4, 1, Direction::Across, 4)).unwrap();

        assert_eq!(Some((0, 0)), c.overlap(across, down));
        assert_eq!(Some((0, 0)), c.overlap(down, across));
        assert_eq!(Some((4, 0)), c.overlap(down, bottom));
        assert_eq!(Some((0, 4)), c.overlap(bottom, down));
        assert_eq!(Some((3, 3)), c.overlap(bottom, right));
        assert_eq!(None, c.overlap(across, right));
        assert_eq!(None, c.overlap(across, across));

        assert_eq!(vec![down], c.neighbors(across).to_vec());
        assert_eq!(2, c.degree(down));
    }

    #[test]
    fn vocabulary_is_a_sorted_set() {
        let c = small();
        assert_eq!(&["ONE", "THREE", "TWO"], c.words());
        assert_eq!(Some(1), c.word_id("THREE"));
        assert_eq!(None, c.word_id("SIX"));
        assert_eq!(5, c.word_len(1));
    }

    #[test]
    fn cells_walk_the_slot() {
        let v = Variable::new(1, 4, Direction::Down, 3);
        assert_eq!(vec![(1, 4), (2, 4), (3, 4)], v.cells().collect::<Vec<_>>());
        assert_eq!("(1, 4) down : 3", v.to_string());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = Structure::from_rows(vec![vec![true, true], vec![true]]);
        assert!(matches!(result, Err(Error::InvalidStructure { .. })));
        assert!(Structure::new(2, 2, vec![true; 3]).is_err());
        assert!(Structure::from_rows(vec![]).is_err());
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let result = Structure::new(usize::MAX, 2, vec![]);
        assert!(matches!(result, Err(Error::InvalidStructure { .. })));
    }

    #[test]
    fn slots_must_fit_the_grid() {
        let structure = Structure::from_rows(vec![vec![true, true, false]]).unwrap();
        let result = Crossword::with_variables(
            structure.clone(),
            vec![Variable::new(0, 0, Direction::Across, 3)],
            Vec::<String>::new(),
        );
        assert!(matches!(result, Err(Error::InvalidVariable { .. })));

        let result = Crossword::with_variables(
            structure,
            vec![
                Variable::new(0, 0, Direction::Across, 2),
                Variable::new(0, 0, Direction::Across, 2),
            ],
            Vec::<String>::new(),
        );
        assert!(matches!(result, Err(Error::InvalidVariable { .. })));
    }

    #[test]
    fn slots_sharing_two_cells_are_rejected() {
        let structure = Structure::from_rows(vec![vec![true, true, true]]).unwrap();
        let result = Crossword::with_variables(
            structure,
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Across, 2),
            ],
            Vec::<String>::new(),
        );
        assert!(matches!(result, Err(Error::InvalidOverlap { .. })));
    }
}
