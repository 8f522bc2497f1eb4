use crate::{
    consistency::PropagationStats,
    crossword::{Crossword, VarId, Variable, WordId},
    error::Result,
};
use rustc_hash::FxHashSet;
use std::time::Duration;

pub mod backtrack;

pub trait Filler {
    /// Fills every slot of `crossword`. `Ok(None)` means no fill exists.
    fn fill(&mut self, crossword: &Crossword) -> Result<Option<Assignment>>;
}

/// Words chosen so far, indexed by variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    words: Vec<Option<WordId>>,
}

impl Assignment {
    pub fn new(variable_count: usize) -> Assignment {
        Assignment {
            words: vec![None; variable_count],
        }
    }

    pub fn get(&self, var: VarId) -> Option<WordId> {
        self.words[var]
    }

    pub fn is_assigned(&self, var: VarId) -> bool {
        self.words[var].is_some()
    }

    pub fn insert(&mut self, var: VarId, word: WordId) -> Option<WordId> {
        self.words[var].replace(word)
    }

    pub fn remove(&mut self, var: VarId) -> Option<WordId> {
        self.words[var].take()
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.words.iter().filter(|w| w.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarId, WordId)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.map(|w| (var, w)))
    }

    /// Every variable holds a non-empty word of its own length.
    pub fn is_complete(&self, crossword: &Crossword) -> bool {
        self.words.len() == crossword.variable_count()
            && self.words.iter().enumerate().all(|(var, word)| match word {
                Some(w) => {
                    let length = crossword.word_len(*w);
                    length > 0 && length == crossword.variable(var).length
                }
                None => false,
            })
    }

    /// The assigned words keyed by slot, in variable order.
    pub fn words<'a>(&'a self, crossword: &'a Crossword) -> impl Iterator<Item = (&'a Variable, &'a str)> {
        self.iter()
            .map(move |(var, word)| (crossword.variable(var), crossword.word(word)))
    }
}

/// Whether the assigned words are pairwise distinct, each fits its slot, and
/// every pair of assigned crossing slots agrees on the shared cell.
pub fn consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    let mut used = FxHashSet::default();

    for (var, word) in assignment.iter() {
        if !used.insert(word) {
            return false;
        }
        if crossword.word_len(word) != crossword.variable(var).length {
            return false;
        }
        for &neighbor in crossword.neighbors(var) {
            if neighbor < var {
                continue;
            }
            if let Some(other) = assignment.get(neighbor) {
                if !crossword.agrees(var, word, neighbor, other) {
                    return false;
                }
            }
        }
    }
    true
}

/// Knobs for the search. Budgets only ever cut a search short; they do not
/// change which fill is found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub max_steps: Option<u64>,
    pub timeout: Option<Duration>,
    /// Add neighbors whose domain collapsed to one word during propagation
    /// to the assignment straight away.
    pub infer_singletons: bool,
    /// Log progress every this many steps.
    pub progress_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_steps: None,
            timeout: None,
            infer_singletons: true,
            progress_interval: 10_000,
        }
    }
}

impl SolverConfig {
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_inference(mut self, infer_singletons: bool) -> Self {
        self.infer_singletons = infer_singletons;
        self
    }
}

/// Counters collected during one fill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Calls to the recursive search, one per step.
    pub steps: u64,
    pub values_tried: u64,
    pub backtracks: u64,
    pub inferences: u64,
    pub propagation: PropagationStats,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::{consistent, Assignment};
    use crate::{
        crossword::{Crossword, Direction, Variable},
        parse::parse_structure,
    };

    fn small_crossword() -> Crossword {
        let structure = parse_structure("#___#\n#_##_\n#_##_\n#_##_\n#____\n").unwrap();
        Crossword::new(
            structure,
            vec![
                "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
                "TEST", "",
            ],
        )
        .unwrap()
    }

    fn assign(c: &Crossword, slots: &[((usize, usize, Direction, usize), &str)]) -> Assignment {
        let mut assignment = Assignment::new(c.variable_count());
        for &((row, col, direction, length), word) in slots {
            let var = c
                .variable_id(&Variable::new(row, col, direction, length))
                .unwrap();
            assignment.insert(var, c.word_id(word).unwrap());
        }
        assignment
    }

    #[test]
    fn consistent_assignment() {
        let c = small_crossword();
        let assignment = assign(
            &c,
            &[
                ((0, 1, Direction::Down, 5), "SEVEN"),
                ((0, 1, Direction::Across, 3), "SIX"),
                ((4, 1, Direction::Across, 4), "NINE"),
                ((1, 4, Direction::Down, 4), "FIVE"),
            ],
        );
        assert!(consistent(&c, &assignment));
        assert!(assignment.is_complete(&c));
        assert_eq!(4, assignment.len());
    }

    #[test]
    fn repeated_word_is_inconsistent() {
        let c = small_crossword();
        let assignment = assign(
            &c,
            &[
                ((0, 1, Direction::Down, 5), "SEVEN"),
                ((0, 1, Direction::Across, 3), "SIX"),
                ((4, 1, Direction::Across, 4), "NINE"),
                ((1, 4, Direction::Down, 4), "NINE"),
            ],
        );
        assert!(!consistent(&c, &assignment));
    }

    #[test]
    fn conflicting_letters_are_inconsistent() {
        let c = small_crossword();
        let assignment = assign(
            &c,
            &[
                ((0, 1, Direction::Down, 5), "SEVEN"),
                ((0, 1, Direction::Across, 3), "TWO"),
            ],
        );
        assert!(!consistent(&c, &assignment));
        assert!(!assignment.is_complete(&c));
    }

    #[test]
    fn wrong_length_is_inconsistent() {
        let c = small_crossword();
        let assignment = assign(&c, &[((0, 1, Direction::Across, 3), "SEVEN")]);
        assert!(!consistent(&c, &assignment));
    }

    #[test]
    fn completeness_needs_every_slot_filled_correctly() {
        let c = small_crossword();
        let mut assignment = Assignment::new(c.variable_count());
        assert!(!assignment.is_complete(&c));
        assert!(assignment.is_empty());

        let test = c.word_id("TEST").unwrap();
        for var in 0..c.variable_count() {
            assignment.insert(var, test);
        }
        // TEST only fits the two 4-letter slots
        assert!(!assignment.is_complete(&c));

        let empty = c.word_id("").unwrap();
        for var in 0..c.variable_count() {
            assignment.insert(var, empty);
        }
        assert!(!assignment.is_complete(&c));
    }
}
