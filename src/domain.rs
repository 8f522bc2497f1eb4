use crate::crossword::{Crossword, VarId, WordId};
use std::rc::Rc;

/// Candidate words for every variable.
///
/// Each domain is a sorted list of word ids behind an `Rc`, so a
/// [`DomainSnapshot`] only copies pointers and a domain is cloned the first
/// time it is narrowed after a snapshot.
#[derive(Clone, Debug)]
pub struct Domains {
    sets: Vec<Rc<Vec<WordId>>>,
}

/// Saved state of a [`Domains`], restored with [`Domains::restore`].
#[derive(Clone, Debug)]
pub struct DomainSnapshot {
    sets: Vec<Rc<Vec<WordId>>>,
}

impl Domains {
    /// Every variable starts with the whole vocabulary.
    pub fn full(crossword: &Crossword) -> Domains {
        let all = Rc::new((0..crossword.words().len()).collect::<Vec<_>>());
        Domains {
            sets: vec![all; crossword.variable_count()],
        }
    }

    pub fn get(&self, var: VarId) -> &[WordId] {
        &self.sets[var]
    }

    pub fn len(&self, var: VarId) -> usize {
        self.sets[var].len()
    }

    pub fn is_empty(&self, var: VarId) -> bool {
        self.sets[var].is_empty()
    }

    pub fn contains(&self, var: VarId, word: WordId) -> bool {
        self.sets[var].binary_search(&word).is_ok()
    }

    pub fn variable_count(&self) -> usize {
        self.sets.len()
    }

    /// Drops every word for which `keep` is false and returns how many were
    /// removed. The domain is left untouched (and unshared) if nothing goes.
    pub fn restrict<F: FnMut(WordId) -> bool>(&mut self, var: VarId, mut keep: F) -> usize {
        let current = &self.sets[var];
        let first = match current.iter().position(|&w| !keep(w)) {
            Some(index) => index,
            None => return 0,
        };

        let mut kept = Vec::with_capacity(current.len() - 1);
        kept.extend_from_slice(&current[..first]);
        kept.extend(current[first + 1..].iter().copied().filter(|&w| keep(w)));
        let removed = current.len() - kept.len();
        self.sets[var] = Rc::new(kept);
        removed
    }

    /// Collapses the domain of `var` to `word`. Returns false, leaving the
    /// domain as it was, if `word` is not a current candidate.
    pub fn assign_singleton(&mut self, var: VarId, word: WordId) -> bool {
        if !self.contains(var, word) {
            return false;
        }
        self.sets[var] = Rc::new(vec![word]);
        true
    }

    pub fn snapshot(&self) -> DomainSnapshot {
        DomainSnapshot {
            sets: self.sets.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: DomainSnapshot) {
        self.sets = snapshot.sets;
    }

    /// Current candidates of `var` as strings.
    pub fn words<'a>(&'a self, crossword: &'a Crossword, var: VarId) -> impl Iterator<Item = &'a str> {
        self.sets[var].iter().map(move |&w| crossword.word(w))
    }
}
