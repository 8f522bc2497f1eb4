use crate::{
    crossword::{Crossword, VarId, WordId},
    domain::Domains,
    fill::Assignment,
};
use core::cmp::Ordering;
use rustc_hash::FxHashMap;

/// How attractive a variable is to branch on next. Greater is better.
#[derive(Eq, PartialEq, Debug)]
pub(crate) struct VariableScore {
    remaining: usize,
    degree: usize,
    var: VarId,
}

impl PartialOrd for VariableScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VariableScore {
    fn cmp(&self, other: &Self) -> Ordering {
        // fewer remaining values wins
        if self.remaining != other.remaining {
            return other.remaining.cmp(&self.remaining);
        }
        // more crossings wins
        if self.degree != other.degree {
            return self.degree.cmp(&other.degree);
        }
        // earlier variable wins
        other.var.cmp(&self.var)
    }
}

pub(crate) fn score_variable(crossword: &Crossword, domains: &Domains, var: VarId) -> VariableScore {
    VariableScore {
        remaining: domains.len(var),
        degree: crossword.degree(var),
        var,
    }
}

/// Minimum remaining values, then highest degree, then variable order.
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<VarId> {
    (0..crossword.variable_count())
        .filter(|&var| !assignment.is_assigned(var))
        .map(|var| score_variable(crossword, domains, var))
        .max()
        .map(|score| score.var)
}

/// Candidates of `var` ordered by how many words each one would rule out in
/// the current domains of its unassigned neighbors, fewest first. Ties keep
/// vocabulary order.
pub fn order_domain_values(
    crossword: &Crossword,
    domains: &Domains,
    var: VarId,
    assignment: &Assignment,
) -> Vec<WordId> {
    // per neighbor: the overlap index into `var`, and how often each letter
    // sits on the shared cell across the neighbor's domain
    let tallies: Vec<(usize, usize, FxHashMap<char, usize>)> = crossword
        .neighbors(var)
        .iter()
        .filter(|&&neighbor| !assignment.is_assigned(neighbor))
        .filter_map(|&neighbor| {
            let (i, j) = crossword.overlap(var, neighbor)?;
            let mut counts = FxHashMap::default();
            for &w in domains.get(neighbor) {
                if let Some(&c) = crossword.letters(w).get(j) {
                    *counts.entry(c).or_insert(0) += 1;
                }
            }
            Some((i, domains.len(neighbor), counts))
        })
        .collect();

    let mut scored: Vec<(usize, WordId)> = domains
        .get(var)
        .iter()
        .map(|&word| {
            let letters = crossword.letters(word);
            let conflicts = tallies
                .iter()
                .map(|(i, total, counts)| {
                    let agreeing = letters
                        .get(*i)
                        .and_then(|c| counts.get(c))
                        .copied()
                        .unwrap_or(0);
                    total - agreeing
                })
                .sum::<usize>();
            (conflicts, word)
        })
        .collect();

    scored.sort_by_key(|&(conflicts, _)| conflicts);
    scored.into_iter().map(|(_, word)| word).collect()
}
