//! Node and arc consistency over the crossing graph.
//!
//! Node consistency drops every candidate whose length differs from its slot.
//! Arc consistency is AC-3: an arc `(x, y)` is revised by dropping every word
//! of `x` that no word of `y` agrees with on the shared cell, and whenever `x`
//! shrinks every arc `(z, x)` from its other neighbors is queued again.

use crate::{
    crossword::{Crossword, VarId},
    domain::Domains,
};
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Directed constraint from the first variable towards the second.
pub type Arc = (VarId, VarId);

/// Counters for propagation work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    pub revisions: u64,
    pub removals: u64,
    pub wipeouts: u64,
}

/// Removes words of the wrong length. Returns how many were removed.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains) -> usize {
    let mut removed = 0;
    for (var, variable) in crossword.variables().iter().enumerate() {
        removed += domains.restrict(var, |w| crossword.word_len(w) == variable.length);
    }
    debug!(target: "ac3", "node consistency removed {} candidates", removed);
    removed
}

/// Makes `x` arc consistent with `y`. Returns whether the domain of `x`
/// changed.
pub fn revise(crossword: &Crossword, domains: &mut Domains, x: VarId, y: VarId) -> bool {
    revise_counted(crossword, domains, x, y, &mut PropagationStats::default())
}

fn revise_counted(
    crossword: &Crossword,
    domains: &mut Domains,
    x: VarId,
    y: VarId,
    stats: &mut PropagationStats,
) -> bool {
    let (i, j) = match crossword.overlap(x, y) {
        Some(overlap) => overlap,
        None => return false,
    };
    stats.revisions += 1;

    // letters y can still put on the shared cell
    let supported: FxHashSet<char> = domains
        .get(y)
        .iter()
        .filter_map(|&w| crossword.letters(w).get(j).copied())
        .collect();

    let removed = domains.restrict(x, |w| {
        crossword
            .letters(w)
            .get(i)
            .map_or(false, |c| supported.contains(c))
    });
    stats.removals += removed as u64;
    removed > 0
}

/// Both directions of every crossing, in variable order.
pub fn all_arcs(crossword: &Crossword) -> Vec<Arc> {
    (0..crossword.variable_count())
        .flat_map(|x| crossword.neighbors(x).iter().map(move |&y| (x, y)))
        .collect()
}

/// Runs AC-3 starting from `arcs`, or from every arc when `arcs` is `None`.
/// Returns false if some domain becomes empty.
pub fn ac3(crossword: &Crossword, domains: &mut Domains, arcs: Option<Vec<Arc>>) -> bool {
    ac3_with_stats(crossword, domains, arcs, &mut PropagationStats::default())
}

pub fn ac3_with_stats(
    crossword: &Crossword,
    domains: &mut Domains,
    arcs: Option<Vec<Arc>>,
    stats: &mut PropagationStats,
) -> bool {
    let initial = arcs.unwrap_or_else(|| all_arcs(crossword));
    let mut queued: FxHashSet<Arc> = initial.iter().copied().collect();
    let mut worklist: VecDeque<Arc> = initial.into_iter().collect();

    while let Some((x, y)) = worklist.pop_front() {
        queued.remove(&(x, y));

        if !revise_counted(crossword, domains, x, y, stats) {
            continue;
        }
        if domains.is_empty(x) {
            stats.wipeouts += 1;
            trace!(
                target: "ac3",
                "domain of {} wiped out by {}",
                crossword.variable(x),
                crossword.variable(y)
            );
            return false;
        }
        for &z in crossword.neighbors(x) {
            if z != y && queued.insert((z, x)) {
                worklist.push_back((z, x));
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{ac3, all_arcs, enforce_node_consistency, revise};
    use crate::{
        crossword::{Crossword, Direction, Variable},
        domain::Domains,
        parse::parse_structure,
    };

    const WORDS0: [&str; 10] = [
        "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    ];

    fn small_crossword() -> Crossword {
        let structure = parse_structure("#___#\n#_##_\n#_##_\n#_##_\n#____\n").unwrap();
        Crossword::new(structure, WORDS0.iter().copied()).unwrap()
    }

    fn id(c: &Crossword, row: usize, col: usize, direction: Direction, length: usize) -> usize {
        c.variable_id(&Variable::new(row, col, direction, length))
            .unwrap()
    }

    fn sorted(domains: &Domains, c: &Crossword, var: usize) -> Vec<String> {
        let mut words: Vec<String> = domains.words(c, var).map(String::from).collect();
        words.sort();
        words
    }

    #[test]
    fn node_consistency_filters_by_length() {
        let c = small_crossword();
        let mut domains = Domains::full(&c);
        enforce_node_consistency(&c, &mut domains);

        assert_eq!(
            vec!["EIGHT", "SEVEN", "THREE"],
            sorted(&domains, &c, id(&c, 0, 1, Direction::Down, 5))
        );
        assert_eq!(
            vec!["ONE", "SIX", "TEN", "TWO"],
            sorted(&domains, &c, id(&c, 0, 1, Direction::Across, 3))
        );
        assert_eq!(
            vec!["FIVE", "FOUR", "NINE"],
            sorted(&domains, &c, id(&c, 1, 4, Direction::Down, 4))
        );
        assert_eq!(
            vec!["FIVE", "FOUR", "NINE"],
            sorted(&domains, &c, id(&c, 4, 1, Direction::Across, 4))
        );
    }

    #[test]
    fn node_consistency_is_idempotent() {
        let c = small_crossword();
        let mut domains = Domains::full(&c);
        enforce_node_consistency(&c, &mut domains);
        let once: Vec<Vec<usize>> = (0..c.variable_count())
            .map(|v| domains.get(v).to_vec())
            .collect();

        assert_eq!(0, enforce_node_consistency(&c, &mut domains));
        let twice: Vec<Vec<usize>> = (0..c.variable_count())
            .map(|v| domains.get(v).to_vec())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn revise_removes_unsupported_words() {
        let c = small_crossword();
        let mut domains = Domains::full(&c);
        enforce_node_consistency(&c, &mut domains);
        let down = id(&c, 0, 1, Direction::Down, 5);
        let across = id(&c, 0, 1, Direction::Across, 3);

        assert!(revise(&c, &mut domains, down, across));
        assert_eq!(vec!["SEVEN", "THREE"], sorted(&domains, &c, down));

        assert!(!revise(&c, &mut domains, down, across));
        assert_eq!(vec!["SEVEN", "THREE"], sorted(&domains, &c, down));
    }

    #[test]
    fn revise_without_overlap_changes_nothing() {
        let c = small_crossword();
        let mut domains = Domains::full(&c);
        enforce_node_consistency(&c, &mut domains);
        let across = id(&c, 0, 1, Direction::Across, 3);
        let right = id(&c, 1, 4, Direction::Down, 4);

        assert!(!revise(&c, &mut domains, across, right));
        assert_eq!(4, domains.len(across));
    }

    #[test]
    fn ac3_reaches_a_fixed_point() {
        let c = small_crossword();
        let mut domains = Domains::full(&c);
        enforce_node_consistency(&c, &mut domains);

        assert!(ac3(&c, &mut domains, None));
        for (x, y) in all_arcs(&c) {
            assert!(!revise(&c, &mut domains, x, y));
        }
        assert_eq!(
            vec!["SEVEN"],
            sorted(&domains, &c, id(&c, 0, 1, Direction::Down, 5))
        );
        assert_eq!(
            vec!["NINE"],
            sorted(&domains, &c, id(&c, 4, 1, Direction::Across, 4))
        );
    }

    #[test]
    fn ac3_detects_wipeout() {
        let c = small_crossword();
        let mut domains = Domains::full(&c);
        enforce_node_consistency(&c, &mut domains);
        let down = id(&c, 0, 1, Direction::Down, 5);
        let seven = c.word_id("SEVEN").unwrap();
        domains.restrict(down, |w| w != seven);

        assert!(!ac3(&c, &mut domains, None));
    }

    #[test]
    fn ac3_with_empty_arc_list_does_nothing() {
        let c = small_crossword();
        let mut domains = Domains::full(&c);
        enforce_node_consistency(&c, &mut domains);

        assert!(ac3(&c, &mut domains, Some(vec![])));
        assert_eq!(3, domains.len(id(&c, 0, 1, Direction::Down, 5)));
    }

    #[test]
    fn all_arcs_covers_both_directions() {
        let c = small_crossword();
        let arcs = all_arcs(&c);
        assert_eq!(6, arcs.len());
        for &(x, y) in &arcs {
            assert!(arcs.contains(&(y, x)));
            assert!(c.overlap(x, y).is_some());
        }
    }
}
