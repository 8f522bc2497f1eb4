use crate::{
    consistency::{ac3_with_stats, enforce_node_consistency, Arc},
    crossword::{Crossword, VarId},
    domain::Domains,
    error::{Error, Result},
    order::{order_domain_values, select_unassigned_variable},
};
use log::{debug, info, trace};
use std::time::Instant;

use super::{consistent, Assignment, FillStats, Filler, SolverConfig};

/// Depth-first search over partial assignments, keeping the domains arc
/// consistent after every choice.
#[derive(Clone, Debug, Default)]
pub struct BacktrackFiller {
    config: SolverConfig,
    stats: FillStats,
}

impl BacktrackFiller {
    pub fn new() -> BacktrackFiller {
        BacktrackFiller::default()
    }

    pub fn with_config(config: SolverConfig) -> BacktrackFiller {
        BacktrackFiller {
            config,
            stats: FillStats::default(),
        }
    }

    /// Counters from the most recent fill.
    pub fn stats(&self) -> &FillStats {
        &self.stats
    }
}

impl Filler for BacktrackFiller {
    fn fill(&mut self, crossword: &Crossword) -> Result<Option<Assignment>> {
        let start = Instant::now();
        let mut search = Search {
            crossword,
            config: &self.config,
            domains: Domains::full(crossword),
            assignment: Assignment::new(crossword.variable_count()),
            stats: FillStats::default(),
            start,
            deadline: self
                .config
                .timeout
                .and_then(|timeout| start.checked_add(timeout)),
        };

        let result = search.solve();
        search.stats.elapsed = start.elapsed();
        self.stats = search.stats;

        match &result {
            Ok(Some(_)) => info!(
                target: "search",
                "filled {} slots in {} steps ({} backtracks)",
                crossword.variable_count(),
                self.stats.steps,
                self.stats.backtracks
            ),
            Ok(None) => info!(
                target: "search",
                "no fill exists; gave up after {} steps",
                self.stats.steps
            ),
            Err(e) => debug!(target: "search", "search aborted: {}", e),
        }
        result
    }
}

struct Search<'s> {
    crossword: &'s Crossword,
    config: &'s SolverConfig,
    domains: Domains,
    assignment: Assignment,
    stats: FillStats,
    start: Instant,
    deadline: Option<Instant>,
}

impl<'s> Search<'s> {
    fn solve(&mut self) -> Result<Option<Assignment>> {
        enforce_node_consistency(self.crossword, &mut self.domains);
        if let Some(var) = (0..self.crossword.variable_count()).find(|&v| self.domains.is_empty(v)) {
            debug!(
                target: "search",
                "no word fits {}",
                self.crossword.variable(var)
            );
            return Ok(None);
        }
        if !ac3_with_stats(
            self.crossword,
            &mut self.domains,
            None,
            &mut self.stats.propagation,
        ) {
            debug!(target: "search", "initial propagation emptied a domain");
            return Ok(None);
        }

        if self.backtrack()? {
            Ok(Some(self.assignment.clone()))
        } else {
            Ok(None)
        }
    }

    fn step(&mut self) -> Result<()> {
        self.stats.steps += 1;
        let steps = self.stats.steps;

        if self.config.progress_interval > 0 && steps % self.config.progress_interval == 0 {
            info!(
                target: "search",
                "{} steps, {} of {} slots assigned, throughput {:.2} steps/ms",
                steps,
                self.assignment.len(),
                self.crossword.variable_count(),
                steps as f64 / self.start.elapsed().as_millis().max(1) as f64
            );
        }

        if self.config.max_steps.map_or(false, |max| steps > max) {
            return Err(Error::BudgetExhausted { steps: steps - 1 });
        }
        if self.deadline.map_or(false, |deadline| Instant::now() >= deadline) {
            return Err(Error::BudgetExhausted { steps });
        }
        Ok(())
    }

    /// Extends the assignment in place. On success the complete assignment is
    /// left in `self.assignment`; on failure both the assignment and the
    /// domains are back to how they were on entry.
    fn backtrack(&mut self) -> Result<bool> {
        self.step()?;

        if self.assignment.is_complete(self.crossword) {
            return Ok(true);
        }

        let var = select_unassigned_variable(self.crossword, &self.domains, &self.assignment)
            .ok_or_else(|| Error::internal("incomplete assignment has no unassigned variable"))?;

        for word in order_domain_values(self.crossword, &self.domains, var, &self.assignment) {
            self.stats.values_tried += 1;
            self.assignment.insert(var, word);

            if consistent(self.crossword, &self.assignment) {
                trace!(
                    target: "search",
                    "trying {} = {}",
                    self.crossword.variable(var),
                    self.crossword.word(word)
                );
                let snapshot = self.domains.snapshot();
                if !self.domains.assign_singleton(var, word) {
                    return Err(Error::internal(format!(
                        "{} is not a candidate for {}",
                        self.crossword.word(word),
                        self.crossword.variable(var)
                    )));
                }

                let arcs: Vec<Arc> = self
                    .crossword
                    .neighbors(var)
                    .iter()
                    .filter(|&&neighbor| !self.assignment.is_assigned(neighbor))
                    .map(|&neighbor| (neighbor, var))
                    .collect();
                let neighbors: Vec<_> = arcs.iter().map(|&(neighbor, _)| neighbor).collect();

                if ac3_with_stats(
                    self.crossword,
                    &mut self.domains,
                    Some(arcs),
                    &mut self.stats.propagation,
                ) {
                    let inferred = self.infer(&neighbors);
                    if (inferred.is_empty() || consistent(self.crossword, &self.assignment))
                        && self.backtrack()?
                    {
                        return Ok(true);
                    }
                    for neighbor in inferred {
                        self.assignment.remove(neighbor);
                    }
                }
                self.domains.restore(snapshot);
            }

            self.assignment.remove(var);
        }

        self.stats.backtracks += 1;
        Ok(false)
    }

    /// Assigns every listed variable whose domain is down to one word.
    fn infer(&mut self, candidates: &[VarId]) -> Vec<VarId> {
        if !self.config.infer_singletons {
            return vec![];
        }
        let mut inferred = vec![];
        for &neighbor in candidates {
            if let [only] = self.domains.get(neighbor) {
                self.assignment.insert(neighbor, *only);
                inferred.push(neighbor);
            }
        }
        self.stats.inferences += inferred.len() as u64;
        inferred
    }
}
