use ordered_float::OrderedFloat;

use super::{Candidate, schedule::Schedule};
use crate::{
    prelude::*,
    quantity::{Cost, Watts},
    timeline::RateTimeline,
};

/// Depth-first backtracking over the candidate devices, one device per level,
/// with windows and start hours enumerated left to right.
///
/// The traversal order is load-bearing: of two equal-cost schedules the first
/// one discovered wins, which keeps the output deterministic. Branches are
/// explored by placing a device, recursing, and undoing the placement, so
/// sibling branches never observe each other's mutations.
pub(super) struct Search<'a> {
    timeline: &'a RateTimeline,
    ceiling: Watts,
    candidates: &'a [Candidate],
    budget: u64,
    examined: u64,
    pub(super) leaves: u64,
    pub(super) exhausted: bool,
    pub(super) best: Option<(Cost, Schedule)>,
}

impl<'a> Search<'a> {
    pub(super) const fn new(
        timeline: &'a RateTimeline,
        ceiling: Watts,
        candidates: &'a [Candidate],
        budget: u64,
    ) -> Self {
        Self {
            timeline,
            ceiling,
            candidates,
            budget,
            examined: 0,
            leaves: 0,
            exhausted: false,
            best: None,
        }
    }

    pub(super) fn descend(&mut self, schedule: &mut Schedule, index: usize) {
        let Some(candidate) = self.candidates.get(index) else {
            self.evaluate(schedule);
            return;
        };
        for window in &candidate.windows {
            for start in window.starts() {
                if self.exhausted {
                    return;
                }
                self.examined += 1;
                if self.examined > self.budget {
                    self.exhausted = true;
                    return;
                }
                if schedule.try_place(
                    candidate.index,
                    candidate.power,
                    start,
                    candidate.steps,
                    self.ceiling,
                ) {
                    self.descend(schedule, index + 1);
                    schedule.unplace(candidate.index, candidate.power, start, candidate.steps);
                }
            }
        }
    }

    /// Keeps the strictly cheaper schedule; on a tie the earlier one stays.
    fn evaluate(&mut self, schedule: &Schedule) {
        self.leaves += 1;
        let cost = schedule.cost(self.timeline);
        let is_better =
            self.best.as_ref().is_none_or(|(best, _)| OrderedFloat(cost.0) < OrderedFloat(best.0));
        if is_better {
            trace!(%cost, "new best schedule");
            self.best = Some((cost, schedule.clone()));
        }
    }
}
