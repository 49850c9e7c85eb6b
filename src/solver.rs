pub mod schedule;
mod search;

use bon::Builder;

use self::{schedule::Schedule, search::Search};
use crate::{
    input::PlanRequest,
    period::{Periods, Window},
    prelude::*,
    quantity::{Cost, Watts},
    timeline::{RateTimeline, TimeStep},
};

/// The cheapest feasible schedule found for the request.
#[derive(Debug)]
pub struct Plan {
    pub schedule: Schedule,
    pub cost: Cost,
    pub timeline: RateTimeline,
}

/// A schedulable device prepared for the search: its index in the request's
/// device list, occupancy in whole steps, and allowed start windows.
struct Candidate {
    index: usize,
    power: Watts,
    steps: TimeStep,
    windows: Vec<Window>,
}

#[derive(Builder)]
pub struct Solver<'a> {
    request: &'a PlanRequest,
    periods: &'a Periods,

    /// Upper bound on examined placements. The search space grows
    /// exponentially with the device count, so an unbounded run is not safe
    /// on arbitrary input.
    #[builder(default = 10_000_000)]
    search_budget: u64,
}

impl Solver<'_> {
    /// Finds the cheapest device-to-hour assignment under the power ceiling.
    #[instrument(skip_all)]
    pub fn solve(self) -> Result<Plan> {
        let ceiling = self.request.validate()?;
        self.periods.validate()?;

        let timeline = RateTimeline::from_intervals(&self.request.rates);
        let (always_on, candidates) = self.classify();

        let mut seed = Schedule::seed(&timeline, &always_on);
        for (hour, state) in seed.steps() {
            ensure!(
                state.used_power <= ceiling,
                "always-on devices alone draw {} at hour {hour}, above the {} ceiling",
                state.used_power,
                ceiling,
            );
        }

        let mut search = Search::new(&timeline, ceiling, &candidates, self.search_budget);
        search.descend(&mut seed, 0);
        if search.exhausted {
            if search.best.is_some() {
                warn!(
                    budget = self.search_budget,
                    "search budget exhausted, keeping the best schedule found so far"
                );
            } else {
                bail!("search budget exhausted before any feasible schedule was found");
            }
        }
        let (cost, schedule) = search
            .best
            .context("no feasible schedule: the devices cannot fit under the power ceiling")?;
        debug!(%cost, leaves = search.leaves, "search finished");
        Ok(Plan { schedule, cost, timeline })
    }

    /// Splits the devices into always-on and schedulable ones. A device with
    /// a duration outside both groups is excluded with a warning and the run
    /// continues without it.
    fn classify(&self) -> (Vec<(usize, Watts)>, Vec<Candidate>) {
        const FULL_DAY: &[Window] = &[Window::FULL_DAY];

        let mut always_on = Vec::new();
        let mut candidates = Vec::new();
        for (index, device) in self.request.devices.iter().enumerate() {
            if device.duration.0 >= 24.0 {
                always_on.push((index, device.power));
            } else if device.duration.0 > 0.0 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let steps = device.duration.0.ceil() as TimeStep;
                let windows = device
                    .mode
                    .map_or(FULL_DAY, |mode| self.periods.windows(mode))
                    .to_vec();
                candidates.push(Candidate { index, power: device.power, steps, windows });
            } else {
                warn!(
                    device = %device.name,
                    "excluded from scheduling: invalid working cycle duration"
                );
            }
        }
        (always_on, candidates)
    }
}
