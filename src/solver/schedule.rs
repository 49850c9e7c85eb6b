use crate::{
    quantity::{Cost, Watts},
    timeline::{RateTimeline, STEP_LENGTH, STEPS_PER_DAY, TimeStep},
};

/// Devices active within one hour and their combined draw.
///
/// Invariant: `used_power` always equals the sum of the active devices'
/// power. Devices are referred to by their index in the request's device
/// list; placement pushes onto `active` and removal pops, so the list stays
/// in placement order (always-on devices first).
#[derive(Clone, Debug)]
pub struct StepState {
    pub active: Vec<usize>,
    pub used_power: Watts,
}

/// Hour → step state for every hour the tariff timeline covers.
///
/// Uncovered hours carry no state: nothing may run when no price is defined.
#[derive(Clone, Debug)]
pub struct Schedule {
    steps: [Option<StepState>; STEPS_PER_DAY as usize],
}

impl Schedule {
    /// Seeds a step state for every covered hour with the always-on devices.
    pub fn seed(timeline: &RateTimeline, always_on: &[(usize, Watts)]) -> Self {
        let mut steps = [const { None }; STEPS_PER_DAY as usize];
        for hour in timeline.covered_hours() {
            steps[usize::from(hour)] = Some(StepState {
                active: always_on.iter().map(|(index, _)| *index).collect(),
                used_power: always_on.iter().map(|(_, power)| *power).sum(),
            });
        }
        Self { steps }
    }

    pub fn step(&self, hour: TimeStep) -> Option<&StepState> {
        self.steps.get(usize::from(hour)).and_then(Option::as_ref)
    }

    /// Covered hours and their states, in hour order.
    pub fn steps(&self) -> impl Iterator<Item = (TimeStep, &StepState)> {
        self.steps.iter().enumerate().filter_map(|(hour, state)| {
            #[allow(clippy::cast_possible_truncation)]
            state.as_ref().map(|state| (hour as TimeStep, state))
        })
    }

    /// Occupies `steps` consecutive hours starting at `start`, wrapping past
    /// midnight. Returns `false` and leaves the schedule untouched when a
    /// touched hour is uncovered by the tariff or would exceed the ceiling.
    pub fn try_place(
        &mut self,
        device: usize,
        power: Watts,
        start: TimeStep,
        steps: TimeStep,
        ceiling: Watts,
    ) -> bool {
        for offset in 0..steps {
            let hour = (start + offset) % STEPS_PER_DAY;
            let Some(state) = self.steps[usize::from(hour)].as_mut() else {
                self.unplace(device, power, start, offset);
                return false;
            };
            state.active.push(device);
            state.used_power += power;
            if state.used_power > ceiling {
                self.unplace(device, power, start, offset + 1);
                return false;
            }
        }
        true
    }

    /// Reverts a placement. Placements unwind in strict LIFO order, so the
    /// device is the most recent entry of every touched hour.
    pub fn unplace(&mut self, device: usize, power: Watts, start: TimeStep, steps: TimeStep) {
        for offset in 0..steps {
            let hour = (start + offset) % STEPS_PER_DAY;
            if let Some(state) = self.steps[usize::from(hour)].as_mut() {
                let popped = state.active.pop();
                debug_assert_eq!(popped, Some(device));
                state.used_power -= power;
            }
        }
    }

    /// Total tariff cost of the schedule over one day.
    pub fn cost(&self, timeline: &RateTimeline) -> Cost {
        self.steps()
            .filter_map(|(hour, state)| {
                timeline.rate_at(hour).map(|rate| state.used_power * STEP_LENGTH * rate)
            })
            .sum()
    }
}
