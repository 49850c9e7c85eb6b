use crate::{input::RateInterval, quantity::{Hours, KilowattHourRate}};

/// Hour of the day in `[0, 24)`.
pub type TimeStep = u8;

pub const STEPS_PER_DAY: TimeStep = 24;

/// The fixed schedule granularity.
pub const STEP_LENGTH: Hours = Hours::ONE;

/// Per-hour tariff lookup over the 24-hour cycle.
///
/// Hours not covered by any rate interval carry no price, and nothing may be
/// scheduled at them.
#[derive(Clone, Debug)]
pub struct RateTimeline {
    rates: [Option<KilowattHourRate>; STEPS_PER_DAY as usize],
}

impl RateTimeline {
    /// Stamps every hour covered by an interval with its price.
    ///
    /// An interval with `to ≤ from` wraps past midnight. When intervals
    /// overlap, the later one in input order wins.
    pub fn from_intervals(intervals: &[RateInterval]) -> Self {
        let mut rates = [None; STEPS_PER_DAY as usize];
        for interval in intervals {
            let from = if interval.from > interval.to {
                i16::from(interval.from) - i16::from(STEPS_PER_DAY)
            } else {
                i16::from(interval.from)
            };
            for hour in from..i16::from(interval.to) {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let hour = hour.rem_euclid(i16::from(STEPS_PER_DAY)) as usize;
                rates[hour] = Some(interval.value);
            }
        }
        Self { rates }
    }

    pub fn rate_at(&self, hour: TimeStep) -> Option<KilowattHourRate> {
        self.rates.get(usize::from(hour)).copied().flatten()
    }

    pub fn covered_hours(&self) -> impl Iterator<Item = TimeStep> + '_ {
        (0..STEPS_PER_DAY).filter(|hour| self.rates[usize::from(*hour)].is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(from: TimeStep, to: TimeStep, value: f64) -> RateInterval {
        RateInterval { from, to, value: KilowattHourRate(value) }
    }

    #[test]
    fn test_plain_interval() {
        let timeline = RateTimeline::from_intervals(&[interval(7, 10, 2.5)]);
        assert_eq!(timeline.rate_at(6), None);
        assert_eq!(timeline.rate_at(7), Some(KilowattHourRate(2.5)));
        assert_eq!(timeline.rate_at(9), Some(KilowattHourRate(2.5)));
        assert_eq!(timeline.rate_at(10), None);
    }

    #[test]
    fn test_wrap_around() {
        let timeline = RateTimeline::from_intervals(&[interval(22, 2, 1.5)]);
        let covered: Vec<_> = timeline.covered_hours().collect();
        assert_eq!(covered, [0, 1, 22, 23]);
        for hour in covered {
            assert_eq!(timeline.rate_at(hour), Some(KilowattHourRate(1.5)));
        }
    }

    #[test]
    fn test_last_write_wins() {
        let timeline =
            RateTimeline::from_intervals(&[interval(0, 24, 1.0), interval(10, 12, 3.0)]);
        assert_eq!(timeline.rate_at(9), Some(KilowattHourRate(1.0)));
        assert_eq!(timeline.rate_at(10), Some(KilowattHourRate(3.0)));
        assert_eq!(timeline.rate_at(11), Some(KilowattHourRate(3.0)));
        assert_eq!(timeline.rate_at(12), Some(KilowattHourRate(1.0)));
    }

    #[test]
    fn test_full_day_coverage() {
        let timeline = RateTimeline::from_intervals(&[interval(0, 24, 1.0)]);
        assert_eq!(timeline.covered_hours().count(), 24);
    }

    #[test]
    fn test_empty_interval() {
        let timeline = RateTimeline::from_intervals(&[interval(5, 5, 1.0)]);
        assert_eq!(timeline.covered_hours().count(), 0);
    }
}
