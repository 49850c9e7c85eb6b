use std::{fs, ops::Range, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    timeline::{STEPS_PER_DAY, TimeStep},
};

/// Named period a device may be pinned to via its `mode` attribute.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Day,
    Night,
}

/// Half-open range of hours; `to` may be 24 to close out the day.
///
/// A window restricts only the hours a device may *start* at. A running
/// device is free to overrun the window's end, so a long cycle started late
/// in its period spills into the next one.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Window {
    pub from: TimeStep,
    pub to: TimeStep,
}

impl Window {
    pub const FULL_DAY: Self = Self { from: 0, to: STEPS_PER_DAY };

    /// Candidate start hours, in ascending order.
    pub const fn starts(self) -> Range<TimeStep> {
        self.from..self.to
    }

    fn validate(self) -> Result {
        ensure!(
            self.from < self.to && self.to <= STEPS_PER_DAY,
            "period window {}..{} is out of range",
            self.from,
            self.to,
        );
        Ok(())
    }
}

/// Process-wide period windows. These are configuration, not input data:
/// the built-in defaults apply unless overridden by a TOML file.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Periods {
    pub day: Vec<Window>,
    pub night: Vec<Window>,
}

impl Default for Periods {
    fn default() -> Self {
        Self {
            day: vec![Window { from: 7, to: 21 }],
            night: vec![Window { from: 21, to: 24 }, Window { from: 0, to: 7 }],
        }
    }
}

impl Periods {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read period windows from `{}`", path.display()))?;
        let periods: Self = toml::from_str(&contents)
            .with_context(|| format!("malformed period windows in `{}`", path.display()))?;
        Ok(periods)
    }

    pub fn validate(&self) -> Result {
        ensure!(!self.day.is_empty(), "day period time frames are not set");
        ensure!(!self.night.is_empty(), "night period time frames are not set");
        for window in self.day.iter().chain(&self.night) {
            window.validate()?;
        }
        Ok(())
    }

    pub fn windows(&self, mode: Mode) -> &[Window] {
        match mode {
            Mode::Day => &self.day,
            Mode::Night => &self.night,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let periods = Periods::default();
        periods.validate().unwrap();
        assert_eq!(periods.windows(Mode::Day), [Window { from: 7, to: 21 }]);
        assert_eq!(
            periods.windows(Mode::Night),
            [Window { from: 21, to: 24 }, Window { from: 0, to: 7 }],
        );
    }

    #[test]
    fn test_mode_from_json() {
        assert_eq!(serde_json::from_str::<Mode>(r#""day""#).unwrap(), Mode::Day);
        assert_eq!(serde_json::from_str::<Mode>(r#""night""#).unwrap(), Mode::Night);
        assert!(serde_json::from_str::<Mode>(r#""dusk""#).is_err());
    }

    #[test]
    fn test_from_toml() {
        let periods: Periods = toml::from_str(
            r"
            day = [{ from = 8, to = 20 }]
            night = [{ from = 20, to = 24 }, { from = 0, to = 8 }]
            ",
        )
        .unwrap();
        periods.validate().unwrap();
        assert_eq!(periods.windows(Mode::Day), [Window { from: 8, to: 20 }]);
    }

    #[test]
    fn test_out_of_range_window() {
        let periods = Periods { day: vec![Window { from: 7, to: 25 }], ..Periods::default() };
        assert!(periods.validate().is_err());
    }

    #[test]
    fn test_empty_period() {
        let periods = Periods { night: Vec::new(), ..Periods::default() };
        let error = periods.validate().unwrap_err();
        assert!(error.to_string().contains("night period"));
    }
}
