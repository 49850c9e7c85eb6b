use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Duration in hours. The schedule granularity is fixed at one hour,
/// so fractional durations occupy a whole number of steps, rounded up.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Sub,
)]
pub struct Hours(pub f64);

impl Hours {
    pub const ONE: Self = Self(1.0);
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} h", self.0)
    }
}

impl Debug for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}h", self.0)
    }
}
