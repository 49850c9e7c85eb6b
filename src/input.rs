use std::{
    collections::HashSet,
    fmt::{self, Formatter},
};

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{
    period::Mode,
    prelude::*,
    quantity::{Hours, KilowattHourRate, Watts},
    timeline::{STEPS_PER_DAY, TimeStep},
};

/// The input document: tariff intervals, devices, and the power ceiling.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub rates: Vec<RateInterval>,

    #[serde(default)]
    pub devices: Vec<DeviceSpec>,

    #[serde(default, rename = "maxPower")]
    pub max_power: Option<Watts>,
}

impl PlanRequest {
    /// Rejects a malformed document before any computation starts,
    /// with a distinct reason for each failure. Returns the power ceiling.
    pub fn validate(&self) -> Result<Watts> {
        ensure!(!self.rates.is_empty(), "missing data about electricity rates");
        ensure!(!self.devices.is_empty(), "missing data about devices");
        let ceiling = self.max_power.context("max power consumption is not set")?;
        ensure!(ceiling > Watts::ZERO, "max power consumption must be positive");
        for rate in &self.rates {
            rate.validate()?;
        }
        let mut seen = HashSet::new();
        for device in &self.devices {
            ensure!(
                device.power > Watts::ZERO,
                "device `{}` must draw positive power",
                device.name,
            );
            ensure!(seen.insert(&device.id), "duplicate device id `{}`", device.id);
        }
        Ok(ceiling)
    }
}

/// One tariff interval. `to ≤ from` means the interval wraps past midnight.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RateInterval {
    pub from: TimeStep,
    pub to: TimeStep,
    pub value: KilowattHourRate,
}

impl RateInterval {
    fn validate(self) -> Result {
        ensure!(
            self.from < STEPS_PER_DAY && (1..=STEPS_PER_DAY).contains(&self.to),
            "rate interval {}..{} is out of range",
            self.from,
            self.to,
        );
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeviceSpec {
    pub id: DeviceId,
    pub name: String,
    pub power: Watts,

    /// Working cycle length. At least 24 hours means the device is always on;
    /// anything outside `(0, 24)` otherwise excludes the device.
    #[serde(default)]
    pub duration: Hours,

    #[serde(default)]
    pub mode: Option<Mode>,
}

/// Unique device identifier. The documents in the wild carry both string and
/// numeric ids, so both are accepted and kept as text.
#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, derive_more::Display,
)]
pub struct DeviceId(pub String);

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl<'de> Deserialize<'de> for DeviceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = DeviceId;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a string or numeric device id")
            }

            fn visit_str<E: de::Error>(self, id: &str) -> Result<Self::Value, E> {
                Ok(DeviceId(id.to_owned()))
            }

            fn visit_u64<E: de::Error>(self, id: u64) -> Result<Self::Value, E> {
                Ok(DeviceId(id.to_string()))
            }

            fn visit_i64<E: de::Error>(self, id: i64) -> Result<Self::Value, E> {
                Ok(DeviceId(id.to_string()))
            }

            fn visit_f64<E: de::Error>(self, id: f64) -> Result<Self::Value, E> {
                Ok(DeviceId(id.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
