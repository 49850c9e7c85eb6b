pub mod cost;
pub mod energy;
pub mod power;
pub mod rate;
pub mod time;

pub use self::{
    cost::Cost,
    energy::KilowattHours,
    power::Watts,
    rate::KilowattHourRate,
    time::Hours,
};
