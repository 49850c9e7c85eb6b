use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    input::{DeviceId, PlanRequest},
    quantity::Cost,
    solver::Plan,
    timeline::{STEP_LENGTH, TimeStep},
};

/// The output document: hour → active devices plus the cost breakdown.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub schedule: BTreeMap<TimeStep, Vec<DeviceId>>,

    #[serde(rename = "consumedEnergy")]
    pub consumed_energy: ConsumedEnergy,
}

#[derive(Debug, Serialize)]
pub struct ConsumedEnergy {
    pub value: Cost,
    pub devices: BTreeMap<DeviceId, Cost>,
}

impl PlanReport {
    pub fn build(plan: &Plan, request: &PlanRequest) -> Self {
        let mut schedule = BTreeMap::new();
        let mut devices: BTreeMap<DeviceId, Cost> = BTreeMap::new();
        for (hour, state) in plan.schedule.steps() {
            if let Some(rate) = plan.timeline.rate_at(hour) {
                for &index in &state.active {
                    let device = &request.devices[index];
                    *devices.entry(device.id.clone()).or_default() +=
                        device.power * STEP_LENGTH * rate;
                }
            }
            schedule.insert(
                hour,
                state.active.iter().map(|&index| request.devices[index].id.clone()).collect(),
            );
        }
        Self { schedule, consumed_energy: ConsumedEnergy { value: plan.cost, devices } }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        input::{DeviceSpec, RateInterval},
        period::Periods,
        quantity::{Hours, KilowattHourRate, Watts},
        solver::Solver,
    };

    fn plan_report() -> (Plan, PlanRequest) {
        let request = PlanRequest {
            rates: vec![RateInterval { from: 0, to: 24, value: KilowattHourRate(1.0) }],
            devices: vec![
                DeviceSpec {
                    id: DeviceId::from("fridge"),
                    name: "Fridge".to_owned(),
                    power: Watts(100.0),
                    duration: Hours(24.0),
                    mode: None,
                },
                DeviceSpec {
                    id: DeviceId::from("kettle"),
                    name: "Kettle".to_owned(),
                    power: Watts(2000.0),
                    duration: Hours(1.0),
                    mode: None,
                },
            ],
            max_power: Some(Watts(3000.0)),
        };
        let plan =
            Solver::builder().request(&request).periods(&Periods::default()).build().solve().unwrap();
        (plan, request)
    }

    #[test]
    fn test_per_device_costs_sum_to_total() {
        let (plan, request) = plan_report();
        let report = PlanReport::build(&plan, &request);
        let total: Cost = report.consumed_energy.devices.values().copied().sum();
        assert_abs_diff_eq!(total.0, report.consumed_energy.value.0, epsilon = 1e-9);
        let devices = &report.consumed_energy.devices;
        assert_abs_diff_eq!(devices[&DeviceId::from("fridge")].0, 2.4, epsilon = 1e-9);
        assert_abs_diff_eq!(devices[&DeviceId::from("kettle")].0, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_json_shape() {
        let (plan, request) = plan_report();
        let report = PlanReport::build(&plan, &request);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["schedule"]["0"], json!(["fridge", "kettle"]));
        assert_eq!(value["schedule"]["1"], json!(["fridge"]));
        assert_abs_diff_eq!(value["consumedEnergy"]["value"].as_f64().unwrap(), 4.4, epsilon = 1e-9);
        assert_abs_diff_eq!(
            value["consumedEnergy"]["devices"]["kettle"].as_f64().unwrap(),
            2.0,
            epsilon = 1e-9
        );
    }
}
