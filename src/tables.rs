use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    input::PlanRequest,
    report::PlanReport,
    solver::Plan,
    timeline::STEP_LENGTH,
};

pub fn build_schedule_table(plan: &Plan, request: &PlanRequest) -> Table {
    #[allow(clippy::cast_precision_loss)]
    let average_rate = {
        let covered: Vec<_> =
            plan.timeline.covered_hours().filter_map(|hour| plan.timeline.rate_at(hour)).collect();
        covered.iter().map(|rate| rate.0).sum::<f64>() / covered.len() as f64
    };

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Hour", "Devices", "Load", "Rate", "Cost"]);
    for (hour, state) in plan.schedule.steps() {
        let Some(rate) = plan.timeline.rate_at(hour) else {
            continue;
        };
        let names =
            state.active.iter().map(|&index| request.devices[index].name.as_str()).join(", ");
        table.add_row(vec![
            Cell::new(format!("{hour:02}:00")),
            Cell::new(names),
            Cell::new(state.used_power).set_alignment(CellAlignment::Right),
            Cell::new(rate).fg(if rate.0 >= average_rate { Color::Red } else { Color::Green }),
            Cell::new(state.used_power * STEP_LENGTH * rate).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_charges_table(report: &PlanReport, request: &PlanRequest) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Device", "Cost"]);
    for (id, cost) in &report.consumed_energy.devices {
        let name = request
            .devices
            .iter()
            .find(|device| &device.id == id)
            .map_or_else(|| id.0.as_str(), |device| device.name.as_str());
        table.add_row(vec![
            Cell::new(name),
            Cell::new(cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(report.consumed_energy.value)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);
    table
}
