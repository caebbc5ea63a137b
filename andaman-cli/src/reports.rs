use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use andaman_planner::{CostBreakdown, Day, Item, Itinerary, ReferenceData, TripSelection};

/// Everything a report renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport<'a> {
    pub selection: &'a TripSelection,
    pub itinerary: &'a Itinerary,
    pub costs: &'a CostBreakdown,
}

fn rupees(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

fn day_heading(index: usize, day: &Day) -> String {
    match day.date {
        Some(date) => format!("Day {} ({}) · {}", index + 1, date.format("%a %d %b %Y"), day.island),
        None => format!("Day {} · {}", index + 1, day.island),
    }
}

fn item_line(item: &Item) -> String {
    match item {
        Item::Location(visit) => format!("{} ({}h)", visit.name, visit.duration_hrs),
        Item::Ferry(leg) | Item::Boat(leg) => match &leg.time {
            Some(time) => format!("{} [{time}]", leg.name),
            None => leg.name.clone(),
        },
        other => other.name().to_string(),
    }
}

fn cost_rows(costs: &CostBreakdown) -> [(&'static str, i64); 5] {
    [
        ("Hotels", costs.hotels_total),
        ("Add-ons", costs.addons_total),
        ("Ferries", costs.ferry_total),
        ("Boats", costs.boat_total),
        ("Ground transport", costs.ground_total),
    ]
}

pub fn generate_console_report(out: &mut dyn Write, report: &PlanReport<'_>) -> Result<()> {
    writeln!(out, "{}", "🏝️  Andaman Trip Plan".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    for (index, day) in report.itinerary.days.iter().enumerate() {
        writeln!(
            out,
            "{}  {}",
            day_heading(index, day).bold(),
            day.transport.to_string().dimmed()
        )?;
        if day.items.is_empty() {
            writeln!(out, "   • {}", "free day".italic())?;
        }
        for item in &day.items {
            let line = item_line(item);
            let line = match item {
                Item::Ferry(_) => line.blue(),
                Item::Boat(_) => line.yellow(),
                Item::Arrival { .. } | Item::Departure { .. } => line.green(),
                _ => line.normal(),
            };
            writeln!(out, "   • {line}")?;
        }
    }

    let costs = report.costs;
    writeln!(out)?;
    writeln!(out, "{}", "💰 Cost Breakdown".bright_yellow().bold())?;
    writeln!(out, "{}", "=================".yellow())?;
    for (island, nights) in &costs.nights_by_island {
        writeln!(out, "Nights at {island}: {nights}")?;
    }
    writeln!(
        out,
        "Legs: {} ferry, {} boat ({} class)",
        costs.ferry_legs, costs.boat_legs, report.selection.ferry_class
    )?;
    for (label, amount) in cost_rows(costs) {
        writeln!(out, "{label:18} {:>12}", rupees(amount))?;
    }
    writeln!(
        out,
        "{:18} {:>12}",
        "Total".bold(),
        rupees(costs.grand_total).green().bold()
    )?;
    writeln!(out, "Travellers: {}", costs.pax)?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, report: &PlanReport<'_>) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &PlanReport<'_>) -> Result<()> {
    writeln!(out, "# Andaman Trip Plan\n")?;
    writeln!(out, "## Itinerary\n")?;
    for (index, day) in report.itinerary.days.iter().enumerate() {
        writeln!(out, "### {}\n", day_heading(index, day))?;
        writeln!(out, "_Transport: {}_\n", day.transport)?;
        for item in &day.items {
            writeln!(out, "- {}", item_line(item))?;
        }
        writeln!(out)?;
    }

    let costs = report.costs;
    writeln!(out, "## Costs\n")?;
    writeln!(out, "| Item | Amount |")?;
    writeln!(out, "| --- | ---: |")?;
    for (label, amount) in cost_rows(costs) {
        writeln!(out, "| {label} | {} |", rupees(amount))?;
    }
    writeln!(out, "| **Total** | **{}** |", rupees(costs.grand_total))?;
    writeln!(out)?;
    writeln!(
        out,
        "- **Legs**: {} ferry, {} boat",
        costs.ferry_legs, costs.boat_legs
    )?;
    writeln!(out, "- **Travellers**: {}", costs.pax)?;
    Ok(())
}

/// Selectable locations grouped by island, for `--list-locations`.
pub fn write_location_list(out: &mut dyn Write, reference: &ReferenceData) -> Result<()> {
    writeln!(out, "Available locations:")?;
    for island in reference.islands() {
        let locations = reference.filter_locations(Some(&island), None);
        if locations.is_empty() {
            continue;
        }
        writeln!(out, "{island}")?;
        for location in locations {
            let moods: Vec<&str> = location.moods.iter().map(|mood| mood.label()).collect();
            writeln!(
                out,
                "  {:25} - {} ({}h; {})",
                location.id,
                location.name,
                location.duration_hrs,
                moods.join(", ")
            )?;
        }
    }
    Ok(())
}
