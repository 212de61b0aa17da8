//! Evaluate command: one temperature, sampled over the storage period.

use clap::Args;
use serde::Serialize;

use shelflife_core::chart::{marker_tooltip, series_label};
use shelflife_core::time_grid::months_to_hours;
use shelflife_core::ChargeEstimate;

use super::ScenarioArgs;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Storage temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub temp: f64,
    /// Print every Nth sample in the text table
    #[arg(long, default_value_t = 10)]
    pub every: usize,
    #[command(flatten)]
    pub scenario: ScenarioArgs,
    /// Print samples as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Sample {
    months: f64,
    hours: f64,
    capacity: f64,
}

#[derive(Serialize)]
struct Report {
    temperature: f64,
    rate: f64,
    label: String,
    samples: Vec<Sample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    charge: Option<ChargeEstimate>,
}

pub fn run(args: EvaluateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.every == 0 {
        return Err("--every must be at least 1".into());
    }

    let scenario = args.scenario.scenario()?;
    let (times, curve) = scenario.curve_at(args.temp)?;

    let charge = scenario.params.nominal_capacity_ah().map(|ah| {
        ChargeEstimate::from_capacity(
            ah,
            scenario.params.initial_capacity_percent(),
            curve.final_capacity(),
            times.total_hours(),
        )
    });

    let report = Report {
        temperature: curve.temperature,
        rate: curve.rate,
        label: series_label(&curve),
        samples: times
            .points()
            .iter()
            .zip(&curve.capacities)
            .map(|(&months, &capacity)| Sample {
                months,
                hours: months_to_hours(months),
                capacity,
            })
            .collect(),
        charge,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{}", report.label);
    println!("  k = {:.5} per month", report.rate);
    println!("{}", "─".repeat(40));
    println!("{:>10} {:>10} {:>12}", "Month", "Hour", "Capacity");

    let last = report.samples.len() - 1;
    for (i, sample) in report.samples.iter().enumerate() {
        if i % args.every == 0 || i == last {
            println!(
                "{:>10.2} {:>10.0} {:>11.2}%",
                sample.months, sample.hours, sample.capacity
            );
        }
    }
    println!("{}", "─".repeat(40));

    let end = &report.samples[last];
    println!(
        "{}",
        marker_tooltip(report.temperature, end.months, end.hours, end.capacity)
    );
    if let Some(charge) = report.charge {
        println!(
            "Remaining: {:.3} Ah (lost {:.3} Ah, mean self-discharge {:.3} mA)",
            charge.remaining_ah, charge.lost_ah, charge.mean_current_ma
        );
    }

    Ok(())
}
