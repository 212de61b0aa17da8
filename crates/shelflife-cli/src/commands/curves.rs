//! Curves command: capacity retention across the temperature range.

use clap::Args;

use super::ScenarioArgs;

#[derive(Args, Debug)]
pub struct CurvesArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,
    /// Print the chart payload as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CurvesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = args.scenario.scenario()?;
    let evaluation = scenario.evaluate()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation.chart)?);
        return Ok(());
    }

    println!("{}", evaluation.chart.render_ascii_chart());

    println!("Summary:");
    println!(
        "  Initial capacity: {:.0}%",
        scenario.params.initial_capacity_percent()
    );
    println!(
        "  Base rate: {:.1}%/month at {}°C",
        scenario.params.base_rate_per_month() * 100.0,
        scenario.params.base_temp_celsius()
    );
    println!("  Rate policy: {}", scenario.policy);
    for series in &evaluation.chart.series {
        println!("  {}", series.label);
    }

    Ok(())
}
