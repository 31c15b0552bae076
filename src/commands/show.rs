use anyhow::{anyhow, Result};

use crate::atlas::{project_trend, Selection};
use crate::cli::{Cli, ShowArgs};

use super::open_atlas;

pub fn run(cli: &Cli, args: &ShowArgs) -> Result<()> {
    let atlas = open_atlas(args.dataset.as_deref(), cli.verbose)?;

    let name = match atlas.select(Some(&args.block)) {
        Selection::AllBlocks => {
            println!(
                "Block {:?} not found. Use `riskatlas blocks` to list names.",
                args.block,
            );
            return Ok(());
        }
        Selection::Block(name) => name,
    };

    let record = atlas
        .record(&name)
        .ok_or_else(|| anyhow!("[show] Selected block vanished: {name:?}"))?;

    println!("{name}");
    println!("  {:<20}{}", "risk category:", record.risk_category.as_str());
    print_metric("compound risk:", record.compound_score, 2);
    print_metric("flood pressure:", record.flood_risk_score, 2);
    print_metric("groundwater stress:", record.gw_stress_score, 2);
    print_metric("degradation rate:", record.degradation_rate, 3);

    match record.compound_score.zip(record.degradation_rate) {
        Some((score, rate)) => {
            println!("  projected trend:");
            for (year, value) in project_trend(score, rate, args.year) {
                println!("    {year}  {value:.2}");
            }
        }
        None => println!("  {:<20}unavailable", "projected trend:"),
    }

    Ok(())
}

fn print_metric(label: &str, value: Option<f64>, digits: usize) {
    match value {
        Some(value) => println!("  {label:<20}{value:.digits$}"),
        None => println!("  {label:<20}unavailable"),
    }
}
