use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use flexscroll_core::scenario::{Scenario, ScenarioRunner, StepReport};
use flexscroll_core::Direction;

pub async fn run(file: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(file)
        .with_context(|| format!("loading scenario {}", file.display()))?;

    let runner = ScenarioRunner::new(
        &scenario,
        Arc::new(|direction: Direction| info!(%direction, "Load callback")),
    )?;

    let reports = runner.run(&scenario).await;

    for report in &reports {
        if json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            println!("{}", format_report(report));
        }
    }

    if !json {
        let loads = reports.iter().filter(|r| r.load.is_some()).count();
        println!("\n{} steps, {} loads", reports.len(), loads);
    }

    Ok(())
}

fn format_report(report: &StepReport) -> String {
    let half = report
        .half_extent
        .map(|h| format!("{:.1}", h))
        .unwrap_or_else(|| "-".to_string());
    let load = report
        .load
        .map(|d| format!("  load {}", d))
        .unwrap_or_default();
    let loading = if report.loading { "  [loading]" } else { "" };

    format!(
        "#{:<3} {:<40} offset {:>8.1}  anchor {:>8.1}  half {:>8}{}{}",
        report.index,
        format!("{:?}", report.step),
        report.offset,
        report.addition_offset,
        half,
        load,
        loading,
    )
}
