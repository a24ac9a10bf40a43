//! Terminal demonstration of a configured automaton
//!
//! Loads settings from the YAML or JSON file named by `CA_SETTINGS`, or uses
//! the default Game of Life, and paints it into the terminal.

use anyhow::Result;
use cellular_automata::render::TerminalRenderer;
use cellular_automata::utils::ColorOutput;
use cellular_automata::{build_session, Settings};
use std::io::stdout;

fn main() -> Result<()> {
    env_logger::init();

    let mut settings = match std::env::var("CA_SETTINGS") {
        Ok(path) => Settings::from_file(&path)?,
        Err(_) => Settings::default(),
    };
    if settings.driver.max_ticks.is_none() {
        settings.driver.max_ticks = Some(200);
    }

    let mut session = build_session(&settings)?;
    let mut renderer = TerminalRenderer::new(stdout().lock());
    let report = match session.run(&mut renderer) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("\n{}", ColorOutput::error(&format!("{} stopped: {}", session.name, e)));
            return Err(e.into());
        }
    };

    let summary = format!(
        "{}: {} steps, {} cells changed",
        session.name, report.steps, report.changed_cells
    );
    println!("\n{}", ColorOutput::info(&summary));
    if report.skipped_ticks > 0 {
        println!("{}", ColorOutput::warning(&format!("{} ticks skipped", report.skipped_ticks)));
    }
    Ok(())
}
