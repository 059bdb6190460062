mod cli;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use colored::{ColoredString, Colorize};
use std::path::{Path, PathBuf};

use lifecycle_core::{
    check, export, ExportFormat, Methodology, MethodologyKind, OverlayPositioner, Phase,
    ReferenceData, Settings, PHASE_SUMMARY_CHARS,
};

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = Settings::load();

    // `check` reports problems itself instead of failing on load
    let data = match &cli.command {
        Command::Check => load_unvalidated(&settings, cli.data.as_deref())?,
        _ => settings
            .load_data(cli.data.as_deref())
            .context("Failed to load reference data")?,
    };
    log::debug!(
        "Loaded \"{}\" with {} roles",
        data.title,
        data.roles.len()
    );

    match &cli.command {
        Command::Overview => show_overview(&data),
        Command::Phases { methodology } => {
            let methodology = data.methodology_by_name(methodology)?;
            list_phases(methodology);
        }
        Command::Show {
            methodology,
            number,
        } => {
            show_phase(&data, methodology, *number)?;
        }
        Command::Compare => show_comparison(&data),
        Command::Roles { key } => match key {
            Some(key) => show_role(&data, key)?,
            None => list_roles(&data),
        },
        Command::Tests { id } => show_tests(&data, id)?,
        Command::Nfr => list_non_functional(&data),
        Command::Check => run_check(&data)?,
        Command::Export { format, output } => {
            handle_export_command(&data, format, output.as_ref())?;
        }
        Command::Place {
            trigger,
            container,
            viewport,
            side,
            overlay_height,
        } => {
            let positioner = OverlayPositioner::new(settings.placement);
            let mut position = positioner.place(*trigger, *container, *viewport, *side);
            if let Some(height) = overlay_height {
                position = positioner.correct(position, *container, *height, *viewport);
            }
            println!("{}: {}", "side".bold(), position.side);
            println!("{}: {:.1}", "top".bold(), position.top);
            println!("{}: {:.1}", "left".bold(), position.left);
            println!("{}: {:.1}", "arrow offset".bold(), position.arrow_offset());
        }
        Command::Browse => prompts::browse(&data)?,
    }

    Ok(())
}

fn load_unvalidated(settings: &Settings, explicit: Option<&Path>) -> Result<ReferenceData> {
    match settings.resolve_data_path(explicit) {
        Some(path) => ReferenceData::read(&path)
            .with_context(|| format!("Failed to read data file: {:?}", path)),
        None => Ok(ReferenceData::builtin()),
    }
}

pub(crate) fn accent(methodology: &Methodology, text: &str) -> ColoredString {
    match methodology.kind {
        MethodologyKind::Development => text.blue(),
        MethodologyKind::Testing => text.green(),
    }
}

fn show_overview(data: &ReferenceData) {
    println!("{}", data.title.bold());
    if !data.subtitle.is_empty() {
        println!("{}", data.subtitle.dimmed());
    }
    println!();

    for kind in MethodologyKind::all() {
        let methodology = data.methodology(kind);
        println!(
            "{} {}",
            accent(methodology, &methodology.name).bold(),
            methodology.subtitle.dimmed()
        );
        println!("  {}", methodology.definition);
        println!(
            "  {}",
            methodology
                .highlights
                .iter()
                .map(|h| format!("✓ {}", h))
                .collect::<Vec<_>>()
                .join("  ")
        );
        println!("  {} phases", methodology.phases.len());
        println!();
    }
}

fn list_phases(methodology: &Methodology) {
    println!(
        "{}",
        accent(
            methodology,
            &format!("Fases del {} para Sistema de Reservas", methodology.name)
        )
        .bold()
    );
    println!("{}", "-".repeat(80));
    for (i, phase) in methodology.phases.iter().enumerate() {
        println!("{:>2}. {}", i + 1, accent(methodology, &phase.title).bold());
        println!("    {}", phase.summary(PHASE_SUMMARY_CHARS).dimmed());
    }
}

fn show_phase(data: &ReferenceData, methodology: &str, number: usize) -> Result<()> {
    let methodology = data.methodology_by_name(methodology)?;
    let kind = methodology.kind;
    let index = number
        .checked_sub(1)
        .context("Phase numbers start at 1")?;
    let phase = data.phase(kind, index)?;

    print_phase_detail(methodology, phase);

    match data.related_phase(kind, index) {
        Some((related_index, related)) => {
            let counterpart = data.methodology(kind.counterpart());
            println!();
            println!(
                "  {} {}",
                "↓ Relación".dimmed(),
                format!("{}-{}", methodology.name, counterpart.name).dimmed()
            );
            println!(
                "{} {}",
                accent(counterpart, &format!("{}.", related_index + 1)),
                accent(counterpart, &related.title).bold()
            );
        }
        None => {
            if let Some(title) = &phase.related_phase {
                println!("{} {}", "Related phase not found:".yellow(), title);
            }
        }
    }

    if let Some(use_case) = &phase.use_case {
        println!();
        println!("{}", "Caso de Uso".yellow().bold());
        println!("{}", use_case);
    }

    Ok(())
}

pub(crate) fn print_phase_detail(methodology: &Methodology, phase: &Phase) {
    println!(
        "{} {}",
        accent(methodology, &methodology.name).bold(),
        accent(methodology, &phase.title).bold()
    );
    println!("{}", phase.description);
}

fn show_comparison(data: &ReferenceData) {
    println!(
        "{:<28} | {:<36}",
        "Fase SDLC".blue().bold(),
        "Fase STLC".green().bold()
    );
    println!("{}", "-".repeat(70));
    for row in data.comparison_rows() {
        println!("{:<28} | {:<36}", row.development.title, row.testing.title());
    }
}

fn list_roles(data: &ReferenceData) {
    if data.roles.is_empty() {
        println!("{}", prompts::NO_ROLES.yellow());
        return;
    }
    println!("{:<15} | {:<15} | {:<5} | {}", "Key", "Role", "Reqs", "Description");
    println!("{}", "-".repeat(100));
    for role in &data.roles {
        println!(
            "{:<15} | {:<15} | {:<5} | {}",
            role.key.cyan(),
            role.name,
            role.requirements.len(),
            role.description
        );
    }
}

fn show_role(data: &ReferenceData, key: &str) -> Result<()> {
    let role = data.role(key)?;
    println!("{} ({})", role.name.bold(), role.key.cyan());
    println!("{}", role.description);
    println!();
    for req in &role.requirements {
        println!("{} {}", req.id.cyan(), req.title.bold());
        println!("   {}", req.description.dimmed());
    }
    Ok(())
}

fn show_tests(data: &ReferenceData, id: &str) -> Result<()> {
    let tests = data.test_cases_for(id)?;
    let title = match data.requirement(id) {
        Ok((_, req)) => req.title.clone(),
        Err(_) => data.non_functional(id)?.title.clone(),
    };
    println!("{} {}", id.to_uppercase().cyan(), title.bold());
    for (i, test) in tests.iter().enumerate() {
        println!("  {}. {}", i + 1, test);
    }
    Ok(())
}

fn list_non_functional(data: &ReferenceData) {
    if data.non_functional.is_empty() {
        println!("{}", prompts::NO_NON_FUNCTIONAL.yellow());
        return;
    }
    for nfr in &data.non_functional {
        println!(
            "{} [{}] {}",
            nfr.id.cyan(),
            nfr.category.magenta(),
            nfr.title.bold()
        );
        println!("   {}", nfr.description);
        println!("   {} {}", "Métrica:".dimmed(), nfr.metric);
    }
}

fn run_check(data: &ReferenceData) -> Result<()> {
    let issues = check(data);
    for issue in &issues {
        if issue.is_fatal() {
            println!("{} {}", "✗".red(), issue);
        } else {
            println!("{} {}", "!".yellow(), issue);
        }
    }

    let fatal = issues.iter().filter(|i| i.is_fatal()).count();
    if fatal > 0 {
        anyhow::bail!("{} integrity issue(s) found", fatal);
    }

    println!(
        "{} {} phases, {} roles, {} requirements, {} non-functional requirements",
        "OK".green().bold(),
        data.development.phases.len() + data.testing.phases.len(),
        data.roles.len(),
        data.requirement_count(),
        data.non_functional.len()
    );
    Ok(())
}

fn handle_export_command(data: &ReferenceData, format: &str, output: Option<&PathBuf>) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let output = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(format!("organizer.{}", format.extension())));

    export::export(data, format, &output)
        .with_context(|| format!("Failed to export to {:?}", output))?;

    println!("Exported to {}: {}", format.extension(), output.display());
    Ok(())
}
