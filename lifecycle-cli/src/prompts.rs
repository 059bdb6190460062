use anyhow::Result;
use colored::Colorize;
use inquire::{InquireError, Select};
use std::fmt;

use lifecycle_core::{MethodologyKind, ReferenceData};

use crate::{accent, print_phase_detail};

/// Top-level choices of the interactive browser
#[derive(Debug, Clone, Copy)]
enum MainChoice {
    Methodology(MethodologyKind),
    Roles,
    NonFunctional,
    Quit,
}

impl fmt::Display for MainChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainChoice::Methodology(MethodologyKind::Development) => write!(f, "Fases SDLC"),
            MainChoice::Methodology(MethodologyKind::Testing) => write!(f, "Fases STLC"),
            MainChoice::Roles => write!(f, "Roles y requisitos"),
            MainChoice::NonFunctional => write!(f, "Requisitos no funcionales"),
            MainChoice::Quit => write!(f, "Salir"),
        }
    }
}

/// A labelled index, so Select can show titles and hand back positions
struct Indexed {
    index: usize,
    label: String,
}

impl fmt::Display for Indexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

pub(crate) const NO_PHASES: &str = "No phases defined.";
pub(crate) const NO_ROLES: &str = "No roles defined.";
pub(crate) const NO_REQUIREMENTS: &str = "No requirements defined.";
pub(crate) const NO_NON_FUNCTIONAL: &str = "No non-functional requirements defined.";

/// `None` (after telling the user) when there is nothing to choose from;
/// `Select` rejects empty option lists
fn non_empty<T>(options: Vec<T>, empty_message: &str) -> Option<Vec<T>> {
    if options.is_empty() {
        println!("{}", empty_message.yellow());
        return None;
    }
    Some(options)
}

fn indexed<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<Indexed> {
    labels
        .enumerate()
        .map(|(index, label)| Indexed {
            index,
            label: label.to_string(),
        })
        .collect()
}

/// Interactive loop; Esc goes back one level, Ctrl-C leaves
pub fn browse(data: &ReferenceData) -> Result<()> {
    loop {
        let choices = vec![
            MainChoice::Methodology(MethodologyKind::Development),
            MainChoice::Methodology(MethodologyKind::Testing),
            MainChoice::Roles,
            MainChoice::NonFunctional,
            MainChoice::Quit,
        ];
        let choice = match Select::new(&data.title, choices).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                return Ok(())
            }
            Err(e) => return Err(e.into()),
        };

        match choice {
            MainChoice::Methodology(kind) => browse_phases(data, kind)?,
            MainChoice::Roles => browse_roles(data)?,
            MainChoice::NonFunctional => browse_non_functional(data)?,
            MainChoice::Quit => return Ok(()),
        }
    }
}

fn browse_phases(data: &ReferenceData, kind: MethodologyKind) -> Result<()> {
    let methodology = data.methodology(kind);
    let Some(options) = non_empty(
        indexed(methodology.phases.iter().map(|p| p.title.as_str())),
        NO_PHASES,
    ) else {
        return Ok(());
    };
    let Some(selected) = Select::new("Fase:", options).prompt_skippable()? else {
        return Ok(());
    };
    let Ok(phase) = data.phase(kind, selected.index) else {
        return Ok(());
    };

    println!();
    print_phase_detail(methodology, phase);
    if let Some((_, related)) = data.related_phase(kind, selected.index) {
        let counterpart = data.methodology(kind.counterpart());
        println!(
            "{} {}",
            "→".dimmed(),
            accent(counterpart, &related.title).bold()
        );
    }
    if let Some(use_case) = &phase.use_case {
        println!("{} {}", "Caso de Uso:".yellow().bold(), use_case);
    }
    println!();
    Ok(())
}

fn browse_roles(data: &ReferenceData) -> Result<()> {
    let Some(options) = non_empty(indexed(data.roles.iter().map(|r| r.name.as_str())), NO_ROLES)
    else {
        return Ok(());
    };
    let Some(role) = Select::new("Rol:", options).prompt_skippable()? else {
        return Ok(());
    };
    let Some(role) = data.roles.get(role.index) else {
        return Ok(());
    };

    let labels: Vec<String> = role
        .requirements
        .iter()
        .map(|r| format!("{} {}", r.id, r.title))
        .collect();
    let Some(options) = non_empty(indexed(labels.iter().map(|l| l.as_str())), NO_REQUIREMENTS)
    else {
        return Ok(());
    };
    let Some(selected) = Select::new("Requisito:", options).prompt_skippable()? else {
        return Ok(());
    };
    if let Some(req) = role.requirements.get(selected.index) {
        println!();
        println!("{} {}", req.id.cyan(), req.title.bold());
        println!("{}", req.description);
        for test in &req.test_cases {
            println!("  - {}", test);
        }
        println!();
    }
    Ok(())
}

fn browse_non_functional(data: &ReferenceData) -> Result<()> {
    let labels: Vec<String> = data
        .non_functional
        .iter()
        .map(|n| format!("{} {} ({})", n.id, n.title, n.category))
        .collect();
    let Some(options) =
        non_empty(indexed(labels.iter().map(|l| l.as_str())), NO_NON_FUNCTIONAL)
    else {
        return Ok(());
    };
    let Some(selected) = Select::new("Requisito no funcional:", options).prompt_skippable()?
    else {
        return Ok(());
    };
    if let Some(nfr) = data.non_functional.get(selected.index) {
        println!();
        println!("{} {}", nfr.id.cyan(), nfr.title.bold());
        println!("{}", nfr.description);
        println!("{} {}", "Métrica:".dimmed(), nfr.metric);
        for test in &nfr.test_cases {
            println!("  - {}", test);
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_choices_are_not_prompted() {
        assert!(non_empty(indexed(std::iter::empty()), NO_ROLES).is_none());

        let data = ReferenceData::builtin();
        let mut role = data.roles[0].clone();
        role.requirements.clear();
        let labels: Vec<String> = role.requirements.iter().map(|r| r.id.clone()).collect();
        assert!(non_empty(indexed(labels.iter().map(|l| l.as_str())), NO_REQUIREMENTS).is_none());
    }

    #[test]
    fn test_choices_keep_their_indices() {
        let data = ReferenceData::builtin();
        let options = non_empty(
            indexed(data.roles.iter().map(|r| r.name.as_str())),
            NO_ROLES,
        )
        .unwrap();
        assert_eq!(options.len(), data.roles.len());
        assert_eq!(options[1].index, 1);
        assert_eq!(options[1].to_string(), "Recepcionista");
    }
}
