use chrono::Utc;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{OrganizerError, Result};
use crate::models::{MethodologyKind, ReferenceData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(OrganizerError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Renders the data set in the requested format
pub fn render(data: &ReferenceData, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Markdown => Ok(render_markdown(data)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        ExportFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// Writes the data set to `output_path`
pub fn export(data: &ReferenceData, format: ExportFormat, output_path: &Path) -> Result<()> {
    let content = render(data, format)?;
    fs::write(output_path, content).map_err(|e| OrganizerError::io(output_path, e))?;

    log::info!(
        "Exported {} phases, {} roles and {} non-functional requirements to {}",
        data.development.phases.len() + data.testing.phases.len(),
        data.roles.len(),
        data.non_functional.len(),
        output_path.display()
    );
    Ok(())
}

pub fn export_markdown(data: &ReferenceData, output_path: &Path) -> Result<()> {
    export(data, ExportFormat::Markdown, output_path)
}

pub fn export_json(data: &ReferenceData, output_path: &Path) -> Result<()> {
    export(data, ExportFormat::Json, output_path)
}

pub fn export_yaml(data: &ReferenceData, output_path: &Path) -> Result<()> {
    export(data, ExportFormat::Yaml, output_path)
}

/// Markdown document covering both lifecycles, the comparison, roles and
/// non-functional requirements
pub fn render_markdown(data: &ReferenceData) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", data.title));
    if !data.subtitle.is_empty() {
        output.push_str(&format!("{}\n\n", data.subtitle));
    }
    output.push_str(&format!(
        "_Generated {}_\n\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));

    for kind in MethodologyKind::all() {
        let methodology = data.methodology(kind);
        output.push_str(&format!("## {} - {}\n\n", methodology.name, methodology.subtitle));
        output.push_str(&format!("{}\n\n", methodology.definition));

        for (i, phase) in methodology.phases.iter().enumerate() {
            output.push_str(&format!("### {}. {}\n\n", i + 1, phase.title));
            output.push_str(&format!("{}\n\n", phase.description));
            if let Some(related) = &phase.related_phase {
                output.push_str(&format!(
                    "**Fase relacionada ({}):** {}\n\n",
                    kind.counterpart(),
                    related
                ));
            }
            if let Some(use_case) = &phase.use_case {
                output.push_str(&format!("**Caso de uso:** {}\n\n", use_case));
            }
        }
    }

    output.push_str("## Comparación SDLC vs STLC\n\n");
    output.push_str("| Fase SDLC | Actividades Desarrollo | Fase STLC | Actividades Pruebas |\n");
    output.push_str("|---|---|---|---|\n");
    for row in data.comparison_rows() {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&row.development.title),
            escape_cell(&row.development.description),
            escape_cell(row.testing.title()),
            escape_cell(row.testing.description()),
        ));
    }
    output.push('\n');

    if !data.roles.is_empty() {
        output.push_str("## Roles y requisitos\n\n");
        for role in &data.roles {
            output.push_str(&format!("### {}\n\n", role.name));
            output.push_str(&format!("{}\n\n", role.description));
            for req in &role.requirements {
                output.push_str(&format!("- **{}** {}: {}\n", req.id, req.title, req.description));
                for test in &req.test_cases {
                    output.push_str(&format!("  - [ ] {}\n", test));
                }
            }
            output.push('\n');
        }
    }

    if !data.non_functional.is_empty() {
        output.push_str("## Requisitos no funcionales\n\n");
        for nfr in &data.non_functional {
            output.push_str(&format!(
                "- **{}** ({}) {}: {} _Métrica: {}_\n",
                nfr.id, nfr.category, nfr.title, nfr.description, nfr.metric
            ));
            for test in &nfr.test_cases {
                output.push_str(&format!("  - [ ] {}\n", test));
            }
        }
    }

    output
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_format() {
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_markdown_contains_sections() {
        let data = ReferenceData::builtin();
        let md = render_markdown(&data);

        assert!(md.starts_with("# Organizador SDLC & STLC"));
        assert!(md.contains("## SDLC - Software Development"));
        assert!(md.contains("## STLC - Software Testing"));
        assert!(md.contains("### 7. Mantenimiento"));
        assert!(md.contains("**Fase relacionada (STLC):** Pruebas de regresión"));
        assert!(md.contains("| Mantenimiento |"));
        assert!(md.contains("- **RF-02** Reservar habitación online"));
        assert!(md.contains("**RNF-03** (Disponibilidad)"));
    }

    #[test]
    fn test_markdown_comparison_fallback() {
        let mut data = ReferenceData::builtin();
        data.testing.phases.pop();
        let md = render_markdown(&data);
        assert!(md.contains("| Mantenimiento |"));
        assert!(md.contains("| Pruebas de regresión | Pruebas de regresión para asegurar"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b\nc"), "a\\|b c");
    }

    #[test]
    fn test_export_files() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let data = ReferenceData::builtin();

        let json_path = dir.path().join("organizer.json");
        export_json(&data, &json_path)?;
        let yaml_path = dir.path().join("organizer.yaml");
        export_yaml(&data, &yaml_path)?;
        let md_path = dir.path().join("organizer.md");
        export_markdown(&data, &md_path)?;

        assert!(fs::read_to_string(&md_path)?.contains("## Roles y requisitos"));
        assert_eq!(ReferenceData::load(&json_path)?, data);
        assert_eq!(ReferenceData::load(&yaml_path)?, data);
        Ok(())
    }
}
