use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{OrganizerError, Result};

/// Number of description characters shown on a collapsed phase card
pub const PHASE_SUMMARY_CHARS: usize = 100;

/// Which of the two lifecycles a record belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MethodologyKind {
    /// Software development lifecycle (SDLC)
    Development,
    /// Software testing lifecycle (STLC)
    Testing,
}

impl MethodologyKind {
    pub fn all() -> [MethodologyKind; 2] {
        [MethodologyKind::Development, MethodologyKind::Testing]
    }

    /// The other lifecycle, where related phases are looked up
    pub fn counterpart(self) -> MethodologyKind {
        match self {
            MethodologyKind::Development => MethodologyKind::Testing,
            MethodologyKind::Testing => MethodologyKind::Development,
        }
    }

    pub fn acronym(self) -> &'static str {
        match self {
            MethodologyKind::Development => "SDLC",
            MethodologyKind::Testing => "STLC",
        }
    }
}

impl fmt::Display for MethodologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.acronym())
    }
}

impl FromStr for MethodologyKind {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sdlc" | "development" | "dev" | "desarrollo" => Ok(MethodologyKind::Development),
            "stlc" | "testing" | "test" | "pruebas" => Ok(MethodologyKind::Testing),
            _ => Err(OrganizerError::UnknownMethodology(s.to_string())),
        }
    }
}

/// One named stage of a lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    pub title: String,
    pub description: String,
    /// Icon class name (Bootstrap Icons naming, e.g. `bi bi-tools`)
    pub icon: String,
    /// Title of the related phase in the counterpart methodology
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
}

impl Phase {
    pub fn new(title: &str, description: &str, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            related_phase: None,
            use_case: None,
        }
    }

    pub fn related_to(mut self, title: &str, use_case: &str) -> Self {
        self.related_phase = Some(title.to_string());
        self.use_case = Some(use_case.to_string());
        self
    }

    /// Description cut to `max_chars` characters, with an ellipsis when cut
    pub fn summary(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let cut: String = self.description.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

/// An ordered lifecycle with its presentation attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Methodology {
    pub kind: MethodologyKind,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    /// Accent color as `#rrggbb`
    pub color: String,
    /// Background tint as `#rrggbb`
    pub light_color: String,
    pub definition: String,
    /// Short badges shown under the definition
    #[serde(default)]
    pub highlights: Vec<String>,
    pub phases: Vec<Phase>,
}

impl Methodology {
    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Indices of every phase whose title equals `title`
    pub fn find_phases(&self, title: &str) -> Vec<usize> {
        self.phases
            .iter()
            .enumerate()
            .filter(|(_, p)| p.title == title)
            .map(|(i, _)| i)
            .collect()
    }
}

/// A functional requirement with its suggested test cases
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requirement {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub test_cases: Vec<String>,
}

/// A user role of the reservation system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub key: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NonFunctionalRequirement {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    /// Measurable acceptance criterion
    pub metric: String,
    #[serde(default)]
    pub test_cases: Vec<String>,
}

/// One line of the side-by-side SDLC/STLC comparison
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow<'a> {
    pub development: &'a Phase,
    pub testing: ComparisonCell<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonCell<'a> {
    Phase(&'a Phase),
    /// No testing phase at this position; rendered as regression testing
    Fallback,
}

impl<'a> ComparisonCell<'a> {
    pub const FALLBACK_TITLE: &'static str = "Pruebas de regresión";
    pub const FALLBACK_ICON: &'static str = "bi bi-circle";
    pub const FALLBACK_DESCRIPTION: &'static str = "Pruebas de regresión para asegurar que cambios no rompan funcionalidad existente del sistema de reservas.";

    pub fn title(&self) -> &str {
        match self {
            ComparisonCell::Phase(p) => &p.title,
            ComparisonCell::Fallback => Self::FALLBACK_TITLE,
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            ComparisonCell::Phase(p) => &p.icon,
            ComparisonCell::Fallback => Self::FALLBACK_ICON,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ComparisonCell::Phase(p) => &p.description,
            ComparisonCell::Fallback => Self::FALLBACK_DESCRIPTION,
        }
    }
}

/// The complete, read-only data set displayed by the organizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceData {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub development: Methodology,
    pub testing: Methodology,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub non_functional: Vec<NonFunctionalRequirement>,
}

impl ReferenceData {
    /// Loads an alternative data set from a YAML or JSON file and validates it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = Self::read(&path)?;
        data.validate()?;
        log::info!("Loaded reference data from {}", path.as_ref().display());
        Ok(data)
    }

    /// Parses a YAML or JSON data file (chosen by extension) without validating it
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| OrganizerError::io(path, e))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            other => Err(OrganizerError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn methodology(&self, kind: MethodologyKind) -> &Methodology {
        match kind {
            MethodologyKind::Development => &self.development,
            MethodologyKind::Testing => &self.testing,
        }
    }

    /// Looks a methodology up by acronym, kind name or display name
    pub fn methodology_by_name(&self, name: &str) -> Result<&Methodology> {
        if let Ok(kind) = name.parse::<MethodologyKind>() {
            return Ok(self.methodology(kind));
        }
        MethodologyKind::all()
            .into_iter()
            .map(|k| self.methodology(k))
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| OrganizerError::UnknownMethodology(name.to_string()))
    }

    pub fn phase(&self, kind: MethodologyKind, index: usize) -> Result<&Phase> {
        let methodology = self.methodology(kind);
        methodology
            .phase(index)
            .ok_or_else(|| OrganizerError::PhaseOutOfRange {
                methodology: methodology.name.clone(),
                index,
                len: methodology.phases.len(),
            })
    }

    /// Resolves the related phase of `kind[index]` in the counterpart methodology.
    ///
    /// Returns `None` when the phase does not exist, declares no relation, or
    /// the relation does not resolve to exactly one phase.
    pub fn related_phase(&self, kind: MethodologyKind, index: usize) -> Option<(usize, &Phase)> {
        let title = self.methodology(kind).phase(index)?.related_phase.as_deref()?;
        let counterpart = self.methodology(kind.counterpart());
        match counterpart.find_phases(title).as_slice() {
            [only] => counterpart.phase(*only).map(|p| (*only, p)),
            matches => {
                log::debug!(
                    "Related phase '{}' of {}[{}] matched {} phases",
                    title,
                    kind,
                    index,
                    matches.len()
                );
                None
            }
        }
    }

    /// Development phases paired with testing phases by position
    pub fn comparison_rows(&self) -> Vec<ComparisonRow<'_>> {
        self.development
            .phases
            .iter()
            .enumerate()
            .map(|(i, phase)| ComparisonRow {
                development: phase,
                testing: self
                    .testing
                    .phase(i)
                    .map(ComparisonCell::Phase)
                    .unwrap_or(ComparisonCell::Fallback),
            })
            .collect()
    }

    pub fn role(&self, key: &str) -> Result<&Role> {
        self.roles
            .iter()
            .find(|r| r.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| OrganizerError::UnknownRole(key.to_string()))
    }

    /// Finds a functional requirement across all roles
    pub fn requirement(&self, id: &str) -> Result<(&Role, &Requirement)> {
        self.roles
            .iter()
            .flat_map(|role| role.requirements.iter().map(move |req| (role, req)))
            .find(|(_, req)| req.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| OrganizerError::UnknownRequirement(id.to_string()))
    }

    pub fn non_functional(&self, id: &str) -> Result<&NonFunctionalRequirement> {
        self.non_functional
            .iter()
            .find(|n| n.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| OrganizerError::UnknownRequirement(id.to_string()))
    }

    /// Suggested test cases for a functional or non-functional requirement
    pub fn test_cases_for(&self, id: &str) -> Result<&[String]> {
        if let Ok((_, req)) = self.requirement(id) {
            return Ok(&req.test_cases);
        }
        self.non_functional(id).map(|n| n.test_cases.as_slice())
    }

    pub fn requirement_count(&self) -> usize {
        self.roles.iter().map(|r| r.requirements.len()).sum()
    }
}
