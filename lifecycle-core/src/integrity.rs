use std::collections::HashMap;
use std::fmt;

use crate::error::{OrganizerError, Result};
use crate::models::{MethodologyKind, ReferenceData};

/// A data-authoring problem found by [`check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// `related_phase` names no phase of the counterpart methodology
    UnresolvedRelation {
        methodology: MethodologyKind,
        phase: String,
        related: String,
    },
    /// `related_phase` matches several phases of the counterpart methodology
    AmbiguousRelation {
        methodology: MethodologyKind,
        phase: String,
        related: String,
        matches: usize,
    },
    PhaseCountMismatch {
        development: usize,
        testing: usize,
    },
    EmptyMethodology(MethodologyKind),
    DuplicatePhaseTitle {
        methodology: MethodologyKind,
        title: String,
    },
    DuplicateRoleKey(String),
    /// Requirement ids are shared between functional and non-functional lists
    DuplicateRequirementId(String),
    MissingTestCases(String),
    /// Color attribute that is not `#rrggbb`; rendered with a neutral color
    InvalidColor {
        methodology: MethodologyKind,
        value: String,
    },
}

impl IntegrityIssue {
    /// Whether the issue makes the data unusable.
    ///
    /// Phase count mismatches fall back to regression-testing rows in the
    /// comparison and invalid colors to a neutral color, so both only warn.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            IntegrityIssue::PhaseCountMismatch { .. } | IntegrityIssue::InvalidColor { .. }
        )
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::UnresolvedRelation {
                methodology,
                phase,
                related,
            } => write!(
                f,
                "{} phase '{}' relates to '{}', which does not exist in {}",
                methodology,
                phase,
                related,
                methodology.counterpart()
            ),
            IntegrityIssue::AmbiguousRelation {
                methodology,
                phase,
                related,
                matches,
            } => write!(
                f,
                "{} phase '{}' relates to '{}', which matches {} phases in {}",
                methodology,
                phase,
                related,
                matches,
                methodology.counterpart()
            ),
            IntegrityIssue::PhaseCountMismatch {
                development,
                testing,
            } => write!(
                f,
                "SDLC has {} phases but STLC has {}",
                development, testing
            ),
            IntegrityIssue::EmptyMethodology(kind) => write!(f, "{} has no phases", kind),
            IntegrityIssue::DuplicatePhaseTitle { methodology, title } => {
                write!(f, "{} phase title '{}' is used more than once", methodology, title)
            }
            IntegrityIssue::DuplicateRoleKey(key) => {
                write!(f, "Role key '{}' is used more than once", key)
            }
            IntegrityIssue::DuplicateRequirementId(id) => {
                write!(f, "Requirement id '{}' is used more than once", id)
            }
            IntegrityIssue::MissingTestCases(id) => {
                write!(f, "Requirement '{}' has no suggested test cases", id)
            }
            IntegrityIssue::InvalidColor { methodology, value } => {
                write!(f, "{} color '{}' is not a #rrggbb value", methodology, value)
            }
        }
    }
}

/// Validates cross references and keys of a data set
pub fn check(data: &ReferenceData) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    for kind in MethodologyKind::all() {
        let methodology = data.methodology(kind);
        let counterpart = data.methodology(kind.counterpart());

        if methodology.phases.is_empty() {
            issues.push(IntegrityIssue::EmptyMethodology(kind));
        }

        for value in [&methodology.color, &methodology.light_color] {
            if !is_hex_color(value) {
                issues.push(IntegrityIssue::InvalidColor {
                    methodology: kind,
                    value: value.clone(),
                });
            }
        }

        for title in duplicates(methodology.phases.iter().map(|p| p.title.as_str())) {
            issues.push(IntegrityIssue::DuplicatePhaseTitle {
                methodology: kind,
                title,
            });
        }

        for phase in &methodology.phases {
            let Some(related) = phase.related_phase.as_deref() else {
                continue;
            };
            match counterpart.find_phases(related).len() {
                1 => {}
                0 => issues.push(IntegrityIssue::UnresolvedRelation {
                    methodology: kind,
                    phase: phase.title.clone(),
                    related: related.to_string(),
                }),
                matches => issues.push(IntegrityIssue::AmbiguousRelation {
                    methodology: kind,
                    phase: phase.title.clone(),
                    related: related.to_string(),
                    matches,
                }),
            }
        }
    }

    if data.development.phases.len() != data.testing.phases.len() {
        issues.push(IntegrityIssue::PhaseCountMismatch {
            development: data.development.phases.len(),
            testing: data.testing.phases.len(),
        });
    }

    for key in duplicates(data.roles.iter().map(|r| r.key.as_str())) {
        issues.push(IntegrityIssue::DuplicateRoleKey(key));
    }

    let functional = data
        .roles
        .iter()
        .flat_map(|r| r.requirements.iter().map(|req| (req.id.as_str(), req.test_cases.len())));
    let non_functional = data
        .non_functional
        .iter()
        .map(|n| (n.id.as_str(), n.test_cases.len()));
    let all: Vec<(&str, usize)> = functional.chain(non_functional).collect();

    for id in duplicates(all.iter().map(|(id, _)| *id)) {
        issues.push(IntegrityIssue::DuplicateRequirementId(id));
    }
    for (id, count) in &all {
        if *count == 0 {
            issues.push(IntegrityIssue::MissingTestCases(id.to_string()));
        }
    }

    issues
}

fn is_hex_color(value: &str) -> bool {
    let hex = value.trim().trim_start_matches('#');
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Values occurring more than once, in first-seen order
fn duplicates<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for value in values {
        let count = seen.entry(value).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(value.to_string());
        }
    }
    order
}

impl ReferenceData {
    /// Fails on fatal issues only; the rest are logged as warnings
    pub fn validate(&self) -> Result<()> {
        let (fatal, warnings): (Vec<_>, Vec<_>) =
            check(self).into_iter().partition(IntegrityIssue::is_fatal);
        for warning in &warnings {
            log::warn!("{}", warning);
        }
        if fatal.is_empty() {
            Ok(())
        } else {
            Err(OrganizerError::Integrity(fatal))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Phase;

    #[test]
    fn test_builtin_data_is_consistent() {
        let issues = check(&ReferenceData::builtin());
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_unresolved_relation() {
        let mut data = ReferenceData::builtin();
        data.development.phases[0].related_phase = Some("Análisis de reqs. de pruebas".into());

        let issues = check(&data);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            IntegrityIssue::UnresolvedRelation { methodology: MethodologyKind::Development, .. }
        ));
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_ambiguous_relation_and_duplicate_title() {
        let mut data = ReferenceData::builtin();
        let copy = data.testing.phases[1].clone();
        data.testing.phases.push(copy);

        let issues = check(&data);
        assert!(issues.contains(&IntegrityIssue::DuplicatePhaseTitle {
            methodology: MethodologyKind::Testing,
            title: "Planificación de pruebas".into(),
        }));
        assert!(issues.iter().any(|i| matches!(
            i,
            IntegrityIssue::AmbiguousRelation { matches: 2, .. }
        )));
        assert!(issues.contains(&IntegrityIssue::PhaseCountMismatch {
            development: 7,
            testing: 8,
        }));
    }

    #[test]
    fn test_phase_count_mismatch_only_warns() {
        let mut data = ReferenceData::builtin();
        data.testing.phases.pop();
        data.development.phases[6].related_phase = None;

        let issues = check(&data);
        assert_eq!(
            issues,
            vec![IntegrityIssue::PhaseCountMismatch {
                development: 7,
                testing: 6,
            }]
        );
        assert!(!issues[0].is_fatal());
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_invalid_color_only_warns() {
        let mut data = ReferenceData::builtin();
        data.development.color = "aé123".into();
        data.testing.light_color = "#12345".into();

        let issues = check(&data);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| matches!(i, IntegrityIssue::InvalidColor { .. })));
        assert!(issues.iter().all(|i| !i.is_fatal()));
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_phase_without_relation_is_fine() {
        let mut data = ReferenceData::builtin();
        data.development.phases[6].related_phase = None;
        data.testing.phases[6].related_phase = None;
        assert!(check(&data).is_empty());
    }

    #[test]
    fn test_empty_methodology() {
        let mut data = ReferenceData::builtin();
        data.testing.phases.clear();
        for phase in data.development.phases.iter_mut() {
            phase.related_phase = None;
        }
        let issues = check(&data);
        assert!(issues.contains(&IntegrityIssue::EmptyMethodology(MethodologyKind::Testing)));
    }

    #[test]
    fn test_duplicate_keys_and_missing_tests() {
        let mut data = ReferenceData::builtin();
        let role = data.roles[0].clone();
        data.roles.push(role);
        data.non_functional[0].test_cases.clear();

        let issues = check(&data);
        assert!(issues.contains(&IntegrityIssue::DuplicateRoleKey("huesped".into())));
        assert!(issues.contains(&IntegrityIssue::DuplicateRequirementId("RF-01".into())));
        assert!(issues.contains(&IntegrityIssue::MissingTestCases("RNF-01".into())));
    }

    #[test]
    fn test_issue_display() {
        let issue = IntegrityIssue::UnresolvedRelation {
            methodology: MethodologyKind::Testing,
            phase: Phase::new("X", "", "").title,
            related: "Y".into(),
        };
        assert_eq!(
            issue.to_string(),
            "STLC phase 'X' relates to 'Y', which does not exist in SDLC"
        );
    }
}
