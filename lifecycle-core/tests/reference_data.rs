use lifecycle_core::{
    check, ComparisonCell, IntegrityIssue, MethodologyKind, OrganizerError, ReferenceData,
};
use tempfile::tempdir;

#[test]
fn every_declared_relation_resolves_to_exactly_one_phase() {
    let data = ReferenceData::builtin();

    for kind in MethodologyKind::all() {
        let methodology = data.methodology(kind);
        let counterpart = data.methodology(kind.counterpart());
        for (index, phase) in methodology.phases.iter().enumerate() {
            let Some(related) = &phase.related_phase else {
                continue;
            };
            let matches = counterpart
                .phases
                .iter()
                .filter(|p| &p.title == related)
                .count();
            assert_eq!(matches, 1, "{} phase '{}' -> '{}'", kind, phase.title, related);

            let (_, resolved) = data.related_phase(kind, index).unwrap();
            assert_eq!(&resolved.title, related);
        }
    }
}

#[test]
fn relations_are_mutual() {
    let data = ReferenceData::builtin();
    for index in 0..data.development.phases.len() {
        let (testing_index, _) = data
            .related_phase(MethodologyKind::Development, index)
            .unwrap();
        let (back, _) = data
            .related_phase(MethodologyKind::Testing, testing_index)
            .unwrap();
        assert_eq!(back, index);
    }
}

#[test]
fn lookups() {
    let data = ReferenceData::builtin();

    assert_eq!(data.methodology_by_name("stlc").unwrap().name, "STLC");
    assert_eq!(
        data.methodology_by_name("Development").unwrap().kind,
        MethodologyKind::Development
    );
    assert!(matches!(
        data.methodology_by_name("kanban"),
        Err(OrganizerError::UnknownMethodology(_))
    ));

    assert_eq!(data.phase(MethodologyKind::Testing, 4).unwrap().title, "Ejecución de pruebas");
    assert!(matches!(
        data.phase(MethodologyKind::Testing, 40),
        Err(OrganizerError::PhaseOutOfRange { index: 40, len: 7, .. })
    ));

    assert_eq!(data.role("Recepcionista").unwrap().name, "Recepcionista");
    let (role, req) = data.requirement("rf-09").unwrap();
    assert_eq!(role.key, "gerente");
    assert_eq!(req.title, "Generar reporte de ocupación");

    assert_eq!(data.test_cases_for("RNF-02").unwrap().len(), 2);
    assert!(data.test_cases_for("RF-99").is_err());
    assert_eq!(data.requirement_count(), 10);
}

#[test]
fn related_phase_of_unrelated_or_missing_phase_is_none() {
    let mut data = ReferenceData::builtin();
    data.development.phases[0].related_phase = None;
    assert!(data.related_phase(MethodologyKind::Development, 0).is_none());
    assert!(data.related_phase(MethodologyKind::Development, 100).is_none());

    data.development.phases[1].related_phase = Some("No existe".into());
    assert!(data.related_phase(MethodologyKind::Development, 1).is_none());
}

#[test]
fn comparison_falls_back_on_length_mismatch() {
    let mut data = ReferenceData::builtin();
    data.testing.phases.truncate(5);

    let rows = data.comparison_rows();
    assert_eq!(rows.len(), 7);
    assert!(matches!(rows[4].testing, ComparisonCell::Phase(_)));
    assert_eq!(rows[5].testing, ComparisonCell::Fallback);
    assert_eq!(rows[6].testing.title(), ComparisonCell::FALLBACK_TITLE);
    assert_eq!(rows[6].testing.icon(), "bi bi-circle");
}

#[test]
fn load_rejects_inconsistent_data() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut data = ReferenceData::builtin();
    data.testing.phases[0].title = "Análisis de reqs. de pruebas".into();

    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, serde_yaml::to_string(&data)?)?;

    match ReferenceData::load(&path) {
        Err(OrganizerError::Integrity(issues)) => {
            assert!(issues
                .iter()
                .any(|i| matches!(i, IntegrityIssue::UnresolvedRelation { .. })));
        }
        other => panic!("expected integrity error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn load_accepts_fewer_testing_phases_and_falls_back() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut data = ReferenceData::builtin();
    data.testing.phases.pop();
    data.development.phases[6].related_phase = None;

    let path = dir.path().join("seven_six.yaml");
    std::fs::write(&path, serde_yaml::to_string(&data)?)?;

    let loaded = ReferenceData::load(&path)?;
    assert_eq!(loaded.development.phases.len(), 7);
    assert_eq!(loaded.testing.phases.len(), 6);
    assert_eq!(
        check(&loaded),
        vec![IntegrityIssue::PhaseCountMismatch {
            development: 7,
            testing: 6,
        }]
    );

    let rows = loaded.comparison_rows();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[6].development.title, "Mantenimiento");
    assert_eq!(rows[6].testing, ComparisonCell::Fallback);
    assert_eq!(rows[6].testing.title(), "Pruebas de regresión");
    Ok(())
}

#[test]
fn load_rejects_unknown_extension() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("data.toml");
    std::fs::write(&path, "title = 'x'")?;
    assert!(matches!(
        ReferenceData::load(&path),
        Err(OrganizerError::UnsupportedFormat(_))
    ));
    Ok(())
}

#[test]
fn builtin_passes_validation() {
    let data = ReferenceData::builtin();
    assert!(check(&data).is_empty());
    assert!(data.validate().is_ok());
}
