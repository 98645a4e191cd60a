use planilla_core::*;

#[test]
fn full_roster_takes_formation_slots_in_order() {
    let lineup = Lineup::default();
    for formation in Formation::ALL {
        let resolved = resolve(&lineup.starters, formation.slots());
        assert_eq!(resolved.len(), FORMATION_SIZE);
        for (i, p) in resolved.iter().enumerate() {
            assert_eq!(p.position, formation.slots()[i], "{} slot {}", formation, i);
        }
    }
}

#[test]
fn resolve_is_idempotent() {
    let lineup = Lineup::default();
    let a = lineup.positioned_players();
    let b = lineup.positioned_players();
    assert_eq!(a, b);
}

#[test]
fn formation_change_only_moves_players() {
    let mut lineup = Lineup::default();
    let before = lineup.positioned_players();
    lineup.set_formation(Formation::F352);
    let after = lineup.positioned_players();

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.id, a.id);
        assert_eq!(b.number, a.number);
        assert_eq!(b.name, a.name);
        assert_eq!(b.role, a.role);
    }
    assert_ne!(
        before.iter().map(|p| p.position).collect::<Vec<_>>(),
        after.iter().map(|p| p.position).collect::<Vec<_>>()
    );
}

#[test]
fn switching_442_to_433_keeps_goalkeeper_and_back_four() {
    let mut lineup = Lineup::default();
    let f442 = lineup.positioned_players();

    assert_eq!(f442[0].position.y_pct_from_baseline, 10.0);
    assert_eq!(f442[9].position.y_pct_from_baseline, 85.0);
    assert_eq!(f442[10].position.y_pct_from_baseline, 85.0);

    lineup.set_formation(Formation::F433);
    let f433 = lineup.positioned_players();

    for i in 0..5 {
        assert_eq!(f442[i].position, f433[i].position, "index {} moved", i);
    }
    for i in 5..11 {
        assert_eq!(f433[i].position, Formation::F433.slots()[i]);
        assert_ne!(f442[i].position, f433[i].position, "index {} did not move", i);
    }
}

#[test]
fn lineup_roundtrips_through_json() {
    let lineup = Lineup::default();
    let json = serde_json::to_string(&lineup).unwrap();
    assert!(json.contains("\"4-4-2\""));
    assert!(json.contains("\"ARQ\""));
    let back: Lineup = serde_json::from_str(&json).unwrap();
    assert_eq!(back, lineup);
}

#[test]
fn partial_lineup_file_fills_defaults() {
    let back: Lineup = serde_json::from_str(r#"{"formation":"4-1-4-1","metadata":{"opponent":"Sunchales FC"}}"#).unwrap();
    assert_eq!(back.formation, Formation::F4141);
    assert!(back.starters.is_empty());
    assert_eq!(back.metadata.opponent, "Sunchales FC");
    assert_eq!(back.metadata.kickoff, "15:30 HS");
}
