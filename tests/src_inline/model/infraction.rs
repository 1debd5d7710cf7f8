use super::*;

#[test]
fn test_penalty_table() {
    assert_eq!(InfractionKind::CollisionPedestrian.penalty(), Some(0.50));
    assert_eq!(InfractionKind::CollisionVehicle.penalty(), Some(0.60));
    assert_eq!(InfractionKind::CollisionStatic.penalty(), Some(0.65));
    assert_eq!(InfractionKind::TrafficLightInfraction.penalty(), Some(0.70));
    assert_eq!(InfractionKind::StopInfraction.penalty(), Some(0.80));
    assert_eq!(
        InfractionKind::Unrecognized("ROUTE_DEVIATION".to_string()).penalty(),
        None
    );
}

#[test]
fn test_name_roundtrip_for_penalized_kinds() {
    for kind in penalized_kinds() {
        assert_eq!(&InfractionKind::from_name(kind.name()), kind);
    }
}

#[test]
fn test_marker_labels() {
    assert_eq!(
        InfractionKind::CollisionPedestrian.marker_label(),
        "hit ped (0.5x)"
    );
    assert_eq!(
        InfractionKind::CollisionStatic.marker_label(),
        "hit static (0.65x)"
    );
    assert_eq!(
        InfractionKind::TrafficLightInfraction.marker_label(),
        "ran light (0.7x)"
    );
    assert_eq!(InfractionKind::StopInfraction.marker_label(), "ran stop (0.8x)");
    assert_eq!(
        InfractionKind::Unrecognized("OUTSIDE_ROUTE_LANES".to_string()).marker_label(),
        "OUTSIDE_ROUTE_LANES"
    );
}

#[test]
fn test_deserialize_unknown_kind() {
    let ev: InfractionEvent =
        serde_json::from_str(r#"{"time": 1.5, "kind": "VEHICLE_BLOCKED"}"#).unwrap();
    assert_eq!(ev.time, 1.5);
    assert_eq!(
        ev.kind,
        InfractionKind::Unrecognized("VEHICLE_BLOCKED".to_string())
    );
    assert!(!ev.kind.is_collision());
}

#[test]
fn test_serialize_uses_runner_names() {
    let ev = InfractionEvent::new(2.0, InfractionKind::CollisionVehicle);
    let json = serde_json::to_string(&ev).unwrap();
    assert_eq!(json, r#"{"time":2.0,"kind":"COLLISION_VEHICLE"}"#);
}
