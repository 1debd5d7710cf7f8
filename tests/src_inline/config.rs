use super::*;

fn config() -> RunConfig {
    RunConfig::new(
        Some(PathBuf::from("/data/results/leaderboard_eval")),
        Some("route_07".to_string()),
        3,
    )
    .unwrap()
}

#[test]
fn test_paths() {
    let cfg = config();
    assert_eq!(
        cfg.png_path(),
        PathBuf::from("/data/results/leaderboard_eval/plots/route_07/repetition_03.png")
    );
    assert_eq!(
        cfg.tsv_path(),
        PathBuf::from("/data/results/leaderboard_eval/plots/route_07/repetition_03.tsv")
    );
    assert_eq!(
        cfg.summary_path(),
        PathBuf::from("/data/results/leaderboard_eval/plots/route_07/repetition_03.summary.json")
    );
}

#[test]
fn test_title_replaces_underscores() {
    assert_eq!(config().title(), "leaderboard eval/route 07: repetition 03");
}

#[test]
fn test_title_with_trailing_slash_root() {
    let cfg = RunConfig::new(Some(PathBuf::from("out/")), Some("r1".to_string()), 12).unwrap();
    assert_eq!(cfg.title(), "/r1: repetition 12");
}

#[test]
fn test_missing_values() {
    let err = RunConfig::new(None, Some("r".to_string()), 0).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(_)));
    let err = RunConfig::new(Some(PathBuf::from("x")), Some("  ".to_string()), 0).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(_)));
}

#[test]
fn test_tolerance_validation() {
    assert!(config().with_tolerance(-1.0).is_err());
    assert!(config().with_tolerance(f64::NAN).is_err());
    let cfg = config().with_tolerance(1e-3).unwrap();
    assert_eq!(cfg.penalty_params().tolerance, 1e-3);
}

#[test]
fn test_default_tolerance() {
    assert_eq!(config().penalty_params(), PenaltyParams::default());
}
