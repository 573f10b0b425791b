use super::*;
use cityrank::input::{ScenarioFormat, parse_scenario};

#[test]
fn test_parse_run_defaults() {
    let cli = Cli::try_parse_from(["cityrank", "run", "--input", "cities.yaml"]).unwrap();
    match cli.command {
        Commands::Run {
            input,
            out,
            format,
            levels,
            weight_tolerance,
            zero_variance,
            verbose,
        } => {
            assert_eq!(input, PathBuf::from("cities.yaml"));
            assert_eq!(out, None);
            assert_eq!(format, ReportFormat::Text);
            assert_eq!(levels, None);
            assert_eq!(weight_tolerance, None);
            assert_eq!(zero_variance, None);
            assert_eq!(verbose, 0);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_run_overrides() {
    let cli = Cli::try_parse_from([
        "cityrank",
        "run",
        "-i",
        "cities.json.gz",
        "--out",
        "out",
        "--format",
        "both",
        "--levels",
        "final",
        "--weight-tolerance",
        "1e-9",
        "--zero-variance",
        "reject",
        "-vv",
    ])
    .unwrap();
    match cli.command {
        Commands::Run {
            out,
            format,
            levels,
            weight_tolerance,
            zero_variance,
            verbose,
            ..
        } => {
            assert_eq!(out, Some(PathBuf::from("out")));
            assert_eq!(format, ReportFormat::Both);
            assert_eq!(levels, Some(LevelSelection::Final));
            assert_eq!(weight_tolerance, Some(1e-9));
            assert_eq!(zero_variance, Some(ZeroVariancePolicy::Reject));
            assert_eq!(verbose, 2);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_rejects_bad_tolerance() {
    assert!(Cli::try_parse_from(["cityrank", "run", "-i", "x", "--weight-tolerance", "-1"]).is_err());
    assert!(Cli::try_parse_from(["cityrank", "run", "-i", "x", "--weight-tolerance", "abc"]).is_err());
    assert!(Cli::try_parse_from(["cityrank", "run"]).is_err());
}

#[test]
fn test_parse_check() {
    let cli = Cli::try_parse_from(["cityrank", "check", "--input", "cities.yaml"]).unwrap();
    assert!(matches!(cli.command, Commands::Check { verbose: 0, .. }));
}

#[test]
fn test_render_weights() {
    let yaml = r#"
alternatives:
  - { name: A, x: 1, y: 2, z: 3 }
axes:
  - { label: /x, goal: bigger, value: x }
  - { label: /y, goal: bigger, value: y }
  - { label: /z, goal: smaller, value: z }
tree:
  name: Final
  children:
    - weight: 0.75
      name: Pair
      children:
        - axis: /x
        - axis: /y
    - weight: 0.25
      axis: /z
"#;
    let scenario = parse_scenario(yaml, ScenarioFormat::Yaml).unwrap();
    let text = render_weights(&scenario);
    assert_eq!(
        text,
        "1 alternatives, 3 axes, 2 composite nodes\n\
         \x20 /x       37.5%\n\
         \x20 /y       37.5%\n\
         \x20 /z       25.0%\n\
         \x20 total   100.0%\n"
    );
}

const DEMO: &str = include_str!("../../demos/cities.yaml");

#[test]
fn test_check_accepts_demo_scenario() {
    let scenario = parse_scenario(DEMO, ScenarioFormat::Yaml).unwrap();
    let text = check_scenario(&scenario, &scenario.settings.profile()).unwrap();
    assert!(text.starts_with("5 alternatives, 19 axes, 7 composite nodes\n"));
    assert!(text.ends_with("100.0%\n"));
}

#[test]
fn test_check_rejects_weights_run_rejects() {
    let edited = DEMO.replace(
        "{ weight: 0.10, axis: /Family/Grandparents }",
        "{ weight: 0.05, axis: /Family/Grandparents }",
    );
    assert_ne!(edited, DEMO);
    let scenario = parse_scenario(&edited, ScenarioFormat::Yaml).unwrap();
    let profile = scenario.settings.profile();

    let err = check_scenario(&scenario, &profile).unwrap_err();
    let RunError::Merge { node, source } = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(node, "Family");
    assert!(matches!(source, cityrank::model::ScoreError::WeightSum { .. }));

    let run_err = score_scenario(&scenario, &profile, LevelSelection::Final).unwrap_err();
    assert_eq!(
        run_err.to_string(),
        RunError::Merge { node, source }.to_string()
    );

    let loose = profile.with_overrides(Some(0.1), None);
    assert!(check_scenario(&scenario, &loose).is_ok());
}
