use super::*;

#[test]
fn test_lookup_nested_path() {
    let alt = Alternative::new("Boulder")
        .with("education.math", 0.72)
        .with("education.reading", 0.81)
        .with("walk_score", 58.0);

    assert_eq!(alt.name(), "Boulder");
    assert_eq!(alt.lookup("education.math"), Some(&Attribute::Number(0.72)));
    assert_eq!(alt.lookup("walk_score"), Some(&Attribute::Number(58.0)));
    assert_eq!(alt.lookup("education.science"), None);
    assert_eq!(alt.lookup("walk_score.inner"), None);
    assert!(matches!(alt.lookup("education"), Some(Attribute::Group(_))));
}

#[test]
fn test_with_replaces_scalar_by_group() {
    let alt = Alternative::new("A").with("crime", 3.0).with("crime.violent", 1.5);
    assert_eq!(alt.lookup("crime.violent"), Some(&Attribute::Number(1.5)));
}

#[test]
fn test_deserialize_yaml_record() {
    let yaml = r#"
name: Fort Collins
education:
  name: Poudre High
  usnews: 812
  math: 0.61
real_estate:
  market: 525000
sunny: true
notes: ~
"#;
    let alt: Alternative = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(alt.name, "Fort Collins");
    assert_eq!(
        alt.lookup("education.usnews"),
        Some(&Attribute::Number(812.0))
    );
    assert_eq!(
        alt.lookup("education.name"),
        Some(&Attribute::Text("Poudre High".to_string()))
    );
    assert_eq!(
        alt.lookup("real_estate.market"),
        Some(&Attribute::Number(525000.0))
    );
    assert_eq!(alt.lookup("sunny"), Some(&Attribute::Flag(true)));
    assert_eq!(alt.lookup("notes"), Some(&Attribute::Null));
}

#[test]
fn test_deserialize_json_record() {
    let json = r#"{"name":"Austin","climate":{"sunny_days":228,"rain_inches":34.3}}"#;
    let alt: Alternative = serde_json::from_str(json).unwrap();
    assert_eq!(
        alt.lookup("climate.sunny_days"),
        Some(&Attribute::Number(228.0))
    );
}
