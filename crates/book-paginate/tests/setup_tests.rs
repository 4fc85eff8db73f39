use book_paginate::*;

#[test]
fn test_validity_gate() {
    let mut setup = PageSetup::default();
    assert!(is_valid(&setup));

    setup.margin.top = 216.0;
    setup.margin.bottom = 216.0;
    assert!(!is_valid(&setup));

    let mut setup = PageSetup::default();
    setup.margin.inner = 200.0;
    setup.margin.outer = 100.0;
    assert!(!is_valid(&setup));
}

#[test]
fn test_spread_size() {
    let setup = PageSetup::default();
    assert_eq!(setup.spread_size(), PageSize::new(576.0, 432.0));
}

#[cfg(feature = "serde")]
#[test]
fn test_parse_units_from_json() {
    let json = r#"{
        "size": { "width": "4in", "height": "6in" },
        "margin": { "top": "48pt", "inner": "24pt", "outer": 24, "bottom": "40pt" },
        "bleed": "12pt"
    }"#;
    let setup: PageSetup = serde_json::from_str(json).unwrap();
    assert_eq!(setup, PageSetup::default());
}

#[cfg(feature = "serde")]
#[test]
fn test_missing_fields_use_defaults() {
    let setup: PageSetup = serde_json::from_str(r#"{ "bleed": "0.25in" }"#).unwrap();
    assert_eq!(setup.bleed, 18.0);
    assert_eq!(setup.size, PageSetup::default().size);
}

#[cfg(feature = "serde")]
#[test]
fn test_bad_unit_is_rejected() {
    let json = r#"{ "bleed": "3 parsecs" }"#;
    assert!(serde_json::from_str::<PageSetup>(json).is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_setup() {
    use tempfile::NamedTempFile;

    let mut setup = PageSetup::default();
    setup.size = PageSize::new(360.0, 540.0);
    setup.margin = PageMargins::uniform(36.0);
    setup.bleed = 9.0;

    let temp_file = NamedTempFile::new().unwrap();
    setup.save(temp_file.path()).await.unwrap();

    let loaded = PageSetup::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded, setup);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_garbage_is_config_error() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "not json").unwrap();

    match PageSetup::load(temp_file.path()).await {
        Err(PaginationError::Config(msg)) => assert!(msg.contains("page setup")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
