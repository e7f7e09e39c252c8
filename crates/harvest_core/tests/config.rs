use harvest_core::{ConfigError, HarvestConfig};
use pretty_assertions::assert_eq;

#[test]
fn defaults_target_awesome_go() {
    let config = HarvestConfig::default();
    assert_eq!(config.primary_url, "https://github.com/avelino/awesome-go");
    assert_eq!(config.link_selector, ".markdown-body ul li a");
    assert_eq!(config.href_prefix, "https://github.com/");
    assert_eq!(config.rating_selector, "#repo-stars-counter-star");
    assert_eq!(config.output_path, "libraries.csv");
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn partial_ron_falls_back_to_defaults() {
    let text = r#"(primary_url: "https://example.com/list", output_path: "out/list.csv")"#;
    let config: HarvestConfig = ron::from_str(text).unwrap();
    assert_eq!(config.primary_url, "https://example.com/list");
    assert_eq!(config.output_path, "out/list.csv");
    assert_eq!(config.rating_selector, "#repo-stars-counter-star");
}

#[test]
fn relative_primary_url_is_rejected() {
    let config = HarvestConfig {
        primary_url: "/avelino/awesome-go".to_string(),
        ..HarvestConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidUrl { .. })
    ));
}

#[test]
fn non_http_scheme_is_rejected() {
    let config = HarvestConfig {
        primary_url: "ftp://example.com/list".to_string(),
        ..HarvestConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidUrl { .. })
    ));
}

#[test]
fn blank_selector_is_rejected() {
    let config = HarvestConfig {
        rating_selector: "  ".to_string(),
        ..HarvestConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::EmptyField("rating_selector"))
    );
}
