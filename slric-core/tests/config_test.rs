//! Tests for the SLRIC configuration system.

use std::sync::Mutex;

use slric_core::config::{
    ConfigOverrides, IntervalMethod, SlricConfig, TopologyNormalization,
};
use slric_core::errors::ConfigError;
use slric_core::GroupSize;
use slric_core::QuotaSpec;

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_slric_env_vars() {
    for key in [
        "SLRIC_QUOTA_PERCENT",
        "SLRIC_FIXED_QUOTA",
        "SLRIC_GROUP_SIZE",
        "SLRIC_PARALLEL",
        "SLRIC_PATH_LIMIT",
        "SLRIC_MODELS",
        "SLRIC_INTERDEPENDENCE_MODEL",
        "SLRIC_EPSILON",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_slric_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("slric.toml"),
        r#"
[influence]
quota_percent = 30.0
group_size = 3

[propagation]
path_limit = 5
models = ["max", "maxmin"]
"#,
    )
    .unwrap();

    std::env::set_var("SLRIC_GROUP_SIZE", "6");
    std::env::set_var("SLRIC_PATH_LIMIT", "7");

    let overrides = ConfigOverrides {
        path_limit: Some(2),
        ..Default::default()
    };
    let config = SlricConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Project file only.
    assert_eq!(config.influence.quota_percent, Some(30.0));
    assert_eq!(
        config.propagation.effective_models(),
        vec!["max".to_string(), "maxmin".to_string()]
    );
    // Env beats the project file.
    assert_eq!(config.influence.group_size, Some(6));
    // Overrides beat env.
    assert_eq!(config.propagation.path_limit, Some(2));

    clear_slric_env_vars();
}

#[test]
fn test_load_without_project_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_slric_env_vars();

    let dir = tempdir();
    let config = SlricConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.influence.effective_quota_percent(20.0), 20.0);
    assert_eq!(config.influence.effective_group_size(), GroupSize::Limited(4));
    assert!(config.influence.effective_parallel());
    assert_eq!(config.propagation.effective_path_limit(), 3);
    assert_eq!(config.propagation.effective_models(), vec!["max".to_string()]);
    assert_eq!(config.propagation.effective_interdependence_model(), 1);
    assert_eq!(config.propagation.effective_damping(), 0.85);
    assert_eq!(config.propagation.effective_max_iterations(), 100);
    assert_eq!(config.similarity.effective_epsilon(), 0.05);
    assert_eq!(
        config.similarity.effective_interval_method(),
        IntervalMethod::Relative
    );
    assert_eq!(
        config.similarity.effective_topology_normalization(),
        TopologyNormalization::Nodes
    );
    assert_eq!(config.export.effective_separator(), ";");
    assert_eq!(config.export.effective_batch_size(), 1000);
    assert!(config.export.effective_append());
}

#[test]
fn test_env_models_are_split_on_commas() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_slric_env_vars();

    std::env::set_var("SLRIC_MODELS", "maxmin, pagerank");
    let dir = tempdir();
    let config = SlricConfig::load(dir.path(), None).unwrap();
    assert_eq!(
        config.propagation.models,
        vec!["maxmin".to_string(), "pagerank".to_string()]
    );

    clear_slric_env_vars();
}

#[test]
fn test_invalid_project_file_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_slric_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("slric.toml"), "[influence\nquota = ").unwrap();
    let err = SlricConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_toml_round_trip() {
    let config = SlricConfig::from_toml(
        r#"
[influence]
fixed_quota = 2.5
unbounded_groups = true

[similarity]
epsilon = 0.1
interval_method = "absolute"
topology_normalization = "edges"

[export]
separator = ","
append = false
"#,
    )
    .unwrap();

    let text = config.to_toml().unwrap();
    let again = SlricConfig::from_toml(&text).unwrap();

    assert_eq!(again.influence.fixed_quota, Some(2.5));
    assert_eq!(again.influence.effective_group_size(), GroupSize::Unbounded);
    assert_eq!(again.influence.quota_spec(20.0), QuotaSpec::Fixed(2.5));
    assert_eq!(again.similarity.interval_method, Some(IntervalMethod::Absolute));
    assert_eq!(
        again.similarity.topology_normalization,
        Some(TopologyNormalization::Edges)
    );
    assert_eq!(again.export.effective_separator(), ",");
    assert!(!again.export.effective_append());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = SlricConfig::from_toml(
        r#"
[influence]
group_size = 2
colour = "blue"
"#,
    )
    .unwrap();
    assert_eq!(config.influence.group_size, Some(2));
}

#[test]
fn test_merge_only_overrides_present_values() {
    let mut base = SlricConfig::from_toml("[influence]\nquota_percent = 10.0\ngroup_size = 2").unwrap();
    let other = SlricConfig::from_toml("[influence]\ngroup_size = 5").unwrap();
    SlricConfig::merge(&mut base, &other);
    assert_eq!(base.influence.quota_percent, Some(10.0));
    assert_eq!(base.influence.group_size, Some(5));
}

fn assert_rejected(toml: &str, field: &str) {
    let config = SlricConfig::from_toml(toml).unwrap();
    let err = SlricConfig::validate(&config).unwrap_err();
    let named = match &err {
        ConfigError::ValidationFailed { field, .. } | ConfigError::InvalidValue { field, .. } => {
            field.clone()
        }
        other => panic!("unexpected error {other:?}"),
    };
    assert_eq!(named, field, "wrong field for {toml}");
}

#[test]
fn test_validation_names_the_offending_field() {
    assert_rejected("[influence]\nquota_percent = -1.0", "influence.quota_percent");
    assert_rejected("[influence]\nfixed_quota = -0.5", "influence.fixed_quota");
    assert_rejected("[influence]\ngroup_size = 0", "influence.group_size");
    assert_rejected("[influence]\noracle_node_budget = 0", "influence.oracle_node_budget");
    assert_rejected("[propagation]\npath_limit = 0", "propagation.path_limit");
    assert_rejected("[propagation]\nmodels = [\"max\", \"katz\"]", "propagation.models");
    assert_rejected(
        "[propagation]\ninterdependence_model = 4",
        "propagation.interdependence_model",
    );
    assert_rejected("[propagation]\ndamping = 1.0", "propagation.damping");
    assert_rejected("[propagation]\nmax_iterations = 0", "propagation.max_iterations");
    assert_rejected("[propagation]\ntolerance = 0.0", "propagation.tolerance");
    assert_rejected("[similarity]\nepsilon = -0.1", "similarity.epsilon");
    assert_rejected("[export]\nseparator = \"\"", "export.separator");
    assert_rejected("[export]\nbatch_size = 0", "export.batch_size");
}

#[test]
fn test_unknown_interval_method_fails_to_parse() {
    let err = SlricConfig::from_toml("[similarity]\ninterval_method = \"fuzzy\"").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}
