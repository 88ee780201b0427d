//! End-to-end migration against the in-memory store.

use proptest::prelude::*;
use ssm_migrate::core::config::Config;
use ssm_migrate::core::domain::{Environment, Parameter, ParameterType};
use ssm_migrate::core::mapping::{NameMapping, PathLayout};
use ssm_migrate::core::migrate::Migrator;
use ssm_migrate::core::store::{Call, Memory, ParameterStore};
use ssm_migrate::error::MigrateError;

fn config(environment: Environment, variables: &[&str]) -> Config {
    Config {
        environment,
        namespace: "ns".to_string(),
        subsystem: "sp".to_string(),
        variables: variables.iter().map(|v| v.to_string()).collect(),
        ..Config::default()
    }
}

#[test]
fn test_secure_string_copied_with_metadata() {
    let store = Memory::with_parameters([Parameter::new(
        "/ns/staging/REDISCLOUD_URL",
        "redis://x",
        ParameterType::SecureString,
        Some("cache url".to_string()),
    )]);
    let config = config(Environment::Staging, &["REDISCLOUD_URL"]);

    let report = Migrator::new(&store).run(&config.mapping()).unwrap();
    assert_eq!(report.copied.len(), 1);

    let dest = store
        .get_by_name("/ns/sp/staging/REDISCLOUD_URL", true)
        .unwrap();
    assert_eq!(dest.value(), "redis://x");
    assert_eq!(dest.kind(), ParameterType::SecureString);
    assert_eq!(dest.description(), Some("cache url"));

    let described = store.describe_by_name("/ns/sp/staging/REDISCLOUD_URL").unwrap();
    assert_eq!(described[0].description.as_deref(), Some("cache url"));
}

#[test]
fn test_source_left_in_place() {
    let store = Memory::with_parameters([Parameter::new(
        "/ns/production/LOG_LEVEL",
        "info",
        ParameterType::String,
        Some("log level".to_string()),
    )]);
    let config = config(Environment::Production, &["LOG_LEVEL"]);

    Migrator::new(&store).run(&config.mapping()).unwrap();

    assert!(store.parameter("/ns/production/LOG_LEVEL").is_some());
    assert!(store.parameter("/ns/sp/production/LOG_LEVEL").is_some());
}

#[test]
fn test_missing_source_aborts_without_write() {
    let store = Memory::new();
    let config = config(Environment::Staging, &["REDISCLOUD_URL"]);

    let err = Migrator::new(&store).run(&config.mapping()).unwrap_err();

    assert!(matches!(err, MigrateError::SourceNotFound { .. }));
    assert!(store.puts().is_empty());
}

#[test]
fn test_missing_description_aborts_without_write() {
    let store = Memory::with_parameters([Parameter::new(
        "/ns/staging/REDISCLOUD_URL",
        "redis://x",
        ParameterType::SecureString,
        Some("cache url".to_string()),
    )])
    .without_description_entry("/ns/staging/REDISCLOUD_URL");
    let config = config(Environment::Staging, &["REDISCLOUD_URL"]);

    let err = Migrator::new(&store).run(&config.mapping()).unwrap_err();

    assert!(matches!(err, MigrateError::DescriptionNotFound { .. }));
    assert!(store.puts().is_empty());
}

#[test]
fn test_failed_second_pair_never_reaches_third() {
    let store = Memory::with_parameters(["ONE", "TWO", "THREE"].map(|v| {
        Parameter::new(
            format!("/ns/staging/{}", v),
            v,
            ParameterType::String,
            Some("d".to_string()),
        )
    }))
    .fail_put("/ns/sp/staging/TWO");
    let config = config(Environment::Staging, &["ONE", "TWO", "THREE"]);

    let err = Migrator::new(&store).run(&config.mapping()).unwrap_err();

    assert!(matches!(
        err,
        MigrateError::DestinationWrite { ref name, .. } if name == "/ns/sp/staging/TWO"
    ));
    assert_eq!(
        store.puts(),
        vec!["/ns/sp/staging/ONE".to_string(), "/ns/sp/staging/TWO".to_string()]
    );
    assert!(!store.touched("/ns/staging/THREE"));
    assert!(!store.touched("/ns/sp/staging/THREE"));
}

#[test]
fn test_rerun_requires_overwrite() {
    let store = Memory::with_parameters([Parameter::new(
        "/ns/beta/MYSQL_HOST",
        "db.internal",
        ParameterType::String,
        Some("db host".to_string()),
    )]);
    let config = config(Environment::Beta, &["MYSQL_HOST"]);
    let mapping = config.mapping();

    Migrator::new(&store).run(&mapping).unwrap();

    let err = Migrator::new(&store).run(&mapping).unwrap_err();
    assert!(matches!(err, MigrateError::DestinationWrite { .. }));

    Migrator::new(&store).overwrite(true).run(&mapping).unwrap();
    assert_eq!(
        store.parameter("/ns/sp/beta/MYSQL_HOST").unwrap().value(),
        "db.internal"
    );
}

#[test]
fn test_each_pair_completes_before_the_next() {
    let store = Memory::with_parameters(["A", "B"].map(|v| {
        Parameter::new(
            format!("/ns/staging/{}", v),
            v,
            ParameterType::String,
            Some("d".to_string()),
        )
    }));
    let config = config(Environment::Staging, &["A", "B"]);

    Migrator::new(&store).run(&config.mapping()).unwrap();

    let kinds: Vec<&str> = store
        .calls()
        .iter()
        .map(|call| match call {
            Call::ListAll => "list",
            Call::Get { .. } => "get",
            Call::Describe { .. } => "describe",
            Call::Put { .. } => "put",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["get", "describe", "put", "get", "describe", "put"]
    );
}

fn environment() -> impl Strategy<Value = Environment> {
    prop_oneof![
        Just(Environment::Staging),
        Just(Environment::Beta),
        Just(Environment::Production),
    ]
}

fn kind() -> impl Strategy<Value = ParameterType> {
    prop_oneof![
        Just(ParameterType::String),
        Just(ParameterType::SecureString),
        Just(ParameterType::StringList),
    ]
}

proptest! {
    #[test]
    fn prop_mapping_has_one_pair_per_variable(
        environment in environment(),
        variables in proptest::collection::hash_set("[A-Z][A-Z0-9_]{0,15}", 1..20),
    ) {
        let variables: Vec<String> = variables.into_iter().collect();
        let layout = PathLayout::new("ns", "sp");
        let mapping = NameMapping::build(&layout, environment, &variables);

        prop_assert_eq!(mapping.len(), variables.len());
        for (pair, variable) in mapping.iter().zip(&variables) {
            prop_assert_eq!(&pair.old, &format!("/ns/{}/{}", environment, variable));
            prop_assert_eq!(
                &pair.new,
                &pair.old.replacen("/ns/", "/ns/sp/", 1)
            );
        }
    }

    #[test]
    fn prop_mapping_is_deterministic(
        environment in environment(),
        variables in proptest::collection::vec("[A-Z][A-Z0-9_]{0,15}", 0..20),
    ) {
        let layout = PathLayout::new("asset-accounting", "serviceplatform");
        prop_assert_eq!(
            NameMapping::build(&layout, environment, &variables),
            NameMapping::build(&layout, environment, &variables)
        );
    }

    #[test]
    fn prop_copy_preserves_type(kind in kind(), value in "[a-z0-9:/,.]{1,32}") {
        let store = Memory::with_parameters([Parameter::new(
            "/ns/staging/X",
            value.clone(),
            kind,
            Some("d".to_string()),
        )]);
        let config = config(Environment::Staging, &["X"]);

        Migrator::new(&store).run(&config.mapping()).unwrap();

        let dest = store.parameter("/ns/sp/staging/X").unwrap();
        prop_assert_eq!(dest.kind(), kind);
        prop_assert_eq!(dest.value(), value.as_str());
    }
}
