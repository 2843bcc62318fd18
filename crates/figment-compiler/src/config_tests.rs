use crate::{Config, Error};

#[test]
fn defaults() {
    let config = Config::new();

    assert_eq!(config.schema_extension_list(), ["graphqls"]);
    assert_eq!(config.operation_extension_list(), ["graphql"]);
    assert!(!config.is_strict());
    assert_eq!(config.default_remote_name(), "default");
}

#[test]
fn builder_overrides() {
    let config = Config::new()
        .schema_extensions(["gqls", "schema"])
        .operation_extensions(["gql"])
        .strict(true)
        .default_remote("client_api");

    assert_eq!(config.schema_extension_list(), ["gqls", "schema"]);
    assert_eq!(config.operation_extension_list(), ["gql"]);
    assert!(config.is_strict());
    assert_eq!(config.default_remote_name(), "client_api");
}

#[test]
fn from_json_keeps_defaults_for_missing_keys() {
    let config = Config::from_json(r#"{ "strict": true }"#).expect("valid config");

    assert_eq!(config, Config::new().strict(true));
}

#[test]
fn from_json_rejects_unknown_keys() {
    let err = Config::from_json(r#"{ "stric": true }"#).expect_err("unknown key");

    assert!(matches!(err, Error::Config(_)));
}
