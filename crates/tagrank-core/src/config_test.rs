use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "TAGRANK_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "https://i.instagram.com/api/v1/");
    assert!(cfg.api_token.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "tagrank/0.1 (hashtag-ranking)");
    assert_eq!(cfg.max_concurrent_tags, 1);
    assert_eq!(cfg.inter_request_delay_ms, 0);
    assert!(cfg.hashtags_path.is_none());
    assert_eq!(cfg.out_path, PathBuf::from("ranked_list.csv"));
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_ENV", "production");
    map.insert("TAGRANK_LOG_LEVEL", "debug");
    map.insert("TAGRANK_API_TOKEN", "secret-token");
    map.insert("TAGRANK_REQUEST_TIMEOUT_SECS", "5");
    map.insert("TAGRANK_USER_AGENT", "custom-agent/2.0");
    map.insert("TAGRANK_MAX_CONCURRENT_TAGS", "4");
    map.insert("TAGRANK_INTER_REQUEST_DELAY_MS", "250");
    map.insert("TAGRANK_HASHTAGS_PATH", "./tags.txt");
    map.insert("TAGRANK_OUT_PATH", "./out.csv");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.api_token.as_deref(), Some("secret-token"));
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.max_concurrent_tags, 4);
    assert_eq!(cfg.inter_request_delay_ms, 250);
    assert_eq!(cfg.hashtags_path, Some(PathBuf::from("./tags.txt")));
    assert_eq!(cfg.out_path, PathBuf::from("./out.csv"));
}

#[test]
fn blank_api_token_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_API_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_token.is_none());
}

#[test]
fn api_base_url_gets_single_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_API_BASE_URL", "http://localhost:8080/api//");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:8080/api/");
}

#[test]
fn api_base_url_without_scheme_fails() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_API_BASE_URL", "localhost:8080");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGRANK_API_BASE_URL"),
        "expected InvalidEnvVar(TAGRANK_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGRANK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TAGRANK_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_concurrent_tags_zero_fails() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_MAX_CONCURRENT_TAGS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGRANK_MAX_CONCURRENT_TAGS"),
        "expected InvalidEnvVar(TAGRANK_MAX_CONCURRENT_TAGS), got: {result:?}"
    );
}

#[test]
fn max_concurrent_tags_invalid() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_MAX_CONCURRENT_TAGS", "many");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGRANK_MAX_CONCURRENT_TAGS"),
        "expected InvalidEnvVar(TAGRANK_MAX_CONCURRENT_TAGS), got: {result:?}"
    );
}

#[test]
fn inter_request_delay_invalid() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_INTER_REQUEST_DELAY_MS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGRANK_INTER_REQUEST_DELAY_MS"),
        "expected InvalidEnvVar(TAGRANK_INTER_REQUEST_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_token() {
    let mut map = HashMap::new();
    map.insert("TAGRANK_API_TOKEN", "secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-token"), "token leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
