mod common;

use std::path::PathBuf;

use clap::Parser;
use common::{EMAIL_BLOCK, PASSWORD_BLOCK};
use formsmith::cli::commands::{build_backend, cmd_edit};
use formsmith::cli::config::{
    AppConfig, BackendKind, Cli, Commands, ConfigError, load_config, load_config_strict, resolve_settings,
};
use formsmith::library::profile::LibraryProfile;
use formsmith::logging::default_filter;
use formsmith::markup::reassemble::reassemble;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_blocks() {
    let cli = Cli::parse_from(["formsmith", "blocks", "form.jsx"]);
    match cli.command {
        Commands::Blocks { file } => assert_eq!(file, PathBuf::from("form.jsx")),
        _ => panic!("Expected Blocks command"),
    }
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.library, None);
}

#[test]
fn cli_parse_edit_with_assignments() {
    let cli = Cli::parse_from([
        "formsmith",
        "edit",
        "form.jsx",
        "--block",
        "2",
        "--set",
        "placeholder=Your email",
        "--set",
        "disabled=true",
        "--in-place",
    ]);
    match cli.command {
        Commands::Edit { file, block, assignments, in_place } => {
            assert_eq!(file, PathBuf::from("form.jsx"));
            assert_eq!(block, 2);
            assert_eq!(assignments, vec!["placeholder=Your email", "disabled=true"]);
            assert!(in_place);
        }
        _ => panic!("Expected Edit command"),
    }
}

#[test]
fn cli_parse_generate_with_globals() {
    let cli = Cli::parse_from([
        "formsmith",
        "generate",
        "--prompt",
        "login form",
        "--backend",
        "mock",
        "-o",
        "out.jsx",
        "--library",
        "v4",
        "-vv",
    ]);
    assert_eq!(cli.library, Some(LibraryProfile::V4));
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Commands::Generate { prompt, input, output, backend } => {
            assert_eq!(prompt, "login form");
            assert_eq!(input, None);
            assert_eq!(output, Some(PathBuf::from("out.jsx")));
            assert_eq!(backend, Some(BackendKind::Mock));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_parse_catalog_and_preview() {
    assert!(matches!(Cli::parse_from(["formsmith", "catalog"]).command, Commands::Catalog));
    assert!(matches!(
        Cli::parse_from(["formsmith", "preview", "f.jsx"]).command,
        Commands::Preview { .. }
    ));
}

#[test]
fn cli_rejects_unknown_library() {
    assert!(Cli::try_parse_from(["formsmith", "catalog", "--library", "v9"]).is_err());
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
fn config_defaults_when_file_missing() {
    let config = load_config(Some("/nonexistent/formsmith.yaml"));
    assert_eq!(config.completion.backend, BackendKind::Proxy);
    assert_eq!(config.completion.max_tokens, 1000);
    assert_eq!(config.completion.api_token_env, "HF_API_TOKEN");
    assert_eq!(config.completion.timeout().as_secs(), 60);
    assert_eq!(config.preview.library, LibraryProfile::V5);
    assert_eq!(config.preview.error_log_capacity, 10);
    assert!(config.preview.error_log.is_none());
}

#[test]
fn config_partial_yaml_keeps_defaults() {
    let yaml = "completion:\n  backend: chat\n  model: my-model\npreview:\n  library: v3\n";
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.completion.backend, BackendKind::Chat);
    assert_eq!(config.completion.model.as_deref(), Some("my-model"));
    assert_eq!(config.completion.temperature, 0.7);
    assert_eq!(config.preview.library, LibraryProfile::V3);
    assert_eq!(config.preview.error_log_capacity, 10);
}

#[test]
fn config_yaml_roundtrip() {
    let config = AppConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed.completion.backend, config.completion.backend);
    assert_eq!(parsed.preview.library, config.preview.library);
}

#[test]
fn config_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("formsmith.yaml");
    std::fs::write(&path, "completion:\n  endpoint: http://localhost:9000/gen\n").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.completion.endpoint.as_deref(), Some("http://localhost:9000/gen"));
}

#[test]
fn strict_loader_reports_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "completion: [not, a, map]\n").unwrap();
    let path = path.to_str().unwrap();

    assert!(matches!(load_config_strict(path), Err(ConfigError::Yaml { .. })));
    assert!(matches!(load_config_strict("/nonexistent.yaml"), Err(ConfigError::Io { .. })));
    assert_eq!(load_config(Some(path)).completion.backend, BackendKind::Proxy);
}

// ============================================================================
// Settings Resolution Tests
// ============================================================================

#[test]
fn cli_flags_override_config() {
    let mut config = AppConfig::default();
    config.completion.endpoint = Some("http://from-config".into());
    config.completion.model = Some("config-model".into());
    config.preview.library = LibraryProfile::V3;

    let cli = Cli::parse_from(["formsmith", "catalog", "--endpoint", "http://from-cli"]);
    let settings = resolve_settings(&cli, config, Some(BackendKind::Mock));

    assert_eq!(settings.endpoint.as_deref(), Some("http://from-cli"));
    assert_eq!(settings.model.as_deref(), Some("config-model"));
    assert_eq!(settings.library, LibraryProfile::V3);
    assert_eq!(settings.backend, BackendKind::Mock);
}

#[test]
fn backend_falls_back_to_config() {
    let mut config = AppConfig::default();
    config.completion.backend = BackendKind::Mock;
    let cli = Cli::parse_from(["formsmith", "catalog", "--library", "v4"]);

    let settings = resolve_settings(&cli, config, None);
    assert_eq!(settings.backend, BackendKind::Mock);
    assert_eq!(settings.library, LibraryProfile::V4);
    assert!(build_backend(&settings).is_ok());
}

#[test]
fn chat_backend_requires_token_variable() {
    let mut config = AppConfig::default();
    config.completion.api_token_env = "FORMSMITH_TEST_TOKEN_THAT_IS_NEVER_SET".into();
    let cli = Cli::parse_from(["formsmith", "catalog"]);

    let settings = resolve_settings(&cli, config, Some(BackendKind::Chat));
    let err = build_backend(&settings).err().unwrap();
    assert!(err.to_string().contains("FORMSMITH_TEST_TOKEN_THAT_IS_NEVER_SET"));
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn edit_in_place_rewrites_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.jsx");
    std::fs::write(&path, reassemble(&[EMAIL_BLOCK, PASSWORD_BLOCK])).unwrap();

    cmd_edit(&path, 2, &["placeholder=Secret".to_string()], true, LibraryProfile::V5).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with(EMAIL_BLOCK));
    assert!(written.contains(r#"<Input.Password placeholder="Secret" />"#));
}

#[test]
fn edit_rejects_missing_block() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.jsx");
    std::fs::write(&path, EMAIL_BLOCK).unwrap();

    let err = cmd_edit(&path, 3, &[], false, LibraryProfile::V5).unwrap_err();
    assert!(err.to_string().contains("block 3 does not exist"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), EMAIL_BLOCK);
}

#[test]
fn log_filter_follows_verbosity() {
    assert_eq!(default_filter(0), "formsmith=info,warn");
    assert_eq!(default_filter(1), "formsmith=debug,warn");
    assert_eq!(default_filter(3), "formsmith=trace,warn");
}
