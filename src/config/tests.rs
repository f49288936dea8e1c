use clap::Parser;

use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn defaults_match_documented_values() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.workflow.simulated_latency, Duration::from_millis(1000));
    assert_eq!(
        settings.uploads.max_request_bytes.get(),
        DEFAULT_UPLOAD_REQUEST_LIMIT_BYTES
    );
    assert!(settings.seed.enabled);
    assert_eq!(settings.sessions.idle_timeout, Duration::from_secs(86_400));
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn zero_latency_is_allowed() {
    let mut raw = RawSettings::default();
    raw.apply_serve_overrides(&ServeOverrides {
        workflow_latency_ms: Some(0),
        ..Default::default()
    });
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.workflow.simulated_latency.is_zero());
}

#[test]
fn zero_upload_limit_is_rejected() {
    let mut raw = RawSettings::default();
    raw.uploads.max_request_bytes = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero limit");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "uploads.max_request_bytes",
            ..
        }
    ));
}

#[test]
fn zero_port_and_shutdown_are_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "server.port",
            ..
        })
    ));

    let mut raw = RawSettings::default();
    raw.server.graceful_shutdown_seconds = Some(0);
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "server.graceful_shutdown_seconds",
            ..
        })
    ));
}

#[test]
fn invalid_log_level_is_reported() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "logging.level",
            ..
        })
    ));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn seed_can_be_disabled_via_cli() {
    let args = CliArgs::parse_from(["inkpost", "serve", "--seed", "false"]);
    let Some(Command::Serve(serve)) = args.command else {
        panic!("expected serve command");
    };

    let mut raw = RawSettings::default();
    raw.apply_serve_overrides(&serve.overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(!settings.seed.enabled);
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["inkpost"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_query_arguments() {
    let args = CliArgs::parse_from([
        "inkpost",
        "query",
        "--search",
        "react",
        "--sort",
        "popular",
    ]);

    match args.command.expect("query command") {
        Command::Query(query) => {
            assert_eq!(query.search, "react");
            assert_eq!(query.category, "All");
            assert_eq!(query.sort, "popular");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn load_errors_surface_as_configuration_errors() {
    use crate::infra::error::InfraError;

    let mut raw = RawSettings::default();
    raw.uploads.max_request_bytes = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero upload limit");

    let infra = InfraError::from(err);
    match &infra {
        InfraError::Configuration { message } => {
            assert!(message.contains("uploads.max_request_bytes"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(infra.to_string().starts_with("configuration error:"));
}

#[test]
fn session_idle_timeout_must_be_positive() {
    let mut raw = RawSettings::default();
    raw.apply_serve_overrides(&ServeOverrides {
        session_idle_timeout_seconds: Some(0),
        ..Default::default()
    });
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "sessions.idle_timeout_seconds",
            ..
        })
    ));

    let mut raw = RawSettings::default();
    raw.sessions.idle_timeout_seconds = Some(90);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.sessions.idle_timeout, Duration::from_secs(90));
}
