use gametalk_core::errors::{ForumError, GtError, GtErrorKind};

#[test]
fn test_topic_not_found_verifiable_by_kind() {
    let err = ForumError::TopicNotFound { topic_id: 42 };

    let gt_err: GtError = err.into();

    assert_eq!(gt_err.kind(), GtErrorKind::NotFound);
    assert_eq!(gt_err.code(), "ERR_NOT_FOUND");
    assert_eq!(gt_err.entity_id(), Some("42"));
    assert_eq!(gt_err.message(), "No se encontró el tema");
}

#[test]
fn test_duplicate_email_distinct_from_bad_credentials() {
    let dup: GtError = ForumError::EmailAlreadyRegistered {
        email: "ana@example.com".to_string(),
    }
    .into();
    let bad: GtError = ForumError::InvalidCredentials.into();

    assert_eq!(dup.kind(), GtErrorKind::AlreadyExists);
    assert_eq!(dup.op(), Some("register_user"));
    assert_eq!(dup.entity_id(), Some("ana@example.com"));
    assert_eq!(bad.kind(), GtErrorKind::InvalidCredentials);
    assert_eq!(bad.op(), Some("login"));
    assert_ne!(dup.kind(), bad.kind());
}

#[test]
fn test_error_kind_code_mapping() {
    // Codes are part of the log schema and must stay stable
    let kinds = vec![
        (GtErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (GtErrorKind::NotFound, "ERR_NOT_FOUND"),
        (GtErrorKind::AlreadyExists, "ERR_ALREADY_EXISTS"),
        (GtErrorKind::InvalidCredentials, "ERR_INVALID_CREDENTIALS"),
        (GtErrorKind::NetworkUnreachable, "ERR_NETWORK_UNREACHABLE"),
        (GtErrorKind::Timeout, "ERR_TIMEOUT"),
        (GtErrorKind::HttpClientError, "ERR_HTTP_CLIENT"),
        (GtErrorKind::HttpServerError, "ERR_HTTP_SERVER"),
        (GtErrorKind::BodyEmpty, "ERR_BODY_EMPTY"),
        (GtErrorKind::Persistence, "ERR_PERSISTENCE"),
        (GtErrorKind::Serialization, "ERR_SERIALIZATION"),
        (GtErrorKind::Concurrency, "ERR_CONCURRENCY"),
        (GtErrorKind::Config, "ERR_CONFIG"),
        (GtErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_validation_errors_map_to_invalid_input() {
    for err in [ForumError::BlankTitle, ForumError::BlankDescription] {
        let gt_err: GtError = err.into();
        assert_eq!(gt_err.kind(), GtErrorKind::InvalidInput);
        assert!(gt_err.entity_id().is_none());
    }
}

#[test]
fn test_invalid_server_url_is_config_error() {
    let err = ForumError::InvalidServerUrl {
        url: "ftp://x".to_string(),
        reason: "unsupported scheme 'ftp'".to_string(),
    };

    let gt_err: GtError = err.into();

    assert_eq!(gt_err.kind(), GtErrorKind::Config);
    assert!(gt_err.message().contains("ftp://x"));
}

#[test]
fn test_serde_json_error_becomes_serialization() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let forum_err: ForumError = parse_err.into();

    let gt_err: GtError = forum_err.into();

    assert_eq!(gt_err.kind(), GtErrorKind::Serialization);
    assert_eq!(gt_err.code(), "ERR_SERIALIZATION");
}

#[test]
fn test_builder_fields_round_into_display() {
    let err = GtError::new(GtErrorKind::Timeout)
        .with_op("list_topics")
        .with_message("Tiempo de espera agotado");

    assert!(err.kind().is_remote());
    assert_eq!(
        err.to_string(),
        "[ERR_TIMEOUT] in operation 'list_topics': Tiempo de espera agotado"
    );
}
