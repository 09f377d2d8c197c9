use axum::http::StatusCode;
use melosearch::{
    envelope::{Envelope, build},
    error::{SearchError, UpstreamError},
    types::{SearchData, SearchOutcome, SongPlayback},
};
use serde_json::json;

#[test]
fn test_failure_envelope_has_no_data() {
    let envelope: Envelope<SearchData> = Envelope::failure(&SearchError::validation("nope"));
    let value = serde_json::to_value(&envelope).unwrap();

    assert_eq!(value, json!({ "code": 403, "message": "nope" }));
}

#[test]
fn test_error_mapping_table() {
    let cases = [
        (SearchError::validation("x"), 403, StatusCode::BAD_REQUEST),
        (SearchError::business(-460, "cheating"), 403, StatusCode::BAD_REQUEST),
        (
            SearchError::UpstreamTransport("x".into()),
            500,
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            SearchError::Expansion("x".into()),
            500,
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            SearchError::Internal("x".into()),
            500,
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, code, status) in cases {
        let reply = build(Err(err.clone()));
        assert_eq!(reply.body.code, code, "{:?}", err);
        assert_eq!(reply.status, status, "{:?}", err);
        assert!(!reply.is_success());
    }
}

#[test]
fn test_upstream_errors_classify() {
    assert_eq!(
        SearchError::from(UpstreamError::Transport("reset".into())),
        SearchError::UpstreamTransport("reset".into())
    );
    assert_eq!(
        SearchError::from(UpstreamError::Completion("401".into())),
        SearchError::Expansion("401".into())
    );
}

#[test]
fn test_success_without_metadata_omits_key() {
    let reply = build(Ok(SearchOutcome {
        data: SearchData::Playback(SongPlayback {
            id: "1".into(),
            url: "http://u".into(),
            lyric: "l".into(),
        }),
        metadata: None,
    }));
    let value = serde_json::to_value(&reply.body).unwrap();

    assert!(reply.is_success());
    assert_eq!(
        value,
        json!({
            "code": 200,
            "message": "success",
            "data": { "id": "1", "url": "http://u", "lyric": "l" }
        })
    );
}
