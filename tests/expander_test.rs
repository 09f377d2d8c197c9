mod common;

use std::sync::Arc;

use common::StubCompletion;
use melosearch::{
    error::SearchError,
    expander::{ExpansionMode, Expander, build_prompt, parse_candidates},
};

#[test]
fn test_parse_candidates_trims_and_skips_blank_lines() {
    let reply = "  晴天 \n\n七里香\n   \n稻香\n";
    assert_eq!(parse_candidates(reply, 20), vec!["晴天", "七里香", "稻香"]);
}

#[test]
fn test_parse_candidates_dedups_first_wins() {
    let reply = "晴天\n七里香\n晴天\nSunny\nsunny\n七里香";
    // comparison is exact, so case variants both survive
    assert_eq!(
        parse_candidates(reply, 20),
        vec!["晴天", "七里香", "Sunny", "sunny"]
    );
}

#[test]
fn test_parse_candidates_caps_unique_names() {
    let reply: String = (0..30).map(|i| format!("song {}\n", i)).collect();

    let ten = parse_candidates(&reply, 10);
    assert_eq!(ten.len(), 10);
    assert_eq!(ten.first().map(String::as_str), Some("song 0"));
    assert_eq!(ten.last().map(String::as_str), Some("song 9"));

    assert_eq!(parse_candidates(&reply, 20).len(), 20);
}

#[test]
fn test_parse_candidates_duplicates_do_not_count_towards_cap() {
    let reply = "a\na\na\nb\nc";
    assert_eq!(parse_candidates(reply, 2), vec!["a", "b"]);
}

#[test]
fn test_parse_candidates_empty_reply() {
    assert!(parse_candidates("", 10).is_empty());
    assert!(parse_candidates("\n  \n", 10).is_empty());
}

#[test]
fn test_build_prompt_mentions_seed_and_count() {
    for mode in [
        ExpansionMode::Describe,
        ExpansionMode::Mood,
        ExpansionMode::Similar,
        ExpansionMode::Related,
    ] {
        let prompt = build_prompt("rainy night", mode, 20);
        assert!(prompt.contains("rainy night"), "{:?}", mode);
        assert!(prompt.contains("exactly 20 lines"), "{:?}", mode);
        assert!(prompt.contains("one song name per line"), "{:?}", mode);
    }
}

#[tokio::test]
async fn test_expand_sends_one_prompt_and_parses_reply() {
    let completion = Arc::new(StubCompletion::replying("晴天\n七里香\n晴天\n稻香"));
    let expander = Expander::new(completion.clone());

    let names = expander
        .expand("周杰伦的歌", ExpansionMode::Related, 10)
        .await
        .unwrap();

    assert_eq!(names, vec!["晴天", "七里香", "稻香"]);
    let prompts = completion.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("周杰伦的歌"));
    assert!(prompts[0].contains("exactly 10 lines"));
}

#[tokio::test]
async fn test_expand_failure_is_expansion_error() {
    let expander = Expander::new(Arc::new(StubCompletion::failing("quota exceeded")));

    let err = expander
        .expand("happy", ExpansionMode::Mood, 20)
        .await
        .unwrap_err();

    assert_eq!(err, SearchError::Expansion("quota exceeded".to_string()));
    assert_eq!(err.envelope_code(), 500);
    assert_eq!(err.to_string(), "AI search failed: quota exceeded");
}
