use super::*;
use crate::state::test_helpers::{FakeGateway, offline};

fn answer(text: &str, searched: u32) -> QueryResult {
    QueryResult { response: text.to_owned(), searched_conversations: searched }
}

#[test]
fn query_state_defaults() {
    let s = QueryState::default();
    assert!(s.query.is_empty());
    assert!(!s.loading);
    assert!(s.error.is_none());
    assert!(s.result.is_none());
}

#[tokio::test]
async fn run_stores_outcome_with_original_query() {
    let gw = FakeGateway::default();
    gw.push_query(Ok(answer("You discussed deadlines.", 3)));
    let mut s = QueryState::default();

    let outcome = s.run(&gw, "What about deadlines?", None).await.unwrap().unwrap();

    assert_eq!(outcome.query, "What about deadlines?");
    assert_eq!(outcome.response, "You discussed deadlines.");
    assert_eq!(outcome.searched_conversations, 3);
    assert_eq!(s.result, Some(outcome));
    assert!(!s.loading);
    assert_eq!(gw.calls(), vec!["query What about deadlines? all"]);
}

#[tokio::test]
async fn run_forwards_conversation_scope() {
    let gw = FakeGateway::default();
    gw.push_query(Ok(answer("ok", 2)));
    let mut s = QueryState::default();
    s.run(&gw, "q", Some(&[4, 7])).await.unwrap();
    assert_eq!(gw.calls(), vec!["query q [4, 7]"]);
}

#[tokio::test]
async fn run_blank_query_is_a_no_op() {
    let gw = FakeGateway::default();
    let mut s = QueryState::default();
    assert_eq!(s.run(&gw, "  ", None).await.unwrap(), None);
    assert!(gw.calls().is_empty());
    assert!(!s.loading);
}

#[tokio::test]
async fn run_failure_sets_error_and_keeps_previous_answer() {
    let gw = FakeGateway::default();
    gw.push_query(Ok(answer("first", 1)));
    gw.push_query(Err(offline()));
    let mut s = QueryState::default();
    s.run(&gw, "one", None).await.unwrap();

    let err = s.run(&gw, "two", None).await.unwrap_err();

    assert_eq!(err, offline());
    assert_eq!(s.error.as_deref(), Some("request failed: connection refused"));
    assert_eq!(s.result.as_ref().unwrap().response, "first");
    assert!(!s.loading);
}

#[test]
fn begin_clears_previous_error() {
    let mut s = QueryState { error: Some("old".into()), ..Default::default() };
    assert_eq!(s.begin("again"), Some("again".to_owned()));
    assert!(s.loading);
    assert!(s.error.is_none());
}

#[test]
fn suggest_sets_query_and_clears_result() {
    let mut s = QueryState {
        result: Some(QueryOutcome { query: "a".into(), response: "b".into(), searched_conversations: 1 }),
        ..Default::default()
    };
    s.suggest(SUGGESTED_QUERIES[2]);
    assert_eq!(s.query, "What are the action items?");
    assert!(s.result.is_none());
}
