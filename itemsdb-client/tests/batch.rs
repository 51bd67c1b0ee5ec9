//! Batch dispatch tests

use itemsdb_client::*;
use itemsdb_core::SkippedEntry;
use itemsdb_net::{MockTransport, Verb};
use serde_json::{json, Value};

fn entries(value: Value) -> Vec<BatchEntry> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn batch_dispatches_in_order_and_skips_unknown_actions() {
    let mock = MockTransport::new();
    let books = Collection::new(&mock, "books").unwrap();

    let summary = books
        .batch_items(entries(json!([
            {"_id": 1, "__action": "ADD", "x": 1},
            {"_id": 2, "__action": "delete"},
            {"_id": 3, "__action": "bogus"}
        ])))
        .unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);

    assert_eq!(requests[0].path, "items/books/1");
    assert_eq!(requests[0].verb(), Verb::Default);
    assert_eq!(
        requests[0].json_body(),
        Some(json!({"_id": 1, "__action": "ADD", "x": 1}))
    );

    assert_eq!(requests[1].path, "items/books/2");
    assert_eq!(requests[1].verb(), Verb::Delete);
    assert_eq!(requests[1].options.body, None);

    let applied: Vec<(usize, Action)> = summary.applied.iter().map(|a| (a.index, a.action)).collect();
    assert_eq!(applied, vec![(0, Action::Create), (1, Action::Delete)]);
    assert_eq!(
        summary.skipped,
        vec![SkippedEntry { index: 2, token: Some("bogus".to_string()) }]
    );
}

#[test]
fn batch_accepts_every_alias() {
    let mock = MockTransport::new();
    let books = Collection::new(&mock, "books").unwrap();

    let batch: Vec<BatchEntry> = ["post", "Create", "add", "EDIT", "update", "Put", "DeLeTe"]
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let mut fields = Item::new();
            fields.insert("n".to_string(), json!(i));
            BatchEntry::new(i as i64 + 1, token, fields)
        })
        .collect();

    let summary = books.batch_items(batch).unwrap();
    assert!(summary.skipped.is_empty());

    let verbs: Vec<Verb> = mock.requests().iter().map(|r| r.verb()).collect();
    assert_eq!(
        verbs,
        vec![
            Verb::Default,
            Verb::Default,
            Verb::Default,
            Verb::Replace,
            Verb::Replace,
            Verb::Replace,
            Verb::Delete,
        ]
    );
}

#[test]
fn batch_skips_missing_and_non_string_actions() {
    let mock = MockTransport::new();
    let books = Collection::new(&mock, "books").unwrap();

    let summary = books
        .batch_items(entries(json!([
            {"_id": 1, "x": 1},
            {"_id": 2, "__action": 7},
            {"__action": "read"}
        ])))
        .unwrap();

    assert_eq!(mock.request_count(), 0);
    assert!(summary.applied.is_empty());
    let tokens: Vec<Option<String>> = summary.skipped.into_iter().map(|s| s.token).collect();
    assert_eq!(tokens, vec![None, Some("7".to_string()), Some("read".to_string())]);
}

#[test]
fn batch_aborts_on_first_error_and_keeps_earlier_entries() {
    let mock = MockTransport::new();
    let books = Collection::new(&mock, "books").unwrap();

    let err = books
        .batch_items(entries(json!([
            {"_id": "a", "__action": "add", "title": "Dune"},
            {"_id": "", "__action": "update", "title": "Emma"},
            {"_id": "c", "__action": "delete"}
        ])))
        .unwrap_err();

    assert_eq!(err.precondition(), Some(&ItemsError::EmptyId));
    let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["items/books/a"]);
}

#[test]
fn batch_stops_at_transport_error() {
    let mock = MockTransport::new();
    mock.respond_with(Value::Null);
    mock.fail_with_status(500, "boom");

    let books = Collection::new(&mock, "books").unwrap();
    let err = books
        .batch_items(entries(json!([
            {"_id": 1, "__action": "delete"},
            {"_id": 2, "__action": "delete"},
            {"_id": 3, "__action": "delete"}
        ])))
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(TransportError::Status { status: 500, .. })));
    assert_eq!(mock.request_count(), 2);
}

#[test]
fn batch_rejects_non_scalar_ids() {
    let mock = MockTransport::new();
    let books = Collection::new(&mock, "books").unwrap();

    let err = books
        .batch_items(entries(json!([{"_id": [1], "__action": "delete"}])))
        .unwrap_err();
    assert!(matches!(err.precondition(), Some(ItemsError::InvalidId(_))));
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn batch_treats_zero_text_id_as_empty() {
    let mock = MockTransport::new();
    let books = Collection::new(&mock, "books").unwrap();

    let err = books
        .batch_items(entries(json!([
            {"_id": "x", "__action": "delete"},
            {"_id": "0", "__action": "delete"}
        ])))
        .unwrap_err();
    assert_eq!(err.precondition(), Some(&ItemsError::EmptyId));
    assert_eq!(mock.request_count(), 1);
}
