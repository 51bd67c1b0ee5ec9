//! Property tests for batch dispatch

use itemsdb_client::*;
use itemsdb_net::{MockTransport, Verb};
use proptest::prelude::*;

const TOKENS: &[&str] = &[
    "post", "CREATE", "Add", "edit", "UPDATE", "put", "delete", "read", "", "upsert",
];

fn expected_verb(token: &str) -> Option<Verb> {
    match Action::from_token(token)? {
        Action::Create => Some(Verb::Default),
        Action::Update => Some(Verb::Replace),
        Action::Delete => Some(Verb::Delete),
        Action::Read => Some(Verb::Read),
    }
}

proptest! {
    #[test]
    fn batch_accounts_for_every_entry(picks in prop::collection::vec(0..TOKENS.len(), 0..40)) {
        let mock = MockTransport::new();
        let books = Collection::new(&mock, "books").unwrap();

        let batch: Vec<BatchEntry> = picks
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let mut fields = Item::new();
                fields.insert("n".to_string(), i.into());
                BatchEntry::new(i as i64 + 1, TOKENS[t], fields)
            })
            .collect();

        let summary = books.batch_items(batch).unwrap();
        prop_assert_eq!(summary.total(), picks.len());
        prop_assert_eq!(summary.applied.len(), mock.request_count());

        let expected: Vec<(String, Verb)> = picks
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| {
                expected_verb(TOKENS[t]).map(|v| (format!("items/books/{}", i + 1), v))
            })
            .collect();
        let sent: Vec<(String, Verb)> = mock
            .requests()
            .into_iter()
            .map(|r| {
                let verb = r.verb();
                (r.path, verb)
            })
            .collect();
        prop_assert_eq!(sent, expected);
    }
}
