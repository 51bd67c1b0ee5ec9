//! Recording transport for tests

use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{Request, Result, Transport, TransportError};

enum Canned {
    Ok(Value),
    Status(u16, String),
}

/// Transport that records every request and replays queued responses
///
/// Responses are consumed in order. Once the queue is empty every request
/// answers `null`.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<Request>>,
    responses: Mutex<VecDeque<Canned>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn respond_with(&self, value: Value) {
        self.lock_responses().push_back(Canned::Ok(value));
    }

    /// Queue an HTTP error response
    pub fn fail_with_status(&self, status: u16, body: impl Into<String>) {
        self.lock_responses()
            .push_back(Canned::Status(status, body.into()));
    }

    /// Every request seen so far, in order
    pub fn requests(&self) -> Vec<Request> {
        self.lock_requests().clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock_requests().len()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.lock_requests().last().cloned()
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Canned>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: Request) -> Result<Value> {
        self.lock_requests().push(request);
        match self.lock_responses().pop_front() {
            Some(Canned::Ok(value)) => Ok(value),
            Some(Canned::Status(status, body)) => Err(TransportError::Status { status, body }),
            None => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Verb;
    use serde_json::json;

    #[test]
    fn test_replays_in_order() {
        let mock = MockTransport::new();
        mock.respond_with(json!(1));
        mock.fail_with_status(404, "missing");

        assert_eq!(mock.execute(Request::new("a", Verb::Read)).unwrap(), json!(1));
        let err = mock.execute(Request::new("b", Verb::Delete)).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(mock.execute(Request::new("c", Verb::Read)).unwrap(), Value::Null);

        let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
        assert_eq!(mock.last_request().map(|r| r.verb()), Some(Verb::Read));
    }
}
