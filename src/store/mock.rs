use std::collections::VecDeque;
use std::sync::Mutex;

use super::{Row, Store, StoreError};

/// In-memory [`Store`] for tests: records every (sql, params) call and
/// plays back queued responses. Once the queue is empty it answers with
/// zero rows.
#[derive(Default)]
pub(crate) struct MockStore {
    calls: Mutex<Vec<(String, Vec<Option<String>>)>>,
    responses: Mutex<VecDeque<Result<Vec<Row>, String>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose next query answers with the given rows.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        let store = Self::new();
        store.push_response(Ok(rows));
        store
    }

    /// A store whose next query fails with the given message.
    pub fn failing(message: &str) -> Self {
        let store = Self::new();
        store.push_response(Err(message.to_owned()));
        store
    }

    pub fn push_response(&self, response: Result<Vec<Row>, String>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<(String, Vec<Option<String>>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Store for MockStore {
    fn query(&self, sql: &str, params: &[Option<&str>]) -> Result<Vec<Row>, StoreError> {
        self.calls.lock().unwrap().push((
            sql.to_owned(),
            params
                .iter()
                .map(|p| p.map(str::to_owned))
                .collect(),
        ));

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(message)) => Err(StoreError::new(message)),
            None => Ok(Vec::new()),
        }
    }
}
