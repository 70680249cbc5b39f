//! In-memory collaborators for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;
use crate::notify::{Notification, Notifier};
use crate::remote::{EqFilter, TableApi};

/// One call received by [`FakeTables`]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Select {
        table: String,
        columns: String,
        filters: Vec<EqFilter>,
    },
    SelectSingle {
        table: String,
        columns: String,
        filters: Vec<EqFilter>,
    },
    Insert {
        table: String,
        row: Value,
    },
    Update {
        table: String,
        row: Value,
        filters: Vec<EqFilter>,
    },
}

/// Answers calls from a queue of scripted responses, in order
#[derive(Default)]
pub(crate) struct FakeTables {
    responses: Mutex<VecDeque<Result<Value, RemoteError>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTables {
    pub(crate) fn respond(self, response: Result<Value, RemoteError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: Call) -> Result<Value, RemoteError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left"))
    }
}

#[async_trait]
impl TableApi for FakeTables {
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[EqFilter],
    ) -> Result<Vec<Value>, RemoteError> {
        let value = self.next(Call::Select {
            table: table.to_string(),
            columns: columns.to_string(),
            filters: filters.to_vec(),
        })?;
        match value {
            Value::Array(rows) => Ok(rows),
            other => panic!("select must be scripted with an array, got {}", other),
        }
    }

    async fn select_single(
        &self,
        table: &str,
        columns: &str,
        filters: &[EqFilter],
    ) -> Result<Value, RemoteError> {
        self.next(Call::SelectSingle {
            table: table.to_string(),
            columns: columns.to_string(),
            filters: filters.to_vec(),
        })
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError> {
        self.next(Call::Insert {
            table: table.to_string(),
            row,
        })
    }

    async fn update(
        &self,
        table: &str,
        row: Value,
        filters: &[EqFilter],
    ) -> Result<(), RemoteError> {
        self.next(Call::Update {
            table: table.to_string(),
            row,
            filters: filters.to_vec(),
        })
        .map(|_| ())
    }
}

/// Keeps every notification it receives
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}
