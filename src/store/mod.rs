//! Persistence of onboarding records.
//!
//! Handlers talk to an [`EmployeeStore`]; production uses [`MongoStore`],
//! the test suite uses [`InMemoryStore`].

use std::sync::atomic::{AtomicU8, Ordering};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::Result;
use crate::structs::employee::{Employee, EmployeeSummary};

mod memory;
mod mongo;

pub use memory::InMemoryStore;
pub use mongo::{connect, MongoStore, COLLECTION_NAME};

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Inserts a new record and returns its identifier.
    async fn insert(&self, employee: Employee) -> Result<ObjectId>;

    /// Every record reduced to identity, timestamps and contact details, newest first.
    async fn list_summaries(&self) -> Result<Vec<EmployeeSummary>>;

    fn connection_state(&self) -> ConnectionState;
}

/// Readiness of the store connection, numbered like the Node driver's `readyState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connected = 1,
    Connecting = 2,
    Disconnecting = 3,
}

impl ConnectionState {
    pub fn code(self) -> u8 {
        self as u8
    }

    fn from_code(code: u8) -> ConnectionState {
        match code {
            1 => ConnectionState::Connected,
            2 => ConnectionState::Connecting,
            3 => ConnectionState::Disconnecting,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// A [`ConnectionState`] shared between request tasks.
#[derive(Debug)]
pub(crate) struct SharedConnectionState(AtomicU8);

impl SharedConnectionState {
    pub(crate) fn new(state: ConnectionState) -> Self {
        SharedConnectionState(AtomicU8::new(state.code()))
    }

    pub(crate) fn get(&self) -> ConnectionState {
        ConnectionState::from_code(self.0.load(Ordering::Relaxed))
    }

    pub(crate) fn set(&self, state: ConnectionState) {
        self.0.store(state.code(), Ordering::Relaxed);
    }
}
