use std::cmp::Reverse;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::{ConnectionState, EmployeeStore};
use crate::error::Result;
use crate::structs::employee::{Employee, EmployeeSummary};

/// Keeps records in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<Employee>>,
}

impl InMemoryStore {
    /// Copies of every stored record, oldest first, with identifiers filled in.
    pub fn records(&self) -> Vec<Employee> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Employee>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn insert(&self, mut employee: Employee) -> Result<ObjectId> {
        let id = ObjectId::new();
        employee.id = Some(id);
        self.lock().push(employee);
        Ok(id)
    }

    async fn list_summaries(&self) -> Result<Vec<EmployeeSummary>> {
        let records = self.lock();
        let mut indexed: Vec<(usize, &Employee)> = records.iter().enumerate().collect();
        // Records created in the same millisecond keep newest-first by insertion order.
        indexed.sort_by_key(|(position, employee)| Reverse((employee.created_at, *position)));

        Ok(indexed
            .into_iter()
            .filter_map(|(_, employee)| {
                employee
                    .id
                    .map(|id| EmployeeSummary::of(id, employee))
            })
            .collect())
    }

    fn connection_state(&self) -> ConnectionState {
        ConnectionState::Connected
    }
}
