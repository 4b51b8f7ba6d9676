use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::bson::oid::ObjectId;
use mongodb::error::ErrorKind;
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection, Database};

use super::{ConnectionState, EmployeeStore, SharedConnectionState};
use crate::configuration::DEFAULT_DATABASE_NAME;
use crate::error::{Error, Result};
use crate::structs::employee::{Employee, EmployeeSummary};

pub const COLLECTION_NAME: &str = "employees";

/// Records kept in the `employees` collection of a MongoDB database.
#[derive(Debug)]
pub struct MongoStore {
    database: Database,
    state: SharedConnectionState,
}

/// Opens a client for `uri` and pings the server before handing out the store.
///
/// The database is `database_name` when given, else the one named in the URI,
/// else [`DEFAULT_DATABASE_NAME`].
pub async fn connect(uri: &str, database_name: Option<&str>) -> Result<MongoStore> {
    let client_options = ClientOptions::parse(uri).await?;
    let client = Client::with_options(client_options)?;
    let database = match database_name {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
    };

    let store = MongoStore::new(database);
    store.ping().await?;
    Ok(store)
}

impl MongoStore {
    pub fn new(database: Database) -> MongoStore {
        MongoStore {
            database,
            state: SharedConnectionState::new(ConnectionState::Connecting),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub async fn ping(&self) -> Result<()> {
        let outcome = self.database.run_command(doc! {"ping": 1}, None).await;
        self.track(outcome).map(|_| ())
    }

    fn employees(&self) -> Collection<Employee> {
        self.database.collection(COLLECTION_NAME)
    }

    fn track<T>(&self, outcome: mongodb::error::Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                self.state.set(ConnectionState::Connected);
                Ok(value)
            }
            Err(error) => {
                if is_connection_error(&error) {
                    tracing::warn!(%error, "lost connection to mongodb");
                    self.state.set(ConnectionState::Disconnected);
                }
                Err(Error::Database(error))
            }
        }
    }
}

/// Creation time descending, ties broken by the (monotonic) ObjectId.
fn newest_first() -> Document {
    doc! {"createdAt": -1, "_id": -1}
}

fn is_connection_error(error: &mongodb::error::Error) -> bool {
    matches!(
        *error.kind,
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. }
    )
}

#[async_trait]
impl EmployeeStore for MongoStore {
    async fn insert(&self, employee: Employee) -> Result<ObjectId> {
        let inserted = self.track(self.employees().insert_one(&employee, None).await)?;
        inserted
            .inserted_id
            .as_object_id()
            .ok_or_else(|| Error::internal("inserted employee has no ObjectId"))
    }

    async fn list_summaries(&self) -> Result<Vec<EmployeeSummary>> {
        let options = FindOptions::builder()
            .projection(doc! {
                "personal.name": 1,
                "personal.email": 1,
                "personal.phone": 1,
                "createdAt": 1,
                "updatedAt": 1,
            })
            .sort(newest_first())
            .build();

        let cursor = self.track(
            self.employees()
                .clone_with_type::<EmployeeSummary>()
                .find(doc! {}, options)
                .await,
        )?;
        self.track(cursor.try_collect().await)
    }

    fn connection_state(&self) -> ConnectionState {
        self.state.get()
    }
}
