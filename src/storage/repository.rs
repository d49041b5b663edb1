//! Generic JSON-file repository
//!
//! Each record kind lives in its own file as `{ "<collection>": [ ... ] }`,
//! held in memory behind an `RwLock` between `load` and `save`.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PlannerError;

use super::file_io::{read_json, write_json_atomic};

/// A record that can be kept in a `JsonRepository`
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + Display;

    /// Key the records are stored under in the file
    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;

    fn created_at(&self) -> DateTime<Utc>;
}

pub struct JsonRepository<R: Record> {
    path: PathBuf,
    records: RwLock<HashMap<R::Id, R>>,
}

fn lock_error(e: impl Display) -> PlannerError {
    PlannerError::Storage(format!("Failed to acquire lock: {}", e))
}

impl<R: Record> JsonRepository<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the in-memory records with the file contents
    pub fn load(&self) -> Result<(), PlannerError> {
        let file_data: Value = read_json(&self.path)?;

        let list: Vec<R> = match file_data.get(R::COLLECTION) {
            Some(items) => serde_json::from_value(items.clone()).map_err(|e| {
                PlannerError::Storage(format!(
                    "Failed to parse {} in {}: {}",
                    R::COLLECTION,
                    self.path.display(),
                    e
                ))
            })?,
            None => Vec::new(),
        };

        let mut records = self.records.write().map_err(lock_error)?;
        records.clear();
        for record in list {
            records.insert(record.id(), record);
        }

        tracing::debug!(
            collection = R::COLLECTION,
            count = records.len(),
            "loaded records"
        );
        Ok(())
    }

    /// Write all records, oldest first
    pub fn save(&self) -> Result<(), PlannerError> {
        let list = self.get_all()?;

        let mut file_data = Map::new();
        file_data.insert(R::COLLECTION.to_string(), serde_json::to_value(&list)?);

        write_json_atomic(&self.path, &Value::Object(file_data))
    }

    pub fn get(&self, id: R::Id) -> Result<Option<R>, PlannerError> {
        let records = self.records.read().map_err(lock_error)?;
        Ok(records.get(&id).cloned())
    }

    /// All records sorted by creation time
    pub fn get_all(&self) -> Result<Vec<R>, PlannerError> {
        let records = self.records.read().map_err(lock_error)?;
        let mut list: Vec<R> = records.values().cloned().collect();
        list.sort_by_key(|r| r.created_at());
        Ok(list)
    }

    /// First record (by creation time) matching `predicate`
    pub fn find_by<F>(&self, predicate: F) -> Result<Option<R>, PlannerError>
    where
        F: Fn(&R) -> bool,
    {
        Ok(self.get_all()?.into_iter().find(|r| predicate(r)))
    }

    pub fn upsert(&self, record: R) -> Result<(), PlannerError> {
        let mut records = self.records.write().map_err(lock_error)?;
        records.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record; returns it if it existed
    pub fn delete(&self, id: R::Id) -> Result<Option<R>, PlannerError> {
        let mut records = self.records.write().map_err(lock_error)?;
        Ok(records.remove(&id))
    }
}
