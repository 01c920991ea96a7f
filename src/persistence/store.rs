//! Named JSON collections, one file per feature.

use super::files::{atomic_write, read_file};
use crate::errors::ValidationError;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Collection keys inside the data directory
pub mod keys {
    pub const TASKS: &str = "tasks";
    pub const TASK_CATEGORIES: &str = "task_categories";
    pub const NOTES: &str = "notes";
    pub const EXPENSES: &str = "expenses";
    pub const BUDGET_ITEMS: &str = "budget_items";
    pub const TIMETABLE_CLASSES: &str = "timetable_classes";
    pub const POMODORO: &str = "pomodoro";
}

/// A record addressable by a generated id
pub trait Record {
    fn id(&self) -> Uuid;
}

type Listener<T> = Box<dyn FnMut(&[T])>;

/// In-memory list mirrored to a JSON file on every change
pub struct Store<T> {
    path: PathBuf,
    items: Vec<T>,
    listeners: Vec<Listener<T>>,
}

impl<T: Clone + Serialize + DeserializeOwned> Store<T> {
    /// Load a collection. A missing, empty or malformed file yields `defaults()`.
    pub fn load<P, F>(path: P, defaults: F) -> Self
    where
        P: Into<PathBuf>,
        F: FnOnce() -> Vec<T>,
    {
        let path = path.into();
        let items = match read_file(&path) {
            Ok(content) if content.trim().is_empty() => defaults(),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(items) => items,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Malformed collection, using defaults");
                    defaults()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable collection, using defaults");
                defaults()
            }
        };

        Self {
            path,
            items,
            listeners: Vec::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the loaded list, dropping the store
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Replace the whole list. Memory and listeners change only once the file is written.
    pub fn set(&mut self, items: Vec<T>) -> Result<()> {
        write_items(&self.path, &items)?;
        debug!(path = %self.path.display(), count = items.len(), "Collection saved");
        self.items = items;
        for listener in &mut self.listeners {
            listener(&self.items);
        }
        Ok(())
    }

    /// Mutate a copy of the list, then commit it through `set`
    pub fn update<F: FnOnce(&mut Vec<T>)>(&mut self, f: F) -> Result<()> {
        let mut next = self.items.clone();
        f(&mut next);
        self.set(next)
    }

    /// Call `listener` with the new list after every successful change
    pub fn subscribe<F: FnMut(&[T]) + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }
}

fn write_items<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    atomic_write(path, &json)
}

impl<T: Record + Clone + Serialize + DeserializeOwned> Store<T> {
    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn ensure_unique(&self, id: Uuid) -> Result<()> {
        if self.position(id).is_some() {
            return Err(ValidationError::DuplicateId(id).into());
        }
        Ok(())
    }

    /// Append a record
    pub fn insert(&mut self, record: T) -> Result<()> {
        self.ensure_unique(record.id())?;
        self.update(|items| items.push(record))
    }

    /// Insert a record at the front (newest-first lists)
    pub fn prepend(&mut self, record: T) -> Result<()> {
        self.ensure_unique(record.id())?;
        self.update(|items| items.insert(0, record))
    }

    /// Swap in a new version of an existing record
    pub fn replace(&mut self, record: T) -> Result<()> {
        let index = self
            .position(record.id())
            .ok_or(ValidationError::UnknownRecord(record.id()))?;
        self.update(|items| items[index] = record)
    }

    /// Remove a record by id and return it
    pub fn remove(&mut self, id: Uuid) -> Result<T> {
        let index = self
            .position(id)
            .ok_or(ValidationError::UnknownRecord(id))?;
        let mut next = self.items.clone();
        let removed = next.remove(index);
        self.set(next)?;
        Ok(removed)
    }
}
