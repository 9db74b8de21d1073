// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Optimistic list mutations with rollback.
//!
//! A delete is split in two synchronous phases around the remote call:
//! 1. [`OptimisticList::begin_delete`] removes the item and notifies
//!    observers of the exact index, in the same turn as the request.
//! 2. [`OptimisticList::settle`] applies the remote outcome: nothing to do
//!    on success, re-insert and notify on failure.
//!
//! Deletes may overlap, and a live snapshot may replace the list while a
//! delete is in flight. A rollback therefore uses the captured index only if
//! the list has not changed structurally since the removal; otherwise the
//! item goes back right after the last present item that preceded it. Rows
//! with a delete still in flight keep their place in that ordering, so
//! overlapping failed deletes come back in their original order however
//! they settle.

use std::collections::{HashMap, HashSet};

use crate::error::{AppError, Result};

/// An item with a stable identity once persisted.
pub trait Identified {
    /// Stable ID, or `None` if the item was never persisted.
    fn id(&self) -> Option<&str>;
}

/// Structural change to an observed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// One item removed at `index`.
    Removed { index: usize },
    /// One item inserted at `index`.
    Inserted { index: usize },
    /// Whole list replaced by a snapshot of `len` items.
    Replaced { len: usize },
}

/// Receives change notifications, e.g. to animate a single-row removal.
pub trait ListObserver: Send {
    fn on_change(&mut self, change: ListChange);
}

impl ListObserver for tokio::sync::mpsc::UnboundedSender<ListChange> {
    fn on_change(&mut self, change: ListChange) {
        // A closed receiver just means nobody is watching anymore.
        let _ = self.send(change);
    }
}

/// A removed item awaiting remote confirmation.
#[derive(Debug)]
pub struct PendingDelete<T> {
    id: String,
    item: T,
    index: usize,
    generation: u64,
    predecessors: HashSet<String>,
}

impl<T> PendingDelete<T> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Index the item occupied when it was removed.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item(&self) -> &T {
        &self.item
    }
}

/// Final state of an optimistic delete.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The remote delete succeeded; the item stays removed.
    Deleted { index: usize },
    /// The remote delete failed; the item is back at `index`.
    Restored { index: usize, error: AppError },
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }
}

/// Ordered list of items with optimistic delete support.
pub struct OptimisticList<T> {
    items: Vec<T>,
    /// Bumped on every structural change.
    generation: u64,
    /// Predecessors of each row whose delete is still in flight.
    pending: HashMap<String, HashSet<String>>,
    observers: Vec<Box<dyn ListObserver>>,
}

impl<T: Identified> Default for OptimisticList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Identified> OptimisticList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            generation: 0,
            pending: HashMap::new(),
            observers: Vec::new(),
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

    /// Register an observer for subsequent changes.
    pub fn subscribe(&mut self, observer: impl ListObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Position of the item with `id`, if present.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == Some(id))
    }

    /// Replace the whole list with a fresh snapshot.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.generation += 1;
        self.notify(ListChange::Replaced {
            len: self.items.len(),
        });
    }

    /// Remove the item with `id` locally and notify observers.
    ///
    /// Fails with [`AppError::PreconditionFailed`] without touching the list
    /// when `id` is empty or not present, which includes an item whose delete
    /// is already pending.
    pub fn begin_delete(&mut self, id: &str) -> Result<PendingDelete<T>> {
        if id.is_empty() {
            return Err(AppError::PreconditionFailed(
                "Cannot delete an item without an ID".to_string(),
            ));
        }

        let index = self.position(id).ok_or_else(|| {
            AppError::PreconditionFailed(format!("Item {} is not in the list", id))
        })?;

        let mut predecessors: HashSet<String> = self.items[..index]
            .iter()
            .filter_map(|item| item.id().map(str::to_string))
            .collect();
        // A pending row sat before this one if it would be restored at or
        // before `index`.
        for (pending_id, before) in &self.pending {
            if self.slot_after(before) <= index {
                predecessors.insert(pending_id.clone());
            }
        }

        let item = self.items.remove(index);
        self.generation += 1;
        self.notify(ListChange::Removed { index });

        tracing::debug!(id, index, "Item removed optimistically");

        self.pending.insert(id.to_string(), predecessors.clone());
        Ok(PendingDelete {
            id: id.to_string(),
            item,
            index,
            generation: self.generation,
            predecessors,
        })
    }

    /// Apply the remote outcome of a delete started with
    /// [`begin_delete`](Self::begin_delete).
    pub fn settle(&mut self, pending: PendingDelete<T>, remote: Result<()>) -> DeleteOutcome {
        self.pending.remove(&pending.id);
        match remote {
            Ok(()) => {
                tracing::debug!(id = %pending.id, "Remote delete confirmed");
                DeleteOutcome::Deleted {
                    index: pending.index,
                }
            }
            Err(error) => {
                tracing::warn!(
                    id = %pending.id,
                    error = %error,
                    "Remote delete failed, restoring item"
                );
                let index = self.rollback(pending);
                DeleteOutcome::Restored { index, error }
            }
        }
    }

    /// Put a pending item back and return where it ended up.
    fn rollback(&mut self, pending: PendingDelete<T>) -> usize {
        // A snapshot may already have brought the item back.
        if let Some(existing) = self.position(&pending.id) {
            return existing;
        }

        let index = if pending.generation == self.generation {
            pending.index.min(self.items.len())
        } else {
            self.slot_after(&pending.predecessors)
        };

        self.items.insert(index, pending.item);
        self.generation += 1;
        self.notify(ListChange::Inserted { index });
        index
    }

    /// Index just past the last present item whose ID is in `predecessors`.
    fn slot_after(&self, predecessors: &HashSet<String>) -> usize {
        self.items
            .iter()
            .rposition(|item| item.id().is_some_and(|id| predecessors.contains(id)))
            .map_or(0, |last| last + 1)
    }

    fn notify(&mut self, change: ListChange) {
        for observer in &mut self.observers {
            observer.on_change(change);
        }
    }
}
