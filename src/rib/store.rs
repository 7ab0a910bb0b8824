//! Store contract consumed by the table context, and an in-memory store implementing it.
//!
//! Writes are submitted to a transaction and only applied when the owner of the store commits
//! it. A commit either applies every operation or none of them.
use crate::error::RibError;
use crate::models::TableKey;
use crate::rib::route::{RouteId, StoredRoute};
use crate::rib::table::TableSkeleton;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Location of a value in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorePath {
    Table(TableKey),
    Route(TableKey, RouteId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    Table(TableSkeleton),
    Route(StoredRoute),
}

pub trait WriteTransaction {
    /// Replace the subtree at `path`.
    fn put(&mut self, path: StorePath, value: StoreValue);
    /// Merge `value` into what is stored at `path`, creating it when missing.
    fn merge(&mut self, path: StorePath, value: StoreValue);
    /// Delete the subtree at `path`. Deleting a missing path is a no-op.
    fn delete(&mut self, path: StorePath);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operation {
    Put(StorePath, StoreValue),
    Merge(StorePath, StoreValue),
    Delete(StorePath),
}

#[derive(Debug, Default)]
pub struct MemoryTransaction {
    operations: Vec<Operation>,
}

impl MemoryTransaction {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl WriteTransaction for MemoryTransaction {
    fn put(&mut self, path: StorePath, value: StoreValue) {
        self.operations.push(Operation::Put(path, value));
    }

    fn merge(&mut self, path: StorePath, value: StoreValue) {
        self.operations.push(Operation::Merge(path, value));
    }

    fn delete(&mut self, path: StorePath) {
        self.operations.push(Operation::Delete(path));
    }
}

/// An operation whose path and value agree and whose table is known to exist.
#[derive(Debug)]
enum CheckedOperation {
    PutTable(TableKey, TableSkeleton),
    MergeTable(TableKey, TableSkeleton),
    PutRoute(TableKey, RouteId, StoredRoute),
    DeleteTable(TableKey),
    DeleteRoute(TableKey, RouteId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredTable {
    skeleton: TableSkeleton,
    routes: BTreeMap<RouteId, StoredRoute>,
}

/// In-memory store keeping one route map per table.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: BTreeMap<TableKey, StoredTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> MemoryTransaction {
        MemoryTransaction::default()
    }

    /// Apply all operations of `tx` in submission order.
    ///
    /// The whole transaction is checked before anything is written, so on error the store is
    /// left unchanged.
    pub fn commit(&mut self, tx: MemoryTransaction) -> Result<(), RibError> {
        let operations = self.check(tx.operations)?;
        let count = operations.len();
        for operation in operations {
            self.apply(operation);
        }
        debug!("committed {} store operations", count);
        Ok(())
    }

    /// Replay the table creations and deletions of `operations` over the current table set.
    fn check(&self, operations: Vec<Operation>) -> Result<Vec<CheckedOperation>, RibError> {
        let mut tables: BTreeSet<TableKey> = self.tables.keys().copied().collect();
        operations
            .into_iter()
            .map(|operation| {
                let checked = match operation {
                    Operation::Put(StorePath::Table(key), StoreValue::Table(skeleton)) => {
                        tables.insert(key);
                        CheckedOperation::PutTable(key, skeleton)
                    }
                    Operation::Merge(StorePath::Table(key), StoreValue::Table(skeleton)) => {
                        tables.insert(key);
                        CheckedOperation::MergeTable(key, skeleton)
                    }
                    Operation::Put(StorePath::Route(key, id), StoreValue::Route(route))
                    | Operation::Merge(StorePath::Route(key, id), StoreValue::Route(route)) => {
                        if !tables.contains(&key) {
                            return Err(RibError::Store(format!("table {} does not exist", key)));
                        }
                        CheckedOperation::PutRoute(key, id, route)
                    }
                    Operation::Delete(StorePath::Table(key)) => {
                        tables.remove(&key);
                        CheckedOperation::DeleteTable(key)
                    }
                    Operation::Delete(StorePath::Route(key, id)) => {
                        CheckedOperation::DeleteRoute(key, id)
                    }
                    Operation::Put(path, _) | Operation::Merge(path, _) => {
                        return Err(mismatch(&path))
                    }
                };
                Ok(checked)
            })
            .collect()
    }

    fn apply(&mut self, operation: CheckedOperation) {
        match operation {
            CheckedOperation::PutTable(key, skeleton) => {
                self.tables.insert(
                    key,
                    StoredTable {
                        skeleton,
                        routes: BTreeMap::new(),
                    },
                );
            }
            CheckedOperation::MergeTable(key, skeleton) => {
                self.tables
                    .entry(key)
                    .and_modify(|t| t.skeleton.attributes = skeleton.attributes.clone())
                    .or_insert_with(|| StoredTable {
                        skeleton,
                        routes: BTreeMap::new(),
                    });
            }
            CheckedOperation::PutRoute(key, id, route) => match self.tables.get_mut(&key) {
                Some(table) => {
                    table.routes.insert(id, route);
                }
                None => warn!("writing route {} of missing table {}", id, key),
            },
            CheckedOperation::DeleteTable(key) => {
                if self.tables.remove(&key).is_none() {
                    debug!("table {} already absent", key);
                }
            }
            CheckedOperation::DeleteRoute(key, id) => match self.tables.get_mut(&key) {
                Some(table) => {
                    table.routes.remove(&id);
                }
                None => warn!("deleting route {} of missing table {}", id, key),
            },
        }
    }

    pub fn table(&self, table: &TableKey) -> Option<&TableSkeleton> {
        self.tables.get(table).map(|t| &t.skeleton)
    }

    pub fn route(&self, table: &TableKey, route_id: &RouteId) -> Option<&StoredRoute> {
        self.tables.get(table).and_then(|t| t.routes.get(route_id))
    }

    /// Routes of a table ordered by route id. Empty when the table does not exist.
    pub fn routes(&self, table: &TableKey) -> impl Iterator<Item = &StoredRoute> + '_ {
        self.tables
            .get(table)
            .into_iter()
            .flat_map(|t| t.routes.values())
    }
}

fn mismatch(path: &StorePath) -> RibError {
    RibError::Store(format!("value does not match path {:?}", path))
}
