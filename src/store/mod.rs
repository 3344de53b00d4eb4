//! Record store: the operations handlers need, independent of the backing database.

mod memory;
mod postgres;

pub use memory::MemoryPlayerStore;
pub use postgres::{ensure_database_exists, ensure_players_table, PgPlayerStore};

use crate::error::StoreError;
use crate::model::{NewPlayer, Player};
use async_trait::async_trait;
use uuid::Uuid;

/// Fields a list may be sorted by. Both always sort descending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Runs,
    Salary,
}

impl SortKey {
    /// Parses the `sortBy` query value; anything else leaves the default order.
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "runs" => Some(SortKey::Runs),
            "salary" => Some(SortKey::Salary),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortKey::Runs => "runs",
            SortKey::Salary => "salary",
        }
    }
}

/// Exact team match and case-insensitive substring match on name; both optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub team: Option<String>,
    pub search: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: PlayerFilter,
    pub sort: Option<SortKey>,
    pub skip: u64,
    /// `None` returns every match from `skip` on.
    pub limit: Option<u64>,
}

#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Insert; the store assigns id and timestamps.
    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError>;

    /// One page of matching players plus the count of all matches. The count and the
    /// page are separate reads and may disagree under concurrent writes.
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Player>, u64), StoreError>;

    /// Replace every payload field of the record; `None` when absent.
    async fn update_by_id(&self, id: Uuid, player: NewPlayer) -> Result<Option<Player>, StoreError>;

    /// `false` when there was nothing to delete.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Player>, StoreError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}
