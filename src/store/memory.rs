//! In-process player store for tests and store-less local runs. Records keep insertion order.

use super::{ListQuery, PlayerStore, SortKey};
use crate::error::StoreError;
use crate::model::{NewPlayer, Player};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryPlayerStore {
    players: RwLock<Vec<Player>>,
    offline: AtomicBool,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an outage: while offline every operation, `ping` included, fails with
    /// `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(())
    }
}

fn is_hit(player: &Player, query: &ListQuery, needle: Option<&str>) -> bool {
    if let Some(team) = &query.filter.team {
        if &player.team != team {
            return false;
        }
    }
    needle.map_or(true, |n| player.name.to_lowercase().contains(n))
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError> {
        self.check_online()?;
        let stored = Player::from_new(Uuid::new_v4(), player, Utc::now());
        self.players.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, query: &ListQuery) -> Result<(Vec<Player>, u64), StoreError> {
        self.check_online()?;
        let needle = query.filter.search.as_ref().map(|s| s.to_lowercase());
        let players = self.players.read().await;
        let mut hits: Vec<&Player> = players
            .iter()
            .filter(|p| is_hit(p, query, needle.as_deref()))
            .collect();
        let total = hits.len() as u64;

        // Stable sorts keep insertion order among ties.
        match query.sort {
            Some(SortKey::Runs) => hits.sort_by(|a, b| b.runs.cmp(&a.runs)),
            Some(SortKey::Salary) => hits.sort_by(|a, b| b.salary.total_cmp(&a.salary)),
            None => {}
        }

        let page = hits
            .into_iter()
            .skip(to_usize(query.skip))
            .take(query.limit.map_or(usize::MAX, to_usize))
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn update_by_id(&self, id: Uuid, player: NewPlayer) -> Result<Option<Player>, StoreError> {
        self.check_online()?;
        let mut players = self.players.write().await;
        Ok(players.iter_mut().find(|p| p.id == id).map(|p| {
            p.apply(player, Utc::now());
            p.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check_online()?;
        let mut players = self.players.write().await;
        let before = players.len();
        players.retain(|p| p.id != id);
        Ok(players.len() != before)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Player>, StoreError> {
        self.check_online()?;
        Ok(self.players.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
