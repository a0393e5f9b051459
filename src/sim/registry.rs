//! Container queue: spawning, urgency decay and overflow eviction
//!
//! Containers are kept in spawn order. Ids are handed out monotonically, so the
//! queue is always sorted by id and lookups can binary search.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use super::container::{Container, ContainerKind};
use super::difficulty::Difficulty;
use crate::consts::*;

/// A container that left the queue without being routed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerExpiryInfo {
    pub id: u32,
    pub kind: ContainerKind,
    pub score_delta: i64,
    pub strike_delta: u32,
}

impl ContainerExpiryInfo {
    fn expired(container: &Container) -> Self {
        Self {
            id: container.id,
            kind: container.kind,
            score_delta: EXPIRY_SCORE_PENALTY,
            strike_delta: 1,
        }
    }

    fn overflowed(container: &Container) -> Self {
        Self {
            id: container.id,
            kind: container.kind,
            score_delta: OVERFLOW_SCORE_PENALTY,
            strike_delta: 1,
        }
    }
}

/// Result of one spawn step
#[derive(Debug, Clone, Default)]
pub struct SpawnOutcome {
    pub spawned: Vec<Container>,
    pub overflowed: Vec<ContainerExpiryInfo>,
}

/// Ordered collection of in-flight containers
#[derive(Debug, Clone)]
pub struct ContainerRegistry {
    containers: VecDeque<Container>,
    next_id: u32,
    /// Accumulated time toward the next spawn
    spawn_timer: f32,
    /// Interval derived from elapsed time on the last spawn step
    spawn_interval: f32,
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self {
            containers: VecDeque::new(),
            next_id: 1,
            spawn_timer: 0.0,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
        }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Containers in spawn order (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.containers.iter()
    }

    pub fn oldest(&self) -> Option<&Container> {
        self.containers.front()
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.containers.binary_search_by_key(&id, |c| c.id).ok()
    }

    pub fn get(&self, id: u32) -> Option<&Container> {
        self.index_of(id).and_then(|i| self.containers.get(i))
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Container> {
        self.index_of(id).and_then(|i| self.containers.get_mut(i))
    }

    /// Remove a container by id (None if it already left the queue)
    pub fn remove(&mut self, id: u32) -> Option<Container> {
        self.index_of(id).and_then(|i| self.containers.remove(i))
    }

    /// Push a new container of the given kind to the back of the queue
    ///
    /// Does not enforce capacity; `spawn_tick` handles overflow.
    pub fn spawn(&mut self, kind: ContainerKind) -> Container {
        let id = self.next_id;
        self.next_id += 1;
        let container = Container::new(id, kind);
        self.containers.push_back(container.clone());
        container
    }

    /// Advance the spawn accumulator, spawning as many containers as are due
    pub fn spawn_tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        elapsed: f32,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> SpawnOutcome {
        let mut outcome = SpawnOutcome::default();
        self.spawn_interval = difficulty.spawn_interval(elapsed);
        let overflow_limit = difficulty.profile().overflow_limit;

        self.spawn_timer += dt;
        while self.spawn_timer >= self.spawn_interval {
            self.spawn_timer -= self.spawn_interval;

            let pool: &[ContainerKind] = if elapsed < MACHINERY_UNLOCK_SECS {
                &ContainerKind::EARLY_POOL
            } else {
                &ContainerKind::FULL_POOL
            };
            let kind = *pool.choose(rng).unwrap_or(&ContainerKind::Food);
            outcome.spawned.push(self.spawn(kind));

            if self.containers.len() > overflow_limit {
                if let Some(evicted) = self.containers.pop_front() {
                    log::debug!("Overflow evicted container {} ({})", evicted.id, evicted.kind.as_str());
                    outcome.overflowed.push(ContainerExpiryInfo::overflowed(&evicted));
                }
            }
        }

        debug_assert!(
            self.containers.len() <= overflow_limit,
            "registry exceeded capacity after eviction"
        );
        outcome
    }

    /// Drain urgency from every container and remove the ones that ran out
    ///
    /// Walks back to front so removals never disturb unvisited entries.
    pub fn decay_tick(&mut self, dt: f32, drain_multiplier: f32) -> Vec<ContainerExpiryInfo> {
        let mut expired = Vec::new();
        for i in (0..self.containers.len()).rev() {
            let container = &mut self.containers[i];
            container.urgency_left -= dt * drain_multiplier;
            if container.is_expired() {
                if let Some(gone) = self.containers.remove(i) {
                    log::debug!("Container {} ({}) expired", gone.id, gone.kind.as_str());
                    expired.push(ContainerExpiryInfo::expired(&gone));
                }
            }
        }
        expired
    }
}
