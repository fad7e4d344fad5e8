use std::collections::HashSet;
use std::sync::Arc;

use crate::cards::{CardCopy, CardId};

/// Per-seat deck state over an immutable drafted pool.
///
/// The pool is frozen at construction; only the mainboard id list changes, and
/// every mutation swaps in a freshly built list rather than editing in place.
/// A snapshot handed out by `main_ids` therefore stays stable across later
/// mutations, and change detection can compare handles by pointer.
pub struct DeckList {
    seat: usize,
    pool: Vec<CardCopy>,
    main_ids: Arc<[CardId]>,
}

impl DeckList {
    /// Build a seat's list from its drafted pool and any persisted mainboard
    /// ids. Ids that do not reference a pool card are silently dropped, so
    /// stale persisted state degrades instead of failing.
    pub fn new(seat: usize, pool: &[CardCopy], init_main_ids: &[CardId]) -> Self {
        let pool = pool.to_vec();
        let known: HashSet<CardId> = pool.iter().map(|c| c.uid).collect();
        let main_ids: Arc<[CardId]> = init_main_ids
            .iter()
            .filter(|id| known.contains(*id))
            .copied()
            .collect();
        Self {
            seat,
            pool,
            main_ids,
        }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn pool(&self) -> &[CardCopy] {
        &self.pool
    }

    pub fn pool_count(&self) -> usize {
        self.pool.len()
    }

    /// Stable snapshot of the ordered mainboard ids.
    pub fn main_ids(&self) -> Arc<[CardId]> {
        Arc::clone(&self.main_ids)
    }

    pub fn main_count(&self) -> usize {
        self.main_ids.len()
    }

    /// Materialize the mainboard in order.
    pub fn main(&self) -> Vec<&CardCopy> {
        self.main_ids
            .iter()
            .filter_map(|id| self.by_id(*id))
            .collect()
    }

    /// Linear lookup; pools are small.
    pub fn by_id(&self, id: CardId) -> Option<&CardCopy> {
        self.pool.iter().find(|c| c.uid == id)
    }

    /// Pool cards not in the mainboard, in pool order. Always derived, never
    /// cached.
    pub fn side(&self) -> Vec<&CardCopy> {
        let in_main: HashSet<CardId> = self.main_ids.iter().copied().collect();
        self.pool.iter().filter(|c| !in_main.contains(&c.uid)).collect()
    }

    pub fn side_count(&self) -> usize {
        self.side().len()
    }

    fn replace(&mut self, next: Vec<CardId>) {
        self.main_ids = next.into();
    }

    /// Append the pool card at `pool_idx` to the mainboard. No-op out of
    /// range.
    pub fn add_by_pool_index(&mut self, pool_idx: usize) {
        let Some(card) = self.pool.get(pool_idx) else {
            return;
        };
        let mut next = self.main_ids.to_vec();
        next.push(card.uid);
        self.replace(next);
    }

    /// Insert a pool-validated id, appending when `at` is absent or out of
    /// range. Unknown ids are ignored.
    pub fn add_by_id(&mut self, id: CardId, at: Option<usize>) {
        if self.by_id(id).is_none() {
            return;
        }
        let mut next = self.main_ids.to_vec();
        match at {
            Some(i) if i <= next.len() => next.insert(i, id),
            _ => next.push(id),
        }
        self.replace(next);
    }

    /// Remove the mainboard entry at `main_idx`. No-op out of range.
    pub fn remove_at(&mut self, main_idx: usize) {
        if main_idx >= self.main_ids.len() {
            return;
        }
        let mut next = self.main_ids.to_vec();
        next.remove(main_idx);
        self.replace(next);
    }

    /// Remove the first occurrence of `id`. No-op if absent.
    pub fn remove_by_id(&mut self, id: CardId) {
        if let Some(i) = self.main_ids.iter().position(|m| *m == id) {
            self.remove_at(i);
        }
    }

    pub fn clear_main(&mut self) {
        self.replace(Vec::new());
    }

    /// Replace the mainboard wholesale. Ids not present in the pool are
    /// dropped without report, for forward/backward compatible persisted
    /// state.
    pub fn import_main_ids(&mut self, ids: &[CardId]) {
        let known: HashSet<CardId> = self.pool.iter().map(|c| c.uid).collect();
        let next: Vec<CardId> = ids.iter().filter(|id| known.contains(*id)).copied().collect();
        self.replace(next);
    }

    /// Minimal persisted shape: ordered main ids only. The pool is
    /// reconstructed by the storage collaborator.
    pub fn serialize(&self) -> Vec<CardId> {
        self.main_ids.to_vec()
    }
}
