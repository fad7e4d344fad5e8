use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    cards::{CardCopy, CardId},
    Res,
};

/// Key for the per-seat drafted pools, written once when a pod completes.
pub const POOLS_KEY: &str = "draft_pools";
/// Key for the per-seat mainboard id lists, written on every deck mutation.
pub const DECKS_KEY: &str = "deck_ids";

/// Persistence collaborator. Absent or unreadable values load as `None`;
/// callers degrade to empty state rather than failing the session.
pub trait Storage {
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&mut self, key: &str, value: &Value) -> Res<()>;
}

/// Key-per-file JSON storage under a root directory.
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Res<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Storage for DirStorage {
    fn load(&self, key: &str) -> Option<Value> {
        let raw = std::fs::read(self.path(key)).ok()?;
        match serde_json::from_slice(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding malformed data for key {key}: {e}");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &Value) -> Res<()> {
        let raw = serde_json::to_vec(value)?;
        std::fs::write(self.path(key), raw)?;
        Ok(())
    }
}

/// Decode a per-seat list of lists, dropping anything that does not parse.
/// Partially corrupt persisted state yields the seats and entries that are
/// still readable.
fn lenient_seats<T: serde::de::DeserializeOwned>(value: Option<Value>) -> Vec<Vec<T>> {
    let Some(Value::Array(seats)) = value else {
        return Vec::new();
    };
    seats
        .into_iter()
        .map(|seat| match seat {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}

pub fn load_pools(storage: &dyn Storage) -> Vec<Vec<CardCopy>> {
    lenient_seats(storage.load(POOLS_KEY))
}

pub fn save_pools(storage: &mut dyn Storage, pools: &[Vec<CardCopy>]) -> Res<()> {
    storage.save(POOLS_KEY, &serde_json::to_value(pools)?)
}

/// Load per-seat mainboard ids, padded or truncated to `seats` so the result
/// always lines up with the pools it accompanies.
pub fn load_deck_ids(storage: &dyn Storage, seats: usize) -> Vec<Vec<CardId>> {
    let mut ids: Vec<Vec<CardId>> = lenient_seats(storage.load(DECKS_KEY));
    ids.resize_with(seats, Vec::new);
    ids
}

pub fn save_deck_ids(storage: &mut dyn Storage, ids: &[Vec<CardId>]) -> Res<()> {
    storage.save(DECKS_KEY, &serde_json::to_value(ids)?)
}
