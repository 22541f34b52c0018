//! Persisted per-season progress.
//!
//! The only user-mutable state the calculators keep is banked XP per season
//! code, stored as one JSON map under one fixed key. Platform backends
//! (browser local storage, a file next to the binary) implement
//! [`ProgressStorage`]; [`ProgressBook`] owns the read-modify-write cycle so
//! updating one season never loses sibling entries written earlier in the
//! session.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::rc::Rc;

use crate::constants::PROGRESS_STORAGE_KEY;

/// Season code to banked XP.
pub type ProgressMap = BTreeMap<String, u64>;

/// Trait for abstracting the single-key payload store.
/// Platform-specific implementations should provide this.
pub trait ProgressStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw payload stored under [`PROGRESS_STORAGE_KEY`], or
    /// `None` when nothing has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn read(&self) -> Result<Option<String>, Self::Error>;

    /// Replace the payload stored under [`PROGRESS_STORAGE_KEY`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn write(&self, payload: &str) -> Result<(), Self::Error>;
}

/// Progress bookkeeping over an injected storage backend.
pub struct ProgressBook<S: ProgressStorage> {
    storage: S,
}

impl<S: ProgressStorage> ProgressBook<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The full progress map. Missing or corrupt payloads degrade silently
    /// to an empty map; corruption is logged, never surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backing store itself fails.
    pub fn load(&self) -> Result<ProgressMap, S::Error> {
        let Some(payload) = self.storage.read()? else {
            return Ok(ProgressMap::new());
        };
        match serde_json::from_str(&payload) {
            Ok(map) => Ok(map),
            Err(err) => {
                log::warn!("discarding corrupt progress payload under {PROGRESS_STORAGE_KEY}: {err}");
                Ok(ProgressMap::new())
            }
        }
    }

    /// Banked XP for a season; unknown codes default to zero.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backing store itself fails.
    pub fn xp_for(&self, code: &str) -> Result<u64, S::Error> {
        Ok(self.load()?.get(code).copied().unwrap_or(0))
    }

    /// Update one season's XP through a full read-modify-write cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails to read or write.
    pub fn set_xp(&self, code: &str, xp: u64) -> Result<(), S::Error> {
        let mut map = self.load()?;
        map.insert(code.to_string(), xp);
        let payload = serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string());
        self.storage.write(&payload)
    }
}

/// In-memory storage backend for tests and embedding hosts.
#[derive(Clone, Default)]
pub struct MemoryProgress {
    payload: Rc<RefCell<Option<String>>>,
}

impl ProgressStorage for MemoryProgress {
    type Error = Infallible;

    fn read(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.payload.borrow().clone())
    }

    fn write(&self, payload: &str) -> Result<(), Self::Error> {
        *self.payload.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}
