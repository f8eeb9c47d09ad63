use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use tracing::{debug, error};

use crate::{
    application::{
        error::{PersistError, StoreError},
        repositories::metadata_repository::MetadataRepository,
        services::code_allocator::{CodeGenerator, RandomCodeGenerator},
    },
    domain::models::{entry::UploadEntry, snapshot::MetadataSnapshot},
};

pub const RECENT_LIMIT: usize = 20;

enum Slot {
    Reserved,
    Occupied(UploadEntry),
}

#[derive(Default)]
struct StoreState {
    slots: HashMap<String, Slot>,
    recent: VecDeque<String>,
}

impl StoreState {
    fn insert(&mut self, entry: UploadEntry) -> Result<(), StoreError> {
        if let Some(Slot::Occupied(_)) = self.slots.get(&entry.code) {
            return Err(StoreError::DuplicateCode(entry.code));
        }
        self.slots.insert(entry.code.clone(), Slot::Occupied(entry));
        Ok(())
    }

    fn record_recent(&mut self, code: String) {
        self.recent.push_front(code);
        self.recent.truncate(RECENT_LIMIT);
    }
}

/// Process-wide map of code to upload entry plus the recent-uploads list.
///
/// Every read or write of the map goes through one mutex. Candidate codes are
/// generated outside it; only the occupancy check and the reservation happen
/// under it. I/O (`persist`) never holds it.
pub struct MetadataStore {
    state: Mutex<StoreState>,
    generator: Box<dyn CodeGenerator>,
    repository: Arc<dyn MetadataRepository>,
    persist_lock: tokio::sync::Mutex<()>,
    persist_requests: AtomicU64,
}

impl MetadataStore {
    pub fn new(repository: Arc<dyn MetadataRepository>) -> Self {
        Self::with_generator(repository, Box::new(RandomCodeGenerator))
    }

    pub fn with_generator(
        repository: Arc<dyn MetadataRepository>,
        generator: Box<dyn CodeGenerator>,
    ) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            generator,
            repository,
            persist_lock: tokio::sync::Mutex::new(()),
            persist_requests: AtomicU64::new(0),
        }
    }

    /// Builds a store from whatever the repository holds.
    pub async fn load(repository: Arc<dyn MetadataRepository>) -> Result<Self, PersistError> {
        let snapshot = repository.load().await?;
        let store = Self::new(repository);
        store.restore(snapshot);
        Ok(store)
    }

    fn restore(&self, snapshot: MetadataSnapshot) {
        let mut state = self.lock();
        state.slots = snapshot
            .data
            .into_iter()
            .map(|(code, mut entry)| {
                entry.code = code.clone();
                (code, Slot::Occupied(entry))
            })
            .collect();
        state.recent = snapshot
            .last_uploaded
            .into_iter()
            .take(RECENT_LIMIT)
            .collect();
    }

    // No operation leaves the state half-updated, so a poisoned lock is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns a code that is free in the store and stays reserved until the
    /// reservation is committed or dropped.
    pub fn reserve_code(&self, length: usize) -> CodeReservation<'_> {
        loop {
            let candidate = self.generator.generate(length);
            let mut state = self.lock();
            if state.slots.contains_key(&candidate) {
                debug!("Code collision on {}, regenerating", candidate);
                continue;
            }
            state.slots.insert(candidate.clone(), Slot::Reserved);
            return CodeReservation {
                store: self,
                code: candidate,
                committed: false,
            };
        }
    }

    /// Fresh delete key. Never checked against anything.
    pub fn delete_key(&self, length: usize) -> String {
        self.generator.generate(length)
    }

    pub fn lookup(&self, code: &str) -> Option<UploadEntry> {
        match self.lock().slots.get(code) {
            Some(Slot::Occupied(entry)) => Some(entry.clone()),
            _ => None,
        }
    }

    pub fn recent(&self) -> Vec<String> {
        self.lock().recent.iter().cloned().collect()
    }

    /// Number of committed entries. Pending reservations are not counted.
    pub fn len(&self) -> usize {
        self.lock()
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> MetadataSnapshot {
        let state = self.lock();
        MetadataSnapshot {
            data: state
                .slots
                .iter()
                .filter_map(|(code, slot)| match slot {
                    Slot::Occupied(entry) => Some((code.clone(), entry.clone())),
                    Slot::Reserved => None,
                })
                .collect(),
            last_uploaded: state.recent.iter().cloned().collect(),
        }
    }

    /// Writes the current contents through the repository.
    ///
    /// Only one write runs at a time and callers never queue behind it. A
    /// caller that finds a write in flight records its request and returns
    /// at once; the writer re-snapshots after each save until no request
    /// arrived during it, so the last write always carries the newest state.
    /// Failures are reported to the caller doing the write.
    pub async fn persist(&self) -> Result<(), PersistError> {
        self.persist_requests.fetch_add(1, Ordering::SeqCst);
        loop {
            let Ok(guard) = self.persist_lock.try_lock() else {
                debug!("Persist already in flight, coalescing");
                return Ok(());
            };
            let served = self.persist_requests.load(Ordering::SeqCst);
            let snapshot = self.snapshot();
            let result = self.repository.save(&snapshot).await.inspect_err(|e| {
                error!("Failed to persist metadata ({} entries): {}", snapshot.data.len(), e);
            });
            drop(guard);

            if self.persist_requests.load(Ordering::SeqCst) == served {
                return result;
            }
        }
    }

    fn release(&self, code: &str) {
        let mut state = self.lock();
        if let Some(Slot::Reserved) = state.slots.get(code) {
            state.slots.remove(code);
            debug!("Released reservation for {}", code);
        }
    }
}

/// A code held free for one upload.
///
/// Dropping it without calling [`CodeReservation::commit`] frees the code.
pub struct CodeReservation<'a> {
    store: &'a MetadataStore,
    code: String,
    committed: bool,
}

impl CodeReservation<'_> {
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Inserts `entry` under the reserved code and records it as the most
    /// recent upload, under a single lock acquisition.
    pub fn commit(mut self, mut entry: UploadEntry) -> Result<(), StoreError> {
        entry.code = self.code.clone();
        let mut state = self.store.lock();
        state.insert(entry)?;
        state.record_recent(self.code.clone());
        self.committed = true;
        Ok(())
    }
}

impl Drop for CodeReservation<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.store.release(&self.code);
        }
    }
}
