use chrono::{Local, NaiveDate};
use shared::{
    domain::{PledgeDraft, PledgeId, PledgeRecord},
    error::PledgeError,
};
use tracing::{debug, info, warn};

mod kv;
mod seed;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use seed::seed_records;

/// Key the whole pledge list is stored under.
pub const PLEDGES_KEY: &str = "climatePledges";

/// Single owner of the pledge list. Records are only ever appended and every
/// append rewrites the complete list under [`PLEDGES_KEY`].
pub struct PledgeStore<S: KeyValueStore> {
    kv: S,
    records: Vec<PledgeRecord>,
}

impl<S: KeyValueStore> PledgeStore<S> {
    /// Reads the persisted list. Missing, empty, or unparsable data is
    /// replaced by the seed set, which is written back right away. When the
    /// store cannot be read at all the seed is kept in memory only and the
    /// stored value is left untouched.
    pub fn load(kv: S) -> Self {
        match read_records(&kv) {
            Ok(records) if !records.is_empty() => {
                debug!(count = records.len(), "loaded persisted pledges");
                return Self { kv, records };
            }
            Ok(_) => info!("no persisted pledges, seeding defaults"),
            Err(err @ PledgeError::Storage(_)) => {
                warn!("{err}; using seed pledges without overwriting storage");
                return Self {
                    kv,
                    records: seed_records(),
                };
            }
            Err(err) => warn!("{err}; falling back to seed pledges"),
        }

        let store = Self {
            kv,
            records: seed_records(),
        };
        if let Err(err) = store.persist() {
            warn!("failed to persist seed pledges: {err}");
        }
        store
    }

    pub fn records(&self) -> &[PledgeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: PledgeId) -> Option<&PledgeRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Appends a pledge dated today by the local clock.
    pub fn append(&mut self, draft: PledgeDraft) -> Result<PledgeRecord, PledgeError> {
        self.append_dated(draft, Local::now().date_naive())
    }

    /// Appends a pledge with an explicit date. Either the record is both in
    /// memory and persisted, or neither.
    pub fn append_dated(
        &mut self,
        draft: PledgeDraft,
        date: NaiveDate,
    ) -> Result<PledgeRecord, PledgeError> {
        if draft.commitments.is_empty() {
            return Err(PledgeError::no_commitment_selected());
        }

        let record = draft.into_record(PledgeId::for_position(self.records.len()), date);
        self.records.push(record.clone());
        if let Err(err) = self.persist() {
            self.records.pop();
            return Err(err);
        }

        info!(id = %record.id, commitments = record.commitments.len(), "pledge recorded");
        Ok(record)
    }

    fn persist(&self) -> Result<(), PledgeError> {
        let bytes = serde_json::to_vec(&self.records)
            .map_err(|err| PledgeError::Storage(format!("failed to encode pledges: {err}")))?;
        self.kv
            .set(PLEDGES_KEY, &bytes)
            .map_err(|err| PledgeError::Storage(format!("{err:#}")))
    }
}

fn read_records(kv: &impl KeyValueStore) -> Result<Vec<PledgeRecord>, PledgeError> {
    let Some(bytes) = kv
        .get(PLEDGES_KEY)
        .map_err(|err| PledgeError::Storage(format!("{err:#}")))?
    else {
        return Ok(Vec::new());
    };

    let records: Option<Vec<PledgeRecord>> = serde_json::from_slice(&bytes)
        .map_err(|err| PledgeError::StorageParse(err.to_string()))?;
    Ok(records.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
