use crate::errors::HistoryError;
use crate::models::ConversionRecord;
use crate::rates::Country;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Bounded, in-memory log of the most recent conversions. Cloning shares the
/// same buffer.
#[derive(Clone)]
pub struct HistoryStore {
    inner: Arc<Mutex<VecDeque<ConversionRecord>>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        // A zero capacity would drop every record.
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity + 1))),
            capacity,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<ConversionRecord>>, HistoryError> {
        self.inner.lock().map_err(|_| HistoryError::Poisoned)
    }

    /// Converts `score`, stamps the record and appends it, evicting the oldest
    /// record once capacity is exceeded.
    ///
    /// The record is built while the lock is held so insertion order and
    /// timestamp order always agree.
    pub fn record(
        &self,
        from: Country,
        to: Country,
        score: f64,
    ) -> Result<ConversionRecord, HistoryError> {
        let mut records = self.lock()?;
        let record = ConversionRecord::new(from, to, score);
        records.push_back(record.clone());
        while records.len() > self.capacity {
            records.pop_front();
        }
        Ok(record)
    }

    /// Snapshot of the stored records, most recent first.
    pub fn recent(&self) -> Result<Vec<ConversionRecord>, HistoryError> {
        Ok(self.lock()?.iter().rev().cloned().collect())
    }

    pub fn len(&self) -> Result<usize, HistoryError> {
        Ok(self.lock()?.len())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Leaves the lock poisoned by panicking while holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let inner = Arc::clone(&self.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock();
            panic!("poisoning history lock");
        })
        .join();
    }
}
