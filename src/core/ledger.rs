//! Inventory ledger - the only owner and mutator of spools and print logs.
//!
//! Spools keep insertion order; print logs are kept most recent first. Each
//! mutation is applied in memory as a single uninterrupted step and then the
//! affected collection is written back to the [`Store`] in full. A print and
//! its spool deduction are written together. The ledger
//! never rejects input: deductions clamp at zero, an unknown spool id is
//! tolerated, and removal of a missing spool is a no-op. Storage failures are
//! the only errors and are returned to the caller as-is.

use crate::{
    core::{
        print_log::{NewPrintLog, PrintLog},
        spool::{NewSpool, Spool, SpoolId},
        stats,
    },
    errors::Result,
    store::Store,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// A print log paired with the spool it references, if that spool still exists.
#[derive(Debug, Clone, Copy)]
pub struct LogEntry<'a> {
    /// The log itself
    pub log: &'a PrintLog,
    /// `None` when the spool has been removed
    pub spool: Option<&'a Spool>,
}

/// Result of resolving user input to a spool
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpoolLookup<'a> {
    /// Exactly one spool matched
    Found(&'a Spool),
    /// Nothing matched
    NotFound,
    /// A short prefix matched more than one spool
    Ambiguous,
}

/// Spool and print-log collections with their mutation rules
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    spools: Vec<Spool>,
    logs: Vec<PrintLog>,
    index: HashMap<SpoolId, usize>,
}

impl<S: Store> Ledger<S> {
    /// Reads both collections from `store`. Called once at startup.
    #[instrument(skip(store))]
    pub async fn load(store: S) -> Result<Self> {
        let spools = store.load_spools().await?;
        let logs = store.load_print_logs().await?;
        info!(
            spools = spools.len(),
            logs = logs.len(),
            "Loaded inventory ledger"
        );
        let mut ledger = Self {
            store,
            spools,
            logs,
            index: HashMap::new(),
        };
        ledger.reindex();
        Ok(ledger)
    }

    /// Registers a newly purchased spool at the end of the collection.
    #[instrument(skip(self))]
    pub async fn register_spool(&mut self, input: NewSpool) -> Result<Spool> {
        let spool = Spool::register(input);
        self.index.insert(spool.id, self.spools.len());
        self.spools.push(spool.clone());
        info!(spool_id = %spool.id, material = %spool.material, "Registered spool");

        self.store.save_spools(&self.spools).await?;
        Ok(spool)
    }

    /// Removes a spool. Its print logs stay exactly as they are.
    ///
    /// Returns the removed spool, or `None` if no spool had that id.
    #[instrument(skip(self))]
    pub async fn remove_spool(&mut self, spool_id: SpoolId) -> Result<Option<Spool>> {
        let Some(position) = self.index.get(&spool_id).copied() else {
            debug!("No spool to remove");
            return Ok(None);
        };
        let removed = self.spools.remove(position);
        self.reindex();
        info!(%spool_id, "Removed spool; print history retained");

        self.store.save_spools(&self.spools).await?;
        Ok(Some(removed))
    }

    /// Records a print and deducts its weight from the referenced spool.
    ///
    /// The log goes to the front of the history. If the spool exists its
    /// weight drops by `weight_used`, floored at zero, and a spool that hits
    /// zero becomes empty. An unknown spool id still gets its log recorded.
    #[instrument(skip(self))]
    pub async fn log_print(&mut self, input: NewPrintLog) -> Result<PrintLog> {
        let log = PrintLog::record(input);
        self.logs.insert(0, log.clone());

        let deducted = match self.index.get(&log.spool_id) {
            Some(&position) => {
                let spool = &mut self.spools[position];
                spool.deduct(log.weight_used);
                debug!(
                    remaining = spool.current_weight,
                    status = %spool.status,
                    "Deducted print from spool"
                );
                true
            }
            None => {
                warn!(spool_id = %log.spool_id, "Print logged against unknown spool");
                false
            }
        };
        info!(log_id = %log.id, weight_used = log.weight_used, "Logged print");

        if deducted {
            self.store.save_print(&self.logs, &self.spools).await?;
        } else {
            self.store.save_print_logs(&self.logs).await?;
        }
        Ok(log)
    }

    /// All spools in registration order.
    #[must_use]
    pub fn spools(&self) -> &[Spool] {
        &self.spools
    }

    /// All print logs, most recent first.
    #[must_use]
    pub fn print_logs(&self) -> &[PrintLog] {
        &self.logs
    }

    /// Looks up a spool by id; `None` means the spool is unknown.
    #[must_use]
    pub fn spool(&self, spool_id: SpoolId) -> Option<&Spool> {
        self.index.get(&spool_id).map(|&position| &self.spools[position])
    }

    /// Spools a print can currently be logged against.
    pub fn selectable_spools(&self) -> impl Iterator<Item = &Spool> {
        self.spools.iter().filter(|spool| spool.is_selectable())
    }

    /// The first `limit` print logs, each joined with its spool.
    #[must_use]
    pub fn recent_entries(&self, limit: usize) -> Vec<LogEntry<'_>> {
        stats::recent_print_logs(&self.logs, limit)
            .iter()
            .map(|log| LogEntry {
                log,
                spool: self.spool(log.spool_id),
            })
            .collect()
    }

    /// Every print log, each joined with its spool.
    #[must_use]
    pub fn history(&self) -> Vec<LogEntry<'_>> {
        self.recent_entries(self.logs.len())
    }

    /// Resolves a full id or an id prefix (such as the short id shown in
    /// listings) to a spool. Only the first whitespace-separated token of
    /// `input` is considered, so autocomplete labels resolve too.
    #[must_use]
    pub fn find_spool(&self, input: &str) -> SpoolLookup<'_> {
        let Some(token) = input.split_whitespace().next() else {
            return SpoolLookup::NotFound;
        };
        let token = token.to_lowercase();

        let mut matches = self
            .spools
            .iter()
            .filter(|spool| spool.id.to_string().starts_with(&token));
        match (matches.next(), matches.next()) {
            (Some(spool), None) => SpoolLookup::Found(spool),
            (Some(_), Some(_)) => SpoolLookup::Ambiguous,
            (None, _) => SpoolLookup::NotFound,
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .spools
            .iter()
            .enumerate()
            .map(|(position, spool)| (spool.id, position))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::spool::SpoolStatus;
    use crate::errors::Error;
    use crate::store::{DatabaseStore, MemoryStore};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_register_spool_starts_full_and_active() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;

        assert_eq!(spool.current_weight, 1000.0);
        assert_eq!(spool.status, SpoolStatus::Active);
        assert_eq!(ledger.spools().len(), 1);
        assert_eq!(ledger.spool(spool.id), Some(&spool));
        Ok(())
    }

    #[tokio::test]
    async fn test_register_appends_in_order() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let first = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        let second = register_test_spool(&mut ledger, "PETG", 750.0).await?;

        let ids: Vec<SpoolId> = ledger.spools().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_ne!(first.id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_log_print_deducts_weight() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;

        let log = log_test_print(&mut ledger, spool.id, 300.0).await?;

        let updated = ledger.spool(spool.id).unwrap();
        assert_eq!(updated.current_weight, 700.0);
        assert_eq!(updated.status, SpoolStatus::Active);
        assert_eq!(ledger.print_logs(), &[log.clone()]);
        assert_eq!(log.spool_id, spool.id);
        assert_eq!(log.weight_used, 300.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_log_print_clamps_at_zero_and_empties_spool() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 150.0).await?;

        log_test_print(&mut ledger, spool.id, 500.0).await?;

        let updated = ledger.spool(spool.id).unwrap();
        assert_eq!(updated.current_weight, 0.0);
        assert_eq!(updated.status, SpoolStatus::Empty);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_spool_stays_empty() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 100.0).await?;

        log_test_print(&mut ledger, spool.id, 100.0).await?;
        log_test_print(&mut ledger, spool.id, 10.0).await?;

        let updated = ledger.spool(spool.id).unwrap();
        assert_eq!(updated.current_weight, 0.0);
        assert_eq!(updated.status, SpoolStatus::Empty);
        assert_eq!(ledger.print_logs().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_archived_status_survives_deduction() -> Result<()> {
        let store = MemoryStore::new();
        let mut archived = sample_spool("ABS", 500.0);
        archived.status = SpoolStatus::Archived;
        store.save_spools(std::slice::from_ref(&archived)).await?;

        let mut ledger = Ledger::load(store).await?;
        log_test_print(&mut ledger, archived.id, 50.0).await?;

        let updated = ledger.spool(archived.id).unwrap();
        assert_eq!(updated.current_weight, 450.0);
        assert_eq!(updated.status, SpoolStatus::Archived);
        Ok(())
    }

    #[tokio::test]
    async fn test_logs_are_most_recent_first() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;

        let first = log_test_print(&mut ledger, spool.id, 10.0).await?;
        let second = log_test_print(&mut ledger, spool.id, 20.0).await?;
        let third = log_test_print(&mut ledger, spool.id, 30.0).await?;

        let ids: Vec<_> = ledger.print_logs().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let recent: Vec<_> = ledger.recent_entries(2).iter().map(|e| e.log.id).collect();
        assert_eq!(recent, vec![third.id, second.id]);
        assert_eq!(ledger.spool(spool.id).unwrap().current_weight, 940.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_log_print_against_unknown_spool_is_still_recorded() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        let stranger = SpoolId::new();

        let log = log_test_print(&mut ledger, stranger, 40.0).await?;

        assert_eq!(ledger.print_logs(), &[log]);
        assert_eq!(ledger.spool(spool.id).unwrap().current_weight, 1000.0);
        assert!(ledger.history()[0].spool.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_spool_keeps_history() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        let log = log_test_print(&mut ledger, spool.id, 300.0).await?;

        let removed = ledger.remove_spool(spool.id).await?;

        assert_eq!(removed.map(|s| s.id), Some(spool.id));
        assert!(ledger.spools().is_empty());
        assert!(ledger.spool(spool.id).is_none());
        assert_eq!(ledger.print_logs(), &[log]);
        assert_eq!(ledger.print_logs()[0].spool_id, spool.id);

        let history = ledger.history();
        assert_eq!(history.len(), 1);
        assert!(history[0].spool.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_unknown_spool_is_noop() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;

        let removed = ledger.remove_spool(SpoolId::new()).await?;

        assert!(removed.is_none());
        assert_eq!(ledger.spools(), &[spool]);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_keeps_index_consistent() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let a = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        let b = register_test_spool(&mut ledger, "PETG", 800.0).await?;
        let c = register_test_spool(&mut ledger, "ABS", 600.0).await?;

        ledger.remove_spool(a.id).await?;
        log_test_print(&mut ledger, c.id, 100.0).await?;

        assert_eq!(ledger.spool(b.id).unwrap().current_weight, 800.0);
        assert_eq!(ledger.spool(c.id).unwrap().current_weight, 500.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_weight_bounds_hold_across_operations() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let a = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        let b = register_test_spool(&mut ledger, "PETG", 300.0).await?;

        for (spool_id, grams) in [(a.id, 250.0), (b.id, 120.0), (b.id, 500.0), (a.id, 999.0)] {
            log_test_print(&mut ledger, spool_id, grams).await?;
            for spool in ledger.spools() {
                assert!(spool.current_weight >= 0.0);
                assert!(spool.current_weight <= spool.initial_weight);
                if spool.current_weight == 0.0 {
                    assert_eq!(spool.status, SpoolStatus::Empty);
                }
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_every_mutation_is_persisted() -> Result<()> {
        let store = MemoryStore::new();
        let mut ledger = Ledger::load(store.clone()).await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        let other = register_test_spool(&mut ledger, "PETG", 500.0).await?;
        log_test_print(&mut ledger, spool.id, 250.0).await?;
        ledger.remove_spool(other.id).await?;

        let reloaded = Ledger::load(store).await?;
        assert_eq!(reloaded.spools(), ledger.spools());
        assert_eq!(reloaded.print_logs(), ledger.print_logs());
        assert_eq!(reloaded.spool(spool.id).unwrap().current_weight, 750.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_ledger_persists_through_database() -> Result<()> {
        let db = setup_test_db().await?;
        let keys = crate::config::settings::StorageConfig::default();

        let mut ledger = Ledger::load(DatabaseStore::new(db.clone(), keys.clone())).await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        log_test_print(&mut ledger, spool.id, 300.0).await?;

        let reloaded = Ledger::load(DatabaseStore::new(db, keys)).await?;
        assert_eq!(reloaded.spool(spool.id).unwrap().current_weight, 700.0);
        assert_eq!(reloaded.print_logs().len(), 1);
        assert_eq!(reloaded.print_logs()[0].weight_used, 300.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() -> Result<()> {
        let mut ledger = Ledger::load(FailingStore).await?;
        let result = ledger
            .register_spool(new_spool("PLA", 1000.0))
            .await;
        assert!(matches!(result, Err(Error::Storage { .. })));
        Ok(())
    }

    /// Accepts everything except writes that include the spool collection.
    #[derive(Debug, Clone)]
    struct SpoolWritesRejected(MemoryStore);

    impl Store for SpoolWritesRejected {
        async fn load_spools(&self) -> Result<Vec<Spool>> {
            self.0.load_spools().await
        }

        async fn load_print_logs(&self) -> Result<Vec<PrintLog>> {
            self.0.load_print_logs().await
        }

        async fn save_spools(&self, _spools: &[Spool]) -> Result<()> {
            Err(Error::Storage {
                message: "spool document is read-only".to_string(),
            })
        }

        async fn save_print_logs(&self, logs: &[PrintLog]) -> Result<()> {
            self.0.save_print_logs(logs).await
        }

        async fn save_print(&self, _logs: &[PrintLog], spools: &[Spool]) -> Result<()> {
            self.save_spools(spools).await
        }
    }

    #[tokio::test]
    async fn test_failed_print_save_leaves_storage_untouched() -> Result<()> {
        let backing = MemoryStore::new();
        let mut ledger = Ledger::load(backing.clone()).await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;

        let mut ledger = Ledger::load(SpoolWritesRejected(backing.clone())).await?;
        let result = log_test_print(&mut ledger, spool.id, 300.0).await;
        assert!(matches!(result, Err(Error::Storage { .. })));

        let restarted = Ledger::load(backing).await?;
        assert!(restarted.print_logs().is_empty());
        assert_eq!(restarted.spool(spool.id).unwrap().current_weight, 1000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_print_save_rolls_back_database() -> Result<()> {
        let db = setup_test_db().await?;
        let keys = crate::config::settings::StorageConfig::default();
        let mut ledger = Ledger::load(DatabaseStore::new(db.clone(), keys.clone())).await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        reject_writes_to(&db, &keys.spools_key).await?;

        let result = log_test_print(&mut ledger, spool.id, 300.0).await;
        assert!(matches!(result, Err(Error::Database(_))));

        let restarted = Ledger::load(DatabaseStore::new(db, keys)).await?;
        assert!(restarted.print_logs().is_empty());
        assert_eq!(restarted.spool(spool.id).unwrap().current_weight, 1000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_print_against_unknown_spool_saves_only_logs() -> Result<()> {
        let backing = MemoryStore::new();
        let mut ledger = Ledger::load(SpoolWritesRejected(backing.clone())).await?;
        let log = log_test_print(&mut ledger, SpoolId::new(), 20.0).await?;

        let restarted = Ledger::load(backing).await?;
        assert_eq!(restarted.print_logs(), &[log]);
        Ok(())
    }

    #[tokio::test]
    async fn test_selectable_spools() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let full = register_test_spool(&mut ledger, "PLA", 1000.0).await?;
        let drained = register_test_spool(&mut ledger, "PETG", 100.0).await?;
        log_test_print(&mut ledger, drained.id, 100.0).await?;

        let ids: Vec<_> = ledger.selectable_spools().map(|s| s.id).collect();
        assert_eq!(ids, vec![full.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_spool_by_full_or_short_id() -> Result<()> {
        let mut ledger = setup_ledger().await?;
        let spool = register_test_spool(&mut ledger, "PLA", 1000.0).await?;

        assert_eq!(
            ledger.find_spool(&spool.id.to_string()),
            SpoolLookup::Found(&spool)
        );
        assert_eq!(ledger.find_spool(&spool.id.short()), SpoolLookup::Found(&spool));
        let label = format!("{} PLA Galaxy Black (1000g)", spool.id.short());
        assert_eq!(ledger.find_spool(&label), SpoolLookup::Found(&spool));
        assert_eq!(
            ledger.find_spool(&spool.id.short().to_uppercase()),
            SpoolLookup::Found(&spool)
        );
        assert_eq!(ledger.find_spool("zzzz"), SpoolLookup::NotFound);
        assert_eq!(ledger.find_spool("   "), SpoolLookup::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_spool_ambiguous_prefix() -> Result<()> {
        let store = MemoryStore::new();
        let mut first = sample_spool("PLA", 1000.0);
        first.id = SpoolId::from(uuid::Uuid::from_u128(0xabcd_0000_0000_0000_0000_0000_0000_0001));
        let mut second = sample_spool("PETG", 1000.0);
        second.id = SpoolId::from(uuid::Uuid::from_u128(0xabcd_0000_0000_0000_0000_0000_0000_0002));
        store.save_spools(&[first.clone(), second.clone()]).await?;

        let ledger = Ledger::load(store).await?;
        assert_eq!(ledger.find_spool("abcd"), SpoolLookup::Ambiguous);
        assert_eq!(
            ledger.find_spool(&second.id.to_string()),
            SpoolLookup::Found(&second)
        );
        Ok(())
    }
}
