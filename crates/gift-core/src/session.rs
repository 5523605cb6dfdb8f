//! Explicit command dispatch over the session ledger.
//!
//! Every user action is a [`Command`]. [`reduce`] computes the next ledger without touching
//! the current one, and [`LedgerSession::apply`] commits it only when the command succeeds,
//! so a failed action always leaves prior state in place.

use gift_domain::{CoercionWarning, GiftRecord, Ledger};

use crate::{CoreError, GiftStore, ImportService, LedgerService, RawTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddRecord(GiftRecord),
    UpdateRecord { index: usize, record: GiftRecord },
    DeleteRecord { index: usize },
    /// Commits an edited copy of the whole table.
    ReplaceAll(Vec<GiftRecord>),
    ImportTable(RawTable),
    /// Replaces the ledger with rows read back from a store.
    LoadTable(Vec<GiftRecord>),
    ExportTable,
    PersistTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Added { index: usize },
    Updated { index: usize },
    Deleted { index: usize, record: GiftRecord },
    /// The command targeted a row that does not exist.
    Unchanged { index: usize },
    Replaced { count: usize },
    Imported { count: usize, warnings: CoercionWarning },
    Loaded { count: usize },
    /// Snapshot for the caller to write out as a file.
    Export(Ledger),
    /// Snapshot for the caller to hand to a store.
    Persist(Ledger),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// `None` means the ledger is unchanged.
    pub next: Option<Ledger>,
    pub outcome: CommandOutcome,
}

impl Transition {
    fn changed(next: Ledger, outcome: CommandOutcome) -> Self {
        Self {
            next: Some(next),
            outcome,
        }
    }

    fn unchanged(outcome: CommandOutcome) -> Self {
        Self {
            next: None,
            outcome,
        }
    }
}

/// Computes the effect of `command` on `ledger`.
pub fn reduce(ledger: &Ledger, command: Command) -> Result<Transition, CoreError> {
    match command {
        Command::AddRecord(record) => {
            let mut next = ledger.clone();
            let index = LedgerService::add(&mut next, record)?;
            Ok(Transition::changed(next, CommandOutcome::Added { index }))
        }
        Command::UpdateRecord { index, record } => {
            let mut next = ledger.clone();
            if LedgerService::update(&mut next, index, record)? {
                Ok(Transition::changed(next, CommandOutcome::Updated { index }))
            } else {
                Ok(Transition::unchanged(CommandOutcome::Unchanged { index }))
            }
        }
        Command::DeleteRecord { index } => {
            let mut next = ledger.clone();
            match LedgerService::remove(&mut next, index) {
                Some(record) => Ok(Transition::changed(
                    next,
                    CommandOutcome::Deleted { index, record },
                )),
                None => Ok(Transition::unchanged(CommandOutcome::Unchanged { index })),
            }
        }
        Command::ReplaceAll(records) => {
            let mut next = Ledger::new();
            LedgerService::replace_all(&mut next, records)?;
            let count = next.len();
            Ok(Transition::changed(next, CommandOutcome::Replaced { count }))
        }
        Command::ImportTable(table) => {
            let outcome = ImportService::import_table(&table)?;
            let count = outcome.ledger.len();
            Ok(Transition::changed(
                outcome.ledger,
                CommandOutcome::Imported {
                    count,
                    warnings: outcome.warnings,
                },
            ))
        }
        Command::LoadTable(records) => {
            let mut next = Ledger::new();
            LedgerService::replace_all(&mut next, records)?;
            let count = next.len();
            Ok(Transition::changed(next, CommandOutcome::Loaded { count }))
        }
        Command::ExportTable => Ok(Transition::unchanged(CommandOutcome::Export(
            ledger.clone(),
        ))),
        Command::PersistTable => Ok(Transition::unchanged(CommandOutcome::Persist(
            ledger.clone(),
        ))),
    }
}

/// Session-scoped ledger state owned by the caller's context.
#[derive(Debug, Clone, Default)]
pub struct LedgerSession {
    ledger: Ledger,
}

impl LedgerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    /// Current snapshot for rendering.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Runs `command`, committing the next state only on success.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, CoreError> {
        let Transition { next, outcome } = reduce(&self.ledger, command)?;
        if let Some(next) = next {
            self.ledger = next;
        }
        Ok(outcome)
    }

    /// Writes the current table to `store`. The in-memory ledger is never modified.
    pub fn persist_to<S: GiftStore + ?Sized>(&mut self, store: &mut S) -> Result<usize, CoreError> {
        let CommandOutcome::Persist(snapshot) = self.apply(Command::PersistTable)? else {
            return Err(CoreError::Persistence("persist produced no snapshot".into()));
        };
        store.replace_all(snapshot.records())?;
        tracing::info!(rows = snapshot.len(), location = %store.location(), "gift table saved");
        Ok(snapshot.len())
    }

    /// Replaces the ledger with the contents of `store`.
    pub fn load_from<S: GiftStore + ?Sized>(&mut self, store: &S) -> Result<usize, CoreError> {
        let records = store.load_all()?;
        match self.apply(Command::LoadTable(records))? {
            CommandOutcome::Loaded { count } => {
                tracing::info!(rows = count, location = %store.location(), "gift table loaded");
                Ok(count)
            }
            _ => Ok(self.ledger.len()),
        }
    }
}
