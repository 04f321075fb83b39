use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    catalog::{SignalCatalog, SignalCategory, SignalKey},
    selection::error::{SelectionError, invalid_ticker},
};

pub type Ticker = String;

/// Owned copy of the chosen signals and companies. Both collections are sets;
/// signals iterate in catalog order, tickers alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub signals: BTreeSet<SignalKey>,
    pub companies: BTreeSet<Ticker>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty() && self.companies.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Signal,
    Company,
}

/// Session-scoped selection state. Created empty; only the toggle operations
/// mutate it.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selection: Selection,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `key`. Returns whether the key is selected afterwards.
    pub fn toggle_signal(&mut self, key: SignalKey) -> bool {
        if self.selection.signals.remove(&key) {
            tracing::debug!(target: "selection", signal = %key, "signal_deselected");
            return false;
        }

        self.selection.signals.insert(key);
        tracing::debug!(target: "selection", signal = %key, "signal_selected");
        true
    }

    /// Flips membership of `ticker` after trimming and upper-casing it.
    /// Returns whether the ticker is selected afterwards.
    pub fn toggle_company(&mut self, ticker: &str) -> Result<bool, SelectionError> {
        let ticker = normalize_ticker(ticker)?;
        if self.selection.companies.remove(&ticker) {
            tracing::debug!(target: "selection", ticker = %ticker, "company_deselected");
            return Ok(false);
        }

        tracing::debug!(target: "selection", ticker = %ticker, "company_selected");
        self.selection.companies.insert(ticker);
        Ok(true)
    }

    pub fn snapshot(&self) -> Selection {
        self.selection.clone()
    }

    /// Membership query by textual id. Unknown signal keys and blank tickers
    /// are simply not selected.
    pub fn is_selected(&self, kind: SelectionKind, id: &str) -> bool {
        match kind {
            SelectionKind::Signal => id
                .parse::<SignalKey>()
                .is_ok_and(|key| self.is_signal_selected(key)),
            SelectionKind::Company => {
                normalize_ticker(id).is_ok_and(|ticker| self.selection.companies.contains(&ticker))
            }
        }
    }

    pub fn is_signal_selected(&self, key: SignalKey) -> bool {
        self.selection.signals.contains(&key)
    }

    pub fn selected_in_category(&self, category: SignalCategory) -> usize {
        let catalog = SignalCatalog;
        self.selection
            .signals
            .iter()
            .filter(|key| catalog.get(**key).category == category)
            .count()
    }

    pub fn has_signals(&self) -> bool {
        !self.selection.signals.is_empty()
    }

    pub fn has_companies(&self) -> bool {
        !self.selection.companies.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }
}

fn normalize_ticker(raw: &str) -> Result<Ticker, SelectionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_ticker("company ticker cannot be empty"));
    }
    Ok(trimmed.to_ascii_uppercase())
}
