//! Process-lifetime collection of loaded spectra
//!
//! Spectra are keyed by display name (the source file's base name) and the
//! store enforces at-most-one spectrum per name. Mutated only by the
//! import/remove operations, which are single-caller by design.

use std::collections::BTreeMap;

use crate::app::models::Spectrum;
use crate::{Error, Result};
use tracing::{debug, info};

/// Collection of loaded spectra keyed by display name
#[derive(Debug, Default)]
pub struct SpectrumStore {
    spectra: BTreeMap<String, Spectrum>,
}

impl SpectrumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a spectrum under its display name
    ///
    /// Rejects a duplicate name without touching the existing entry; the
    /// caller reports the collision and the rest of the batch proceeds.
    pub fn insert(&mut self, spectrum: Spectrum) -> Result<()> {
        let name = spectrum.display_name();
        if self.spectra.contains_key(&name) {
            return Err(Error::duplicate_name(name));
        }

        info!("Loaded spectrum '{}' ({} points)", name, spectrum.len());
        self.spectra.insert(name, spectrum);
        Ok(())
    }

    /// Remove a spectrum by display name
    pub fn remove(&mut self, name: &str) -> Option<Spectrum> {
        let removed = self.spectra.remove(name);
        if removed.is_some() {
            debug!("Removed spectrum '{}'", name);
        }
        removed
    }

    /// Look up a spectrum by display name
    pub fn get(&self, name: &str) -> Option<&Spectrum> {
        self.spectra.get(name)
    }

    /// Iterate spectra in display-name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Spectrum)> {
        self.spectra.iter()
    }

    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    /// True when every loaded spectrum shares the same joined unit label
    ///
    /// An empty store and a single spectrum are trivially uniform.
    pub fn labels_uniform(&self) -> bool {
        let mut labels = self.spectra.values().map(|s| s.unit_label.joined());
        match labels.next() {
            Some(first) => labels.all(|label| label == first),
            None => true,
        }
    }

    /// The unit label of the first spectrum in store order, if any
    pub fn first_unit_label(&self) -> Option<&crate::app::models::UnitLabel> {
        self.spectra.values().next().map(|s| &s.unit_label)
    }
}
