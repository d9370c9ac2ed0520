//! Cross-reference tables
//!
//! Each section of the experiment file is an ordered table of distinct
//! records. A treatment row stores the 1-based position of its record in
//! every table, or 0 when the section is absent for that treatment.
//! Equality is structural, so identical management blocks coming from
//! different experiments collapse onto one row.

use rustc_hash::FxHashMap;
use std::hash::Hash;
use tracing::debug;

/// A record that can be stored in a section table.
pub trait Record: Clone + Eq + Hash {
    /// Blank records are never stored and map to index 0.
    fn is_blank(&self) -> bool;
}

impl<T: Record> Record for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Append-only table of distinct records.
#[derive(Debug, Clone)]
pub struct SectionTable<T: Record> {
    name: &'static str,
    rows: Vec<T>,
    index: FxHashMap<T, usize>,
}

impl<T: Record> SectionTable<T> {
    pub fn new(name: &'static str) -> Self {
        SectionTable {
            name,
            rows: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// 1-based index of `record`, appending it on first sight. Blank
    /// records return 0 and are not stored.
    pub fn intern(&mut self, record: T) -> usize {
        if record.is_blank() {
            return 0;
        }
        if let Some(&i) = self.index.get(&record) {
            return i;
        }
        self.rows.push(record.clone());
        let i = self.rows.len();
        self.index.insert(record, i);
        debug!(table = self.name, rows = i, "new section record");
        i
    }

    /// 1-based index of a record already in the table.
    pub fn position(&self, record: &T) -> Option<usize> {
        self.index.get(record).copied()
    }

    /// Record at a 1-based index.
    pub fn get(&self, index: usize) -> Option<&T> {
        index.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with their 1-based index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.rows.iter().enumerate().map(|(i, r)| (i + 1, r))
    }
}
