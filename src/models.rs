//! Domain models passed between the record store, the persistence layer and
//! the console front-end. They stay plain data holders so the other layers
//! own all of the behavior.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One CD entry in the inventory.
pub struct Record {
    /// User-supplied number. Nothing enforces uniqueness, so two records may
    /// share an id.
    pub id: i64,
    /// Album title, never empty once it reaches the inventory.
    pub title: String,
    /// Performing artist, never empty once it reaches the inventory.
    pub artist: String,
}

impl Record {
    /// Build a record from its three fields. No validation happens here; the
    /// console layer rejects empty text before a record is ever built.
    pub fn new(id: i64, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl fmt::Display for Record {
    /// Write the listing row, `ID<TAB>Title (by:Artist)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{} (by:{})", self.id, self.title, self.artist)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered collection of every record the session currently knows about.
/// Insertion order is preserved and duplicate ids are allowed.
pub struct Inventory {
    records: Vec<Record>,
}

impl Inventory {
    /// Empty inventory, the state before anything has been loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the inventory holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Swap in a freshly loaded set of records, dropping whatever was held.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove the earliest record whose id matches.
    pub(crate) fn remove_first(&mut self, id: i64) -> Option<Record> {
        let index = self.records.iter().position(|record| record.id == id)?;
        Some(self.records.remove(index))
    }
}

impl From<Vec<Record>> for Inventory {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_display_matches_listing_row() {
        let record = Record::new(7, "Abbey Road", "The Beatles");
        assert_eq!(record.to_string(), "7\tAbbey Road (by:The Beatles)");
    }

    #[test]
    fn replace_discards_previous_records() {
        let mut inventory = Inventory::from(vec![Record::new(1, "A", "B")]);
        inventory.replace(vec![Record::new(2, "C", "D"), Record::new(3, "E", "F")]);
        let ids: Vec<i64> = inventory.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
