//! Category schema table.
//!
//! The schema table maps every [`RTCStatsCategory`] to the ordered whitelist
//! of field names a normalized record of that category may carry. The
//! built-in table is immutable process-wide data; an alternative table (for a
//! newer revision of the stats dictionaries) is swapped in as a whole.


mod fields;

pub use fields::BUILTIN_REVISION;

use crate::category::RTCStatsCategory;
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

/// The field whitelist for one category.
#[derive(Clone, Copy)]
pub struct RTCStatsFieldSchema {
    category: RTCStatsCategory,
    fragments: &'static [&'static [&'static str]],
}

impl RTCStatsFieldSchema {
    pub fn category(&self) -> RTCStatsCategory {
        self.category
    }

    /// Returns the field names in schema order.
    pub fn iter(self) -> impl Iterator<Item = &'static str> {
        self.fragments
            .iter()
            .flat_map(|fragment| fragment.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.fragments.iter().map(|fragment| fragment.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.iter().any(|f| f == field)
    }

    pub fn to_vec(&self) -> Vec<&'static str> {
        self.iter().collect()
    }
}

impl fmt::Debug for RTCStatsFieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RTCStatsFieldSchema")
            .field("category", &self.category)
            .field("fields", &self.to_vec())
            .finish()
    }
}

// Two schemas are equal when they list the same fields in the same order,
// however the fields are split into fragments.
impl PartialEq for RTCStatsFieldSchema {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.iter().eq(other.iter())
    }
}

impl Eq for RTCStatsFieldSchema {}

/// One row of a schema table.
#[derive(Debug, Clone, Copy)]
pub struct RTCStatsSchemaEntry {
    pub category: RTCStatsCategory,
    pub fragments: &'static [&'static [&'static str]],
}

impl RTCStatsSchemaEntry {
    pub const fn new(
        category: RTCStatsCategory,
        fragments: &'static [&'static [&'static str]],
    ) -> Self {
        Self {
            category,
            fragments,
        }
    }

    pub fn schema(&self) -> RTCStatsFieldSchema {
        RTCStatsFieldSchema {
            category: self.category,
            fragments: self.fragments,
        }
    }
}

static BUILTIN: RTCStatsSchemaTable = RTCStatsSchemaTable {
    revision: Cow::Borrowed(BUILTIN_REVISION),
    entries: Cow::Borrowed(fields::BUILTIN_ENTRIES),
};

/// A closed, revisioned registry of category schemas.
#[derive(Debug, Clone)]
pub struct RTCStatsSchemaTable {
    revision: Cow<'static, str>,
    entries: Cow<'static, [RTCStatsSchemaEntry]>,
}

impl Default for RTCStatsSchemaTable {
    fn default() -> Self {
        RTCStatsSchemaTable::builtin().clone()
    }
}

impl RTCStatsSchemaTable {
    /// Returns the built-in table, shared by every caller in the process.
    pub fn builtin() -> &'static RTCStatsSchemaTable {
        &BUILTIN
    }

    /// Builds a validated table from a complete set of entries.
    ///
    /// Fails with [`Error::ErrDuplicateCategory`], [`Error::ErrEmptySchema`],
    /// [`Error::ErrDuplicateField`] or, when a category has no entry,
    /// [`Error::ErrMissingCategory`].
    pub fn new(
        revision: impl Into<Cow<'static, str>>,
        entries: Vec<RTCStatsSchemaEntry>,
    ) -> Result<Self> {
        let table = RTCStatsSchemaTable {
            revision: revision.into(),
            entries: Cow::Owned(entries),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn entries(&self) -> &[RTCStatsSchemaEntry] {
        &self.entries
    }

    /// Checks that every category appears exactly once, and that every schema
    /// is non-empty and free of duplicate field names.
    pub fn validate(&self) -> Result<()> {
        let mut categories = HashSet::with_capacity(self.entries.len());
        for entry in self.entries.iter() {
            if !categories.insert(entry.category) {
                return Err(Error::ErrDuplicateCategory(entry.category.to_string()));
            }

            let schema = entry.schema();
            if schema.is_empty() {
                return Err(Error::ErrEmptySchema(entry.category.to_string()));
            }

            let mut fields = HashSet::with_capacity(schema.len());
            for field in schema.iter() {
                if !fields.insert(field) {
                    return Err(Error::ErrDuplicateField {
                        category: entry.category.to_string(),
                        field: field.to_owned(),
                    });
                }
            }
        }

        if let Some(missing) = RTCStatsCategory::ALL
            .into_iter()
            .find(|category| !categories.contains(category))
        {
            return Err(Error::ErrMissingCategory(missing.to_string()));
        }

        Ok(())
    }

    /// Returns the field whitelist registered for `category`.
    ///
    /// Validated tables register every category; [`Error::ErrUnknownCategory`]
    /// is only returned for a table whose invariants were broken.
    pub fn schema_for(&self, category: RTCStatsCategory) -> Result<RTCStatsFieldSchema> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(RTCStatsSchemaEntry::schema)
            .ok_or_else(|| Error::ErrUnknownCategory(category.to_string()))
    }

    /// Returns every registered category, in table order.
    pub fn all_categories(&self) -> impl Iterator<Item = RTCStatsCategory> + '_ {
        self.entries.iter().map(|entry| entry.category)
    }

    pub fn contains(&self, category: RTCStatsCategory) -> bool {
        self.entries.iter().any(|entry| entry.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
