//! Stats report normalization.
//!
//! Normalization turns a raw snapshot into a [`RTCStatsCategorizedReport`]:
//! every record is classified, projected through its category schema and
//! appended to its category group. Failures are isolated per record; a record
//! that cannot be classified is dropped and reported as a diagnostic.

#[cfg(test)]
mod normalizer_test;

use crate::category::RTCStatsCategory;
use crate::classifier::RTCStatsClassifier;
use crate::error::{Error, Result};
use crate::record::{RTCRawStats, RTCRawStatsSnapshot};
use crate::report::{RTCDroppedStats, RTCNormalizedStats, RTCStatsCategorizedReport};
use crate::schema::{RTCStatsFieldSchema, RTCStatsSchemaTable};
use log::{debug, trace};
use std::borrow::Cow;

/// Projects a raw record onto a field schema.
///
/// Fields come out in schema order. Schema fields missing from the record are
/// omitted; record fields outside the schema are dropped. Values are copied
/// unchanged.
pub fn project(record: &RTCRawStats, schema: RTCStatsFieldSchema) -> RTCNormalizedStats {
    let mut stats = RTCNormalizedStats::with_capacity(schema.len().min(record.len()));
    for field in schema.iter() {
        if let Some(value) = record.get(field) {
            stats.insert(field, value.clone());
        }
    }
    stats
}

/// Normalizes raw stats snapshots into categorized reports.
///
/// A normalizer holds no per-call state: the same normalizer can be used for
/// any number of snapshots, from any number of threads.
#[derive(Debug, Clone)]
pub struct RTCStatsNormalizer {
    schema_table: Cow<'static, RTCStatsSchemaTable>,
    classifier: RTCStatsClassifier,
}

impl Default for RTCStatsNormalizer {
    fn default() -> Self {
        RTCStatsNormalizer {
            schema_table: Cow::Borrowed(RTCStatsSchemaTable::builtin()),
            classifier: RTCStatsClassifier::default(),
        }
    }
}

impl RTCStatsNormalizer {
    pub fn new() -> Self {
        RTCStatsNormalizer::default()
    }

    pub fn schema_table(&self) -> &RTCStatsSchemaTable {
        &self.schema_table
    }

    pub fn classifier(&self) -> &RTCStatsClassifier {
        &self.classifier
    }

    /// Classifies one record; see [`RTCStatsClassifier::classify`].
    pub fn classify(&self, record: &RTCRawStats) -> Result<RTCStatsCategory> {
        self.classifier.classify(record)
    }

    /// Classifies and projects one record.
    ///
    /// Fails with [`Error::ErrUnclassifiableRecord`] if the record cannot be
    /// classified.
    pub fn normalize_record(
        &self,
        record: &RTCRawStats,
    ) -> Result<(RTCStatsCategory, RTCNormalizedStats)> {
        let category = self.classifier.classify(record)?;
        let schema = self.schema_table.schema_for(category)?;
        Ok((category, project(record, schema)))
    }

    /// Normalizes a snapshot.
    ///
    /// The report has a group for every category, even if the snapshot holds
    /// no record of it. Entries rejected when the snapshot was built and
    /// records that cannot be classified are skipped and listed in
    /// [`RTCStatsCategorizedReport::dropped`]. Schema tables register every
    /// category, so no record can fail the whole call.
    pub fn normalize(&self, snapshot: &RTCRawStatsSnapshot) -> Result<RTCStatsCategorizedReport> {
        let mut report = RTCStatsCategorizedReport::new(self.schema_table.all_categories());

        for rejected in snapshot.rejected() {
            debug!("dropping stats entry {:?}: {}", rejected.id, rejected.reason);
            report.push_dropped(RTCDroppedStats {
                id: rejected.id.clone(),
                stats_type: None,
                reason: rejected.reason.clone(),
            });
        }

        for record in snapshot.iter() {
            let category = match self.classifier.classify(record) {
                Ok(category) => category,
                Err(err) => {
                    debug!("dropping stats record {:?}: {err}", record.id());
                    let reason = match err {
                        Error::ErrUnclassifiableRecord { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    report.push_dropped(RTCDroppedStats {
                        id: record.id().map(str::to_owned),
                        stats_type: record.stats_type().map(str::to_owned),
                        reason,
                    });
                    continue;
                }
            };

            let schema = self.schema_table.schema_for(category)?;
            trace!(
                "stats record {:?} classified as {}",
                record.id().unwrap_or_default(),
                category
            );
            report.push(category, project(record, schema));
        }

        if report.dropped_count() > 0 {
            debug!(
                "dropped {} of {} stats entries",
                report.dropped_count(),
                snapshot.len() + snapshot.rejected().len()
            );
        }

        Ok(report)
    }
}

/// Normalizes a snapshot with the built-in schema table and the default
/// classifier.
pub fn normalize_snapshot(snapshot: &RTCRawStatsSnapshot) -> Result<RTCStatsCategorizedReport> {
    RTCStatsNormalizer::default().normalize(snapshot)
}

#[derive(Default)]
pub struct RTCStatsNormalizerBuilder {
    /// schema_table replaces the built-in schema table, e.g. with one tracking
    /// a newer revision of the stats dictionaries.
    pub(crate) schema_table: Option<RTCStatsSchemaTable>,

    /// classifier replaces the default classifier.
    pub(crate) classifier: Option<RTCStatsClassifier>,
}

impl RTCStatsNormalizerBuilder {
    pub fn new() -> Self {
        RTCStatsNormalizerBuilder::default()
    }

    pub fn with_schema_table(mut self, schema_table: RTCStatsSchemaTable) -> Self {
        self.schema_table = Some(schema_table);
        self
    }

    pub fn with_classifier(mut self, classifier: RTCStatsClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> RTCStatsNormalizer {
        RTCStatsNormalizer {
            schema_table: match self.schema_table {
                Some(schema_table) => Cow::Owned(schema_table),
                None => Cow::Borrowed(RTCStatsSchemaTable::builtin()),
            },
            classifier: self.classifier.unwrap_or_default(),
        }
    }
}
