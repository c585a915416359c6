//! Record export.
//!
//! JSON is the record's serde form: section → category → string or `null`.
//! CSV is one wide row per record with a `Section.Category` column for each
//! category, empty when the category is absent. Columns are taken from the
//! first record; records from one engine always share them.

use std::io;

use callsift_types::{Record, Section};

use crate::error::ExportError;

/// Pretty-printed JSON for one record.
pub fn to_json_pretty(record: &Record) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Pretty-printed JSON array for a batch, in input order.
pub fn batch_to_json_pretty(records: &[Record]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

fn columns(record: &Record) -> Vec<(Section, &str)> {
    record.rows().map(|(section, category, _)| (section, category)).collect()
}

fn header(columns: &[(Section, &str)]) -> Vec<String> {
    columns
        .iter()
        .map(|(section, category)| format!("{}.{}", section.title(), category))
        .collect()
}

fn values<'r>(record: &'r Record, columns: &[(Section, &str)]) -> Vec<&'r str> {
    columns
        .iter()
        .map(|&(section, category)| record.get(section, category).unwrap_or(""))
        .collect()
}

/// Writes one record as a header line and a single row.
pub fn write_csv<W: io::Write>(out: W, record: &Record) -> Result<(), ExportError> {
    let columns = columns(record);
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header(&columns))?;
    writer.write_record(values(record, &columns))?;
    writer.flush()?;
    Ok(())
}

/// Writes labelled records, one row each, with a leading `source` column.
pub fn write_csv_batch<W: io::Write>(
    out: W,
    records: &[(&str, &Record)],
) -> Result<(), ExportError> {
    let columns = records
        .first()
        .map(|&(_, record)| columns(record))
        .unwrap_or_default();

    let mut writer = csv::Writer::from_writer(out);
    let mut head = vec!["source".to_owned()];
    head.extend(header(&columns));
    writer.write_record(&head)?;

    for &(source, record) in records {
        let mut row = vec![source];
        row.extend(values(record, &columns));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
