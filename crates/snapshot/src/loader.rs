//! Loaders turning snapshot CSV files into relations.
//!
//! Each file is opened on tokio's blocking pool and parsed row by row as
//! the CSV reader pulls it in, so only the relation being built is held in
//! memory.
//!
//! The first row is a header; columns are matched by header name, so
//! column order and extra columns do not matter. Any bad row aborts the
//! load.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use resolver_ops_core::{
    AttributeRelation, CoreError, Identifier, OwnershipRecord, OwnershipRelation,
    ReversePointerRecord, ReversePointerRelation, Snapshot,
};

use crate::error::{SnapshotError, SnapshotResult};
use crate::files::SnapshotFiles;

#[derive(Debug, Deserialize)]
struct OwnershipRow {
    name: String,
    owner: String,
}

#[derive(Debug, Deserialize)]
struct AttributeRow {
    name: String,
    key: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ReversePointerRow {
    name: String,
    value: String,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an ownership snapshot. `source` is only used in error messages.
pub fn parse_ownership<R: Read>(source: &Path, reader: R) -> SnapshotResult<OwnershipRelation> {
    let mut relation = OwnershipRelation::new();
    for_each_row(source, reader, |row: OwnershipRow| {
        let owner = Identifier::parse(&row.owner)?;
        relation.insert(OwnershipRecord {
            name: row.name,
            owner,
        });
        Ok(())
    })?;
    Ok(relation)
}

/// Parse an attribute snapshot, grouping rows by name.
pub fn parse_attributes<R: Read>(source: &Path, reader: R) -> SnapshotResult<AttributeRelation> {
    let mut relation = AttributeRelation::new();
    for_each_row(source, reader, |row: AttributeRow| {
        relation.insert(row.name, row.key, row.value);
        Ok(())
    })?;
    Ok(relation)
}

/// Parse a reverse-pointer snapshot.
pub fn parse_reverse_pointers<R: Read>(
    source: &Path,
    reader: R,
) -> SnapshotResult<ReversePointerRelation> {
    let mut relation = ReversePointerRelation::new();
    for_each_row(source, reader, |row: ReversePointerRow| {
        let target = Identifier::parse(&row.value)?;
        relation.insert(ReversePointerRecord {
            name: row.name,
            target,
        });
        Ok(())
    })?;
    Ok(relation)
}

/// Deserialize every data row of `reader` and hand it to `visit`.
pub(crate) fn for_each_row<R, T, F>(source: &Path, reader: R, mut visit: F) -> SnapshotResult<()>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(T) -> Result<(), CoreError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    for (index, result) in reader.deserialize::<T>().enumerate() {
        let row = index + 1;
        let record = result.map_err(|source_err| SnapshotError::Csv {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        visit(record).map_err(|source_err| SnapshotError::InvalidRow {
            path: source.to_path_buf(),
            row,
            source: source_err,
        })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Open `path` on the blocking pool and hand the file to `parse`.
pub(crate) async fn parse_file<T, F>(path: &Path, parse: F) -> SnapshotResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Path, std::fs::File) -> SnapshotResult<T> + Send + 'static,
{
    let task_path: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&task_path).map_err(|source| SnapshotError::Read {
            path: task_path.clone(),
            source,
        })?;
        parse(&task_path, file)
    })
    .await
    .map_err(|e| SnapshotError::Read {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?
}

pub async fn load_ownership(path: &Path) -> SnapshotResult<OwnershipRelation> {
    let relation = parse_file(path, |source, file| parse_ownership(source, file)).await?;
    tracing::debug!(path = %path.display(), names = relation.len(), "Loaded ownership snapshot");
    Ok(relation)
}

pub async fn load_attributes(path: &Path) -> SnapshotResult<AttributeRelation> {
    let relation = parse_file(path, |source, file| parse_attributes(source, file)).await?;
    tracing::debug!(path = %path.display(), names = relation.len(), "Loaded attribute snapshot");
    Ok(relation)
}

pub async fn load_reverse_pointers(path: &Path) -> SnapshotResult<ReversePointerRelation> {
    let relation = parse_file(path, |source, file| parse_reverse_pointers(source, file)).await?;
    tracing::debug!(
        path = %path.display(),
        names = relation.len(),
        "Loaded reverse-pointer snapshot"
    );
    Ok(relation)
}

/// Load all three relations, one file after the other.
pub async fn load_snapshot(files: &SnapshotFiles) -> SnapshotResult<Snapshot> {
    let ownership = load_ownership(&files.ownership).await?;
    let reverse_pointers = load_reverse_pointers(&files.reverse_pointers).await?;
    let attributes = load_attributes(&files.attributes).await?;

    tracing::info!(
        owned_names = ownership.len(),
        attribute_records = attributes.len(),
        reverse_pointers = reverse_pointers.len(),
        "Snapshot loaded",
    );

    Ok(Snapshot {
        ownership,
        attributes,
        reverse_pointers,
    })
}
