//! Resource table construction for recognised asset references.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::models::{DeclarationValue, ResourceTable, Stylesheet};

/// Build the per-render resource table for a parsed stylesheet.
///
/// Every distinct asset reference is resolved against `resource_dir` and
/// handed to `load` exactly once, no matter how many declarations mention
/// it — a reference the loader missed is not retried on later occurrences.
/// Missed references are omitted from the table; callers rendering with the
/// table decide their own fallback.
pub fn build_resource_table<R, F>(
  sheet: &Stylesheet,
  resource_dir: &Path,
  mut load: F,
) -> ResourceTable<R>
where
  F: FnMut(&Path) -> Option<R>,
{
  let mut table = ResourceTable::new();
  let mut attempted = BTreeSet::new();

  for declaration in sheet.declarations() {
    let DeclarationValue::Asset(reference) = &declaration.value else {
      continue;
    };
    if !attempted.insert(reference.clone()) {
      continue;
    }

    let path = resource_dir.join(reference.path());
    match load(&path) {
      Some(resource) => {
        table.insert(reference.clone(), resource);
      }
      None => {
        tracing::warn!(path = %path.display(), "referenced asset could not be loaded");
      }
    }
  }

  table
}

/// Filesystem loader reading the referenced file's bytes.
///
/// Suitable as the `load` capability of [`build_resource_table`] when assets
/// live on disk; a missing or unreadable file is reported as a miss.
pub fn read_asset_bytes(path: &Path) -> Option<Vec<u8>> {
  fs::read(path).ok()
}
