//! Read-side inverse of the live rewriter.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};

/// An original asset recovered from a rewritten request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
  /// Media type derived from the decoded path's extension.
  pub mime_type: String,
  /// Raw bytes of the referenced file.
  pub content: Vec<u8>,
}

/// Resolve a rewritten asset request back to the original file.
///
/// Returns `Ok(None)` when the request's leading segments do not spell
/// `location` — the request belongs to another route and other handlers may
/// try it. Once the prefix matches, the final segment (minus a trailing
/// extension, if any) is base64-decoded back into the directory+path string
/// the rewriter encoded; decode and read failures from that point on are
/// fatal and propagate to the caller.
pub fn resolve_dev_asset<F>(
  location: &str,
  segments: &[&str],
  read: F,
) -> Result<Option<ResolvedAsset>>
where
  F: FnOnce(&Path) -> Result<Vec<u8>>,
{
  let Some((encoded, prefix)) = segments.split_last() else {
    return Ok(None);
  };
  if prefix.join("/") != location {
    return Ok(None);
  }

  let stem = match encoded.rsplit_once('.') {
    Some((stem, _extension)) => stem,
    None => encoded,
  };
  let decoded = general_purpose::STANDARD
    .decode(stem)
    .with_context(|| format!("failed to decode asset request segment {encoded}"))?;
  let path = String::from_utf8(decoded).context("decoded asset path is not valid UTF-8")?;

  tracing::debug!(path = %path, "resolved live asset request");

  let mime_type = mime_guess::from_path(&path)
    .first_or_octet_stream()
    .to_string();
  let content = read(Path::new(&path))
    .with_context(|| format!("failed to read referenced asset {path}"))?;

  Ok(Some(ResolvedAsset { mime_type, content }))
}

/// Filesystem reader for [`resolve_dev_asset`].
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
  fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
