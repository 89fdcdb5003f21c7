//! Artifact builders bridging the core to the embedding host.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};

use crate::classify::AttributeMode;
use crate::live::rewrite_stylesheet;
use crate::models::StylesheetArtifact;
use crate::resources::{build_resource_table, read_asset_bytes};
use crate::stylesheet::{parse_stylesheet, render_stylesheet};

/// Media type attached to every generated stylesheet artifact.
pub const STYLESHEET_MIME: &str = "text/css";

/// Produce the packaged stylesheet artifact.
///
/// The production filter is opaque: whatever transformation the caller wants
/// applied to the source file — minification, [`inline_stylesheet_assets`],
/// or a plain read — yields the final payload. The artifact's media type is
/// always the stylesheet one.
pub fn generate_stylesheet<F>(
  location: &str,
  source_file: &Path,
  filter: F,
) -> Result<StylesheetArtifact>
where
  F: FnOnce(&Path) -> Result<Vec<u8>>,
{
  let content = filter(source_file)
    .with_context(|| format!("failed to process stylesheet {}", source_file.display()))?;

  Ok(StylesheetArtifact {
    content,
    location: location.to_string(),
    source_file: source_file.to_path_buf(),
    mime_type: STYLESHEET_MIME,
  })
}

/// Produce the live-reload artifact by rewriting asset references in place.
///
/// The source file is read whole and run through the byte-exact rewriter; a
/// malformed `background-image` declaration aborts the whole artifact.
pub fn generate_dev_stylesheet(location: &str, source_file: &Path) -> Result<StylesheetArtifact> {
  let input = fs::read(source_file)
    .with_context(|| format!("failed to read stylesheet {}", source_file.display()))?;
  let content = rewrite_stylesheet(location, source_file, &input)
    .with_context(|| format!("failed to rewrite stylesheet {}", source_file.display()))?;

  Ok(StylesheetArtifact {
    content,
    location: location.to_string(),
    source_file: source_file.to_path_buf(),
    mime_type: STYLESHEET_MIME,
  })
}

/// Parse a stylesheet and inline every resolvable local reference as a
/// base64 data URI.
///
/// References the loader cannot resolve fall back to their original
/// `url('...')` literal, so a missing file degrades to the untouched
/// declaration instead of failing the whole document.
pub fn inline_stylesheet_assets(
  source_name: &str,
  text: &str,
  mode: AttributeMode,
  resource_dir: &Path,
) -> Result<String> {
  let sheet = parse_stylesheet(source_name, text, mode)?;
  let table = build_resource_table(&sheet, resource_dir, read_asset_bytes);

  Ok(render_stylesheet(&sheet, |reference| match table.get(reference) {
    Some(bytes) => {
      let mime = mime_guess::from_path(reference.path()).first_or_octet_stream();
      format!(
        "url('data:{mime};base64,{}')",
        general_purpose::STANDARD.encode(bytes)
      )
    }
    None => format!("url('{reference}')"),
  }))
}
