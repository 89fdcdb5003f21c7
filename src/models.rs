//! Data structures shared by the structural and live stylesheet paths.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Identifier for a local asset referenced from a `url('...')` literal.
///
/// Two references are equal iff their underlying path strings are equal. The
/// wrapped path is always relative; classification never produces a reference
/// for absolute or scheme-prefixed URLs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetRef(String);

impl AssetRef {
  /// Wrap the literal path extracted from a URL literal.
  pub fn new(path: impl Into<String>) -> Self {
    Self(path.into())
  }

  /// The referenced path, relative to the caller's resource directory.
  pub fn path(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for AssetRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Value position of a declaration after URL classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationValue {
  /// Verbatim value text passed through untouched.
  Text(String),
  /// A recognised reference to a local asset.
  Asset(AssetRef),
}

/// One `name: value` pair inside a rule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  /// Attribute name to the left of the colon.
  pub name: String,
  /// Classified value to the right of the colon.
  pub value: DeclarationValue,
}

/// A selector together with its ordered declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
  /// Selector text preceding the block.
  pub selector: String,
  /// Declarations in source order.
  pub declarations: Vec<Declaration>,
}

/// Ordered sequence of rule blocks parsed from one stylesheet.
///
/// Block order is significant: selectors may repeat, and later blocks are
/// never merged into earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
  /// Rule blocks in source order.
  pub blocks: Vec<RuleBlock>,
}

impl Stylesheet {
  /// Iterate every declaration across all blocks in document order.
  pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
    self.blocks.iter().flat_map(|block| block.declarations.iter())
  }
}

/// Mapping from asset reference to the loaded resource for one render pass.
///
/// References whose loader reported a miss are absent; consumers must
/// tolerate a missing entry.
pub type ResourceTable<R> = BTreeMap<AssetRef, R>;

/// Generated stylesheet handed to the embedding host for registration.
#[derive(Debug, Clone)]
pub struct StylesheetArtifact {
  /// Final byte payload served under `location`.
  pub content: Vec<u8>,
  /// Logical mount path the artifact is served under.
  pub location: String,
  /// Path to the source file the artifact was generated from.
  pub source_file: PathBuf,
  /// Media type of the payload.
  pub mime_type: &'static str,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn asset_refs_compare_structurally() {
    assert_eq!(AssetRef::new("img/x.png"), AssetRef::new("img/x.png"));
    assert_ne!(AssetRef::new("img/x.png"), AssetRef::new("img/y.png"));
  }

  #[test]
  fn declarations_iterate_in_document_order() {
    let sheet = Stylesheet {
      blocks: vec![
        RuleBlock {
          selector: ".a".into(),
          declarations: vec![
            Declaration {
              name: "color".into(),
              value: DeclarationValue::Text("red".into()),
            },
            Declaration {
              name: "margin".into(),
              value: DeclarationValue::Text("0".into()),
            },
          ],
        },
        RuleBlock {
          selector: ".b".into(),
          declarations: vec![Declaration {
            name: "padding".into(),
            value: DeclarationValue::Text("0".into()),
          }],
        },
      ],
    };

    let names: Vec<&str> = sheet
      .declarations()
      .map(|declaration| declaration.name.as_str())
      .collect();
    assert_eq!(names, vec!["color", "margin", "padding"]);
  }
}
