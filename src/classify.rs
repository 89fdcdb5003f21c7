//! Classification of declaration values into plain text or asset references.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{AssetRef, DeclarationValue};

/// Attribute names treated as potential asset carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    /// `background-image` and `src` values may carry URL literals.
    AllUrls,
    /// Only `background-image` values may carry asset references.
    ImagesOnly,
}

impl AttributeMode {
    fn recognises(self, name: &str) -> bool {
        match self {
            Self::AllUrls => name == "background-image" || name == "src",
            Self::ImagesOnly => name == "background-image",
        }
    }
}

/// Matches a single-quoted URL literal at the start of a value, capturing the
/// quoted path. Other `url(...)` quoting forms are not recognised.
static URL_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*url\('([^']*)'").expect("invalid url literal regex"));

/// Classify a declaration value.
///
/// Values of unrecognised attributes, values without a leading `url('...')`
/// literal, and URL literals pointing at absolute or `http`-prefixed targets
/// all pass through unchanged as [`DeclarationValue::Text`]. Only a relative
/// local path becomes an [`AssetRef`].
pub fn classify(mode: AttributeMode, name: &str, value: &str) -> DeclarationValue {
    if !mode.recognises(name) {
        return DeclarationValue::Text(value.to_string());
    }

    let Some(captures) = URL_LITERAL.captures(value) else {
        return DeclarationValue::Text(value.to_string());
    };

    // The prefix check is deliberately narrow: protocol-relative URLs and
    // `data:` URIs are not covered, matching the embedding host's contract.
    let target = &captures[1];
    if target.starts_with("http") || target.starts_with('/') {
        return DeclarationValue::Text(value.to_string());
    }

    DeclarationValue::Asset(AssetRef::new(target))
}
