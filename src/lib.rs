#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod generate;
pub mod live;
pub mod models;
pub mod resources;
pub mod stylesheet;

pub use classify::{AttributeMode, classify};
pub use config::EmbedConfig;
pub use generate::{
  STYLESHEET_MIME, generate_dev_stylesheet, generate_stylesheet, inline_stylesheet_assets,
};
pub use live::{ResolvedAsset, RewriteError, resolve_dev_asset, rewrite_stylesheet};
pub use models::{
  AssetRef, Declaration, DeclarationValue, ResourceTable, RuleBlock, Stylesheet,
  StylesheetArtifact,
};
pub use resources::build_resource_table;
pub use stylesheet::{ParseError, parse_stylesheet, render_stylesheet};
