//! Stylesheet asset embedding CLI.
//!
//! Provides commands for:
//! - `render`: inline local asset references and print the packaged output
//! - `rewrite`: rewrite references for live serving, preserving formatting
//! - `resolve`: decode a rewritten request path and write the asset bytes

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use css_asset_embedder::live::read_file_bytes;
use css_asset_embedder::{
  AttributeMode, EmbedConfig, generate_dev_stylesheet, generate_stylesheet,
  inline_stylesheet_assets, resolve_dev_asset,
};

/// Stylesheet asset embedding tool.
#[derive(Parser)]
#[command(name = "css_asset_embedder", version, about)]
struct Cli {
  /// Enable info-level logging.
  #[arg(long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Inline local asset references and print the packaged stylesheet.
  Render(RenderArgs),
  /// Rewrite asset references for live serving and print the result.
  Rewrite(RewriteArgs),
  /// Decode a rewritten asset request path and write the file to stdout.
  Resolve(ResolveArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
  /// Stylesheet to process.
  file: PathBuf,

  /// Directory containing referenced assets; defaults to the configured one.
  #[arg(long)]
  resource_dir: Option<PathBuf>,

  /// Also treat `src` declarations as URL carriers.
  #[arg(long)]
  all_urls: bool,
}

#[derive(clap::Args)]
struct RewriteArgs {
  /// Stylesheet to rewrite.
  file: PathBuf,

  /// Mount location the stylesheet is served under.
  #[arg(long)]
  location: Option<String>,
}

#[derive(clap::Args)]
struct ResolveArgs {
  /// Request path, e.g. `css/site.css/<base64>.png`.
  request: String,

  /// Mount location guarding the resolver.
  #[arg(long)]
  location: Option<String>,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // --verbose enables info level, otherwise RUST_LOG decides.
  let filter = if cli.verbose {
    EnvFilter::new("info")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let config = EmbedConfig::discover(Path::new("."));

  match cli.command {
    Commands::Render(args) => render(&config, args),
    Commands::Rewrite(args) => rewrite(&config, args),
    Commands::Resolve(args) => resolve(&config, args),
  }
}

fn render(config: &EmbedConfig, args: RenderArgs) -> Result<()> {
  let resource_dir = args
    .resource_dir
    .unwrap_or_else(|| config.resource_dir_path());
  let mode = if args.all_urls {
    AttributeMode::AllUrls
  } else {
    config.attribute_mode()
  };
  let source_name = args.file.display().to_string();

  let artifact = generate_stylesheet(&config.mount_location, &args.file, |path| {
    let text = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    let inlined = inline_stylesheet_assets(&source_name, &text, mode, &resource_dir)?;
    Ok(inlined.into_bytes())
  })?;

  io::stdout().write_all(&artifact.content)?;
  Ok(())
}

fn rewrite(config: &EmbedConfig, args: RewriteArgs) -> Result<()> {
  let location = args
    .location
    .unwrap_or_else(|| config.mount_location.clone());

  let artifact = generate_dev_stylesheet(&location, &args.file)?;

  io::stdout().write_all(&artifact.content)?;
  Ok(())
}

fn resolve(config: &EmbedConfig, args: ResolveArgs) -> Result<()> {
  let location = args
    .location
    .unwrap_or_else(|| config.mount_location.clone());
  let segments: Vec<&str> = args.request.split('/').collect();

  match resolve_dev_asset(&location, &segments, read_file_bytes)? {
    Some(asset) => {
      tracing::info!(mime = %asset.mime_type, "serving resolved asset");
      io::stdout().write_all(&asset.content)?;
      Ok(())
    }
    None => anyhow::bail!(
      "request {} does not match location {}",
      args.request,
      location
    ),
  }
}
