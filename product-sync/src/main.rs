//! `product-sync`: fetch the product catalogue and emit the sales mapping as
//! JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use product_sync::config::ProductSyncSettings;
use product_sync::domain::{ProductMapping, ProductSyncService};
use product_sync::outbound::catalogue::CatalogueHttpSource;
use product_sync::telemetry::init_tracing;
use tokio::runtime::Builder;
use tracing::info;

/// `product-sync` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "product-sync",
    about = "Fetch catalogue products and map them into the sales taxonomy",
    version
)]
struct CliArgs {
    /// Catalogue products endpoint. Overrides `PRODUCT_SYNC_ENDPOINT`.
    #[arg(long, value_name = "url")]
    endpoint: Option<String>,
    /// Number of products to request. Overrides `PRODUCT_SYNC_LIMIT`.
    #[arg(long, value_name = "count")]
    limit: Option<u32>,
    /// Write the mapping to this file instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
    /// Pretty-print the JSON mapping.
    #[arg(long)]
    pretty: bool,
    /// Exit with an error when the catalogue cannot be fetched instead of
    /// emitting an empty mapping.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let settings =
        ProductSyncSettings::from_environment()?.with_overrides(args.endpoint, args.limit);
    let endpoint = settings.endpoint()?;
    let options = settings.http_options()?;
    info!(%endpoint, limit = options.limit, "syncing product catalogue");

    let source = CatalogueHttpSource::with_options(endpoint, options)
        .wrap_err("failed to build catalogue HTTP client")?;
    let service = ProductSyncService::new(Arc::new(source));

    let mapping = if args.strict {
        service
            .try_sync()
            .await
            .wrap_err("catalogue fetch failed")?
    } else {
        service.sync().await
    };

    let rendered = render_mapping(&mapping, args.pretty)?;
    match args.output {
        Some(path) => write_output(&path, &rendered)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&rendered)
                .wrap_err("failed to write mapping to stdout")?;
        }
    }
    info!(entries = mapping.len(), "product mapping written");
    Ok(())
}

fn render_mapping(mapping: &ProductMapping, pretty: bool) -> Result<Vec<u8>> {
    let serialised = if pretty {
        serde_json::to_vec_pretty(mapping)
    } else {
        serde_json::to_vec(mapping)
    };
    let mut rendered = serialised.wrap_err("failed to serialise product mapping")?;
    rendered.push(b'\n');
    Ok(rendered)
}

fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("output path '{}' must name a file", path.display()))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("open output directory '{}'", parent.display()))?;
    directory
        .write(Path::new(file_name), contents)
        .wrap_err_with(|| format!("write output file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing and output helpers.

    use clap::Parser;
    use product_sync::domain::{ProductId, RawProduct, create_product_mapping};
    use product_sync::test_support::cap_fs::read_file_to_string;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::tempdir;

    use super::{CliArgs, render_mapping, write_output};

    #[rstest]
    fn cli_defaults_leave_settings_untouched() {
        let args = CliArgs::try_parse_from(["product-sync"]).expect("args should parse");
        assert!(args.endpoint.is_none());
        assert!(args.limit.is_none());
        assert!(args.output.is_none());
        assert!(!args.pretty);
        assert!(!args.strict);
    }

    #[rstest]
    fn cli_accepts_overrides() {
        let args = CliArgs::try_parse_from([
            "product-sync",
            "--endpoint",
            "http://127.0.0.1:8080/products",
            "--limit",
            "5",
            "--strict",
        ])
        .expect("args should parse");
        assert_eq!(
            args.endpoint.as_deref(),
            Some("http://127.0.0.1:8080/products")
        );
        assert_eq!(args.limit, Some(5));
        assert!(args.strict);
    }

    #[rstest]
    fn cli_rejects_non_numeric_limit() {
        assert!(CliArgs::try_parse_from(["product-sync", "--limit", "many"]).is_err());
    }

    #[rstest]
    fn renders_compact_json_with_trailing_newline() {
        let mapping = create_product_mapping(vec![RawProduct {
            id: Some(ProductId::Integer(2)),
            title: Some(json!("Eyeshadow Palette")),
            category: Some("beauty".to_owned()),
            brand: Some("Glamour Beauty".to_owned()),
            rating: Some(json!(3.28)),
        }]);
        let rendered = render_mapping(&mapping, false).expect("mapping renders");
        assert_eq!(
            String::from_utf8(rendered).expect("utf-8"),
            "{\"2\":{\"title\":\"Eyeshadow Palette\",\"category\":\"electronics\",\"brand\":\"Generic\",\"rating\":3.28}}\n"
        );
    }

    #[rstest]
    fn writes_output_file_through_cap_std() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("mapping.json");
        write_output(&path, b"{}\n").expect("write should succeed");
        assert_eq!(read_file_to_string(&path).expect("read back"), "{}\n");
    }
}
