//! Roster Builder CLI
//!
//! CSV → Binary roster cache builder
//! Grid report from a roster, placements and hidden teams

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use ninebox_core::{Board, GridConfig, GridLayout};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use std::sync::Arc;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "roster_builder")]
#[command(about = "Build roster caches and print talent grid reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build roster cache from CSV file
    Build {
        /// Input CSV file path (name,team,job_level,gender,ethnicity)
        #[arg(long)]
        csv: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version (e.g., "v1")
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Print the grid, unplotted share and placement bias for a roster
    Report {
        /// Roster file (.csv, .json or .lz4 cache)
        #[arg(long)]
        roster: PathBuf,

        /// Layout preset (nine, three); ignored when --config is given
        #[arg(long)]
        layout: Option<String>,

        /// Grid config file (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Placements CSV (name,cell)
        #[arg(long)]
        placements: Option<PathBuf>,

        /// Team to hide (repeatable)
        #[arg(long = "hide-team")]
        hide_team: Vec<String>,

        /// Hide persons with no team
        #[arg(long, default_value = "false")]
        hide_unassigned: bool,

        /// Print the summary as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            csv,
            out,
            schema_version,
            verify,
            metadata,
        } => {
            println!("🔨 Building roster cache from CSV...");
            println!("   CSV Input: {}", csv.display());
            println!("   Output:    {}", out.display());
            println!("   Schema:    {}", schema_version);

            let meta = roster_builder::build_roster_cache(&csv, &out, &schema_version)?;

            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Report {
            roster,
            layout,
            config,
            placements,
            hide_team,
            hide_unassigned,
            json,
        } => {
            let config = resolve_config(layout.as_deref(), config.as_deref())?;
            let records = roster_builder::load_roster(&roster)?;
            let mut board = Board::new(records, config)?;

            if let Some(path) = placements {
                let placements = roster_builder::load_placements(&path)?;
                roster_builder::apply_placements(&mut board, &placements)?;
            }

            for team in &hide_team {
                hide(&mut board, Some(team.as_str()));
            }
            if hide_unassigned {
                hide(&mut board, None);
            }

            let summary = board.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", roster_builder::render_report(&summary));
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn resolve_config(layout: Option<&str>, config: Option<&Path>) -> Result<Arc<GridConfig>> {
    if let Some(path) = config {
        let config = GridConfig::load(path)
            .with_context(|| format!("Failed to load grid config: {}", path.display()))?;
        return Ok(Arc::new(config));
    }

    match layout {
        Some(name) => {
            let layout = GridLayout::parse(name)
                .with_context(|| format!("Unknown layout '{}' (expected nine or three)", name))?;
            Ok(Arc::new(GridConfig::for_layout(layout)))
        }
        None => Ok(Arc::new(GridConfig::from_env_path_or_default()?)),
    }
}

#[cfg(feature = "cli")]
fn hide(board: &mut Board, team: Option<&str>) {
    if board.is_team_visible(team) {
        board.toggle_team(team);
    }
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &roster_builder::CacheMetadata) {
    println!("\n✅ Cache built successfully!");
    println!("   Records:         {}", meta.record_count);
    println!(
        "   Original size:   {}",
        roster_builder::human_bytes(meta.original_size)
    );
    println!(
        "   Compressed size: {}",
        roster_builder::human_bytes(meta.compressed_size)
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying cache integrity...");
    let is_valid = roster_builder::verify_cache(cache_path, checksum)?;

    if is_valid {
        println!("✅ Cache verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Cache verification failed - checksum mismatch!")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &roster_builder::CacheMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("roster_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
