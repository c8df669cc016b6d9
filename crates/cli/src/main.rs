//! Hotspot CLI - check, render, convert and script zone files.

mod logger;

use anyhow::{Context, Result};
use api::{execute_query, execute_request, Query, Request};
use clap::{Parser, Subcommand};
use editor::{Editor, EditorConfig, Session, SvgSurface};
use interchange::Document;
use log::LevelFilter;
use logger::{resolve_level, HotspotLogger, LOG_ENV};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use theme::Theme;

/// Hotspot CLI - edit polygonal hotspot zones
#[derive(Parser)]
#[command(name = "hotspot")]
#[command(about = "Command-line interface for the hotspot zone editor")]
struct Cli {
    /// Editor settings as JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Canvas width, overriding the config file
    #[arg(long, global = true)]
    width: Option<f32>,

    /// Canvas height, overriding the config file
    #[arg(long, global = true)]
    height: Option<f32>,

    /// Log level (error, warn, info, debug, trace). Defaults to $HOTSPOT_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report self-intersecting and out-of-bounds zones
    Check {
        /// Zones file (.json options or .kdl document)
        file: PathBuf,
    },

    /// Render zones to SVG
    Render {
        file: PathBuf,
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Theme name (light or dark)
        #[arg(long, default_value = "light")]
        theme: String,
    },

    /// Convert between JSON options and KDL documents
    Convert { input: PathBuf, output: PathBuf },

    /// Run a script of JSON commands and queries, one per line
    Replay {
        script: PathBuf,
        /// Initial zones
        #[arg(long)]
        zones: Option<PathBuf>,
        /// Where to save the result
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Answer a single JSON query about a zones file
    Query {
        file: PathBuf,
        /// JSON query, e.g. '{"type": "get_diagnostics"}'
        json: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_level = std::env::var(LOG_ENV).ok();
    let level = resolve_level(cli.log_level.as_deref(), env_level.as_deref(), LevelFilter::Warn)?;
    if let Err(e) = HotspotLogger::init(level) {
        eprintln!("Logging disabled: {:#}", e);
    }

    let config = load_config(cli.config.as_deref(), cli.width, cli.height)?;

    match cli.command {
        Commands::Check { file } => check(&file, config),
        Commands::Render {
            file,
            output,
            theme,
        } => render(&file, output.as_deref(), &theme, config),
        Commands::Convert { input, output } => convert(&input, &output, config),
        Commands::Replay {
            script,
            zones,
            output,
        } => replay(&script, zones.as_deref(), output.as_deref(), config),
        Commands::Query { file, json } => query(&file, &json, config),
    }
}

fn load_config(path: Option<&Path>, width: Option<f32>, height: Option<f32>) -> Result<EditorConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => EditorConfig::default(),
    };
    if let Some(width) = width {
        config.width = width;
    }
    if let Some(height) = height {
        config.height = height;
    }
    Ok(config)
}

/// Load a zones file. KDL documents carry their own canvas size, which
/// replaces the configured one.
fn load_document(path: &Path, config: &mut EditorConfig) -> Result<Document> {
    let document = interchange::load(path, config.size())
        .with_context(|| format!("Failed to load {}", path.display()))?;
    *config = config.clone().with_size(document.size.width(), document.size.height());
    log::info!("loaded {} zones from {}", document.zones.len(), path.display());
    Ok(document)
}

fn check(file: &Path, mut config: EditorConfig) -> Result<()> {
    let document = load_document(file, &mut config)?;
    let size = config.size();

    let mut failures = 0;
    for (i, zone) in document.zones.iter().enumerate() {
        let mut problems = Vec::new();
        if zone.is_distorted() {
            problems.push("self-intersecting");
        }
        if zone.is_out_of_bounds(size) {
            problems.push("out of bounds");
        }
        if problems.is_empty() {
            println!("zone {} ({} points): ok", i, zone.len());
        } else {
            failures += 1;
            println!("zone {} ({} points): {}", i, zone.len(), problems.join(", "));
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} zones have errors", failures, document.zones.len());
    }
    Ok(())
}

fn render(file: &Path, output: Option<&Path>, theme: &str, mut config: EditorConfig) -> Result<()> {
    let theme = Theme::by_name(theme).ok_or_else(|| anyhow::anyhow!("Unknown theme: {}", theme))?;
    let document = load_document(file, &mut config)?;

    let mut surface = SvgSurface::new(config.size());
    let mut session = Session::mount_zones(&mut surface, document.zones, config)
        .ok_or_else(|| anyhow::anyhow!("Failed to mount editor"))?
        .with_theme(theme);
    session.redraw();
    let svg = session.painter().finish();

    match output {
        Some(path) => std::fs::write(path, svg)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", svg),
    }
    Ok(())
}

fn convert(input: &Path, output: &Path, mut config: EditorConfig) -> Result<()> {
    let document = load_document(input, &mut config)?;
    interchange::save(output, &document)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    println!("Wrote {} zones to {}", document.zones.len(), output.display());
    Ok(())
}

fn load_editor(zones: Option<&Path>, mut config: EditorConfig) -> Result<Editor> {
    let zones = match zones {
        Some(path) => load_document(path, &mut config)?.zones,
        None => Vec::new(),
    };
    Ok(Editor::from_zones(config, zones))
}

fn save_editor(path: &Path, editor: &Editor) -> Result<()> {
    let document = Document::new(editor.size(), editor.zones.clone());
    interchange::save(path, &document).with_context(|| format!("Failed to save {}", path.display()))
}

fn replay(
    script: &Path,
    zones: Option<&Path>,
    output: Option<&Path>,
    config: EditorConfig,
) -> Result<()> {
    let mut editor = load_editor(zones, config)?;
    let file = std::fs::File::open(script)
        .with_context(|| format!("Failed to open script {}", script.display()))?;

    for (number, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let request: Request = serde_json::from_str(line).with_context(|| {
            format!("{}:{}: not a command or query", script.display(), number + 1)
        })?;
        let response = execute_request(&mut editor, request);
        if response.is_error() {
            log::warn!("{}:{}: request failed", script.display(), number + 1);
        }
        println!("{}", serde_json::to_string(&response)?);
    }

    match output {
        Some(path) => save_editor(path, &editor)?,
        None => println!("{}", interchange::options_to_json(&editor.to_option())),
    }
    Ok(())
}

fn query(file: &Path, json: &str, config: EditorConfig) -> Result<()> {
    let query: Query = serde_json::from_str(json).context("Invalid query JSON")?;
    let editor = load_editor(Some(file), config)?;
    let result = execute_query(&editor, query);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_kdl_zones_survive_load_and_save() {
        let dir = std::env::temp_dir().join(format!("hotspot-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.kdl");
        std::fs::write(
            &input,
            r#"
            hotspots width=300 height=200 {
                zone closed=#false {
                    point 10 10
                    point 60 10
                    point 60 60
                    point 10 60
                }
            }
            "#,
        )
        .unwrap();

        let editor = load_editor(Some(&input), EditorConfig::default()).unwrap();
        assert!(!editor.zones[0].closed);
        assert_eq!(editor.size(), editor::CanvasSize::new(300.0, 200.0));

        let output = dir.join("out.kdl");
        save_editor(&output, &editor).unwrap();
        let saved = interchange::load(&output, editor.size()).unwrap();
        assert_eq!(saved.zones.len(), 1);
        assert!(!saved.zones[0].closed);
        assert_eq!(saved.zones[0].id, editor.zones[0].id);
        assert_eq!(saved.to_options(), editor.to_option());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn config_flags_override_the_file() {
        let config = load_config(None, Some(320.0), None).unwrap();
        assert_eq!(config.width, 320.0);
        assert_eq!(config.height, EditorConfig::default().height);
    }
}
