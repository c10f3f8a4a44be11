//! Netchart - render a graph as a layered Vega-Lite chart.
//!
//! # Usage
//!
//! ```bash
//! netchart graph.json > chart.vl.json
//! netchart graph.json --layout positions.json --labels --pretty
//! netchart graph.json --node-size degree --node-color group --node-cmap viridis
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use netchart::chart::VegaLiteWriter;
use netchart::compose::Composer;
use netchart::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use netchart::graph::{parse_node_link, parse_positions};
use netchart::perf;
use netchart::style::DrawConfig;

/// Render a graph as a layered Vega-Lite chart
#[derive(Parser, Debug)]
#[command(name = "netchart", version, about, long_about = None)]
struct Cli {
    /// Node-link graph file (JSON or JSON5)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Positions file mapping node ids to [x, y]; overrides positions in FILE
    #[arg(short, long, value_name = "PATH")]
    layout: Option<PathBuf>,

    /// Style file with `edges`, `arrows`, `nodes` and `labels` sections
    #[arg(long, value_name = "PATH")]
    style: Option<PathBuf>,

    /// Write the chart here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Chart height in pixels
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Node size: a number or a node attribute
    #[arg(long, value_name = "VALUE")]
    node_size: Option<String>,

    /// Node color: a color or a node attribute
    #[arg(long, value_name = "VALUE")]
    node_color: Option<String>,

    /// Node opacity: a number or a node attribute
    #[arg(long, value_name = "VALUE")]
    node_opacity: Option<String>,

    /// Color scheme for a column-bound node color
    #[arg(long, value_name = "SCHEME")]
    node_cmap: Option<String>,

    /// Comma-separated node attributes shown as tooltip
    #[arg(long, value_name = "FIELDS")]
    node_tooltip: Option<String>,

    /// Edge width: a number or an edge attribute
    #[arg(long, value_name = "VALUE")]
    edge_width: Option<String>,

    /// Edge color: a color or an edge attribute
    #[arg(long, value_name = "VALUE")]
    edge_color: Option<String>,

    /// Edge opacity: a number or an edge attribute
    #[arg(long, value_name = "VALUE")]
    edge_opacity: Option<String>,

    /// Color scheme for a column-bound edge color
    #[arg(long, value_name = "SCHEME")]
    edge_cmap: Option<String>,

    /// Comma-separated edge attributes shown as tooltip
    #[arg(long, value_name = "FIELDS")]
    edge_tooltip: Option<String>,

    /// Arrowhead width for directed graphs
    #[arg(long, value_name = "VALUE")]
    arrow_width: Option<String>,

    /// Fraction of each directed edge covered by its arrowhead, in (0, 1]
    #[arg(long, value_name = "FRACTION")]
    arrow_length: Option<f64>,

    /// Arrowhead color
    #[arg(long, value_name = "VALUE")]
    arrow_color: Option<String>,

    /// Draw node labels from this attribute (default: `label`)
    #[arg(long, value_name = "ATTR", num_args = 0..=1, default_missing_value = "label")]
    labels: Option<String>,

    /// Label font size
    #[arg(long, value_name = "VALUE")]
    font_size: Option<String>,

    /// Label font color
    #[arg(long, value_name = "VALUE")]
    font_color: Option<String>,

    /// Pretty-print the chart JSON
    #[arg(long)]
    pretty: bool,

    /// Log timing of pipeline stages
    #[arg(long)]
    perf: bool,

    /// Save current style flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn read_text(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {what} {}", path.display()))
}

fn load_style(path: Option<&Path>) -> Result<DrawConfig> {
    let Some(path) = path else {
        return Ok(DrawConfig::default());
    };
    let text = read_text(path, "style")?;
    json5::from_str(&text).with_context(|| format!("Invalid style file {}", path.display()))
}

fn init_logging(perf: bool) -> Result<()> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    if perf {
        filter = filter.add_directive("netchart::perf=info".parse()?);
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        Default::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    init_logging(effective.perf)?;
    perf::set_enabled(effective.perf);

    let mut config = load_style(cli.style.as_deref())?;
    effective.apply(&mut config);

    let doc = parse_node_link(&read_text(&cli.file, "graph")?)
        .with_context(|| format!("Invalid graph file {}", cli.file.display()))?;
    let positions = match &cli.layout {
        Some(path) => Some(
            parse_positions(&read_text(path, "layout")?)
                .with_context(|| format!("Invalid layout file {}", path.display()))?,
        ),
        None => doc.positions,
    };

    let stack = Composer::new(config)
        .draw(&doc.graph, positions.as_ref())
        .with_context(|| format!("Failed to draw {}", cli.file.display()))?;

    let mut writer = VegaLiteWriter::new();
    if let (Some(width), Some(height)) = (cli.width, cli.height) {
        writer = writer.with_size(width, height);
    }
    let json = writer.write_string(&stack, effective.pretty);

    match &cli.output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write chart to stdout")?;
        }
    }
    Ok(())
}
