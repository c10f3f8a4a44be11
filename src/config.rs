use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::resolve::ParamValue;
use crate::style::{DrawConfig, LabelStyle};

/// Style overrides given as command-line style flags.
///
/// Every field is optional so file defaults and command-line flags can be
/// layered with [`StyleFlags::union`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StyleFlags {
    pub node_size: Option<ParamValue>,
    pub node_color: Option<ParamValue>,
    pub node_opacity: Option<ParamValue>,
    pub node_cmap: Option<String>,
    pub node_tooltip: Option<Vec<String>>,
    pub edge_width: Option<ParamValue>,
    pub edge_color: Option<ParamValue>,
    pub edge_opacity: Option<ParamValue>,
    pub edge_cmap: Option<String>,
    pub edge_tooltip: Option<Vec<String>>,
    pub arrow_width: Option<ParamValue>,
    pub arrow_length: Option<f64>,
    pub arrow_color: Option<ParamValue>,
    pub labels: Option<String>,
    pub font_size: Option<ParamValue>,
    pub font_color: Option<ParamValue>,
    pub pretty: bool,
    pub perf: bool,
}

impl StyleFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            node_size: other.node_size.clone().or_else(|| self.node_size.clone()),
            node_color: other.node_color.clone().or_else(|| self.node_color.clone()),
            node_opacity: other
                .node_opacity
                .clone()
                .or_else(|| self.node_opacity.clone()),
            node_cmap: other.node_cmap.clone().or_else(|| self.node_cmap.clone()),
            node_tooltip: other
                .node_tooltip
                .clone()
                .or_else(|| self.node_tooltip.clone()),
            edge_width: other.edge_width.clone().or_else(|| self.edge_width.clone()),
            edge_color: other.edge_color.clone().or_else(|| self.edge_color.clone()),
            edge_opacity: other
                .edge_opacity
                .clone()
                .or_else(|| self.edge_opacity.clone()),
            edge_cmap: other.edge_cmap.clone().or_else(|| self.edge_cmap.clone()),
            edge_tooltip: other
                .edge_tooltip
                .clone()
                .or_else(|| self.edge_tooltip.clone()),
            arrow_width: other
                .arrow_width
                .clone()
                .or_else(|| self.arrow_width.clone()),
            arrow_length: other.arrow_length.or(self.arrow_length),
            arrow_color: other
                .arrow_color
                .clone()
                .or_else(|| self.arrow_color.clone()),
            labels: other.labels.clone().or_else(|| self.labels.clone()),
            font_size: other.font_size.clone().or_else(|| self.font_size.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
            pretty: self.pretty || other.pretty,
            perf: self.perf || other.perf,
        }
    }

    /// Write the flags that are set into `config`.
    pub fn apply(&self, config: &mut DrawConfig) {
        set(&mut config.nodes.size, &self.node_size);
        set(&mut config.nodes.color, &self.node_color);
        set(&mut config.nodes.opacity, &self.node_opacity);
        if self.node_cmap.is_some() {
            config.nodes.cmap.clone_from(&self.node_cmap);
        }
        if self.node_tooltip.is_some() {
            config.nodes.tooltip.clone_from(&self.node_tooltip);
        }
        set(&mut config.edges.width, &self.edge_width);
        set(&mut config.edges.color, &self.edge_color);
        set(&mut config.edges.opacity, &self.edge_opacity);
        if self.edge_cmap.is_some() {
            config.edges.cmap.clone_from(&self.edge_cmap);
        }
        if self.edge_tooltip.is_some() {
            config.edges.tooltip.clone_from(&self.edge_tooltip);
        }
        set(&mut config.arrows.width, &self.arrow_width);
        if let Some(length) = self.arrow_length {
            config.arrows.length = length;
        }
        set(&mut config.arrows.color, &self.arrow_color);
        if self.labels.is_some() {
            config.labels.attribute.clone_from(&self.labels);
        }
        set(&mut config.labels.font_size, &self.font_size);
        set(&mut config.labels.font_color, &self.font_color);
    }

    /// Flags as tokens, one flag per entry, in the order `parse_flag_tokens` reads.
    fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut push = |flag: &str, value: Option<String>| {
            if let Some(value) = value {
                lines.push(format!("{flag} {value}"));
            }
        };
        push("--node-size", self.node_size.as_ref().map(token));
        push("--node-color", self.node_color.as_ref().map(token));
        push("--node-opacity", self.node_opacity.as_ref().map(token));
        push("--node-cmap", self.node_cmap.clone());
        push("--node-tooltip", self.node_tooltip.as_ref().map(|f| f.join(",")));
        push("--edge-width", self.edge_width.as_ref().map(token));
        push("--edge-color", self.edge_color.as_ref().map(token));
        push("--edge-opacity", self.edge_opacity.as_ref().map(token));
        push("--edge-cmap", self.edge_cmap.clone());
        push("--edge-tooltip", self.edge_tooltip.as_ref().map(|f| f.join(",")));
        push("--arrow-width", self.arrow_width.as_ref().map(token));
        push("--arrow-length", self.arrow_length.map(|l| l.to_string()));
        push("--arrow-color", self.arrow_color.as_ref().map(token));
        push("--labels", self.labels.clone());
        push("--font-size", self.font_size.as_ref().map(token));
        push("--font-color", self.font_color.as_ref().map(token));
        if self.pretty {
            lines.push("--pretty".to_string());
        }
        if self.perf {
            lines.push("--perf".to_string());
        }
        lines
    }
}

fn set(target: &mut ParamValue, value: &Option<ParamValue>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

fn token(value: &ParamValue) -> String {
    match value {
        ParamValue::Number(n) => n.to_string(),
        ParamValue::Text(s) => s.clone(),
        ParamValue::Other(v) => v.to_string(),
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("netchart").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("netchart")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("netchart").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("netchart")
                .join("config");
        }
    }

    PathBuf::from(".netchartrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".netchartrc")
}

pub fn load_config_flags(path: &Path) -> Result<StyleFlags> {
    if !path.exists() {
        return Ok(StyleFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &StyleFlags) -> Result<()> {
    let mut lines = vec!["# netchart defaults (saved with --save)".to_string()];
    lines.extend(flags.to_lines());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract style flags from a token list, ignoring anything unrecognized.
///
/// Both `--flag value` and `--flag=value` are accepted. `--labels` without a
/// value turns labels on with the default attribute.
pub fn parse_flag_tokens(tokens: &[String]) -> StyleFlags {
    let mut flags = StyleFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--pretty" {
            flags.pretty = true;
            i += 1;
            continue;
        }
        if token == "--perf" {
            flags.perf = true;
            i += 1;
            continue;
        }

        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token, None),
        };
        let next = tokens.get(i + 1).filter(|t| !t.starts_with("--"));
        let takes_value = inline.is_none() && next.is_some();
        let value = inline.or_else(|| next.cloned());

        let consumed = match name {
            "--labels" => {
                flags.labels =
                    Some(value.unwrap_or_else(|| LabelStyle::DEFAULT_ATTRIBUTE.to_string()));
                true
            }
            "--arrow-length" => {
                flags.arrow_length = value.and_then(|v| v.parse().ok());
                true
            }
            "--node-cmap" => {
                flags.node_cmap = value;
                true
            }
            "--edge-cmap" => {
                flags.edge_cmap = value;
                true
            }
            "--node-tooltip" => {
                flags.node_tooltip = value.map(|v| split_fields(&v));
                true
            }
            "--edge-tooltip" => {
                flags.edge_tooltip = value.map(|v| split_fields(&v));
                true
            }
            _ => match param_slot(&mut flags, name) {
                Some(slot) => {
                    *slot = value.map(|v| param_value(&v));
                    true
                }
                None => false,
            },
        };

        i += if consumed && takes_value { 2 } else { 1 };
    }
    flags
}

fn param_slot<'a>(flags: &'a mut StyleFlags, name: &str) -> Option<&'a mut Option<ParamValue>> {
    Some(match name {
        "--node-size" => &mut flags.node_size,
        "--node-color" => &mut flags.node_color,
        "--node-opacity" => &mut flags.node_opacity,
        "--edge-width" => &mut flags.edge_width,
        "--edge-color" => &mut flags.edge_color,
        "--edge-opacity" => &mut flags.edge_opacity,
        "--arrow-width" => &mut flags.arrow_width,
        "--arrow-color" => &mut flags.arrow_color,
        "--font-size" => &mut flags.font_size,
        "--font-color" => &mut flags.font_color,
        _ => return None,
    })
}

/// Numbers become numeric literals; everything else stays text.
fn param_value(raw: &str) -> ParamValue {
    raw.parse::<f64>()
        .map_or_else(|_| ParamValue::Text(raw.to_string()), ParamValue::Number)
}

fn split_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
