//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tintsync::ThemeKind;

#[derive(Debug, Parser)]
#[command(name = "tintsync", version, about = "Deterministic workspace tints for editor settings")]
pub struct Cli {
    /// Log decisions to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the base hue for an identifier
    Hue {
        /// Workspace identifier (usually a path)
        identifier: String,
        /// Seed mixed into the hash
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        seed: i32,
    },
    /// Print the palette that would be written
    Palette {
        /// Workspace identifier (usually a path)
        identifier: String,
        #[command(flatten)]
        tint: TintArgs,
        #[command(flatten)]
        theme: ThemeArgs,
        /// Print JSON instead of aligned text
        #[arg(long)]
        json: bool,
    },
    /// Write the palette into a settings file
    Apply {
        #[command(flatten)]
        target: SettingsArgs,
        /// Workspace identifier; defaults to the current directory
        #[arg(long)]
        workspace: Option<String>,
        #[command(flatten)]
        tint: TintArgs,
        #[command(flatten)]
        theme: ThemeArgs,
        /// Overwrite colors that were set by something else
        #[arg(long)]
        force: bool,
    },
    /// Remove managed colors from a settings file
    Clear {
        #[command(flatten)]
        target: SettingsArgs,
        #[command(flatten)]
        theme: ThemeArgs,
        /// Proceed even if colors were set by something else
        #[arg(long)]
        force: bool,
    },
    /// Show who owns the colors in a settings file
    Status {
        #[command(flatten)]
        target: SettingsArgs,
        #[command(flatten)]
        theme: ThemeArgs,
    },
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings file (plain JSON, created if missing)
    #[arg(short, long, default_value = ".vscode/settings.json")]
    pub settings: PathBuf,
}

#[derive(Debug, Args)]
pub struct TintArgs {
    /// Tint config file (YAML, or JSON by extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the config's seed
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<i32>,
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Active theme name; colors are scoped to it
    #[arg(long = "theme", default_value = "Default Dark Modern")]
    pub name: String,
    /// Theme kind
    #[arg(long = "kind", value_enum, default_value_t = KindArg::Dark)]
    pub kind: KindArg,
    /// Theme editor background, used for blending
    #[arg(long)]
    pub background: Option<String>,
    /// Extra theme color as KEY=HEX (repeatable)
    #[arg(long = "theme-color", value_parser = parse_key_value)]
    pub colors: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Dark,
    Light,
    HcDark,
    HcLight,
}

impl From<KindArg> for ThemeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Dark => ThemeKind::Dark,
            KindArg::Light => ThemeKind::Light,
            KindArg::HcDark => ThemeKind::HighContrastDark,
            KindArg::HcLight => ThemeKind::HighContrastLight,
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=HEX, got '{raw}'")),
    }
}
