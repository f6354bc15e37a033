//! Command implementations. Each returns the text to print.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tintsync::color::HUE_HASH_VERSION;
use tintsync::settings::{find_owner, has_managed_keys_without_marker};
use tintsync::{
    generate, hue, ConflictGuard, GuardConfig, JsonFileStore, ManagedKey, PaletteRequest,
    ReconcileCore, ReconcileOutcome, SettingsStore, TintConfig,
};

use crate::cli::{Command, SettingsArgs, ThemeArgs, TintArgs};
use crate::host::{theme_from_args, CliHost};

/// Runs one parsed command.
pub async fn execute(command: Command) -> Result<String> {
    match command {
        Command::Hue { identifier, seed } => Ok(hue_text(&identifier, seed)),
        Command::Palette {
            identifier,
            tint,
            theme,
            json,
        } => palette_text(&identifier, &tint, &theme, json),
        Command::Apply {
            target,
            workspace,
            tint,
            theme,
            force,
        } => {
            let identifier = match workspace {
                Some(id) => id,
                None => current_dir_identifier()?,
            };
            let config = load_tint_config(&tint)?;
            let host = CliHost::new(config, theme_from_args(&theme), Some(identifier));
            reconcile(&target, host, force).await
        }
        Command::Clear {
            target,
            theme,
            force,
        } => {
            let config = TintConfig {
                enabled: false,
                ..TintConfig::default()
            };
            let host = CliHost::new(config, theme_from_args(&theme), None);
            reconcile(&target, host, force).await
        }
        Command::Status { target, theme } => status_text(&target.settings, &theme).await,
    }
}

fn hue_text(identifier: &str, seed: i32) -> String {
    format!(
        "{:.0}\t(hash v{HUE_HASH_VERSION}, seed {seed})\n",
        hue(identifier, seed)
    )
}

fn palette_text(identifier: &str, tint: &TintArgs, theme: &ThemeArgs, json: bool) -> Result<String> {
    let config = load_tint_config(tint)?;
    let theme = theme_from_args(theme);
    let palette = generate(
        &PaletteRequest::new(identifier, &theme)
            .seed(config.seed)
            .targets(config.targets.iter().copied())
            .style(config.style)
            .harmony(config.harmony)
            .blend(config.blend.clone()),
    );

    if json {
        let mut text = serde_json::to_string_pretty(&palette).context("serializing palette")?;
        text.push('\n');
        return Ok(text);
    }

    let width = palette
        .iter()
        .map(|(key, _)| key.as_str().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (key, hex) in palette.iter() {
        let _ = writeln!(out, "{:width$}  {hex}", key.as_str());
    }
    Ok(out)
}

async fn reconcile(target: &SettingsArgs, host: CliHost, force: bool) -> Result<String> {
    let store = Arc::new(JsonFileStore::new(&target.settings));
    let core = ReconcileCore::new(store, Arc::new(host), ConflictGuard::new(GuardConfig::default()));
    let path = target.settings.display();
    tracing::debug!(path = %path, force, "reconciling settings file");

    match core.reconcile(force).await {
        ReconcileOutcome::Written => Ok(format!("Applied tint to {path}\n")),
        ReconcileOutcome::Removed => Ok(format!("Removed tint from {path}\n")),
        ReconcileOutcome::Unchanged => Ok(format!("{path} is already up to date\n")),
        ReconcileOutcome::CustomizedOutside => bail!(
            "{path} has colors that tintsync did not write; rerun with --force to replace them"
        ),
        ReconcileOutcome::ThemeUnresolved => bail!("theme name is empty; pass --theme"),
        ReconcileOutcome::Failed(message) => bail!(message),
        ReconcileOutcome::Blocked { remaining } => {
            bail!("updates paused for {}s", remaining.as_secs())
        }
    }
}

async fn status_text(settings: &Path, theme: &ThemeArgs) -> Result<String> {
    let document = JsonFileStore::new(settings).read().await?;
    let theme_name = theme.name.trim();
    let theme_name = (!theme_name.is_empty()).then_some(theme_name);

    let mut out = String::new();
    match find_owner(&document) {
        Some(owner) => {
            let _ = write!(out, "owner: {}", owner.theme);
            if owner.is_legacy() {
                let _ = write!(out, " (legacy marker {})", owner.marker_key);
            }
            out.push('\n');
            if let Some(block) = document
                .get(&owner.block_key())
                .and_then(|value| value.as_object())
            {
                for (key, value) in block.iter().filter(|(k, _)| ManagedKey::is_managed(k)) {
                    let _ = writeln!(out, "  {key}  {}", value.as_str().unwrap_or("?"));
                }
            }
        }
        None => out.push_str("owner: none\n"),
    }

    if has_managed_keys_without_marker(&document, theme_name) {
        out.push_str("customized outside tintsync: managed colors have no ownership marker\n");
    }
    Ok(out)
}

fn load_tint_config(args: &TintArgs) -> Result<TintConfig> {
    let mut config = match &args.config {
        Some(path) => TintConfig::load(path)
            .with_context(|| format!("loading tint config {}", path.display()))?,
        None => TintConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn current_dir_identifier() -> Result<String> {
    let dir = std::env::current_dir().context("resolving current directory")?;
    Ok(dir.to_string_lossy().into_owned())
}
