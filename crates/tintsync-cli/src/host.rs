//! A [`WorkspaceHost`] backed by command-line arguments.

use async_trait::async_trait;
use tintsync::{ThemeContext, TintConfig, WorkspaceHost};

use crate::cli::ThemeArgs;

/// Fixed answers for a single command invocation.
#[derive(Debug, Clone)]
pub struct CliHost {
    config: TintConfig,
    theme: ThemeContext,
    identifier: Option<String>,
}

impl CliHost {
    pub fn new(config: TintConfig, theme: ThemeContext, identifier: Option<String>) -> Self {
        Self {
            config,
            theme,
            identifier,
        }
    }
}

#[async_trait]
impl WorkspaceHost for CliHost {
    fn config(&self) -> TintConfig {
        self.config.clone()
    }

    fn theme(&self) -> ThemeContext {
        self.theme.clone()
    }

    async fn workspace_identifier(&self) -> Option<String> {
        self.identifier.clone()
    }
}

/// Builds the theme snapshot described by the arguments.
pub fn theme_from_args(args: &ThemeArgs) -> ThemeContext {
    let mut theme = ThemeContext::new(args.kind.into(), args.name.clone());
    if let Some(background) = &args.background {
        theme = theme.with_color(tintsync::color::EDITOR_BACKGROUND_KEY, background.clone());
    }
    for (key, hex) in &args.colors {
        theme = theme.with_color(key.clone(), hex.clone());
    }
    theme
}
