//! Action executor launching apps with URL fallback
//!
//! Runs a configured command template to open the target application; if
//! the launch command cannot be spawned or exits non-zero (the package is
//! not resolvable), falls back to opening the action's URL. Command
//! templates substitute `{package}` and `{url}`.

use crate::domain::catalog::ActionSpec;
use crate::infra::config::Config;
use crate::services::dispatcher::ActionExecutor;
use anyhow::{bail, Context};
use async_trait::async_trait;
use std::time::Instant;
use tokio::process::Command;
use tracing::{info, warn};

pub struct AppLauncher {
    app_command: String,
    url_command: String,
    #[cfg(test)]
    mock_enabled: bool,
}

impl AppLauncher {
    pub fn new(config: &Config) -> Self {
        Self {
            app_command: config.launcher_app_command().to_string(),
            url_command: config.launcher_url_command().to_string(),
            #[cfg(test)]
            mock_enabled: true,
        }
    }

    /// Split a command template into argv after substituting placeholders
    fn render(template: &str, placeholder: &str, value: &str) -> Vec<String> {
        template
            .split_whitespace()
            .map(|part| part.replace(placeholder, value))
            .collect()
    }

    async fn run_command(argv: &[String]) -> anyhow::Result<()> {
        let (program, args) = argv.split_first().context("empty launcher command")?;
        let status = Command::new(program)
            .args(args)
            .status()
            .await
            .with_context(|| format!("failed to spawn {}", program))?;
        if !status.success() {
            bail!("{} exited with {}", program, status);
        }
        Ok(())
    }
}

#[async_trait]
impl ActionExecutor for AppLauncher {
    async fn execute(&self, action: &ActionSpec) -> anyhow::Result<()> {
        let start = Instant::now();

        #[cfg(test)]
        if self.mock_enabled {
            info!(package = action.launch_package, mock = true, "app_launched");
            return Ok(());
        }

        let app_argv = Self::render(&self.app_command, "{package}", action.launch_package);
        match Self::run_command(&app_argv).await {
            Ok(()) => {
                info!(
                    package = action.launch_package,
                    latency_us = %start.elapsed().as_micros(),
                    "app_launched"
                );
                return Ok(());
            }
            Err(e) => {
                warn!(
                    package = action.launch_package,
                    error = %e,
                    "app_launch_unresolvable"
                );
            }
        }

        // Package not resolvable: open the fallback URL instead
        let url_argv = Self::render(&self.url_command, "{url}", action.fallback_url);
        Self::run_command(&url_argv)
            .await
            .with_context(|| format!("fallback url open failed for {}", action.fallback_url))?;

        info!(
            url = action.fallback_url,
            latency_us = %start.elapsed().as_micros(),
            "fallback_url_opened"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::action_for_key;

    #[test]
    fn test_render_substitutes_placeholder() {
        let argv = AppLauncher::render("gtk-launch {package}", "{package}", "de.incloud.mensaapp");
        assert_eq!(argv, ["gtk-launch", "de.incloud.mensaapp"]);
    }

    #[test]
    fn test_render_untouched_without_placeholder() {
        let argv = AppLauncher::render("xdg-open {url}", "{package}", "x");
        assert_eq!(argv, ["xdg-open", "{url}"]);
    }

    #[tokio::test]
    async fn test_mock_execute() {
        let launcher = AppLauncher::new(&Config::default());
        let action = action_for_key("open_mensa_app").unwrap();
        assert!(launcher.execute(action).await.is_ok());
    }
}
