//! `config` command.

use eyre::{Result, WrapErr};
use std::path::Path;
use tracing::info;

use crate::{
    args::PlanArgs,
    cli::{ConfigArgs, ConfigCommand},
    config::AppConfig,
};

pub(crate) fn run(config_path: &Path, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show(plan) => {
            let config = plan.apply(AppConfig::load_or_default(config_path).plan);
            print!("{}", render(&AppConfig { plan: config })?);
        }
        ConfigCommand::Set(plan) => {
            let config = set(config_path, &plan)?;
            info!(path = %config_path.display(), "saved plan");
            print!("{}", render(&config)?);
        }
        ConfigCommand::Reset => {
            AppConfig::reset(config_path)
                .wrap_err_with(|| format!("failed to remove {}", config_path.display()))?;
            info!(path = %config_path.display(), "plan reset to defaults");
            print!("{}", render(&AppConfig::default())?);
        }
    }
    Ok(())
}

/// Apply `plan` to the saved configuration and write it back.
pub(crate) fn set(config_path: &Path, plan: &PlanArgs) -> Result<AppConfig> {
    let config = AppConfig { plan: plan.apply(AppConfig::load_or_default(config_path).plan) };
    config.plan.validate()?;
    config
        .save(config_path)
        .wrap_err_with(|| format!("failed to write {}", config_path.display()))?;
    Ok(config)
}

fn render(config: &AppConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
