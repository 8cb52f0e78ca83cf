//! Argument groups shared by the commands.

use clap::Args;
use stowage_economics::{UserConfig, UserConfigPatch};

/// Logging configuration.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "Logging")]
pub struct LogArgs {
    /// Silence all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Log filter directive (e.g., "stowage_economics=debug").
    #[arg(long = "log.filter", value_name = "DIRECTIVE", global = true)]
    pub filter: Option<String>,
}

/// Storage plan overrides. Unset flags keep the value from the config file.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "Storage Plan")]
pub struct PlanArgs {
    /// Planned capacity in GB (1 GB = 1024³ bytes).
    #[arg(long = "plan.capacity", value_name = "GB")]
    pub capacity: Option<u64>,

    /// Days of storage to keep paid ahead.
    #[arg(long = "plan.persistence", value_name = "DAYS")]
    pub persistence: Option<u64>,

    /// Runway in days below which the plan needs action.
    #[arg(long = "plan.min-days", value_name = "DAYS")]
    pub min_days: Option<u64>,

    /// Use the CDN for new datasets.
    #[arg(long = "plan.cdn", value_name = "BOOL")]
    pub cdn: Option<bool>,
}

impl PlanArgs {
    /// Overrides as a partial update.
    pub fn patch(&self) -> UserConfigPatch {
        UserConfigPatch {
            storage_capacity: self.capacity,
            persistence_period: self.persistence,
            min_days_threshold: self.min_days,
            with_cdn: self.cdn,
        }
    }

    /// Apply the overrides on top of `config`.
    pub fn apply(&self, config: UserConfig) -> UserConfig {
        config.merge(self.patch())
    }
}
