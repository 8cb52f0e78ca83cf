//! Storage economics for prepaid decentralized storage.
//!
//! Converts a price quote, operator approvals and an available balance into
//! days of runway, the deposit needed to reach a plan's persistence target,
//! and the surplus that can be withdrawn. All money is integer smallest-unit
//! amounts ([`U256`](alloy_primitives::U256)); day counts are 34-digit
//! decimals.
//!
//! # Components
//!
//! - [`calculate_storage_metrics`] - Sufficiency verdict for a plan or a single upload
//! - [`storage_cost`] - Per-epoch/day/month cost of a byte count
//! - [`Runway`] - Days until funds run out, possibly unbounded
//! - [`PaymentAdvice`] / [`UploadCheck`] - Next action for the account
//! - [`BalanceReport`] - Dashboard figures
//! - [`summarize_usage`] - Dataset size totals
//! - [`PaymentsReader`] - Source of prices, approvals and balances
//!
//! An account is only fully configured when both its rate and lockup
//! approvals are unlimited ([`MAX_ALLOWANCE_SENTINEL`]).

mod advice;
mod calculator;
mod config;
mod constants;
mod report;
mod runway;
mod source;
mod types;
mod usage;

pub use advice::{PaymentAdvice, UploadCheck, WalletBalances};
pub use calculator::{
    StorageCalculationResult, StorageCosts, StorageMetricsParams, bytes_to_store,
    calculate_storage_metrics, storage_cost,
};
pub use config::{
    ConfigError, DEFAULT_MIN_DAYS_THRESHOLD, DEFAULT_PERSISTENCE_PERIOD_DAYS,
    DEFAULT_STORAGE_CAPACITY_GB, UserConfig, UserConfigPatch,
};
pub use constants::{
    CDN_DATA_SET_CREATION_FEE, DAYS_PER_MONTH, EPOCH_DURATION_SECS, EPOCHS_PER_DAY,
    EPOCHS_PER_MONTH, MAX_ALLOWANCE_SENTINEL, NATIVE_DECIMALS, STABLECOIN_DECIMALS,
};
pub use report::BalanceReport;
pub use runway::Runway;
pub use source::{PaymentsReader, SourceError, StaticPayments, check_upload, fetch_balance_report};
pub use types::{OperatorApprovals, PriceQuote};
pub use usage::{DatasetUsage, UsageSummary, dataset_creation_fee, summarize_usage};
