//! Dataset size aggregation.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use stowage_units::{bytes_to_gib, size_message};

use crate::CDN_DATA_SET_CREATION_FEE;

/// Decimal places of the GiB figures in [`UsageSummary`].
const GIB_DISPLAY_DECIMALS: u32 = 8;

/// Pieces stored in one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetUsage {
    /// Whether the dataset is served through the CDN.
    #[serde(default)]
    pub with_cdn: bool,
    /// Padded piece sizes in bytes.
    #[serde(default)]
    pub piece_sizes: Vec<u64>,
}

impl DatasetUsage {
    /// Total bytes across all pieces.
    pub fn size_bytes(&self) -> U256 {
        self.piece_sizes
            .iter()
            .fold(U256::ZERO, |acc, size| acc + U256::from(*size))
    }

    /// e.g. `"Dataset size: 1.5000 GB"`.
    pub fn size_message(&self) -> String {
        format!("Dataset size: {}", size_message(self.size_bytes()))
    }
}

/// Totals across datasets, split by CDN usage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageSummary {
    pub total_bytes: U256,
    pub cdn_bytes: U256,
    pub standard_bytes: U256,
    pub total_gib: f64,
    pub cdn_gib: f64,
    pub standard_gib: f64,
    pub datasets: usize,
    pub cdn_datasets: usize,
    pub standard_datasets: usize,
}

/// Sum dataset sizes, keeping CDN and standard storage apart.
pub fn summarize_usage(datasets: &[DatasetUsage]) -> UsageSummary {
    let mut summary = UsageSummary { datasets: datasets.len(), ..Default::default() };

    for dataset in datasets {
        let size = dataset.size_bytes();
        summary.total_bytes += size;
        if dataset.with_cdn {
            summary.cdn_bytes += size;
            summary.cdn_datasets += 1;
        } else {
            summary.standard_bytes += size;
            summary.standard_datasets += 1;
        }
    }

    summary.total_gib = gib_for_display(summary.total_bytes);
    summary.cdn_gib = gib_for_display(summary.cdn_bytes);
    summary.standard_gib = gib_for_display(summary.standard_bytes);
    summary
}

/// Up-front fee for creating a dataset; only CDN datasets are charged.
pub fn dataset_creation_fee(with_cdn: bool) -> U256 {
    if with_cdn { CDN_DATA_SET_CREATION_FEE } else { U256::ZERO }
}

fn gib_for_display(bytes: U256) -> f64 {
    bytes_to_gib(bytes).round_dp(GIB_DISPLAY_DECIMALS).to_f64()
}
