//! Allowance and funding sufficiency for a storage plan.
//!
//! # Cost model
//!
//! ```text
//! per_epoch = price_per_tib_per_month * bytes / (TiB * epochs_per_month)
//! per_day   = per_epoch * EPOCHS_PER_DAY
//! per_month = per_epoch * epochs_per_month
//! ```
//!
//! The division is a single floor division after both multiplications, the
//! same order the payments contract uses, so the per-epoch rate matches the
//! rate the contract will actually charge.

use alloy_primitives::{I256, U256, U512};
use stowage_units::{GIB_U256, TIB_U256};
use tracing::debug;

use crate::{
    MAX_ALLOWANCE_SENTINEL, OperatorApprovals, PriceQuote, Runway, UserConfig,
    constants::{EPOCHS_PER_DAY_U256, EPOCHS_PER_MONTH_U256},
};

/// Inputs to [`calculate_storage_metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageMetricsParams {
    /// Current service price.
    pub prices: PriceQuote,
    /// What the account has approved for the storage operator.
    pub operator_approvals: OperatorApprovals,
    /// Balance available for storage payments.
    pub available_funds: U256,
    /// The plan being evaluated.
    pub config: UserConfig,
    /// Size of a specific upload. When set, it replaces the configured
    /// capacity as the basis of the cost.
    pub file_size: Option<u64>,
}

/// Cost of storing a fixed number of bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageCosts {
    /// Rate charged every epoch, floored.
    pub per_epoch: U256,
    /// `per_epoch` over [`EPOCHS_PER_DAY`](crate::EPOCHS_PER_DAY) epochs.
    pub per_day: U256,
    /// `per_epoch` over the quote's epochs per month.
    pub per_month: U256,
}

/// Verdict and deltas for a storage plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct StorageCalculationResult {
    /// Additional funds needed to reach the persistence target, or zero when
    /// the runway already meets the threshold. Negative only for plans whose
    /// threshold exceeds their persistence period.
    pub deposit_needed: I256,
    /// Funds that can be withdrawn while keeping the full persistence target.
    pub available_to_free_up: U256,
    /// Runway at the cost of the configured capacity (or the file size).
    pub days_left: Runway,
    /// Runway at the currently committed rate.
    pub days_left_at_current_rate: Runway,
    pub is_rate_sufficient: bool,
    pub is_lockup_sufficient: bool,
    pub is_sufficient: bool,
    /// Configured capacity in GB, echoed for display.
    pub total_configured_capacity: u64,
    /// Committed rate over a month.
    pub current_monthly_rate: U256,
    /// Cost of the configured capacity over a month.
    pub max_monthly_rate: U256,
}

/// Cost of storing `bytes` at the quoted price.
///
/// The product is formed in 512 bits and cannot overflow; a rate that does not
/// fit 256 bits saturates. A quote with zero epochs per month prices
/// everything at zero.
pub fn storage_cost(prices: &PriceQuote, bytes: U256) -> StorageCosts {
    let denominator = U512::from(TIB_U256) * U512::from(prices.epochs_per_month);
    if denominator.is_zero() {
        debug!("price quote has zero epochs per month, treating storage as free");
        return StorageCosts::default();
    }

    let numerator = U512::from(prices.price_per_tib_per_month_no_cdn) * U512::from(bytes);
    let per_epoch = U256::saturating_from(numerator / denominator);

    StorageCosts {
        per_epoch,
        per_day: per_epoch.saturating_mul(EPOCHS_PER_DAY_U256),
        per_month: per_epoch.saturating_mul(prices.epochs_per_month),
    }
}

/// Bytes a plan is priced on: the file size if given, else the configured
/// capacity with 1 GB = 1024³ bytes.
pub fn bytes_to_store(config: &UserConfig, file_size: Option<u64>) -> U256 {
    match file_size {
        Some(size) => U256::from(size),
        None => U256::from(config.storage_capacity) * GIB_U256,
    }
}

/// Evaluate a storage plan against current prices, approvals and funds.
///
/// Total over all inputs: zero costs and zero committed rates produce
/// [`Runway::Unbounded`], and every product saturates instead of overflowing.
///
/// The reported runways are 34-digit decimals, so a daily cost wider than
/// that can round a runway one wei short of a threshold up to the threshold
/// itself. Threshold and persistence checks therefore compare the funds
/// against the exact integer cost of the required days.
pub fn calculate_storage_metrics(params: &StorageMetricsParams) -> StorageCalculationResult {
    let StorageMetricsParams { prices, operator_approvals, available_funds, config, file_size } =
        *params;

    let costs = storage_cost(&prices, bytes_to_store(&config, file_size));

    let current_monthly_rate = operator_approvals.rate_used.saturating_mul(EPOCHS_PER_MONTH_U256);
    let current_daily_rate = operator_approvals.rate_used.saturating_mul(EPOCHS_PER_DAY_U256);

    let days_left_at_current_rate = Runway::at_daily_cost(available_funds, current_daily_rate);
    let days_left = Runway::at_daily_cost(available_funds, costs.per_day);

    let amount_needed = costs.per_day.saturating_mul(U256::from(config.persistence_period));
    let meets_threshold = funds_cover_days(available_funds, costs.per_day, config.min_days_threshold);

    let deposit_needed = if meets_threshold {
        I256::ZERO
    } else {
        signed_difference(amount_needed, available_funds)
    };

    let available_to_free_up =
        if funds_cover_days(available_funds, costs.per_day, config.persistence_period)
            && available_funds > amount_needed
        {
            available_funds - amount_needed
        } else {
            U256::ZERO
        };

    let is_rate_sufficient = operator_approvals.rate_allowance >= MAX_ALLOWANCE_SENTINEL;
    let is_lockup_sufficient = operator_approvals.lockup_allowance >= MAX_ALLOWANCE_SENTINEL;
    let is_sufficient = is_rate_sufficient && is_lockup_sufficient && meets_threshold;

    debug!(
        per_epoch = %costs.per_epoch,
        per_day = %costs.per_day,
        %amount_needed,
        %days_left,
        %days_left_at_current_rate,
        %deposit_needed,
        is_sufficient,
        "calculated storage metrics"
    );

    StorageCalculationResult {
        deposit_needed,
        available_to_free_up,
        days_left,
        days_left_at_current_rate,
        is_rate_sufficient,
        is_lockup_sufficient,
        is_sufficient,
        total_configured_capacity: config.storage_capacity,
        current_monthly_rate,
        max_monthly_rate: costs.per_month,
    }
}

/// Whether `funds` pay for `days` days at `per_day`, compared exactly.
fn funds_cover_days(funds: U256, per_day: U256, days: u64) -> bool {
    U512::from(per_day) * U512::from(days) <= U512::from(funds)
}

/// `minuend - subtrahend` as a signed value, saturating at the `I256` bounds.
fn signed_difference(minuend: U256, subtrahend: U256) -> I256 {
    if minuend >= subtrahend {
        I256::try_from(minuend - subtrahend).unwrap_or(I256::MAX)
    } else {
        I256::try_from(subtrahend - minuend).map_or(I256::MIN, |magnitude| -magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stowage_units::Decimal;

    const ONE_TOKEN: u64 = 1_000_000_000_000_000_000;

    fn quote() -> PriceQuote {
        PriceQuote {
            price_per_tib_per_month_no_cdn: U256::from(2_500_000u64),
            epochs_per_month: U256::from(86_400u64),
        }
    }

    fn plan() -> UserConfig {
        UserConfig {
            storage_capacity: 150,
            persistence_period: 365,
            min_days_threshold: 50,
            with_cdn: false,
        }
    }

    fn params(available_funds: U256, operator_approvals: OperatorApprovals) -> StorageMetricsParams {
        StorageMetricsParams {
            prices: quote(),
            operator_approvals,
            available_funds,
            config: plan(),
            file_size: None,
        }
    }

    fn amount_needed() -> U256 {
        storage_cost(&quote(), bytes_to_store(&plan(), None)).per_day * U256::from(365u64)
    }

    #[test]
    fn test_storage_cost_floor_division() {
        let costs = storage_cost(&quote(), U256::from(161_061_273_600u64));
        assert_eq!(costs.per_epoch, U256::from(4u64));
        assert_eq!(costs.per_day, U256::from(11_520u64));
        assert_eq!(costs.per_month, U256::from(345_600u64));
    }

    #[test]
    fn test_capacity_uses_gib() {
        assert_eq!(bytes_to_store(&plan(), None), U256::from(161_061_273_600u64));
        assert_eq!(bytes_to_store(&plan(), Some(4096)), U256::from(4096u64));
    }

    #[test]
    fn test_unfunded_plan_needs_deposit() {
        let result = calculate_storage_metrics(&params(U256::ZERO, OperatorApprovals::default()));

        assert!(!result.is_sufficient);
        assert_eq!(result.days_left, Runway::Days(Decimal::ZERO));
        assert_eq!(result.deposit_needed, I256::try_from(4_204_800u64).unwrap());
        assert!(result.deposit_needed > I256::ZERO);
        assert_eq!(result.available_to_free_up, U256::ZERO);
        assert_eq!(result.total_configured_capacity, 150);
        assert_eq!(result.max_monthly_rate, U256::from(345_600u64));
    }

    #[test]
    fn test_exactly_funded_plan() {
        let funds = amount_needed();
        let result = calculate_storage_metrics(&params(funds, OperatorApprovals::unlimited(U256::ZERO)));

        assert!(result.is_sufficient);
        assert_eq!(result.deposit_needed, I256::ZERO);
        assert_eq!(result.days_left, Runway::Days(Decimal::from(365u64)));
        // Strictly more than the target is required before anything frees up.
        assert_eq!(result.available_to_free_up, U256::ZERO);
    }

    #[test]
    fn test_surplus_can_be_freed() {
        let funds = amount_needed() + U256::from(ONE_TOKEN);
        let result = calculate_storage_metrics(&params(funds, OperatorApprovals::unlimited(U256::ZERO)));

        assert!(result.days_left.covers(365));
        assert_eq!(result.available_to_free_up, U256::from(ONE_TOKEN));
    }

    #[test]
    fn test_threshold_is_exact_for_wide_daily_costs() {
        // One TiB at one epoch per month makes the per-epoch rate the price itself.
        let price = U256::from(10u64).pow(U256::from(37u64));
        let per_day = price * EPOCHS_PER_DAY_U256;
        let funds = per_day * U256::from(50u64) - U256::from(1u64);
        let params = StorageMetricsParams {
            prices: PriceQuote { price_per_tib_per_month_no_cdn: price, epochs_per_month: U256::from(1u64) },
            operator_approvals: OperatorApprovals::unlimited(U256::ZERO),
            available_funds: funds,
            config: plan(),
            file_size: Some(stowage_units::TIB),
        };

        let result = calculate_storage_metrics(&params);
        // The displayed runway rounds up to the threshold, the verdict does not.
        assert!(result.days_left.covers(50));
        assert!(!result.is_sufficient);
        assert_eq!(
            result.deposit_needed,
            I256::try_from(per_day * U256::from(365u64) - funds).unwrap()
        );

        let result = calculate_storage_metrics(&StorageMetricsParams { available_funds: funds + U256::from(1u64), ..params });
        assert!(result.is_sufficient);
    }

    #[test]
    fn test_only_unlimited_rate_allowance_counts() {
        let funds = U256::from(ONE_TOKEN);
        let mut approvals = OperatorApprovals::unlimited(U256::ZERO);
        assert!(calculate_storage_metrics(&params(funds, approvals)).is_sufficient);

        approvals.rate_allowance = MAX_ALLOWANCE_SENTINEL - U256::from(1u8);
        let result = calculate_storage_metrics(&params(funds, approvals));
        assert!(!result.is_rate_sufficient);
        assert!(result.is_lockup_sufficient);
        assert!(!result.is_sufficient);
        assert_eq!(result.deposit_needed, I256::ZERO);
    }

    #[test]
    fn test_only_unlimited_lockup_allowance_counts() {
        let mut approvals = OperatorApprovals::unlimited(U256::ZERO);
        approvals.lockup_allowance = U256::from(ONE_TOKEN) * U256::from(1_000_000u64);

        let result = calculate_storage_metrics(&params(U256::from(ONE_TOKEN), approvals));
        assert!(result.is_rate_sufficient);
        assert!(!result.is_lockup_sufficient);
        assert!(!result.is_sufficient);
    }

    #[test]
    fn test_zero_committed_rate_is_unbounded() {
        let result = calculate_storage_metrics(&params(U256::from(ONE_TOKEN), OperatorApprovals::default()));
        assert_eq!(result.days_left_at_current_rate, Runway::Unbounded);
        assert_eq!(result.current_monthly_rate, U256::ZERO);
    }

    #[test]
    fn test_committed_rate_runway() {
        let approvals = OperatorApprovals { rate_used: U256::from(10u64), ..Default::default() };
        // 10 per epoch is 28,800 per day.
        let result = calculate_storage_metrics(&params(U256::from(288_000u64), approvals));
        assert_eq!(result.days_left_at_current_rate, Runway::Days(Decimal::from(10u64)));
        assert_eq!(result.current_monthly_rate, U256::from(864_000u64));
    }

    #[test]
    fn test_zero_price_is_unbounded() {
        let mut params = params(U256::ZERO, OperatorApprovals::unlimited(U256::ZERO));
        params.prices.price_per_tib_per_month_no_cdn = U256::ZERO;

        let result = calculate_storage_metrics(&params);
        assert_eq!(result.days_left, Runway::Unbounded);
        assert!(result.is_sufficient);
        assert_eq!(result.deposit_needed, I256::ZERO);
    }

    #[test]
    fn test_zero_file_size_is_unbounded() {
        let mut params = params(U256::ZERO, OperatorApprovals::default());
        params.file_size = Some(0);

        let result = calculate_storage_metrics(&params);
        assert_eq!(result.days_left, Runway::Unbounded);
        assert_eq!(result.deposit_needed, I256::ZERO);
    }

    #[test]
    fn test_zero_epochs_per_month_is_guarded() {
        let mut params = params(U256::from(ONE_TOKEN), OperatorApprovals::default());
        params.prices.epochs_per_month = U256::ZERO;

        let result = calculate_storage_metrics(&params);
        assert_eq!(result.days_left, Runway::Unbounded);
        assert_eq!(result.max_monthly_rate, U256::ZERO);
    }

    #[test]
    fn test_file_size_overrides_capacity() {
        let mut params = params(U256::ZERO, OperatorApprovals::default());
        params.file_size = Some(1 << 40);

        // 2,500,000 per TiB-month over 86,400 epochs floors to 28 per epoch.
        let result = calculate_storage_metrics(&params);
        assert_eq!(result.max_monthly_rate, U256::from(28u64 * 86_400));
        assert_eq!(result.total_configured_capacity, 150);

        params.prices.price_per_tib_per_month_no_cdn = U256::from(86_400u64 * 1000);
        let result = calculate_storage_metrics(&params);
        assert_eq!(result.max_monthly_rate, U256::from(86_400u64 * 1000));
    }

    #[test]
    fn test_threshold_above_persistence_yields_negative_deposit() {
        let mut params = params(U256::ZERO, OperatorApprovals::default());
        params.config.persistence_period = 10;
        params.config.min_days_threshold = 100;
        // 50 days of funding: under the threshold, above the persistence target.
        params.available_funds = U256::from(11_520u64 * 50);

        let result = calculate_storage_metrics(&params);
        assert_eq!(result.deposit_needed, -I256::try_from(11_520u64 * 40).unwrap());
        assert_eq!(result.available_to_free_up, U256::from(11_520u64 * 40));
    }

    #[test]
    fn test_signed_difference_saturates() {
        assert_eq!(signed_difference(U256::MAX, U256::ZERO), I256::MAX);
        assert_eq!(signed_difference(U256::ZERO, U256::MAX), I256::MIN);
        assert_eq!(signed_difference(U256::from(3u8), U256::from(5u8)), -I256::try_from(2u8).unwrap());
    }

    #[test]
    fn test_huge_inputs_saturate() {
        let params = StorageMetricsParams {
            prices: PriceQuote { price_per_tib_per_month_no_cdn: U256::MAX, epochs_per_month: U256::from(1u8) },
            operator_approvals: OperatorApprovals { rate_used: U256::MAX, ..Default::default() },
            available_funds: U256::MAX,
            config: UserConfig { storage_capacity: u64::MAX, persistence_period: u64::MAX, ..plan() },
            file_size: None,
        };

        let result = calculate_storage_metrics(&params);
        assert_eq!(result.max_monthly_rate, U256::MAX);
        assert_eq!(result.current_monthly_rate, U256::MAX);
        assert_eq!(result.days_left, Runway::Days(Decimal::ONE));
    }

    fn arb_u256() -> impl Strategy<Value = U256> {
        prop_oneof![
            any::<u64>().prop_map(U256::from),
            any::<u128>().prop_map(U256::from),
            any::<[u64; 4]>().prop_map(U256::from_limbs),
            Just(U256::ZERO),
            Just(U256::MAX),
        ]
    }

    fn arb_params() -> impl Strategy<Value = StorageMetricsParams> {
        (
            (arb_u256(), arb_u256()),
            (arb_u256(), arb_u256(), arb_u256()),
            arb_u256(),
            (any::<u64>(), any::<u64>(), any::<u64>()),
            proptest::option::of(any::<u64>()),
        )
            .prop_map(|(price, rates, funds, plan, file_size)| StorageMetricsParams {
                prices: PriceQuote { price_per_tib_per_month_no_cdn: price.0, epochs_per_month: price.1 },
                operator_approvals: OperatorApprovals {
                    rate_used: rates.0,
                    rate_allowance: rates.1,
                    lockup_allowance: rates.2,
                },
                available_funds: funds,
                config: UserConfig {
                    storage_capacity: plan.0,
                    persistence_period: plan.1,
                    min_days_threshold: plan.2,
                    with_cdn: false,
                },
                file_size,
            })
    }

    proptest! {
        #[test]
        fn test_sufficiency_equivalence(params in arb_params()) {
            let result = calculate_storage_metrics(&params);
            prop_assert_eq!(
                result.is_sufficient,
                result.is_rate_sufficient
                    && result.is_lockup_sufficient
                    && funds_cover_days(
                        params.available_funds,
                        storage_cost(&params.prices, bytes_to_store(&params.config, params.file_size)).per_day,
                        params.config.min_days_threshold,
                    )
            );
            if result.is_sufficient {
                prop_assert_eq!(result.deposit_needed, I256::ZERO);
            }
        }

        #[test]
        fn test_more_funds_never_hurt(
            params in arb_params(),
            extra in arb_u256(),
        ) {
            // A threshold above the persistence period can make deposits negative,
            // which breaks monotonicity by design.
            let mut base = params;
            base.config.min_days_threshold = base.config.min_days_threshold.min(base.config.persistence_period);
            let mut richer = base;
            richer.available_funds = base.available_funds.saturating_add(extra);

            let poor = calculate_storage_metrics(&base);
            let rich = calculate_storage_metrics(&richer);

            prop_assert!(poor.days_left <= rich.days_left);
            prop_assert!(poor.days_left_at_current_rate <= rich.days_left_at_current_rate);
            prop_assert!(poor.deposit_needed >= rich.deposit_needed);
        }

        #[test]
        fn test_free_up_leaves_target_funded(params in arb_params()) {
            let result = calculate_storage_metrics(&params);
            prop_assert!(result.available_to_free_up <= params.available_funds);
            if result.available_to_free_up > U256::ZERO {
                prop_assert!(result.days_left.covers(params.config.persistence_period));
            }
        }
    }
}
