//! Per-period request sizing.

use sink_core::Quantity;

/// Amount to request per commodity this period.
///
/// The binding constraint is the smaller of remaining inventory space and
/// the per-period throughput capacity, spread evenly over the accepted
/// commodities:
///
/// - `space <= 0`: nothing
/// - `space < throughput`: `space / n`
/// - otherwise: `throughput / n`
///
/// `space == throughput` takes the throughput branch.
///
/// Returns zero when `commodity_count` is zero; configuration validation
/// keeps that case from arising for a constructed facility.
pub fn request_amount(space: Quantity, throughput: Quantity, commodity_count: usize) -> Quantity {
    if !space.is_positive() {
        return Quantity::ZERO;
    }
    let binding = if space < throughput { space } else { throughput };

    binding.split(commodity_count).unwrap_or(Quantity::ZERO)
}
