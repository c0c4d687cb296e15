//! Pure derivation of presentation facts from a comparison payload.
//!
//! Everything here is a deterministic, side-effect-free function of the
//! per-provider result map, so it can be recomputed freely whenever a new
//! payload arrives and unit-tested without any I/O.

use crate::models::ProviderCosts;
use crate::provider::Provider;

/// Fixed palette for the share series, indexed by each provider's position
/// among the present result entries.
pub const SHARE_PALETTE: [&str; 3] = ["#f59e0b", "#3b82f6", "#10b981"];

/// One bar of the stacked compute+storage chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: &'static str,
    pub instance_type: String,
    pub compute_cost: f64,
    pub storage_cost: f64,
    pub total_cost: f64,
}

/// One slice of the cost-share view
#[derive(Debug, Clone, PartialEq)]
pub struct ShareSlice {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

/// Savings facts recomputed locally from the result map
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsSummary {
    pub cheapest_provider: Provider,
    pub most_expensive_provider: Provider,
    pub max_savings: f64,
    pub percentage_savings: f64,
}

/// Ordered series feeding the stacked-bar view, one record per provider
/// present in the result, in result order.
pub fn chart_series(results: &ProviderCosts) -> Vec<ChartPoint> {
    results
        .iter()
        .map(|(provider, cost)| ChartPoint {
            label: provider.label(),
            instance_type: cost.instance_type.clone(),
            compute_cost: cost.compute_cost,
            storage_cost: cost.storage_cost,
            total_cost: cost.total_cost,
        })
        .collect()
}

/// Ordered series feeding the proportion view. Colors are assigned by
/// position among the present entries, so they are stable across calls for
/// the same key ordering.
pub fn share_series(results: &ProviderCosts) -> Vec<ShareSlice> {
    results
        .iter()
        .enumerate()
        .map(|(index, (provider, cost))| ShareSlice {
            label: provider.label(),
            value: cost.total_cost,
            color: SHARE_PALETTE[index % SHARE_PALETTE.len()],
        })
        .collect()
}

/// Provider with the minimum total cost; ties break to the first entry in
/// result order. `None` on an empty result.
pub fn cheapest_provider(results: &ProviderCosts) -> Option<Provider> {
    let mut winner: Option<(Provider, f64)> = None;
    for (provider, cost) in results.iter() {
        match winner {
            Some((_, best)) if cost.total_cost >= best => {}
            _ => winner = Some((provider, cost.total_cost)),
        }
    }
    winner.map(|(provider, _)| provider)
}

/// Savings across the result map: the gap between the most and least
/// expensive totals, absolute and as a share of the most expensive.
/// `None` on an empty result.
pub fn summarize(results: &ProviderCosts) -> Option<SavingsSummary> {
    let cheapest = cheapest_provider(results)?;

    let mut most_expensive = cheapest;
    let mut max_total = f64::MIN;
    for (provider, cost) in results.iter() {
        if cost.total_cost > max_total {
            max_total = cost.total_cost;
            most_expensive = provider;
        }
    }

    let min_total = results.get(cheapest).map(|c| c.total_cost)?;
    let max_savings = max_total - min_total;
    let percentage_savings = if max_total > 0.0 {
        max_savings / max_total * 100.0
    } else {
        0.0
    };

    Some(SavingsSummary {
        cheapest_provider: cheapest,
        most_expensive_provider: most_expensive,
        max_savings: round_to(max_savings, 4),
        percentage_savings: round_to(percentage_savings, 2),
    })
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
