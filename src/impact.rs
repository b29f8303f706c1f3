//! Impact figures derived from feed snapshots.
//!
//! Nothing here is stored: the dashboard recomputes both structs from the
//! current snapshots on every frame.

use crate::consts::cli_consts::impact::{CO2_KG_PER_KG, MEALS_PER_KG};
use crate::donations::{Donation, DonationStatus};

/// "Your Real-time Impact", computed from the user's own feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactMetrics {
    pub total_kg: f64,
    pub meals_provided: u64,
    pub co2_saved_kg: u64,
}

impl ImpactMetrics {
    pub fn from_donations(donations: &[Donation]) -> Self {
        let total_kg: f64 = donations.iter().map(|d| d.quantity).sum();
        Self {
            total_kg,
            meals_provided: round_estimate(total_kg * MEALS_PER_KG),
            co2_saved_kg: round_estimate(total_kg * CO2_KG_PER_KG),
        }
    }

    /// Total formatted without a trailing `.0` for whole kilograms.
    pub fn format_total(&self) -> String {
        if self.total_kg.fract() == 0.0 {
            format!("{:.0} kg", self.total_kg)
        } else {
            format!("{:.1} kg", self.total_kg)
        }
    }
}

/// "Live Community Impact", computed from the global feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommunityStats {
    pub listed: usize,
    pub available: usize,
    pub total_kg: f64,
}

impl CommunityStats {
    pub fn from_donations(donations: &[Donation]) -> Self {
        Self {
            listed: donations.len(),
            available: donations
                .iter()
                .filter(|d| d.status == DonationStatus::Available)
                .count(),
            total_kg: donations.iter().map(|d| d.quantity).sum(),
        }
    }
}

/// Rounds half up; negative or non-finite inputs count as zero.
fn round_estimate(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::tests::donation;

    #[test]
    fn test_impact_of_eight_kilograms() {
        let donations = vec![donation("d1", "me", 5.0), donation("d2", "me", 3.0)];
        let metrics = ImpactMetrics::from_donations(&donations);
        assert_eq!(metrics.total_kg, 8.0);
        assert_eq!(metrics.meals_provided, 24);
        assert_eq!(metrics.co2_saved_kg, 18);
        assert_eq!(metrics.format_total(), "8 kg");
    }

    #[test]
    fn test_impact_of_empty_feed_is_zero() {
        let metrics = ImpactMetrics::from_donations(&[]);
        assert_eq!(metrics.total_kg, 0.0);
        assert_eq!(metrics.meals_provided, 0);
        assert_eq!(metrics.co2_saved_kg, 0);
    }

    #[test]
    fn test_impact_rounds_estimates() {
        // 1.5 kg -> 4.5 meals, 3.45 kg CO2
        let metrics = ImpactMetrics::from_donations(&[donation("d1", "me", 1.5)]);
        assert_eq!(metrics.meals_provided, 5);
        assert_eq!(metrics.co2_saved_kg, 3);
        assert_eq!(metrics.format_total(), "1.5 kg");
    }

    #[test]
    fn test_community_stats_count_available() {
        let mut claimed = donation("d2", "u2", 4.0);
        claimed.status = DonationStatus::Claimed;
        let stats = CommunityStats::from_donations(&[donation("d1", "u1", 1.5), claimed]);
        assert_eq!(stats.listed, 2);
        assert_eq!(stats.available, 1);
        assert_eq!(stats.total_kg, 5.5);
    }
}
