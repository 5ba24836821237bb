use serde::{Deserialize, Serialize};

/// Bucketed chance of acceptance shown next to each listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionLabel {
    VeryLow,
    Low,
    Moderate,
    High,
    /// The provider did not report a usable quota.
    Unavailable,
}

impl AdmissionLabel {
    /// Bands are inclusive on their lower bound and checked from the top down.
    pub const fn from_percent(percent: u8) -> Self {
        if percent >= 75 {
            Self::High
        } else if percent >= 50 {
            Self::Moderate
        } else if percent >= 25 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Unavailable => "Unavailable",
        }
    }
}

/// Estimated chance that one more applicant would fit within the quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionChance {
    pub score: u8,
    pub label: AdmissionLabel,
}

impl AdmissionChance {
    pub fn estimate(quota: u32, registered: u32) -> Self {
        let score = admission_percent(quota, registered);
        Self {
            score,
            label: AdmissionLabel::from_percent(score),
        }
    }

    pub const fn unavailable() -> Self {
        Self {
            score: 0,
            label: AdmissionLabel::Unavailable,
        }
    }

    /// Fixed-width bar for terminal output, e.g. `[#####-----]`.
    pub fn bar(&self, width: usize) -> String {
        let filled = (usize::from(self.score) * width + 50) / 100;
        let filled = filled.min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }
}

/// Quota over registrations including the prospective applicant, capped at 100%.
pub fn admission_percent(quota: u32, registered: u32) -> u8 {
    let hypothetical_total = u64::from(registered) + 1;
    let ratio = (f64::from(quota) / hypothetical_total as f64).min(1.0);
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_examples() {
        let chance = AdmissionChance::estimate(5, 4);
        assert_eq!(chance.score, 100);
        assert_eq!(chance.label, AdmissionLabel::High);

        let chance = AdmissionChance::estimate(2, 7);
        assert_eq!(chance.score, 25);
        assert_eq!(chance.label, AdmissionLabel::Low);

        let chance = AdmissionChance::estimate(1, 19);
        assert_eq!(chance.score, 5);
        assert_eq!(chance.label, AdmissionLabel::VeryLow);
    }

    #[test]
    fn quota_at_or_above_demand_is_certain() {
        for (quota, registered) in [(1, 0), (10, 9), (50, 3), (u32::MAX, 0), (u32::MAX, u32::MAX - 1)] {
            let chance = AdmissionChance::estimate(quota, registered);
            assert_eq!(chance.score, 100, "quota {quota} registered {registered}");
            assert_eq!(chance.label, AdmissionLabel::High);
        }
    }

    #[test]
    fn zero_quota_is_very_low() {
        for registered in [0, 1, 1_000, u32::MAX] {
            let chance = AdmissionChance::estimate(0, registered);
            assert_eq!(chance.score, 0);
            assert_eq!(chance.label, AdmissionLabel::VeryLow);
        }
    }

    #[test]
    fn percent_stays_within_bounds() {
        let samples = [0, 1, 2, 3, 7, 19, 99, 100, 1_000, 65_535, u32::MAX];
        for quota in samples {
            for registered in samples {
                let percent = admission_percent(quota, registered);
                assert!(percent <= 100, "quota {quota} registered {registered}");
            }
        }
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(AdmissionLabel::from_percent(100), AdmissionLabel::High);
        assert_eq!(AdmissionLabel::from_percent(75), AdmissionLabel::High);
        assert_eq!(AdmissionLabel::from_percent(74), AdmissionLabel::Moderate);
        assert_eq!(AdmissionLabel::from_percent(50), AdmissionLabel::Moderate);
        assert_eq!(AdmissionLabel::from_percent(49), AdmissionLabel::Low);
        assert_eq!(AdmissionLabel::from_percent(25), AdmissionLabel::Low);
        assert_eq!(AdmissionLabel::from_percent(24), AdmissionLabel::VeryLow);
        assert_eq!(AdmissionLabel::from_percent(0), AdmissionLabel::VeryLow);

        assert_eq!(AdmissionChance::estimate(3, 3).label, AdmissionLabel::High);
        assert_eq!(AdmissionChance::estimate(1, 1).label, AdmissionLabel::Moderate);
        assert_eq!(AdmissionChance::estimate(1, 3).label, AdmissionLabel::Low);
    }

    #[test]
    fn bar_tracks_score() {
        assert_eq!(AdmissionChance::estimate(1, 3).bar(8), "[##------]");
        assert_eq!(AdmissionChance::estimate(5, 4).bar(4), "[####]");
        assert_eq!(AdmissionChance::unavailable().bar(4), "[----]");
    }
}
