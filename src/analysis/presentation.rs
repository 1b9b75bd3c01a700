//! Display tiers for confidence scores and classification labels.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

/// `>= 0.9` high, `>= 0.7` medium, anything else low. Lower bounds are inclusive.
pub fn confidence_tier(confidence: f64) -> ConfidenceTier {
    if confidence >= 0.9 {
        ConfidenceTier::High
    } else if confidence >= 0.7 {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}

/// Whole percentage, rounding halves up.
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0 + 0.5).floor() as i64
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", confidence_percent(confidence))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTier {
    High,
    Medium,
    Low,
    Unknown,
}

impl PriorityTier {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentTier {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl SentimentTier {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            "neutral" => Self::Neutral,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryTier {
    AccountManagement,
    ProductInquiry,
    Support,
    Unknown,
}

impl CategoryTier {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "account_management" => Self::AccountManagement,
            "product_inquiry" => Self::ProductInquiry,
            "support" => Self::Support,
            _ => Self::Unknown,
        }
    }
}

/// Drives visual severity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    NeedsReview,
    AutoProcessed,
}

impl ReviewStatus {
    pub fn from_flag(requires_human_review: bool) -> Self {
        if requires_human_review {
            Self::NeedsReview
        } else {
            Self::AutoProcessed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NeedsReview => "Needs Review",
            Self::AutoProcessed => "Auto-processed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_tiers_have_inclusive_lower_bounds() {
        assert_eq!(confidence_tier(0.95), ConfidenceTier::High);
        assert_eq!(confidence_tier(0.9), ConfidenceTier::High);
        assert_eq!(confidence_tier(0.75), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(0.7), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(0.69), ConfidenceTier::Low);
        assert_eq!(confidence_tier(0.5), ConfidenceTier::Low);
    }

    #[test]
    fn percentages_round_half_up() {
        assert_eq!(confidence_percent(0.875), 88);
        assert_eq!(confidence_percent(0.125), 13);
        assert_eq!(confidence_percent(0.0), 0);
        assert_eq!(confidence_percent(1.0), 100);
        assert_eq!(format_confidence(0.92), "92%");
    }

    #[test]
    fn labels_match_case_insensitively() {
        assert_eq!(PriorityTier::from_label("HIGH"), PriorityTier::High);
        assert_eq!(PriorityTier::from_label("urgent"), PriorityTier::Unknown);
        assert_eq!(SentimentTier::from_label("Negative"), SentimentTier::Negative);
        assert_eq!(SentimentTier::from_label(""), SentimentTier::Unknown);
        assert_eq!(
            CategoryTier::from_label("Product_Inquiry"),
            CategoryTier::ProductInquiry
        );
        assert_eq!(CategoryTier::from_label("billing"), CategoryTier::Unknown);
    }

    #[test]
    fn review_flag_maps_to_status() {
        assert_eq!(ReviewStatus::from_flag(true).label(), "Needs Review");
        assert_eq!(ReviewStatus::from_flag(false), ReviewStatus::AutoProcessed);
    }
}
