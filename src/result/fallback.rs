//! Fallback constants substituted for anything the service leaves out.
//!
//! These are data: the normalizer copies them verbatim, so every view can
//! rely on a complete structure.

use std::collections::BTreeMap;

use crate::result::normalized_model::{
    ImplementationPlan, InsightsSummary, PlatformPlan, SimilarProductRecord, StrategyOverview,
};

pub const DEFAULT_PRODUCT_NAME: &str = "Your Product";
pub const UNKNOWN: &str = "Unknown";

pub const DEFAULT_TONES: [&str; 3] = ["Professional", "Friendly", "Energetic"];

pub const DEFAULT_VALUE_PROPOSITIONS: [&str; 3] = [
    "Boost your confidence with premium quality",
    "Experience cutting-edge innovation",
    "Exceptional quality at unbeatable value",
];

pub const DEFAULT_CORE_MESSAGE: &str =
    "Focus on innovation and quality to capture your target audience";

pub const DEFAULT_SUCCESS_METRICS: [&str; 3] = ["engagement_rate", "conversion_rate", "brand_recall"];

/// Shown when a similar product has no usable performance score.
pub const DEFAULT_AVERAGE_SCORE: f64 = 8.5;

pub const DEFAULT_PREDICTED_ENGAGEMENT: f64 = 8.2;
pub const DEFAULT_CONFIDENCE_LEVEL: &str = "High";

pub const DEFAULT_SUCCESS_FACTORS: [&str; 3] = [
    "Strong professional tone resonates with target audience",
    "Focus on innovation and quality features",
    "Instagram optimization increases visibility",
];

pub const DEFAULT_PERFORMANCE_TRACKING: [&str; 4] = [
    "Engagement rate per platform",
    "Conversion rate from CTAs",
    "Audience growth rate",
    "Content shareability",
];

pub const DEFAULT_OPTIMIZATION_TIPS: [&str; 4] = [
    "A/B test different tones weekly",
    "Monitor competitor strategies",
    "Engage with user comments promptly",
    "Update content based on performance data",
];

pub const DEFAULT_CONTENT_CALENDAR: [(&str, [&str; 3]); 3] = [
    ("week_1", ["Platform setup", "Content creation", "Community engagement"]),
    ("week_2", ["Performance analysis", "Content optimization", "Audience building"]),
    ("week_3", ["Scale successful content", "Explore new platforms", "Partnership outreach"]),
];

pub const DEFAULT_PLATFORM: &str = "Instagram";

pub const DEFAULT_CAPTION_TEMPLATES: [&str; 2] = [
    "\u{2728} Introducing the future of [category]!\n\n\u{1F680} Key Features:\n\u{2022} Feature 1\n\u{2022} Feature 2\n\u{2022} Feature 3\n\nReady to upgrade? \u{1F525}\n\n#innovation #quality #musthave",
    "\u{1F3AF} What makes this special?\n\nIt's not just another product \u{2013} it's a game-changer! \u{1F4AB}\n\nSwipe to see why everyone's talking about it \u{1F449}\n\n#trending #tech #lifestyle",
];

pub const DEFAULT_PRIMARY_HASHTAGS: [&str; 3] = ["#ProductName", "#Category", "#Brand"];

/// (name, category, price, similarity, shared features, average score)
pub const DEFAULT_SIMILAR_PRODUCTS: [(&str, &str, f64, f64, [&str; 4], f64); 3] = [
    ("Premium Product A", "Electronics", 149.99, 0.92, ["wireless", "premium", "innovative", "quality"], 8.5),
    ("Smart Device B", "Electronics", 199.99, 0.88, ["smart", "efficient", "modern", "reliable"], 8.2),
    ("Tech Solution C", "Electronics", 129.99, 0.85, ["advanced", "powerful", "compact", "durable"], 8.7),
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_tones() -> Vec<String> {
    owned(&DEFAULT_TONES)
}

pub fn default_value_propositions() -> Vec<String> {
    owned(&DEFAULT_VALUE_PROPOSITIONS)
}

pub fn default_success_metrics() -> Vec<String> {
    owned(&DEFAULT_SUCCESS_METRICS)
}

pub fn default_strategy() -> StrategyOverview {
    StrategyOverview {
        core_message: DEFAULT_CORE_MESSAGE.to_string(),
        target_tones: default_tones(),
        key_value_propositions: default_value_propositions(),
        success_metrics: default_success_metrics(),
    }
}

pub fn default_similar_products() -> Vec<SimilarProductRecord> {
    DEFAULT_SIMILAR_PRODUCTS
        .iter()
        .map(|(name, category, price, similarity, features, score)| SimilarProductRecord {
            name: name.to_string(),
            category: category.to_string(),
            price: Some(*price),
            similarity: *similarity,
            shared_features: owned(features),
            average_score: *score,
            best_platform: UNKNOWN.to_string(),
            script_count: 0,
        })
        .collect()
}

pub fn default_platform_content() -> BTreeMap<String, PlatformPlan> {
    let plan = PlatformPlan {
        caption_templates: owned(&DEFAULT_CAPTION_TEMPLATES),
        primary_hashtags: owned(&DEFAULT_PRIMARY_HASHTAGS),
        ..PlatformPlan::default()
    };
    BTreeMap::from([(DEFAULT_PLATFORM.to_string(), plan)])
}

pub fn default_success_factors() -> Vec<String> {
    owned(&DEFAULT_SUCCESS_FACTORS)
}

pub fn default_insights() -> InsightsSummary {
    InsightsSummary {
        predicted_engagement: DEFAULT_PREDICTED_ENGAGEMENT,
        confidence_level: DEFAULT_CONFIDENCE_LEVEL.to_string(),
        key_success_factors: default_success_factors(),
    }
}

pub fn default_content_calendar() -> BTreeMap<String, Vec<String>> {
    DEFAULT_CONTENT_CALENDAR
        .iter()
        .map(|(week, tasks)| (week.to_string(), owned(tasks)))
        .collect()
}

pub fn default_performance_tracking() -> Vec<String> {
    owned(&DEFAULT_PERFORMANCE_TRACKING)
}

pub fn default_optimization_tips() -> Vec<String> {
    owned(&DEFAULT_OPTIMIZATION_TIPS)
}

pub fn default_implementation_plan() -> ImplementationPlan {
    ImplementationPlan {
        content_calendar: default_content_calendar(),
        performance_tracking: default_performance_tracking(),
        optimization_tips: default_optimization_tips(),
    }
}
