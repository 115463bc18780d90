use std::collections::BTreeMap;

use crate::result::{
    fallback::{self, DEFAULT_AVERAGE_SCORE, DEFAULT_PRODUCT_NAME, UNKNOWN},
    normalized_model::{
        ImplementationPlan, InsightsSummary, NormalizedResult, PlatformPlan, ProductSummary,
        SimilarProductRecord, StrategyOverview,
    },
    result_model::{
        ImplementationGuide, InputProduct, MarketingStrategy, PerformanceInsights,
        PlatformContent, SimilarProduct, StrategyResult,
    },
};

/// Fill every absent field of a service response with its fallback.
///
/// Total over any input and deterministic. Empty top-level lists and maps
/// count as absent; lists inside a server-supplied record do not.
pub fn normalize(raw: &StrategyResult) -> NormalizedResult {
    NormalizedResult {
        input_product: normalize_product(raw.input_product.as_ref()),
        similar_products: normalize_similar(raw.similar_products.as_deref()),
        marketing_strategy: normalize_strategy(raw.marketing_strategy.as_ref()),
        platform_content: normalize_platforms(raw.platform_content.as_ref()),
        performance_insights: normalize_insights(raw.performance_insights.as_ref()),
        implementation_guide: normalize_guide(raw.implementation_guide.as_ref()),
    }
}

fn text_or(value: Option<&String>, fallback: &str) -> String {
    value.cloned().unwrap_or_else(|| fallback.to_string())
}

fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

/// Non-empty list or the fallback list.
fn list_or(value: Option<&Vec<String>>, fallback: impl FnOnce() -> Vec<String>) -> Vec<String> {
    match value {
        Some(items) if !items.is_empty() => items.clone(),
        _ => fallback(),
    }
}

fn list_or_empty(value: Option<&Vec<String>>) -> Vec<String> {
    value.cloned().unwrap_or_default()
}

fn normalize_product(product: Option<&InputProduct>) -> ProductSummary {
    let product = product.cloned().unwrap_or_default();
    ProductSummary {
        name: product
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
        category: product.category.unwrap_or_default(),
        description: product.description.unwrap_or_default(),
        extracted_features: product.extracted_features.unwrap_or_default(),
    }
}

fn normalize_similar(products: Option<&[SimilarProduct]>) -> Vec<SimilarProductRecord> {
    match products {
        Some(items) if !items.is_empty() => items.iter().map(normalize_similar_record).collect(),
        _ => fallback::default_similar_products(),
    }
}

fn normalize_similar_record(p: &SimilarProduct) -> SimilarProductRecord {
    let performance = p.marketing_performance.clone().unwrap_or_default();
    SimilarProductRecord {
        name: text_or(p.name.as_ref(), UNKNOWN),
        category: text_or(p.category.as_ref(), UNKNOWN),
        price: p.price.filter(|v| v.is_finite()),
        similarity: finite_or(p.similarity, 0.0),
        shared_features: list_or_empty(p.shared_features.as_ref()),
        average_score: finite_or(performance.average_score, DEFAULT_AVERAGE_SCORE),
        best_platform: text_or(performance.best_platform.as_ref(), UNKNOWN),
        script_count: performance.script_count.unwrap_or(0),
    }
}

fn normalize_strategy(strategy: Option<&MarketingStrategy>) -> StrategyOverview {
    let Some(s) = strategy else {
        return fallback::default_strategy();
    };
    StrategyOverview {
        core_message: s
            .core_message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback::DEFAULT_CORE_MESSAGE.to_string()),
        target_tones: list_or(s.target_tones.as_ref(), fallback::default_tones),
        key_value_propositions: list_or(
            s.key_value_propositions.as_ref(),
            fallback::default_value_propositions,
        ),
        success_metrics: list_or(s.success_metrics.as_ref(), fallback::default_success_metrics),
    }
}

fn normalize_platforms(
    platforms: Option<&BTreeMap<String, PlatformContent>>,
) -> BTreeMap<String, PlatformPlan> {
    match platforms {
        Some(map) if !map.is_empty() => map
            .iter()
            .map(|(name, content)| (name.clone(), normalize_platform(content)))
            .collect(),
        _ => fallback::default_platform_content(),
    }
}

fn normalize_platform(content: &PlatformContent) -> PlatformPlan {
    let hashtags = content.hashtag_strategy.clone().unwrap_or_default();
    PlatformPlan {
        caption_templates: list_or_empty(content.caption_templates.as_ref()),
        primary_hashtags: hashtags.primary.unwrap_or_default(),
        secondary_hashtags: hashtags.secondary.unwrap_or_default(),
        trending_hashtags: hashtags.trending.unwrap_or_default(),
        visual_elements: list_or_empty(content.visual_elements.as_ref()),
        engagement_ideas: list_or_empty(content.engagement_ideas.as_ref()),
    }
}

fn normalize_insights(insights: Option<&PerformanceInsights>) -> InsightsSummary {
    let Some(i) = insights else {
        return fallback::default_insights();
    };
    InsightsSummary {
        predicted_engagement: finite_or(
            i.predicted_engagement,
            fallback::DEFAULT_PREDICTED_ENGAGEMENT,
        ),
        confidence_level: i
            .confidence_level
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| fallback::DEFAULT_CONFIDENCE_LEVEL.to_string()),
        key_success_factors: list_or(
            i.key_success_factors.as_ref(),
            fallback::default_success_factors,
        ),
    }
}

fn normalize_guide(guide: Option<&ImplementationGuide>) -> ImplementationPlan {
    let Some(g) = guide else {
        return fallback::default_implementation_plan();
    };
    ImplementationPlan {
        content_calendar: match &g.content_calendar {
            Some(calendar) if !calendar.is_empty() => calendar.clone(),
            _ => fallback::default_content_calendar(),
        },
        performance_tracking: list_or(
            g.performance_tracking.as_ref(),
            fallback::default_performance_tracking,
        ),
        optimization_tips: list_or(
            g.optimization_tips.as_ref(),
            fallback::default_optimization_tips,
        ),
    }
}
