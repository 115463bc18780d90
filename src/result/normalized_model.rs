use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::result::result_model::{
    HashtagStrategy, ImplementationGuide, InputProduct, MarketingPerformance, MarketingStrategy,
    PerformanceInsights, PlatformContent, SimilarProduct, StrategyResult,
};

// ============================================================================
// Normalized view model
// ============================================================================

/// A strategy result with every field populated.
///
/// Produced only by [`crate::result::normalizer::normalize`]; panels read it
/// without checking for absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub input_product: ProductSummary,
    pub similar_products: Vec<SimilarProductRecord>,
    pub marketing_strategy: StrategyOverview,
    /// Platform name -> content, ordered by platform name
    pub platform_content: BTreeMap<String, PlatformPlan>,
    pub performance_insights: InsightsSummary,
    pub implementation_guide: ImplementationPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub category: String,
    pub description: String,
    pub extracted_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarProductRecord {
    pub name: String,
    pub category: String,
    /// `None` means the product has no listed price
    pub price: Option<f64>,
    pub similarity: f64,
    pub shared_features: Vec<String>,
    pub average_score: f64,
    pub best_platform: String,
    pub script_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOverview {
    pub core_message: String,
    pub target_tones: Vec<String>,
    pub key_value_propositions: Vec<String>,
    pub success_metrics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformPlan {
    pub caption_templates: Vec<String>,
    pub primary_hashtags: Vec<String>,
    pub secondary_hashtags: Vec<String>,
    pub trending_hashtags: Vec<String>,
    pub visual_elements: Vec<String>,
    pub engagement_ideas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub predicted_engagement: f64,
    pub confidence_level: String,
    pub key_success_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationPlan {
    pub content_calendar: BTreeMap<String, Vec<String>>,
    pub performance_tracking: Vec<String>,
    pub optimization_tips: Vec<String>,
}

// ============================================================================
// Back to the raw shape (every field present)
// ============================================================================

impl From<NormalizedResult> for StrategyResult {
    fn from(n: NormalizedResult) -> Self {
        StrategyResult {
            input_product: Some(InputProduct {
                name: Some(n.input_product.name),
                category: Some(n.input_product.category),
                description: Some(n.input_product.description),
                extracted_features: Some(n.input_product.extracted_features),
            }),
            similar_products: Some(n.similar_products.into_iter().map(SimilarProduct::from).collect()),
            marketing_strategy: Some(MarketingStrategy {
                core_message: Some(n.marketing_strategy.core_message),
                target_tones: Some(n.marketing_strategy.target_tones),
                key_value_propositions: Some(n.marketing_strategy.key_value_propositions),
                success_metrics: Some(n.marketing_strategy.success_metrics),
            }),
            platform_content: Some(
                n.platform_content
                    .into_iter()
                    .map(|(platform, plan)| (platform, PlatformContent::from(plan)))
                    .collect(),
            ),
            performance_insights: Some(PerformanceInsights {
                predicted_engagement: Some(n.performance_insights.predicted_engagement),
                confidence_level: Some(n.performance_insights.confidence_level),
                key_success_factors: Some(n.performance_insights.key_success_factors),
            }),
            implementation_guide: Some(ImplementationGuide {
                content_calendar: Some(n.implementation_guide.content_calendar),
                performance_tracking: Some(n.implementation_guide.performance_tracking),
                optimization_tips: Some(n.implementation_guide.optimization_tips),
            }),
        }
    }
}

impl From<SimilarProductRecord> for SimilarProduct {
    fn from(r: SimilarProductRecord) -> Self {
        SimilarProduct {
            name: Some(r.name),
            category: Some(r.category),
            price: r.price,
            similarity: Some(r.similarity),
            shared_features: Some(r.shared_features),
            marketing_performance: Some(MarketingPerformance {
                average_score: Some(r.average_score),
                best_platform: Some(r.best_platform),
                script_count: Some(r.script_count),
            }),
        }
    }
}

impl From<PlatformPlan> for PlatformContent {
    fn from(p: PlatformPlan) -> Self {
        PlatformContent {
            caption_templates: Some(p.caption_templates),
            hashtag_strategy: Some(HashtagStrategy {
                primary: Some(p.primary_hashtags),
                secondary: Some(p.secondary_hashtags),
                trending: Some(p.trending_hashtags),
            }),
            visual_elements: Some(p.visual_elements),
            engagement_ideas: Some(p.engagement_ideas),
        }
    }
}
