use std::collections::BTreeMap;

use copyflow_client::result::{
    fallback::{
        self, DEFAULT_AVERAGE_SCORE, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_CORE_MESSAGE,
        DEFAULT_PREDICTED_ENGAGEMENT, DEFAULT_PRODUCT_NAME,
    },
    normalized_model::NormalizedResult,
    normalizer::normalize,
    result_model::{MarketingPerformance, SimilarProduct, StrategyResult},
};

use crate::common::utils::raw;

mod common;

fn full_payload() -> StrategyResult {
    raw(r##"{
        "success": true,
        "input_product": {"name": "Smart Mug", "category": "Kitchen", "description": "Keeps drinks hot", "price": "", "extracted_features": ["heated", "app"]},
        "similar_products": [
            {"name": "Ember Cup", "category": "Kitchen", "price": 99.0, "similarity": 0.913,
             "shared_features": ["heated", "battery", "app", "ceramic", "gift"],
             "marketing_performance": {"average_score": 7.9, "best_platform": "Instagram", "script_count": 4}}
        ],
        "marketing_strategy": {
            "core_message": "Focus on warmth, convenience",
            "target_tones": ["friendly"],
            "key_value_propositions": ["Transform your experience with comfort"],
            "success_metrics": ["engagement_rate"]
        },
        "platform_content": {
            "Instagram": {
                "caption_templates": ["a", "b", "c"],
                "hashtag_strategy": {"primary": ["#SmartMug"], "secondary": ["#innovation"], "trending": ["#tech"]},
                "visual_elements": ["Lifestyle product shots"],
                "engagement_ideas": ["Run a giveaway"]
            }
        },
        "performance_insights": {"predicted_engagement": 6.3, "confidence_level": "medium", "key_success_factors": ["Strong friendly tone"]},
        "implementation_guide": {
            "content_calendar": {"week_1": ["Platform setup"]},
            "performance_tracking": ["Engagement rate per platform"],
            "optimization_tips": ["A/B test different tones weekly"]
        }
    }"##)
}

// =========================================================================
// Totality
// =========================================================================

#[test]
fn empty_response_gets_every_fallback() {
    let n = normalize(&StrategyResult::default());

    assert_eq!(n.input_product.name, DEFAULT_PRODUCT_NAME);
    assert_eq!(n.similar_products, fallback::default_similar_products());
    assert_eq!(n.similar_products.len(), 3);
    assert_eq!(n.marketing_strategy.target_tones, vec!["Professional", "Friendly", "Energetic"]);
    assert_eq!(n.marketing_strategy.key_value_propositions.len(), 3);
    assert_eq!(n.marketing_strategy.core_message, DEFAULT_CORE_MESSAGE);
    assert_eq!(
        n.marketing_strategy.success_metrics,
        vec!["engagement_rate", "conversion_rate", "brand_recall"]
    );
    assert_eq!(n.platform_content.len(), 1);
    let instagram = &n.platform_content["Instagram"];
    assert_eq!(instagram.caption_templates.len(), 2);
    assert_eq!(instagram.primary_hashtags, vec!["#ProductName", "#Category", "#Brand"]);
    assert_eq!(n.performance_insights.predicted_engagement, DEFAULT_PREDICTED_ENGAGEMENT);
    assert_eq!(n.performance_insights.confidence_level, DEFAULT_CONFIDENCE_LEVEL);
    assert_eq!(n.performance_insights.key_success_factors.len(), 3);
    assert_eq!(n.implementation_guide.performance_tracking.len(), 4);
    assert_eq!(n.implementation_guide.optimization_tips.len(), 4);
    assert_eq!(n.implementation_guide.content_calendar.len(), 3);
}

#[test]
fn default_similar_products_are_fully_populated() {
    for product in fallback::default_similar_products() {
        assert!(!product.name.is_empty());
        assert_eq!(product.category, "Electronics");
        assert!(product.price.is_some(), "{} should carry a price", product.name);
        assert!(product.similarity > 0.8 && product.similarity < 1.0);
        assert_eq!(product.shared_features.len(), 4);
        assert!(product.average_score >= 8.0);
    }
}

#[test]
fn fallbacks_are_deterministic() {
    let a = normalize(&StrategyResult::default());
    let b = normalize(&StrategyResult::default());
    assert_eq!(a, b);
}

#[test]
fn empty_similar_products_fall_back_to_defaults() {
    let n = normalize(&raw(r#"{"input_product": {"name": "Smart Mug"}, "similar_products": []}"#));

    assert_eq!(n.input_product.name, "Smart Mug");
    assert_eq!(n.similar_products.len(), 3);
    assert_eq!(n.similar_products[0].name, "Premium Product A");
}

#[test]
fn empty_top_level_lists_count_as_absent() {
    let n = normalize(&raw(
        r#"{"marketing_strategy": {"target_tones": [], "core_message": ""}, "platform_content": {},
            "performance_insights": {"key_success_factors": []},
            "implementation_guide": {"content_calendar": {}, "optimization_tips": []}}"#,
    ));

    assert_eq!(n.marketing_strategy.target_tones, fallback::default_tones());
    assert_eq!(n.marketing_strategy.core_message, DEFAULT_CORE_MESSAGE);
    assert_eq!(n.platform_content, fallback::default_platform_content());
    assert_eq!(n.performance_insights.key_success_factors, fallback::default_success_factors());
    assert_eq!(n.implementation_guide.content_calendar, fallback::default_content_calendar());
    assert_eq!(n.implementation_guide.optimization_tips, fallback::default_optimization_tips());
}

// =========================================================================
// Nested partial subtrees
// =========================================================================

#[test]
fn partial_strategy_keeps_supplied_fields() {
    let n = normalize(&raw(r#"{"marketing_strategy": {"core_message": "Focus on warmth"}}"#));

    assert_eq!(n.marketing_strategy.core_message, "Focus on warmth");
    assert_eq!(n.marketing_strategy.target_tones, fallback::default_tones());
    assert_eq!(n.marketing_strategy.key_value_propositions, fallback::default_value_propositions());
}

#[test]
fn similar_product_without_performance_gets_default_score() {
    let n = normalize(&raw(r#"{"similar_products": [{"name": "Ember Cup", "similarity": 0.9}]}"#));

    assert_eq!(n.similar_products.len(), 1);
    let p = &n.similar_products[0];
    assert_eq!(p.name, "Ember Cup");
    assert_eq!(p.category, "Unknown");
    assert_eq!(p.price, None, "Absent price stays unlisted");
    assert_eq!(p.average_score, DEFAULT_AVERAGE_SCORE);
    assert!(p.shared_features.is_empty());
    assert_eq!(p.best_platform, "Unknown");
}

#[test]
fn platform_entry_without_hashtags_gets_empty_lists() {
    let n = normalize(&raw(
        r#"{"platform_content": {"YouTube": {"caption_templates": ["Review: Smart Mug"]}}}"#,
    ));

    let youtube = &n.platform_content["YouTube"];
    assert_eq!(youtube.caption_templates, vec!["Review: Smart Mug"]);
    assert!(youtube.primary_hashtags.is_empty());
    assert!(!n.platform_content.contains_key("Instagram"), "Server map replaces the default");
}

#[test]
fn non_finite_numbers_fall_back() {
    let raw = StrategyResult {
        similar_products: Some(vec![SimilarProduct {
            name: Some("Odd".into()),
            similarity: Some(f64::NAN),
            price: Some(f64::INFINITY),
            marketing_performance: Some(MarketingPerformance {
                average_score: Some(f64::NAN),
                ..Default::default()
            }),
            ..Default::default()
        }]),
        ..Default::default()
    };
    let n = normalize(&raw);

    assert_eq!(n.similar_products[0].average_score, DEFAULT_AVERAGE_SCORE);
    assert_eq!(n.similar_products[0].similarity, 0.0);
    assert_eq!(n.similar_products[0].price, None);
}

// =========================================================================
// Lenient decoding
// =========================================================================

#[test]
fn wrongly_typed_fields_are_absorbed() {
    let r = raw(
        r#"{"similar_products": "oops", "marketing_strategy": [1, 2], "input_product": null,
            "performance_insights": {"predicted_engagement": "7.4", "confidence_level": 3}}"#,
    );

    assert_eq!(r.similar_products, None);
    assert_eq!(r.marketing_strategy, None);
    assert_eq!(r.input_product, None);

    let n = normalize(&r);
    assert_eq!(n.similar_products.len(), 3);
    assert_eq!(n.performance_insights.predicted_engagement, 7.4, "Numeric strings are accepted");
    assert_eq!(n.performance_insights.confidence_level, DEFAULT_CONFIDENCE_LEVEL);
}

#[test]
fn malformed_list_elements_are_dropped() {
    let r = raw(
        r#"{"similar_products": [{"name": "Ember Cup"}, 42, "x"],
            "marketing_strategy": {"target_tones": ["friendly", 7, null]}}"#,
    );

    assert_eq!(r.similar_products.as_ref().map(Vec::len), Some(1));
    let n = normalize(&r);
    assert_eq!(n.marketing_strategy.target_tones, vec!["friendly"]);
}

#[test]
fn non_object_payload_decodes_to_empty() {
    let r = StrategyResult::from_value(serde_json::json!([1, 2, 3]));
    assert_eq!(r, StrategyResult::default());
}

// =========================================================================
// Idempotence
// =========================================================================

#[test]
fn full_payload_passes_through() {
    let n = normalize(&full_payload());

    assert_eq!(n.input_product.name, "Smart Mug");
    assert_eq!(n.input_product.extracted_features, vec!["heated", "app"]);
    assert_eq!(n.similar_products[0].shared_features.len(), 5, "Normalization does not truncate");
    assert_eq!(n.similar_products[0].script_count, 4);
    assert_eq!(n.performance_insights.confidence_level, "medium");
    assert_eq!(
        n.implementation_guide.content_calendar,
        BTreeMap::from([("week_1".to_string(), vec!["Platform setup".to_string()])])
    );
}

#[test]
fn normalizing_complete_input_returns_it_unchanged() {
    let complete: StrategyResult = normalize(&full_payload()).into();
    let again: StrategyResult = normalize(&complete).into();
    assert_eq!(again, complete);
}

#[test]
fn normalization_is_idempotent_on_defaults() {
    let first: NormalizedResult = normalize(&StrategyResult::default());
    let second = normalize(&StrategyResult::from(first.clone()));
    assert_eq!(first, second);
}
