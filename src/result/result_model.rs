use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Raw service payload
// ============================================================================
//
// Every field is optional and decoded on its own: a missing, null or
// wrongly-typed field becomes `None` instead of failing the whole response.

/// Response body of `POST /generate-marketing-strategy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub input_product: Option<InputProduct>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub similar_products: Option<Vec<SimilarProduct>>,

    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub marketing_strategy: Option<MarketingStrategy>,

    #[serde(default, deserialize_with = "lenient_map", skip_serializing_if = "Option::is_none")]
    pub platform_content: Option<BTreeMap<String, PlatformContent>>,

    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub performance_insights: Option<PerformanceInsights>,

    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub implementation_guide: Option<ImplementationGuide>,
}

impl StrategyResult {
    /// Decode a success body. Anything that is valid JSON but not an object
    /// decodes to an empty result.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return StrategyResult::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// The product as echoed back by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputProduct {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub extracted_features: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarProduct {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Cosine similarity in 0..1
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub shared_features: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub marketing_performance: Option<MarketingPerformance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingPerformance {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub best_platform: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub script_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingStrategy {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub core_message: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub target_tones: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub key_value_propositions: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub success_metrics: Option<Vec<String>>,
}

/// Content generated for one platform (Instagram, YouTube, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformContent {
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub caption_templates: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub hashtag_strategy: Option<HashtagStrategy>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub visual_elements: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub engagement_ideas: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HashtagStrategy {
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub primary: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub trending: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInsights {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub predicted_engagement: Option<f64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub key_success_factors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationGuide {
    /// Week label -> tasks for that week
    #[serde(default, deserialize_with = "lenient_map", skip_serializing_if = "Option::is_none")]
    pub content_calendar: Option<BTreeMap<String, Vec<String>>>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub performance_tracking: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Option::is_none")]
    pub optimization_tips: Option<Vec<String>>,
}

// ============================================================================
// Lenient field decoders
// ============================================================================

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Structs only decode from JSON objects (serde would otherwise accept arrays
/// positionally).
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Numbers, also accepting numeric strings such as `"149.99"`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

/// Arrays, dropping elements that do not decode.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter(|item| !item.is_array())
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

/// Objects used as maps, dropping entries that do not decode.
fn lenient_map<'de, D, T>(deserializer: D) -> Result<Option<BTreeMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(entries) = value else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .filter_map(|(key, item)| serde_json::from_value(item).ok().map(|v| (key, v)))
            .collect(),
    ))
}
