use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::result::{
    fallback::{DEFAULT_AVERAGE_SCORE, DEFAULT_PREDICTED_ENGAGEMENT},
    normalized_model::{NormalizedResult, SimilarProductRecord},
};

/// Maximum shared features shown on a product card.
pub const CARD_FEATURE_LIMIT: usize = 4;
/// Caption templates shown per platform.
pub const CAPTION_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Overview,
    Similar,
    Content,
    Insights,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 4] = [
        ActiveTab::Overview,
        ActiveTab::Similar,
        ActiveTab::Content,
        ActiveTab::Insights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveTab::Overview => "overview",
            ActiveTab::Similar => "similar",
            ActiveTab::Content => "content",
            ActiveTab::Insights => "insights",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Overview => "Overview",
            ActiveTab::Similar => "Similar Products",
            ActiveTab::Content => "Content Ideas",
            ActiveTab::Insights => "Insights",
        }
    }
}

impl fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActiveTab::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tab '{}'", s))
    }
}

// ============================================================================
// Panel view models
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewPanel {
    pub product_name: String,
    pub metrics: Vec<Metric>,
    pub tones: Vec<String>,
    pub value_propositions: Vec<String>,
    pub core_message: String,
    pub success_metrics: Vec<String>,
}

impl OverviewPanel {
    pub fn metric(&self, label: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub name: String,
    pub category: String,
    /// `None` when the price is missing or zero
    pub price: Option<String>,
    pub match_label: String,
    pub features: Vec<String>,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarPanel {
    pub cards: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSection {
    pub platform: String,
    pub captions: Vec<String>,
    pub primary_hashtags: Vec<String>,
    pub secondary_hashtags: Vec<String>,
    pub trending_hashtags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentPanel {
    pub platforms: Vec<PlatformSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsPanel {
    pub predicted_engagement: String,
    pub confidence: String,
    pub success_factors: Vec<String>,
    pub performance_tracking: Vec<String>,
    pub optimization_tips: Vec<String>,
    pub content_calendar: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Overview(OverviewPanel),
    Similar(SimilarPanel),
    Content(ContentPanel),
    Insights(InsightsPanel),
}

// ============================================================================
// Render-time formatting
// ============================================================================

/// One-decimal score, `8.5` when the value is not a finite number.
pub fn format_score(score: f64) -> String {
    if score.is_finite() {
        format!("{:.1}", score)
    } else {
        format!("{:.1}", DEFAULT_AVERAGE_SCORE)
    }
}

pub fn format_engagement(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        DEFAULT_PREDICTED_ENGAGEMENT.to_string()
    }
}

pub fn format_match(similarity: f64) -> String {
    let pct = if similarity.is_finite() {
        (similarity * 100.0).round() as i64
    } else {
        0
    };
    format!("{}% Match", pct)
}

/// `engagement_rate` -> `engagement rate`
pub fn humanize_metric(metric: &str) -> String {
    metric.replace('_', " ")
}

fn average_performance(products: &[SimilarProductRecord]) -> String {
    let scores: Vec<f64> = products
        .iter()
        .map(|p| {
            if p.average_score.is_finite() {
                p.average_score
            } else {
                DEFAULT_AVERAGE_SCORE
            }
        })
        .collect();
    let mean = if scores.is_empty() {
        DEFAULT_AVERAGE_SCORE
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    format!("{}/10", format_score(mean))
}

// ============================================================================
// Tab state machine
// ============================================================================

/// Result screen: a normalized result plus the selected tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    result: NormalizedResult,
    active: ActiveTab,
}

impl ResultView {
    /// Every new result starts on the overview tab.
    pub fn new(result: NormalizedResult) -> Self {
        Self {
            result,
            active: ActiveTab::Overview,
        }
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active
    }

    pub fn result(&self) -> &NormalizedResult {
        &self.result
    }

    pub fn select(&mut self, tab: ActiveTab) {
        self.active = tab;
    }

    pub fn panel(&self) -> Panel {
        self.panel_for(self.active)
    }

    pub fn panel_for(&self, tab: ActiveTab) -> Panel {
        match tab {
            ActiveTab::Overview => Panel::Overview(self.overview()),
            ActiveTab::Similar => Panel::Similar(self.similar()),
            ActiveTab::Content => Panel::Content(self.content()),
            ActiveTab::Insights => Panel::Insights(self.insights()),
        }
    }

    fn overview(&self) -> OverviewPanel {
        let r = &self.result;
        OverviewPanel {
            product_name: r.input_product.name.clone(),
            metrics: vec![
                Metric {
                    label: "Similar Products",
                    value: r.similar_products.len().to_string(),
                },
                Metric {
                    label: "Avg Performance",
                    value: average_performance(&r.similar_products),
                },
                Metric {
                    label: "Confidence",
                    value: r.performance_insights.confidence_level.clone(),
                },
                Metric {
                    label: "Platforms",
                    value: r.platform_content.len().to_string(),
                },
            ],
            tones: r.marketing_strategy.target_tones.clone(),
            value_propositions: r.marketing_strategy.key_value_propositions.clone(),
            core_message: r.marketing_strategy.core_message.clone(),
            success_metrics: r
                .marketing_strategy
                .success_metrics
                .iter()
                .map(|m| humanize_metric(m))
                .collect(),
        }
    }

    fn similar(&self) -> SimilarPanel {
        SimilarPanel {
            cards: self
                .result
                .similar_products
                .iter()
                .map(|p| ProductCard {
                    name: p.name.clone(),
                    category: p.category.clone(),
                    price: p
                        .price
                        .filter(|price| *price != 0.0)
                        .map(|price| format!("${}", price)),
                    match_label: format_match(p.similarity),
                    features: p.shared_features.iter().take(CARD_FEATURE_LIMIT).cloned().collect(),
                    score: format!("{}/10", format_score(p.average_score)),
                })
                .collect(),
        }
    }

    fn content(&self) -> ContentPanel {
        ContentPanel {
            platforms: self
                .result
                .platform_content
                .iter()
                .map(|(platform, plan)| PlatformSection {
                    platform: platform.clone(),
                    captions: plan.caption_templates.iter().take(CAPTION_LIMIT).cloned().collect(),
                    primary_hashtags: plan.primary_hashtags.clone(),
                    secondary_hashtags: plan.secondary_hashtags.clone(),
                    trending_hashtags: plan.trending_hashtags.clone(),
                })
                .collect(),
        }
    }

    fn insights(&self) -> InsightsPanel {
        let insights = &self.result.performance_insights;
        let guide = &self.result.implementation_guide;
        InsightsPanel {
            predicted_engagement: format_engagement(insights.predicted_engagement),
            confidence: insights.confidence_level.clone(),
            success_factors: insights.key_success_factors.clone(),
            performance_tracking: guide.performance_tracking.clone(),
            optimization_tips: guide.optimization_tips.clone(),
            content_calendar: guide
                .content_calendar
                .iter()
                .map(|(week, tasks)| (week.clone(), tasks.clone()))
                .collect(),
        }
    }
}
