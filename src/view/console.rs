use crate::view::result_view::{
    ActiveTab, ContentPanel, InsightsPanel, OverviewPanel, Panel, ResultView, SimilarPanel,
};

// ============================================================================
// Console renderer: plain-text panels
// ============================================================================

/// Format one panel for terminal output.
///
/// Produces output like:
/// ```text
/// === Overview: Smart Mug ===
///
///   Similar Products: 3
///   Avg Performance: 8.5/10
///   ...
/// ```
pub fn format_panel(panel: &Panel) -> String {
    match panel {
        Panel::Overview(p) => format_overview(p),
        Panel::Similar(p) => format_similar(p),
        Panel::Content(p) => format_content(p),
        Panel::Insights(p) => format_insights(p),
    }
}

/// All four panels, in tab order, without touching the view's active tab.
pub fn format_all(view: &ResultView) -> String {
    ActiveTab::ALL
        .iter()
        .map(|tab| format_panel(&view.panel_for(*tab)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("\n{}:\n", title));
    for item in items {
        out.push_str(&format!("  - {}\n", item));
    }
}

fn format_overview(p: &OverviewPanel) -> String {
    let mut out = format!("=== Overview: {} ===\n\n", p.product_name);

    for metric in &p.metrics {
        out.push_str(&format!("  {}: {}\n", metric.label, metric.value));
    }

    push_list(&mut out, "Recommended Tones", &p.tones);
    push_list(&mut out, "Value Propositions", &p.value_propositions);
    out.push_str(&format!("\nCore Message:\n  {}\n", p.core_message));
    push_list(&mut out, "Success Metrics", &p.success_metrics);
    out
}

fn format_similar(p: &SimilarPanel) -> String {
    let mut out = String::from("=== Similar Products ===\n");

    for card in &p.cards {
        out.push_str(&format!("\n{} ({}) [{}]\n", card.name, card.category, card.match_label));
        if let Some(price) = &card.price {
            out.push_str(&format!("  Price: {}\n", price));
        }
        out.push_str(&format!("  Shared Features: {}\n", card.features.join(", ")));
        out.push_str(&format!("  Performance: {}\n", card.score));
    }
    out
}

fn format_content(p: &ContentPanel) -> String {
    let mut out = String::from("=== Content Ideas ===\n");

    for section in &p.platforms {
        out.push_str(&format!("\n{} Content Strategy\n", section.platform));

        for (i, caption) in section.captions.iter().enumerate() {
            out.push_str(&format!("\n  Caption Template {}:\n", i + 1));
            for line in caption.lines() {
                out.push_str(&format!("    {}\n", line));
            }
        }

        if !section.primary_hashtags.is_empty() {
            out.push_str(&format!("\n  Hashtags: {}\n", section.primary_hashtags.join(" ")));
        }
        let extra: Vec<&String> = section
            .secondary_hashtags
            .iter()
            .chain(section.trending_hashtags.iter())
            .collect();
        if !extra.is_empty() {
            let tags: Vec<&str> = extra.iter().map(|t| t.as_str()).collect();
            out.push_str(&format!("  More tags: {}\n", tags.join(" ")));
        }
    }
    out
}

fn format_insights(p: &InsightsPanel) -> String {
    let mut out = String::from("=== Insights ===\n\n");

    out.push_str(&format!("  Predicted Engagement: {}\n", p.predicted_engagement));
    out.push_str(&format!("  Confidence: {}\n", p.confidence));

    push_list(&mut out, "Key Success Factors", &p.success_factors);
    push_list(&mut out, "Performance Tracking", &p.performance_tracking);
    push_list(&mut out, "Optimization Tips", &p.optimization_tips);

    out.push_str("\nContent Calendar:\n");
    for (week, tasks) in &p.content_calendar {
        out.push_str(&format!("  {}: {}\n", week.replace('_', " "), tasks.join(", ")));
    }
    out
}
