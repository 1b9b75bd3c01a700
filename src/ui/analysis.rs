use crate::analysis::content::{resolve, ContentTab};
use crate::analysis::presentation::{format_confidence, ReviewStatus};
use crate::analysis::structured::{field_count, project};
use crate::controller::accordion::{Section, SectionState};
use crate::model::{AnalysisResult, EmailContent};
use crate::ui::widgets;
use egui::{RichText, Ui};

/// Original/translated content with its tab strip. Returns the tab the user
/// clicked, if any.
pub fn draw_content(
    ui: &mut Ui,
    original: &EmailContent,
    translated: Option<&EmailContent>,
    tab: ContentTab,
) -> Option<ContentTab> {
    let view = resolve(original, translated, tab);
    let mut clicked = None;

    ui.heading(view.subject);
    ui.horizontal(|ui| {
        for candidate in [ContentTab::Original, ContentTab::Translated] {
            let enabled = candidate == ContentTab::Original || view.has_translation;
            let response = ui.add_enabled(
                enabled,
                egui::SelectableLabel::new(tab == candidate, candidate.label()),
            );
            if response.clicked() {
                clicked = Some(candidate);
            }
        }
    });

    egui::Frame::default()
        .inner_margin(8.0)
        .corner_radius(4.0)
        .fill(ui.visuals().faint_bg_color)
        .show(ui, |ui| {
            ui.label(
                RichText::new(if view.showing_translation {
                    "Translated Content"
                } else {
                    "Original Content"
                })
                .strong(),
            );
            ui.label(view.body);
        });

    if !view.has_translation {
        ui.colored_label(egui::Color32::GRAY, "This email has not been translated");
    }

    clicked
}

fn section_header(
    ui: &mut Ui,
    sections: &mut SectionState,
    section: Section,
    badge: Option<String>,
) -> bool {
    let arrow = if sections.is_open(section) { "▼" } else { "▶" };
    ui.horizontal(|ui| {
        let title = RichText::new(format!("{arrow} {}", section.title())).strong();
        if ui.add(egui::Button::new(title).frame(false)).clicked() {
            sections.toggle(section);
        }
        if let Some(text) = badge {
            ui.label(RichText::new(text).small().weak());
        }
    });
    sections.is_open(section)
}

pub fn draw_analysis(ui: &mut Ui, analysis: &AnalysisResult, sections: &mut SectionState) {
    ui.horizontal(|ui| {
        widgets::confidence_ring(ui, analysis.confidence_scores.overall, 56.0);
        ui.vertical(|ui| {
            ui.strong("AI Analysis");
            ui.label(format!("Processed in {}ms", analysis.processing_time_ms));
            let status = ReviewStatus::from_flag(analysis.requires_human_review);
            widgets::badge(ui, status.label(), widgets::review_color(status));
            if let Some(usage) = &analysis.token_usage {
                ui.label(
                    RichText::new(format!(
                        "{} tokens ({} in / {} out)",
                        usage.total_tokens, usage.input_tokens, usage.output_tokens
                    ))
                    .small()
                    .weak(),
                );
            }
        });
    });
    ui.separator();

    for section in Section::ALL {
        let badge = match section {
            Section::StructuredData => {
                Some(format!("{} items", field_count(&analysis.structured_data)))
            }
            Section::ActionItems => Some(format!("{} items", analysis.action_items.len())),
            _ => None,
        };
        if section_header(ui, sections, section, badge) {
            ui.indent(section.title(), |ui| draw_section(ui, analysis, section));
        }
        ui.add_space(4.0);
    }
}

fn draw_section(ui: &mut Ui, analysis: &AnalysisResult, section: Section) {
    match section {
        Section::Summary => {
            ui.label(&analysis.summary);
        }
        Section::Classification => {
            let c = &analysis.classification;
            egui::Grid::new("classification").num_columns(2).show(ui, |ui| {
                ui.label("Category");
                widgets::badge(ui, &c.category, widgets::category_color(&c.category));
                ui.end_row();
                ui.label("Priority");
                widgets::badge(ui, &c.priority, widgets::priority_color(&c.priority));
                ui.end_row();
                ui.label("Sentiment");
                widgets::badge(ui, &c.sentiment, widgets::sentiment_color(&c.sentiment));
                ui.end_row();
                ui.label("Confidence");
                ui.horizontal(|ui| widgets::confidence_bar(ui, c.confidence, 120.0, true));
                ui.end_row();
            });
        }
        Section::RecommendedAction => {
            ui.strong(&analysis.next_best_action);
            ui.label(&analysis.action_reasoning);
            ui.horizontal(|ui| widgets::confidence_bar(ui, analysis.action_confidence, 120.0, true));
        }
        Section::StructuredData => {
            let fields = project(&analysis.structured_data);
            if fields.is_empty() {
                ui.label(RichText::new("No structured data extracted").weak());
                return;
            }
            egui::Grid::new("structured_data")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui| {
                    for field in fields {
                        ui.label(RichText::new(field.label).strong());
                        ui.label(field.value);
                        ui.horizontal(|ui| widgets::confidence_bar(ui, field.confidence, 64.0, true));
                        ui.end_row();
                    }
                });
        }
        Section::ActionItems => {
            if analysis.action_items.is_empty() {
                ui.label(RichText::new("No action items").weak());
            }
            for (i, item) in analysis.action_items.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(format!("{}.", i + 1));
                    ui.label(&item.action);
                    widgets::confidence_bar(ui, item.confidence, 64.0, true);
                });
            }
        }
        Section::ConfidenceScores => {
            for (label, score) in analysis.confidence_scores.labelled() {
                ui.horizontal(|ui| {
                    ui.label(format!("{}: {}", label.replace('_', " "), format_confidence(score)));
                    widgets::confidence_bar(ui, score, 120.0, false);
                });
            }
        }
    }
}
