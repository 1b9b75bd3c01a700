use crate::analysis::content::ContentTab;
use crate::analysis::presentation::{format_confidence, ReviewStatus};
use crate::app::send;
use crate::bridge::UiCommand;
use crate::controller::detail::ResultsPhase;
use crate::model::{Email, ProcessResultItem};
use crate::state::AppState;
use crate::ui::{analysis, widgets};
use egui::{RichText, Ui};
use tokio::sync::mpsc::UnboundedSender;

const INFO_BLUE: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);

enum DetailAction {
    Close,
    Process,
    Toggle(usize),
    Tab(usize, ContentTab),
}

pub fn draw_detail(ui: &mut Ui, state: &mut AppState, cmd_tx: &UnboundedSender<UiCommand>) {
    let mut actions = Vec::new();

    if ui.button("← Back to Inbox").clicked() {
        actions.push(DetailAction::Close);
    }
    ui.add_space(8.0);

    let processing = state.detail.processing();
    if let Some(email) = state.detail.selected() {
        if draw_header(ui, email, processing) {
            actions.push(DetailAction::Process);
        }
    }

    if state.detail.process_result().is_some_and(|r| !r.success) {
        ui.colored_label(egui::Color32::RED, "Processing failed. Try again.");
    }

    ui.separator();

    let phase = state.detail.phase();
    let (results, accordion) = state.detail.results_and_accordion();

    if phase == ResultsPhase::Fetching {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading analysis results...");
        });
    } else if results.is_empty() && !processing {
        ui.vertical_centered(|ui| {
            ui.heading("No Analysis Results");
            ui.label("Process this email to see AI-powered analysis and insights.");
        });
    }

    if !results.is_empty() {
        ui.horizontal(|ui| {
            ui.heading("Processing Results");
            widgets::badge(ui, &results.len().to_string(), INFO_BLUE);
        });
        ui.add_space(4.0);
    }

    for (index, item) in results.into_iter().enumerate() {
        ui.push_id(index, |ui| {
            egui::Frame::default()
                .inner_margin(8.0)
                .corner_radius(6.0)
                .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                .show(ui, |ui| {
                    if draw_result_header(ui, item, accordion.is_expanded(index)) {
                        actions.push(DetailAction::Toggle(index));
                    }
                    if accordion.is_expanded(index) {
                        ui.separator();
                        let tab = accordion.active_tab(index);
                        if let Some(tab) = analysis::draw_content(
                            ui,
                            &item.original_email,
                            item.translated_content.as_ref(),
                            tab,
                        ) {
                            actions.push(DetailAction::Tab(index, tab));
                        }
                        ui.add_space(8.0);
                        if let Some(sections) = accordion.sections_mut(index) {
                            analysis::draw_analysis(ui, &item.analysis_result, sections);
                        }
                        draw_raw_json(ui, item);
                    }
                });
        });
        ui.add_space(6.0);
    }

    for action in actions {
        match action {
            DetailAction::Close => state.detail.close(),
            DetailAction::Process => {
                if let Some(request) = state.detail.begin_process() {
                    send(cmd_tx, state, UiCommand::ProcessEmail(request));
                }
            }
            DetailAction::Toggle(index) => state.detail.toggle_result(index),
            DetailAction::Tab(index, tab) => {
                state.detail.accordion.set_tab(index, tab);
            }
        }
    }
}

/// Returns true when "Process Email" was clicked.
fn draw_header(ui: &mut Ui, email: &Email, processing: bool) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.heading(email.display_subject());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if processing {
                "Processing..."
            } else {
                "Process Email"
            };
            clicked = ui
                .add_enabled(!processing, egui::Button::new(label))
                .clicked();
            if processing {
                ui.spinner();
            }
        });
    });

    let (recipients, hidden) = email.recipients_preview();
    egui::Grid::new("email_header").num_columns(2).show(ui, |ui| {
        ui.strong("ReqID:");
        ui.monospace(email.rec_id.as_str());
        ui.end_row();
        ui.strong("Date:");
        ui.label(&email.created_date_time);
        ui.end_row();
        ui.strong("From:");
        ui.label(&email.from);
        ui.end_row();
        ui.strong("To:");
        ui.horizontal(|ui| {
            ui.label(recipients);
            if hidden > 0 {
                ui.label(RichText::new(format!("+{hidden} more")).small())
                    .on_hover_text(&email.to_recipients);
            }
        });
        ui.end_row();
    });
    clicked
}

/// Collapsed header row of one run. Returns true when clicked.
fn draw_result_header(ui: &mut Ui, item: &ProcessResultItem, expanded: bool) -> bool {
    let analysis = &item.analysis_result;
    let status = ReviewStatus::from_flag(analysis.requires_human_review);
    let mut clicked = false;
    ui.horizontal(|ui| {
        let arrow = if expanded { "▼" } else { "▶" };
        let title = RichText::new(format!("{arrow} {}", item.process_label)).strong();
        clicked = ui.add(egui::Button::new(title).frame(false)).clicked();
        ui.label(RichText::new(&item.created_at).weak());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            widgets::badge(
                ui,
                &format!("{} confidence", format_confidence(analysis.confidence_scores.overall)),
                INFO_BLUE,
            );
            widgets::badge(ui, status.label(), widgets::review_color(status));
        });
    });
    clicked
}

fn draw_raw_json(ui: &mut Ui, item: &ProcessResultItem) {
    ui.collapsing("Raw Data", |ui| match serde_json::to_string_pretty(item) {
        Ok(json) => {
            let theme = egui_extras::syntax_highlighting::CodeTheme::from_memory(ui.ctx(), ui.style());
            egui_extras::syntax_highlighting::code_view_ui(ui, &theme, &json, "json");
        }
        Err(e) => {
            ui.colored_label(egui::Color32::RED, e.to_string());
        }
    });
}
