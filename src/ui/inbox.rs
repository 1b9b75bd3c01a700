use crate::app::send;
use crate::bridge::UiCommand;
use crate::model::ProcessedEmail;
use crate::state::AppState;
use crate::ui::{analysis, widgets};
use egui::{RichText, Ui};
use tokio::sync::mpsc::UnboundedSender;

pub fn draw_inbox(ui: &mut Ui, state: &mut AppState, cmd_tx: &UnboundedSender<UiCommand>) {
    ui.heading("Processed Emails");
    ui.add_space(4.0);

    if let Some(err) = state.inbox.error.clone() {
        ui.colored_label(egui::Color32::RED, format!("Failed to load emails: {}", err));
        if ui.button("Retry").clicked() {
            let query = state.inbox.request(state.mails_limit);
            send(cmd_tx, state, UiCommand::FetchProcessed(query));
        }
        return;
    }

    if state.inbox.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading emails...");
        });
        return;
    }

    if state.inbox.emails.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No processed emails yet.");
        });
        return;
    }

    let mut clicked = None;
    let mut tab_change = None;
    let inbox = &mut state.inbox;

    ui.columns(2, |columns| {
        egui::ScrollArea::vertical()
            .id_salt("processed_list")
            .show(&mut columns[0], |ui| {
                for (index, email) in inbox.emails.iter().enumerate() {
                    let selected = inbox.selected_index() == Some(index);
                    if draw_row(ui, email, selected) {
                        clicked = Some(index);
                    }
                }
            });

        if let Some(index) = inbox.selected_index() {
            let tab = inbox.tab();
            if let Some(email) = inbox.emails.get(index) {
                let ui = &mut columns[1];
                tab_change = analysis::draw_content(
                    ui,
                    &email.original_email,
                    email.translated_content.as_ref(),
                    tab,
                );
                if let Some(reason) = &email.review_reason {
                    ui.colored_label(egui::Color32::YELLOW, format!("Review: {reason}"));
                }
                ui.add_space(8.0);
                analysis::draw_analysis(ui, &email.analysis_result, &mut inbox.sections);
            }
        } else {
            columns[1].label("Select an email to see its analysis.");
        }
    });

    if let Some(index) = clicked {
        inbox.select(index);
    }
    if let Some(tab) = tab_change {
        inbox.set_tab(tab);
    }
}

/// One list card. Returns true when clicked.
fn draw_row(ui: &mut Ui, email: &ProcessedEmail, selected: bool) -> bool {
    let classification = &email.analysis_result.classification;
    let fill = if selected {
        ui.visuals().selection.bg_fill.gamma_multiply(0.3)
    } else {
        ui.visuals().faint_bg_color
    };

    let response = egui::Frame::default()
        .inner_margin(8.0)
        .corner_radius(4.0)
        .fill(fill)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&email.original_email.subject);
                widgets::badge(
                    ui,
                    &classification.priority,
                    widgets::priority_color(&classification.priority),
                );
            });
            ui.horizontal(|ui| {
                widgets::badge(
                    ui,
                    &classification.category,
                    widgets::category_color(&classification.category),
                );
                widgets::badge(
                    ui,
                    &classification.sentiment,
                    widgets::sentiment_color(&classification.sentiment),
                );
            });
            ui.label(RichText::new(&email.analysis_result.summary).small());
            ui.horizontal(|ui| {
                let overall = email.analysis_result.confidence_scores.overall;
                widgets::confidence_bar(ui, overall, 80.0, true);
                ui.label(RichText::new(&email.created_at).small().weak());
                ui.label(RichText::new(format!("#{}", email.req_id)).small().monospace());
            });
        })
        .response;

    ui.add_space(4.0);
    response.interact(egui::Sense::click()).clicked()
}
