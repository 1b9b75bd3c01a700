use crate::app::send;
use crate::bridge::UiCommand;
use crate::controller::listing::{ListColumn, SortDirection};
use crate::model::Email;
use crate::state::AppState;
use egui::Ui;
use tokio::sync::mpsc::UnboundedSender;

pub fn draw_queue(ui: &mut Ui, state: &mut AppState, cmd_tx: &UnboundedSender<UiCommand>) {
    ui.heading("Email Queue");
    ui.add_space(4.0);

    if state.listing.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading emails...");
        });
    }

    let mut sort_clicked = None;
    let mut opened: Option<Email> = None;

    egui_extras::TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(egui_extras::Column::initial(120.0))
        .column(egui_extras::Column::remainder().at_least(200.0))
        .column(egui_extras::Column::initial(180.0))
        .column(egui_extras::Column::initial(160.0))
        .column(egui_extras::Column::initial(80.0))
        .header(22.0, |mut header| {
            for column in ListColumn::ALL {
                header.col(|ui| {
                    let mut title = column.header().to_string();
                    if state.listing.is_sorted_by(column) {
                        title.push_str(match state.listing.order_dir {
                            SortDirection::Ascending => " ↑",
                            SortDirection::Descending => " ↓",
                        });
                    }
                    if ui
                        .add(egui::Button::new(egui::RichText::new(title).strong()).frame(false))
                        .clicked()
                    {
                        sort_clicked = Some(column);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(22.0, state.listing.emails.len(), |mut row| {
                let idx = row.index();
                if let Some(email) = state.listing.emails.get(idx) {
                    row.col(|ui| {
                        ui.monospace(email.rec_id.as_str());
                    });
                    row.col(|ui| {
                        ui.label(email.display_subject());
                    });
                    row.col(|ui| {
                        ui.label(&email.from);
                    });
                    row.col(|ui| {
                        ui.label(&email.created_date_time);
                    });
                    row.col(|ui| {
                        if ui.button("Open").clicked() {
                            opened = Some(email.clone());
                        }
                    });
                }
            });
        });

    if state.listing.emails.is_empty() && !state.listing.loading {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.label("No emails found");
        });
    }

    ui.add_space(8.0);
    let mut page_change = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(state.listing.can_go_back(), egui::Button::new("← Previous"))
            .clicked()
        {
            page_change = Some(false);
        }
        ui.label(format!("Page {}", state.listing.page));
        if ui.button("Next →").clicked() {
            page_change = Some(true);
        }
    });

    if let Some(column) = sort_clicked {
        let query = state.listing.sort_by(column);
        send(cmd_tx, state, UiCommand::FetchPage(query));
    }

    match page_change {
        Some(true) => {
            let query = state.listing.next_page();
            send(cmd_tx, state, UiCommand::FetchPage(query));
        }
        Some(false) => {
            if let Some(query) = state.listing.previous_page() {
                send(cmd_tx, state, UiCommand::FetchPage(query));
            }
        }
        None => {}
    }

    if let Some(email) = opened {
        let request = state.detail.open(email);
        send(cmd_tx, state, UiCommand::FetchResults(request));
    }
}
