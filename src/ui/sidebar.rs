use crate::app::send;
use crate::bridge::UiCommand;
use crate::controller::listing::PAGE_SIZE;
use crate::state::{AppState, View};
use egui::Ui;
use tokio::sync::mpsc::UnboundedSender;

pub fn draw_sidebar(ui: &mut Ui, state: &mut AppState, cmd_tx: &UnboundedSender<UiCommand>) {
    ui.heading("Mail Insight");
    ui.add_space(4.0);

    ui.label("Service");
    ui.monospace(&state.base_url);

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    let previous = state.view;
    for view in [View::Queue, View::Processed] {
        ui.radio_value(&mut state.view, view, view.label());
    }
    if state.view != previous && state.view == View::Processed {
        let query = state.inbox.request(state.mails_limit);
        send(cmd_tx, state, UiCommand::FetchProcessed(query));
    }

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    match state.view {
        View::Queue => {
            ui.label(format!("Page {} ({} per page)", state.listing.page, PAGE_SIZE));
            if ui
                .add_enabled(!state.listing.loading, egui::Button::new("Refresh"))
                .clicked()
            {
                let query = state.listing.refresh();
                send(cmd_tx, state, UiCommand::FetchPage(query));
            }
        }
        View::Processed => {
            ui.label(format!("Latest {} processed emails", state.mails_limit));
            if ui
                .add_enabled(!state.inbox.loading, egui::Button::new("Refresh"))
                .clicked()
            {
                let query = state.inbox.request(state.mails_limit);
                send(cmd_tx, state, UiCommand::FetchProcessed(query));
            }
        }
    }

    if state.detail.processing() {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Processing email...");
        });
    }
}
