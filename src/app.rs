use crate::api::EmailService;
use crate::bridge::{BackgroundEvent, UiCommand};
use crate::config::DashboardConfig;
use crate::error::AppError;
use crate::state::{AppState, View};
use crate::ui::{detail, inbox, queue, sidebar};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug)]
pub struct MailInsightApp {
    state: AppState,
    cmd_tx: UnboundedSender<UiCommand>,
    event_rx: std::sync::mpsc::Receiver<BackgroundEvent>,
}

impl MailInsightApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &DashboardConfig,
        service: Arc<dyn EmailService>,
    ) -> Result<Self, AppError> {
        let bridge = crate::bridge::setup_bridge(cc.egui_ctx.clone(), service)?;
        let mut state = AppState::new(config);

        // first page is fetched on startup, like any other listing change
        let query = state.listing.refresh();
        send(&bridge.cmd_tx, &mut state, UiCommand::FetchPage(query));

        Ok(Self {
            state,
            cmd_tx: bridge.cmd_tx,
            event_rx: bridge.event_rx,
        })
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            apply_event(&mut self.state, event);
            ctx.request_repaint();
        }
    }
}

pub fn apply_event(state: &mut AppState, event: BackgroundEvent) {
    match event {
        BackgroundEvent::PageLoaded { seq, result } => {
            state.listing.apply(seq, result);
        }
        BackgroundEvent::ResultsLoaded { request, result } => {
            state.detail.on_results_loaded(&request, result);
        }
        BackgroundEvent::ProcessFinished { request, outcome } => {
            state.detail.on_process_finished(&request, outcome);
        }
        BackgroundEvent::ProcessedLoaded { seq, result } => {
            state.inbox.apply(seq, result);
        }
    }
}

/// Sends a command to the worker. A closed channel means the worker is gone.
pub fn send(cmd_tx: &UnboundedSender<UiCommand>, state: &mut AppState, cmd: UiCommand) {
    if let Err(e) = cmd_tx.send(cmd) {
        tracing::error!("Background worker unavailable: {}", e);
        state.error_message = Some("Background worker stopped; restart the dashboard.".to_string());
    }
}

impl eframe::App for MailInsightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                sidebar::draw_sidebar(ui, &mut self.state, &self.cmd_tx);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.state.error_message {
                ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
                ui.add_space(4.0);
            }

            egui::ScrollArea::vertical().show(ui, |ui| match self.state.view {
                View::Queue if self.state.detail.selected().is_some() => {
                    detail::draw_detail(ui, &mut self.state, &self.cmd_tx);
                }
                View::Queue => queue::draw_queue(ui, &mut self.state, &self.cmd_tx),
                View::Processed => inbox::draw_inbox(ui, &mut self.state, &self.cmd_tx),
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::handle_command;
    use crate::test_support::{process_item, queue_email, FakeService};

    fn state() -> AppState {
        AppState::new(&DashboardConfig::default())
    }

    #[tokio::test]
    async fn select_process_and_render_round_trip() {
        let service = FakeService::default();
        service.queue_run(process_item(4, "reprocess", "t2"));
        let mut state = state();

        let request = state.detail.open(queue_email("R-1", "Billing"));
        let event = handle_command(&service, UiCommand::FetchResults(request)).await;
        apply_event(&mut state, event);
        assert!(state.detail.results().is_empty());

        let request = state.detail.begin_process().unwrap();
        let event = handle_command(&service, UiCommand::ProcessEmail(request)).await;
        apply_event(&mut state, event);

        assert!(!state.detail.processing());
        assert_eq!(state.detail.results().len(), 1);
    }

    #[test]
    fn closed_worker_channel_sets_error() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let mut state = state();
        let query = state.listing.refresh();
        send(&tx, &mut state, UiCommand::FetchPage(query));
        assert!(state.error_message.is_some());
    }
}
