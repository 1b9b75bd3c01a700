use crate::api::EmailService;
use crate::controller::detail::{run_process, ProcessOutcome, ResultsRequest};
use crate::controller::inbox::InboxQuery;
use crate::controller::listing::PageQuery;
use crate::error::AppError;
use crate::model::{Email, ProcessResult, ProcessedEmail};
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::info;

#[derive(Debug)]
pub enum UiCommand {
    FetchPage(PageQuery),
    FetchResults(ResultsRequest),
    ProcessEmail(ResultsRequest),
    FetchProcessed(InboxQuery),
}

#[derive(Debug)]
pub enum BackgroundEvent {
    PageLoaded {
        seq: u64,
        result: Result<Vec<Email>, AppError>,
    },
    ResultsLoaded {
        request: ResultsRequest,
        result: Result<ProcessResult, AppError>,
    },
    ProcessFinished {
        request: ResultsRequest,
        outcome: ProcessOutcome,
    },
    ProcessedLoaded {
        seq: u64,
        result: Result<Vec<ProcessedEmail>, AppError>,
    },
}

#[derive(Debug)]
pub struct BridgeChannels {
    pub cmd_tx: tokio_mpsc::UnboundedSender<UiCommand>,
    pub event_rx: std_mpsc::Receiver<BackgroundEvent>,
}

pub fn setup_bridge(
    ctx: egui::Context,
    service: Arc<dyn EmailService>,
) -> Result<BridgeChannels, AppError> {
    let (cmd_tx, cmd_rx) = tokio_mpsc::unbounded_channel::<UiCommand>();
    let (event_tx, event_rx) = std_mpsc::channel::<BackgroundEvent>();
    let rt = tokio::runtime::Runtime::new()?;

    std::thread::Builder::new()
        .name("mail-insight-worker".to_string())
        .spawn(move || {
            rt.block_on(background_loop(cmd_rx, event_tx, ctx, service));
        })?;

    Ok(BridgeChannels { cmd_tx, event_rx })
}

async fn background_loop(
    mut cmd_rx: tokio_mpsc::UnboundedReceiver<UiCommand>,
    event_tx: std_mpsc::Sender<BackgroundEvent>,
    ctx: egui::Context,
    service: Arc<dyn EmailService>,
) {
    // Commands are not deduplicated or cancelled; every one runs to completion.
    while let Some(cmd) = cmd_rx.recv().await {
        let tx = event_tx.clone();
        let ctx2 = ctx.clone();
        let service = service.clone();
        tokio::spawn(async move {
            let event = handle_command(service.as_ref(), cmd).await;
            if let Err(e) = tx.send(event) {
                tracing::warn!("Failed to send event to UI: {}", e);
            }
            ctx2.request_repaint();
        });
    }
    info!("Command channel closed, worker exiting");
}

pub async fn handle_command(service: &dyn EmailService, cmd: UiCommand) -> BackgroundEvent {
    match cmd {
        UiCommand::FetchPage(query) => BackgroundEvent::PageLoaded {
            seq: query.seq,
            result: service.list_emails(&query).await,
        },
        UiCommand::FetchResults(request) => {
            let result = service.existing_results(&request.req_id).await;
            BackgroundEvent::ResultsLoaded { request, result }
        }
        UiCommand::ProcessEmail(request) => {
            let outcome = run_process(service, &request.req_id).await;
            BackgroundEvent::ProcessFinished { request, outcome }
        }
        UiCommand::FetchProcessed(query) => BackgroundEvent::ProcessedLoaded {
            seq: query.seq,
            result: service.list_processed(query.limit, query.offset).await,
        },
    }
}
