use crate::analysis::reconcile::reconcile;
use crate::api::EmailService;
use crate::controller::accordion::AccordionState;
use crate::error::AppError;
use crate::model::{Email, ProcessResult, ProcessResultItem, ReqId};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsPhase {
    Idle,
    Fetching,
    Ready,
}

/// A fetch of stored results, tagged so late answers can be recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsRequest {
    pub req_id: ReqId,
    pub seq: u64,
}

#[derive(Debug)]
pub struct ProcessOutcome {
    pub ingest: Result<(), AppError>,
    /// Only present when ingestion succeeded.
    pub refreshed: Option<Result<ProcessResult, AppError>>,
}

/// Triggers ingestion and, if it went through, re-reads the stored results.
pub async fn run_process(service: &dyn EmailService, req_id: &ReqId) -> ProcessOutcome {
    match service.ingest(req_id).await {
        Ok(()) => {
            info!("Ingestion accepted for {}", req_id);
            ProcessOutcome {
                ingest: Ok(()),
                refreshed: Some(service.existing_results(req_id).await),
            }
        }
        Err(e) => {
            error!("Failed to process email {}: {}", req_id, e);
            ProcessOutcome {
                ingest: Err(e),
                refreshed: None,
            }
        }
    }
}

/// State of the detail view for the selected queue email.
#[derive(Debug, Clone)]
pub struct DetailController {
    selected: Option<Email>,
    phase: ResultsPhase,
    existing: Option<ProcessResult>,
    process_result: Option<ProcessResult>,
    processing: bool,
    pub accordion: AccordionState,
    seq: u64,
}

impl Default for DetailController {
    fn default() -> Self {
        Self {
            selected: None,
            phase: ResultsPhase::Idle,
            existing: None,
            process_result: None,
            processing: false,
            accordion: AccordionState::default(),
            seq: 0,
        }
    }
}

impl DetailController {
    pub fn selected(&self) -> Option<&Email> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> ResultsPhase {
        self.phase
    }

    pub fn processing(&self) -> bool {
        self.processing
    }

    pub fn existing(&self) -> Option<&ProcessResult> {
        self.existing.as_ref()
    }

    /// Set to `{success: false, data: []}` when the last ingestion failed.
    pub fn process_result(&self) -> Option<&ProcessResult> {
        self.process_result.as_ref()
    }

    pub fn results(&self) -> Vec<&ProcessResultItem> {
        reconcile(self.existing.as_ref())
    }

    /// Reconciled results alongside the accordion that governs them.
    pub fn results_and_accordion(&mut self) -> (Vec<&ProcessResultItem>, &mut AccordionState) {
        (reconcile(self.existing.as_ref()), &mut self.accordion)
    }

    fn next_request(&mut self, req_id: ReqId) -> ResultsRequest {
        self.seq += 1;
        ResultsRequest {
            req_id,
            seq: self.seq,
        }
    }

    /// Selecting an email drops everything known about the previous one.
    pub fn open(&mut self, email: Email) -> ResultsRequest {
        let req_id = email.rec_id.clone();
        self.selected = Some(email);
        self.existing = None;
        self.process_result = None;
        self.accordion.reset();
        self.phase = ResultsPhase::Fetching;
        self.next_request(req_id)
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.existing = None;
        self.process_result = None;
        self.accordion.reset();
        self.phase = ResultsPhase::Idle;
    }

    /// Rejected while a run is already in flight or nothing is selected.
    /// A run does not invalidate the results fetch that may still be pending.
    pub fn begin_process(&mut self) -> Option<ResultsRequest> {
        if self.processing {
            return None;
        }
        let req_id = self.selected.as_ref()?.rec_id.clone();
        self.processing = true;
        self.process_result = None;
        Some(ResultsRequest {
            req_id,
            seq: self.seq,
        })
    }

    fn is_selected(&self, req_id: &ReqId) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|email| &email.rec_id == req_id)
    }

    fn is_current(&self, request: &ResultsRequest) -> bool {
        request.seq == self.seq && self.is_selected(&request.req_id)
    }

    pub fn on_results_loaded(
        &mut self,
        request: &ResultsRequest,
        result: Result<ProcessResult, AppError>,
    ) -> bool {
        if !self.is_current(request) {
            debug!("Dropping stale results for {} ({})", request.req_id, request.seq);
            return false;
        }
        self.existing = Some(match result {
            Ok(results) => results,
            Err(e) => {
                warn!("Failed to fetch existing results for {}: {}", request.req_id, e);
                ProcessResult::failed()
            }
        });
        self.phase = ResultsPhase::Ready;
        true
    }

    /// Loaded results are never replaced by a failure; a failed run only
    /// sets the failure marker.
    pub fn on_process_finished(&mut self, request: &ResultsRequest, outcome: ProcessOutcome) {
        self.processing = false;
        if !self.is_selected(&request.req_id) {
            debug!("Dropping process outcome for {}", request.req_id);
            return;
        }
        match outcome {
            ProcessOutcome {
                ingest: Ok(()),
                refreshed: Some(Ok(results)),
            } => {
                // supersedes any results fetch still in flight
                self.seq += 1;
                self.existing = Some(results);
                self.phase = ResultsPhase::Ready;
            }
            ProcessOutcome {
                ingest: Ok(()),
                refreshed: Some(Err(e)),
            } => {
                warn!("Failed to refresh results for {}: {}", request.req_id, e);
                self.process_result = Some(ProcessResult::failed());
            }
            ProcessOutcome {
                ingest: Ok(()),
                refreshed: None,
            } => {}
            ProcessOutcome { ingest: Err(_), .. } => {
                self.process_result = Some(ProcessResult::failed());
            }
        }
    }

    pub fn toggle_result(&mut self, index: usize) {
        let results = reconcile(self.existing.as_ref());
        if let Some(item) = results.get(index) {
            self.accordion.toggle(index, &item.analysis_result);
        }
    }
}
