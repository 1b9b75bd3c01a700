use crate::api::EmailService;
use crate::controller::listing::PageQuery;
use crate::error::AppError;
use crate::model::{Email, ProcessResult, ProcessResultItem, ProcessedEmail, ReqId};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};
use std::sync::Mutex;

pub fn analysis_json(actions: &[(&str, f64)]) -> Value {
    let action_items: Vec<Value> = actions
        .iter()
        .map(|(action, confidence)| json!({"action": action, "confidence": confidence}))
        .collect();

    json!({
        "summary": "Customer asks to update billing address",
        "tokenUsage": {"inputTokens": 410, "outputTokens": 95, "totalTokens": 505},
        "action_items": action_items,
        "classification": {
            "category": "account_management",
            "priority": "High",
            "sentiment": "neutral",
            "confidence": 0.92
        },
        "structured_data": {
            "location": {"value": "NY", "confidence": 0.8},
            "confidence": {"value": null, "confidence": 0.5}
        },
        "action_reasoning": "Billing change requests route to accounts",
        "next_best_action": "Forward to accounts team",
        "action_confidence": 0.74,
        "confidence_scores": {
            "overall": 0.88,
            "action_items": 0.7,
            "classification": 0.92,
            "structured_data": 0.65
        },
        "processing_time_ms": 1840,
        "requires_human_review": false
    })
}

pub fn process_item(id: i64, label: &str, created_at: &str) -> ProcessResultItem {
    serde_json::from_value(json!({
        "id": id,
        "req_id": "R-1",
        "process_label": label,
        "pretext": "",
        "core": "Please update my billing address.",
        "posttext": "",
        "clean_text": "Please update my billing address.",
        "original_email": {"subject": "Adresse", "body": "Bitte aktualisieren"},
        "translated_content": {"subject": "Address", "body": "Please update"},
        "analysis_result": analysis_json(&[("Update address", 0.9)]),
        "created_at": created_at
    }))
    .expect("fixture decodes")
}

pub fn envelope(success: bool, data: Vec<ProcessResultItem>) -> ProcessResult {
    ProcessResult { success, data }
}

pub fn queue_email(rec_id: &str, subject: &str) -> Email {
    serde_json::from_value(json!({
        "RecId": rec_id,
        "Subject": subject,
        "Body": "body",
        "CreatedDateTime": "2024-05-01T10:00:00Z",
        "From": "sender@example.com",
        "To": "support@example.com",
        "ToRecipients": "support@example.com"
    }))
    .expect("fixture decodes")
}

pub fn processed_email(id: i64, translated: bool) -> ProcessedEmail {
    serde_json::from_value(json!({
        "id": id,
        "req_id": format!("R-{id}"),
        "translated": translated,
        "original_email": {"subject": "Adresse", "body": "Bitte aktualisieren"},
        "translated_content": if translated {
            json!({"subject": "Address", "body": "Please update"})
        } else {
            Value::Null
        },
        "created_at": "2024-05-01T10:00:00Z",
        "analysis_result": analysis_json(&[]),
        "summary": "Customer asks to update billing address",
        "requires_human_review": false,
        "review_reason": null,
        "processing_time_ms": 1840
    }))
    .expect("fixture decodes")
}

/// In-memory stand-in for the remote service.
#[derive(Debug, Default)]
pub struct FakeService {
    ingest_status: Option<u16>,
    stored: Mutex<Vec<ProcessResultItem>>,
    pending: Mutex<Vec<ProcessResultItem>>,
    calls: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn failing_ingest(status: u16) -> Self {
        Self {
            ingest_status: Some(status),
            ..Self::default()
        }
    }

    /// Stored once the next ingestion succeeds.
    pub fn queue_run(&self, item: ProcessResultItem) {
        self.pending.lock().unwrap().push(item);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl EmailService for FakeService {
    fn list_emails<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<Vec<Email>, AppError>> {
        async move {
            self.record(format!("emails page={}", query.page));
            Ok(vec![queue_email(&format!("R-{}", query.page), "queued")])
        }
        .boxed()
    }

    fn list_processed(
        &self,
        limit: u32,
        offset: u32,
    ) -> BoxFuture<'_, Result<Vec<ProcessedEmail>, AppError>> {
        async move {
            self.record(format!("mails limit={limit} offset={offset}"));
            Ok(vec![processed_email(1, true)])
        }
        .boxed()
    }

    fn existing_results<'a>(
        &'a self,
        req_id: &'a ReqId,
    ) -> BoxFuture<'a, Result<ProcessResult, AppError>> {
        async move {
            self.record(format!("existing {req_id}"));
            Ok(envelope(true, self.stored.lock().unwrap().clone()))
        }
        .boxed()
    }

    fn ingest<'a>(&'a self, req_id: &'a ReqId) -> BoxFuture<'a, Result<(), AppError>> {
        async move {
            self.record(format!("ingest {req_id}"));
            if let Some(status) = self.ingest_status {
                return Err(AppError::Status(status));
            }
            let mut pending = self.pending.lock().unwrap();
            self.stored.lock().unwrap().append(&mut pending);
            Ok(())
        }
        .boxed()
    }
}
