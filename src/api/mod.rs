pub mod http;

use crate::controller::listing::PageQuery;
use crate::error::AppError;
use crate::model::{Email, ProcessResult, ProcessedEmail, ReqId};
use futures::future::BoxFuture;

pub use http::HttpEmailService;

/// The remote email store and analysis service.
pub trait EmailService: Send + Sync {
    /// `GET /emails` for one page of the queue.
    fn list_emails<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<Vec<Email>, AppError>>;

    /// `GET /mails` for already analysed emails.
    fn list_processed(&self, limit: u32, offset: u32)
        -> BoxFuture<'_, Result<Vec<ProcessedEmail>, AppError>>;

    /// `GET /email-by-reqid` for every stored analysis run of an email.
    fn existing_results<'a>(&'a self, req_id: &'a ReqId)
        -> BoxFuture<'a, Result<ProcessResult, AppError>>;

    /// `GET /ingest-email`. Only the side effect matters.
    fn ingest<'a>(&'a self, req_id: &'a ReqId) -> BoxFuture<'a, Result<(), AppError>>;
}
