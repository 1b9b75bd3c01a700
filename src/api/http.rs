use super::EmailService;
use crate::controller::listing::PageQuery;
use crate::error::AppError;
use crate::model::{Email, EmailPageResponse, MailsResponse, ProcessResult, ProcessedEmail, ReqId};
use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpEmailService {
    client: Client,
    base_url: Url,
}

impl HttpEmailService {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Config(format!("{}: not a base url", self.base_url)))?
            .pop_if_empty()
            .push(path);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

/// Accepts only absolute http(s) URLs.
pub fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim()).map_err(|e| AppError::Config(format!("{raw}: {e}")))?;
    if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() {
        Ok(url)
    } else {
        Err(AppError::Config(format!(
            "{raw}: unsupported scheme {}",
            url.scheme()
        )))
    }
}

pub fn page_query_pairs(query: &PageQuery) -> Vec<(&'static str, String)> {
    vec![
        ("page", query.page.to_string()),
        ("size", query.size.to_string()),
        ("orderby", query.order_by.clone()),
        ("orderdir", query.order_dir.as_flag().to_string()),
    ]
}

impl EmailService for HttpEmailService {
    fn list_emails<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<Vec<Email>, AppError>> {
        async move {
            let url = self.endpoint("emails", &page_query_pairs(query))?;
            let page: EmailPageResponse = self.get_json(url).await?;
            Ok(page.into_emails())
        }
        .boxed()
    }

    fn list_processed(
        &self,
        limit: u32,
        offset: u32,
    ) -> BoxFuture<'_, Result<Vec<ProcessedEmail>, AppError>> {
        async move {
            let url = self.endpoint(
                "mails",
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )?;
            let mails: MailsResponse = self.get_json(url).await?;
            Ok(mails.into_emails())
        }
        .boxed()
    }

    fn existing_results<'a>(
        &'a self,
        req_id: &'a ReqId,
    ) -> BoxFuture<'a, Result<ProcessResult, AppError>> {
        async move {
            let url = self.endpoint("email-by-reqid", &[("req_id", req_id.to_string())])?;
            self.get_json(url).await
        }
        .boxed()
    }

    fn ingest<'a>(&'a self, req_id: &'a ReqId) -> BoxFuture<'a, Result<(), AppError>> {
        async move {
            let url = self.endpoint("ingest-email", &[("reqid", req_id.to_string())])?;
            debug!("GET {}", url);
            let response = self.client.get(url).send().await?.error_for_status()?;
            // body is not used, drain it so the connection can be reused
            let _ = response.bytes().await?;
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::listing::SortDirection;

    #[test]
    fn endpoints_join_onto_base_url() {
        let service = HttpEmailService::new("http://localhost:3000").unwrap();
        let url = service
            .endpoint("email-by-reqid", &[("req_id", "R 1".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/email-by-reqid?req_id=R+1");

        let service = HttpEmailService::new("https://api.example.com/v1/").unwrap();
        let url = service
            .endpoint("ingest-email", &[("reqid", "R-2".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/ingest-email?reqid=R-2");
    }

    #[test]
    fn page_query_matches_listing_contract() {
        let service = HttpEmailService::new("http://localhost:3000").unwrap();
        let query = PageQuery {
            page: 2,
            size: 5,
            order_by: "CreatedDateTime".to_string(),
            order_dir: SortDirection::Descending,
            seq: 4,
        };
        let url = service.endpoint("emails", &page_query_pairs(&query)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/emails?page=2&size=5&orderby=CreatedDateTime&orderdir=1"
        );
    }

    /// Answers a single request on a loopback port with a canned response.
    async fn serve_once(status: &'static str, body: &'static str) -> HttpEmailService {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        HttpEmailService {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url: parse_base_url(&format!("http://{addr}")).unwrap(),
        }
    }

    #[tokio::test]
    async fn decodes_json_response_body() {
        let service = serve_once("200 OK", r#"{"data": {"Data": [{"RecId": "R-9", "Subject": "Invoice"}]}}"#).await;
        let query = PageQuery {
            page: 1,
            size: 5,
            order_by: "CreatedDateTime".to_string(),
            order_dir: SortDirection::Descending,
            seq: 1,
        };
        let emails = service.list_emails(&query).await.unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].rec_id.as_str(), "R-9");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let service = serve_once("200 OK", "{ not json").await;
        let result = service.existing_results(&ReqId::from("R-1")).await;
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let service = serve_once("503 Service Unavailable", "{}").await;
        let result = service.list_processed(10, 0).await;
        assert!(matches!(result, Err(AppError::Status(503))));
    }

    #[test]
    fn rejects_non_http_base_urls() {
        assert!(matches!(parse_base_url("ftp://host"), Err(AppError::Config(_))));
        assert!(matches!(parse_base_url("localhost:3000"), Err(AppError::Config(_))));
        assert!(parse_base_url(" https://host ").is_ok());
    }
}
