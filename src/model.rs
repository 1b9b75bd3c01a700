//! Canonical schema for everything the remote service hands back.
//!
//! Two read models of an email exist on the wire: the queue [`Email`] keyed by
//! `RecId`, and the already-analysed [`ProcessedEmail`] keyed by a numeric
//! `id`. They describe the same underlying message but are never substituted
//! for one another.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque request identifier. Compared by equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReqId(pub String);

impl ReqId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReqId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Row of the email queue (`GET /emails`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    #[serde(rename = "RecId")]
    pub rec_id: ReqId,
    #[serde(rename = "Subject", default)]
    pub subject: String,
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "CreatedDateTime", default)]
    pub created_date_time: String,
    #[serde(rename = "From", default)]
    pub from: String,
    #[serde(rename = "To", default)]
    pub to: String,
    #[serde(rename = "ToRecipients", default)]
    pub to_recipients: String,
    #[serde(rename = "Comments", default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Email {
    pub fn display_subject(&self) -> &str {
        if self.subject.trim().is_empty() {
            "No Subject"
        } else {
            &self.subject
        }
    }

    /// First two recipients and how many were left out.
    pub fn recipients_preview(&self) -> (String, usize) {
        let all: Vec<&str> = self
            .to_recipients
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        let shown = all.iter().take(2).copied().collect::<Vec<_>>().join(", ");
        (shown, all.len().saturating_sub(2))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailContent {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub priority: String,
    pub sentiment: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub action: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScores {
    pub overall: f64,
    pub action_items: f64,
    pub classification: f64,
    pub structured_data: f64,
}

impl ConfidenceScores {
    pub fn labelled(&self) -> [(&'static str, f64); 4] {
        [
            ("overall", self.overall),
            ("action_items", self.action_items),
            ("classification", self.classification),
            ("structured_data", self.structured_data),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

/// One extracted field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    #[serde(default)]
    pub value: Option<String>,
    pub confidence: f64,
}

/// Key reserved inside `structured_data` for an aggregate score.
pub const RESERVED_CONFIDENCE_KEY: &str = "confidence";

/// `structured_data` with its key order kept as sent.
///
/// The reserved `confidence` sibling is split off on decode so it can never be
/// enumerated as a data field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredData {
    pub fields: Vec<(String, ExtractedField)>,
    pub aggregate: Option<ExtractedField>,
}

impl<'de> Deserialize<'de> for StructuredData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StructuredVisitor;

        impl<'de> Visitor<'de> for StructuredVisitor {
            type Value = StructuredData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field name to {value, confidence}")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(StructuredData::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut data = StructuredData::default();
                while let Some(key) = map.next_key::<String>()? {
                    let field: ExtractedField = map.next_value()?;
                    if key == RESERVED_CONFIDENCE_KEY {
                        data.aggregate = Some(field);
                    } else {
                        data.fields.push((key, field));
                    }
                }
                Ok(data)
            }
        }

        deserializer.deserialize_any(StructuredVisitor)
    }
}

impl Serialize for StructuredData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let len = self.fields.len() + usize::from(self.aggregate.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, field) in &self.fields {
            map.serialize_entry(key, field)?;
        }
        if let Some(aggregate) = &self.aggregate {
            map.serialize_entry(RESERVED_CONFIDENCE_KEY, aggregate)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "tokenUsage", default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    pub classification: Classification,
    #[serde(default)]
    pub structured_data: StructuredData,
    #[serde(default)]
    pub action_reasoning: String,
    #[serde(default)]
    pub next_best_action: String,
    pub action_confidence: f64,
    pub confidence_scores: ConfidenceScores,
    #[serde(default)]
    pub processing_time_ms: f64,
    #[serde(default)]
    pub requires_human_review: bool,
}

/// One analysis run over an email. Logically keyed by `(process_label, created_at)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResultItem {
    pub id: i64,
    pub req_id: ReqId,
    pub process_label: String,
    #[serde(default)]
    pub pretext: String,
    #[serde(default)]
    pub core: String,
    #[serde(default)]
    pub posttext: String,
    #[serde(default)]
    pub clean_text: String,
    pub original_email: EmailContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_content: Option<EmailContent>,
    pub analysis_result: AnalysisResult,
    pub created_at: String,
}

/// Envelope of `GET /email-by-reqid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ProcessResultItem>,
}

impl ProcessResult {
    pub fn failed() -> Self {
        Self {
            success: false,
            data: Vec::new(),
        }
    }
}

/// Row of the processed inbox (`GET /mails`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedEmail {
    pub id: i64,
    pub req_id: ReqId,
    #[serde(default)]
    pub pretext: String,
    #[serde(default)]
    pub core: String,
    #[serde(default)]
    pub posttext: String,
    #[serde(default)]
    pub clean_text: String,
    #[serde(default)]
    pub translated: bool,
    pub original_email: EmailContent,
    #[serde(default)]
    pub translated_content: Option<EmailContent>,
    pub created_at: String,
    pub analysis_result: AnalysisResult,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub requires_human_review: bool,
    #[serde(default)]
    pub review_reason: Option<String>,
    #[serde(default)]
    pub processing_time_ms: f64,
}

/// Envelope of `GET /emails`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailPageResponse {
    pub data: EmailPageData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailPageData {
    #[serde(rename = "Data", default)]
    pub emails: Option<Vec<Email>>,
}

impl EmailPageResponse {
    pub fn into_emails(self) -> Vec<Email> {
        self.data.emails.unwrap_or_default()
    }
}

/// Envelope of `GET /mails`.
#[derive(Debug, Clone, Deserialize)]
pub struct MailsResponse {
    pub success: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub data: Vec<ProcessedEmail>,
}

impl MailsResponse {
    pub fn into_emails(self) -> Vec<ProcessedEmail> {
        if self.success {
            self.data
        } else {
            Vec::new()
        }
    }
}
