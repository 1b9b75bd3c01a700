use crate::analysis::content::ContentTab;
use crate::controller::accordion::SectionState;
use crate::error::AppError;
use crate::model::ProcessedEmail;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboxQuery {
    pub limit: u32,
    pub offset: u32,
    pub seq: u64,
}

/// Already analysed emails from `GET /mails`. This is the only view that
/// surfaces fetch failures with a retry.
#[derive(Debug, Clone, Default)]
pub struct InboxController {
    pub emails: Vec<ProcessedEmail>,
    pub loading: bool,
    pub error: Option<String>,
    selected: Option<usize>,
    tab: ContentTab,
    pub sections: SectionState,
    seq: u64,
}

impl InboxController {
    pub fn request(&mut self, limit: u32) -> InboxQuery {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        InboxQuery {
            limit,
            offset: 0,
            seq: self.seq,
        }
    }

    pub fn apply(&mut self, seq: u64, result: Result<Vec<ProcessedEmail>, AppError>) -> bool {
        if seq != self.seq {
            debug!("Dropping stale inbox response {} (latest {})", seq, self.seq);
            return false;
        }
        self.loading = false;
        self.selected = None;
        match result {
            Ok(emails) => self.emails = emails,
            Err(e) => {
                warn!("Failed to fetch processed emails: {}", e);
                self.emails = Vec::new();
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Translated records open on the translated tab.
    pub fn select(&mut self, index: usize) {
        let Some(email) = self.emails.get(index) else {
            return;
        };
        self.tab = if email.translated {
            ContentTab::Translated
        } else {
            ContentTab::Original
        };
        self.sections = SectionState::seeded(&email.analysis_result);
        self.selected = Some(index);
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ProcessedEmail> {
        self.selected.and_then(|i| self.emails.get(i))
    }

    pub fn tab(&self) -> ContentTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ContentTab) {
        if self.selected.is_some() {
            self.tab = tab;
        }
    }
}
