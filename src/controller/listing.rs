use crate::error::AppError;
use crate::model::Email;
use tracing::{debug, warn};

pub const PAGE_SIZE: u32 = 5;
pub const DATE_COLUMN: &str = "CreatedDateTime";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Wire flag: 0 ascending, 1 descending.
    pub fn as_flag(self) -> u8 {
        match self {
            SortDirection::Ascending => 0,
            SortDirection::Descending => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Header columns of the queue table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListColumn {
    RecId,
    Subject,
    From,
    Date,
    Actions,
}

impl ListColumn {
    pub const ALL: [ListColumn; 5] = [
        ListColumn::RecId,
        ListColumn::Subject,
        ListColumn::From,
        ListColumn::Date,
        ListColumn::Actions,
    ];

    pub fn header(self) -> &'static str {
        match self {
            ListColumn::RecId => "RecId",
            ListColumn::Subject => "Subject",
            ListColumn::From => "From",
            ListColumn::Date => "Date",
            ListColumn::Actions => "Actions",
        }
    }

    /// Server-side column this header sorts by. `Actions` is not a field and
    /// aliases the creation date.
    pub fn sort_key(self) -> &'static str {
        match self {
            ListColumn::RecId => "RecId",
            ListColumn::Subject => "Subject",
            ListColumn::From => "From",
            ListColumn::Date | ListColumn::Actions => DATE_COLUMN,
        }
    }
}

/// Parameters of one `GET /emails` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub order_by: String,
    pub order_dir: SortDirection,
    pub seq: u64,
}

/// Pagination and sort state of the queue. Every change hands back exactly one
/// [`PageQuery`] to fetch.
#[derive(Debug, Clone)]
pub struct ListController {
    pub page: u32,
    pub order_by: String,
    pub order_dir: SortDirection,
    pub emails: Vec<Email>,
    pub loading: bool,
    seq: u64,
}

impl Default for ListController {
    fn default() -> Self {
        Self {
            page: 1,
            order_by: DATE_COLUMN.to_string(),
            order_dir: SortDirection::Ascending,
            emails: Vec::new(),
            loading: false,
            seq: 0,
        }
    }
}

impl ListController {
    pub fn refresh(&mut self) -> PageQuery {
        self.seq += 1;
        self.loading = true;
        PageQuery {
            page: self.page,
            size: PAGE_SIZE,
            order_by: self.order_by.clone(),
            order_dir: self.order_dir,
            seq: self.seq,
        }
    }

    /// Same column flips direction; a new column starts ascending.
    pub fn sort_by(&mut self, column: ListColumn) -> PageQuery {
        let key = column.sort_key();
        if self.order_by == key {
            self.order_dir = self.order_dir.flipped();
        } else {
            self.order_by = key.to_string();
            self.order_dir = SortDirection::Ascending;
        }
        self.refresh()
    }

    pub fn is_sorted_by(&self, column: ListColumn) -> bool {
        self.order_by == column.sort_key()
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 1
    }

    pub fn next_page(&mut self) -> PageQuery {
        self.page += 1;
        self.refresh()
    }

    pub fn previous_page(&mut self) -> Option<PageQuery> {
        if !self.can_go_back() {
            return None;
        }
        self.page -= 1;
        Some(self.refresh())
    }

    /// Applies a page response. Responses to anything but the latest query are
    /// dropped; a failed fetch empties the page.
    pub fn apply(&mut self, seq: u64, result: Result<Vec<Email>, AppError>) -> bool {
        if seq != self.seq {
            debug!("Dropping stale page response {} (latest {})", seq, self.seq);
            return false;
        }
        self.loading = false;
        self.emails = match result {
            Ok(emails) => emails,
            Err(e) => {
                warn!("Failed to fetch emails: {}", e);
                Vec::new()
            }
        };
        true
    }
}
