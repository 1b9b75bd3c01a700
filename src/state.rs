use crate::config::DashboardConfig;
use crate::controller::detail::DetailController;
use crate::controller::inbox::InboxController;
use crate::controller::listing::ListController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Queue,
    Processed,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::Queue => "Email Queue",
            View::Processed => "Processed Emails",
        }
    }
}

/// All view state. Owned by the app and handed to the drawing code by
/// reference; nothing else holds on to it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub base_url: String,
    pub mails_limit: u32,

    pub listing: ListController,
    pub detail: DetailController,
    pub inbox: InboxController,

    // Set when the worker could not be reached at all
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            view: View::Queue,
            base_url: config.base_url.clone(),
            mails_limit: config.mails_limit,
            listing: ListController::default(),
            detail: DetailController::default(),
            inbox: InboxController::default(),
            error_message: None,
        }
    }
}
