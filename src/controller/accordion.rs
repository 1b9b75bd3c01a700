use crate::analysis::content::ContentTab;
use crate::model::AnalysisResult;
use std::collections::HashMap;

/// Which result in a list is expanded, and which content tab each one shows.
///
/// At most one item is expanded at a time. Opening an item always puts it back
/// on the original tab and reseeds its section state.
#[derive(Debug, Clone, Default)]
pub struct AccordionState {
    expanded: Option<usize>,
    tabs: HashMap<usize, ContentTab>,
    sections: HashMap<usize, SectionState>,
}

impl AccordionState {
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    pub fn toggle(&mut self, index: usize, analysis: &AnalysisResult) {
        if self.expanded == Some(index) {
            self.expanded = None;
        } else {
            self.expanded = Some(index);
            self.tabs.insert(index, ContentTab::Original);
            self.sections.insert(index, SectionState::seeded(analysis));
        }
    }

    /// Ignored unless `index` is the expanded item.
    pub fn set_tab(&mut self, index: usize, tab: ContentTab) -> bool {
        if self.expanded != Some(index) {
            return false;
        }
        self.tabs.insert(index, tab);
        true
    }

    pub fn active_tab(&self, index: usize) -> ContentTab {
        self.tabs.get(&index).copied().unwrap_or_default()
    }

    pub fn sections_mut(&mut self, index: usize) -> Option<&mut SectionState> {
        self.sections.get_mut(&index)
    }

    pub fn reset(&mut self) {
        self.expanded = None;
        self.tabs.clear();
        self.sections.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Summary,
    Classification,
    RecommendedAction,
    StructuredData,
    ActionItems,
    ConfidenceScores,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Summary,
        Section::Classification,
        Section::RecommendedAction,
        Section::StructuredData,
        Section::ActionItems,
        Section::ConfidenceScores,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "Summary",
            Section::Classification => "Classification",
            Section::RecommendedAction => "Recommended Action",
            Section::StructuredData => "Structured Data",
            Section::ActionItems => "Action Items",
            Section::ConfidenceScores => "Confidence Scores",
        }
    }
}

/// Open/closed flags of the collapsible analysis sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionState {
    open: HashMap<Section, bool>,
}

impl SectionState {
    /// Action items start open when there are any.
    pub fn seeded(analysis: &AnalysisResult) -> Self {
        let mut state = Self::default();
        state
            .open
            .insert(Section::ActionItems, !analysis.action_items.is_empty());
        state
    }

    pub fn is_open(&self, section: Section) -> bool {
        self.open.get(&section).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, section: Section) {
        let open = self.open.entry(section).or_insert(false);
        *open = !*open;
    }
}
