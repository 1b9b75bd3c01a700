pub mod accordion;
pub mod detail;
pub mod inbox;
pub mod listing;
