pub mod analysis;
pub mod detail;
pub mod inbox;
pub mod queue;
pub mod sidebar;
pub mod widgets;
