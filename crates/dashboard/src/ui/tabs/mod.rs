//! Tab-specific UI modules.

mod scenario;
mod summary;

pub use scenario::draw_scenario_tab;
pub use summary::draw_summary_tab;
