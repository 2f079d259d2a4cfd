pub mod dashboard;
pub mod stats_sidebar;
pub mod typing_area;
