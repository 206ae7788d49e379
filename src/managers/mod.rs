// Nebula Nav state managers
// Managers own the in-memory dashboard: the link collection and the shared state around it.

pub mod dashboard_state;
pub mod link_manager;
