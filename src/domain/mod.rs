pub mod chart_data;
pub mod errors;
pub mod events;
pub mod logging;
