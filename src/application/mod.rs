pub mod data_hub;
pub mod registry;
pub mod script_client;

pub use data_hub::*;
pub use registry::*;
pub use script_client::*;
