pub mod boundaries;
pub mod gateways;
pub mod workers;

pub(crate) mod utils;
