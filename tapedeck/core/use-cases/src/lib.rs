pub mod boundaries;
pub mod describe;
pub mod export;
pub mod gateways;
pub mod import;
pub mod interactors;
pub mod matching;
pub mod models;
pub mod paths;
pub mod traversal;
pub mod utils;
