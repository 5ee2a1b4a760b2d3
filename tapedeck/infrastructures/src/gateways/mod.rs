pub mod allocators;
pub mod formatters;
pub mod repositories;
