pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod pagination;
pub mod service;
pub mod store;
