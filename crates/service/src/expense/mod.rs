//! Expense module: three-layer architecture (domain, repository, service).
//!
//! Every operation is scoped to an explicit `CallerId`; ownership is checked here,
//! not in the HTTP layer.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::ExpenseService;
