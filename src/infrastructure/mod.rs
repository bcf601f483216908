pub mod in_memory;
pub mod models;
pub mod po_repo;
