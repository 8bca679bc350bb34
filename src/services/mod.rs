pub mod import_service;
pub mod query_composer;
