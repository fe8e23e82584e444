// Infrastructure layer - External dependencies and adapters
pub mod builtin_repository;
pub mod chunked_json;
pub mod config;
pub mod file_repository;
pub mod http_repository;
pub mod http_response;
pub mod ingest;
