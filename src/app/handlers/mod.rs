pub mod ingest;

pub use ingest::IngestHandler;
