//! Clientes de colaboradores externos
//!
//! Storage de objetos y funciones serverless, consumidos como cajas negras.

pub mod functions_client;
pub mod storage_client;

pub use functions_client::FunctionsClient;
pub use storage_client::{ObjectStorage, StorageClient};
