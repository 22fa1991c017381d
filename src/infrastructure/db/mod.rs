pub mod connection_manager;

use crate::domain::error::Result;
use async_trait::async_trait;

pub use connection_manager::ConnectionManager;

/// Source of the schema text embedded in prompts. The live implementation
/// introspects the connected database; tests substitute a fixed snapshot.
#[async_trait]
pub trait SchemaProvider {
    async fn describe_schema(&self) -> Result<String>;
}
