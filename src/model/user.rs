use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account owned by the user subsystem; read-only for analytics.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "Sales", nullable = true)]
    pub department: Option<String>,
    pub is_active: bool,
}
