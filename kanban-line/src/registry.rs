//! StatusRegistry - read-only view over the workflow statuses of a scope
//!
//! The registry is a collaborator, not part of the engine's own state: it is
//! consulted for validation messages and for seeding fallbacks, never on the
//! hot save path.

use crate::context::KanbanContext;
use crate::error::Result;
use crate::types::{ScopeId, Status, StatusId};

/// Read-only access to the statuses valid for a scope
pub struct StatusRegistry<'a> {
    ctx: &'a KanbanContext,
}

impl<'a> StatusRegistry<'a> {
    /// Create a registry over the given context
    pub fn new(ctx: &'a KanbanContext) -> Self {
        Self { ctx }
    }

    /// All statuses belonging to a scope
    pub async fn statuses_for_scope(&self, scope: &ScopeId) -> Result<Vec<Status>> {
        Ok(self
            .ctx
            .read_all_statuses()
            .await?
            .into_iter()
            .filter(|s| &s.scope == scope)
            .collect())
    }

    /// Look a status up by name within a scope, case-insensitively
    pub async fn find_by_name_and_scope(
        &self,
        name: &str,
        scope: &ScopeId,
    ) -> Result<Option<Status>> {
        Ok(self
            .statuses_for_scope(scope)
            .await?
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(name)))
    }

    /// Human-readable name for a status ID, falling back to the raw ID when
    /// the status record cannot be resolved (e.g. imported configuration).
    pub async fn display_name(&self, id: &StatusId) -> String {
        match self.ctx.read_status(id).await {
            Ok(status) => status.name,
            Err(_) => id.to_string(),
        }
    }
}
