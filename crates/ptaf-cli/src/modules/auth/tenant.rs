use ptaf_core::TenantId;
use tracing::{debug, warn};

use super::session::SessionManager;
use super::types::SwitchError;

/// What a tenant-scoped operation produced, plus the outcome of switching
/// back. A failed restore does not change `outcome`.
#[must_use]
pub(crate) struct TenantScope<T> {
    pub outcome: T,
    pub restore_error: Option<SwitchError>,
}

impl<T> TenantScope<T> {
    /// Reports a failed restore on stderr and hands back the operation result.
    pub(crate) fn settle(self) -> T {
        if let Some(err) = &self.restore_error {
            eprintln!("Warning: {err:#}; later commands may run against the wrong tenant");
        }
        self.outcome
    }
}

impl SessionManager {
    /// Runs `operation` inside `tenant`, then switches back to whatever tenant
    /// was selected before. If the switch into `tenant` fails, `operation` is
    /// not run and the session is left untouched. With no prior tenant there
    /// is nothing to restore and the session stays in `tenant`.
    pub(crate) async fn with_tenant<T, F>(
        &mut self,
        tenant: &TenantId,
        operation: F,
    ) -> Result<TenantScope<T>, SwitchError>
    where
        F: AsyncFnOnce(&mut SessionManager) -> T,
    {
        let original = self.current_tenant().cloned();
        self.switch_tenant(tenant)
            .await
            .map_err(|source| SwitchError::Rejected {
                tenant: tenant.clone(),
                source,
            })?;
        debug!(tenant = %tenant, previous = ?original.as_ref().map(TenantId::as_str), "entered tenant scope");

        let outcome = operation(&mut *self).await;

        let restore_error = match original {
            Some(original) => match self.switch_tenant(&original).await {
                Ok(()) => None,
                Err(source) => {
                    warn!(tenant = %original, error = %source, "failed to restore tenant");
                    Some(SwitchError::Rejected {
                        tenant: original,
                        source,
                    })
                }
            },
            None => None,
        };
        Ok(TenantScope {
            outcome,
            restore_error,
        })
    }
}
