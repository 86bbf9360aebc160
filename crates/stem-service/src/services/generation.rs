//! Generation service
//!
//! Creates the Discord role for a new cohort and records the mapping.

use tracing::{error, info, instrument};

use stem_core::entities::GenerationRole;
use stem_core::error::DomainError;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Generation service
pub struct GenerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GenerationService<'a> {
    /// Create a new GenerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create the `N期生` role and store the generation mapping
    ///
    /// Nothing is created on Discord when the generation already has a role.
    #[instrument(skip(self))]
    pub async fn create_generation(&self, generation: i32) -> ServiceResult<GenerationRole> {
        if generation < 1 {
            return Err(ServiceError::validation("generation must be a positive integer"));
        }

        if self
            .ctx
            .generation_role_repo()
            .find_by_generation(generation)
            .await?
            .is_some()
        {
            return Err(DomainError::GenerationRoleExists(generation).into());
        }

        let role = self
            .ctx
            .gateway()
            .create_role(&GenerationRole::role_name(generation))
            .await?;
        let mapping = GenerationRole::new(generation, role.id);

        if let Err(e) = self.ctx.generation_role_repo().create(&mapping).await {
            // The Discord role stays behind; an operator has to delete or map it by hand
            error!(
                generation,
                role_id = %role.id,
                error = %e,
                "Discord role created but the generation mapping could not be stored"
            );
            return Err(e.into());
        }

        info!(generation, role_id = %role.id, "Generation role created");

        Ok(mapping)
    }
}
