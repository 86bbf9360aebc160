//! Generation role - maps a cohort number to its Discord role

use crate::value_objects::Snowflake;

/// Generation → Discord role mapping (at most one per generation)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRole {
    pub generation: i32,
    pub discord_role_id: Snowflake,
}

impl GenerationRole {
    /// Create a new GenerationRole
    pub const fn new(generation: i32, discord_role_id: Snowflake) -> Self {
        Self {
            generation,
            discord_role_id,
        }
    }

    /// Role name / report label for a generation, e.g. "52期生"
    pub fn role_name(generation: i32) -> String {
        format!("{generation}期生")
    }

    /// Report label for this mapping
    pub fn label(&self) -> String {
        Self::role_name(self.generation)
    }
}
