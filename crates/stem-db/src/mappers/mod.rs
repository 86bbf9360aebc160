//! Entity to model mappers
//!
//! - `TryFrom<Model> for Entity`: convert database rows to domain objects;
//!   Discord ids are stored as text and parsed here
//! - `*Insert` structs: prepare entity data for database writes

mod generation_role;
mod member;
mod team;

pub use generation_role::GenerationRoleInsert;
pub use member::member_record;

use stem_core::error::DomainError;
use stem_core::value_objects::Snowflake;
use tracing::warn;

/// Parse a Discord id stored as text
pub(crate) fn parse_snowflake(raw: &str) -> Result<Snowflake, DomainError> {
    Snowflake::parse(raw).map_err(|_| DomainError::InvalidSnowflake(raw.to_string()))
}

/// Convert rows to entities, dropping (and logging) the ones that fail
pub fn map_valid_rows<M, E>(rows: Vec<M>, table: &'static str) -> Vec<E>
where
    E: TryFrom<M, Error = DomainError>,
{
    rows.into_iter()
        .filter_map(|row| match E::try_from(row) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!(table, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}
