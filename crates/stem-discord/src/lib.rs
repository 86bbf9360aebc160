//! # stem-discord
//!
//! Discord REST (v10) adapter implementing the [`GuildGateway`] port for a
//! single guild.
//!
//! ```rust,ignore
//! use stem_discord::DiscordClient;
//!
//! let client = DiscordClient::new(&config.discord)?;
//! let member = client.fetch_member(uid).await?;
//! ```
//!
//! [`GuildGateway`]: stem_core::traits::GuildGateway

mod client;
mod error;
mod models;

pub use client::DiscordClient;
pub use error::{DiscordError, UNKNOWN_MEMBER, UNKNOWN_USER};
pub use models::{ApiGuildMember, ApiRole, ApiUser};
