//! Domain entities - core business objects

mod generation_role;
mod guild_member;
mod member;
mod team;

pub use generation_role::GenerationRole;
pub use guild_member::{GuildMember, GuildRole};
pub use member::{InvalidMemberRow, Member, MemberRecord, MemberStatus};
pub use team::{Team, TeamLeader};
