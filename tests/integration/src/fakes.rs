//! In-memory implementations of the stem-core ports
//!
//! `InMemoryDatastore` stands in for PostgreSQL, `FakeGuild` for the Discord
//! REST API. Both are cheap to clone and share state between clones so a test
//! can keep a handle while the service context owns another.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use stem_core::entities::{
    GenerationRole, GuildMember, GuildRole, InvalidMemberRow, Member, MemberRecord, Team,
    TeamLeader,
};
use stem_core::error::DomainError;
use stem_core::traits::{
    GenerationRoleRepository, GuildGateway, MemberRepository, RepoResult, TeamRepository,
};
use stem_core::value_objects::Snowflake;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ============================================================================
// Datastore
// ============================================================================

#[derive(Default)]
struct Tables {
    members: Vec<Member>,
    /// Rows whose status code does not parse: (discord_uid, generation, status)
    invalid_members: Vec<(String, i32, i16)>,
    teams: Vec<Team>,
    memberships: Vec<(Uuid, Uuid)>,
    leaders: Vec<TeamLeader>,
    generation_roles: Vec<GenerationRole>,
    unavailable: bool,
    reject_generation_inserts: bool,
    generation_inserts: usize,
}

/// In-memory membership datastore
#[derive(Clone, Default)]
pub struct InMemoryDatastore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, member: Member) {
        lock(&self.tables).members.push(member);
    }

    /// Store a non-deleted members row with an unknown status code
    pub fn add_invalid_member(&self, discord_uid: &str, generation: i32, status: i16) {
        lock(&self.tables)
            .invalid_members
            .push((discord_uid.to_string(), generation, status));
    }

    pub fn add_team(&self, team: Team) {
        lock(&self.tables).teams.push(team);
    }

    pub fn join_team(&self, member_id: Uuid, team_id: Uuid) {
        lock(&self.tables).memberships.push((member_id, team_id));
    }

    pub fn make_leader(&self, member_id: Uuid, team_id: Uuid) {
        lock(&self.tables).leaders.push(TeamLeader { team_id, member_id });
    }

    pub fn add_generation_role(&self, role: GenerationRole) {
        lock(&self.tables).generation_roles.push(role);
    }

    pub fn generation_roles(&self) -> Vec<GenerationRole> {
        lock(&self.tables).generation_roles.clone()
    }

    /// Number of generation rows written through the repository
    pub fn generation_inserts(&self) -> usize {
        lock(&self.tables).generation_inserts
    }

    /// Make every query fail
    pub fn set_unavailable(&self, unavailable: bool) {
        lock(&self.tables).unavailable = unavailable;
    }

    /// Make generation inserts fail
    pub fn reject_generation_inserts(&self) {
        lock(&self.tables).reject_generation_inserts = true;
    }

    fn check(&self) -> RepoResult<MutexGuard<'_, Tables>> {
        let tables = lock(&self.tables);
        if tables.unavailable {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(tables)
    }
}

#[async_trait]
impl MemberRepository for InMemoryDatastore {
    async fn find_by_discord_uid(&self, discord_uid: Snowflake) -> RepoResult<Option<Member>> {
        Ok(self
            .check()?
            .members
            .iter()
            .find(|m| m.discord_uid == discord_uid && !m.is_deleted())
            .cloned())
    }

    async fn find_active_records(&self) -> RepoResult<Vec<MemberRecord>> {
        let tables = self.check()?;
        let valid = tables
            .members
            .iter()
            .filter(|m| !m.is_deleted())
            .map(|m| (m.generation, m.student_number.clone(), Ok(m.clone())));
        let invalid = tables.invalid_members.iter().map(|(uid, generation, status)| {
            let row = InvalidMemberRow {
                discord_uid: uid.clone(),
                error: DomainError::InvalidStatus(*status),
            };
            (*generation, None, Err(row))
        });
        let mut rows: Vec<(i32, Option<String>, MemberRecord)> = valid.chain(invalid).collect();

        rows.sort_by(|a, b| {
            b.0.cmp(&a.0).then_with(|| match (a.1.as_deref(), b.1.as_deref()) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
        });

        Ok(rows.into_iter().map(|(_, _, record)| record).collect())
    }
}

#[async_trait]
impl TeamRepository for InMemoryDatastore {
    async fn find_all(&self) -> RepoResult<Vec<Team>> {
        Ok(self.check()?.teams.clone())
    }

    async fn team_ids_for_member(&self, member_id: Uuid) -> RepoResult<Vec<Uuid>> {
        Ok(self
            .check()?
            .memberships
            .iter()
            .filter(|(member, _)| *member == member_id)
            .map(|(_, team)| *team)
            .collect())
    }

    async fn is_leader(&self, member_id: Uuid) -> RepoResult<bool> {
        Ok(self.check()?.leaders.iter().any(|l| l.member_id == member_id))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.check()?.teams.len() as i64)
    }
}

#[async_trait]
impl GenerationRoleRepository for InMemoryDatastore {
    async fn find_all(&self) -> RepoResult<Vec<GenerationRole>> {
        Ok(self.check()?.generation_roles.clone())
    }

    async fn find_by_generation(&self, generation: i32) -> RepoResult<Option<GenerationRole>> {
        Ok(self
            .check()?
            .generation_roles
            .iter()
            .find(|r| r.generation == generation)
            .copied())
    }

    async fn create(&self, role: &GenerationRole) -> RepoResult<()> {
        let mut tables = self.check()?;
        if tables.reject_generation_inserts {
            return Err(DomainError::DatabaseError("insert rejected".to_string()));
        }
        if tables.generation_roles.iter().any(|r| r.generation == role.generation) {
            return Err(DomainError::GenerationRoleExists(role.generation));
        }
        tables.generation_roles.push(*role);
        tables.generation_inserts += 1;
        Ok(())
    }
}

// ============================================================================
// Discord guild
// ============================================================================

#[derive(Default)]
struct GuildState {
    members: HashMap<Snowflake, GuildMember>,
    roles: Vec<GuildRole>,
    next_role_id: u64,
    failing_roles: HashSet<Snowflake>,
    unreachable: HashSet<Snowflake>,
    delays: HashMap<Snowflake, Duration>,
    created_roles: usize,
    mutations: usize,
}

/// In-memory Discord guild
#[derive(Clone)]
pub struct FakeGuild {
    guild_id: Snowflake,
    state: Arc<Mutex<GuildState>>,
}

impl Default for FakeGuild {
    fn default() -> Self {
        Self::new(Snowflake::new(1_000))
    }
}

impl FakeGuild {
    /// Guild with only the `@everyone` role
    pub fn new(guild_id: Snowflake) -> Self {
        let state = GuildState {
            roles: vec![GuildRole::new(guild_id, GuildRole::EVERYONE)],
            next_role_id: 90_000,
            ..Default::default()
        };
        Self {
            guild_id,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    pub fn add_member(&self, member: GuildMember) {
        lock(&self.state).members.insert(member.user_id, member);
    }

    pub fn add_role(&self, id: Snowflake, name: &str) {
        lock(&self.state).roles.push(GuildRole::new(id, name));
    }

    pub fn member(&self, user_id: Snowflake) -> Option<GuildMember> {
        lock(&self.state).members.get(&user_id).cloned()
    }

    /// Roles currently held by a member (empty when absent)
    pub fn roles_of(&self, user_id: Snowflake) -> HashSet<Snowflake> {
        self.member(user_id).map(|m| m.role_set()).unwrap_or_default()
    }

    pub fn nickname_of(&self, user_id: Snowflake) -> Option<String> {
        self.member(user_id).and_then(|m| m.nickname)
    }

    /// Make every grant or revoke of this role fail
    pub fn fail_role(&self, role_id: Snowflake) {
        lock(&self.state).failing_roles.insert(role_id);
    }

    /// Make member lookups for this user fail with an upstream error
    pub fn make_unreachable(&self, user_id: Snowflake) {
        lock(&self.state).unreachable.insert(user_id);
    }

    /// Delay member lookups for this user
    pub fn delay_member(&self, user_id: Snowflake, delay: Duration) {
        lock(&self.state).delays.insert(user_id, delay);
    }

    pub fn created_roles(&self) -> usize {
        lock(&self.state).created_roles
    }

    /// Number of successful role grants and revokes
    pub fn mutations(&self) -> usize {
        lock(&self.state).mutations
    }

    fn mutate_roles(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        apply: impl FnOnce(&mut Vec<Snowflake>),
    ) -> RepoResult<()> {
        let mut state = lock(&self.state);
        if state.failing_roles.contains(&role_id) {
            return Err(DomainError::PlatformError("403 Forbidden: Missing Permissions".to_string()));
        }
        let member = state
            .members
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::PlatformError("404 Not Found: Unknown Member".to_string()))?;
        apply(&mut member.role_ids);
        state.mutations += 1;
        Ok(())
    }
}

#[async_trait]
impl GuildGateway for FakeGuild {
    async fn fetch_member(&self, user_id: Snowflake) -> RepoResult<Option<GuildMember>> {
        let delay = lock(&self.state).delays.get(&user_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = lock(&self.state);
        if state.unreachable.contains(&user_id) {
            return Err(DomainError::PlatformError("503 Service Unavailable".to_string()));
        }
        Ok(state.members.get(&user_id).cloned())
    }

    async fn list_roles(&self) -> RepoResult<Vec<GuildRole>> {
        Ok(lock(&self.state).roles.clone())
    }

    async fn create_role(&self, name: &str) -> RepoResult<GuildRole> {
        let mut state = lock(&self.state);
        state.next_role_id += 1;
        state.created_roles += 1;
        let role = GuildRole::new(Snowflake::new(state.next_role_id), name);
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn add_role(&self, user_id: Snowflake, role_id: Snowflake) -> RepoResult<()> {
        self.mutate_roles(user_id, role_id, |roles| {
            if !roles.contains(&role_id) {
                roles.push(role_id);
            }
        })
    }

    async fn remove_role(&self, user_id: Snowflake, role_id: Snowflake) -> RepoResult<()> {
        self.mutate_roles(user_id, role_id, |roles| roles.retain(|r| *r != role_id))
    }

    async fn set_nickname(&self, user_id: Snowflake, nickname: &str) -> RepoResult<()> {
        let mut state = lock(&self.state);
        let member = state
            .members
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::PlatformError("404 Not Found: Unknown Member".to_string()))?;
        member.nickname = Some(nickname.to_string());
        Ok(())
    }
}
