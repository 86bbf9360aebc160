//! Role sync service
//!
//! Reconciles a member's Discord roles with the membership datastore.
//! Both the single-member and the bulk path evaluate the same role policy;
//! the bulk path loads the role catalog once and fans out per member.

use std::collections::HashSet;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::time::{timeout_at, Instant};
use tracing::{info, instrument, warn};

use stem_core::entities::{GenerationRole, Member, Team};
use stem_core::error::DomainError;
use stem_core::policy::{evaluate, MemberFacts, RoleCatalog, RoleChange, RoleChangeKind, RoleDiff};
use stem_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// A role mutation that Discord rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRoleChange {
    pub role_id: Snowflake,
    pub label: String,
    pub kind: RoleChangeKind,
    pub error: String,
}

/// Outcome of syncing one member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSyncReport {
    /// Labels of roles granted
    pub assigned: Vec<String>,
    /// Labels of roles revoked
    pub removed: Vec<String>,
    /// Mutations that failed; the others were still applied
    pub failed: Vec<FailedRoleChange>,
}

impl RoleSyncReport {
    /// True when every mutation went through
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when nothing had to change
    pub fn is_noop(&self) -> bool {
        self.assigned.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }
}

/// Error entry of a bulk sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSyncError {
    /// Discord id as stored, which may not be a valid snowflake
    pub discord_uid: String,
    pub error: String,
}

/// Outcome of syncing every member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSyncReport {
    pub synced: usize,
    pub failed: usize,
    pub total: usize,
    /// One entry per failed member, in datastore order
    pub errors: Vec<MemberSyncError>,
}

/// Generation and team roles shared by every member in a sync
#[derive(Debug, Clone, Default)]
pub struct RoleCatalogData {
    pub generation_roles: Vec<GenerationRole>,
    pub teams: Vec<Team>,
}

/// Role sync service
pub struct RoleSyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleSyncService<'a> {
    /// Create a new RoleSyncService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sync the roles of one member
    ///
    /// # Errors
    /// - `DiscordMemberNotFound` if the user is not in the guild
    /// - `MemberNotFound` if there is no non-deleted datastore row
    /// - `InvalidStatus` if the stored status is out of range
    /// - upstream errors from the datastore or Discord reads
    #[instrument(skip(self, discord_uid), fields(discord_uid = %discord_uid))]
    pub async fn sync_member(&self, discord_uid: Snowflake) -> ServiceResult<RoleSyncReport> {
        let guild_member = self
            .ctx
            .gateway()
            .fetch_member(discord_uid)
            .await?
            .ok_or(DomainError::DiscordMemberNotFound(discord_uid))?;

        let member = self
            .ctx
            .member_repo()
            .find_by_discord_uid(discord_uid)
            .await?
            .ok_or(DomainError::MemberNotFound(discord_uid))?;

        let catalog = self.load_catalog().await?;
        let report = self
            .reconcile(&catalog, &member, &guild_member.role_set())
            .await?;

        info!(
            assigned = report.assigned.len(),
            removed = report.removed.len(),
            failed = report.failed.len(),
            "Member roles synced"
        );

        Ok(report)
    }

    /// Sync the roles of every non-deleted member
    ///
    /// Per-member failures are recorded and never abort the batch.
    ///
    /// # Errors
    /// Fails only if the member list or the role catalog cannot be loaded.
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> ServiceResult<BulkSyncReport> {
        let settings = *self.ctx.sync_config();
        let records = self.ctx.member_repo().find_active_records().await?;
        let total = records.len();

        if records.is_empty() {
            info!("No members to sync");
            return Ok(BulkSyncReport::default());
        }

        let catalog = self.load_catalog().await?;
        let batch_deadline = Instant::now() + settings.batch_timeout;

        info!(total, concurrency = settings.concurrency, "Starting bulk role sync");

        let mut outcomes: Vec<(usize, String, Result<(), String>)> =
            stream::iter(records.into_iter().enumerate())
                .map(|(index, record)| {
                    let catalog = &catalog;
                    async move {
                        match record {
                            Ok(member) => {
                                let outcome = self
                                    .sync_loaded_member(
                                        catalog,
                                        &member,
                                        settings.member_timeout,
                                        batch_deadline,
                                    )
                                    .await;
                                (index, member.discord_uid.to_string(), outcome)
                            }
                            Err(invalid) => {
                                warn!(
                                    discord_uid = %invalid.discord_uid,
                                    error = %invalid.error,
                                    "Skipping malformed member row"
                                );
                                (index, invalid.discord_uid, Err(invalid.error.to_string()))
                            }
                        }
                    }
                })
                .buffer_unordered(settings.concurrency.max(1))
                .boxed()
                .collect()
                .await;

        outcomes.sort_unstable_by_key(|(index, _, _)| *index);

        let report = outcomes.into_iter().fold(
            BulkSyncReport {
                total,
                ..Default::default()
            },
            |mut report, (_, discord_uid, outcome)| {
                match outcome {
                    Ok(()) => report.synced += 1,
                    Err(error) => {
                        report.failed += 1;
                        report.errors.push(MemberSyncError { discord_uid, error });
                    }
                }
                report
            },
        );

        info!(
            synced = report.synced,
            failed = report.failed,
            total = report.total,
            "Bulk role sync finished"
        );

        Ok(report)
    }

    /// Load every generation role and team
    pub async fn load_catalog(&self) -> ServiceResult<RoleCatalogData> {
        let generation_roles = self.ctx.generation_role_repo().find_all().await?;
        let teams = self.ctx.team_repo().find_all().await?;
        Ok(RoleCatalogData {
            generation_roles,
            teams,
        })
    }

    // One member of a bulk sync, bounded by its own timeout and the batch deadline
    async fn sync_loaded_member(
        &self,
        catalog: &RoleCatalogData,
        member: &Member,
        member_timeout: Duration,
        batch_deadline: Instant,
    ) -> Result<(), String> {
        let discord_uid = member.discord_uid;
        let member_deadline = Instant::now() + member_timeout;
        let deadline = member_deadline.min(batch_deadline);

        match timeout_at(deadline, self.sync_guild_member(catalog, member)).await {
            Ok(Ok(report)) if report.is_complete() => Ok(()),
            Ok(Ok(report)) => {
                let labels: Vec<&str> = report.failed.iter().map(|f| f.label.as_str()).collect();
                warn!(discord_uid = %discord_uid, failed = ?labels, "Some role changes failed");
                Err(format!("Failed to update roles: {}", labels.join(", ")))
            }
            Ok(Err(e)) => {
                warn!(discord_uid = %discord_uid, error = %e, "Member sync failed");
                Err(e.to_string())
            }
            Err(_) if deadline == batch_deadline => {
                warn!(discord_uid = %discord_uid, "Bulk sync deadline exceeded");
                Err("Bulk sync deadline exceeded".to_string())
            }
            Err(_) => {
                warn!(discord_uid = %discord_uid, "Member sync timed out");
                Err(format!("Timed out after {}s", member_timeout.as_secs()))
            }
        }
    }

    async fn sync_guild_member(
        &self,
        catalog: &RoleCatalogData,
        member: &Member,
    ) -> ServiceResult<RoleSyncReport> {
        let guild_member = self
            .ctx
            .gateway()
            .fetch_member(member.discord_uid)
            .await?
            .ok_or(DomainError::DiscordMemberNotFound(member.discord_uid))?;
        self.reconcile(catalog, member, &guild_member.role_set())
            .await
    }

    // Evaluate the policy for a loaded member and apply the diff against its current roles
    async fn reconcile(
        &self,
        catalog: &RoleCatalogData,
        member: &Member,
        current: &HashSet<Snowflake>,
    ) -> ServiceResult<RoleSyncReport> {
        let team_ids = self.ctx.team_repo().team_ids_for_member(member.id).await?;
        let is_leader = self.ctx.team_repo().is_leader(member.id).await?;

        let facts = MemberFacts::new(member, team_ids, is_leader);
        let plan = evaluate(
            &facts,
            &RoleCatalog {
                generation_roles: &catalog.generation_roles,
                teams: &catalog.teams,
                managed: self.ctx.managed_roles(),
            },
        );
        let diff = RoleDiff::compute(&plan, current);

        Ok(self.apply(member.discord_uid, &diff).await)
    }

    // Apply every change independently; a failure never blocks the others
    async fn apply(&self, discord_uid: Snowflake, diff: &RoleDiff) -> RoleSyncReport {
        let mut report = RoleSyncReport::default();

        for change in diff.changes() {
            match self.apply_change(discord_uid, change).await {
                Ok(()) => match change.kind {
                    RoleChangeKind::Add => report.assigned.push(change.label.clone()),
                    RoleChangeKind::Remove => report.removed.push(change.label.clone()),
                },
                Err(e) => {
                    warn!(
                        discord_uid = %discord_uid,
                        role_id = %change.role_id,
                        label = %change.label,
                        error = %e,
                        "Role change failed"
                    );
                    report.failed.push(FailedRoleChange {
                        role_id: change.role_id,
                        label: change.label.clone(),
                        kind: change.kind,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    async fn apply_change(&self, discord_uid: Snowflake, change: &RoleChange) -> Result<(), DomainError> {
        let gateway = self.ctx.gateway();
        match change.kind {
            RoleChangeKind::Add => gateway.add_role(discord_uid, change.role_id).await,
            RoleChangeKind::Remove => gateway.remove_role(discord_uid, change.role_id).await,
        }
    }
}
