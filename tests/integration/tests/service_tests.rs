//! Service-level scenarios over the in-memory datastore and guild
//!
//! Run with: cargo test -p integration-tests --test service_tests

use std::collections::HashSet;
use std::time::Duration;

use integration_tests::*;
use stem_common::SyncConfig;
use stem_core::entities::MemberStatus;
use stem_core::error::DomainError;
use stem_core::value_objects::Snowflake;
use stem_service::{
    GenerationService, MemberDirectoryService, NicknameService, RoleSyncService, ServiceError,
};

fn uid(n: u64) -> Snowflake {
    Snowflake::new(500_000 + n)
}

fn set(ids: &[Snowflake]) -> HashSet<Snowflake> {
    ids.iter().copied().collect()
}

fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain().expect("domain error")
}

// ============================================================================
// Single-member sync
// ============================================================================

#[tokio::test]
async fn test_enrolled_members_get_member_role_not_alumnus() {
    for (n, status, status_role) in [
        (1, MemberStatus::Junior, JUNIOR_ROLE),
        (2, MemberStatus::Senior, SENIOR_ROLE),
    ] {
        let scenario = Scenario::new();
        scenario.enroll(
            MemberBuilder::new(uid(n)).status(status).build(),
            None,
            &[ALUMNUS_ROLE],
        );
        let ctx = scenario.context();

        let report = RoleSyncService::new(&ctx).sync_member(uid(n)).await.unwrap();

        assert!(report.is_complete());
        assert!(report.removed.contains(&"OB".to_string()));
        assert_eq!(
            scenario.guild.roles_of(uid(n)),
            set(&[status_role, MEMBER_ROLE, VERIFIED_ROLE, GEN_52_ROLE])
        );
    }
}

#[tokio::test]
async fn test_alumnus_loses_member_and_school_roles() {
    let scenario = Scenario::new();
    scenario.enroll(
        MemberBuilder::new(uid(1))
            .status(MemberStatus::Alumnus)
            .generation(47)
            .build(),
        None,
        &[MEMBER_ROLE, JUNIOR_ROLE, SENIOR_ROLE, VERIFIED_ROLE],
    );
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_member(uid(1)).await.unwrap();

    let roles = scenario.guild.roles_of(uid(1));
    assert_eq!(roles, set(&[ALUMNUS_ROLE, VERIFIED_ROLE, GEN_47_ROLE]));
    assert_eq!(report.removed.len(), 3);
    assert!(report.assigned.contains(&"OB".to_string()));
    assert!(report.assigned.contains(&"47期生".to_string()));
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let scenario = Scenario::new();
    let member = scenario.enroll(MemberBuilder::new(uid(1)).build(), None, &[]);
    scenario.datastore.join_team(member.id, TEAM_B);
    let ctx = scenario.context();
    let service = RoleSyncService::new(&ctx);

    let first = service.sync_member(uid(1)).await.unwrap();
    assert!(!first.is_noop());
    let roles_after_first = scenario.guild.roles_of(uid(1));
    let mutations = scenario.guild.mutations();

    let second = service.sync_member(uid(1)).await.unwrap();
    assert!(second.is_noop());
    assert_eq!(scenario.guild.roles_of(uid(1)), roles_after_first);
    assert_eq!(scenario.guild.mutations(), mutations);
}

#[tokio::test]
async fn test_stale_generation_role_is_replaced() {
    let scenario = Scenario::new();
    scenario.enroll(
        MemberBuilder::new(uid(1)).generation(52).build(),
        None,
        &[GEN_51_ROLE, GEN_47_ROLE],
    );
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_member(uid(1)).await.unwrap();

    let roles = scenario.guild.roles_of(uid(1));
    assert!(roles.contains(&GEN_52_ROLE));
    assert!(!roles.contains(&GEN_51_ROLE));
    assert!(!roles.contains(&GEN_47_ROLE));
    assert!(report.assigned.contains(&"52期生".to_string()));
    assert!(report.removed.contains(&"51期生".to_string()));
}

#[tokio::test]
async fn test_team_roles_follow_membership() {
    let scenario = Scenario::new();
    let member = scenario.enroll(MemberBuilder::new(uid(1)).build(), None, &[TEAM_C_ROLE]);
    scenario.datastore.join_team(member.id, TEAM_A);
    scenario.datastore.join_team(member.id, TEAM_B);
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_member(uid(1)).await.unwrap();

    let roles = scenario.guild.roles_of(uid(1));
    assert!(roles.contains(&TEAM_A_ROLE));
    assert!(roles.contains(&TEAM_B_ROLE));
    assert!(!roles.contains(&TEAM_C_ROLE));
    assert!(!roles.contains(&LEADER_ROLE));
    assert!(report.removed.contains(&"C班".to_string()));
}

#[tokio::test]
async fn test_leader_gets_and_loses_leader_role() {
    let scenario = Scenario::new();
    let leader = scenario.enroll(MemberBuilder::new(uid(1)).build(), None, &[]);
    scenario.datastore.join_team(leader.id, TEAM_A);
    scenario.datastore.make_leader(leader.id, TEAM_A);
    scenario.enroll(MemberBuilder::new(uid(2)).build(), None, &[LEADER_ROLE]);
    let ctx = scenario.context();
    let service = RoleSyncService::new(&ctx);

    service.sync_member(uid(1)).await.unwrap();
    service.sync_member(uid(2)).await.unwrap();

    assert!(scenario.guild.roles_of(uid(1)).contains(&LEADER_ROLE));
    assert!(!scenario.guild.roles_of(uid(2)).contains(&LEADER_ROLE));
}

#[tokio::test]
async fn test_unmanaged_roles_are_left_alone() {
    let scenario = Scenario::new();
    let other = Snowflake::new(777);
    scenario.guild.add_role(other, "ゲーム好き");
    scenario.enroll(MemberBuilder::new(uid(1)).build(), None, &[other]);
    let ctx = scenario.context();

    RoleSyncService::new(&ctx).sync_member(uid(1)).await.unwrap();

    assert!(scenario.guild.roles_of(uid(1)).contains(&other));
}

#[tokio::test]
async fn test_failed_role_change_is_reported_and_others_applied() {
    let scenario = Scenario::new();
    let member = scenario.enroll(MemberBuilder::new(uid(1)).build(), None, &[]);
    scenario.datastore.join_team(member.id, TEAM_A);
    scenario.guild.fail_role(TEAM_A_ROLE);
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_member(uid(1)).await.unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].label, "A班");
    assert_eq!(report.failed[0].role_id, TEAM_A_ROLE);
    assert!(report.failed[0].error.contains("Missing Permissions"));

    let roles = scenario.guild.roles_of(uid(1));
    assert!(roles.contains(&GEN_52_ROLE));
    assert!(roles.contains(&MEMBER_ROLE));
    assert!(!roles.contains(&TEAM_A_ROLE));
}

#[tokio::test]
async fn test_missing_discord_member_is_checked_first() {
    let scenario = Scenario::new();
    let ctx = scenario.context();

    let err = RoleSyncService::new(&ctx).sync_member(uid(9)).await.unwrap_err();

    assert!(matches!(domain(&err), DomainError::DiscordMemberNotFound(_)));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_missing_datastore_member() {
    let scenario = Scenario::new();
    scenario.guild.add_member(guild_member(uid(1), None, &[]));
    let ctx = scenario.context();

    let err = RoleSyncService::new(&ctx).sync_member(uid(1)).await.unwrap_err();

    assert!(matches!(domain(&err), DomainError::MemberNotFound(_)));
    assert_eq!(scenario.guild.mutations(), 0);
}

#[tokio::test]
async fn test_soft_deleted_member_is_not_found() {
    let scenario = Scenario::new();
    scenario.enroll(MemberBuilder::new(uid(1)).deleted().build(), None, &[]);
    let ctx = scenario.context();

    let err = RoleSyncService::new(&ctx).sync_member(uid(1)).await.unwrap_err();

    assert!(matches!(domain(&err), DomainError::MemberNotFound(_)));
}

#[tokio::test]
async fn test_datastore_failure_is_upstream() {
    let scenario = Scenario::new();
    scenario.enroll(MemberBuilder::new(uid(1)).build(), None, &[]);
    scenario.datastore.set_unavailable(true);
    let ctx = scenario.context();

    let err = RoleSyncService::new(&ctx).sync_member(uid(1)).await.unwrap_err();

    assert!(matches!(domain(&err), DomainError::DatabaseError(_)));
    assert_eq!(err.status_code(), 500);
}

// ============================================================================
// Bulk sync
// ============================================================================

#[tokio::test]
async fn test_bulk_sync_isolates_failures() {
    let scenario = Scenario::new();
    scenario.enroll(MemberBuilder::new(uid(1)).student_number(Some("10001")).build(), None, &[]);
    scenario.enroll(MemberBuilder::new(uid(2)).student_number(Some("10002")).build(), None, &[]);
    scenario.enroll(MemberBuilder::new(uid(3)).student_number(Some("10003")).build(), None, &[]);
    scenario.guild.make_unreachable(uid(2));
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_all().await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.synced, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].discord_uid, uid(2).to_string());
    assert!(report.errors[0].error.contains("503"));

    for n in [1, 3] {
        let roles = scenario.guild.roles_of(uid(n));
        assert!(roles.contains(&GEN_52_ROLE));
        assert!(roles.contains(&MEMBER_ROLE));
    }
}

#[tokio::test]
async fn test_bulk_sync_counts_absent_and_partial_members_as_failed() {
    let scenario = Scenario::new();
    let with_team = scenario.enroll(MemberBuilder::new(uid(1)).generation(53).build(), None, &[]);
    scenario.datastore.join_team(with_team.id, TEAM_C);
    scenario.guild.fail_role(TEAM_C_ROLE);
    // Registered but never joined the guild
    scenario
        .datastore
        .add_member(MemberBuilder::new(uid(2)).generation(52).build());
    scenario.enroll(MemberBuilder::new(uid(3)).generation(51).build(), None, &[]);
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_all().await.unwrap();

    assert_eq!((report.synced, report.failed, report.total), (1, 2, 3));
    // Datastore order: generation descending
    assert_eq!(report.errors[0].discord_uid, uid(1).to_string());
    assert!(report.errors[0].error.contains("C班"));
    assert_eq!(report.errors[1].discord_uid, uid(2).to_string());
    assert!(report.errors[1].error.contains("Discord member not found"));
}

#[tokio::test]
async fn test_bulk_sync_reports_malformed_member_rows() {
    let scenario = Scenario::new();
    scenario.enroll(MemberBuilder::new(uid(1)).generation(52).build(), None, &[]);
    scenario.datastore.add_invalid_member("500002", 52, 5);
    scenario.enroll(MemberBuilder::new(uid(3)).generation(51).build(), None, &[]);
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_all().await.unwrap();

    assert_eq!((report.synced, report.failed, report.total), (2, 1, 3));
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].discord_uid, "500002");
    assert_eq!(report.errors[0].error, "Invalid member status: 5");
    assert!(scenario.guild.roles_of(uid(3)).contains(&MEMBER_ROLE));
}

#[tokio::test]
async fn test_bulk_sync_skips_soft_deleted_members() {
    let scenario = Scenario::new();
    scenario.enroll(MemberBuilder::new(uid(1)).build(), None, &[]);
    scenario.enroll(MemberBuilder::new(uid(2)).deleted().build(), None, &[]);
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_all().await.unwrap();

    assert_eq!(report.total, 1);
    assert!(scenario.guild.roles_of(uid(2)).is_empty());
}

#[tokio::test]
async fn test_bulk_sync_with_no_members() {
    let scenario = Scenario::new();
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_all().await.unwrap();

    assert_eq!((report.synced, report.failed, report.total), (0, 0, 0));
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_bulk_sync_member_timeout() {
    let scenario = Scenario::new().with_sync(SyncConfig {
        concurrency: 2,
        member_timeout: Duration::from_millis(50),
        batch_timeout: Duration::from_secs(10),
    });
    scenario.enroll(MemberBuilder::new(uid(1)).build(), None, &[]);
    scenario.enroll(MemberBuilder::new(uid(2)).build(), None, &[]);
    scenario.guild.delay_member(uid(2), Duration::from_millis(500));
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_all().await.unwrap();

    assert_eq!((report.synced, report.failed), (1, 1));
    assert_eq!(report.errors[0].discord_uid, uid(2).to_string());
    assert!(report.errors[0].error.contains("Timed out"));
}

#[tokio::test]
async fn test_bulk_sync_concurrent_matches_sequential() {
    let scenario = Scenario::new().with_sync(SyncConfig {
        concurrency: 4,
        member_timeout: Duration::from_secs(5),
        batch_timeout: Duration::from_secs(30),
    });
    for n in 1..=10 {
        let member = scenario.enroll(
            MemberBuilder::new(uid(n)).generation(51 + (n % 2) as i32).build(),
            None,
            &[TEAM_C_ROLE],
        );
        scenario.datastore.join_team(member.id, TEAM_A);
    }
    let ctx = scenario.context();

    let report = RoleSyncService::new(&ctx).sync_all().await.unwrap();

    assert_eq!((report.synced, report.failed, report.total), (10, 0, 10));
    for n in 1..=10 {
        let roles = scenario.guild.roles_of(uid(n));
        assert!(roles.contains(&TEAM_A_ROLE));
        assert!(!roles.contains(&TEAM_C_ROLE));
    }
}

#[tokio::test]
async fn test_bulk_sync_fails_when_member_list_unavailable() {
    let scenario = Scenario::new();
    scenario.datastore.set_unavailable(true);
    let ctx = scenario.context();

    assert!(RoleSyncService::new(&ctx).sync_all().await.is_err());
}

// ============================================================================
// Generations
// ============================================================================

#[tokio::test]
async fn test_existing_generation_is_a_conflict() {
    let scenario = Scenario::new();
    let ctx = scenario.context();

    let err = GenerationService::new(&ctx).create_generation(52).await.unwrap_err();

    assert!(matches!(domain(&err), DomainError::GenerationRoleExists(52)));
    assert_eq!(err.status_code(), 409);
    assert_eq!(scenario.guild.created_roles(), 0);
    assert_eq!(scenario.datastore.generation_inserts(), 0);
}

#[tokio::test]
async fn test_create_generation_twice() {
    let scenario = Scenario::new();
    let ctx = scenario.context();
    let service = GenerationService::new(&ctx);

    let created = service.create_generation(60).await.unwrap();
    assert_eq!(created.generation, 60);
    assert_eq!(scenario.guild.created_roles(), 1);
    assert!(scenario
        .datastore
        .generation_roles()
        .contains(&created));

    let err = service.create_generation(60).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::GenerationRoleExists(60)));
    assert_eq!(scenario.guild.created_roles(), 1);
    assert_eq!(scenario.datastore.generation_inserts(), 1);
}

#[tokio::test]
async fn test_create_generation_rejects_non_positive() {
    let scenario = Scenario::new();
    let ctx = scenario.context();

    let err = GenerationService::new(&ctx).create_generation(0).await.unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(scenario.guild.created_roles(), 0);
}

#[tokio::test]
async fn test_create_generation_insert_failure_is_reported() {
    let scenario = Scenario::new();
    scenario.datastore.reject_generation_inserts();
    let ctx = scenario.context();

    let err = GenerationService::new(&ctx).create_generation(61).await.unwrap_err();

    assert!(matches!(domain(&err), DomainError::DatabaseError(_)));
    assert_eq!(scenario.guild.created_roles(), 1);
}

// ============================================================================
// Nicknames
// ============================================================================

#[tokio::test]
async fn test_update_nickname_enrolled_and_alumnus() {
    let scenario = Scenario::new();
    scenario.enroll(
        MemberBuilder::new(uid(1)).student_number(Some("12345")).build(),
        None,
        &[],
    );
    scenario.enroll(
        MemberBuilder::new(uid(2))
            .status(MemberStatus::Alumnus)
            .generation(47)
            .student_number(None)
            .build(),
        None,
        &[],
    );
    let ctx = scenario.context();
    let service = NicknameService::new(&ctx);

    let nick = service.update_nickname(uid(1), "Taro").await.unwrap();
    assert_eq!(nick, "Taro(12345)");
    assert_eq!(scenario.guild.nickname_of(uid(1)).as_deref(), Some("Taro(12345)"));

    let nick = service.update_nickname(uid(2), "Hanako").await.unwrap();
    assert_eq!(nick, "Hanako(47期卒業生)");

    let view = service.get_nickname(uid(1)).await.unwrap();
    assert_eq!(view.full_nickname, "Taro(12345)");
    assert_eq!(view.name_only, "Taro");
}

#[tokio::test]
async fn test_update_nickname_requires_student_number() {
    let scenario = Scenario::new();
    scenario.enroll(MemberBuilder::new(uid(1)).student_number(Some("  ")).build(), None, &[]);
    let ctx = scenario.context();

    let err = NicknameService::new(&ctx)
        .update_nickname(uid(1), "Taro")
        .await
        .unwrap_err();

    assert!(matches!(domain(&err), DomainError::MissingStudentNumber));
    assert_eq!(err.status_code(), 400);
    assert_eq!(scenario.guild.nickname_of(uid(1)), None);
}

#[tokio::test]
async fn test_get_nickname_falls_back_to_username() {
    let scenario = Scenario::new();
    scenario.guild.add_member(guild_member(uid(1), None, &[]));
    let ctx = scenario.context();

    let view = NicknameService::new(&ctx).get_nickname(uid(1)).await.unwrap();

    assert_eq!(view.full_nickname, format!("user{}", uid(1)));
    assert_eq!(view.name_only, view.full_nickname);
}

// ============================================================================
// Member directory
// ============================================================================

#[tokio::test]
async fn test_member_status() {
    let scenario = Scenario::new();
    scenario.guild.add_member(guild_member(uid(1), Some("Taro(12345)"), &[MEMBER_ROLE, TEAM_A_ROLE]));
    let ctx = scenario.context();
    let service = MemberDirectoryService::new(&ctx);

    let view = service.member_status(uid(1)).await.unwrap();
    assert!(view.is_in_server);
    assert_eq!(view.current_nickname.as_deref(), Some("Taro(12345)"));
    assert_eq!(view.current_roles, vec!["部員".to_string(), "A班".to_string()]);

    let absent = service.member_status(uid(2)).await.unwrap();
    assert!(!absent.is_in_server);
    assert_eq!(absent.current_nickname, None);
    assert!(absent.current_roles.is_empty());
}

#[tokio::test]
async fn test_list_members_skips_absent_and_extracts_names() {
    let scenario = Scenario::new();
    scenario.enroll(
        MemberBuilder::new(uid(1)).generation(52).student_number(Some("2")).build(),
        Some("Taro(12345)"),
        &[],
    );
    scenario.enroll(
        MemberBuilder::new(uid(2)).generation(53).build(),
        Some("Jiro（20001）"),
        &[],
    );
    scenario
        .datastore
        .add_member(MemberBuilder::new(uid(3)).generation(54).build());
    let ctx = scenario.context();

    let entries = MemberDirectoryService::new(&ctx).list_members().await.unwrap();

    let listed: Vec<(Snowflake, &str)> = entries.iter().map(|e| (e.discord_uid, e.name.as_str())).collect();
    assert_eq!(listed, vec![(uid(2), "Jiro"), (uid(1), "Taro")]);
}

#[tokio::test]
async fn test_list_members_skips_failed_lookups() {
    let scenario = Scenario::new();
    scenario.enroll(MemberBuilder::new(uid(1)).generation(53).build(), Some("Hanako(1)"), &[]);
    scenario.enroll(MemberBuilder::new(uid(2)).generation(52).build(), Some("Saburo(2)"), &[]);
    scenario.guild.make_unreachable(uid(1));
    let ctx = scenario.context();

    let entries = MemberDirectoryService::new(&ctx).list_members().await.unwrap();

    let listed: Vec<(Snowflake, &str)> = entries.iter().map(|e| (e.discord_uid, e.name.as_str())).collect();
    assert_eq!(listed, vec![(uid(2), "Saburo")]);
}

#[tokio::test]
async fn test_list_members_ignores_malformed_rows() {
    let scenario = Scenario::new();
    scenario.enroll(MemberBuilder::new(uid(1)).build(), Some("Shiro(4)"), &[]);
    scenario.datastore.add_invalid_member("500009", 52, 7);
    let ctx = scenario.context();

    let entries = MemberDirectoryService::new(&ctx).list_members().await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].discord_uid, uid(1));
}
