#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;
use std::sync::Arc;

use access_graph_sdk::{
    CloudType, EntityKind, ListQuery, NewPermission, PermissionFilter, PermissionLevel,
};

use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;
use crate::test_support::{
    build_services, default_services, file_db, grant, seed_developer, seed_resource,
};

async fn assert_one_edge_per_pair(services: &crate::module::ConcreteAppServices) {
    let edges = services
        .queries
        .list_permissions(PermissionFilter::default(), ListQuery::all())
        .await
        .unwrap();
    let pairs: HashSet<_> = edges.iter().map(|p| (p.developer_id, p.resource_id)).collect();
    assert_eq!(pairs.len(), edges.len());
}

#[tokio::test]
async fn alice_bucket_scenario() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;

    let edge = grant(&services, &alice, &bucket, PermissionLevel::Read).await;
    assert_eq!(edge.permission, PermissionLevel::Read);

    let err = services
        .permissions
        .create_permission(NewPermission::new(alice.id, bucket.id, PermissionLevel::Write))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::duplicate_edge(alice.id, bucket.id));

    // The failed create did not overwrite the existing edge.
    let stored = services.permissions.get_permission(edge.id).await.unwrap();
    assert_eq!(stored.permission, PermissionLevel::Read);

    services
        .permissions
        .update_permission(
            edge.id,
            NewPermission::new(alice.id, bucket.id, PermissionLevel::Write),
        )
        .await
        .unwrap();

    let by_resource = services
        .queries
        .permissions_for_resource(bucket.id)
        .await
        .unwrap();
    assert_eq!(by_resource.len(), 1);
    assert_eq!(by_resource[0].developer, alice);
    assert_eq!(by_resource[0].permission.permission, PermissionLevel::Write);
}

#[tokio::test]
async fn missing_endpoint_creates_nothing() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;

    let err = services
        .permissions
        .create_permission(NewPermission::new(999, bucket.id, PermissionLevel::Read))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found(EntityKind::Developer, 999));

    let err = services
        .permissions
        .create_permission(NewPermission::new(alice.id, 999, PermissionLevel::Read))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found(EntityKind::CloudResource, 999));

    let edges = services
        .queries
        .list_permissions(PermissionFilter::default(), ListQuery::all())
        .await
        .unwrap();
    assert!(edges.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_for_one_pair_have_a_single_winner() {
    let dir = tempfile::tempdir().unwrap();
    let db = file_db(&dir.path().join("graph.db"), 8).await;
    let services = Arc::new(build_services(db, ServiceConfig::default()));
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;

    let racers = 32;
    for round in 0..5 {
        let name = format!("AWS S3 Bucket {round}");
        let bucket = seed_resource(&services, CloudType::Aws, &name).await;
        let (developer_id, resource_id) = (alice.id, bucket.id);

        let handles: Vec<_> = (0..racers)
            .map(|i| {
                let services = Arc::clone(&services);
                let level = PermissionLevel::ALL[i % PermissionLevel::ALL.len()];
                tokio::spawn(async move {
                    services
                        .permissions
                        .create_permission(NewPermission::new(developer_id, resource_id, level))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for result in futures::future::join_all(handles).await {
            match result.expect("task panicked") {
                Ok(_) => created += 1,
                Err(e) => assert_eq!(e, DomainError::duplicate_edge(developer_id, resource_id)),
            }
        }
        assert_eq!(created, 1, "round {round}");
    }
    assert_one_edge_per_pair(&services).await;
}

#[tokio::test]
async fn retargeting_rechecks_the_new_pair() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let db = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;

    let alice_bucket = grant(&services, &alice, &bucket, PermissionLevel::Read).await;
    let bob_bucket = grant(&services, &bob, &bucket, PermissionLevel::Write).await;

    // Moving Bob's edge onto Alice's pair collides.
    let err = services
        .permissions
        .update_permission(
            bob_bucket.id,
            NewPermission::new(alice.id, bucket.id, PermissionLevel::Rw),
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::duplicate_edge(alice.id, bucket.id));

    // Retargeting to a missing endpoint is reported precisely.
    let err = services
        .permissions
        .update_permission(
            bob_bucket.id,
            NewPermission::new(bob.id, 404, PermissionLevel::Rw),
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found(EntityKind::CloudResource, 404));

    let moved = services
        .permissions
        .update_permission(
            bob_bucket.id,
            NewPermission::new(bob.id, db.id, PermissionLevel::Rw),
        )
        .await
        .unwrap();
    assert_eq!(moved.id, bob_bucket.id);
    assert_eq!(moved.resource_id, db.id);
    assert_eq!(moved.permission, PermissionLevel::Rw);

    // Updating an edge onto its own pair is not a collision.
    services
        .permissions
        .update_permission(
            alice_bucket.id,
            NewPermission::new(alice.id, bucket.id, PermissionLevel::Rw),
        )
        .await
        .unwrap();

    assert_one_edge_per_pair(&services).await;
}

#[tokio::test]
async fn deleting_an_edge_frees_its_pair() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let edge = grant(&services, &alice, &bucket, PermissionLevel::Read).await;

    services.permissions.delete_permission(edge.id).await.unwrap();
    assert_eq!(
        services.permissions.delete_permission(edge.id).await.unwrap_err(),
        DomainError::not_found(EntityKind::Permission, edge.id)
    );
    assert_eq!(
        services
            .permissions
            .update_permission(edge.id, NewPermission::new(alice.id, bucket.id, PermissionLevel::Rw))
            .await
            .unwrap_err(),
        DomainError::not_found(EntityKind::Permission, edge.id)
    );

    let again = grant(&services, &alice, &bucket, PermissionLevel::Rw).await;
    assert_ne!(again.id, edge.id);
    assert_one_edge_per_pair(&services).await;
}
