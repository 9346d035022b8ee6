#![allow(clippy::unwrap_used, clippy::expect_used)]

use access_graph_sdk::{
    CloudType, EntityKind, ListQuery, NewCloudResource, NewDeveloper, PermissionFilter,
    PermissionLevel,
};

use crate::config::DeletePolicy;
use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;
use crate::test_support::{
    build_services, default_services, grant, inmem_db, seed_developer, seed_resource,
};

#[tokio::test]
async fn create_developer_normalizes_input() {
    let services = default_services().await;

    let dev = services
        .developers
        .create_developer(NewDeveloper::new("  Alice  ", " Alice@Example.COM "))
        .await
        .unwrap();

    assert_eq!(dev.name, "Alice");
    assert_eq!(dev.email, "alice@example.com");
    assert_eq!(services.developers.get_developer(dev.id).await.unwrap(), dev);
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let services = default_services().await;
    seed_developer(&services, "Alice", "alice@x.com").await;

    let err = services
        .developers
        .create_developer(NewDeveloper::new("Other Alice", "ALICE@x.com"))
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::duplicate_email("alice@x.com"));
    let all = services
        .queries
        .list_developers(ListQuery::all())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn invalid_developer_input_is_a_validation_error() {
    let services = default_services().await;

    for (name, email) in [("", "a@x.com"), ("Bob", "not-an-email"), ("Bob", "@x.com")] {
        let err = services
            .developers
            .create_developer(NewDeveloper::new(name, email))
            .await
            .unwrap_err();
        assert!(
            matches!(err, DomainError::Validation { .. }),
            "unexpected error for ({name}, {email}): {err}"
        );
    }

    let cfg = ServiceConfig {
        max_name_length: 5,
        ..ServiceConfig::default()
    };
    let services = build_services(inmem_db().await, cfg);
    let err = services
        .developers
        .create_developer(NewDeveloper::new("Alexander", "alex@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "name"));
}

#[tokio::test]
async fn missing_entities_are_not_found() {
    let services = default_services().await;

    assert_eq!(
        services.developers.get_developer(42).await.unwrap_err(),
        DomainError::not_found(EntityKind::Developer, 42)
    );
    assert_eq!(
        services.resources.get_resource(7).await.unwrap_err(),
        DomainError::not_found(EntityKind::CloudResource, 7)
    );
    assert_eq!(
        services
            .developers
            .update_developer(42, NewDeveloper::new("Ghost", "ghost@x.com"))
            .await
            .unwrap_err(),
        DomainError::not_found(EntityKind::Developer, 42)
    );
    assert_eq!(
        services.resources.delete_resource(7).await.unwrap_err(),
        DomainError::not_found(EntityKind::CloudResource, 7)
    );
}

#[tokio::test]
async fn update_developer_replaces_fields_and_keeps_email_unique() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;

    let updated = services
        .developers
        .update_developer(alice.id, NewDeveloper::new("Alice Smith", "ALICE.SMITH@x.com"))
        .await
        .unwrap();
    assert_eq!(updated.id, alice.id);
    assert_eq!(updated.name, "Alice Smith");
    assert_eq!(updated.email, "alice.smith@x.com");

    let err = services
        .developers
        .update_developer(bob.id, NewDeveloper::new("Bob", "alice.smith@x.com"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::duplicate_email("alice.smith@x.com"));

    // Keeping one's own email is not a collision.
    services
        .developers
        .update_developer(bob.id, NewDeveloper::new("Robert", "bob@x.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn resources_allow_duplicate_names_and_full_updates() {
    let services = default_services().await;
    let first = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let second = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    assert_ne!(first.id, second.id);

    let updated = services
        .resources
        .update_resource(second.id, NewCloudResource::new(CloudType::Gcp, " GCP Bucket "))
        .await
        .unwrap();
    assert_eq!(updated.cloud_type, CloudType::Gcp);
    assert_eq!(updated.name, "GCP Bucket");

    let err = services
        .resources
        .create_resource(NewCloudResource::new(CloudType::Azure, "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn reject_policy_refuses_to_delete_linked_entities() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let vm = seed_resource(&services, CloudType::Aws, "AWS EC2 Instance").await;
    grant(&services, &alice, &bucket, PermissionLevel::Read).await;
    grant(&services, &alice, &vm, PermissionLevel::Rw).await;

    assert_eq!(
        services.developers.delete_developer(alice.id).await.unwrap_err(),
        DomainError::has_dependents(EntityKind::Developer, alice.id, 2)
    );
    assert_eq!(
        services.resources.delete_resource(bucket.id).await.unwrap_err(),
        DomainError::has_dependents(EntityKind::CloudResource, bucket.id, 1)
    );

    // Nothing was removed.
    services.developers.get_developer(alice.id).await.unwrap();
    let edges = services
        .queries
        .list_permissions(PermissionFilter::default(), ListQuery::all())
        .await
        .unwrap();
    assert_eq!(edges.len(), 2);

    // Unlinked entities delete normally.
    let spare = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;
    services.resources.delete_resource(spare.id).await.unwrap();
    assert!(services.resources.get_resource(spare.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn cascade_policy_removes_dependent_edges() {
    let cfg = ServiceConfig {
        delete_policy: DeletePolicy::Cascade,
        ..ServiceConfig::default()
    };
    let services = build_services(inmem_db().await, cfg);
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let vm = seed_resource(&services, CloudType::Azure, "Azure Virtual Machine").await;
    grant(&services, &alice, &bucket, PermissionLevel::Read).await;
    grant(&services, &alice, &vm, PermissionLevel::Write).await;
    let bobs = grant(&services, &bob, &vm, PermissionLevel::Rw).await;

    services.developers.delete_developer(alice.id).await.unwrap();

    assert!(services.developers.get_developer(alice.id).await.unwrap_err().is_not_found());
    let remaining = services
        .queries
        .list_permissions(PermissionFilter::default(), ListQuery::all())
        .await
        .unwrap();
    assert_eq!(remaining, vec![bobs]);

    services.resources.delete_resource(vm.id).await.unwrap();
    let remaining = services
        .queries
        .list_permissions(PermissionFilter::default(), ListQuery::all())
        .await
        .unwrap();
    assert!(remaining.is_empty());

    assert_eq!(
        services.developers.delete_developer(alice.id).await.unwrap_err(),
        DomainError::not_found(EntityKind::Developer, alice.id)
    );
}
