#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;

use access_graph_sdk::{CloudType, EntityKind, ListQuery, PermissionFilter, PermissionLevel};

use crate::domain::error::DomainError;
use crate::test_support::{default_services, grant, seed_developer, seed_resource};

#[tokio::test]
async fn by_developer_and_by_resource_are_inverses() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let vm = seed_resource(&services, CloudType::Azure, "Azure Virtual Machine").await;
    let sql = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;
    grant(&services, &alice, &bucket, PermissionLevel::Read).await;
    grant(&services, &alice, &sql, PermissionLevel::Rw).await;
    grant(&services, &bob, &bucket, PermissionLevel::Write).await;
    grant(&services, &bob, &vm, PermissionLevel::Read).await;

    let mut from_developers = BTreeSet::new();
    for dev in [&alice, &bob] {
        for p in services.queries.permissions_for_developer(dev.id).await.unwrap() {
            assert_eq!(p.permission.developer_id, dev.id);
            assert_eq!(p.permission.resource_id, p.cloud_resource.id);
            from_developers.insert((dev.id, p.cloud_resource.id, p.permission.id));
        }
    }

    let mut from_resources = BTreeSet::new();
    for res in [&bucket, &vm, &sql] {
        for p in services.queries.permissions_for_resource(res.id).await.unwrap() {
            assert_eq!(p.permission.resource_id, res.id);
            from_resources.insert((p.developer.id, res.id, p.permission.id));
        }
    }

    assert_eq!(from_developers.len(), 4);
    assert_eq!(from_developers, from_resources);
}

#[tokio::test]
async fn edge_listings_follow_insertion_order() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let sql = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let first = grant(&services, &alice, &sql, PermissionLevel::Read).await;
    let second = grant(&services, &alice, &bucket, PermissionLevel::Write).await;

    let ids: Vec<_> = services
        .queries
        .permissions_for_developer(alice.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.permission.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn queries_on_missing_entities_are_not_found() {
    let services = default_services().await;

    assert_eq!(
        services.queries.permissions_for_developer(5).await.unwrap_err(),
        DomainError::not_found(EntityKind::Developer, 5)
    );
    assert_eq!(
        services.queries.permissions_for_resource(6).await.unwrap_err(),
        DomainError::not_found(EntityKind::CloudResource, 6)
    );
    assert!(services.queries.developer_detailed(5).await.unwrap_err().is_not_found());
    assert!(services.queries.resource_detailed(6).await.unwrap_err().is_not_found());
    assert!(services
        .queries
        .resources_for_developer(5, None)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn existing_entity_without_edges_yields_empty_lists() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;

    assert!(services.queries.permissions_for_developer(alice.id).await.unwrap().is_empty());
    assert!(services.queries.permissions_for_resource(bucket.id).await.unwrap().is_empty());

    let detailed = services.queries.developer_detailed(alice.id).await.unwrap();
    assert_eq!(detailed.developer, alice);
    assert!(detailed.permissions.is_empty());
}

#[tokio::test]
async fn resources_can_be_filtered_by_cloud() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let lambda = seed_resource(&services, CloudType::Aws, "AWS Lambda Function").await;
    let sql = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;
    grant(&services, &alice, &bucket, PermissionLevel::Read).await;
    grant(&services, &alice, &sql, PermissionLevel::Write).await;

    let aws = services
        .queries
        .list_resources(Some(CloudType::Aws), ListQuery::all())
        .await
        .unwrap();
    assert_eq!(aws, vec![bucket.clone(), lambda]);

    let reachable = services
        .queries
        .resources_for_developer(alice.id, Some(CloudType::Aws))
        .await
        .unwrap();
    assert_eq!(reachable.total_resources, 1);
    assert_eq!(reachable.resources[0].cloud_resource, bucket);
    assert_eq!(reachable.cloud_type, Some(CloudType::Aws));

    let everything = services
        .queries
        .resources_for_developer(alice.id, None)
        .await
        .unwrap();
    assert_eq!(everything.total_resources, 2);

    let azure = services
        .queries
        .resources_for_developer(alice.id, Some(CloudType::Azure))
        .await
        .unwrap();
    assert_eq!(azure.total_resources, 0);
}

#[tokio::test]
async fn permission_filters_combine_with_and() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let sql = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;
    let a_bucket = grant(&services, &alice, &bucket, PermissionLevel::Read).await;
    let a_sql = grant(&services, &alice, &sql, PermissionLevel::Rw).await;
    let b_bucket = grant(&services, &bob, &bucket, PermissionLevel::Write).await;

    let list = |developer_id, resource_id| {
        let services = &services;
        async move {
            services
                .queries
                .list_permissions(
                    PermissionFilter {
                        developer_id,
                        resource_id,
                    },
                    ListQuery::all(),
                )
                .await
                .unwrap()
        }
    };

    assert_eq!(list(None, None).await.len(), 3);
    assert_eq!(list(Some(alice.id), None).await, vec![a_bucket.clone(), a_sql]);
    assert_eq!(list(None, Some(bucket.id)).await, vec![a_bucket, b_bucket.clone()]);
    assert_eq!(list(Some(bob.id), Some(bucket.id)).await, vec![b_bucket]);
    assert!(list(Some(bob.id), Some(sql.id)).await.is_empty());
}

#[tokio::test]
async fn list_windows_skip_and_limit() {
    let services = default_services().await;
    for i in 0..5 {
        seed_developer(&services, &format!("Dev {i}"), &format!("dev{i}@x.com")).await;
    }

    let page = services
        .queries
        .list_developers(ListQuery::page(1, 2))
        .await
        .unwrap();
    let names: Vec<_> = page.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Dev 1", "Dev 2"]);

    let tail = services
        .queries
        .list_developers(ListQuery {
            skip: 4,
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(tail.len(), 1);
}

#[tokio::test]
async fn offsets_past_the_store_range_yield_empty_pages() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    grant(&services, &alice, &bucket, PermissionLevel::Read).await;

    let huge = ListQuery::page(u64::MAX, u64::MAX);
    let open_ended = ListQuery {
        skip: u64::MAX,
        limit: None,
    };

    for query in [huge, open_ended] {
        assert!(services.queries.list_developers(query).await.unwrap().is_empty());
        assert!(
            services
                .queries
                .list_resources(None, query)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            services
                .queries
                .list_permissions(PermissionFilter::default(), query)
                .await
                .unwrap()
                .is_empty()
        );
    }

    let everything = ListQuery::page(0, u64::MAX);
    assert_eq!(
        services.queries.list_developers(everything).await.unwrap(),
        vec![alice]
    );
}
