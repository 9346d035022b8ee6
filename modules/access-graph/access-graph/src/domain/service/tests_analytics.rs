#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::float_cmp)]

use access_graph_sdk::{CloudType, LevelDistribution, PermissionLevel};

use crate::test_support::{default_services, grant, seed_developer, seed_resource};

#[tokio::test]
async fn reports_over_an_empty_graph_are_zero_valued() {
    let services = default_services().await;

    let audit = services
        .analytics
        .write_access_audit(None, None)
        .await
        .unwrap();
    assert!(audit.resources.is_empty());
    assert_eq!(audit.total_write_grants, 0);
    assert_eq!(audit.high_risk_count, 0);
    assert_eq!(audit.threshold, 2);

    let footprint = services
        .analytics
        .cloud_footprint(CloudType::Gcp)
        .await
        .unwrap();
    assert_eq!(footprint.resource_count, 0);
    assert_eq!(footprint.total_permissions, 0);
    assert_eq!(footprint.average_permissions_per_resource, 0.0);
    assert!(footprint.subtypes.is_empty());
    assert!(footprint.most_accessed.is_empty());
    assert_eq!(footprint.level_distribution, LevelDistribution::default());

    let review = services
        .analytics
        .high_privilege_review(None)
        .await
        .unwrap();
    assert!(review.developers.is_empty());
    assert_eq!(review.developer_count, 0);
    assert_eq!(review.average_resources_per_developer, 0.0);
    assert_eq!(review.minimum_resources, 5);
}

#[tokio::test]
async fn high_privilege_review_counts_write_capable_edges() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let sql = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;
    grant(&services, &alice, &bucket, PermissionLevel::Read).await;
    grant(&services, &alice, &sql, PermissionLevel::Write).await;
    grant(&services, &bob, &bucket, PermissionLevel::Rw).await;

    let review = services
        .analytics
        .high_privilege_review(Some(2))
        .await
        .unwrap();

    assert_eq!(review.developer_count, 1);
    let flagged = &review.developers[0];
    assert_eq!(flagged.developer, alice);
    assert_eq!(flagged.total_resources, 2);
    assert_eq!(flagged.write_resources, 1);
    assert_eq!(flagged.by_cloud.get(&CloudType::Aws), Some(&1));
    assert_eq!(flagged.by_cloud.get(&CloudType::Gcp), Some(&1));
    assert_eq!(review.average_resources_per_developer, 1.5);
}

#[tokio::test]
async fn high_privilege_review_sorts_by_total_then_id() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;
    let carol = seed_developer(&services, "Carol", "carol@x.com").await;
    let resources = [
        seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await,
        seed_resource(&services, CloudType::Aws, "AWS Lambda Function").await,
        seed_resource(&services, CloudType::Azure, "Azure Blob Storage").await,
    ];
    for r in &resources[..2] {
        grant(&services, &alice, r, PermissionLevel::Read).await;
        grant(&services, &carol, r, PermissionLevel::Read).await;
    }
    for r in &resources {
        grant(&services, &bob, r, PermissionLevel::Write).await;
    }

    let review = services
        .analytics
        .high_privilege_review(Some(1))
        .await
        .unwrap();
    let order: Vec<_> = review.developers.iter().map(|d| d.developer.id).collect();
    assert_eq!(order, vec![bob.id, alice.id, carol.id]);
}

#[tokio::test]
async fn write_access_audit_flags_resources_at_the_threshold() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;
    let carol = seed_developer(&services, "Carol", "carol@x.com").await;
    let bucket = seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    let lambda = seed_resource(&services, CloudType::Aws, "AWS Lambda Function").await;
    let sql = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;
    grant(&services, &alice, &bucket, PermissionLevel::Write).await;
    grant(&services, &bob, &bucket, PermissionLevel::Rw).await;
    grant(&services, &carol, &bucket, PermissionLevel::Read).await;
    grant(&services, &alice, &lambda, PermissionLevel::Rw).await;
    grant(&services, &alice, &sql, PermissionLevel::Write).await;
    grant(&services, &bob, &sql, PermissionLevel::Write).await;

    let audit = services
        .analytics
        .write_access_audit(Some(CloudType::Aws), None)
        .await
        .unwrap();

    assert_eq!(audit.cloud_type, Some(CloudType::Aws));
    assert_eq!(audit.resources.len(), 2);
    assert_eq!(audit.total_write_grants, 3);
    assert_eq!(audit.high_risk_count, 1);

    let bucket_entry = &audit.resources[0];
    assert_eq!(bucket_entry.resource, bucket);
    assert_eq!(bucket_entry.write_count, 2);
    assert!(bucket_entry.high_risk);
    let writers: Vec<_> = bucket_entry
        .write_grants
        .iter()
        .map(|g| (g.developer.id, g.permission))
        .collect();
    assert_eq!(
        writers,
        vec![(alice.id, PermissionLevel::Write), (bob.id, PermissionLevel::Rw)]
    );
    assert!(!audit.resources[1].high_risk);

    let strict = services
        .analytics
        .write_access_audit(None, Some(1))
        .await
        .unwrap();
    assert_eq!(strict.threshold, 1);
    assert_eq!(strict.resources.len(), 3);
    assert_eq!(strict.high_risk_count, 3);
    assert_eq!(strict.total_write_grants, 5);
}

#[tokio::test]
async fn cloud_footprint_groups_by_name_subtype() {
    let services = default_services().await;
    let alice = seed_developer(&services, "Alice", "alice@x.com").await;
    let bob = seed_developer(&services, "Bob", "bob@x.com").await;
    let sql_a = seed_resource(&services, CloudType::Gcp, "GCP Cloud SQL").await;
    let sql_b = seed_resource(&services, CloudType::Gcp, "GCP Cloud Storage").await;
    let odd = seed_resource(&services, CloudType::Gcp, "Bigtable").await;
    seed_resource(&services, CloudType::Aws, "AWS S3 Bucket").await;
    grant(&services, &alice, &sql_a, PermissionLevel::Read).await;
    grant(&services, &bob, &sql_a, PermissionLevel::Rw).await;
    grant(&services, &alice, &odd, PermissionLevel::Write).await;

    let footprint = services
        .analytics
        .cloud_footprint(CloudType::Gcp)
        .await
        .unwrap();

    assert_eq!(footprint.resource_count, 3);
    assert_eq!(footprint.total_permissions, 3);
    assert_eq!(footprint.average_permissions_per_resource, 1.0);
    assert_eq!(footprint.subtypes.get("GCP Cloud"), Some(&2));
    assert_eq!(footprint.subtypes.get("Unknown"), Some(&1));
    assert_eq!(footprint.developer_count, 2);
    assert_eq!(
        footprint.level_distribution,
        LevelDistribution {
            read: 1,
            write: 1,
            rw: 1
        }
    );

    let ranking: Vec<_> = footprint
        .most_accessed
        .iter()
        .map(|c| (c.resource.id, c.permission_count))
        .collect();
    assert_eq!(ranking, vec![(sql_a.id, 2), (odd.id, 1), (sql_b.id, 0)]);
}
