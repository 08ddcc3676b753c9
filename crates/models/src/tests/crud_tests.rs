use crate::db::connect_ephemeral;
use crate::errors::ModelError;
use crate::{shop, vendor, vendor_credentials};
use sea_orm::EntityTrait;
use anyhow::Result;
use uuid::Uuid;

fn sample_shop(name: &str) -> shop::NewShop {
    shop::NewShop {
        name: name.to_string(),
        owner: "Test Owner".into(),
        business_type: "Retail".into(),
        latitude: 28.7041,
        longitude: 77.1025,
    }
}

/// Test vendor create / update / lookup
#[tokio::test]
async fn test_vendor_crud() -> Result<()> {
    let db = connect_ephemeral().await?;

    let v = vendor::create(&db, "Test@Example.com", "Test Vendor").await?;
    assert_eq!(v.email, "Test@example.com");
    assert_eq!(v.created_at, v.updated_at);

    let found = vendor::find_by_email(&db, "Test@example.com").await?;
    assert_eq!(found.map(|m| m.id), Some(v.id));

    let updated = vendor::update_name(&db, v.id, "  Renamed  ").await?;
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, v.email);
    assert!(updated.updated_at >= v.updated_at);

    let missing = vendor::update_name(&db, Uuid::new_v4(), "x").await;
    assert!(matches!(missing, Err(ModelError::NotFound("vendor"))));
    Ok(())
}

/// Duplicate email hits the unique constraint
#[tokio::test]
async fn test_vendor_email_unique() -> Result<()> {
    let db = connect_ephemeral().await?;
    vendor::create(&db, "a@x.com", "A").await?;
    let dup = vendor::create(&db, "a@x.com", "B").await;
    assert!(matches!(dup, Err(ModelError::Duplicate(_))), "got {dup:?}");
    Ok(())
}

/// Credentials upsert keeps a single row per vendor
#[tokio::test]
async fn test_credentials_upsert() -> Result<()> {
    let db = connect_ephemeral().await?;
    let v = vendor::create(&db, "c@x.com", "C").await?;

    let first = vendor_credentials::upsert_password(&db, v.id, "hash-1".into(), "argon2").await?;
    let second = vendor_credentials::upsert_password(&db, v.id, "hash-2".into(), "argon2").await?;
    assert_eq!(first.id, second.id);

    let stored = vendor_credentials::find_by_vendor(&db, v.id).await?.ok_or_else(|| anyhow::anyhow!("missing"))?;
    assert_eq!(stored.password_hash, "hash-2");

    let blank = vendor_credentials::upsert_password(&db, v.id, "  ".into(), "argon2").await;
    assert!(matches!(blank, Err(ModelError::Validation(_))));
    Ok(())
}

/// Shops are listed newest first and carry their vendor
#[tokio::test]
async fn test_shop_listing_order_and_vendor_join() -> Result<()> {
    let db = connect_ephemeral().await?;
    let v = vendor::create(&db, "list@x.com", "Lister").await?;

    let older = shop::create(&db, v.id, sample_shop("Older")).await?;
    let newer = shop::create(&db, v.id, sample_shop("Newer")).await?;

    let listed = shop::list_by_vendor(&db, v.id).await?;
    let ids: Vec<Uuid> = listed.iter().map(|(s, _)| s.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert!(listed.iter().all(|(_, owner)| owner.as_ref().map(|o| o.name.as_str()) == Some("Lister")));
    Ok(())
}

/// Owner-scoped lookup and delete ignore other vendors' rows
#[tokio::test]
async fn test_shop_owner_scoping() -> Result<()> {
    let db = connect_ephemeral().await?;
    let a = vendor::create(&db, "a@x.com", "A").await?;
    let b = vendor::create(&db, "b@x.com", "B").await?;
    let s = shop::create(&db, a.id, sample_shop("A's shop")).await?;

    assert!(shop::find_owned(&db, s.id, a.id).await?.is_some());
    assert!(shop::find_owned(&db, s.id, b.id).await?.is_none());
    assert!(shop::list_by_vendor(&db, b.id).await?.is_empty());

    assert!(!shop::delete_owned(&db, s.id, b.id).await?);
    assert_eq!(shop::count(&db).await?, 1);
    assert!(shop::delete_owned(&db, s.id, a.id).await?);
    assert_eq!(shop::count(&db).await?, 0);
    Ok(())
}

/// Partial changes leave other columns alone and bump updated_at
#[tokio::test]
async fn test_shop_apply_changes() -> Result<()> {
    let db = connect_ephemeral().await?;
    let v = vendor::create(&db, "u@x.com", "U").await?;
    let s = shop::create(&db, v.id, sample_shop("Before")).await?;

    let changes = shop::ShopChanges { name: Some("After".into()), latitude: Some(10.5), ..Default::default() };
    let updated = shop::apply_changes(&db, s.clone(), changes).await?;
    assert_eq!(updated.name, "After");
    assert_eq!(updated.latitude, 10.5);
    assert_eq!(updated.owner, s.owner);
    assert_eq!(updated.longitude, s.longitude);
    assert_eq!(updated.created_at, s.created_at);
    assert!(updated.updated_at >= s.updated_at);
    Ok(())
}

/// Deleting a vendor cascades to shops and credentials
#[tokio::test]
async fn test_vendor_delete_cascades() -> Result<()> {
    let db = connect_ephemeral().await?;
    let v = vendor::create(&db, "gone@x.com", "Gone").await?;
    vendor_credentials::upsert_password(&db, v.id, "hash".into(), "argon2").await?;
    shop::create(&db, v.id, sample_shop("One")).await?;
    shop::create(&db, v.id, sample_shop("Two")).await?;
    assert_eq!(shop::count(&db).await?, 2);

    vendor::hard_delete(&db, v.id).await?;

    assert_eq!(shop::count(&db).await?, 0);
    assert!(vendor_credentials::find_by_vendor(&db, v.id).await?.is_none());
    assert!(vendor::Entity::find_by_id(v.id).one(&db).await?.is_none());
    Ok(())
}
