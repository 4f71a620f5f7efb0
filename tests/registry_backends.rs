//! Registry contract tests across all three backends.
//! Every backend must present identical semantics to the lifecycle engine:
//! absence as Ok(None), insertion-ordered sender listings, and
//! MissingRecord on updates against vanished rows.

use parceltrack::core::errors::StorageError;
use parceltrack::core::ident::IdentifierGenerator;
use parceltrack::core::models::{Parcel, ParcelStatus};
use parceltrack::registry::jsonfile::JsonFileRegistry;
use parceltrack::registry::memory::MemoryRegistry;
use parceltrack::registry::sqlite::SqliteRegistry;
use parceltrack::registry::ParcelRegistry;
use parceltrack::utils::time;

// --- Helpers ---

fn sample_parcel(sender_id: &str, description: &str) -> Parcel {
    let idgen = IdentifierGenerator::new();
    let tracking_id = idgen.new_tracking_id();
    let now = time::now();
    Parcel {
        id: idgen.new_id(),
        qr_code_path: format!("qrcodes/{tracking_id}.png"),
        tracking_id,
        sender_id: sender_id.to_string(),
        recipient_name: "Bob".to_string(),
        destination_address: "123 Main St".to_string(),
        weight: 2.5,
        description: description.to_string(),
        status: ParcelStatus::Created,
        delivery_otp: None,
        otp_generated_at: None,
        created_at: now,
        updated_at: now,
    }
}

async fn exercise_contract(registry: &dyn ParcelRegistry) {
    // 1. Empty registry: every read is an absence, not an error.
    assert!(registry.list_all().await.unwrap().is_empty());
    assert!(registry
        .get_by_tracking_id("TRK-UNKNOWN1")
        .await
        .unwrap()
        .is_none());

    // 2. Inserts and point lookups.
    let a = sample_parcel("u1", "Books");
    let b = sample_parcel("u1", "Lamp");
    let c = sample_parcel("u2", "Cables");
    registry.insert(&a).await.unwrap();
    registry.insert(&b).await.unwrap();
    registry.insert(&c).await.unwrap();

    let found = registry
        .get_by_tracking_id(a.tracking_id.as_str())
        .await
        .unwrap()
        .expect("inserted parcel resolves");
    assert_eq!(found, a);
    assert_eq!(registry.get_by_id(&b.id).await.unwrap().unwrap(), b);

    // 3. Sender listing preserves insertion order.
    let mine = registry.list_by_sender("u1").await.unwrap();
    assert_eq!(
        mine.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![a.id, b.id]
    );
    assert_eq!(registry.list_all().await.unwrap().len(), 3);

    // 4. Update replaces the stored record in place.
    let mut delivered = b.clone();
    delivered.status = ParcelStatus::Delivered;
    delivered.delivery_otp = Some("123456".to_string());
    delivered.otp_generated_at = Some(time::now());
    delivered.updated_at = time::now();
    registry.update(&delivered).await.unwrap();
    let reread = registry.get_by_id(&b.id).await.unwrap().unwrap();
    assert_eq!(reread.status, ParcelStatus::Delivered);
    assert_eq!(reread.delivery_otp.as_deref(), Some("123456"));
    assert_eq!(reread.created_at, b.created_at);

    // 5. Updating a record that was never stored is a storage error.
    let ghost = sample_parcel("u9", "Ghost");
    match registry.update(&ghost).await {
        Err(StorageError::MissingRecord(id)) => assert_eq!(id, ghost.id.to_string()),
        other => panic!("expected MissingRecord, got {:?}", other.err()),
    }
}

// --- Tests ---

#[tokio::test]
async fn memory_backend_satisfies_contract() {
    exercise_contract(&MemoryRegistry::new()).await;
}

#[tokio::test]
async fn jsonfile_backend_satisfies_contract() {
    let dir = tempfile::tempdir().unwrap();
    let registry = JsonFileRegistry::open(dir.path().join("parcels.json")).unwrap();
    exercise_contract(&registry).await;
}

#[tokio::test]
async fn sqlite_backend_satisfies_contract() {
    let registry = SqliteRegistry::open_in_memory().unwrap();
    exercise_contract(&registry).await;
}

#[tokio::test]
async fn jsonfile_registry_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parcels.json");
    let parcel = sample_parcel("u1", "Books");

    {
        let registry = JsonFileRegistry::open(&path).unwrap();
        registry.insert(&parcel).await.unwrap();
    }

    let reopened = JsonFileRegistry::open(&path).unwrap();
    let found = reopened
        .get_by_tracking_id(parcel.tracking_id.as_str())
        .await
        .unwrap()
        .expect("record persisted across reopen");
    assert_eq!(found, parcel);
}

#[tokio::test]
async fn sqlite_registry_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parcels.db");
    let mut parcel = sample_parcel("u1", "Books");

    {
        let registry = SqliteRegistry::open(&path).unwrap();
        registry.insert(&parcel).await.unwrap();
        parcel.status = ParcelStatus::from("In Transit");
        parcel.updated_at = time::now();
        registry.update(&parcel).await.unwrap();
    }

    let reopened = SqliteRegistry::open(&path).unwrap();
    let found = reopened.get_by_id(&parcel.id).await.unwrap().unwrap();
    assert_eq!(found.status.as_str(), "In Transit");
    assert_eq!(found.tracking_id, parcel.tracking_id);
}

#[tokio::test]
async fn sqlite_rejects_duplicate_tracking_codes() {
    // Uniqueness is established by the generator; the store only surfaces
    // a violation as a storage error.
    let registry = SqliteRegistry::open_in_memory().unwrap();
    let a = sample_parcel("u1", "Books");
    let mut b = sample_parcel("u1", "Lamp");
    b.tracking_id = a.tracking_id.clone();

    registry.insert(&a).await.unwrap();
    assert!(matches!(
        registry.insert(&b).await,
        Err(StorageError::Sqlite(_))
    ));
}
