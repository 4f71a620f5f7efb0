use async_trait::async_trait;
use parceltrack::config::Config;
use parceltrack::core::errors::{NotifyError, ParcelError};
use parceltrack::core::lifecycle::ParcelLifecycle;
use parceltrack::core::models::{Contact, Parcel, ParcelDraft, ParcelStatus};
use parceltrack::core::traits::NotificationGateway;
use parceltrack::notify::directory::StaticUserDirectory;
use parceltrack::registry::memory::MemoryRegistry;
use proptest::prelude::*;
use std::sync::Arc;
use tokio::runtime::Runtime;

struct NullGateway;

#[async_trait]
impl NotificationGateway for NullGateway {
    async fn notify_created(&self, _: &Contact, _: &Parcel) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn notify_out_for_delivery(
        &self,
        _: &Contact,
        _: &Parcel,
        _: &str,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}

fn build_engine() -> ParcelLifecycle {
    let config = Arc::new(Config {
        qr_code_dir: std::env::temp_dir().join("parceltrack-prop-qr"),
        ..Config::default()
    });
    ParcelLifecycle::new(
        config,
        Arc::new(MemoryRegistry::new()),
        Arc::new(StaticUserDirectory::new()),
        Arc::new(NullGateway),
    )
}

fn is_tracking_format(code: &str) -> bool {
    code.len() == 12
        && code.starts_with("TRK-")
        && code[4..]
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

proptest! {
    #[test]
    fn valid_drafts_always_create_fresh_parcels(
        sender in "[a-z0-9]{1,12}",
        recipient in "[A-Za-z]{1,16}",
        address in "[A-Za-z0-9]{1,24}",
        weight in 0.001f64..5_000.0,
        description in "[A-Za-z0-9]{1,24}",
    ) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let engine = build_engine();
            let parcel = engine
                .create(ParcelDraft {
                    sender_id: sender,
                    recipient_name: recipient,
                    destination_address: address,
                    weight,
                    description,
                })
                .await
                .expect("valid draft must create");

            assert_eq!(parcel.status, ParcelStatus::Created);
            assert!(is_tracking_format(parcel.tracking_id.as_str()));
            assert_eq!(parcel.created_at, parcel.updated_at);
            assert!(parcel.delivery_otp.is_none());
        });
    }

    #[test]
    fn non_positive_weight_always_fails_validation(
        weight in -5_000.0f64..=0.0,
    ) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let engine = build_engine();
            let result = engine
                .create(ParcelDraft {
                    sender_id: "u1".to_string(),
                    recipient_name: "Bob".to_string(),
                    destination_address: "123 Main St".to_string(),
                    weight,
                    description: "Books".to_string(),
                })
                .await;

            match result {
                Err(ParcelError::Validation { fields }) => {
                    assert!(fields.contains(&"weight".to_string()));
                }
                _ => panic!("weight {} must be rejected", weight),
            }
            // Nothing was persisted.
            assert!(engine.list_all().await.unwrap().is_empty());
        });
    }

    #[test]
    fn minted_otps_are_always_six_digit_and_self_verifying(_seed in 0..50u32) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let engine = build_engine();
            let parcel = engine
                .create(ParcelDraft {
                    sender_id: "u1".to_string(),
                    recipient_name: "Bob".to_string(),
                    destination_address: "123 Main St".to_string(),
                    weight: 1.0,
                    description: "Books".to_string(),
                })
                .await
                .unwrap();
            let tracking = parcel.tracking_id.as_str().to_string();

            let updated = engine
                .update_status(&tracking, ParcelStatus::OutForDelivery)
                .await
                .unwrap()
                .unwrap();
            let otp = updated.delivery_otp.unwrap();
            let value: u32 = otp.parse().expect("otp is numeric");
            assert!((100_000..=999_999).contains(&value));
            assert!(engine.verify_delivery_otp(&tracking, &otp).await);

            // Any other 6-digit code fails the exact-match check.
            let other = if value == 999_999 { value - 1 } else { value + 1 };
            assert!(!engine.verify_delivery_otp(&tracking, &other.to_string()).await);
        });
    }
}
