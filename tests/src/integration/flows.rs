//! # Canvas Flows
//!
//! End-to-end create / update / fetch against the in-memory ledger, with
//! events observed on the shared bus.
//!
//! ## Flows Tested:
//!
//! 1. **Derivation**: deterministic and collision-free over the grid
//! 2. **Create**: validation order, duplicate rejection, address binding
//! 3. **Update**: recolor in place, one event, coordinates fixed
//! 4. **Events**: bus delivery and the per-record ledger history

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    use pc_01_pixel_canvas::prelude::*;
    use shared_bus::{EventFilter, EventTopic, LedgerEvent};

    use crate::init_tracing;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type Service = PixelCanvasService<InMemoryLedger, BusEventSink>;

    fn payer() -> Address {
        Address::from_label("alice")
    }

    fn at(service: &Service, x: u8, y: u8) -> Address {
        service.derive(Coordinate::new(x, y)).unwrap()
    }

    async fn create(
        service: &Service,
        x: u8,
        y: u8,
        color: Color,
    ) -> Result<TransactionReceipt, TransactionFailure> {
        let address = at(service, x, y);
        service
            .create_pixel(payer(), address, Coordinate::new(x, y), color)
            .await
    }

    fn changed(x: u8, y: u8, color: Color) -> PixelChanged {
        PixelChanged {
            x,
            y,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    // =============================================================================
    // DERIVATION
    // =============================================================================

    #[test]
    fn test_derive_is_deterministic_across_instances() {
        let a = create_test_service();
        let b = create_test_service();
        for (x, y) in [(0, 0), (10, 10), (99, 99), (42, 7)] {
            assert_eq!(at(&a, x, y), at(&b, x, y));
        }
    }

    #[test]
    fn test_address_is_the_raw_pixel_derivation() {
        let program_id = pc_01_pixel_canvas::default_program_id();
        let (raw, bump) =
            shared_crypto::find_program_address(&[b"pixel", &[42, 7]], program_id.as_bytes())
                .unwrap();

        let deriver = AddressDeriver::new(program_id);
        assert_eq!(
            deriver.derive_with_bump(Coordinate::new(42, 7)).unwrap(),
            (Address::new(raw), bump)
        );
        assert!(!shared_crypto::is_on_curve(&raw));
    }

    #[test]
    fn test_derive_is_injective_over_grid() {
        let deriver = AddressDeriver::new(pc_01_pixel_canvas::default_program_id());
        let addresses: HashSet<Address> = Coordinate::all()
            .map(|c| deriver.derive(c).unwrap())
            .collect();
        assert_eq!(addresses.len(), 10_000);
    }

    // =============================================================================
    // CREATE
    // =============================================================================

    #[tokio::test]
    async fn test_create_and_fetch() {
        init_tracing();
        let service = create_test_service();

        let receipt = create(&service, 10, 10, Color::new(0, 0, 255)).await.unwrap();
        assert_eq!(receipt.events, vec![changed(10, 10, Color::new(0, 0, 255))]);

        let pixel = service.fetch_pixel(at(&service, 10, 10)).await.unwrap();
        assert_eq!((pixel.x, pixel.y), (10, 10));
        assert_eq!((pixel.r, pixel.g, pixel.b), (0, 0, 255));
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_y() {
        init_tracing();
        let service = create_test_service();

        let failure = create(&service, 0, 200, Color::BLACK).await.unwrap_err();

        assert_eq!(
            failure.error,
            LedgerError::Program(CanvasError::InvalidYCoordinate)
        );
        assert!(failure.error.to_string().contains("between 0-99"));
        assert!(failure.logs_contain("InvalidYCoordinate"));
        assert!(failure.logs_contain("The given Y co-ordinate is not between 0-99."));
        assert_eq!(
            service.fetch_pixel(at(&service, 0, 200)).await,
            Err(LedgerError::AccountNotInitialized(at(&service, 0, 200)))
        );
    }

    #[tokio::test]
    async fn test_create_reports_x_before_y() {
        let service = create_test_service();
        let failure = create(&service, 150, 150, Color::BLACK).await.unwrap_err();
        assert_eq!(
            failure.error,
            LedgerError::Program(CanvasError::InvalidXCoordinate)
        );
        assert!(failure.logs_contain("Error Number: 6000"));
    }

    #[tokio::test]
    async fn test_duplicate_create_is_in_use() {
        init_tracing();
        let service = create_test_service();
        let address = at(&service, 10, 10);
        create(&service, 10, 10, Color::new(0, 0, 255)).await.unwrap();

        let failure = create(&service, 10, 10, Color::new(255, 255, 255))
            .await
            .unwrap_err();

        assert_eq!(failure.error, LedgerError::AccountAlreadyInUse(address));
        assert!(failure.to_string().contains("already in use"));

        let pixel = service.fetch_pixel(address).await.unwrap();
        assert_eq!(pixel.color(), Color::new(0, 0, 255));
        assert_eq!(service.events_for(address).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_at_foreign_address_is_privilege_escalation() {
        let service = create_test_service();
        let wrong = at(&service, 0, 0);

        let failure = service
            .create_pixel(payer(), wrong, Coordinate::new(30, 30), Color::WHITE)
            .await
            .unwrap_err();

        assert!(matches!(
            failure.error,
            LedgerError::PrivilegeEscalation { supplied, expected }
                if supplied == wrong && expected == at(&service, 30, 30)
        ));
        assert_eq!(failure.error.program_error(), None);
        assert_eq!(service.store().account_count().unwrap(), 0);
        assert_eq!(service.stats().await.authorization_failures, 1);
    }

    #[tokio::test]
    async fn test_raw_submit_matches_helper() {
        let service = create_test_service();
        let address = at(&service, 5, 6);
        let instruction = CanvasInstruction::CreatePixel {
            coordinate: Coordinate::new(5, 6),
            color: Color::new(1, 2, 3),
        };
        let tx = Transaction::new(payer(), address, &instruction, 99).unwrap();
        let signature = tx.id();

        let receipt = service.submit(tx).await.unwrap();

        assert_eq!(receipt.signature, signature);
        assert_eq!(receipt.events, vec![changed(5, 6, Color::new(1, 2, 3))]);
        assert_eq!(
            service.events_for(address).await.unwrap()[0].signature,
            signature
        );
    }

    // =============================================================================
    // UPDATE
    // =============================================================================

    #[tokio::test]
    async fn test_update_recolors_and_keeps_position() {
        init_tracing();
        let service = create_test_service();
        let address = at(&service, 30, 40);
        create(&service, 30, 40, Color::new(0, 255, 0)).await.unwrap();

        let mut sub = service.subscribe(EventFilter::topics(vec![EventTopic::Canvas]));
        let receipt = service
            .update_pixel(payer(), address, Color::new(255, 0, 0))
            .await
            .unwrap();

        let expected = changed(30, 40, Color::new(255, 0, 0));
        assert_eq!(receipt.events, vec![expected]);

        let published = sub.drain().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].pixel_changed(), Some(&expected));
        assert_eq!(published[0].address(), Some(address));

        let pixel = service.fetch_pixel(address).await.unwrap();
        assert_eq!(pixel.coordinate(), Coordinate::new(30, 40));
        assert_eq!(pixel.color(), Color::new(255, 0, 0));
    }

    #[tokio::test]
    async fn test_update_missing_pixel() {
        let service = create_test_service();
        let address = at(&service, 9, 9);

        let failure = service
            .update_pixel(payer(), address, Color::WHITE)
            .await
            .unwrap_err();
        assert_eq!(failure.error, LedgerError::AccountNotInitialized(address));
        assert!(service.events_for(address).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_is_in_commit_order() {
        let service = create_test_service();
        let address = at(&service, 1, 1);
        create(&service, 1, 1, Color::BLACK).await.unwrap();
        for shade in [10, 20, 30] {
            service
                .update_pixel(payer(), address, Color::new(shade, shade, shade))
                .await
                .unwrap();
        }

        let history = service.events_for(address).await.unwrap();
        let colors: Vec<u8> = history.iter().map(|e| e.event.r).collect();
        assert_eq!(colors, vec![0, 10, 20, 30]);
        assert!(history.windows(2).all(|w| w[0].slot < w[1].slot));
    }

    // =============================================================================
    // EVENTS
    // =============================================================================

    #[tokio::test]
    async fn test_one_event_per_success_none_per_failure() {
        let service = create_test_service();
        let mut canvas = service.subscribe(EventFilter::topics(vec![EventTopic::Canvas]));

        let attempts = [
            create(&service, 1, 1, Color::BLACK).await.is_ok(),
            create(&service, 1, 1, Color::WHITE).await.is_ok(),
            create(&service, 100, 1, Color::WHITE).await.is_ok(),
            create(&service, 2, 2, Color::WHITE).await.is_ok(),
            service
                .update_pixel(payer(), at(&service, 2, 2), Color::BLACK)
                .await
                .is_ok(),
            service
                .update_pixel(payer(), at(&service, 3, 3), Color::BLACK)
                .await
                .is_ok(),
        ];
        let successes = attempts.iter().filter(|ok| **ok).count();

        assert_eq!(successes, 3);
        assert_eq!(canvas.drain().unwrap().len(), successes);

        let stats = service.stats().await;
        assert_eq!(stats.transactions_committed, 3);
        assert_eq!(stats.transactions_failed, 3);
        assert_eq!(stats.events_emitted, 3);
    }

    #[tokio::test]
    async fn test_event_stream_follows_one_pixel() {
        let service = create_test_service();
        let watched = at(&service, 50, 50);
        let mut stream = service.event_stream(EventFilter::for_addresses(vec![watched]));

        create(&service, 49, 50, Color::WHITE).await.unwrap();
        create(&service, 50, 50, Color::new(7, 8, 9)).await.unwrap();

        let event = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("event");
        match event {
            LedgerEvent::PixelChanged {
                address, event, ..
            } => {
                assert_eq!(address, watched);
                assert_eq!(event, changed(50, 50, Color::new(7, 8, 9)));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
