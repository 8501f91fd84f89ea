//! # Concurrent Transactions
//!
//! Many tasks hitting one shared ledger. The ledger, not the program,
//! decides who wins a race; these tests check it decides exactly once.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use pc_01_pixel_canvas::prelude::*;
    use shared_bus::{EventFilter, EventTopic, LedgerEvent};
    use shared_types::entities::Slot;
    use tokio::task::JoinSet;

    use crate::init_tracing;

    type Service = PixelCanvasService<InMemoryLedger, BusEventSink>;

    fn shared_service() -> Arc<Service> {
        Arc::new(create_test_service())
    }

    fn payer(i: u8) -> Address {
        Address::new([i; 32])
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_creates_exactly_one_wins() {
        init_tracing();
        const RACERS: u8 = 32;

        let service = shared_service();
        let coordinate = Coordinate::new(12, 34);
        let address = service.derive(coordinate).unwrap();
        let mut canvas = service.subscribe(EventFilter::topics(vec![EventTopic::Canvas]));

        let mut tasks = JoinSet::new();
        for i in 0..RACERS {
            let service = Arc::clone(&service);
            tasks.spawn(async move {
                let color = Color::new(i, i, i);
                let outcome = service
                    .create_pixel(payer(i), address, coordinate, color)
                    .await;
                (color, outcome)
            });
        }

        let mut winners = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (color, outcome) = joined.unwrap();
            match outcome {
                Ok(_) => winners.push(color),
                Err(failure) => {
                    assert_eq!(failure.error, LedgerError::AccountAlreadyInUse(address));
                }
            }
        }

        assert_eq!(winners.len(), 1);
        let pixel = service.fetch_pixel(address).await.unwrap();
        assert_eq!(pixel.color(), winners[0]);
        assert_eq!(service.events_for(address).await.unwrap().len(), 1);
        assert_eq!(canvas.drain().unwrap().len(), 1);

        let stats = service.stats().await;
        assert_eq!(stats.pixels_created, 1);
        assert_eq!(stats.allocation_conflicts, u64::from(RACERS) - 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_distinct_addresses_do_not_conflict() {
        let service = shared_service();

        let mut tasks = JoinSet::new();
        for x in 0..100u8 {
            let service = Arc::clone(&service);
            tasks.spawn(async move {
                let coordinate = Coordinate::new(x, 0);
                let address = service.derive(coordinate).unwrap();
                service
                    .create_pixel(payer(x), address, coordinate, Color::WHITE)
                    .await
            });
        }

        let mut slots: HashSet<Slot> = HashSet::new();
        while let Some(joined) = tasks.join_next().await {
            let receipt = joined.unwrap().unwrap();
            assert!(slots.insert(receipt.slot));
        }

        assert_eq!(slots.len(), 100);
        assert_eq!(service.store().account_count().unwrap(), 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_updates_are_linearized() {
        let service = shared_service();
        let coordinate = Coordinate::new(7, 7);
        let address = service.derive(coordinate).unwrap();
        service
            .create_pixel(payer(0), address, coordinate, Color::BLACK)
            .await
            .unwrap();

        let mut canvas = service.subscribe(EventFilter::for_addresses(vec![address]));

        let mut tasks = JoinSet::new();
        for i in 1..=20u8 {
            let service = Arc::clone(&service);
            tasks.spawn(async move {
                service
                    .update_pixel(payer(i), address, Color::new(i, 0, 0))
                    .await
            });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
        }

        let history = service.events_for(address).await.unwrap();
        assert_eq!(history.len(), 21);
        assert!(history.windows(2).all(|w| w[0].slot < w[1].slot));

        // The stored color is whatever committed last, and no update moved
        // the pixel.
        let last = history.last().unwrap().event;
        let pixel = service.fetch_pixel(address).await.unwrap();
        assert_eq!(pixel.color(), Color::new(last.r, last.g, last.b));
        assert!(history.iter().all(|e| (e.event.x, e.event.y) == (7, 7)));

        // Bus delivery order matches commit order.
        let delivered: Vec<Slot> = canvas
            .drain()
            .unwrap()
            .into_iter()
            .filter_map(|event| match event {
                LedgerEvent::PixelChanged { slot, .. } => Some(slot),
                _ => None,
            })
            .collect();
        assert_eq!(delivered.len(), 20);
        assert!(delivered.windows(2).all(|w| w[0] < w[1]));
    }
}
