//! # Property Tests
//!
//! Randomized checks over the derivation rule and the create/update state
//! machine.

#[cfg(test)]
mod tests {
    use pc_01_pixel_canvas::prelude::*;
    use proptest::prelude::*;
    use shared_bus::{EventFilter, EventTopic};
    use tokio::runtime::Runtime;

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    fn color() -> impl Strategy<Value = Color> {
        any::<(u8, u8, u8)>().prop_map(Color::from)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn derive_is_deterministic(x in any::<u8>(), y in any::<u8>()) {
            let deriver = AddressDeriver::new(pc_01_pixel_canvas::default_program_id());
            let c = Coordinate::new(x, y);
            prop_assert_eq!(deriver.derive(c).unwrap(), deriver.derive(c).unwrap());
        }

        #[test]
        fn distinct_coordinates_derive_distinct_addresses(
            a in (0..=MAX_POS, 0..=MAX_POS),
            b in (0..=MAX_POS, 0..=MAX_POS),
        ) {
            prop_assume!(a != b);
            let deriver = AddressDeriver::new(pc_01_pixel_canvas::default_program_id());
            prop_assert_ne!(
                deriver.derive(Coordinate::new(a.0, a.1)).unwrap(),
                deriver.derive(Coordinate::new(b.0, b.1)).unwrap()
            );
        }

        #[test]
        fn create_succeeds_iff_in_range(x in any::<u8>(), y in any::<u8>(), c in color()) {
            let service = create_test_service();
            let coordinate = Coordinate::new(x, y);
            let address = service.derive(coordinate).unwrap();

            let outcome = runtime().block_on(
                service.create_pixel(Address::ZERO, address, coordinate, c),
            );

            match outcome {
                Ok(receipt) => {
                    prop_assert!(coordinate.is_valid());
                    prop_assert_eq!(receipt.events.len(), 1);
                }
                Err(failure) => {
                    let expected = if x > MAX_POS {
                        CanvasError::InvalidXCoordinate
                    } else {
                        CanvasError::InvalidYCoordinate
                    };
                    prop_assert!(!coordinate.is_valid());
                    prop_assert_eq!(failure.error, LedgerError::Program(expected));
                }
            }
        }

        #[test]
        fn updates_never_move_a_pixel(
            x in 0..=MAX_POS,
            y in 0..=MAX_POS,
            initial in color(),
            updates in prop::collection::vec(color(), 1..8),
        ) {
            let service = create_test_service();
            let coordinate = Coordinate::new(x, y);
            let address = service.derive(coordinate).unwrap();
            let mut canvas = service.subscribe(EventFilter::topics(vec![EventTopic::Canvas]));

            let rt = runtime();
            rt.block_on(service.create_pixel(Address::ZERO, address, coordinate, initial))
                .unwrap();
            for next in &updates {
                rt.block_on(service.update_pixel(Address::ZERO, address, *next))
                    .unwrap();
            }

            let pixel = rt.block_on(service.fetch_pixel(address)).unwrap();
            prop_assert_eq!(pixel.coordinate(), coordinate);
            prop_assert_eq!(Some(pixel.color()), updates.last().copied());
            prop_assert_eq!(canvas.drain().unwrap().len(), updates.len() + 1);
        }
    }
}
