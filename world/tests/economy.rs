use glam::Vec2;
use lane_defence_core::{
    Command, Event, StructureId, StructureKind, UpgradeError, UpgradePath, UPGRADE_LEVEL_CAP,
};
use lane_defence_world::{self as world, query, World, WorldConfig};
use proptest::prelude::*;

const OPEN_GROUND: Vec2 = Vec2::new(100.0, 600.0);

fn world_with_currency(currency: u32) -> World {
    let config = WorldConfig {
        starting_currency: currency,
        ..WorldConfig::default()
    };
    World::from_config(&config).expect("default config is valid")
}

fn place(world: &mut World, kind: StructureKind) -> StructureId {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceStructure {
            kind,
            position: OPEN_GROUND,
        },
        &mut events,
    );
    match events.as_slice() {
        [Event::StructurePlaced { structure, .. }] => *structure,
        other => panic!("placement failed: {other:?}"),
    }
}

fn purchase(world: &mut World, structure: StructureId, path: UpgradePath) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PurchaseUpgrade { structure, path },
        &mut events,
    );
    events
}

#[test]
fn placement_then_upgrade_scenario() {
    let mut world = World::new();
    let structure = place(&mut world, StructureKind::Cane);
    assert_eq!(query::stats(&world).currency, 250);

    let events = purchase(&mut world, structure, UpgradePath::FireRate);
    assert_eq!(
        events,
        vec![Event::UpgradePurchased {
            structure,
            path: UpgradePath::FireRate,
            level: 1,
            cost: 50,
        }]
    );
    let snapshot = query::structure(&world, structure).expect("structure exists");
    assert_eq!(query::stats(&world).currency, 200);
    assert!((snapshot.fire_rate - 1.2).abs() < 1e-6);
    assert_eq!(snapshot.committed_path, Some(UpgradePath::FireRate));

    let events = purchase(&mut world, structure, UpgradePath::Secondary);
    assert_eq!(
        events,
        vec![Event::UpgradeRejected {
            structure,
            path: UpgradePath::Secondary,
            reason: UpgradeError::PathLocked,
        }]
    );
    assert_eq!(query::stats(&world).currency, 200);
}

#[test]
fn unaffordable_upgrade_leaves_state_untouched() {
    let mut world = world_with_currency(60);
    let structure = place(&mut world, StructureKind::Cane);
    let before = query::structure(&world, structure).expect("structure exists");

    let events = purchase(&mut world, structure, UpgradePath::Range);
    assert_eq!(
        events,
        vec![Event::UpgradeRejected {
            structure,
            path: UpgradePath::Range,
            reason: UpgradeError::InsufficientFunds,
        }]
    );
    assert_eq!(query::structure(&world, structure), Some(before));
    assert_eq!(query::stats(&world).currency, 10);
}

#[test]
fn upgrade_offers_reflect_lock_and_price() {
    let mut world = world_with_currency(10_000);
    let structure = place(&mut world, StructureKind::Trap);
    let _ = purchase(&mut world, structure, UpgradePath::Secondary);

    let offers = query::upgrade_offers(&world, structure).expect("structure exists");
    assert!(offers[0].locked);
    assert!(offers[2].locked);
    assert!(offers[1].available());
    assert_eq!(offers[1].level, 1);
    assert_eq!(offers[1].cost, 200);
}

proptest! {
    #[test]
    fn sell_value_is_half_of_investment(
        kind_index in 0usize..3,
        path_index in 0usize..3,
        purchases in 0usize..14,
    ) {
        let kind = StructureKind::ALL[kind_index];
        let path = UpgradePath::ALL[path_index];
        let mut world = world_with_currency(1_000_000);
        let structure = place(&mut world, kind);

        let mut invested = kind.cost();
        for _ in 0..purchases {
            for event in purchase(&mut world, structure, path) {
                if let Event::UpgradePurchased { cost, .. } = event {
                    invested += cost;
                }
            }
        }

        let snapshot = query::structure(&world, structure).expect("structure exists");
        prop_assert_eq!(snapshot.invested, invested);
        prop_assert_eq!(snapshot.sell_value(), invested / 2);
        prop_assert!(snapshot.levels[path.index()] <= UPGRADE_LEVEL_CAP);

        let before = query::stats(&world).currency;
        let mut events = Vec::new();
        world::apply(&mut world, Command::SellStructure { structure }, &mut events);
        prop_assert_eq!(query::stats(&world).currency, before + invested / 2);
    }

    #[test]
    fn upgrade_cost_is_unit_times_next_level(
        kind_index in 0usize..3,
        path_index in 0usize..3,
        purchases in 1usize..=10,
    ) {
        let kind = StructureKind::ALL[kind_index];
        let path = UpgradePath::ALL[path_index];
        let mut world = world_with_currency(1_000_000);
        let structure = place(&mut world, kind);

        for level in 0..purchases {
            let before = query::stats(&world).currency;
            let events = purchase(&mut world, structure, path);
            let expected = kind.upgrade_unit_cost(path) * (level as u32 + 1);
            prop_assert_eq!(
                events,
                vec![Event::UpgradePurchased {
                    structure,
                    path,
                    level: level as u8 + 1,
                    cost: expected,
                }]
            );
            prop_assert_eq!(query::stats(&world).currency, before - expected);
        }
    }

    #[test]
    fn committed_path_rejects_others_regardless_of_currency(
        first in 0usize..3,
        second in 0usize..3,
        currency in 400u32..1_000_000,
    ) {
        prop_assume!(first != second);
        let mut world = world_with_currency(currency);
        let structure = place(&mut world, StructureKind::Cane);
        let _ = purchase(&mut world, structure, UpgradePath::ALL[first]);

        let before = query::stats(&world).currency;
        let events = purchase(&mut world, structure, UpgradePath::ALL[second]);
        prop_assert_eq!(
            events,
            vec![Event::UpgradeRejected {
                structure,
                path: UpgradePath::ALL[second],
                reason: UpgradeError::PathLocked,
            }]
        );
        prop_assert_eq!(query::stats(&world).currency, before);
    }
}
