//! Multi-tick growth scenarios over whole sessions.
//!
//! These tests pin down the claim order, contested borders and the
//! resumability of budgeted growth.
//!
//! Run with: cargo test --release growth_scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use imperium::sim::check_invariants;
use imperium::{Color, Coord, CostTable, EmpireId, EmpireSpec, Session, TerrainType};

fn plains(width: usize, height: usize) -> String {
    let row = "P".repeat(width);
    (0..height).map(|_| format!("{row}\n")).collect()
}

fn empire(id: EmpireId, x: u32, y: u32, cost: u32) -> EmpireSpec {
    EmpireSpec {
        costs: Some(CostTable::uniform(cost)),
        seed_budget: Some(0.0),
        ..EmpireSpec::new(id, Color::WHITE, Coord::new(x, y))
    }
}

fn manhattan(a: Coord, b: Coord) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[test]
fn test_center_capital_budget_40() {
    let mut session = Session::new(&plains(3, 3)).unwrap();
    session.place_capital(&empire(1, 1, 1, 10)).unwrap();
    session.grow(40.0);

    let field = session.ownership();
    assert_eq!(field.owner(Coord::new(1, 1)), Some(1));
    assert_eq!(field.distance(Coord::new(1, 1)), Some(10.0));
    for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
        assert_eq!(field.owner(Coord::new(x, y)), Some(1));
        assert_eq!(field.distance(Coord::new(x, y)), Some(20.0));
    }
    for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
        assert_eq!(field.owner(Coord::new(x, y)), None);
        assert!(field.distance(Coord::new(x, y)).unwrap().is_infinite());
    }
}

#[test]
fn test_flood_fill_claims_in_cost_order() {
    let mut session = Session::new(&plains(9, 9)).unwrap();
    let capital = Coord::new(4, 4);
    session.place_capital(&empire(1, 4, 4, 10)).unwrap();

    // Each tick buys exactly one cell; recorded distances never decrease.
    let mut last = 0.0;
    for _ in 0..40 {
        let before: Vec<_> = session.ownership().owners().to_vec();
        session.grow(10.0);
        let after = session.ownership().owners();
        let new: Vec<usize> = (0..after.len())
            .filter(|&i| before[i].is_none() && after[i].is_some())
            .collect();
        assert_eq!(new.len(), 1);

        let distance = session.ownership().distances()[new[0]];
        assert!(distance >= last);
        last = distance;
    }

    for y in 0..9 {
        for x in 0..9 {
            let coord = Coord::new(x, y);
            if let Some(distance) = session.ownership().distance(coord).filter(|d| d.is_finite()) {
                assert_eq!(distance, f64::from(10 * (manhattan(coord, capital) + 1)));
            }
        }
    }
}

#[test]
fn test_two_capitals_split_by_cost() {
    let (width, height) = (7u32, 4u32);
    let mut session = Session::new(&plains(width as usize, height as usize)).unwrap();
    let left = Coord::new(0, 0);
    let right = Coord::new(width - 1, 0);
    session.place_capital(&empire(2, right.x, right.y, 10)).unwrap();
    session.place_capital(&empire(1, left.x, left.y, 10)).unwrap();

    for _ in 0..10 {
        session.grow(25.0);
    }

    for y in 0..height {
        for x in 0..width {
            let coord = Coord::new(x, y);
            let expected = if manhattan(coord, left) <= manhattan(coord, right) {
                1
            } else {
                2
            };
            assert_eq!(session.ownership().owner(coord), Some(expected), "cell {x},{y}");
        }
    }
    assert!(check_invariants(session.engine()).is_empty());
}

#[test]
fn test_cheap_empire_pushes_border() {
    let mut session = Session::new(&plains(10, 1)).unwrap();
    session.place_capital(&empire(1, 0, 0, 10)).unwrap();
    session.place_capital(&empire(2, 9, 0, 5)).unwrap();
    session.grow(10_000.0);

    // Empire 2 reaches x at 5 * (10 - x); empire 1 at 10 * (x + 1).
    let owners: Vec<_> = session.ownership().owners().iter().map(|o| o.unwrap()).collect();
    assert_eq!(owners, vec![1, 1, 1, 2, 2, 2, 2, 2, 2, 2]);
}

#[test]
fn test_late_cheap_empire_overwrites() {
    let mut session = Session::new(&plains(8, 1)).unwrap();
    session
        .place_capital(&EmpireSpec {
            seed_budget: Some(30.0),
            ..empire(1, 0, 0, 10)
        })
        .unwrap();
    assert_eq!(session.territory(1), Some(4));

    // Empire 2 reaches every cell more cheaply, the capital included.
    session.place_capital(&empire(2, 7, 0, 1)).unwrap();
    let report = session.grow(1_000.0);

    assert_eq!(report.overwritten, 4);
    assert_eq!(report.eliminated, vec![1]);
    assert_eq!(session.territory(1), Some(0));
    assert!(!session.empire(1).unwrap().alive);
    assert_eq!(session.territory(2), Some(8));
    assert_eq!(session.ownership().distance(Coord::new(0, 0)), Some(8.0));
    assert!(check_invariants(session.engine()).is_empty());
}

#[test]
fn test_water_barrier_and_unconfigured_terrain() {
    let map = "PWP\n";
    let mut session = Session::new(map).unwrap();
    let spec = EmpireSpec {
        costs: Some(CostTable {
            water: Some(4),
            plain: Some(10),
            ..CostTable::default()
        }),
        seed_budget: Some(1_000.0),
        ..EmpireSpec::new(1, Color::WHITE, Coord::new(0, 0))
    };
    session.place_capital(&spec).unwrap();

    let field = session.ownership();
    assert_eq!(field.distance(Coord::new(1, 0)), Some(22.0));
    assert_eq!(field.distance(Coord::new(2, 0)), Some(32.0));

    // Unconfigured terrain costs 999 but is not impassable.
    let mut session = Session::new("PFP\n").unwrap();
    let spec = EmpireSpec {
        costs: Some(CostTable {
            plain: Some(1),
            ..CostTable::default()
        }),
        seed_budget: Some(2_000.0),
        ..EmpireSpec::new(1, Color::WHITE, Coord::new(0, 0))
    };
    session.place_capital(&spec).unwrap();
    assert_eq!(session.ownership().distance(Coord::new(1, 0)), Some(1_000.0));
    assert_eq!(session.ownership().distance(Coord::new(2, 0)), Some(1_001.0));
}

#[test]
fn test_delete_does_not_reassign() {
    let mut session = Session::new(&plains(5, 5)).unwrap();
    session.place_capital(&empire(1, 0, 0, 10)).unwrap();
    session.place_capital(&empire(2, 4, 4, 10)).unwrap();
    session.grow(10_000.0);
    let owned_by_two = session.territory(2).unwrap();

    assert_eq!(session.delete_empire(2), Ok(owned_by_two));
    let unowned = session.ownership().owners().iter().filter(|o| o.is_none()).count();
    assert_eq!(unowned, owned_by_two);

    // Empire 1's frontier is exhausted, so nothing is reclaimed.
    session.grow(10_000.0);
    let unowned = session.ownership().owners().iter().filter(|o| o.is_none()).count();
    assert_eq!(unowned, owned_by_two);
}

#[test]
fn test_unknown_empire_does_not_block_others() {
    let mut session = Session::new(&plains(3, 3)).unwrap();
    session.place_capital(&empire(1, 1, 1, 10)).unwrap();
    assert!(session.grow_empire(42, 40.0).is_err());
    let report = session.grow_empire(1, 40.0).unwrap();
    assert_eq!(report.claimed, 4);
}

#[test]
fn test_repaint_leaves_ownership_alone() {
    let mut session = Session::new(&plains(3, 3)).unwrap();
    session.place_capital(&empire(1, 1, 1, 10)).unwrap();
    session.grow(40.0);
    let before = session.ownership().clone();

    session.paint_terrain(Coord::new(1, 1), 3.0, TerrainType::Mountain);
    assert_eq!(session.ownership(), &before);
}

#[test]
fn test_engine_invariants_after_mixed_operations() {
    let mut session = Session::new(&plains(12, 12)).unwrap();
    for (id, x, y) in [(1, 0, 0), (2, 11, 0), (3, 0, 11), (4, 11, 11), (5, 6, 6)] {
        session.place_capital(&empire(id, x, y, 10)).unwrap();
    }
    for tick in 0..20 {
        session.grow(35.0);
        if tick == 7 {
            session.delete_empire(5).unwrap();
        }
    }
    assert!(check_invariants(session.engine()).is_empty());
    assert!(session.empire(5).is_none());
}
