#![no_main]

use arbitrary::Arbitrary;
use imperium::grid::CellCode;
use imperium::sim::check_invariants;
use imperium::{Color, Coord, CostTable, EmpireSpec, Session, TerrainType};
use libfuzzer_sys::fuzz_target;

const SIDE: u32 = 12;

/// Structured input for growth fuzzing.
#[derive(Arbitrary, Debug)]
struct GrowInput {
    /// Terrain codes, wrapped over a fixed square map.
    terrain: Vec<u8>,
    /// Operations applied in order.
    commands: Vec<FuzzCommand>,
}

#[derive(Arbitrary, Debug)]
enum FuzzCommand {
    Place {
        id: u8,
        x: u8,
        y: u8,
        cost: u8,
        seed: u16,
    },
    Grow {
        budget: u16,
    },
    GrowOne {
        id: u8,
        budget: u16,
    },
    Delete {
        id: u8,
    },
    Paint {
        x: u8,
        y: u8,
        diameter: u8,
        terrain: u8,
    },
    Recost {
        id: u8,
        cost: u8,
    },
}

const CODES: [TerrainType; 8] = [
    TerrainType::Unknown,
    TerrainType::Water,
    TerrainType::River,
    TerrainType::Plain,
    TerrainType::Mountain,
    TerrainType::Desert,
    TerrainType::Forest,
    TerrainType::Ice,
];

fuzz_target!(|input: GrowInput| {
    let mut map = String::new();
    for y in 0..SIDE {
        for x in 0..SIDE {
            let byte = input
                .terrain
                .get((y * SIDE + x) as usize)
                .copied()
                .unwrap_or(3);
            map.push(CODES[byte as usize % CODES.len()].code());
        }
        map.push('\n');
    }
    let mut session = Session::new(&map).expect("generated map decodes");

    // Cap command count to keep runs short
    for command in input.commands.iter().take(64) {
        match *command {
            FuzzCommand::Place {
                id,
                x,
                y,
                cost,
                seed,
            } => {
                let spec = EmpireSpec {
                    costs: Some(CostTable::uniform(u32::from(cost).max(1))),
                    seed_budget: Some(f64::from(seed)),
                    ..EmpireSpec::new(
                        u32::from(id % 8),
                        Color::WHITE,
                        Coord::new(u32::from(x) % (SIDE + 2), u32::from(y) % (SIDE + 2)),
                    )
                };
                let _ = session.place_capital(&spec);
            }
            FuzzCommand::Grow { budget } => {
                session.grow(f64::from(budget));
            }
            FuzzCommand::GrowOne { id, budget } => {
                let _ = session.grow_empire(u32::from(id % 8), f64::from(budget));
            }
            FuzzCommand::Delete { id } => {
                let _ = session.delete_empire(u32::from(id % 8));
            }
            FuzzCommand::Paint {
                x,
                y,
                diameter,
                terrain,
            } => {
                session.paint_terrain(
                    Coord::new(u32::from(x) % SIDE, u32::from(y) % SIDE),
                    f64::from(diameter % 16),
                    CODES[terrain as usize % CODES.len()],
                );
            }
            FuzzCommand::Recost { id, cost } => {
                let table = CostTable::uniform(u32::from(cost).max(1));
                let _ = session.set_empire_costs(u32::from(id % 8), &table);
            }
        }

        let violations = check_invariants(session.engine());
        assert!(violations.is_empty(), "{violations:?}");
    }
});
