#![no_main]

use imperium::{ResourceGrid, Session, TerrainGrid};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Decoding either fails cleanly or yields a grid that re-encodes to a
    // stable form.
    if let Ok(grid) = TerrainGrid::decode(text) {
        assert_eq!(grid.len(), grid.width() as usize * grid.height() as usize);
        let encoded = grid.encode();
        let again = TerrainGrid::decode(&encoded).expect("encoded terrain must decode");
        assert_eq!(again, grid);
        assert_eq!(again.encode(), encoded);

        let mut session = Session::new(&encoded).expect("encoded terrain must open");
        let blank = session.export_resource_text();
        session
            .load_resources(&blank)
            .expect("blank resources match the map");
    }

    if let Ok(grid) = ResourceGrid::decode(text) {
        let again = ResourceGrid::decode(&grid.encode()).expect("encoded resources must decode");
        assert_eq!(again, grid);
    }
});
