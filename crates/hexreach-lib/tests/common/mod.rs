//! Shared map builders for integration tests.

use hexreach_lib::{BaseType, Direction, HexMap, HexRecord};

/// Label used for the hex at `(q, r)` in generated grids.
pub fn coord_label(q: i32, r: i32) -> String {
    format!("{q},{r}")
}

/// Hex distance between two axial coordinates.
#[allow(dead_code)]
pub fn cube_distance(a: (i32, i32), b: (i32, i32)) -> u32 {
    let dq = a.0 - b.0;
    let dr = a.1 - b.1;
    (dq.abs().max(dr.abs()).max((dq + dr).abs())) as u32
}

/// Hexagon of `empty` hexes with the given radius around `(0, 0)`.
pub fn hex_grid(radius: i32) -> HexMap {
    let mut map = HexMap::new();
    for q in -radius..=radius {
        for r in (-radius).max(-q - radius)..=radius.min(-q + radius) {
            map.insert(HexRecord::new(coord_label(q, r), q, r).with_base_type(BaseType::Empty));
        }
    }
    map
}

/// Label of the hex `steps` hexes from the origin along `side`.
#[allow(dead_code)]
pub fn along(side: Direction, steps: i32) -> String {
    let (dq, dr) = side.offset();
    coord_label(dq * steps, dr * steps)
}

/// Straight column of `empty` hexes at `q = 0`, labelled `h0..h{len-1}`.
#[allow(dead_code)]
pub fn column(len: i32) -> HexMap {
    (0..len)
        .map(|r| HexRecord::new(format!("h{r}"), 0, r).with_base_type(BaseType::Empty))
        .collect()
}
