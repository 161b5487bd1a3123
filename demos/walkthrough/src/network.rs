//! Synthetic street grid used by the walkthrough.
//!
//! Five avenues running north–south crossed by five streets running
//! east–west, ~165 m apart, around a point in central Seoul.  The middle
//! avenue is faster, so the car profile prefers it.

use nav_core::{NodeId, Point};
use nav_spatial::{RoadNetwork, RoadNetworkBuilder};

pub const SIZE: usize = 5;

const ORIGIN:  Point = Point::new(37.4960, 127.0250);
const DLAT:    f64   = 0.0015;
const DLNG:    f64   = 0.0019;
const AVENUES: [&str; SIZE] = ["1st Ave", "2nd Ave", "Central Ave", "4th Ave", "5th Ave"];
const STREETS: [&str; SIZE] = ["A St", "B St", "C St", "D St", "E St"];

/// Build the grid.  Returns the network and its node ids indexed
/// `[row][col]`, row 0 southernmost.
pub fn build_grid() -> (RoadNetwork, [[NodeId; SIZE]; SIZE]) {
    let mut b = RoadNetworkBuilder::new();
    let mut ids = [[NodeId::INVALID; SIZE]; SIZE];

    for (r, row) in ids.iter_mut().enumerate() {
        for (c, id) in row.iter_mut().enumerate() {
            *id = b.add_node(Point::new(
                ORIGIN.lat + DLAT * r as f64,
                ORIGIN.lng + DLNG * c as f64,
            ));
        }
    }

    for r in 0..SIZE {
        for c in 0..SIZE {
            if c + 1 < SIZE {
                b.add_street(ids[r][c], ids[r][c + 1], STREETS[r], 30.0);
            }
            if r + 1 < SIZE {
                let speed = if c == SIZE / 2 { 50.0 } else { 30.0 };
                b.add_street(ids[r][c], ids[r + 1][c], AVENUES[c], speed);
            }
        }
    }

    (b.build(), ids)
}

/// Position of a grid node.
pub fn corner(network: &RoadNetwork, id: NodeId) -> Point {
    network.node_pos[id.index()]
}
