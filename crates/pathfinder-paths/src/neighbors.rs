use pathfinder_core::Point;

/// Offsets of the eight surrounding cells, x-major: for dx in -1..=1, for dy
/// in -1..=1, skipping (0, 0).
///
/// This order fixes which node is discovered first and therefore which of
/// several equal-cost paths a search returns.
pub const EIGHT_WAY: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(-1, 0),
    Point::new(-1, 1),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
];

/// Append the 8-directional neighbors of `p` for which `keep` returns `true`,
/// in [`EIGHT_WAY`] order.
#[inline]
pub fn eight_way(p: Point, buf: &mut Vec<Point>, keep: impl Fn(Point) -> bool) {
    for d in EIGHT_WAY {
        let n = p + d;
        if keep(n) {
            buf.push(n);
        }
    }
}
