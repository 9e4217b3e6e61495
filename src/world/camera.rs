use crate::{fixed::Fixed, trig::Angle, world::map::Map};

/// Distance covered by one movement key press (1/16 of a cell).
pub const MOVE_STEP: Fixed = Fixed::from_raw(0x1000);

/// Heading change for one turn key press.
pub const TURN_STEP: Angle = Angle::new(15);

/// Player view-point.
///
/// * Only the heading rotates; there is no pitch.
/// * Eye height is fixed at half a cell, baked into the projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Camera {
    pub x: Fixed,
    pub y: Fixed,
    pub heading: Angle,
}

impl Camera {
    pub fn new(x: Fixed, y: Fixed, heading: Angle) -> Self {
        Self { x, y, heading }
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Offset of one `dist` step along the heading.
    #[inline]
    pub fn forward(&self, dist: Fixed) -> (Fixed, Fixed) {
        (dist * self.heading.cos(), -(dist * self.heading.sin()))
    }

    /// Offset of one `dist` step to the camera's right.
    #[inline]
    pub fn right(&self, dist: Fixed) -> (Fixed, Fixed) {
        (dist * self.heading.sin(), dist * self.heading.cos())
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` along the heading and `side` to the right.
    ///
    /// Each axis is applied separately and rejected if it would put the
    /// eye inside a solid cell, so the camera slides along walls.
    /// Returns `true` if the position changed.
    pub fn step(&mut self, map: &Map, forward: Fixed, side: Fixed) -> bool {
        let (fx, fy) = self.forward(forward);
        let (rx, ry) = self.right(side);
        let (dx, dy) = (fx + rx, fy + ry);

        let mut moved = false;
        if dx != Fixed::ZERO && !map.is_solid_at(self.x + dx, self.y) {
            self.x += dx;
            moved = true;
        }
        if dy != Fixed::ZERO && !map.is_solid_at(self.x, self.y + dy) {
            self.y += dy;
            moved = true;
        }
        moved
    }

    /// Rotate; positive turns left.
    pub fn turn(&mut self, delta: Angle) {
        self.heading = (self.heading + delta).normalized();
    }
}

impl Default for Camera {
    /// Centre of the sample room, facing +X.
    fn default() -> Self {
        Self::new(Fixed::from_f64(3.5), Fixed::from_f64(3.5), Angle::ZERO)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
