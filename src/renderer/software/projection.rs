use crate::{
    fixed::Fixed,
    renderer::SCREEN_W,
    trig::{Angle, FULL_TURN},
};

/// Horizontal field of view.
pub const FOV_DEGREES: f64 = 60.0;

/// Per-column view parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FovColumn {
    /// Ray direction relative to the heading (+ = left of centre).
    pub offset: Angle,
    /// `cos(offset)`: turns the along-ray hit distance into the
    /// distance from the projection plane.
    pub correction: Fixed,
}

/// Camera-relative ray angles for every screen column.  Built once per
/// renderer; the heading is added per frame.
#[derive(Clone, Debug)]
pub struct FovTable {
    cols: Vec<FovColumn>,
}

impl FovTable {
    pub fn new() -> Self {
        let fov_steps = FOV_DEGREES * FULL_TURN as f64 / 360.0;
        let step = fov_steps / SCREEN_W as f64;
        let half = fov_steps / 2.0;

        // Sample at pixel centres; `as` truncates toward zero.
        let cols = (0..SCREEN_W)
            .map(|i| {
                let offset = Angle::new((half - (0.5 + i as f64 * step)) as i32);
                FovColumn {
                    offset,
                    correction: offset.cos(),
                }
            })
            .collect();
        tracing::debug!(columns = SCREEN_W, fov = FOV_DEGREES, "fov table built");
        Self { cols }
    }

    #[inline(always)]
    pub fn column(&self, i: usize) -> FovColumn {
        self.cols[i]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FovColumn> + '_ {
        self.cols.iter()
    }
}

impl Default for FovTable {
    fn default() -> Self {
        Self::new()
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_sixty_degrees_left_to_right() {
        let fov = FovTable::new();
        assert_eq!(fov.iter().len(), SCREEN_W);
        assert_eq!(fov.column(0).offset, Angle::new(170));
        assert_eq!(fov.column(SCREEN_W - 1).offset, Angle::new(-170));
        assert_eq!(fov.column(SCREEN_W / 2).offset, Angle::ZERO);
    }

    #[test]
    fn offsets_never_increase() {
        let fov = FovTable::new();
        let steps: Vec<i32> = fov.iter().map(|c| c.offset.steps()).collect();
        assert!(steps.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn correction_is_cosine_of_offset() {
        let fov = FovTable::new();
        for c in fov.iter() {
            assert_eq!(c.correction, c.offset.cos());
            assert!(c.correction > Fixed::from_f64(0.85));
            assert!(c.correction <= Fixed::ONE);
        }
    }
}
