//! Radial shell classification.

use globe_voxel::{Category, Coordinate};

/// Radius and shell thicknesses of a layered sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellLayout {
    /// Sphere radius in cells.
    pub radius: i32,
    /// Grass shell thickness.
    pub surface: u32,
    /// Dirt shell thickness, directly below the surface.
    pub subsurface: u32,
}

impl ShellLayout {
    /// Default thicknesses: one cell of grass over two cells of dirt.
    pub const fn new(radius: i32) -> Self {
        Self {
            radius,
            surface: 1,
            subsurface: 2,
        }
    }

    /// Material for the cell at `coord`, or `None` outside the sphere.
    ///
    /// Bands are half-open toward the centre: a cell at exactly
    /// `radius - surface` is dirt, not grass.
    pub fn classify(&self, coord: Coordinate) -> Option<Category> {
        let dist = coord.length();
        let r = f64::from(self.radius);
        let surface_floor = r - f64::from(self.surface);
        let dirt_floor = surface_floor - f64::from(self.subsurface);

        if dist > r {
            None
        } else if dist > surface_floor {
            Some(Category::Grass)
        } else if dist > dirt_floor {
            Some(Category::Dirt)
        } else {
            Some(Category::Stone)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_along_axis() {
        let shells = ShellLayout::new(16);
        let on_axis = |z| shells.classify(Coordinate::new(0, 0, z));
        assert_eq!(on_axis(17), None);
        assert_eq!(on_axis(16), Some(Category::Grass));
        assert_eq!(on_axis(15), Some(Category::Dirt));
        assert_eq!(on_axis(14), Some(Category::Dirt));
        assert_eq!(on_axis(13), Some(Category::Stone));
        assert_eq!(on_axis(0), Some(Category::Stone));
    }

    #[test]
    fn test_off_axis_distance() {
        let shells = ShellLayout::new(16);
        // sqrt(2) * 11 ~= 15.56 -> grass band (15, 16]
        assert_eq!(
            shells.classify(Coordinate::new(11, 11, 0)),
            Some(Category::Grass)
        );
        // sqrt(3) * 10 ~= 17.3 -> outside
        assert_eq!(shells.classify(Coordinate::new(10, 10, 10)), None);
    }

    #[test]
    fn test_small_radius_has_no_stone() {
        let shells = ShellLayout::new(2);
        assert_eq!(shells.classify(Coordinate::ORIGIN), Some(Category::Dirt));
        assert_eq!(shells.classify(Coordinate::new(1, 0, 0)), Some(Category::Dirt));
        assert_eq!(shells.classify(Coordinate::new(1, 1, 0)), Some(Category::Grass));
    }

    #[test]
    fn test_custom_thickness() {
        let shells = ShellLayout {
            radius: 10,
            surface: 3,
            subsurface: 0,
        };
        assert_eq!(shells.classify(Coordinate::new(0, 8, 0)), Some(Category::Grass));
        assert_eq!(shells.classify(Coordinate::new(0, 7, 0)), Some(Category::Stone));
    }
}
