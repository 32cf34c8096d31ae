//! Diagram viewport transform.
//!
//! The camera combines two transforms applied in order:
//!
//! 1. A pan **offset** added to every diagram-space coordinate.
//! 2. The drawing-surface **zoom**: a uniform `scale` plus a device-space
//!    `translation` accumulated by zooming around the cursor.
//!
//! ```text
//! device = (diagram + offset) * scale + translation
//! ```
//!
//! Routing only ever adds the offset; the zoom is applied by whoever draws the
//! returned points. Pointer input travels the opposite direction through
//! [`Camera::to_diagram`].

use crate::geometry::Point;

/// Smallest scale the camera accepts, whatever limits are configured.
pub const MIN_SCALE_FLOOR: f32 = 1e-3;

/// Pan/zoom state of a diagram.
///
/// # Examples
///
/// ```
/// use pedigree_core::camera::Camera;
/// use pedigree_core::geometry::Point;
///
/// let mut camera = Camera::default();
/// camera.set_offset(Point::new(10.0, 0.0));
///
/// let device = camera.to_device(Point::new(5.0, 5.0));
/// assert_eq!(device, Point::new(15.0, 5.0));
/// assert_eq!(camera.to_diagram(device), Point::new(5.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    offset: Point,
    scale: f32,
    translation: Point,
    min_scale: f32,
    max_scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Point::default(),
            scale: 1.0,
            translation: Point::default(),
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

impl Camera {
    /// Creates a camera with the given scale limits.
    ///
    /// The lower limit is raised to [`MIN_SCALE_FLOOR`] and the limits are
    /// reordered if given backwards.
    pub fn with_scale_limits(min_scale: f32, max_scale: f32) -> Self {
        let min_scale = min_scale.max(MIN_SCALE_FLOOR);
        let max_scale = max_scale.max(min_scale);
        Self {
            min_scale,
            max_scale,
            scale: 1.0_f32.clamp(min_scale, max_scale),
            ..Self::default()
        }
    }

    /// Pan offset added to diagram-space coordinates.
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Current zoom factor of the drawing surface.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Device-space translation introduced by zooming around a cursor.
    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    /// Sets the zoom factor, clamped to the configured limits.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = self.clamp_scale(scale);
    }

    /// Adds the pan offset to a diagram-space point.
    pub fn apply_offset(&self, point: Point) -> Point {
        point.add_point(self.offset)
    }

    /// Maps a diagram-space point to device space.
    pub fn to_device(&self, point: Point) -> Point {
        self.apply_offset(point)
            .scale(self.scale)
            .add_point(self.translation)
    }

    /// Maps a device-space point (e.g. a pointer position) to diagram space.
    pub fn to_diagram(&self, device: Point) -> Point {
        device
            .sub_point(self.translation)
            .scale(1.0 / self.scale)
            .sub_point(self.offset)
    }

    /// Converts a device-space distance into a diagram-space distance.
    pub fn device_delta_to_diagram(&self, delta: Point) -> Point {
        delta.scale(1.0 / self.scale)
    }

    /// Multiplies the scale by `factor`, keeping the device point `cursor` fixed.
    ///
    /// This is the translate-scale-translate-back sequence of a canvas zoom. The
    /// resulting scale is clamped to the configured limits and the factor that
    /// was actually applied is returned (`1.0` if nothing changed).
    pub fn zoom_at(&mut self, cursor: Point, factor: f32) -> f32 {
        if !factor.is_finite() || factor <= 0.0 {
            return 1.0;
        }

        let new_scale = self.clamp_scale(self.scale * factor);
        let applied = new_scale / self.scale;

        self.translation = cursor.add_point(self.translation.sub_point(cursor).scale(applied));
        self.scale = new_scale;

        applied
    }

    fn clamp_scale(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            return self.scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Mapping to device space and back returns the original point.
    fn check_device_roundtrip(
        point: Point,
        offset: Point,
        cursor: Point,
        factor: f32,
    ) -> Result<(), TestCaseError> {
        let mut camera = Camera::default();
        camera.set_offset(offset);
        camera.zoom_at(cursor, factor);

        let back = camera.to_diagram(camera.to_device(point));
        prop_assert!(approx_eq!(f32, back.x(), point.x(), epsilon = 0.05));
        prop_assert!(approx_eq!(f32, back.y(), point.y(), epsilon = 0.05));
        Ok(())
    }

    proptest! {
        #[test]
        fn device_roundtrip(
            point in point_strategy(),
            offset in point_strategy(),
            cursor in point_strategy(),
            factor in 0.2f32..5.0,
        ) {
            check_device_roundtrip(point, offset, cursor, factor)?;
        }
    }
}
