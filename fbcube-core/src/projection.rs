/// Perspective projection onto integer screen coordinates
use nalgebra::{Point2, Point3};

/// What the projected image is centred on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionAnchor {
    /// The middle of the surface
    #[default]
    ScreenCenter,
    /// The animated centre of the object
    Pose,
}

/// Simple pinhole projection with the viewer on the -z side of the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub width: u32,
    pub height: u32,
    pub viewer_distance: f32,
}

impl Projector {
    pub fn new(width: u32, height: u32, viewer_distance: f32) -> Self {
        Self {
            width,
            height,
            viewer_distance,
        }
    }

    /// Perspective scale factor for a point.
    ///
    /// Diverges as `z` approaches `-viewer_distance`; callers keep geometry in
    /// front of the viewer.
    pub fn scale(&self, point: &Point3<f32>) -> f32 {
        self.viewer_distance / (point.z + self.viewer_distance)
    }

    pub fn screen_center(&self) -> Point2<f32> {
        Point2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    /// Project relative to the screen centre
    pub fn project(&self, point: &Point3<f32>) -> Point2<i32> {
        self.project_about(point, &self.screen_center())
    }

    /// Project relative to an arbitrary screen-space centre.
    ///
    /// The result is clamped onto the surface, so an off-screen vertex still
    /// yields a usable line endpoint.
    pub fn project_about(&self, point: &Point3<f32>, center: &Point2<f32>) -> Point2<i32> {
        let scale = self.scale(point);
        let x = (center.x + point.x * scale) as i32;
        let y = (center.y + point.y * scale) as i32;
        self.clamp(x, y)
    }

    fn clamp(&self, x: i32, y: i32) -> Point2<i32> {
        let max_x = (self.width as i32 - 1).max(0);
        let max_y = (self.height as i32 - 1).max(0);
        Point2::new(x.clamp(0, max_x), y.clamp(0, max_y))
    }
}
