//! Pointer rays: camera unprojection, ray/point distance, ray/plane hits.

use crate::float::Float;
use crate::vec::Vec3;

/// A half-line from `origin` along a unit `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray<F: Float> {
    pub origin: Vec3<F>,
    pub direction: Vec3<F>,
}

impl<F: Float> Ray<F> {
    /// `direction` is normalized here.
    pub fn new(origin: Vec3<F>, direction: Vec3<F>) -> Self {
        Ray { origin, direction: direction.normalize() }
    }

    pub fn at(&self, t: F) -> Vec3<F> {
        self.origin + self.direction.scale(t)
    }

    /// Distance from `point` to the closest point on the ray. Points behind the
    /// origin measure to the origin itself.
    pub fn distance_to_point(&self, point: Vec3<F>) -> F {
        let t = (point - self.origin).dot(self.direction);
        if t < F::zero() {
            return self.origin.distance(point);
        }
        self.at(t).distance(point)
    }

    /// Hit point on `plane`, or `None` if the ray is parallel to it or the
    /// plane lies behind the origin.
    pub fn intersect_plane(&self, plane: &Plane<F>) -> Option<Vec3<F>> {
        let denom = plane.normal.dot(self.direction);
        if denom.is_near_zero(F::from_f32(1e-8)) {
            return None;
        }
        let t = -(self.origin.dot(plane.normal) + plane.constant) / denom;
        if t < F::zero() {
            return None;
        }
        Some(self.at(t))
    }
}

/// Points `p` with `normal . p + constant = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane<F: Float> {
    pub normal: Vec3<F>,
    pub constant: F,
}

impl<F: Float> Plane<F> {
    pub fn from_normal_and_point(normal: Vec3<F>, point: Vec3<F>) -> Self {
        let normal = normal.normalize();
        Plane { normal, constant: -point.dot(normal) }
    }

    /// Signed distance, positive on the side the normal points to.
    pub fn distance_to_point(&self, point: Vec3<F>) -> F {
        self.normal.dot(point) + self.constant
    }
}

/// What the presentation layer knows about its camera each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera<F: Float> {
    pub position: Vec3<F>,
    /// View direction (need not be normalized).
    pub direction: Vec3<F>,
    pub projection: glam::Mat4,
}

impl<F: Float> Camera<F> {
    pub fn new(position: Vec3<F>, direction: Vec3<F>, projection: glam::Mat4) -> Self {
        Camera { position, direction, projection }
    }

    /// Right-handed OpenGL-style perspective camera looking at `target`.
    /// `fov_y` is in radians.
    pub fn perspective(
        position: Vec3<F>,
        target: Vec3<F>,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let projection = glam::Mat4::perspective_rh_gl(fov_y, aspect, near, far);
        Camera { position, direction: target - position, projection }
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3<F> {
        self.direction.normalize()
    }

    pub fn view(&self) -> glam::Mat4 {
        let dir = self.forward().to_glam();
        let up = if dir.cross(glam::Vec3::Y).length_squared() < 1e-12 {
            glam::Vec3::Z
        } else {
            glam::Vec3::Y
        };
        glam::Mat4::look_to_rh(self.position.to_glam(), dir, up)
    }

    /// Ray from the camera through normalized device coordinates
    /// (`x`, `y` in [-1, 1], y up).
    pub fn ray(&self, ndc_x: F, ndc_y: F) -> Ray<F> {
        let inverse = (self.projection * self.view()).inverse();
        let ndc = glam::Vec3::new(ndc_x.to_f32(), ndc_y.to_f32(), 0.5);
        let through = Vec3::from_glam(inverse.project_point3(ndc));
        Ray::new(self.position, through - self.position)
    }
}
