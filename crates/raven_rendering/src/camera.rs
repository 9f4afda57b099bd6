//! Perspective camera and the matrix math behind it.
//!
//! All matrices are column-major `[[f32; 4]; 4]` (`m[col][row]`) with OpenGL
//! clip conventions: after projection, visible points satisfy `-w <= z <= w`.

/// Column-major 4x4 matrix.
pub type Mat4 = [[f32; 4]; 4];

/// Near clip distance.
pub const NEAR_PLANE: f32 = 0.1;

/// Far clip distance.
pub const FAR_PLANE: f32 = 1000.0;

/// Perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: [f32; 3],
    /// Point the camera looks at.
    pub target: [f32; 3],
    /// Up direction.
    pub up: [f32; 3],
    /// Vertical field of view, in degrees.
    pub fovy_degrees: f32,
}

impl Camera {
    /// Creates a camera with +Y up.
    #[must_use]
    pub const fn new(position: [f32; 3], target: [f32; 3], fovy_degrees: f32) -> Self {
        Self {
            position,
            target,
            up: [0.0, 1.0, 0.0],
            fovy_degrees,
        }
    }

    /// View matrix.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        look_at(self.position, self.target, self.up)
    }

    /// Projection matrix for an aspect ratio (width / height).
    #[must_use]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        perspective(self.fovy_degrees.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Combined `projection * view`.
    #[must_use]
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        multiply(&self.projection(aspect), &self.view())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], 45.0)
    }
}

/// Right-handed look-at view matrix.
#[must_use]
pub fn look_at(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> Mat4 {
    let f = normalize(sub(target, eye));
    let s = normalize(cross(f, up));
    let u = cross(s, f);

    [
        [s[0], u[0], -f[0], 0.0],
        [s[1], u[1], -f[1], 0.0],
        [s[2], u[2], -f[2], 0.0],
        [-dot(s, eye), -dot(u, eye), dot(f, eye), 1.0],
    ]
}

/// OpenGL perspective projection.
#[must_use]
pub fn perspective(fovy_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fovy_radians / 2.0).tan();
    let range = near - far;

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) / range, -1.0],
        [0.0, 0.0, 2.0 * far * near / range, 0.0],
    ]
}

/// Matrix product `a * b`.
#[must_use]
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (col, out_col) in out.iter_mut().enumerate() {
        for (row, value) in out_col.iter_mut().enumerate() {
            *value = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    out
}

/// Transforms a point (w = 1) and returns clip coordinates.
#[must_use]
pub fn transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
    }
    out
}

#[inline]
fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}
