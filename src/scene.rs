//! Decorative background scene: constants for every object plus the pure
//! per-frame functions the renderer evaluates. Nothing here touches the DOM.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::geometry::{cuboid, uv_sphere, Mesh, SPHERE_HEIGHT_SEGMENTS, SPHERE_WIDTH_SEGMENTS};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { size: [f32; 3] },
}

impl Shape {
    pub fn mesh(self) -> Mesh {
        match self {
            Self::Sphere { radius } => uv_sphere(radius, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS),
            Self::Box { size: [x, y, z] } => cuboid(x, y, z),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
}

/// Primitive that bobs and sways on a sine of elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingPrimitive {
    pub shape: Shape,
    pub position: [f32; 3],
    pub material: Material,
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimitiveTransform {
    pub offset_y: f32,
    pub rotation: [f32; 3],
}

impl FloatingPrimitive {
    pub fn amplitude(&self) -> f32 {
        self.float_intensity / 10.0
    }

    fn phase(&self, elapsed: f32) -> f32 {
        elapsed * self.speed / 4.0
    }

    pub fn transform_at(&self, elapsed: f32) -> PrimitiveTransform {
        let phase = self.phase(elapsed);
        let intensity = self.rotation_intensity;
        PrimitiveTransform {
            offset_y: phase.sin() * self.amplitude(),
            rotation: [
                phase.cos() / 8.0 * intensity,
                phase.sin() / 8.0 * intensity,
                phase.sin() / 20.0 * intensity,
            ],
        }
    }

    /// Model matrix: the float group sways about its own origin and carries
    /// the primitive at its base position.
    pub fn model_matrix(&self, elapsed: f32) -> Mat4 {
        let transform = self.transform_at(elapsed);
        let [rx, ry, rz] = transform.rotation;
        let group = Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            Vec3::new(0.0, transform.offset_y, 0.0),
        );
        group * Mat4::from_translation(Vec3::from(self.position))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub environment: [f32; 3],
    pub points: [PointLight; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldSpec {
    pub radius: f32,
    pub depth: f32,
    pub count: usize,
    pub factor: f32,
    pub saturation: f32,
    pub fade: bool,
    pub speed: f32,
    pub seed: u64,
}

/// Star vertex streams ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Starfield {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,
}

impl StarfieldSpec {
    pub fn generate(&self) -> Starfield {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut field = Starfield {
            positions: Vec::with_capacity(self.count * 3),
            colors: Vec::with_capacity(self.count * 3),
            sizes: Vec::with_capacity(self.count),
        };
        let step = self.depth / self.count.max(1) as f32;
        let mut distance = self.radius + self.depth;

        for index in 0..self.count {
            distance -= step * rng.random::<f32>();
            let polar = (1.0 - 2.0 * rng.random::<f32>()).clamp(-1.0, 1.0).acos();
            let azimuth = TAU * rng.random::<f32>();
            let direction = Vec3::new(
                polar.sin() * azimuth.sin(),
                polar.cos(),
                polar.sin() * azimuth.cos(),
            );
            field.positions.extend_from_slice(&(direction * distance).to_array());
            let hue = index as f32 / self.count as f32;
            field.colors.extend_from_slice(&hsl_to_rgb(hue, self.saturation, 0.9));
            field.sizes.push((0.5 + 0.5 * rng.random::<f32>()) * self.factor);
        }

        field
    }

    /// Time uniform for the twinkle term.
    pub fn shader_time(&self, elapsed: f32) -> f32 {
        elapsed * self.speed
    }
}

impl Starfield {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }
}

pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    if saturation <= 0.0 {
        return [lightness; 3];
    }
    let q = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;
    let channel = |offset: f32| {
        let mut t = hue + offset;
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    [channel(1.0 / 3.0), channel(0.0), channel(-1.0 / 3.0)]
}

/// Splits a `0xRRGGBB` literal into 0..1 channels.
pub fn hex_color(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

const MIN_POLAR: f32 = 1e-4;

/// Camera orbiting the origin. Auto-rotates, rotates on drag with inertia;
/// pan and zoom are not supported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub polar: f32,
    pub radius: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub auto_rotate_speed: f32,
    pub damping: f32,
    pending_azimuth: f32,
    pending_polar: f32,
}

impl OrbitCamera {
    /// Camera at `position` looking at the origin.
    pub fn looking_at_origin(position: Vec3, fov_degrees: f32) -> Self {
        let radius = position.length().max(f32::EPSILON);
        Self {
            azimuth: position.x.atan2(position.z),
            polar: (position.y / radius).clamp(-1.0, 1.0).acos(),
            radius,
            fov_degrees,
            near: 0.1,
            far: 1000.0,
            auto_rotate_speed: 0.5,
            damping: 0.05,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
        }
    }

    /// Auto-rotation rate in radians per second.
    pub fn auto_rotate_rate(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }

    /// Queues a drag of `dx`,`dy` pixels; a full viewport height turns the
    /// camera once around.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.pending_azimuth -= TAU * dx / height;
        self.pending_polar -= TAU * dy / height;
    }

    /// Advances by `dt` seconds: auto-rotation plus a damped share of any drag.
    pub fn update(&mut self, dt: f32) {
        self.pending_azimuth -= self.auto_rotate_rate() * dt.max(0.0);

        self.azimuth += self.pending_azimuth * self.damping;
        self.polar = (self.polar + self.pending_polar * self.damping).clamp(MIN_POLAR, PI - MIN_POLAR);

        self.pending_azimuth *= 1.0 - self.damping;
        self.pending_polar *= 1.0 - self.damping;
    }

    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.cos(),
        )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_degrees.to_radians(),
            aspect.max(f32::EPSILON),
            self.near,
            self.far,
        )
    }
}

/// Everything the background draws, enumerated once at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSpec {
    pub camera: OrbitCamera,
    pub lighting: Lighting,
    pub stars: StarfieldSpec,
    pub primitives: Vec<FloatingPrimitive>,
}

fn floating(
    shape: Shape,
    position: [f32; 3],
    color: u32,
    roughness: f32,
    metalness: f32,
    (speed, rotation_intensity, float_intensity): (f32, f32, f32),
) -> FloatingPrimitive {
    FloatingPrimitive {
        shape,
        position,
        material: Material {
            color: hex_color(color),
            roughness,
            metalness,
        },
        speed,
        rotation_intensity,
        float_intensity,
    }
}

impl Default for SceneSpec {
    fn default() -> Self {
        Self {
            camera: OrbitCamera::looking_at_origin(Vec3::new(0.0, 0.0, 10.0), 75.0),
            lighting: Lighting {
                ambient: 0.3,
                environment: [0.05, 0.06, 0.12],
                points: [
                    PointLight {
                        position: [10.0, 10.0, 10.0],
                        color: [1.0, 1.0, 1.0],
                        intensity: 1.0,
                    },
                    PointLight {
                        position: [-10.0, -10.0, -10.0],
                        color: hex_color(0x00ff88),
                        intensity: 0.5,
                    },
                ],
            },
            stars: StarfieldSpec {
                radius: 100.0,
                depth: 50.0,
                count: 5000,
                factor: 4.0,
                saturation: 0.0,
                fade: true,
                speed: 1.0,
                seed: 0x5eed,
            },
            primitives: vec![
                floating(Shape::Sphere { radius: 0.5 }, [-8.0, 3.0, -5.0], 0x00ff88, 0.2, 0.8, (1.0, 0.2, 0.5)),
                floating(Shape::Box { size: [1.0; 3] }, [8.0, -2.0, -3.0], 0xff0088, 0.3, 0.7, (1.5, 0.3, 0.7)),
                floating(Shape::Sphere { radius: 0.8 }, [0.0, 5.0, -8.0], 0x0088ff, 0.1, 0.9, (0.8, 0.1, 0.4)),
                floating(Shape::Box { size: [0.8; 3] }, [-6.0, -4.0, -2.0], 0x61dafb, 0.2, 0.8, (2.0, 0.4, 0.6)),
                floating(Shape::Sphere { radius: 0.6 }, [6.0, 4.0, -4.0], 0xf7df1e, 0.1, 0.9, (1.8, 0.3, 0.5)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn default_scene_has_five_primitives() {
        let scene = SceneSpec::default();

        assert_eq!(scene.primitives.len(), 5);
        assert!(scene.primitives.iter().all(|p| p.rotation_intensity > 0.0));
    }

    #[test]
    fn primitive_bobs_on_a_sine_around_base_y() {
        let mut primitive = SceneSpec::default().primitives[1];
        let amplitude = primitive.amplitude();
        assert!(close(amplitude, 0.07));

        for t in [0.0_f32, 0.3, 1.0, 2.5, 10.0, 123.4] {
            let expected = (t * 1.5 / 4.0).sin() * amplitude;
            assert!(close(primitive.transform_at(t).offset_y, expected));
        }

        // Without sway the drawn centre is exactly base + offset.
        primitive.rotation_intensity = 0.0;
        for t in [0.0_f32, 0.3, 1.0, 2.5, 10.0, 123.4] {
            let centre = primitive.model_matrix(t).transform_point3(Vec3::ZERO);
            let expected = -2.0 + (t * 1.5 / 4.0).sin() * amplitude;
            assert!(close(centre.y, expected));
            assert!(close(centre.x, 8.0) && close(centre.z, -3.0));
            assert!((centre.y + 2.0).abs() <= amplitude + 1e-6);
        }
    }

    #[test]
    fn model_matrix_applies_group_sway_about_the_origin() {
        let primitive = SceneSpec::default().primitives[0];
        let t = 3.7_f32;
        let transform = primitive.transform_at(t);
        let [rx, ry, rz] = transform.rotation;
        let expected = Quat::from_euler(EulerRot::XYZ, rx, ry, rz)
            * Vec3::from(primitive.position)
            + Vec3::new(0.0, transform.offset_y, 0.0);

        let centre = primitive.model_matrix(t).transform_point3(Vec3::ZERO);
        assert!(centre.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn rotation_stays_small() {
        let primitive = SceneSpec::default().primitives[3];
        let bound = primitive.rotation_intensity / 8.0 + 1e-6;

        for step in 0..200 {
            let transform = primitive.transform_at(step as f32 * 0.37);
            assert!(transform.rotation.iter().all(|r| r.abs() <= bound));
        }
    }

    #[test]
    fn model_matrix_places_primitive_at_base_when_at_rest() {
        let mut primitive = SceneSpec::default().primitives[2];
        primitive.rotation_intensity = 0.0;

        let origin = primitive.model_matrix(0.0).transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 5.0, -8.0), 1e-5));
    }

    #[test]
    fn camera_starts_on_positive_z_axis() {
        let camera = SceneSpec::default().camera;

        assert!(camera.eye().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-4));
    }

    #[test]
    fn auto_rotation_converges_to_configured_rate() {
        let mut camera = SceneSpec::default().camera;
        let dt = 1.0 / 60.0;
        for _ in 0..600 {
            camera.update(dt);
        }
        let before = camera.azimuth;
        camera.update(dt);

        let step = before - camera.azimuth;
        assert!(close(step, camera.auto_rotate_rate() * dt));
        assert!(close(camera.eye().length(), 10.0));
    }

    #[test]
    fn drag_is_applied_with_inertia() {
        let mut camera = SceneSpec::default().camera;
        camera.auto_rotate_speed = 0.0;
        camera.drag(100.0, 0.0, 800.0);

        camera.update(1.0 / 60.0);
        let first = camera.azimuth;
        camera.update(1.0 / 60.0);
        let second = camera.azimuth - first;

        assert!(first < 0.0);
        assert!(second < 0.0 && second.abs() < first.abs());

        for _ in 0..2000 {
            camera.update(1.0 / 60.0);
        }
        assert!(close(camera.azimuth, -TAU * 100.0 / 800.0));
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut camera = SceneSpec::default().camera;
        camera.drag(0.0, -100_000.0, 600.0);
        for _ in 0..500 {
            camera.update(0.0);
        }

        assert!(camera.polar < PI && camera.polar > 0.0);
    }

    #[test]
    fn starfield_is_deterministic_and_within_shell() {
        let spec = SceneSpec::default().stars;
        let first = spec.generate();
        let second = spec.generate();

        assert_eq!(first, second);
        assert_eq!(first.count(), 5000);
        for star in first.positions.chunks(3) {
            let distance = Vec3::from_slice(star).length();
            assert!(distance >= spec.radius - 1e-2 && distance <= spec.radius + spec.depth + 1e-2);
        }
        assert!(first.sizes.iter().all(|size| (2.0..=4.0).contains(size)));
    }

    #[test]
    fn zero_saturation_stars_are_grey() {
        let field = SceneSpec::default().stars.generate();

        for color in field.colors.chunks(3) {
            assert_eq!(color, [0.9_f32; 3]);
        }
    }

    #[test]
    fn hsl_primary_hues() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!(close(red[0], 1.0) && close(red[1], 0.0) && close(red[2], 0.0));
        let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
        assert!(close(green[1], 1.0) && close(green[0], 0.0));
    }

    #[test]
    fn hex_color_splits_channels() {
        assert_eq!(hex_color(0xff0000), [1.0_f32, 0.0, 0.0]);
        assert_eq!(hex_color(0x00ff88)[1], 1.0_f32);
    }
}
