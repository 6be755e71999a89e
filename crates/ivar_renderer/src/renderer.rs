//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounded iterative bounces with a running throughput product
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction

use crate::{Camera, Color, RenderSettings, Ray, Scene};
use ivar_math::{gen_f32, Interval};
use rand::RngCore;

/// Closest accepted hit distance; rejects self-intersections ("shadow
/// acne") at the origin of scattered rays.
pub const T_MIN: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// Follows the path for at most `max_depth` surface interactions. Each
/// scatter multiplies the throughput by the material attenuation; a miss
/// returns `throughput * sky`. Absorption or an exhausted bounce budget
/// returns black.
pub fn ray_color(ray: &Ray, scene: &Scene, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..max_depth {
        let Some(rec) = scene.hit(&ray, Interval::forward(T_MIN)) else {
            return throughput * sky_gradient(&ray);
        };

        match scene.material(rec.material).scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Vertical white-to-sky-blue background gradient.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    linear.sqrt()
}

/// Gamma-correct then clamp every channel to [0, 1].
#[inline]
pub fn finalize_color(linear: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(linear_to_gamma(linear.x)),
        Interval::UNIT.clamp(linear_to_gamma(linear.y)),
        Interval::UNIT.clamp(linear_to_gamma(linear.z)),
    )
}

/// Estimate the linear radiance of pixel `(x, y)`.
///
/// `y = 0` is the bottom row. Each sample jitters the screen position
/// within the pixel footprint and traces one full path; the result is the
/// sample mean.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let width = settings.width as f32;
    let height = settings.height as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / width;
        let t = (y as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, scene, settings.max_depth, rng);
    }

    // Average the samples
    pixel_color / settings.samples_per_pixel as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraSettings, Dielectric, Lambertian, Metal};
    use ivar_math::{reflect, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        assert_eq!(up, Color::new(0.5, 0.7, 1.0));

        let down = sky_gradient(&Ray::new(Vec3::ZERO, -Vec3::Y));
        assert_eq!(down, Color::ONE);

        // Horizontal rays land halfway; length of the direction doesn't matter
        let side = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::X * 10.0));
        assert!((side - Color::new(0.75, 0.85, 1.0)).length() < EPS);
    }

    #[test]
    fn test_empty_scene_returns_sky_exactly() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::new(0.5, 0.7, 1.0));
        assert_eq!(ray_color(&ray, &scene, 50, &mut rng), Color::new(0.5, 0.7, 1.0));
    }

    #[test]
    fn test_miss_matches_background() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0, Lambertian::new(Color::ONE));
        let mut rng = StdRng::seed_from_u64(42);

        for direction in [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(-3.0, -0.5, 0.25),
        ] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert_eq!(ray_color(&ray, &scene, 10, &mut rng), sky_gradient(&ray));
        }
    }

    #[test]
    fn test_zero_depth_is_black() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&ray, &scene, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_mirror_reflects_background() {
        let mut scene = Scene::new();
        let center = Vec3::new(0.0, 0.0, -3.0);
        scene.add_sphere(center, 1.0, Metal::new(Color::ONE, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        // Off-axis so the reflection isn't straight back
        let ray = Ray::new(Vec3::new(0.5, 0.3, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = scene.hit(&ray, Interval::forward(T_MIN)).unwrap();
        let mirrored = Ray::new(rec.p, reflect(ray.direction().normalize(), rec.normal));

        let color = ray_color(&ray, &scene, 2, &mut rng);
        assert!((color - sky_gradient(&mirrored)).length() < EPS);

        // One bounce isn't enough to reach the sky
        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_attenuation_multiplies() {
        let mut scene = Scene::new();
        let albedo = Color::new(0.5, 0.25, 1.0);
        scene.add_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, Metal::new(albedo, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::new(0.2, 0.1, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = scene.hit(&ray, Interval::forward(T_MIN)).unwrap();
        let mirrored = Ray::new(rec.p, reflect(ray.direction().normalize(), rec.normal));

        let color = ray_color(&ray, &scene, 5, &mut rng);
        assert!((color - albedo * sky_gradient(&mirrored)).length() < EPS);
    }

    #[test]
    fn test_radiance_never_exceeds_sky() {
        let mut scene = Scene::new();
        scene.add_sphere(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Lambertian::new(Color::splat(0.5)),
        );
        scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, Dielectric::new(1.5));
        let mut rng = StdRng::seed_from_u64(3);

        for i in 0..200 {
            let x = (i as f32 / 200.0) - 0.5;
            let ray = Ray::new(Vec3::ZERO, Vec3::new(x, 0.0, -1.0));
            let color = ray_color(&ray, &scene, 20, &mut rng);
            assert!(color.cmpge(Color::ZERO).all());
            assert!(color.cmple(Color::splat(1.0 + EPS)).all(), "color = {color:?}");
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_finalize_color_clamps() {
        let c = finalize_color(Color::new(0.25, 4.0, 0.0));
        assert!((c.x - 0.5).abs() < EPS);
        assert_eq!(c.y, 1.0);
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn test_render_pixel_sky_only() {
        let scene = Scene::new();
        let settings = RenderSettings {
            width: 4,
            height: 4,
            samples_per_pixel: 8,
            max_depth: 4,
            ..Default::default()
        };
        let camera = Camera::new(&CameraSettings::default(), settings.aspect_ratio());
        let mut rng = StdRng::seed_from_u64(42);

        let color = render_pixel(&camera, &scene, 1, 2, &settings, &mut rng);
        // Every sample is a sky color, so the mean lies on the gradient
        assert!(color.z > 0.999);
        assert!(color.x >= 0.5 && color.x <= 1.0);
        assert!((color.y - (0.4 + 0.6 * color.x)).abs() < 1e-4);
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::ZERO, 1.0, Lambertian::new(Color::new(0.9, 0.1, 0.1)));
        let settings = RenderSettings {
            width: 9,
            height: 9,
            samples_per_pixel: 16,
            max_depth: 5,
            ..Default::default()
        };
        let camera_settings = CameraSettings::default().with_lens(20.0, 0.0, 10.0);
        let camera = Camera::new(&camera_settings, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel looks straight at the sphere, which tints it red
        let color = render_pixel(&camera, &scene, 4, 4, &settings, &mut rng);
        assert!(color.x > color.y);
        assert!(color.x > color.z);
    }
}
