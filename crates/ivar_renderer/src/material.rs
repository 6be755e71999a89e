//! Materials describing how light scatters off a surface.
//!
//! Materials live in a table owned by the [`Scene`](crate::Scene); surfaces
//! refer to them through a lightweight [`MaterialId`] so many spheres can
//! share one material without reference counting.

use crate::{hittable::HitRecord, Ray};
use ivar_math::{
    gen_f32, random_in_unit_sphere, random_unit_vector, reflect, refract, schlick, Color,
};
use rand::RngCore;

/// Handle to a material in a scene's material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u32);

impl MaterialId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel fraction of light carried along `scattered`
    pub attenuation: Color,
    /// Continuation ray leaving the hit point
    pub scattered: Ray,
}

/// Surface material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    #[inline]
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => Some(m.scatter(rec, rng)),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => Some(m.scatter(ray_in, rec, rng)),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    /// Always scatters, approximating a cosine-weighted lobe around the normal.
    pub fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let scatter_direction = rec.normal + random_unit_vector(rng);
        ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, capped at 1.0
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    /// Mirror reflection perturbed by `fuzz`; rays pushed below the
    /// surface are absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Reflect or refract, choosing stochastically by Schlick reflectance.
    /// The medium never absorbs.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> ScatterResult {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || gen_f32(rng) < schlick(cos_theta, refraction_ratio)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivar_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    /// Hit on the top of a surface whose normal is +Y.
    fn hit_from_above(direction: Vec3) -> (Ray, HitRecord) {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0) - direction, direction);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, MaterialId::new(0));
        (ray, rec)
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let albedo = Color::new(0.8, 0.3, 0.1);
        let material = Material::from(Lambertian::new(albedo));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let (ray, rec) = hit_from_above(Vec3::new(0.3, -1.0, 0.2));
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, albedo);
            assert_eq!(result.scattered.origin(), rec.p);
        }
    }

    #[test]
    fn test_metal_zero_fuzz_is_mirror() {
        let material = Material::from(Metal::new(Color::ONE, 0.0));
        let mut rng = StdRng::seed_from_u64(42);
        let direction = Vec3::new(2.0, -1.0, 0.5);
        let (ray, rec) = hit_from_above(direction);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = reflect(direction.normalize(), rec.normal);
        assert!((result.scattered.direction() - expected).length() < EPS);
        assert_eq!(result.scattered.origin(), rec.p);
        assert_eq!(result.attenuation, Color::ONE);
    }

    #[test]
    fn test_metal_fuzz_is_capped() {
        let metal = Metal::new(Color::ONE, 3.0);
        assert_eq!(metal.fuzz(), 1.0);
    }

    #[test]
    fn test_metal_absorbs_below_surface() {
        // Grazing incidence with maximal fuzz sends some rays under the surface
        let material = Material::from(Metal::new(Color::ONE, 1.0));
        let mut rng = StdRng::seed_from_u64(7);
        let (ray, rec) = hit_from_above(Vec3::new(1.0, -0.01, 0.0));

        let mut absorbed = 0;
        for _ in 0..1000 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_normal_incidence() {
        let ior = 1.5;
        let material = Material::from(Dielectric::new(ior));
        let mut rng = StdRng::seed_from_u64(42);
        let (ray, rec) = hit_from_above(Vec3::new(0.0, -1.0, 0.0));
        assert!(rec.front_face);

        let mut refracted = 0;
        for _ in 0..1000 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);

            let dir = result.scattered.direction();
            if dir.y < 0.0 {
                // Head-on refraction continues straight through at unit length
                refracted += 1;
                assert!((dir.length() - 1.0).abs() < EPS);
                assert!((dir - Vec3::new(0.0, -1.0, 0.0)).length() < EPS);
            } else {
                assert!((dir - Vec3::Y).length() < EPS);
            }
        }

        // Schlick gives ~4% reflectance head-on
        assert!(refracted > 900, "refracted = {refracted}");
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::from(Dielectric::new(1.5));
        let mut rng = StdRng::seed_from_u64(42);

        // Leaving the glass at a shallow angle: outward normal is -Y so the
        // record reports a back-face hit with the normal flipped to +Y
        let direction = Vec3::new(1.0, -0.2, 0.0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0) - direction, direction);
        let rec = HitRecord::new(&ray, 1.0, -Vec3::Y, MaterialId::new(0));
        assert!(!rec.front_face);

        let expected = reflect(direction.normalize(), rec.normal);
        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!((result.scattered.direction() - expected).length() < EPS);
        }
    }

    #[test]
    fn test_material_id_index() {
        assert_eq!(MaterialId::new(12).index(), 12);
    }
}
