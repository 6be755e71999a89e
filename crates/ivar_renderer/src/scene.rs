//! Scene container and the procedural random-spheres builder.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    material::{Dielectric, Lambertian, Material, MaterialId, Metal},
    Ray, Sphere,
};
use ivar_math::{gen_f32, gen_range_f32, random_vec3, random_vec3_range, Color, Interval, Vec3};
use rand::RngCore;

/// Grid half-extent of the small random spheres.
const GRID_EXTENT: i32 = 11;
/// Small spheres within this distance of the protected point are skipped.
const PROTECTED_RADIUS: f32 = 0.9;
const SMALL_RADIUS: f32 = 0.2;
const GLASS_IOR: f32 = 1.5;

/// Random stream reserved for scene construction; render columns use
/// streams `0..width`.
pub const SCENE_STREAM: u64 = u64::MAX;

/// Renderable world: surfaces plus the material table they index into.
///
/// Built once before rendering and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    world: HittableList,
    materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its handle.
    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        let id = MaterialId::new(self.materials.len() as u32);
        self.materials.push(material.into());
        id
    }

    /// Add any hittable to the world.
    pub fn add(&mut self, object: impl Into<Hittable>) {
        self.world.add(object);
    }

    /// Add a sphere with its own material.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: impl Into<Material>) {
        let id = self.add_material(material);
        self.add(Sphere::new(center, radius, id));
    }

    /// Look up a material by handle.
    ///
    /// Panics if `id` was not issued by this scene.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    /// Nearest hit against every object in the scene.
    #[inline]
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.world.hit(ray, ray_t)
    }

    /// Number of top-level objects.
    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn world(&self) -> &HittableList {
        &self.world
    }
}

/// Build the "random spheres" showcase scene.
///
/// Layout is fixed: a large ground sphere, a grid of small spheres with
/// randomly chosen materials and jittered centers, and three large feature
/// spheres. All randomness comes from `rng`, so a seeded source reproduces
/// the same scene.
pub fn random_scene(rng: &mut dyn RngCore) -> Scene {
    let mut scene = Scene::new();

    // Ground
    scene.add_sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::new(0.5, 0.5, 0.5)),
    );

    let protected = Vec3::new(4.0, 0.2, 0.0);

    for a in -GRID_EXTENT..GRID_EXTENT {
        for b in -GRID_EXTENT..GRID_EXTENT {
            let choose_mat = gen_f32(rng);
            let x = a as f32 + 0.9 * gen_f32(rng);
            let z = b as f32 + 0.9 * gen_f32(rng);
            let center = Vec3::new(x, SMALL_RADIUS, z);

            if (center - protected).length() <= PROTECTED_RADIUS {
                continue;
            }

            let material: Material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vec3(rng) * random_vec3(rng);
                Lambertian::new(albedo).into()
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                Metal::new(albedo, fuzz).into()
            } else {
                // Glass
                Dielectric::new(GLASS_IOR).into()
            };

            scene.add_sphere(center, SMALL_RADIUS, material);
        }
    }

    // Three main spheres
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Dielectric::new(GLASS_IOR));
    scene.add_sphere(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1)),
    );
    scene.add_sphere(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.0),
    );

    log::info!(
        "Built random scene: {} objects, {} materials",
        scene.len(),
        scene.material_count()
    );

    scene
}
