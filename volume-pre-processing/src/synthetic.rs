/// Synthetic test volumes: a traced spiral and a scene of spheres, a torus and tubes
use crate::error::{VolumeError, VolumeResult};
use crate::progress::progress_bar;
use constants::synthetic::{
    CURVED_TUBE_THICKNESS, HOLLOW_SPHERE_THICKNESS, MAX_SPIRAL_SCALE, SPIRAL_STEP,
    STRAIGHT_TUBE_RADIUS, STRAIGHT_TUBE_SAMPLES, TORUS_THICKNESS,
};
use ndarray::parallel::prelude::*;
use ndarray::{Array3, Axis};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::info;

type Point = (f64, f64, f64);

fn distance(a: Point, b: Point) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2) + (a.2 - b.2).powi(2)).sqrt()
}

/// Trace the curve (t cos t, t sin t, 2t) through an N^3 volume.
///
/// `scale` controls how much of the curve fits: x and y are centred,
/// z starts at the first slice. Tracing stops at the first sample that
/// falls outside the volume, which happens once t reaches `scale`, so
/// `scale` is limited to `MAX_SPIRAL_SCALE`.
pub fn gen_spiral(size: usize, scale: f64) -> VolumeResult<Array3<f64>> {
    if size == 0 {
        return Err(VolumeError::invalid("size", size));
    }
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_SPIRAL_SCALE {
        return Err(VolumeError::invalid("scale", scale));
    }

    let mut volume = Array3::<f64>::zeros((size, size, size));
    let n = size as f64;
    let limit = size as i64;
    let max_steps = (scale / SPIRAL_STEP).ceil() as u64 + 1;
    let mut samples = 0usize;

    for step in 0..=max_steps {
        let t = step as f64 * SPIRAL_STEP;
        let x = t * t.cos();
        let y = t * t.sin();
        let z = 2.0 * t;

        // Truncation toward zero, so samples just below 0 still land on index 0.
        let xi = ((x / (2.0 * scale) + 0.5) * n) as i64;
        let yi = ((y / (2.0 * scale) + 0.5) * n) as i64;
        let zi = ((z / (2.0 * scale)) * n) as i64;

        if xi < 0 || yi < 0 || zi < 0 || xi >= limit || yi >= limit || zi >= limit {
            break;
        }

        volume[[zi as usize, yi as usize, xi as usize]] = 1.0;
        samples += 1;
    }

    info!("Traced spiral with {} samples into {}^3 volume", samples, size);
    Ok(volume)
}

/// Geometry of the sample scene for a given volume shape.
#[derive(Debug, Clone)]
pub struct SampleScene {
    solid_center: Point,
    solid_radius: f64,
    hollow_center: Point,
    hollow_radius: f64,
    torus_center: Point,
    torus_radius: f64,
    curve_center: Point,
    curve_radius: f64,
    tube_path: Vec<Point>,
}

impl SampleScene {
    pub fn new(shape: (usize, usize, usize)) -> Self {
        let (s0, s1, s2) = shape;
        let f = |v: usize| v as f64;

        let tube_path = (0..STRAIGHT_TUBE_SAMPLES)
            .map(|k| {
                let t = k as f64 / (STRAIGHT_TUBE_SAMPLES - 1) as f64;
                (
                    t * f(s0 / 2) + f(s0 / 2),
                    t * f(s1 / 2) + f(s1 / 2),
                    t * f(s2 / 2),
                )
            })
            .collect();

        Self {
            solid_center: (f(s0 / 4), f(s1 / 4), f(s2 / 4)),
            solid_radius: f(s0 / 10),
            hollow_center: (f(s0 - s0 / 4), f(s1 - s1 / 4), f(s2 - s2 / 4)),
            hollow_radius: f(s0 / 10),
            torus_center: (f(s0 / 4), f(s1 / 2), f(s2 - s2 / 4)),
            torus_radius: f(s0 / 8),
            curve_center: (
                f(s0 - s0 / 3),
                f(s1 / 8),
                (-(s2 as i64)).div_euclid(6) as f64,
            ),
            curve_radius: (f(s0) / 1.5).floor(),
            tube_path,
        }
    }

    /// Whether the voxel at (x, y, z) lies inside any of the shapes.
    pub fn contains(&self, p: Point) -> bool {
        self.in_solid_sphere(p)
            || self.in_hollow_sphere(p)
            || self.in_torus(p)
            || self.in_curved_tube(p)
            || self.in_straight_tube(p)
    }

    fn in_solid_sphere(&self, p: Point) -> bool {
        distance(p, self.solid_center) <= self.solid_radius
    }

    fn in_hollow_sphere(&self, p: Point) -> bool {
        let d = distance(p, self.hollow_center);
        self.hollow_radius - HOLLOW_SPHERE_THICKNESS <= d && d <= self.hollow_radius
    }

    /// Ring lies in the (x, y) plane.
    fn in_torus(&self, p: Point) -> bool {
        let (x, y, z) = p;
        let c = self.torus_center;
        let r = self.torus_radius;
        let ring = ((y - c.1).powi(2) + (x - c.0).powi(2)).sqrt();

        r - TORUS_THICKNESS <= ring
            && ring <= r + TORUS_THICKNESS
            && (z - c.2).abs() <= TORUS_THICKNESS
            && ((ring - r).powi(2) + (z - c.2).powi(2)).sqrt() <= TORUS_THICKNESS
    }

    /// Ring lies in the (y, z) plane; only the arc inside the volume shows.
    fn in_curved_tube(&self, p: Point) -> bool {
        let (x, y, z) = p;
        let c = self.curve_center;
        let r = self.curve_radius;
        let ring = ((y - c.1).powi(2) + (z - c.2).powi(2)).sqrt();

        r - CURVED_TUBE_THICKNESS <= ring
            && ring <= r + CURVED_TUBE_THICKNESS
            && (x - c.0).abs() <= CURVED_TUBE_THICKNESS
            && ((ring - r).powi(2) + (x - c.0).powi(2)).sqrt() <= CURVED_TUBE_THICKNESS
    }

    fn in_straight_tube(&self, p: Point) -> bool {
        self.tube_path
            .iter()
            .any(|&q| distance(p, q) <= STRAIGHT_TUBE_RADIUS)
    }
}

/// Rasterise the sample scene into a volume of `shape`, indexed (x, y, z)
/// along the three axes, with optional additive Gaussian noise.
///
/// Shape voxels are 1, background 0. Negative values left by the noise
/// are clamped to 0.
pub fn gen_sample<R: Rng + ?Sized>(
    shape: (usize, usize, usize),
    noise: f64,
    rng: &mut R,
) -> VolumeResult<Array3<f64>> {
    if !noise.is_finite() || noise < 0.0 {
        return Err(VolumeError::invalid("noise", noise));
    }

    let scene = SampleScene::new(shape);
    let mut volume = Array3::<f64>::zeros(shape);

    let pb = progress_bar(shape.0 as u64, "planes", "Rasterising sample scene");
    volume
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(x, mut plane)| {
            for ((y, z), voxel) in plane.indexed_iter_mut() {
                if scene.contains((x as f64, y as f64, z as f64)) {
                    *voxel = 1.0;
                }
            }
            pb.inc(1);
        });
    pb.finish_with_message("Sample scene rasterised");

    if noise != 0.0 {
        let dist = Normal::new(0.0, noise).map_err(|_| VolumeError::invalid("noise", noise))?;
        volume.mapv_inplace(|v| v + dist.sample(&mut *rng));
    }
    volume.mapv_inplace(|v| v.max(0.0));

    info!(
        "Generated sample volume {:?} with {} foreground voxels",
        shape,
        volume.iter().filter(|&&v| v >= 1.0).count()
    );
    Ok(volume)
}
