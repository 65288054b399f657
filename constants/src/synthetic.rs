/// Parameter step used when tracing the spiral curve
pub const SPIRAL_STEP: f64 = 0.00001;

/// Shell thickness of the hollow sphere (voxels)
pub const HOLLOW_SPHERE_THICKNESS: f64 = 2.0;

/// Tube radius of the torus (voxels)
pub const TORUS_THICKNESS: f64 = 3.0;

/// Tube radius of the curved tube (voxels)
pub const CURVED_TUBE_THICKNESS: f64 = 2.0;

/// Radius of the straight tube (voxels)
pub const STRAIGHT_TUBE_RADIUS: f64 = 2.0;

/// Number of samples along the straight tube centre line
pub const STRAIGHT_TUBE_SAMPLES: usize = 100;

/// Default side length of generated volumes
pub const DEFAULT_VOLUME_SIZE: usize = 64;

/// Default spiral scale factor
pub const DEFAULT_SPIRAL_SCALE: f64 = 10.0;

/// Largest spiral scale accepted; the curve needs about `scale / SPIRAL_STEP` samples
pub const MAX_SPIRAL_SCALE: f64 = 1000.0;
