use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const EARTH_GRAVITY_MPS2: f64 = 9.8;
pub const KMH_PER_MPS: f64 = 3.6;

/// One launch scenario. Its position in the input list is its identity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Throw {
    pub angle_deg: f64,
    pub speed_kmh: f64,
}

impl Throw {
    pub fn new(angle_deg: f64, speed_kmh: f64) -> Self {
        Self {
            angle_deg,
            speed_kmh,
        }
    }

    /// Legend text, e.g. `45° @ 20 km/h`.
    pub fn label(&self) -> String {
        format!("{}° @ {} km/h", self.angle_deg, self.speed_kmh)
    }
}

/// How the visible path ends when the projectile comes back to the ground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointMode {
    /// Stop at the last uniform sample still above ground.
    #[default]
    Sampled,
    /// Same samples, plus the exact ground crossing at `t = 2·vy/g`.
    AnalyticLanding,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationBounds {
    pub gravity_mps2: f64,
    pub max_time_s: f64,
    pub max_distance_m: f64,
    pub max_height_m: f64,
    pub sample_count: usize,
    pub endpoint: EndpointMode,
}

impl Default for SimulationBounds {
    fn default() -> Self {
        Self {
            gravity_mps2: EARTH_GRAVITY_MPS2,
            max_time_s: 10.0,
            max_distance_m: 100.0,
            max_height_m: 30.0,
            sample_count: 200,
            endpoint: EndpointMode::Sampled,
        }
    }
}

impl SimulationBounds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity_mps2.is_finite()
            || !self.max_time_s.is_finite()
            || !self.max_distance_m.is_finite()
            || !self.max_height_m.is_finite()
        {
            return Err(ConfigError::Invalid(
                "simulation bounds must be finite numbers".to_string(),
            ));
        }
        if self.sample_count < 2 {
            return Err(ConfigError::SampleCount(self.sample_count));
        }
        if self.max_time_s <= 0.0 {
            return Err(ConfigError::MaxTime(self.max_time_s));
        }
        if self.max_distance_m <= 0.0 {
            return Err(ConfigError::MaxDistance(self.max_distance_m));
        }
        if self.max_height_m <= 0.0 {
            return Err(ConfigError::MaxHeight(self.max_height_m));
        }
        Ok(())
    }
}

/// Visible flight path of one throw, in time order. May be empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<(f64, f64)>,
}

impl Trajectory {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    /// Highest retained sample.
    pub fn apex(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

pub fn kmh_to_mps(speed_kmh: f64) -> f64 {
    speed_kmh / KMH_PER_MPS
}

pub fn velocity_components(angle_deg: f64, speed_mps: f64) -> (f64, f64) {
    let theta = angle_deg.to_radians();
    let vx = speed_mps * theta.cos();
    let vy = speed_mps * theta.sin();
    (vx, vy)
}

pub fn position_at(vx: f64, vy: f64, gravity_mps2: f64, time_s: f64) -> (f64, f64) {
    let x = vx * time_s;
    let y = (vy * time_s) - (0.5 * gravity_mps2 * time_s * time_s);
    (x, y)
}

/// Time at which a launch from ground level comes back down to height 0.
pub fn landing_time(vy: f64, gravity_mps2: f64) -> Option<f64> {
    if vy <= 0.0 || gravity_mps2 <= 0.0 {
        return None;
    }
    Some(2.0 * vy / gravity_mps2)
}

/// `sample_count` instants evenly spaced over `[0, max_time_s]`, both ends included.
pub fn sample_times(max_time_s: f64, sample_count: usize) -> impl Iterator<Item = f64> {
    let last = sample_count.saturating_sub(1).max(1) as f64;
    (0..sample_count).map(move |i| (i as f64 * max_time_s) / last)
}

pub fn compute(throw: Throw, bounds: &SimulationBounds) -> Result<Trajectory, ConfigError> {
    if bounds.sample_count < 2 {
        return Err(ConfigError::SampleCount(bounds.sample_count));
    }
    // No time elapses, so nothing leaves the launch point.
    if bounds.max_time_s <= 0.0 {
        return Ok(Trajectory::default());
    }

    let (vx, vy) = velocity_components(throw.angle_deg, kmh_to_mps(throw.speed_kmh));
    let g = bounds.gravity_mps2;

    let mut points = Vec::new();
    let mut last_kept_s = None;
    for t in sample_times(bounds.max_time_s, bounds.sample_count) {
        let (x, y) = position_at(vx, vy, g, t);
        if x <= bounds.max_distance_m && y >= 0.0 {
            points.push((x, y));
            last_kept_s = Some(t);
        }
    }

    if bounds.endpoint == EndpointMode::AnalyticLanding {
        if let (Some(last_s), Some(t_land)) = (last_kept_s, landing_time(vy, g)) {
            let x_land = vx * t_land;
            if t_land > last_s && t_land <= bounds.max_time_s && x_land <= bounds.max_distance_m {
                points.push((x_land, 0.0));
            }
        }
    }

    Ok(Trajectory { points })
}

/// One trajectory per throw, in input order.
pub fn compute_all(
    throws: &[Throw],
    bounds: &SimulationBounds,
) -> Result<Vec<Trajectory>, ConfigError> {
    throws.iter().map(|throw| compute(*throw, bounds)).collect()
}
