use clap::ValueEnum;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32, // metres, right
    pub y: f32, // metres, up
    pub z: f32, // metres, towards the viewer (forward is -z)
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline(always)]
    pub fn distance(&self, other: &Vec3) -> f32 {
        (*self - *other).length()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Linear RGB, each channel in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance in RGB space.
    #[inline(always)]
    pub fn distance(&self, other: &Rgb) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// World pose of the placement anchor. Token positions are local to it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorPose {
    pub translation: Vec3,
    /// Rotation about the vertical axis, radians.
    pub yaw: f32,
}

impl AnchorPose {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            yaw: 0.0,
        }
    }

    /// Maps an anchor-local point into world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        let (s, c) = self.yaw.sin_cos();
        let rotated = Vec3::new(local.x * c + local.z * s, local.y, -local.x * s + local.z * c);
        rotated + self.translation
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Tokens rest in a small volume above a detected surface.
    #[default]
    Anchored,
    /// Tokens float in a band in front of the head pose.
    HeadLocked,
}

/// Axis-aligned box that candidate token positions are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    pub min: Vec3,
    pub max: Vec3,
}

impl SpawnRegion {
    pub fn for_mode(mode: PresentationMode, spread: f32, forward: f32, depth_jitter: f32) -> Self {
        match mode {
            PresentationMode::Anchored => Self {
                min: Vec3::new(-spread, 0.05_f32.min(spread), -spread),
                max: Vec3::new(spread, spread, spread),
            },
            PresentationMode::HeadLocked => Self {
                min: Vec3::new(-spread, -spread / 2.0, -forward - depth_jitter),
                max: Vec3::new(spread, spread, -forward + depth_jitter),
            },
        }
    }

    pub fn sample(&self, rng: &mut Rng) -> Vec3 {
        Vec3::new(
            lerp(self.min.x, self.max.x, rng.f32()),
            lerp(self.min.y, self.max.y, rng.f32()),
            lerp(self.min.z, self.max.z, rng.f32()),
        )
    }

    pub fn contains(&self, p: &Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

#[inline(always)]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
