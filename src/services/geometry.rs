/// Joint geometry
///
/// Pure functions over landmark coordinates: the 3D angle at a joint,
/// planar distances, torso-normalized distances and segment lean.

use crate::models::{Landmark, PoseLandmark, Skeleton};

/// Torso lengths below this are treated as unusable
pub const MIN_TORSO_SCALE: f32 = 0.01;

/// Vertical deltas below this make a segment count as horizontal
const MIN_VERTICAL_DELTA: f32 = 0.01;

/// Calculate the angle at `b` between rays `b→a` and `b→c`, in degrees
///
/// Uses the 3D dot product: cos(θ) = (BA · BC) / (|BA| × |BC|).
/// A zero-length ray returns 180° (no bend).
pub fn joint_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    let ba = (a.x - b.x, a.y - b.y, a.z - b.z);
    let bc = (c.x - b.x, c.y - b.y, c.z - b.z);

    let dot = ba.0 * bc.0 + ba.1 * bc.1 + ba.2 * bc.2;
    let mag_ba = (ba.0 * ba.0 + ba.1 * ba.1 + ba.2 * ba.2).sqrt();
    let mag_bc = (bc.0 * bc.0 + bc.1 * bc.1 + bc.2 * bc.2).sqrt();

    if mag_ba == 0.0 || mag_bc == 0.0 {
        return 180.0;
    }

    let cos_angle = (dot / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Planar Euclidean distance
pub fn distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Average shoulder-hip length over both sides
pub fn torso_scale(skeleton: &Skeleton) -> f32 {
    let left = distance(
        skeleton.get(PoseLandmark::LeftShoulder),
        skeleton.get(PoseLandmark::LeftHip),
    );
    let right = distance(
        skeleton.get(PoseLandmark::RightShoulder),
        skeleton.get(PoseLandmark::RightHip),
    );
    (left + right) / 2.0
}

/// Distance between two landmarks in torso lengths
///
/// Returns 0 when the torso is missing or collapsed to avoid explosive ratios.
pub fn normalized_distance(skeleton: &Skeleton, a: PoseLandmark, b: PoseLandmark) -> f32 {
    let torso_points = [
        PoseLandmark::LeftShoulder,
        PoseLandmark::RightShoulder,
        PoseLandmark::LeftHip,
        PoseLandmark::RightHip,
    ];
    if torso_points
        .iter()
        .any(|&p| skeleton.get(p).visibility_or_zero() <= 0.0)
    {
        return 0.0;
    }

    let scale = torso_scale(skeleton);
    if scale < MIN_TORSO_SCALE {
        return 0.0;
    }

    distance(skeleton.get(a), skeleton.get(b)) / scale
}

/// Lean of the segment from `upper` to `lower` away from vertical, in degrees
///
/// `atan(|Δx| / Δy)`; a segment that is not clearly vertical (Δy < 0.01)
/// reports 90°.
pub fn segment_lean(upper: (f32, f32), lower: (f32, f32)) -> f32 {
    let dx = (lower.0 - upper.0).abs();
    let dy = lower.1 - upper.1;
    if dy < MIN_VERTICAL_DELTA {
        return 90.0;
    }
    (dx / dy).atan().to_degrees()
}

/// Torso lean from the shoulder midpoint to the hip midpoint
pub fn torso_lean(skeleton: &Skeleton) -> f32 {
    segment_lean(
        skeleton.midpoint(PoseLandmark::LeftShoulder, PoseLandmark::RightShoulder),
        skeleton.midpoint(PoseLandmark::LeftHip, PoseLandmark::RightHip),
    )
}

/// Shin lean from the knee midpoint to the ankle midpoint
pub fn shin_lean(skeleton: &Skeleton) -> f32 {
    segment_lean(
        skeleton.midpoint(PoseLandmark::LeftKnee, PoseLandmark::RightKnee),
        skeleton.midpoint(PoseLandmark::LeftAnkle, PoseLandmark::RightAnkle),
    )
}
