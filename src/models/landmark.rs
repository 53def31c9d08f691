/// Landmark models and the shared joint index table
///
/// This module provides the per-joint sample type, the fixed 33-landmark
/// skeleton consumed by the analysis engine, and the single enumeration of
/// landmark indices every component reads through.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Number of landmarks produced by the upstream pose model
pub const LANDMARK_COUNT: usize = 33;

/// Number of values per landmark in a flat buffer (x, y, z, visibility)
pub const VALUES_PER_LANDMARK: usize = 4;

/// A single 3D joint sample in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (normalized 0-1)
    pub x: f32,
    /// Y coordinate (normalized 0-1, grows downwards)
    pub y: f32,
    /// Relative depth
    pub z: f32,
    /// Detection visibility (0-1), absent when the model did not report one
    pub visibility: Option<f32>,
}

impl Landmark {
    /// Create a landmark with a known visibility
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }

    /// Visibility with an absent value treated as 0
    pub fn visibility_or_zero(&self) -> f32 {
        self.visibility.unwrap_or(0.0)
    }

    /// Linear interpolation towards `other` by `t` (0 = self, 1 = other)
    pub fn lerp(&self, other: &Landmark, t: f32) -> Landmark {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        let visibility = match (self.visibility, other.visibility) {
            (None, None) => None,
            (a, b) => Some(mix(a.unwrap_or(0.0), b.unwrap_or(0.0))),
        };

        Landmark {
            x: mix(self.x, other.x),
            y: mix(self.y, other.y),
            z: mix(self.z, other.z),
            visibility,
        }
    }
}

/// Body landmark indices of the 33-point pose topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Position of this landmark in a skeleton
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get landmark name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    /// Get all landmarks in index order
    pub fn all() -> [Self; LANDMARK_COUNT] {
        [
            Self::Nose,
            Self::LeftEyeInner,
            Self::LeftEye,
            Self::LeftEyeOuter,
            Self::RightEyeInner,
            Self::RightEye,
            Self::RightEyeOuter,
            Self::LeftEar,
            Self::RightEar,
            Self::MouthLeft,
            Self::MouthRight,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftPinky,
            Self::RightPinky,
            Self::LeftIndex,
            Self::RightIndex,
            Self::LeftThumb,
            Self::RightThumb,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
            Self::LeftHeel,
            Self::RightHeel,
            Self::LeftFootIndex,
            Self::RightFootIndex,
        ]
    }
}

/// Hip, knee and ankle of the left leg
pub const LEFT_LEG: [PoseLandmark; 3] = [
    PoseLandmark::LeftHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::LeftAnkle,
];

/// Hip, knee and ankle of the right leg
pub const RIGHT_LEG: [PoseLandmark; 3] = [
    PoseLandmark::RightHip,
    PoseLandmark::RightKnee,
    PoseLandmark::RightAnkle,
];

/// Shoulders and hips, required for torso measurements
pub const TORSO: [PoseLandmark; 4] = [
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
];

/// Lower-body joints whose visibility drives stabilizer confidence
pub const LOWER_BODY: [PoseLandmark; 6] = [
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::RightKnee,
    PoseLandmark::LeftAnkle,
    PoseLandmark::RightAnkle,
];

/// One frame of pose landmarks with a guaranteed length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct Skeleton {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Skeleton {
    /// Wrap an already sized landmark array
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Build a skeleton from a caller-provided landmark list
    ///
    /// A list of the wrong length is a collaborator bug and is rejected.
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Result<Self> {
        let actual = landmarks.len();
        let landmarks: [Landmark; LANDMARK_COUNT] =
            landmarks
                .try_into()
                .map_err(|_| AnalysisError::MalformedSkeleton {
                    expected: LANDMARK_COUNT,
                    actual,
                })?;

        Ok(Self { landmarks })
    }

    /// Build a skeleton from a flat `x, y, z, visibility` buffer (132 values)
    pub fn from_flat(data: &[f32]) -> Result<Self> {
        if data.len() != LANDMARK_COUNT * VALUES_PER_LANDMARK {
            return Err(AnalysisError::MalformedSkeleton {
                expected: LANDMARK_COUNT * VALUES_PER_LANDMARK,
                actual: data.len(),
            });
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (slot, chunk) in landmarks
            .iter_mut()
            .zip(data.chunks_exact(VALUES_PER_LANDMARK))
        {
            *slot = Landmark::new(chunk[0], chunk[1], chunk[2], chunk[3]);
        }

        Ok(Self { landmarks })
    }

    /// Get a landmark by name
    pub fn get(&self, landmark: PoseLandmark) -> &Landmark {
        &self.landmarks[landmark.index()]
    }

    /// Mutable access, used by builders and tests
    pub fn get_mut(&mut self, landmark: PoseLandmark) -> &mut Landmark {
        &mut self.landmarks[landmark.index()]
    }

    /// All landmarks in index order
    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Midpoint of two landmarks as `(x, y)`
    pub fn midpoint(&self, a: PoseLandmark, b: PoseLandmark) -> (f32, f32) {
        let (a, b) = (self.get(a), self.get(b));
        ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Average visibility over a set of landmarks (absent counts as 0)
    pub fn average_visibility(&self, indices: &[PoseLandmark]) -> f32 {
        if indices.is_empty() {
            return 0.0;
        }
        let sum: f32 = indices
            .iter()
            .map(|&idx| self.get(idx).visibility_or_zero())
            .sum();
        sum / indices.len() as f32
    }

    /// Per-landmark interpolation towards `other` by `t`
    pub fn lerp(&self, other: &Skeleton, t: f32) -> Skeleton {
        let mut landmarks = self.landmarks;
        for (slot, target) in landmarks.iter_mut().zip(other.landmarks.iter()) {
            *slot = slot.lerp(target, t);
        }
        Skeleton { landmarks }
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new([Landmark::default(); LANDMARK_COUNT])
    }
}

impl TryFrom<Vec<Landmark>> for Skeleton {
    type Error = AnalysisError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self> {
        Self::from_landmarks(landmarks)
    }
}

impl From<Skeleton> for Vec<Landmark> {
    fn from(skeleton: Skeleton) -> Self {
        skeleton.landmarks.to_vec()
    }
}
