mod common;

use assert_matches::assert_matches;
use common::{clean_rep_angles, shallow_rep_angles, PoseBuilder, Replay};
use pretty_assertions::assert_eq;
use squat_coach::models::{
    ExerciseState, Phase, RepFault, RepVerdict, Side, Skeleton, TrackingMode,
};
use squat_coach::EngineConfig;

fn completed(states: &[ExerciseState]) -> Vec<&ExerciseState> {
    states.iter().filter(|s| s.rep_completed).collect()
}

/// Poses for an angle sequence with a per-frame adjustment
fn poses_for(
    angles: &[f32],
    adjust: impl Fn(usize, f32, PoseBuilder) -> PoseBuilder,
) -> Vec<Skeleton> {
    angles
        .iter()
        .enumerate()
        .map(|(i, &angle)| adjust(i, angle, PoseBuilder::new(angle)).build())
        .collect()
}

/// Clean rep angles with a per-frame pose adjustment
fn rep_poses(adjust: impl Fn(usize, f32, PoseBuilder) -> PoseBuilder) -> Vec<Skeleton> {
    poses_for(&clean_rep_angles(), adjust)
}

/// Descend to 90°, hold the bottom for `hold` frames, then stand
fn bottom_hold_angles(hold: usize) -> Vec<f32> {
    let mut angles = vec![170.0, 160.0, 150.0, 140.0, 130.0, 120.0, 110.0, 100.0];
    angles.extend(std::iter::repeat(90.0).take(hold));
    angles.extend([100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0, 170.0, 170.0]);
    angles
}

#[test]
fn test_clean_rep_scores_perfect() {
    let mut replay = Replay::new();
    let states = replay.angles(&clean_rep_angles());

    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(100));
    assert!(done[0].last_faults.is_empty());
    assert_eq!(done[0].rep_verdict, Some(RepVerdict::Good));
    assert_eq!(done[0].feedback.message, "PERFECT REP!");

    let last = states.last().unwrap();
    assert_eq!(last.rep_count, 1);
    assert_matches!(last.phase, Phase::Neutral);
    assert!(!last.rep_completed);
    assert_eq!(replay.analyzer.rep_count(), 1);

    let record = &replay.analyzer.history()[0];
    assert_eq!(record.rep_number, 1);
    assert!((record.min_angle - 90.0).abs() < 0.5);
    assert_eq!(record.descent_ms, Some(700));
}

#[test]
fn test_steady_sweep_rep() {
    let mut replay = Replay::new();
    let down = (0..=16).map(|i| 170.0 - 5.0 * i as f32);
    let up = (1..=16).map(|i| 90.0 + 5.0 * i as f32);
    let angles: Vec<f32> = down.chain(up).collect();

    let states = replay.angles(&angles);
    let last = states.last().unwrap();
    assert_eq!(last.rep_count, 1);
    assert_matches!(last.phase, Phase::Neutral);
    assert_eq!(last.last_score, Some(100));
    assert!(last.last_faults.is_empty());
}

#[test]
fn test_phases_visited_in_order() {
    let mut replay = Replay::new();
    let states = replay.angles(&clean_rep_angles());

    let mut phases: Vec<Phase> = states.iter().map(|s| s.phase).collect();
    phases.dedup();
    assert_eq!(
        phases,
        vec![
            Phase::Neutral,
            Phase::Descending,
            Phase::Ascending,
            Phase::Neutral
        ]
    );
}

#[test]
fn test_min_angle_never_rises_while_descending() {
    let mut replay = Replay::new();
    let states = replay.angles(&clean_rep_angles());

    for pair in states.windows(2) {
        if pair[0].phase == Phase::Descending && pair[1].phase == Phase::Descending {
            assert!(pair[1].current_min_angle <= pair[0].current_min_angle);
        }
    }
}

#[test]
fn test_shallow_rep_penalized() {
    let mut replay = Replay::new();
    let states = replay.angles(&shallow_rep_angles());

    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(50));
    assert_eq!(done[0].last_faults, vec![RepFault::ShallowDepth]);
    assert_eq!(done[0].last_fault_labels(), vec!["GO DEEPER".to_string()]);
    assert_eq!(done[0].rep_verdict, Some(RepVerdict::Bad));
    assert!(!done[0].depth_reached);
}

#[test]
fn test_partial_dip_is_not_a_rep() {
    let mut replay = Replay::new();
    let mut angles = vec![170.0, 160.0, 150.0, 140.0];
    angles.extend([130.0; 8]);
    angles.extend([140.0, 150.0, 160.0, 170.0, 170.0, 170.0]);

    let states = replay.angles(&angles);
    assert!(states.iter().all(|s| s.phase == Phase::Neutral));
    assert_eq!(states.last().unwrap().rep_count, 0);
}

#[test]
fn test_too_fast_descent() {
    let mut replay = Replay::new().frame_ms(30);
    let states = replay.angles(&clean_rep_angles());

    assert!(states.iter().any(|s| s.feedback.message == "SLOW DOWN"));
    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(85));
    assert_eq!(done[0].last_faults, vec![RepFault::TooFast]);
    assert_eq!(done[0].feedback.message, "GOOD REP");
}

#[test]
fn test_knee_valgus_detected_after_calibration() {
    let mut replay = Replay::new();
    replay.angles(&[170.0; 25]);

    let poses = rep_poses(|_, angle, builder| {
        if angle <= 130.0 {
            builder.knee_inset(0.06)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    assert!(states.iter().any(|s| s.flags.valgus));
    assert!(states.iter().any(|s| s.feedback.message == "KNEES OUT"));
    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(80));
    assert_eq!(done[0].last_faults, vec![RepFault::KneeValgus]);
}

#[test]
fn test_valgus_needs_calibrated_baseline() {
    let mut replay = Replay::new();
    let poses = rep_poses(|_, angle, builder| {
        if angle <= 130.0 {
            builder.knee_inset(0.06)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    assert!(states.iter().all(|s| !s.flags.valgus));
    assert_eq!(completed(&states)[0].last_score, Some(100));
}

#[test]
fn test_asymmetry_attributed_to_bending_leg() {
    let mut replay = Replay::new();
    let poses: Vec<Skeleton> = clean_rep_angles()
        .into_iter()
        .map(|angle| {
            PoseBuilder::new(angle)
                .legs(angle, (angle + 20.0).min(180.0))
                .build()
        })
        .collect();
    let states = replay.poses(&poses);

    assert!(states.iter().any(|s| s.flags.asymmetry));
    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(90));
    assert_eq!(done[0].last_faults, vec![RepFault::Asymmetry(Side::Left)]);
    assert_eq!(done[0].last_fault_labels(), vec!["ASYMMETRY (LEFT)".to_string()]);
}

#[test]
fn test_hip_shift_detected() {
    let mut replay = Replay::new();
    let poses = rep_poses(|i, _, builder| {
        if (10..=16).contains(&i) {
            builder.hip_shift(0.03)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    assert!(states.iter().any(|s| s.flags.hip_shift));
    let done = completed(&states);
    assert_eq!(done[0].last_score, Some(85));
    assert_eq!(done[0].last_faults, vec![RepFault::HipShift(Side::Left)]);
}

#[test]
fn test_excessive_lean() {
    let mut replay = Replay::new();
    let poses = rep_poses(|_, angle, builder| {
        if angle <= 110.0 {
            builder.torso_lean(70.0)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    assert!(states.iter().any(|s| s.flags.lean));
    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(75));
    assert_eq!(done[0].last_faults, vec![RepFault::ExcessiveLean]);
}

#[test]
fn test_lean_ignored_while_standing() {
    let mut replay = Replay::new();
    let poses: Vec<Skeleton> = (0..10)
        .map(|_| PoseBuilder::new(170.0).torso_lean(40.0).build())
        .collect();
    let states = replay.poses(&poses);
    assert!(states.iter().all(|s| !s.flags.lean));
}

#[test]
fn test_consecutive_reps() {
    let mut replay = Replay::new();
    let mut angles = clean_rep_angles();
    angles.extend(clean_rep_angles());
    let states = replay.angles(&angles);

    assert_eq!(completed(&states).len(), 2);
    assert_eq!(states.last().unwrap().rep_count, 2);
    let numbers: Vec<u32> = replay
        .analyzer
        .history()
        .iter()
        .map(|r| r.rep_number)
        .collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn test_collapse_back_into_descent_counts_rep() {
    let mut replay = Replay::new();
    let mut angles = vec![170.0, 160.0, 150.0, 140.0, 130.0, 120.0, 110.0, 100.0];
    angles.extend([90.0; 6]);
    angles.extend([100.0, 110.0]);
    angles.extend([115.0; 5]);
    angles.extend([105.0, 95.0]);
    angles.extend([90.0; 6]);
    angles.extend([100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0]);
    angles.extend([170.0; 3]);

    let states = replay.angles(&angles);
    let done = completed(&states);
    assert_eq!(done.len(), 2);
    assert_matches!(done[0].phase, Phase::Descending);
    assert_eq!(done[0].rep_count, 1);
    assert_matches!(done[1].phase, Phase::Neutral);
    assert_eq!(states.last().unwrap().rep_count, 2);
    assert!(replay.analyzer.history().iter().all(|r| r.score == 100));
}

#[test]
fn test_success_message_holds_lock() {
    let mut replay = Replay::new();
    let states = replay.angles(&clean_rep_angles());
    let done_at = states.iter().position(|s| s.rep_completed).unwrap();

    // Standing frames right after completion still show the success message
    assert_eq!(states[done_at + 1].feedback.message, "PERFECT REP!");

    let later = replay.angles(&[170.0; 25]);
    assert_eq!(later.last().unwrap().feedback.message, "STAND TALL");
}

#[test]
fn test_reset_replays_identically() {
    let mut replay = Replay::new();
    let run = |replay: &mut Replay| {
        let mut states = replay.angles(&clean_rep_angles());
        states.extend(replay.missing(3));
        states.extend(replay.angles(&shallow_rep_angles()));
        states
    };

    let first = run(&mut replay);
    replay.restart();
    assert_eq!(replay.analyzer.rep_count(), 0);
    assert!(replay.analyzer.history().is_empty());
    assert_matches!(replay.analyzer.phase(), Phase::Initializing);

    let second = run(&mut replay);
    assert_eq!(first, second);
}

#[test]
fn test_history_is_bounded() {
    let config = EngineConfig {
        history_limit: 2,
        ..EngineConfig::default()
    };
    let mut replay = Replay::with_config(config);
    for _ in 0..3 {
        replay.angles(&clean_rep_angles());
    }

    assert_eq!(replay.analyzer.rep_count(), 3);
    let numbers: Vec<u32> = replay
        .analyzer
        .history()
        .iter()
        .map(|r| r.rep_number)
        .collect();
    assert_eq!(numbers, vec![2, 3]);
}

#[test]
fn test_session_summary() {
    let mut replay = Replay::new();
    replay.angles(&clean_rep_angles());
    replay.angles(&shallow_rep_angles());

    let summary = replay.analyzer.session_summary(1);
    assert_eq!(summary.total_reps, 2);
    assert_eq!(summary.best_score, Some(100));
    assert_eq!(summary.worst_score, Some(50));
    assert_eq!(summary.average_score, Some(75.0));
    assert_eq!(summary.fault_counts.get("GO DEEPER"), Some(&1));
    assert_eq!(summary.recent.len(), 1);
    assert_eq!(summary.recent[0].rep_number, 2);

    let json = summary.to_json().unwrap();
    assert!(json.contains("\"total_reps\":2"));
}

#[test]
fn test_falling_forward_during_descent() {
    let mut replay = Replay::new();
    // Upright at descent start, then the chest drops once past the bottom
    let poses = rep_poses(|i, _, builder| {
        if i >= 9 {
            builder.torso_lean(35.0)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    assert!(states
        .iter()
        .any(|s| s.phase == Phase::Descending && s.feedback.message == "DON'T FALL FORWARD"));
    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(80));
    assert_eq!(done[0].last_faults, vec![RepFault::FallingForward]);
}

#[test]
fn test_confirmed_static_lean_overrides_falling() {
    let mut replay = Replay::new();
    let poses = poses_for(&bottom_hold_angles(15), |i, _, builder| {
        if (9..=17).contains(&i) {
            builder.torso_lean(55.0)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    // Static lean is still suspected: the fall is reported
    assert_matches!(states[16].phase, Phase::Descending);
    assert_eq!(states[16].feedback.message, "DON'T FALL FORWARD");

    // Fifth frame over the allowance confirms it and takes over
    assert_matches!(states[17].phase, Phase::Descending);
    assert_eq!(states[17].feedback.message, "CHEST UP");
    assert!(states[17].flags.lean);

    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(80));
    assert_eq!(done[0].last_faults, vec![RepFault::FallingForward]);
}

#[test]
fn test_torso_shin_mismatch_on_ascent() {
    let mut replay = Replay::new();
    let poses = rep_poses(|i, _, builder| {
        if i >= 15 {
            builder.torso_lean(20.0)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    assert_matches!(states[18].phase, Phase::Ascending);
    assert_eq!(states[18].feedback.message, "TORSO WITH SHINS");
    let done = completed(&states);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].last_score, Some(85));
    assert_eq!(done[0].last_fault_labels(), vec!["TORSO/SHIN MISMATCH".to_string()]);
}

#[test]
fn test_torso_wobble_is_instability() {
    let mut replay = Replay::new();
    let poses = rep_poses(|i, _, builder| {
        if i == 11 {
            builder.torso_lean(30.0)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    assert_eq!(states[11].feedback.message, "STAY STEADY");
    assert!(states[11].flags.lean);
    let done = completed(&states);
    assert_eq!(done[0].last_score, Some(90));
    assert_eq!(done[0].last_faults, vec![RepFault::TorsoLean]);
}

#[test]
fn test_instability_outranks_mismatch() {
    let mut replay = Replay::new();
    let poses = rep_poses(|i, _, builder| {
        if i == 16 {
            builder.torso_lean(85.0)
        } else {
            builder
        }
    });
    let states = replay.poses(&poses);

    // The jump is both unstable and out of line with the shins
    assert_matches!(states[16].phase, Phase::Ascending);
    assert_eq!(states[16].feedback.message, "STAY STEADY");
    // Held steady on the next frame, only the mismatch remains
    assert_eq!(states[17].feedback.message, "TORSO WITH SHINS");

    let done = completed(&states);
    assert_eq!(done[0].last_score, Some(85));
    assert_eq!(done[0].last_faults, vec![RepFault::TorsoShinMismatch]);
}

#[test]
fn test_lean_history_cleared_by_tracking_loss() {
    let mut replay = Replay::new();
    let descent: Vec<f32> = vec![
        170.0, 160.0, 150.0, 140.0, 130.0, 120.0, 110.0, 100.0, 90.0, 90.0,
    ];
    replay.poses(&poses_for(&descent, |_, _, builder| builder.torso_lean(40.0)));

    let gap = replay.missing(12);
    assert_eq!(gap.last().unwrap().tracking_mode, TrackingMode::Lost);

    // Upright after the gap: no frame-to-frame change is seen
    let recovered = replay.poses(&poses_for(&[90.0; 5], |_, _, builder| builder));
    for state in &recovered {
        assert_eq!(state.tracking_mode, TrackingMode::Optimal);
        assert_matches!(state.phase, Phase::Descending);
        assert!(!state.flags.lean);
    }
}

#[test]
fn test_initializing_force_calibrates() {
    let mut replay = Replay::new();
    let states = replay.angles(&[117.0; 35]);

    assert!(states[..29]
        .iter()
        .all(|s| s.phase == Phase::Initializing && s.feedback.message == "STAND IN FRAME"));
    assert_matches!(states[29].phase, Phase::Neutral);
    assert_eq!(states[29].feedback.message, "READY");
    assert!(states[29..].iter().all(|s| s.phase == Phase::Neutral));
}

#[test]
fn test_initializing_straight_into_descent() {
    let mut replay = Replay::new();
    let mut angles = vec![100.0, 95.0];
    angles.extend([90.0; 5]);
    angles.extend([100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0, 170.0]);
    let states = replay.angles(&angles);

    assert_matches!(states[0].phase, Phase::Descending);
    assert_eq!(states[0].current_min_angle, states[0].angle);
    let last = states.last().unwrap();
    assert_eq!(last.rep_count, 1);
    assert_matches!(last.phase, Phase::Neutral);
    assert_eq!(last.last_score, Some(100));
}
