//! Tests for MasterPolicy.

use super::*;
use pretty_assertions::assert_eq;

fn loud() -> StereoOutput {
    StereoOutput {
        left: vec![0.0, 0.5, 1.5, -2.5],
        right: vec![0.0, -0.5, 1.2, 0.3],
    }
}

#[test]
fn test_default_is_soft_clip() {
    assert_eq!(
        MasterPolicy::default(),
        MasterPolicy::SoftClip {
            threshold: DEFAULT_SOFT_CLIP_THRESHOLD
        }
    );
}

#[test]
fn test_apply_leaves_source_untouched() {
    let source = loud();
    let _ = MasterPolicy::HardClip.apply(&source);
    assert_eq!(source, loud());
}

#[test]
fn test_raw_is_identity() {
    assert_eq!(MasterPolicy::Raw.apply(&loud()), loud());
}

#[test]
fn test_hard_clip() {
    let out = MasterPolicy::HardClip.apply(&loud());
    assert_eq!(out.left, vec![0.0, 0.5, 1.0, -1.0]);
}

#[test]
fn test_soft_clip_bounds_everything() {
    let out = MasterPolicy::default().apply(&loud());
    assert!(peak(&out) < 1.0);
    assert_eq!(out.left[1], 0.5);
}

#[test]
fn test_normalize() {
    let out = MasterPolicy::Normalize { headroom_db: 0.0 }.apply(&loud());
    assert!((peak(&out) - 1.0).abs() < 1e-12);
    assert!((out.left[3] + 1.0).abs() < 1e-12);
}

#[test]
fn test_parse_policies() {
    assert_eq!("raw".parse::<MasterPolicy>().unwrap(), MasterPolicy::Raw);
    assert_eq!(
        "hard-clip".parse::<MasterPolicy>().unwrap(),
        MasterPolicy::HardClip
    );
    assert_eq!(
        "soft-clip".parse::<MasterPolicy>().unwrap(),
        MasterPolicy::SoftClip { threshold: 0.8 }
    );
    assert_eq!(
        "soft-clip:0.6".parse::<MasterPolicy>().unwrap(),
        MasterPolicy::SoftClip { threshold: 0.6 }
    );
    assert_eq!(
        "Normalize:-3".parse::<MasterPolicy>().unwrap(),
        MasterPolicy::Normalize { headroom_db: -3.0 }
    );
}

#[test]
fn test_parse_rejects_bad_input() {
    assert!("loud".parse::<MasterPolicy>().is_err());
    assert!("soft-clip:abc".parse::<MasterPolicy>().is_err());
    assert!("soft-clip:1.5".parse::<MasterPolicy>().is_err());
    assert!("normalize:nan".parse::<MasterPolicy>().is_err());
}

#[test]
fn test_display_parses_back() {
    for policy in [
        MasterPolicy::Raw,
        MasterPolicy::HardClip,
        MasterPolicy::SoftClip { threshold: 0.7 },
        MasterPolicy::Normalize { headroom_db: -1.5 },
    ] {
        assert_eq!(policy.to_string().parse::<MasterPolicy>().unwrap(), policy);
    }
}
