use rigplay_core::{
    config::PlaybackConfig,
    data::AnimationData,
    interp::{Curve, Spin},
    mainline::{Mainline, MainlineKey, ObjectRef},
    parse_entity_json,
    pose::{Part, PartPose, Vec2},
    timeline::{Timeline, TimelineKey, TimelineKind},
    Animation, TimelineId,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn bone_key(time: u32, x: f32, curve: Curve) -> TimelineKey {
    TimelineKey {
        time,
        curve,
        spin: Spin::CounterClockwise,
        part: Part::Bone(PartPose {
            position: Vec2::new(x, 0.0),
            ..PartPose::IDENTITY
        }),
    }
}

/// Single bone timeline; one mainline key per timeline key below `length`.
fn mk_track(length: u32, looping: bool, keys: Vec<TimelineKey>, main_curve: Curve) -> AnimationData {
    let mut main_keys: Vec<MainlineKey> = keys
        .iter()
        .enumerate()
        .filter(|(_, k)| k.time < length)
        .map(|(i, k)| MainlineKey {
            time: k.time,
            curve: main_curve.clone(),
            objects: vec![ObjectRef {
                timeline: TimelineId(0),
                key: i,
                parent: None,
            }],
        })
        .collect();
    if main_keys.is_empty() {
        main_keys.push(MainlineKey {
            time: 0,
            curve: main_curve,
            objects: vec![ObjectRef {
                timeline: TimelineId(0),
                key: 0,
                parent: None,
            }],
        });
    }
    AnimationData {
        name: "track".into(),
        length,
        looping,
        mainline: Mainline::new(main_keys),
        timelines: vec![Timeline {
            id: TimelineId(0),
            name: "block".into(),
            kind: TimelineKind::Bone,
            keys,
        }],
    }
}

fn x_of(anim: &Animation) -> f32 {
    anim.parts()[0].pose().position.x
}

#[test]
fn linear_slide_samples_and_wraps() {
    let json = rigplay_test_fixtures::entities::json("linear_slide").expect("fixture");
    let mut entity = parse_entity_json(&json).expect("valid entity");
    let anim = entity.animation_mut("slide").expect("slide animation");

    anim.set_time(250.0);
    anim.update(0.0);
    approx(x_of(anim), 25.0, 1e-4);
    approx(anim.parts()[0].pose().position.y, 0.0, 0.0);

    anim.set_time(1100.0);
    assert_eq!(anim.time(), 100.0);
    anim.update(0.0);
    approx(x_of(anim), 10.0, 1e-4);
}

#[test]
fn one_shot_clamps_at_length_and_reports_done() {
    let data = mk_track(
        500,
        false,
        vec![bone_key(0, 0.0, Curve::Linear), bone_key(500, 50.0, Curve::Linear)],
        Curve::Linear,
    );
    let mut anim = Animation::new(data).unwrap();
    let mut steps = 0;
    while !anim.is_done() {
        anim.update(37.0);
        assert!(anim.time() <= 500.0);
        steps += 1;
        assert!(steps < 100, "never finished");
    }
    assert_eq!(anim.time(), 500.0);
    approx(x_of(&anim), 50.0, 1e-4);

    anim.update(1_000.0);
    assert_eq!(anim.time(), 500.0);
    assert!(anim.is_done());
}

#[test]
fn looping_time_stays_in_range() {
    let data = mk_track(
        1000,
        true,
        vec![bone_key(0, 0.0, Curve::Linear), bone_key(500, 100.0, Curve::Linear)],
        Curve::Linear,
    );
    let mut anim = Animation::new(data).unwrap();
    for _ in 0..1_000 {
        anim.update(16.7);
        assert!((0.0..1000.0).contains(&anim.time()), "t={}", anim.time());
    }
    for step in [12_345.6, 999.999, 1000.0, 2_000_000.0] {
        anim.update(step);
        assert!((0.0..1000.0).contains(&anim.time()), "t={}", anim.time());
        assert!(!anim.is_done());
    }
}

#[test]
fn negative_speed_runs_backwards() {
    let data = mk_track(
        1000,
        true,
        vec![bone_key(0, 0.0, Curve::Linear), bone_key(500, 100.0, Curve::Linear)],
        Curve::Linear,
    );
    let mut anim = Animation::new(data).unwrap();
    anim.set_speed(-1.0);
    anim.update(100.0);
    approx(anim.time(), 900.0, 1e-3);

    let mut one_shot = Animation::new(mk_track(
        1000,
        false,
        vec![bone_key(0, 0.0, Curve::Linear)],
        Curve::Linear,
    ))
    .unwrap();
    one_shot.set_speed(-2.0);
    one_shot.update(100.0);
    assert_eq!(one_shot.time(), 0.0);
}

#[test]
fn single_key_one_shot_is_frozen() {
    let key = TimelineKey {
        time: 0,
        curve: Curve::Linear,
        spin: Spin::CounterClockwise,
        part: Part::Bone(PartPose {
            position: Vec2::new(7.0, 3.0),
            angle: 0.4,
            scale: Vec2::new(2.0, 1.0),
            pivot: Vec2::new(0.5, 0.5),
        }),
    };
    let expected = *key.part.pose();
    let mut anim = Animation::new(mk_track(500, false, vec![key], Curve::Linear)).unwrap();
    for t in [0.0, 1.0, 250.0, 499.0, 500.0, 10_000.0] {
        anim.set_time(t);
        anim.update(0.0);
        assert_eq!(*anim.parts()[0].pose(), expected, "t={t}");
    }
}

#[test]
fn last_key_holds_after_its_time() {
    let data = mk_track(
        500,
        false,
        vec![bone_key(0, 0.0, Curve::Linear), bone_key(200, 50.0, Curve::Linear)],
        Curve::Linear,
    );
    let mut anim = Animation::new(data).unwrap();
    for t in [200.0, 300.0, 450.0, 500.0] {
        anim.set_time(t);
        anim.update(0.0);
        assert_eq!(x_of(&anim), 50.0, "t={t}");
    }
}

#[test]
fn looping_last_key_tweens_towards_first() {
    let data = mk_track(
        1000,
        true,
        vec![bone_key(0, 0.0, Curve::Linear), bone_key(500, 100.0, Curve::Linear)],
        Curve::Linear,
    );
    let mut anim = Animation::new(data).unwrap();
    anim.set_time(750.0);
    anim.update(0.0);
    approx(x_of(&anim), 50.0, 1e-4);
}

#[test]
fn before_first_mainline_key_uses_previous_loop() {
    let data = mk_track(
        1000,
        true,
        vec![bone_key(200, 0.0, Curve::Linear), bone_key(600, 100.0, Curve::Linear)],
        Curve::Linear,
    );
    let mut anim = Animation::new(data).unwrap();
    anim.set_time(100.0);
    anim.update(0.0);
    // Segment 600 -> 1200 (first key of next loop), 500ms in.
    approx(x_of(&anim), 100.0 - 100.0 * 500.0 / 600.0, 1e-3);
}

#[test]
fn mainline_curve_reshapes_ratio_before_key_curve() {
    let data = mk_track(
        1000,
        false,
        vec![bone_key(0, 0.0, Curve::Linear), bone_key(1000, 100.0, Curve::Linear)],
        Curve::ease_in(2),
    );
    let mut anim = Animation::new(data).unwrap();
    anim.set_time(500.0);
    anim.update(0.0);
    approx(x_of(&anim), 25.0, 1e-4);

    let data = mk_track(
        1000,
        false,
        vec![
            bone_key(0, 0.0, Curve::ease_in(2)),
            bone_key(1000, 100.0, Curve::Linear),
        ],
        Curve::ease_in(2),
    );
    let mut anim = Animation::new(data).unwrap();
    anim.set_time(500.0);
    anim.update(0.0);
    approx(x_of(&anim), 6.25, 1e-4);
}

#[test]
fn spin_none_keeps_start_angle() {
    let mut keys = vec![bone_key(0, 0.0, Curve::Linear), bone_key(400, 0.0, Curve::Linear)];
    keys[0].spin = Spin::None;
    keys[0].part.pose_mut().angle = 0.3;
    keys[1].part.pose_mut().angle = 2.0;
    let mut anim = Animation::new(mk_track(400, false, keys, Curve::Linear)).unwrap();
    for t in [0.0, 100.0, 399.0] {
        anim.set_time(t);
        anim.update(0.0);
        assert_eq!(anim.parts()[0].pose().angle, 0.3);
    }
}

#[test]
fn reset_rewinds_and_refreshes() {
    let data = mk_track(
        1000,
        true,
        vec![bone_key(0, 10.0, Curve::Linear), bone_key(500, 100.0, Curve::Linear)],
        Curve::Linear,
    );
    let mut anim = Animation::new(data).unwrap();
    anim.update(300.0);
    assert!(x_of(&anim) > 10.0);
    anim.reset();
    assert_eq!(anim.time(), 0.0);
    approx(x_of(&anim), 10.0, 1e-6);
}

#[test]
fn tick_uses_configured_frame_delta_and_speed() {
    let cfg = PlaybackConfig {
        speed: 2.0,
        alpha: 0.5,
        frame_delta_ms: 10.0,
    };
    let data = mk_track(1000, true, vec![bone_key(0, 0.0, Curve::Linear)], Curve::Linear);
    let mut anim = Animation::with_config(data, &cfg).unwrap();
    assert_eq!(anim.alpha(), 0.5);
    anim.tick();
    anim.tick();
    approx(anim.time(), 40.0, 1e-4);
}

#[test]
fn set_time_does_not_touch_speed_and_respects_looping_flag() {
    let data = mk_track(1000, true, vec![bone_key(0, 0.0, Curve::Linear)], Curve::Linear);
    let mut anim = Animation::new(data).unwrap();
    anim.set_speed(3.0);
    anim.set_time(-250.0);
    assert_eq!(anim.time(), 750.0);
    assert_eq!(anim.speed(), 3.0);

    anim.set_looping(false);
    anim.set_time(1500.0);
    assert_eq!(anim.time(), 1000.0);
    assert!(anim.is_done());
}

#[test]
fn empty_window_at_loop_seam_holds_the_source_key() {
    // The only mainline key sits at `length` and points at the timeline key
    // there; its successor wraps to the first key at the same instant.
    let keys = vec![
        bone_key(0, 0.0, Curve::Linear),
        bone_key(1000, 100.0, Curve::Linear),
    ];
    let mut data = mk_track(1000, true, keys, Curve::Linear);
    data.mainline = Mainline::new(vec![MainlineKey {
        time: 1000,
        curve: Curve::Linear,
        objects: vec![ObjectRef {
            timeline: TimelineId(0),
            key: 1,
            parent: None,
        }],
    }]);
    let mut anim = Animation::new(data).expect("seam key is accepted");

    for t in [0.0, 250.0, 999.0] {
        anim.set_time(t);
        anim.update(0.0);
        let x = x_of(&anim);
        assert!(x.is_finite());
        approx(x, 100.0, 1e-4);
    }
}
