use super::*;

fn lighten(strength: f64) -> InfluenceTransform {
    InfluenceTransform::new(TransformKind::Lighten, strength)
}

#[test]
fn falloff_is_full_at_zero_and_nonnegative_at_radius() {
    for f in [
        Falloff::Linear,
        Falloff::Quadratic,
        Falloff::Exponential,
        Falloff::Cubic,
    ] {
        assert_eq!(f.weight(0.0, 4.0), 1.0, "{f:?}");
        assert!(f.weight(4.0, 4.0) >= 0.0, "{f:?}");
        assert_eq!(f.weight(4.01, 4.0), 0.0, "{f:?}");
    }
}

#[test]
fn falloff_curves_match_formulas() {
    let (d, r) = (1.0, 4.0);
    assert!((Falloff::Linear.weight(d, r) - 0.75).abs() < 1e-12);
    assert!((Falloff::Quadratic.weight(d, r) - 0.9375).abs() < 1e-12);
    assert!((Falloff::Cubic.weight(d, r) - (1.0 - 1.0 / 64.0)).abs() < 1e-12);
    assert!((Falloff::Exponential.weight(d, r) - (-0.75f64).exp()).abs() < 1e-12);
    assert!((Falloff::Exponential.weight(r, r) - (-3.0f64).exp()).abs() < 1e-12);
}

#[test]
fn influence_validation_rejects_bad_parameters() {
    assert!(Influence::new(0, lighten(0.5)).validated().is_err());
    assert!(Influence::new(2, lighten(1.5)).validated().is_err());
    assert!(Influence::new(2, lighten(-0.1)).validated().is_err());
    assert!(Influence::new(2, lighten(f64::NAN)).validated().is_err());
    assert!(
        Influence::new(2, lighten(0.5))
            .with_color("#12")
            .validated()
            .is_err()
    );

    let err = Influence::new(2, lighten(0.5).with_darken_factor(0.3))
        .validated()
        .unwrap_err();
    assert!(err.to_string().contains("multiply-darken"));
}

#[test]
fn influence_validation_normalizes_color() {
    let inf = Influence::new(3, lighten(1.0))
        .with_color("FFAA00")
        .validated()
        .unwrap();
    assert_eq!(inf.color.as_deref(), Some("#ffaa00"));
}

#[test]
fn multiply_darken_accepts_darken_factor() {
    let t = InfluenceTransform::new(TransformKind::MultiplyDarken, 0.5).with_darken_factor(0.4);
    assert!(Influence::new(1, t).validated().is_ok());
    assert!(
        Influence::new(1, t.with_darken_factor(1.2))
            .validated()
            .is_err()
    );
}

#[test]
fn transform_targets_default_by_kind() {
    let owner = Rgb::new(10, 200, 30);
    let t = Influence::new(1, lighten(1.0)).to_transform(owner);
    assert_eq!(t.target, Rgb::WHITE);

    let t = Influence::new(1, InfluenceTransform::new(TransformKind::Darken, 1.0))
        .to_transform(owner);
    assert_eq!(t.target, Rgb::BLACK);

    let t = Influence::new(1, InfluenceTransform::new(TransformKind::Multiply, 1.0))
        .to_transform(owner);
    assert_eq!(t.target, owner);
    assert_eq!(t.darken_factor, DEFAULT_DARKEN_FACTOR);

    let t = Influence::new(1, lighten(1.0))
        .with_color("#ff0000")
        .to_transform(owner);
    assert_eq!(t.target, Rgb::new(255, 0, 0));
}

#[test]
fn layer_effect_resolution() {
    let (eff, t) = LayerEffect::new(TransformKind::Darken, 0.3)
        .with_color("ABCDEF")
        .resolve()
        .unwrap();
    assert_eq!(eff.color.as_deref(), Some("#abcdef"));
    assert_eq!(t.target, Rgb::new(0xab, 0xcd, 0xef));

    assert!(
        LayerEffect::new(TransformKind::Lighten, 0.3)
            .with_darken_factor(0.5)
            .resolve()
            .is_err()
    );
    assert!(LayerEffect::new(TransformKind::Lighten, 2.0).resolve().is_err());
    assert!(
        LayerEffect::new(TransformKind::MultiplyDarken, 0.3)
            .with_darken_factor(0.5)
            .resolve()
            .is_ok()
    );
}

#[test]
fn plain_multiply_layer_effect_needs_a_color() {
    let err = LayerEffect::new(TransformKind::Multiply, 0.5)
        .resolve()
        .unwrap_err();
    assert!(err.to_string().contains("layer_effect.color"), "{err}");

    let (_, t) = LayerEffect::new(TransformKind::Multiply, 0.5)
        .with_color("#ff0000")
        .resolve()
        .unwrap();
    assert_eq!(t.target, Rgb::new(255, 0, 0));

    let (_, t) = LayerEffect::new(TransformKind::MultiplyDarken, 0.5)
        .resolve()
        .unwrap();
    assert_eq!(t.target, Rgb::WHITE);
}

#[test]
fn radius_is_capped() {
    assert!(Influence::new(MAX_INFLUENCE_RADIUS, lighten(0.5)).validated().is_ok());

    for radius in [MAX_INFLUENCE_RADIUS + 1, 100_000, u32::MAX] {
        let err = Influence::new(radius, lighten(0.5)).validated().unwrap_err();
        assert!(matches!(err, GlyphError::Validation(_)), "{radius}");
        assert!(err.to_string().contains("influence.radius"), "{err}");
    }
}

#[test]
fn descriptors_use_kebab_case_on_the_wire() {
    let inf: Influence = serde_json::from_value(serde_json::json!({
        "radius": 2,
        "transform": { "kind": "multiply-darken", "strength": 0.5, "falloff": "exponential", "darken_factor": 0.25 }
    }))
    .unwrap();
    assert_eq!(inf.transform.kind, TransformKind::MultiplyDarken);
    assert_eq!(inf.transform.falloff, Falloff::Exponential);
    assert_eq!(inf.transform.darken_factor, Some(0.25));

    let inf: Influence = serde_json::from_value(serde_json::json!({
        "radius": 1,
        "transform": { "kind": "lighten", "strength": 1.0 }
    }))
    .unwrap();
    assert_eq!(inf.transform.falloff, Falloff::Linear);
    assert!(inf.color.is_none());

    let bad = serde_json::from_value::<Influence>(serde_json::json!({
        "radius": 1.5,
        "transform": { "kind": "lighten", "strength": 1.0 }
    }));
    assert!(bad.is_err());
}
