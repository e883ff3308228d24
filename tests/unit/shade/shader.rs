use super::*;

#[test]
fn closures_are_shaders() {
    let s: SharedShader = Arc::new(|uv: Vec2, t: f64| Color::new(uv.x, uv.y, t));
    assert_eq!(
        s.shade(Vec2::new(0.5, -0.5), 0.25),
        Color::new(0.5, -0.5, 0.25)
    );
}

#[test]
fn solid_ignores_inputs() {
    let s = Solid(Color::new(1.0, 0.0, 0.0));
    assert_eq!(s.shade(Vec2::new(-1.0, 1.0), 0.9), Color::new(1.0, 0.0, 0.0));
    assert_eq!(s.shade(Vec2::ZERO, 0.0), Color::new(1.0, 0.0, 0.0));
}

#[test]
fn uv_gradient_maps_ndc_to_unit_range() {
    let g = UvGradient;
    assert_eq!(g.shade(Vec2::new(-1.0, -1.0), 0.0), Color::new(0.0, 0.0, 0.0));
    assert_eq!(g.shade(Vec2::new(1.0, 1.0), 0.5), Color::new(1.0, 1.0, 0.5));
    assert_eq!(g.shade(Vec2::ZERO, 0.25), Color::new(0.5, 0.5, 0.25));
}
