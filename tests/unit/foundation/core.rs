use super::*;

#[test]
fn dimensions_reject_zero_sides() {
    assert!(Dimensions::new(0, 4).is_err());
    assert!(Dimensions::new(4, 0).is_err());
    let d = Dimensions::new(4, 2).unwrap();
    assert_eq!(d.pixel_count(), 8);
    assert_eq!(d.byte_len(), 24);
    assert_eq!(d.aspect(), 2.0);
}

#[test]
fn dimensions_reject_overflowing_buffers() {
    let err = Dimensions::new(u32::MAX, u32::MAX).unwrap_err();
    assert!(err.to_string().contains("overflows"));
}

#[test]
fn color_quantizes_with_clamp() {
    assert_eq!(Color::WHITE.to_rgb8(), [255, 255, 255]);
    assert_eq!(Color::BLACK.to_rgb8(), [0, 0, 0]);
    assert_eq!(Color::new(2.0, -1.0, 0.5).to_rgb8(), [255, 0, 127]);
    assert_eq!(Color::from([1.0, 0.0, 0.0]), Color::new(1.0, 0.0, 0.0));
}
