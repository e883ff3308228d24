use super::*;

#[test]
fn unit_to_byte_clamps_and_truncates() {
    assert_eq!(unit_to_byte(0.0), 0);
    assert_eq!(unit_to_byte(1.0), 255);
    assert_eq!(unit_to_byte(0.25), 63);
    assert_eq!(unit_to_byte(-3.0), 0);
    assert_eq!(unit_to_byte(7.5), 255);
    assert_eq!(unit_to_byte(f64::NAN), 0);
}

#[test]
fn ndc_uv_samples_pixel_centers_on_square_images() {
    let dims = Dimensions::new(4, 4).unwrap();
    let corner = ndc_uv(dims, 0, 0);
    assert_eq!(corner.x, -1.0 + 1.0 / 4.0);
    assert_eq!(corner.y, -1.0 + 1.0 / 4.0);

    for (x, y) in [(1u32, 2u32), (3, 0), (3, 3)] {
        let uv = ndc_uv(dims, x, y);
        assert_eq!(uv.x, (f64::from(2 * x + 1) / 4.0 - 1.0) * (4.0 / 4.0));
        assert_eq!(uv.y, f64::from(2 * y + 1) / 4.0 - 1.0);
    }
}

#[test]
fn ndc_uv_scales_u_by_aspect() {
    let dims = Dimensions::new(8, 4).unwrap();
    let uv = ndc_uv(dims, 0, 0);
    assert_eq!(uv.x, (1.0 / 8.0 - 1.0) * 2.0);
    assert_eq!(uv.y, 1.0 / 4.0 - 1.0);

    let last = ndc_uv(dims, 7, 3);
    assert_eq!(last.x, (15.0 / 8.0 - 1.0) * 2.0);
    assert_eq!(last.y, 7.0 / 4.0 - 1.0);
}

#[test]
fn pass_time_is_index_over_count() {
    assert_eq!(pass_time(0, 4), 0.0);
    assert_eq!(pass_time(1, 4), 0.25);
    assert_eq!(pass_time(2, 4), 0.5);
    assert_eq!(pass_time(3, 4), 0.75);
}
