use super::*;

fn sample() -> Frame {
    let dims = Dimensions::new(2, 2).unwrap();
    let mut f = Frame::blank(dims, FrameIndex(3));
    f.pixels = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    f
}

#[test]
fn blank_frame_is_sized_and_zeroed() {
    let f = Frame::blank(Dimensions::new(4, 2).unwrap(), FrameIndex(0));
    assert_eq!(f.pixels.len(), 4 * 2 * 3);
    assert!(f.pixels.iter().all(|&b| b == 0));
    assert_eq!(f.stride(), 12);
}

#[test]
fn pixel_and_row_accessors_are_row_major() {
    let f = sample();
    assert_eq!(f.index, FrameIndex(3));
    assert_eq!(f.pixel(0, 0), Some([1, 2, 3]));
    assert_eq!(f.pixel(1, 0), Some([4, 5, 6]));
    assert_eq!(f.pixel(0, 1), Some([7, 8, 9]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 2), None);
    assert_eq!(f.row(1), Some(&[7u8, 8, 9, 10, 11, 12][..]));
    assert_eq!(f.row(2), None);
    assert_eq!(f.dimensions(), Dimensions::new(2, 2).unwrap());
}
