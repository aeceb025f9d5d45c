use super::*;

#[test]
fn new_checks_buffer_length_and_channels() {
    assert!(Frame::new(2, 2, 3, vec![0; 12]).is_ok());
    assert!(Frame::new(2, 2, 3, vec![0; 11]).is_err());
    assert!(Frame::new(2, 2, 5, vec![0; 20]).is_err());
    assert!(Frame::new(0, 2, 1, vec![]).is_err());
}

#[test]
fn gray_expands_to_opaque_rgba() {
    let f = Frame::new(2, 1, 1, vec![10, 200]).unwrap();
    let rgba = f.to_rgba8().unwrap();
    assert_eq!(rgba.into_raw(), vec![10, 10, 10, 255, 200, 200, 200, 255]);
}

#[test]
fn gray_alpha_keeps_alpha() {
    let f = Frame::new(1, 1, 2, vec![50, 128]).unwrap();
    assert_eq!(f.to_rgba8().unwrap().into_raw(), vec![50, 50, 50, 128]);
}

#[test]
fn from_dynamic_keeps_channel_layout() {
    let rgb = image::RgbImage::from_raw(1, 1, vec![1, 2, 3]).unwrap();
    let f = Frame::from_dynamic(DynamicImage::ImageRgb8(rgb));
    assert_eq!((f.width, f.height, f.channels), (1, 1, 3));
    assert_eq!(f.data, vec![1, 2, 3]);

    let wide = image::ImageBuffer::<Rgba<u16>, _>::from_raw(1, 1, vec![65535u16, 0, 0, 65535])
        .unwrap();
    let f = Frame::from_dynamic(DynamicImage::ImageRgba16(wide));
    assert_eq!(f.channels, 4);
    assert_eq!(f.data, vec![255, 0, 0, 255]);
}
