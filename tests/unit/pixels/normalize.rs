use super::*;

#[test]
fn shape_is_validated() {
    assert!(FrameStack::<u8>::new(&[2, 2, 2], vec![0; 8]).is_ok());
    assert!(FrameStack::<u8>::new(&[2, 2, 2, 3], vec![0; 24]).is_ok());
    assert!(FrameStack::<u8>::new(&[2, 2, 2], vec![0; 7]).is_err());
    assert!(FrameStack::<u8>::new(&[2, 2], vec![0; 4]).is_err());
    assert!(FrameStack::<u8>::new(&[1, 1, 1, 5], vec![0; 5]).is_err());
    assert!(FrameStack::<u8>::new(&[1, 0, 1], vec![]).is_err());
}

#[test]
fn u8_stack_is_unchanged() {
    let data: Vec<u8> = (0..=255).collect();
    let stack = FrameStack::new(&[4, 8, 8], data.clone()).unwrap();
    let raw = RawFrames::from(stack.clone());
    assert_eq!(raw.normalized(), stack);
    for i in 0..4 {
        assert_eq!(raw.frame(i).unwrap().data, data[i * 64..(i + 1) * 64]);
    }
}

#[test]
fn float_samples_are_clipped_then_scaled() {
    let data = vec![-3.0f32, 0.0, 0.5, 1.0, 7.5, f32::NAN];
    let raw = RawFrames::from(FrameStack::new(&[1, 1, 6], data).unwrap());
    let frame = raw.frame(0).unwrap();
    assert_eq!(frame.data, vec![0, 0, 127, 255, 255, 0]);
}

#[test]
fn float_range_law_holds_for_f64() {
    let data: Vec<f64> = (0..200).map(|i| (i as f64 - 50.0) / 100.0).collect();
    let raw = RawFrames::from(FrameStack::new(&[2, 10, 10], data.clone()).unwrap());
    let norm = raw.normalized();
    for (src, out) in data.iter().zip(norm.as_slice()) {
        if *src <= 0.0 {
            assert_eq!(*out, 0);
        } else if *src >= 1.0 {
            assert_eq!(*out, 255);
        } else {
            assert_eq!(*out, (src * 255.0) as u8);
        }
    }
}

#[test]
fn wider_integers_wrap_to_low_byte() {
    let raw = RawFrames::from(FrameStack::new(&[1, 1, 4], vec![255u16, 256, 300, 65535]).unwrap());
    assert_eq!(raw.frame(0).unwrap().data, vec![255, 0, 44, 255]);

    let raw = RawFrames::from(FrameStack::new(&[1, 1, 3], vec![-1i32, 128, 1000]).unwrap());
    assert_eq!(raw.frame(0).unwrap().data, vec![255, 128, 232]);
}

#[test]
fn per_frame_and_whole_stack_normalization_agree() {
    let data: Vec<f32> = (0..48).map(|i| i as f32 / 40.0).collect();
    let raw = RawFrames::from(FrameStack::new(&[3, 2, 2, 4], data).unwrap());
    let whole = raw.normalized();
    let per_frame: Vec<u8> = (0..3).flat_map(|i| raw.frame(i).unwrap().data).collect();
    assert_eq!(whole.as_slice(), per_frame.as_slice());
    assert_eq!(raw.element_type(), "f32");
    assert_eq!(raw.shape(), [3, 2, 2, 4]);
}

#[test]
fn frame_index_out_of_range_is_rejected() {
    let raw = RawFrames::from(FrameStack::new(&[1, 1, 1], vec![0u8]).unwrap());
    assert!(raw.frame(1).is_err());
}

#[test]
fn u64_stacks_wrap_like_other_integers() {
    let raw = RawFrames::from(
        FrameStack::new(&[2, 1, 2], vec![7u64, 256, u64::MAX, (1 << 40) + 9]).unwrap(),
    );
    assert_eq!(raw.element_type(), "u64");
    assert_eq!(raw.frame(0).unwrap().data, vec![7, 0]);
    assert_eq!(raw.frame(1).unwrap().data, vec![255, 9]);
}
