use std::io::BufReader;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use super::*;

fn out_path(name: &str) -> PathBuf {
    let p = PathBuf::from("target").join("unit_gif").join(name);
    let _ = std::fs::remove_file(&p);
    p
}

fn solid(rgb: [u8; 3]) -> Frame {
    Frame::new(4, 2, 3, rgb.repeat(8)).unwrap()
}

fn decode_frames(path: &Path) -> Vec<image::Frame> {
    let file = BufReader::new(File::open(path).unwrap());
    GifDecoder::new(file)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn writes_all_frames_with_delay() {
    let path = out_path("three.gif");
    let mut sink = GifSink::create(&path, Fps::new(10, 1).unwrap(), true).unwrap();
    for (i, rgb) in [[255, 0, 0], [0, 255, 0], [0, 0, 255]].into_iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), &solid(rgb)).unwrap();
    }
    sink.finish().unwrap();

    let frames = decode_frames(&path);
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].buffer().dimensions(), (4, 2));
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 100);

    let px = frames[1].buffer().get_pixel(0, 0).0;
    assert!(px[1] > 200 && px[0] < 50 && px[2] < 50, "{px:?}");
}

#[test]
fn loop_flag_controls_repeat_extension() {
    let looped = out_path("looped.gif");
    let once = out_path("once.gif");
    for (path, looping) in [(&looped, true), (&once, false)] {
        let mut sink = GifSink::create(path, Fps::new(24, 1).unwrap(), looping).unwrap();
        sink.push_frame(FrameIndex(0), &solid([1, 2, 3])).unwrap();
        sink.finish().unwrap();
    }
    let has_netscape =
        |p: &Path| std::fs::read(p).unwrap().windows(11).any(|w| w == b"NETSCAPE2.0");
    assert!(has_netscape(&looped));
    assert!(!has_netscape(&once));
}

#[test]
fn size_change_is_rejected() {
    let path = out_path("mismatch.gif");
    let mut sink = GifSink::create(&path, Fps::new(24, 1).unwrap(), true).unwrap();
    sink.push_frame(FrameIndex(0), &solid([0, 0, 0])).unwrap();
    let other = Frame::new(2, 2, 1, vec![0; 4]).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(1), &other).unwrap_err(),
        AnimError::Validation(_)
    ));
    sink.finish().unwrap();
    assert_eq!(decode_frames(&path).len(), 1);
}

#[test]
fn finish_without_frames_is_a_no_op() {
    let path = out_path("empty.gif");
    let mut sink = GifSink::create(&path, Fps::new(24, 1).unwrap(), true).unwrap();
    sink.finish().unwrap();
    sink.finish().unwrap();
}
