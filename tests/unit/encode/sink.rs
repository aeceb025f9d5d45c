use super::*;

#[test]
fn container_format_from_extension() {
    assert_eq!(ContainerFormat::from_extension(".gif").unwrap(), ContainerFormat::Gif);
    assert_eq!(ContainerFormat::from_extension("mp4").unwrap(), ContainerFormat::Mp4);
    assert_eq!(ContainerFormat::from_extension(".GIF").unwrap(), ContainerFormat::Gif);

    let err = ContainerFormat::from_extension(".avi").unwrap_err();
    assert!(matches!(err, AnimError::UnsupportedFormat(ref e) if e == ".avi"));
}

#[test]
fn container_format_from_path() {
    assert_eq!(
        ContainerFormat::from_path(Path::new("out/anim.mp4")).unwrap(),
        ContainerFormat::Mp4
    );
    assert!(ContainerFormat::from_path(Path::new("out/anim")).is_err());
}

#[test]
fn open_sink_rejects_unknown_extension_without_creating_file() {
    let out = PathBuf::from("target/unit_sink/never/anim.avi");
    let err = open_sink(SinkOpts {
        out_path: out.clone(),
        fps: Fps::new(24, 1).unwrap(),
        looping: true,
    })
    .err()
    .unwrap();
    assert!(matches!(err, AnimError::UnsupportedFormat(_)));
    assert!(!out.exists());
    assert!(!out.parent().unwrap().exists());
}

#[test]
fn order_check_rejects_repeats() {
    let mut last = None;
    check_order(&mut last, FrameIndex(0)).unwrap();
    check_order(&mut last, FrameIndex(1)).unwrap();
    assert!(check_order(&mut last, FrameIndex(1)).is_err());
}

#[test]
fn dims_check_reports_both_sizes() {
    let frame = Frame::new(2, 1, 1, vec![0, 0]).unwrap();
    check_dims((2, 1), &frame).unwrap();
    let err = check_dims((4, 4), &frame).unwrap_err();
    assert!(err.to_string().contains("got 2x1, expected 4x4"));
}

#[test]
fn in_memory_sink_captures_until_finished() {
    let mut sink = InMemorySink::new();
    let frame = Frame::new(1, 1, 1, vec![9]).unwrap();
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.finish().unwrap();
    assert!(sink.is_finished());
    assert_eq!(sink.frames().len(), 1);
    assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
}
