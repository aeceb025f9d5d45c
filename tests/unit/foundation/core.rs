use super::*;

#[test]
fn fps_new_rejects_zero_and_reduces() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(60, 2).unwrap(), Fps { num: 30, den: 1 });
}

#[test]
fn fps_from_f64_keeps_fractional_rates() {
    assert_eq!(Fps::from_f64(24.0).unwrap(), Fps { num: 24, den: 1 });
    assert_eq!(Fps::from_f64(12.5).unwrap(), Fps { num: 25, den: 2 });

    let ntsc = Fps::from_f64(23.976).unwrap();
    assert_eq!(ntsc, Fps { num: 2997, den: 125 });
    assert!((ntsc.as_f64() - 23.976).abs() < 1e-9);
}

#[test]
fn fps_from_f64_rejects_bad_values() {
    assert!(Fps::from_f64(0.0).is_err());
    assert!(Fps::from_f64(-5.0).is_err());
    assert!(Fps::from_f64(f64::NAN).is_err());
    assert!(Fps::from_f64(f64::INFINITY).is_err());
    assert!(Fps::from_f64(0.0001).is_err());
}

#[test]
fn gif_delay_rounds_to_centiseconds() {
    assert_eq!(Fps::new(10, 1).unwrap().gif_delay_cs(), 10);
    assert_eq!(Fps::new(24, 1).unwrap().gif_delay_cs(), 4);
    assert_eq!(Fps::new(1000, 1).unwrap().gif_delay_cs(), 1);
    assert_eq!(Fps::new(1, 2).unwrap().gif_delay_cs(), 200);
}
