use std::cell::RefCell;

use super::*;
use crate::figure::svg::SvgFigure;

struct SolidFigure {
    gray: u8,
    dpi: f32,
}

impl Figure for SolidFigure {
    fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
    }

    fn encode_png(&self) -> AnimResult<Vec<u8>> {
        let side = (self.dpi / 100.0) as u32;
        let img = image::GrayImage::from_pixel(side, side, image::Luma([self.gray]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)?;
        Ok(buf)
    }
}

#[test]
fn missing_parameter_fails_before_rendering() {
    let calls = RefCell::new(0);
    let src = FunctionSource::new(|_p: &Params| {
        *calls.borrow_mut() += 1;
        Ok(SolidFigure { gray: 0, dpi: 0.0 })
    });
    let err = src.prepare(300.0).err().unwrap();
    assert!(matches!(err, AnimError::Config(_)));
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn empty_values_are_config_error() {
    let src = FunctionSource::new(|_p: &Params| Ok(SolidFigure { gray: 0, dpi: 0.0 }))
        .animate("gray", Vec::<u8>::new());
    assert!(matches!(src.prepare(300.0).err().unwrap(), AnimError::Config(_)));
}

#[test]
fn animated_parameter_overrides_fixed_one() {
    let seen = RefCell::new(Vec::new());
    let src = FunctionSource::new(|p: &Params| {
        seen.borrow_mut().push(p.clone());
        let gray = p["gray"].as_u64().unwrap() as u8;
        Ok(SolidFigure { gray, dpi: 0.0 })
    })
    .with_param("gray", 7)
    .with_param("title", "fixed")
    .animate("gray", [10u8, 20]);

    let mut prepared = src.prepare(200.0).unwrap();
    assert_eq!(prepared.len(), 2);
    let f0 = prepared.render(0).unwrap();
    let f1 = prepared.render(1).unwrap();

    assert_eq!(f0.dimensions(), (2, 2));
    assert_eq!(f0.data, vec![10; 4]);
    assert_eq!(f1.data, vec![20; 4]);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|p| p["title"] == "fixed" && p.len() == 2));
}

#[test]
fn render_errors_propagate() {
    let src = FunctionSource::new(|_p: &Params| -> AnimResult<SvgFigure> {
        Err(AnimError::validation("plot failed"))
    })
    .animate("t", [0.0]);
    let mut prepared = src.prepare(96.0).unwrap();
    let err = prepared.render(0).unwrap_err();
    assert!(err.to_string().contains("plot failed"));
}
