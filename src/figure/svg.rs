use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::figure::Figure;
use crate::foundation::error::{AnimError, AnimResult};
use crate::source::function::Params;

/// Resolution at which SVG user units map 1:1 to pixels.
pub const SVG_BASE_DPI: f32 = 96.0;

const MAX_DIM: u32 = 16_384;

/// A figure backed by an SVG document, rasterized with `resvg`.
pub struct SvgFigure {
    tree: usvg::Tree,
    dpi: f32,
}

impl SvgFigure {
    /// Parse SVG text.
    pub fn parse(svg: &str) -> AnimResult<Self> {
        Self::from_data(svg.as_bytes())
    }

    /// Parse SVG bytes.
    pub fn from_data(bytes: &[u8]) -> AnimResult<Self> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
        Ok(Self {
            tree,
            dpi: SVG_BASE_DPI,
        })
    }

    /// Current rasterization resolution.
    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Raster size in pixels at the current resolution.
    pub fn size_px(&self) -> AnimResult<(u32, u32)> {
        fn to_px(v: f32) -> AnimResult<u32> {
            if !v.is_finite() || v <= 0.0 {
                return Err(AnimError::validation("svg has invalid width/height"));
            }
            Ok((v.ceil() as u32).max(1))
        }

        let scale = self.dpi / SVG_BASE_DPI;
        let size = self.tree.size();
        let w = to_px(size.width() * scale)?;
        let h = to_px(size.height() * scale)?;
        if w > MAX_DIM || h > MAX_DIM {
            return Err(AnimError::validation(format!(
                "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }
        Ok((w, h))
    }

    /// Rasterize into straight-alpha RGBA8.
    pub fn rasterize(&self) -> AnimResult<image::RgbaImage> {
        let (width, height) = self.size_px()?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| AnimError::validation("failed to allocate svg pixmap"))?;

        let sx = (width as f32) / self.tree.size().width();
        let sy = (height as f32) / self.tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&self.tree, xform, &mut pixmap.as_mut());

        let data = pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        image::RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| AnimError::validation("svg raster buffer size mismatch"))
    }
}

impl Figure for SvgFigure {
    fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
    }

    fn encode_png(&self) -> AnimResult<Vec<u8>> {
        let img = self.rasterize()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
        Ok(buf)
    }
}

/// SVG text with `{{name}}` placeholders filled from render parameters.
#[derive(Clone, Debug)]
pub struct SvgTemplate {
    source: String,
}

impl SvgTemplate {
    /// Template from SVG text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template from an SVG file.
    pub fn from_path(path: &Path) -> AnimResult<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("read svg template '{}'", path.display()))?;
        Ok(Self::new(source))
    }

    /// Placeholder names in order of appearance (duplicates kept).
    pub fn placeholders(&self) -> AnimResult<Vec<&str>> {
        let mut names = Vec::new();
        for piece in self.pieces()? {
            if let Piece::Hole(name) = piece {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Substitute every placeholder. Strings are inserted verbatim, other values as JSON text.
    pub fn substitute(&self, params: &Params) -> AnimResult<String> {
        let mut out = String::with_capacity(self.source.len());
        for piece in self.pieces()? {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Hole(name) => match params.get(name) {
                    Some(serde_json::Value::String(s)) => out.push_str(s),
                    Some(v) => out.push_str(&v.to_string()),
                    None => {
                        return Err(AnimError::config(format!(
                            "svg template placeholder '{name}' has no value"
                        )));
                    }
                },
            }
        }
        Ok(out)
    }

    /// Substitute `params` and parse the result into a figure.
    pub fn render(&self, params: &Params) -> AnimResult<SvgFigure> {
        SvgFigure::parse(&self.substitute(params)?)
    }

    fn pieces(&self) -> AnimResult<Vec<Piece<'_>>> {
        let mut pieces = Vec::new();
        let mut rest = self.source.as_str();
        while let Some(open) = rest.find("{{") {
            pieces.push(Piece::Text(&rest[..open]));
            let after = &rest[open + 2..];
            let close = after.find("}}").ok_or_else(|| {
                AnimError::config("svg template has an unterminated '{{' placeholder")
            })?;
            let name = after[..close].trim();
            if name.is_empty() {
                return Err(AnimError::config("svg template has an empty placeholder"));
            }
            pieces.push(Piece::Hole(name));
            rest = &after[close + 2..];
        }
        pieces.push(Piece::Text(rest));
        Ok(pieces)
    }
}

enum Piece<'a> {
    Text(&'a str),
    Hole(&'a str),
}

#[cfg(test)]
#[path = "../../tests/unit/figure/svg.rs"]
mod tests;
