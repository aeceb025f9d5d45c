use serde_json::Value;

use crate::assets::decode::decode_image;
use crate::figure::Figure;
use crate::foundation::error::{AnimError, AnimResult};
use crate::pixels::frame::Frame;

/// Keyword parameters passed to a render function.
pub type Params = serde_json::Map<String, Value>;

type RenderFn<'a> = Box<dyn FnMut(&Params) -> AnimResult<Box<dyn Figure + 'a>> + 'a>;

/// Frames produced by repeatedly calling a render function while varying one parameter.
pub struct FunctionSource<'a> {
    render: RenderFn<'a>,
    parameter: Option<String>,
    values: Vec<Value>,
    fixed: Params,
}

impl<'a> FunctionSource<'a> {
    /// Wrap a render function. Call [`FunctionSource::animate`] to pick the varying parameter.
    pub fn new<F, G>(mut render: F) -> Self
    where
        F: FnMut(&Params) -> AnimResult<G> + 'a,
        G: Figure + 'a,
    {
        Self {
            render: Box::new(move |params: &Params| {
                Ok(Box::new(render(params)?) as Box<dyn Figure + 'a>)
            }),
            parameter: None,
            values: Vec::new(),
            fixed: Params::new(),
        }
    }

    /// Animate `parameter` over `values`, one frame per value.
    pub fn animate<I, V>(mut self, parameter: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.parameter = Some(parameter.into());
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Add a fixed keyword parameter forwarded to every call.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fixed.insert(key.into(), value.into());
        self
    }

    /// Merge a map of fixed keyword parameters.
    pub fn with_params(mut self, params: Params) -> Self {
        self.fixed.extend(params);
        self
    }

    /// Name of the animated parameter, if set.
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Values assigned to the animated parameter, in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn prepare(self, dpi: f32) -> AnimResult<PreparedFunction<'a>> {
        let parameter = self.parameter.ok_or_else(|| {
            AnimError::config("an animated parameter name must be provided for function animations")
        })?;
        if self.values.is_empty() {
            return Err(AnimError::config(format!(
                "no values given for animated parameter '{parameter}'"
            )));
        }
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(AnimError::validation(format!("dpi must be > 0, got {dpi}")));
        }
        Ok(PreparedFunction {
            render: self.render,
            parameter,
            values: self.values,
            params: self.fixed,
            dpi,
        })
    }
}

impl std::fmt::Debug for FunctionSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionSource")
            .field("parameter", &self.parameter)
            .field("values", &self.values.len())
            .field("fixed", &self.fixed)
            .finish_non_exhaustive()
    }
}

/// A validated function source, see [`PreparedSource`](crate::PreparedSource).
pub struct PreparedFunction<'a> {
    render: RenderFn<'a>,
    parameter: String,
    values: Vec<Value>,
    params: Params,
    dpi: f32,
}

impl PreparedFunction<'_> {
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn render(&mut self, idx: usize) -> AnimResult<Frame> {
        let value = self
            .values
            .get(idx)
            .cloned()
            .ok_or_else(|| AnimError::validation(format!("value index {idx} out of range")))?;
        self.params.insert(self.parameter.clone(), value);

        let mut figure = (self.render)(&self.params)?;
        figure.set_dpi(self.dpi);
        let png = figure.encode_png()?;
        // Release the figure before decoding so only one frame's resources are alive.
        drop(figure);
        decode_image(&png)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/function.rs"]
mod tests;
