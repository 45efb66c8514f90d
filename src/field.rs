//! A field of view: one channel-stacked projection.

use ndarray::{Array3, ArrayD, ArrayView2, Axis, Ix3};

use crate::error::{CenfindError, Result};

/// Named `(channels, rows, cols)` stack of one field of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub stack: Array3<f32>,
}

impl Field {
    /// Build a field from an array of any dimensionality.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless the array is 3D.
    pub fn new(name: impl Into<String>, data: ArrayD<f32>) -> Result<Self> {
        let name = name.into();
        let ndim = data.ndim();
        let stack = data.into_dimensionality::<Ix3>().map_err(|_| {
            CenfindError::ShapeMismatch(format!(
                "field {name}: expected a 3D channel stack, got {ndim} dimensions"
            ))
        })?;
        Ok(Self { name, stack })
    }

    pub fn from_stack(name: impl Into<String>, stack: Array3<f32>) -> Self {
        Self {
            name: name.into(),
            stack,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.stack.len_of(Axis(0))
    }

    /// `(rows, cols)` of every plane.
    pub fn shape(&self) -> (usize, usize) {
        let (_, rows, cols) = self.stack.dim();
        (rows, cols)
    }

    /// View of one channel plane.
    pub fn channel(&self, index: usize) -> Result<ArrayView2<'_, f32>> {
        if index >= self.channel_count() {
            return Err(CenfindError::ShapeMismatch(format!(
                "field {}: channel {index} requested, stack has {}",
                self.name,
                self.channel_count()
            )));
        }
        Ok(self.stack.index_axis(Axis(0), index))
    }
}
