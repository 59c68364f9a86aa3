use serde::{Serialize, Deserialize};

use crate::error::{NetError, NetResult};

/// Layer widths of a network, input first.
///
/// Element 0 is the number of input features; elements `1..=L` are the
/// widths of the `L` layers, the last being the output layer. A value of
/// this type always describes at least one layer and never a zero width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Dimensions(Vec<usize>);

impl Dimensions {
    pub fn new(widths: Vec<usize>) -> NetResult<Dimensions> {
        if widths.len() < 2 {
            return Err(NetError::InvalidDimensions {
                reason: format!("need at least 2 entries (input and one layer), got {}", widths.len()),
                dims: widths,
            });
        }
        if let Some(pos) = widths.iter().position(|&w| w == 0) {
            return Err(NetError::InvalidDimensions {
                reason: format!("width at position {pos} must be positive"),
                dims: widths,
            });
        }
        Ok(Dimensions(widths))
    }

    /// `[input, hidden..., output]`.
    pub fn from_topology(input: usize, hidden: &[usize], output: usize) -> NetResult<Dimensions> {
        let mut widths = Vec::with_capacity(hidden.len() + 2);
        widths.push(input);
        widths.extend_from_slice(hidden);
        widths.push(output);
        Dimensions::new(widths)
    }

    pub fn widths(&self) -> &[usize] {
        &self.0
    }

    /// Number of layers `L` (the input is not a layer).
    pub fn n_layers(&self) -> usize {
        self.0.len() - 1
    }

    pub fn input_size(&self) -> usize {
        self.0[0]
    }

    pub fn output_size(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    /// Width of layer `c`, with `c = 0` meaning the input.
    pub fn width(&self, c: usize) -> usize {
        self.0[c]
    }

    /// `(width[c], width[c-1])` for every layer `c` in `1..=L`.
    pub fn weight_shapes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).map(|pair| (pair[1], pair[0]))
    }
}

impl TryFrom<Vec<usize>> for Dimensions {
    type Error = NetError;

    fn try_from(widths: Vec<usize>) -> NetResult<Dimensions> {
        Dimensions::new(widths)
    }
}

impl From<Dimensions> for Vec<usize> {
    fn from(dims: Dimensions) -> Vec<usize> {
        dims.0
    }
}
