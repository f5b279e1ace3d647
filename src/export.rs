//! Flat binary weight export.
//!
//! The trained policy network is flattened into a headerless sequence of
//! 32-bit little-endian floats for a low-level inference routine that
//! hard-codes offsets from the architecture's fixed shapes. The traversal
//! visits layers in definition order, weights before bias. Weight matrices
//! are written output-major — row-major over `[output, input]`, the
//! transpose of the in-memory `(input, output)` layout — so that the
//! consumer's `matrix[i * cols + j]` indexing with `rows = output` and
//! `cols = input` lands on the right elements. Biases follow in index order.
//! Any change to this ordering breaks every deployed reader.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::network::NeuralNetwork;

/// What a flattened tensor holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TensorRole {
    Weight,
    Bias,
}

/// One tensor in the export stream: its role, owning layer, wire shape, and
/// position in the flattened float sequence.
#[derive(Clone, Debug)]
pub struct TensorDescriptor {
    pub role: TensorRole,
    pub layer: usize,
    /// Wire shape rows; for weights this is the layer's output size.
    pub rows: usize,
    /// Wire shape columns; for weights this is the layer's input size.
    pub cols: usize,
    /// Element offset of this tensor within the flattened stream.
    pub offset: usize,
}

impl TensorDescriptor {
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered list of tensor descriptors for a network, defining the export
/// traversal.
#[derive(Clone, Debug)]
pub struct WeightLayout {
    pub tensors: Vec<TensorDescriptor>,
    total_len: usize,
}

impl WeightLayout {
    /// Describe `network` in the compatible traversal order: layer-1 weights,
    /// layer-1 bias, layer-2 weights, layer-2 bias, and so on.
    pub fn of(network: &NeuralNetwork) -> Self {
        let mut tensors = Vec::with_capacity(network.layers.len() * 2);
        let mut offset = 0;

        for (layer, l) in network.layers.iter().enumerate() {
            let (input, output) = l.weights.dim();
            tensors.push(TensorDescriptor {
                role: TensorRole::Weight,
                layer,
                rows: output,
                cols: input,
                offset,
            });
            offset += output * input;

            tensors.push(TensorDescriptor {
                role: TensorRole::Bias,
                layer,
                rows: 1,
                cols: output,
                offset,
            });
            offset += output;
        }

        WeightLayout { tensors, total_len: offset }
    }

    /// Total number of f32 elements in the export stream.
    pub fn total_len(&self) -> usize {
        self.total_len
    }
}

/// Writes network parameters as a raw float blob.
pub struct FlatWeightExporter;

impl FlatWeightExporter {
    /// Export `network` to `path`. Returns the number of bytes written.
    pub fn export(network: &NeuralNetwork, path: &Path) -> Result<usize> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let written = Self::export_to_writer(network, &mut writer)?;
        writer.flush()?;
        Ok(written)
    }

    /// Export `network` to an arbitrary writer. Returns the number of bytes
    /// written.
    pub fn export_to_writer<W: Write>(network: &NeuralNetwork, writer: &mut W) -> Result<usize> {
        let layout = WeightLayout::of(network);
        let mut elements = 0usize;

        for tensor in &layout.tensors {
            let layer = &network.layers[tensor.layer];
            match tensor.role {
                TensorRole::Weight => {
                    // Transposed view iterates output-major
                    for &value in layer.weights.t().iter() {
                        writer.write_all(&value.to_le_bytes())?;
                        elements += 1;
                    }
                }
                TensorRole::Bias => {
                    for &value in layer.biases.iter() {
                        writer.write_all(&value.to_le_bytes())?;
                        elements += 1;
                    }
                }
            }
        }

        debug_assert_eq!(elements, layout.total_len());
        Ok(elements * std::mem::size_of::<f32>())
    }
}
