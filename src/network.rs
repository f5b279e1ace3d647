use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::optimizer::{Optimizer, OptimizerWrapper};

/// A fully connected layer: weights, biases, and an activation function.
///
/// Weights are stored with shape `(input_size, output_size)`; a forward pass
/// computes `inputs . weights + biases`. The layer caches its inputs and
/// pre-activation outputs so that a subsequent backward pass can compute
/// gradients.
#[derive(Clone, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Array2<f32>,
    pub biases: Array1<f32>,
    pub activation: Activation,
    pre_activation_output: Option<Array2<f32>>,
    inputs: Option<Array2<f32>>,
}

impl Layer {
    /// Create a new layer with the given input size, output size, and activation function.
    /// Weights are initialized from a uniform distribution between -0.1 and 0.1,
    /// biases with zeros. Every call draws fresh random values.
    pub fn new(input_size: usize, output_size: usize, activation: Activation) -> Self {
        let weights = Array2::random((input_size, output_size), Uniform::new(-0.1, 0.1));
        let biases = Array1::zeros(output_size);
        Layer {
            weights,
            biases,
            activation,
            pre_activation_output: None,
            inputs: None,
        }
    }

    pub fn with_weights(mut self, weights: Array2<f32>) -> Self {
        assert_eq!(weights.dim(), self.weights.dim());
        self.weights = weights;
        self
    }

    pub fn with_biases(mut self, biases: Array1<f32>) -> Self {
        assert_eq!(biases.dim(), self.biases.dim());
        self.biases = biases;
        self
    }

    /// Forward pass for a batch of input vectors.
    fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        self.inputs = Some(inputs.to_owned());
        let mut outputs = inputs.dot(&self.weights) + &self.biases.to_owned().insert_axis(Axis(0));
        self.pre_activation_output = Some(outputs.clone());
        self.activation.apply_batch(&mut outputs);
        outputs
    }

    /// Gradients of the layer's weights and biases for a batch of output errors.
    /// Requires a preceding `forward_batch` call to have cached inputs and
    /// pre-activation outputs.
    fn backward_batch(&self, output_errors: ArrayView2<f32>) -> (Array2<f32>, Array2<f32>, Array1<f32>) {
        let pre_activation_output = self
            .pre_activation_output
            .as_ref()
            .expect("no pre-activation output stored; forward_batch() must run before backward_batch()");
        let inputs = self
            .inputs
            .as_ref()
            .expect("no inputs stored; forward_batch() must run before backward_batch()");
        let activation_deriv = self.activation.derivative_batch(pre_activation_output.view());
        let adjusted_error = output_errors.to_owned() * &activation_deriv;
        let weight_gradients = inputs.t().dot(&adjusted_error);
        let bias_gradients = adjusted_error.sum_axis(Axis(0));
        (adjusted_error, weight_gradients, bias_gradients)
    }
}

/// Activation functions available to a layer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Activation {
    Relu,
    Linear,
}

impl Activation {
    fn apply_batch(&self, inputs: &mut Array2<f32>) {
        match self {
            Activation::Relu => {
                inputs.mapv_inplace(|v| v.max(0.0));
            }
            Activation::Linear => {}
        }
    }

    fn derivative_batch(&self, inputs: ArrayView2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => inputs.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            // Derivative of linear activation is always 1
            Activation::Linear => Array2::ones(inputs.dim()),
        }
    }
}

/// A feed-forward neural network: a stack of layers plus the optimizer that
/// updates them during training.
#[derive(Clone, Serialize, Deserialize)]
pub struct NeuralNetwork {
    pub layers: Vec<Layer>,
    pub optimizer: OptimizerWrapper,
}

impl NeuralNetwork {
    /// Create a new network with the given layer sizes, activations, and optimizer.
    pub fn new(layer_sizes: &[usize], activations: &[Activation], optimizer: OptimizerWrapper) -> Self {
        assert_eq!(layer_sizes.len() - 1, activations.len());

        let layers = build_layers(layer_sizes, activations);
        NeuralNetwork { layers, optimizer }
    }

    /// Number of actions scored by the output layer.
    pub fn output_size(&self) -> Option<usize> {
        self.layers.last().map(|layer| layer.biases.len())
    }

    /// Forward pass for a single input vector.
    pub fn forward(&mut self, input: ArrayView1<f32>) -> Array1<f32> {
        let input = input.insert_axis(Axis(0)); // Treat single instance as a minibatch of size 1
        let output = self.forward_batch(input);
        let output_shape = output.shape()[1];
        output.into_shape((output_shape,)).unwrap() // Remove the batch dimension
    }

    /// Forward pass for a batch of input vectors.
    pub fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        let mut current_output = inputs.to_owned();
        for layer in &mut self.layers {
            current_output = layer.forward_batch(current_output.view());
        }
        current_output
    }

    /// Gradients of all weights and biases for a batch of output errors,
    /// via backpropagation.
    fn backward_batch(&mut self, output_errors: ArrayView2<f32>) -> Vec<(Array2<f32>, Array1<f32>)> {
        let mut gradients: Vec<(Array2<f32>, Array1<f32>)> = Vec::new();
        let mut current_error = output_errors.to_owned();

        let length = self.layers.len();
        for i in (0..length).rev() {
            let layer = &mut self.layers[i];
            let (adjusted_error, weight_gradients, bias_gradients) =
                layer.backward_batch(current_error.view());
            gradients.push((weight_gradients, bias_gradients));

            if i != 0 {
                current_error = adjusted_error.dot(&layer.weights.t());
            }
        }

        gradients.reverse();
        gradients
    }

    /// One gradient step on a batch of input vectors and regression targets.
    /// The output error is `outputs - targets`; the optimizer applies the
    /// resulting gradients layer by layer.
    pub fn train_minibatch(
        &mut self,
        inputs: ArrayView2<f32>,
        targets: ArrayView2<f32>,
        learning_rate: f32,
    ) {
        let outputs = self.forward_batch(inputs);
        let output_errors = &outputs - &targets;
        let gradients = self.backward_batch(output_errors.view());

        for (layer, (weight_gradients, bias_gradients)) in self.layers.iter_mut().zip(gradients) {
            self.optimizer.update_weights(&mut layer.weights, &weight_gradients, learning_rate);
            self.optimizer.update_biases(&mut layer.biases, &bias_gradients, learning_rate);
        }
    }

    /// Serialize the network, including its layers and optimizer state, to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(&serialized)?;
        Ok(())
    }

    /// Load a network previously written by [`NeuralNetwork::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = fs::File::open(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        let deserialized: Self = bincode::deserialize(&buffer)?;
        Ok(deserialized)
    }
}

/// Build a stack of dense layers from consecutive size pairs.
pub fn build_layers(layer_sizes: &[usize], activations: &[Activation]) -> Vec<Layer> {
    layer_sizes
        .windows(2)
        .zip(activations.iter())
        .map(|(window, &activation)| Layer::new(window[0], window[1], activation))
        .collect()
}
