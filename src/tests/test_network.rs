use ndarray::{arr1, arr2, Array1};
use tempfile::tempdir;

use crate::network::{Activation, Layer, NeuralNetwork};
use crate::optimizer::{OptimizerWrapper, SGD};

#[test]
fn test_network_creation() {
    let layer_sizes = &[3, 4, 2];
    let activations = &[Activation::Relu, Activation::Linear];
    let optimizer = OptimizerWrapper::SGD(SGD::new());
    let network = NeuralNetwork::new(layer_sizes, activations, optimizer);

    assert_eq!(network.layers.len(), 2);
    assert_eq!(network.layers[0].weights.shape(), [3, 4]);
    assert_eq!(network.layers[0].biases.shape(), [4]);
    assert_eq!(network.layers[1].weights.shape(), [4, 2]);
    assert_eq!(network.layers[1].biases.shape(), [2]);
    assert_eq!(network.output_size(), Some(2));
}

#[test]
fn test_forward_pass_shape() {
    let layer_sizes = &[3, 4, 2];
    let activations = &[Activation::Relu, Activation::Linear];
    let optimizer = OptimizerWrapper::SGD(SGD::new());
    let mut network = NeuralNetwork::new(layer_sizes, activations, optimizer);

    let input = arr1(&[1.0, 2.0, 3.0]);
    let output = network.forward(input.view());
    assert_eq!(output.shape(), [2]);
}

#[test]
fn test_forward_batch_shape() {
    let layer_sizes = &[3, 4, 2];
    let activations = &[Activation::Relu, Activation::Linear];
    let optimizer = OptimizerWrapper::SGD(SGD::new());
    let mut network = NeuralNetwork::new(layer_sizes, activations, optimizer);

    let inputs = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let outputs = network.forward_batch(inputs.view());
    assert_eq!(outputs.shape(), [2, 2]);
}

#[test]
fn test_forward_with_hand_set_parameters() {
    // Identity-free check: 2 inputs, 1 linear output, known weights
    let optimizer = OptimizerWrapper::SGD(SGD::new());
    let layer = Layer::new(2, 1, Activation::Linear)
        .with_weights(arr2(&[[2.0], [3.0]]))
        .with_biases(arr1(&[0.5]));
    let mut network = NeuralNetwork {
        layers: vec![layer],
        optimizer,
    };

    let output = network.forward(arr1(&[1.0, 1.0]).view());
    assert!((output[0] - 5.5).abs() < 1e-6);
}

#[test]
fn test_relu_clamps_negative_preactivations() {
    let optimizer = OptimizerWrapper::SGD(SGD::new());
    let layer = Layer::new(1, 2, Activation::Relu)
        .with_weights(arr2(&[[1.0, -1.0]]))
        .with_biases(arr1(&[0.0, 0.0]));
    let mut network = NeuralNetwork {
        layers: vec![layer],
        optimizer,
    };

    let output = network.forward(arr1(&[2.0]).view());
    assert_eq!(output[0], 2.0);
    assert_eq!(output[1], 0.0);
}

#[test]
fn test_train_minibatch_reduces_error() {
    let layer_sizes = &[2, 8, 1];
    let activations = &[Activation::Relu, Activation::Linear];
    let optimizer = OptimizerWrapper::SGD(SGD::new());
    let mut network = NeuralNetwork::new(layer_sizes, activations, optimizer);

    let inputs = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
    let targets = arr2(&[[1.0], [-1.0]]);

    let initial = network.forward_batch(inputs.view());
    let initial_error = (&initial - &targets).mapv(|x| x * x).sum();

    for _ in 0..200 {
        network.train_minibatch(inputs.view(), targets.view(), 0.05);
    }

    let trained = network.forward_batch(inputs.view());
    let trained_error = (&trained - &targets).mapv(|x| x * x).sum();
    assert!(
        trained_error < initial_error,
        "error did not decrease: {} -> {}",
        initial_error,
        trained_error
    );
}

#[test]
fn test_save_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("network.bin");

    let layer_sizes = &[3, 4, 2];
    let activations = &[Activation::Relu, Activation::Linear];
    let optimizer = OptimizerWrapper::SGD(SGD::new());
    let network = NeuralNetwork::new(layer_sizes, activations, optimizer);
    network.save(&path).unwrap();

    let loaded = NeuralNetwork::load(&path).unwrap();
    assert_eq!(loaded.layers.len(), network.layers.len());
    for (a, b) in loaded.layers.iter().zip(network.layers.iter()) {
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.biases, b.biases);
    }
}

#[test]
fn test_independent_random_initialization() {
    let layer_sizes = &[4, 8, 2];
    let activations = &[Activation::Relu, Activation::Linear];
    let a = NeuralNetwork::new(layer_sizes, activations, OptimizerWrapper::SGD(SGD::new()));
    let b = NeuralNetwork::new(layer_sizes, activations, OptimizerWrapper::SGD(SGD::new()));

    // Fresh draws per construction; two networks sharing weights would mean
    // the init is not independent per instance.
    assert_ne!(a.layers[0].weights, b.layers[0].weights);
}

#[test]
fn test_zero_bias_initialization() {
    let layer_sizes = &[4, 8, 2];
    let activations = &[Activation::Relu, Activation::Linear];
    let network = NeuralNetwork::new(layer_sizes, activations, OptimizerWrapper::SGD(SGD::new()));
    assert_eq!(network.layers[0].biases, Array1::<f32>::zeros(8));
    assert_eq!(network.layers[1].biases, Array1::<f32>::zeros(2));
}

#[test]
fn test_weight_initialization_range() {
    let layer_sizes = &[10, 20, 2];
    let activations = &[Activation::Relu, Activation::Linear];
    let network = NeuralNetwork::new(layer_sizes, activations, OptimizerWrapper::SGD(SGD::new()));
    for layer in &network.layers {
        for &w in layer.weights.iter() {
            assert!(w >= -0.1 && w <= 0.1);
        }
    }
}
