use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::network::Layer;

pub trait Optimizer {
    fn update_weights(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32);
    fn update_biases(&mut self, biases: &mut Array1<f32>, gradients: &Array1<f32>, learning_rate: f32);
}

#[derive(Serialize, Deserialize, Clone)]
pub enum OptimizerWrapper {
    SGD(SGD),
    Adam(Adam),
}

impl Optimizer for OptimizerWrapper {
    fn update_weights(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32) {
        match self {
            OptimizerWrapper::SGD(optimizer) => optimizer.update_weights(weights, gradients, learning_rate),
            OptimizerWrapper::Adam(optimizer) => optimizer.update_weights(weights, gradients, learning_rate),
        }
    }

    fn update_biases(&mut self, biases: &mut Array1<f32>, gradients: &Array1<f32>, learning_rate: f32) {
        match self {
            OptimizerWrapper::SGD(optimizer) => optimizer.update_biases(biases, gradients, learning_rate),
            OptimizerWrapper::Adam(optimizer) => optimizer.update_biases(biases, gradients, learning_rate),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SGD;

impl SGD {
    pub fn new() -> SGD {
        SGD
    }
}

impl Default for SGD {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for SGD {
    fn update_weights(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32) {
        weights.zip_mut_with(gradients, |w, &g| *w -= learning_rate * g);
    }

    fn update_biases(&mut self, biases: &mut Array1<f32>, gradients: &Array1<f32>, learning_rate: f32) {
        biases.zip_mut_with(gradients, |b, &g| *b -= learning_rate * g);
    }
}

/// Adam with per-layer first/second moment state.
///
/// Update calls must arrive in layer definition order, weights then biases per
/// layer, which is how `NeuralNetwork::train_minibatch` drives the optimizer.
/// The cursors track which layer's moment buffers the next call refers to; the
/// time step advances once per full pass over the layers.
#[derive(Serialize, Deserialize, Clone)]
pub struct Adam {
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
    m_weights: Vec<Array2<f32>>,
    v_weights: Vec<Array2<f32>>,
    m_biases: Vec<Array1<f32>>,
    v_biases: Vec<Array1<f32>>,
    t: usize,
    weight_cursor: usize,
    bias_cursor: usize,
}

impl Adam {
    pub fn new(layers: &[Layer], beta1: f32, beta2: f32, epsilon: f32) -> Self {
        let m_weights = layers
            .iter()
            .map(|layer| Array2::<f32>::zeros(layer.weights.dim()))
            .collect();
        let v_weights = layers
            .iter()
            .map(|layer| Array2::<f32>::zeros(layer.weights.dim()))
            .collect();
        let m_biases = layers
            .iter()
            .map(|layer| Array1::<f32>::zeros(layer.biases.dim()))
            .collect();
        let v_biases = layers
            .iter()
            .map(|layer| Array1::<f32>::zeros(layer.biases.dim()))
            .collect();

        Adam {
            beta1,
            beta2,
            epsilon,
            m_weights,
            v_weights,
            m_biases,
            v_biases,
            t: 1,
            weight_cursor: 0,
            bias_cursor: 0,
        }
    }

    pub fn default(layers: &[Layer]) -> Self {
        Self::new(layers, 0.9, 0.999, 1e-8)
    }
}

impl Optimizer for Adam {
    fn update_weights(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32) {
        let index = self.weight_cursor;
        self.weight_cursor = (self.weight_cursor + 1) % self.m_weights.len();

        let (beta1, beta2, epsilon, t) = (self.beta1, self.beta2, self.epsilon, self.t);
        let m = &mut self.m_weights[index];
        let v = &mut self.v_weights[index];

        m.zip_mut_with(gradients, |m, &g| *m = beta1 * *m + (1.0 - beta1) * g);
        v.zip_mut_with(gradients, |v, &g| *v = beta2 * *v + (1.0 - beta2) * g * g);

        let m_hat = m.mapv(|x| x / (1.0 - beta1.powi(t as i32)));
        let v_hat = v.mapv(|x| x / (1.0 - beta2.powi(t as i32)));

        *weights -= &((&m_hat / (v_hat.mapv(f32::sqrt) + epsilon)) * learning_rate);
    }

    fn update_biases(&mut self, biases: &mut Array1<f32>, gradients: &Array1<f32>, learning_rate: f32) {
        let index = self.bias_cursor;
        self.bias_cursor = (self.bias_cursor + 1) % self.m_biases.len();

        let (beta1, beta2, epsilon, t) = (self.beta1, self.beta2, self.epsilon, self.t);
        let m = &mut self.m_biases[index];
        let v = &mut self.v_biases[index];

        m.zip_mut_with(gradients, |m, &g| *m = beta1 * *m + (1.0 - beta1) * g);
        v.zip_mut_with(gradients, |v, &g| *v = beta2 * *v + (1.0 - beta2) * g * g);

        let m_hat = m.mapv(|x| x / (1.0 - beta1.powi(t as i32)));
        let v_hat = v.mapv(|x| x / (1.0 - beta2.powi(t as i32)));

        *biases -= &((&m_hat / (v_hat.mapv(f32::sqrt) + epsilon)) * learning_rate);

        // Bias update is the last per-layer call; a wrapped cursor means one
        // full pass over the layers is complete.
        if self.bias_cursor == 0 {
            self.t += 1;
        }
    }
}
