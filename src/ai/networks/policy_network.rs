use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::{Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::leaky_relu;

const LEAKY_SLOPE: f64 = 0.01;

/// Move-preference network over a raw board.
///
/// ```text
/// Input:  [batch, 1, 6, 7]  (cell values 0/1/2)
/// Conv1:  1 -> 28 channels, 3x3 kernel  =>  [batch, 28, 4, 5]
/// LeakyReLU
/// Conv2:  28 -> 16 channels, 3x3 kernel =>  [batch, 16, 2, 3]
/// LeakyReLU
/// Flatten: 16*2*3 = 96
/// FC:     96 -> 7  (one preference per column)
/// ```
#[derive(Module, Debug)]
pub struct PolicyNetwork<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    fc: Linear<B>,
}

#[derive(Config, Debug)]
pub struct PolicyNetworkConfig {}

impl PolicyNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> PolicyNetwork<B> {
        PolicyNetwork {
            conv1: Conv2dConfig::new([1, 28], [3, 3]).init(device),
            conv2: Conv2dConfig::new([28, 16], [3, 3]).init(device),
            fc: LinearConfig::new(96, 7).init(device),
        }
    }
}

impl<B: Backend> PolicyNetwork<B> {
    /// Forward pass: input [batch, 1, 6, 7] -> output [batch, 7].
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 2> {
        let batch_size = input.dims()[0];

        let x = leaky_relu(self.conv1.forward(input), LEAKY_SLOPE);
        let x = leaky_relu(self.conv2.forward(x), LEAKY_SLOPE);
        let x = x.reshape([batch_size as i32, 96]);
        self.fc.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_network_output_shape() {
        let device = Default::default();
        let network = PolicyNetworkConfig {}.init::<TestBackend>(&device);

        let input = Tensor::zeros([2, 1, 6, 7], &device);
        let output = network.forward(input);
        assert_eq!(output.shape().dims, [2, 7]);
    }

    #[test]
    fn test_network_single_input() {
        let device = Default::default();
        let network = PolicyNetworkConfig {}.init::<TestBackend>(&device);

        let input = Tensor::ones([1, 1, 6, 7], &device);
        let output = network.forward(input);
        assert_eq!(output.shape().dims, [1, 7]);
    }
}
