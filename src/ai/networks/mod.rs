mod policy_network;

pub use policy_network::{PolicyNetwork, PolicyNetworkConfig};
