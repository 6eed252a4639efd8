pub mod buffers;
pub mod network;
pub mod topology;
pub mod weights;

pub use buffers::ActivationBuffer;
pub use network::Network;
pub use topology::Topology;
pub use weights::WeightStore;
