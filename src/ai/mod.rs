mod estimator;
mod human;
mod masking;
mod player;
mod policy;
mod random;
pub mod state_encoding;
pub mod tabular;

pub use estimator::{Estimator, LinearEstimator};
pub use human::HumanPlayer;
pub use masking::{argmax, masked_argmax};
pub use player::Player;
pub use policy::PolicyPlayer;
pub use random::RandomPlayer;
pub use state_encoding::StateKey;
pub use tabular::{LearnerConfig, QTable, TabularLearner};
