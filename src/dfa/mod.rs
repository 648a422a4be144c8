pub mod learner;

pub use learner::{WeakLearner, ForwardPass, Gradients, sigmoid};
