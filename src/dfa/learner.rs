use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Numerically stable logistic function. Branching on the sign keeps the
/// exponent non-positive, so exp() never overflows for large |x|.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Parameters of one weak learner: a single hidden layer with tanh
/// activation and a sigmoid output layer.
///
/// `feedback` (B1) is the defining piece of Direct Feedback Alignment: a
/// random [hidden × n_classes] projection drawn once at construction and
/// never updated. The backward pass routes the output error through it
/// instead of through `w2.transpose()`, as in Nøkland, 2016.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakLearner {
    /// [hidden × input_dim]
    pub w1: Matrix,
    /// [n_classes × hidden]
    pub w2: Matrix,
    /// [hidden × 1]
    pub b1: Matrix,
    /// [n_classes × 1]
    pub b2: Matrix,
    /// [hidden × n_classes], fixed for the learner's lifetime.
    pub feedback: Matrix,
}

/// All intermediate tensors of one forward pass, each [· × batch].
/// `a1` and `h1` feed the backward pass, `a2` is the linear output kept
/// for stacking, `y_hat` drives loss and error computation.
pub struct ForwardPass {
    pub a1: Matrix,
    pub h1: Matrix,
    pub a2: Matrix,
    pub y_hat: Matrix,
}

/// DFA gradients, pre-negated so the update is `param += lr * grad`.
pub struct Gradients {
    pub d_w1: Matrix,
    pub d_w2: Matrix,
    /// [hidden × 1] column vector.
    pub d_b1: Matrix,
    /// [n_classes × 1] column vector.
    pub d_b2: Matrix,
}

impl WeakLearner {
    /// Draws all five parameter tensors i.i.d. from N(0, 1).
    pub fn new<R: Rng>(
        input_dim: usize,
        hidden_size: usize,
        n_classes: usize,
        rng: &mut R,
    ) -> WeakLearner {
        WeakLearner {
            w1: Matrix::standard_normal(hidden_size, input_dim, rng),
            w2: Matrix::standard_normal(n_classes, hidden_size, rng),
            b1: Matrix::standard_normal(hidden_size, 1, rng),
            b2: Matrix::standard_normal(n_classes, 1, rng),
            feedback: Matrix::standard_normal(hidden_size, n_classes, rng),
        }
    }

    /// Forward pass over a batch `x` of input columns ([input_dim × batch]).
    /// Biases broadcast identically across every column. Pure.
    pub fn forward(&self, x: &Matrix) -> ForwardPass {
        let a1 = (self.w1.clone() * x.clone()).add_col_broadcast(&self.b1);
        let h1 = a1.map(f64::tanh);
        let a2 = (self.w2.clone() * h1.clone()).add_col_broadcast(&self.b2);
        let y_hat = a2.map(sigmoid);

        ForwardPass { a1, h1, a2, y_hat }
    }

    /// DFA backward pass. `error` is `y_hat - targets` ([n_classes × batch]).
    ///
    /// The hidden error signal is `(B1 · e) ⊙ tanh'(a1)` — projected through
    /// the fixed feedback matrix, never through `w2.transpose()`. This
    /// function must not read `w2`; that independence is what makes the
    /// algorithm feedback alignment rather than backpropagation.
    pub fn dfa_backward(&self, error: &Matrix, fwd: &ForwardPass, x: &Matrix) -> Gradients {
        let d_w2 = (error.clone() * fwd.h1.transpose()).map(|v| -v);

        let tanh_prime = fwd.a1.map(|v| {
            let t = v.tanh();
            1.0 - t * t
        });
        let da1 = (self.feedback.clone() * error.clone()).hadamard(&tanh_prime);

        let d_w1 = (da1.clone() * x.transpose()).map(|v| -v);
        let d_b1 = da1.sum_cols().map(|v| -v);
        let d_b2 = error.sum_cols().map(|v| -v);

        Gradients { d_w1, d_w2, d_b1, d_b2 }
    }

    /// Gradient-ascent update: `param += lr * grad` for the four trainable
    /// tensors. The feedback matrix is untouched.
    pub fn apply_gradients(&mut self, grads: &Gradients, lr: f64) {
        self.w1 = self.w1.clone() + grads.d_w1.map(|v| v * lr);
        self.w2 = self.w2.clone() + grads.d_w2.map(|v| v * lr);
        self.b1 = self.b1.clone() + grads.d_b1.map(|v| v * lr);
        self.b2 = self.b2.clone() + grads.d_b2.map(|v| v * lr);
    }
}
