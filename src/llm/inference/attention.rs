use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::llm::error::LlmError;
use crate::llm::tensor::{self, Matrix};

/// Multi-head scaled dot-product self-attention.
///
/// The four projection matrices are fixed at construction; `forward` never
/// mutates them, so the same input always yields the same output.
#[derive(Debug, Clone)]
pub struct MultiHeadAttention {
    /// Number of attention heads
    num_heads: usize,
    /// Dimension of the hidden state
    hidden_dim: usize,
    /// Dimension of each head (hidden_dim / num_heads)
    head_dim: usize,
    /// Query projection
    w_q: Matrix,
    /// Key projection
    w_k: Matrix,
    /// Value projection
    w_v: Matrix,
    /// Output projection
    w_o: Matrix,
}

impl MultiHeadAttention {
    /// Creates a layer with randomly initialized projections
    ///
    /// # Arguments
    /// * `num_heads` - Number of heads; must divide `hidden_dim`
    /// * `hidden_dim` - Width of the hidden state
    /// * `rng` - Random source for the weights
    pub fn new<R: Rng + ?Sized>(num_heads: usize, hidden_dim: usize, rng: &mut R) -> Result<Self, LlmError> {
        let head_dim = Self::head_dim_for(num_heads, hidden_dim)?;
        Ok(Self {
            num_heads,
            hidden_dim,
            head_dim,
            w_q: tensor::initialize(hidden_dim, hidden_dim, rng),
            w_k: tensor::initialize(hidden_dim, hidden_dim, rng),
            w_v: tensor::initialize(hidden_dim, hidden_dim, rng),
            w_o: tensor::initialize(hidden_dim, hidden_dim, rng),
        })
    }

    /// Creates a layer from explicit projection matrices, each `hidden_dim x hidden_dim`
    pub fn from_weights(
        num_heads: usize,
        w_q: Matrix,
        w_k: Matrix,
        w_v: Matrix,
        w_o: Matrix,
    ) -> Result<Self, LlmError> {
        let hidden_dim = w_q.rows();
        let head_dim = Self::head_dim_for(num_heads, hidden_dim)?;
        for w in [&w_q, &w_k, &w_v, &w_o] {
            if w.shape() != (hidden_dim, hidden_dim) {
                return Err(LlmError::ShapeMismatch {
                    op: "attention weights",
                    left: (hidden_dim, hidden_dim),
                    right: w.shape(),
                });
            }
        }
        Ok(Self { num_heads, hidden_dim, head_dim, w_q, w_k, w_v, w_o })
    }

    fn head_dim_for(num_heads: usize, hidden_dim: usize) -> Result<usize, LlmError> {
        if num_heads == 0 || hidden_dim == 0 {
            return Err(LlmError::InvalidConfig(format!(
                "num_heads ({}) and hidden_dim ({}) must be positive",
                num_heads, hidden_dim
            )));
        }
        if hidden_dim % num_heads != 0 {
            return Err(LlmError::InvalidConfig(format!(
                "hidden_dim ({}) is not divisible by num_heads ({})",
                hidden_dim, num_heads
            )));
        }
        Ok(hidden_dim / num_heads)
    }

    pub fn num_heads(&self) -> usize {
        self.num_heads
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    pub fn head_dim(&self) -> usize {
        self.head_dim
    }

    /// Runs self-attention over a sequence
    ///
    /// # Arguments
    /// * `x` - Input tensor with shape [seq_len, hidden_dim]
    ///
    /// # Returns
    /// * `Result<Matrix, LlmError>` - Output with the same shape as `x`
    pub fn forward(&self, x: &Matrix) -> Result<Matrix, LlmError> {
        if x.cols() != self.hidden_dim {
            return Err(LlmError::ShapeMismatch {
                op: "attention input",
                left: x.shape(),
                right: (x.rows(), self.hidden_dim),
            });
        }
        debug!("Attention forward pass with input of shape {:?}", x.shape());

        let q = tensor::matmul(x, &self.w_q)?;
        let k = tensor::matmul(x, &self.w_k)?;
        let v = tensor::matmul(x, &self.w_v)?;

        // Heads are independent; collect keeps them in head order
        let heads = (0..self.num_heads)
            .into_par_iter()
            .map(|h| self.head(&q, &k, &v, h))
            .collect::<Result<Vec<Matrix>, LlmError>>()?;

        let concatenated = tensor::concat_columns(&heads)?;
        let output = tensor::matmul(&concatenated, &self.w_o)?;
        debug!("Attention output shape {:?}", output.shape());
        Ok(output)
    }

    /// Scaled dot-product attention for a single head
    fn head(&self, q: &Matrix, k: &Matrix, v: &Matrix, h: usize) -> Result<Matrix, LlmError> {
        let seq_len = q.rows();
        let start = h * self.head_dim;
        let end = start + self.head_dim;

        let q_h = tensor::slice(q, 0, seq_len, start, end)?;
        let k_h = tensor::slice(k, 0, seq_len, start, end)?;
        let v_h = tensor::slice(v, 0, seq_len, start, end)?;

        let scores = tensor::matmul(&q_h, &tensor::transpose(&k_h)?)?;
        let scores = tensor::scale(&scores, 1.0 / (self.head_dim as f32).sqrt());
        let weights = tensor::softmax(&scores)?;
        trace!("Head {} attention weights {:?}", h, weights);

        tensor::matmul(&weights, &v_h)
    }
}
