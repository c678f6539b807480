//! Truncated SVD of the term matrix (latent semantic analysis).
//!
//! Only the leading topics are needed, so the decomposition is a block
//! subspace iteration on `AᵀA` with a few oversampled columns, followed by a
//! Rayleigh–Ritz step on the small `p × p` problem. Cost per iteration is
//! linear in the number of sentences. The projection is `A·V`; rows that are
//! equal in `A` therefore get bit-identical projections.

use ndarray::{Array2, Axis};
use tracing::debug;

use casebrief_core::{Error, Result};

const MAX_SWEEPS: usize = 100;
const MAX_ITERATIONS: usize = 50;
const OVERSAMPLE: usize = 10;
const RITZ_TOLERANCE: f64 = 1e-12;
const SINGULAR_EPS: f64 = 1e-10;

/// Sentence × topic projection plus the singular values kept.
#[derive(Debug, Clone)]
pub struct TopicProjection {
    pub projection: Array2<f64>,
    pub singular_values: Vec<f64>,
}

impl TopicProjection {
    /// Importance score per sentence: the sum of its topic weights.
    pub fn scores(&self) -> Vec<f64> {
        self.projection.sum_axis(Axis(1)).to_vec()
    }
}

/// Project `matrix` (sentences × terms) onto at most `num_topics` latent topics.
///
/// The topic count is clamped to the matrix rank bound `min(rows, cols)`, so
/// a tiny vocabulary never fails. Each topic's sign is fixed so its largest
/// term loading is positive. Topics with σ ≈ 0 project to zero.
pub fn project(matrix: &Array2<f64>, num_topics: usize) -> Result<TopicProjection> {
    let (n, m) = matrix.dim();
    let k = num_topics.min(n).min(m);
    if k < num_topics {
        debug!("Clamping topics {} -> {} ({} sentences, {} terms)", num_topics, k, n, m);
    }

    let mut projection = Array2::<f64>::zeros((n, k));
    let mut singular_values = Vec::with_capacity(k);
    if k == 0 {
        return Ok(TopicProjection { projection, singular_values });
    }

    let (eigenvalues, basis) = top_right_singular_vectors(matrix, k)?;

    let sigma_max = eigenvalues[0].max(0.0).sqrt();
    let cutoff = SINGULAR_EPS.max(sigma_max * 1e-8);

    for topic in 0..k {
        let sigma = eigenvalues[topic].max(0.0).sqrt();
        singular_values.push(sigma);
        if sigma < cutoff {
            continue;
        }

        let mut v = basis.column(topic).to_owned();
        let norm = v.dot(&v).sqrt();
        if norm < SINGULAR_EPS {
            continue;
        }
        v.mapv_inplace(|x| x / norm);

        let pivot = v
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, 0.0f64), |best, (i, x)| if x.abs() > best.1.abs() { (i, x) } else { best });
        if pivot.1 < 0.0 {
            v.mapv_inplace(|x| -x);
        }

        projection.column_mut(topic).assign(&matrix.dot(&v));
    }

    if projection.iter().any(|x| !x.is_finite()) {
        return Err(Error::Numeric("topic projection contains non-finite values".into()));
    }

    Ok(TopicProjection { projection, singular_values })
}

/// Leading eigenpairs of `AᵀA`: eigenvalues (σ²) in descending order and the
/// term-space basis whose first `k` columns are the matching right singular
/// vectors.
fn top_right_singular_vectors(matrix: &Array2<f64>, k: usize) -> Result<(Vec<f64>, Array2<f64>)> {
    let (n, m) = matrix.dim();
    let p = (k + OVERSAMPLE).min(n).min(m);

    // Deterministic quasi-random start, pushed once through A so it lies in the row space.
    let omega = Array2::from_shape_fn((n, p), |(i, j)| {
        ((i * p + j + 1) as f64 * 0.618_033_988_749_895).fract() - 0.5
    });
    let mut q = orthonormalize(matrix.t().dot(&omega));
    let mut previous: Option<Vec<f64>> = None;

    for iteration in 0..MAX_ITERATIONS {
        let (values, rotated) = rayleigh_ritz(matrix, &q)?;
        q = rotated;

        let scale = values[0].abs().max(f64::MIN_POSITIVE);
        let converged = previous.as_ref().is_some_and(|prev| {
            prev.iter()
                .zip(&values)
                .take(k)
                .all(|(a, b)| (a - b).abs() <= RITZ_TOLERANCE * scale)
        });
        if converged {
            debug!("Subspace iteration settled after {} rounds (p = {})", iteration + 1, p);
            return Ok((values, q));
        }
        previous = Some(values);

        let y = orthonormalize(matrix.dot(&q));
        q = orthonormalize(matrix.t().dot(&y));
    }

    debug!("Subspace iteration hit {} rounds (p = {})", MAX_ITERATIONS, p);
    rayleigh_ritz(matrix, &q)
}

/// Rayleigh–Ritz step: diagonalize `QᵀAᵀAQ` and rotate `Q` so its columns
/// follow the Ritz values in descending order.
fn rayleigh_ritz(matrix: &Array2<f64>, q: &Array2<f64>) -> Result<(Vec<f64>, Array2<f64>)> {
    let b = matrix.dot(q);
    let (values, vectors) = jacobi_eigen(b.t().dot(&b))?;

    // Descending value order; equal values keep index order.
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let rotated = q.dot(&vectors);
    let mut sorted = Array2::<f64>::zeros(rotated.dim());
    for (to, &from) in order.iter().enumerate() {
        sorted.column_mut(to).assign(&rotated.column(from));
    }
    Ok((order.iter().map(|&i| values[i]).collect(), sorted))
}

/// Modified Gram–Schmidt, applied twice per column. Columns that collapse
/// relative to their starting length are zeroed.
fn orthonormalize(mut q: Array2<f64>) -> Array2<f64> {
    for j in 0..q.ncols() {
        let start = q.column(j).dot(&q.column(j)).sqrt();
        for _ in 0..2 {
            for i in 0..j {
                let basis = q.column(i).to_owned();
                let r = basis.dot(&q.column(j));
                q.column_mut(j).scaled_add(-r, &basis);
            }
        }
        let norm = q.column(j).dot(&q.column(j)).sqrt();
        if norm > SINGULAR_EPS * start.max(f64::MIN_POSITIVE) && norm > f64::MIN_POSITIVE {
            q.column_mut(j).mapv_inplace(|x| x / norm);
        } else {
            q.column_mut(j).fill(0.0);
        }
    }
    q
}

/// Eigen decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns eigenvalues and the matrix whose columns are the eigenvectors.
fn jacobi_eigen(mut a: Array2<f64>) -> Result<(Vec<f64>, Array2<f64>)> {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);
    let scale: f64 = a.iter().map(|x| x * x).sum::<f64>().max(f64::MIN_POSITIVE);

    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[[p, q]] * a[[p, q]];
            }
        }
        if off <= 1e-24 * scale {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq.abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
                let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues: Vec<f64> = (0..n).map(|i| a[[i, i]]).collect();
    if eigenvalues.iter().any(|x| !x.is_finite()) {
        return Err(Error::Numeric("eigen decomposition diverged".into()));
    }
    Ok((eigenvalues, v))
}
