

use ndarray::prelude::*;
use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use ndarray_stats::QuantileExt;
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;

use crate::config::TrainParams;
use crate::cooccurrence::CoocGraph;

const RNG_SEED: u64 = 1;
const PLOT_SIZE: (u32, u32) = (640, 640);

// learns A and the diagonal of L so that A @ X approximates L @ X under a
// mean squared error. X is read in the forward pass but receives no updates
// unless `update_x` is set, in which case it becomes a trained embedding
// table. the read-out embedding is the transpose of X either way, so the
// plain gradient mode yields the zero matrix by construction.
pub struct Train {
    a: Array2<f32>,
    x: Array2<f32>,
    l_diag: Array1<f32>,
    vel_a: Array2<f32>,
    vel_x: Array2<f32>,
    vel_l: Array1<f32>,
    trajectory: Vec<(usize, f32)>,
}

// uniform scaling factor keeping the global gradient l2 norm at or
// below the threshold
fn clip_scale(norm: f32, threshold: f32) -> f32 {
    if norm > threshold {
        1.0 / norm
    } else {
        1.0
    }
}

impl Train {

    fn new(size: usize, update_x: bool) -> Result<Train, Box<dyn Error>> {

        let mut rng = StdRng::seed_from_u64(RNG_SEED);
        let normal = Normal::new(0.0f32, 1.0)?;

        // he-style variance scaling, fan-in is the matrix dimension
        let factor = (2.0 / size as f32).sqrt();
        let a = Array2::random_using((size, size), normal, &mut rng) * factor;
        // with X frozen it starts (and stays) at zero; the trained-X mode
        // draws it from the same distribution as A so there is a signal
        // to descend on
        let x = if update_x {
            Array2::random_using((size, size), normal, &mut rng) * factor
        } else {
            Array2::zeros((size, size))
        };
        let l_diag = Array1::random_using(size, normal, &mut rng) * factor;

        Ok(Self {
            a,
            x,
            l_diag,
            vel_a: Array2::zeros((size, size)),
            vel_x: Array2::zeros((size, size)),
            vel_l: Array1::zeros(size),
            trajectory: Vec::new(),
        })
    }

    // L is stored by its diagonal only, off-diagonal entries are
    // structurally zero and never receive velocity or updates
    pub fn l_matrix(&self) -> Array2<f32> {
        Array2::from_diag(&self.l_diag)
    }

    pub fn trajectory(&self) -> &[(usize, f32)] {
        &self.trajectory
    }

    // embedding of vocabulary index i is the i-th column of X
    pub fn embeddings(&self) -> Array2<f32> {
        self.x.t().to_owned()
    }

    // one full-batch iteration, returns the scalar cost
    fn step(&mut self, params: &TrainParams) -> f32 {

        let size = self.l_diag.len();
        let entries = (size * size) as f32;
        let coeff = 2.0 / entries;

        // forward: error = A @ X - L @ X, with L @ X a per-row scaling
        let lx = &self.x * &self.l_diag.view().insert_axis(Axis(1));
        let err = self.a.dot(&self.x) - lx;
        let cost = err.mapv(|e| e * e).mean().unwrap_or(0.0);

        // backward
        let err_xt = err.dot(&self.x.t());
        let grad_a = &err_xt * coeff;
        let grad_l = err_xt.diag().mapv(|d| -coeff * d);
        let grad_x = (self.a.t().dot(&err)
            - &err * &self.l_diag.view().insert_axis(Axis(1)))
            * coeff;

        // global norm over the trainable set only
        let mut sq_sum = grad_a.mapv(|g| g * g).sum() + grad_l.mapv(|g| g * g).sum();
        if params.update_x {
            sq_sum += grad_x.mapv(|g| g * g).sum();
        }
        let scale = clip_scale(sq_sum.sqrt(), params.clip_threshold);

        // momentum updates
        let step = params.learning_rate * scale;
        self.vel_a = &self.vel_a * params.momentum - &grad_a * step;
        self.a += &self.vel_a;
        self.vel_l = &self.vel_l * params.momentum - &grad_l * step;
        self.l_diag += &self.vel_l;
        if params.update_x {
            self.vel_x = &self.vel_x * params.momentum - &grad_x * step;
            self.x += &self.vel_x;
        }

        cost
    }

    fn train(&mut self, params: &TrainParams) {

        for i in 0..params.iterations {
            let cost = self.step(params);
            println!("{} {}", i, cost);
            self.trajectory.push((i, cost));
        }
    }

    // runs the fixed schedule over the graph's index space. the loss never
    // reads the adjacency weights, only the vocabulary dimension
    pub fn run(graph: &CoocGraph, params: &TrainParams) -> Result<Train, Box<dyn Error>> {

        let mut trainer = Train::new(graph.len(), params.update_x)?;
        trainer.train(params);
        Ok(trainer)
    }
}

// iteration vs cost scatter, written once after training
pub fn draw_cost_curve(points: &[(usize, f32)], save_to: &str) -> Result<(), Box<dyn Error>> {

    if points.is_empty() {
        return Ok(());
    }

    let costs = Array1::from_iter(points.iter().map(|p| p.1));
    let top = *costs.max()?;
    let y_top = if top > 0.0 { top * 1.05 } else { 1.0 };
    let x_top = points.len() as f32;

    let root_area = BitMapBackend::new(save_to, PLOT_SIZE).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .margin(15)
        .caption("iterations vs cost", ("sans-serif", 20))
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..x_top, 0f32..y_top)?;

    chart.configure_mesh().draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|(i, cost)| Circle::new((*i as f32, *cost), 1, BLACK.filled())),
    )?;

    root_area.present()?;
    Ok(())
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::vocab::{tokenize, Vocab};

    const TOY_CORPUS: &str = "the cat sat on the mat the cat ran";

    fn toy_graph() -> CoocGraph {
        let tokens = tokenize(TOY_CORPUS);
        let vocab = Vocab::build(&tokens);
        CoocGraph::build(&tokens, &vocab)
    }

    #[test]
    fn clip_scale_bounds_the_norm() {

        // above the threshold the scaled norm comes back to 1
        let norm = 7.5f32;
        let scale = clip_scale(norm, 1.0);
        assert!((norm * scale - 1.0).abs() < 1e-6);

        // at or below the threshold gradients pass through unchanged
        assert_eq!(clip_scale(0.25, 1.0), 1.0);
        assert_eq!(clip_scale(1.0, 1.0), 1.0);
    }

    #[test]
    fn l_off_diagonal_stays_zero() {

        let graph = toy_graph();
        let params = TrainParams::new(true);
        let trainer = Train::run(&graph, &params).unwrap();

        let l = trainer.l_matrix();
        for i in 0..graph.len() {
            for j in 0..graph.len() {
                if i != j {
                    assert_eq!(l[[i, j]], 0.0);
                }
            }
        }
    }

    #[test]
    fn plain_gradient_mode_leaves_x_at_zero() {

        // X receives no updates in the reference update rule, so the
        // read-out embedding is degenerate by construction
        let graph = toy_graph();
        let params = TrainParams::new(false);
        let trainer = Train::run(&graph, &params).unwrap();

        let embeddings = trainer.embeddings();
        assert_eq!(embeddings.dim(), (graph.len(), graph.len()));
        assert!(embeddings.iter().all(|&v| v == 0.0));

        // and with X at zero the cost is identically zero as well
        assert!(trainer.trajectory().iter().all(|&(_, c)| c == 0.0));
    }

    #[test]
    fn trained_x_mode_settles() {

        let graph = toy_graph();
        let params = TrainParams::new(true);
        let trainer = Train::run(&graph, &params).unwrap();

        let trajectory = trainer.trajectory();
        assert_eq!(trajectory.len(), params.iterations);
        assert!(trajectory.iter().all(|&(_, c)| c.is_finite()));
        assert!(trainer.embeddings().iter().any(|&v| v != 0.0));

        // loose stability check over the tail, momentum may oscillate locally
        let window = 100;
        let tail: Vec<f32> = trajectory[trajectory.len() - 2 * window..]
            .iter()
            .map(|&(_, c)| c)
            .collect();
        let earlier: f32 = tail[..window].iter().sum::<f32>() / window as f32;
        let later: f32 = tail[window..].iter().sum::<f32>() / window as f32;
        assert!(later <= earlier + 1e-4);
    }

    #[test]
    fn training_is_deterministic() {

        let graph = toy_graph();
        let params = TrainParams::new(true);
        let first = Train::run(&graph, &params).unwrap();
        let second = Train::run(&graph, &params).unwrap();

        assert_eq!(first.embeddings(), second.embeddings());
        assert_eq!(first.trajectory(), second.trajectory());
    }

    #[test]
    fn cost_curve_is_written() {

        let points: Vec<(usize, f32)> = (0..64).map(|i| (i, 1.0 / (i + 1) as f32)).collect();
        let out = std::env::temp_dir().join("eigenwords_cost_curve.png");
        draw_cost_curve(&points, out.to_str().unwrap()).unwrap();
        assert!(out.exists());
        let _ = std::fs::remove_file(out);
    }
}
