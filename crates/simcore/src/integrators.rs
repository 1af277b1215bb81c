use log::debug;

use crate::SimContext;

/// A generic integration strategy for a scalar state `y` with `dy/dt = f(y)`.
pub trait Integrator {
    /// Advances `y` by one timestep of `ctx.dt`.
    fn step<F: Fn(f64) -> f64>(&self, ctx: &SimContext, y: f64, derivative: F) -> f64;
}

/// Explicit (forward) Euler integrator.
/// First-order accurate; one derivative evaluation per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn step<F: Fn(f64) -> f64>(&self, ctx: &SimContext, y: f64, derivative: F) -> f64 {
        y + derivative(y) * ctx.dt
    }
}

/// Classical fourth-order Runge-Kutta integrator.
/// Evaluates the derivative at the start, twice at the midpoint and at the end of the step.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

impl Integrator for RungeKutta4 {
    fn step<F: Fn(f64) -> f64>(&self, ctx: &SimContext, y: f64, derivative: F) -> f64 {
        let dt = ctx.dt;
        let k1 = derivative(y);
        let k2 = derivative(y + dt / 2.0 * k1);
        let k3 = derivative(y + dt / 2.0 * k2);
        let k4 = derivative(y + dt * k3);
        y + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    }
}

/// Fixed-timestep driver around an [`Integrator`], with an optional hard time cutoff.
#[derive(Debug, Clone)]
pub struct FixedTimestepIntegrator<I: Integrator> {
    pub integrator: I,
    pub fixed_dt: f64,
    /// Integration never starts a step at or past this time (s).
    pub cutoff: f64,
}

impl<I: Integrator> FixedTimestepIntegrator<I> {
    pub fn new(integrator: I, fixed_dt: f64) -> Self {
        FixedTimestepIntegrator {
            integrator,
            fixed_dt,
            cutoff: f64::INFINITY,
        }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Steps from `(t = 0, y0)` while `keep_going(t, y)` holds and `t` is below the cutoff.
    ///
    /// Time advances by repeated addition of the fixed step. Returns the final `(t, y)`;
    /// reaching the cutoff is not an error, the state at that point is returned as is.
    pub fn run_while<F, P>(&self, y0: f64, derivative: F, mut keep_going: P) -> (f64, f64)
    where
        F: Fn(f64) -> f64,
        P: FnMut(f64, f64) -> bool,
    {
        let mut t = 0.0;
        let mut y = y0;

        while keep_going(t, y) && t < self.cutoff {
            let ctx = SimContext {
                dt: self.fixed_dt,
                t,
            };
            y = self.integrator.step(&ctx, y, &derivative);
            t += self.fixed_dt;
        }

        if t >= self.cutoff {
            debug!("integration stopped at cutoff t = {t:.2} s, y = {y:.4}");
        }
        (t, y)
    }

    /// Returns `n_samples` states starting at `y0`, one fixed step apart.
    pub fn trajectory<F>(&self, y0: f64, n_samples: usize, derivative: F) -> Vec<f64>
    where
        F: Fn(f64) -> f64,
    {
        let mut samples = Vec::with_capacity(n_samples);
        if n_samples == 0 {
            return samples;
        }

        let mut y = y0;
        samples.push(y);
        for i in 1..n_samples {
            let ctx = SimContext {
                dt: self.fixed_dt,
                t: (i - 1) as f64 * self.fixed_dt,
            };
            y = self.integrator.step(&ctx, y, &derivative);
            samples.push(y);
        }
        samples
    }
}
