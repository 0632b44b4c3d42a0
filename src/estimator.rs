use futures::{stream, StreamExt};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    api::DynDistanceMatrix,
    config::{Closure, Config},
    entities::{Coordinates, DistanceMeasurement, VelocityRecord},
    error::{
        cancelled_error, deadline_exceeded_error, invalid_input_error,
        measurement_unavailable_error, Error,
    },
};

/// Consecutive segments `from..to` priced by a single measurement.
///
/// An amortized run spreads the measured totals evenly over its
/// `to - from` segments. A closing run is emitted as one record from
/// `coords[from]` to `coords[to]` no matter how many points it skips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub from: usize,
    pub to: usize,
    pub amortized: bool,
}

impl Run {
    fn amortized(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            amortized: true,
        }
    }

    fn closing(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            amortized: false,
        }
    }

    pub fn segments(&self) -> usize {
        if self.amortized {
            self.to - self.from
        } else {
            1
        }
    }
}

/// Which runs get measured for a path of `len` points sampled every
/// `threshold` indices.
///
/// Every multiple of `threshold` in `1..len` closes an amortized run started
/// at the previous sample. What remains after the last sample depends on
/// `closure`: `Loop` adds a single closing run back to the first point,
/// `Open` amortizes the trailing points (if any) like any other run.
pub fn sampling_plan(len: usize, threshold: usize, closure: Closure) -> Vec<Run> {
    let mut plan = Vec::new();

    if len == 0 || threshold == 0 {
        return plan;
    }

    let mut prev = 0;
    for i in (threshold..len).step_by(threshold) {
        plan.push(Run::amortized(prev, i));
        prev = i;
    }

    match closure {
        Closure::Loop => plan.push(Run::closing(prev, 0)),
        Closure::Open if prev < len - 1 => plan.push(Run::amortized(prev, len - 1)),
        Closure::Open => {}
    }

    plan
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementFailure {
    pub from: Coordinates,
    pub to: Coordinates,
    pub error: Error,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VelocityEstimate {
    pub records: Vec<VelocityRecord>,
    /// Number of distance measurements issued.
    pub requests: usize,
    /// Measurements that failed and were replaced by zero-valued records.
    pub failures: Vec<MeasurementFailure>,
}

impl VelocityEstimate {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn push_run(&mut self, coords: &[Coordinates], run: &Run, distance: f64, duration: f64) {
        if !run.amortized {
            self.records.push(VelocityRecord::new(
                coords[run.from],
                coords[run.to],
                distance,
                duration,
            ));
            return;
        }

        let segments = run.segments() as f64;
        for k in run.from + 1..=run.to {
            self.records.push(VelocityRecord::new(
                coords[k - 1],
                coords[k],
                distance / segments,
                duration / segments,
            ));
        }
    }
}

/// Derives per-segment distance and duration along a path while issuing one
/// distance measurement per sampled run instead of one per segment.
#[derive(Clone)]
pub struct VelocityEstimator {
    matrix: DynDistanceMatrix,
    threshold: usize,
    closure: Closure,
    max_in_flight: usize,
}

impl std::fmt::Debug for VelocityEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VelocityEstimator")
            .field("threshold", &self.threshold)
            .field("closure", &self.closure)
            .field("max_in_flight", &self.max_in_flight)
            .finish()
    }
}

impl VelocityEstimator {
    /// Fails with an invalid input error for a zero threshold.
    pub fn new(matrix: DynDistanceMatrix, threshold: usize) -> Result<Self, Error> {
        if threshold == 0 {
            return Err(invalid_input_error());
        }

        Ok(Self {
            matrix,
            threshold,
            closure: Closure::default(),
            max_in_flight: 1,
        })
    }

    pub fn from_config(matrix: DynDistanceMatrix, config: &Config) -> Result<Self, Error> {
        Ok(Self::new(matrix, config.threshold)?
            .with_closure(config.closure)
            .with_max_in_flight(config.max_in_flight))
    }

    pub fn with_closure(mut self, closure: Closure) -> Self {
        self.closure = closure;
        self
    }

    /// Caps the number of outstanding measurements. `1` measures serially.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn closure(&self) -> Closure {
        self.closure
    }

    #[tracing::instrument(skip_all, fields(points = coords.len(), threshold = self.threshold))]
    pub async fn estimate(&self, coords: &[Coordinates]) -> Result<VelocityEstimate, Error> {
        if coords.is_empty() {
            return Err(invalid_input_error());
        }

        let plan = sampling_plan(coords.len(), self.threshold, self.closure);
        let matrix = &*self.matrix;

        // buffered() yields in plan order whatever order the requests finish in
        let measurements: Vec<Result<DistanceMeasurement, Error>> = stream::iter(plan.iter().copied())
            .map(move |run: Run| matrix.measure(coords[run.from], coords[run.to]))
            .buffered(self.max_in_flight)
            .collect()
            .await;

        let mut estimate = VelocityEstimate {
            records: Vec::with_capacity(plan.iter().map(Run::segments).sum()),
            requests: plan.len(),
            failures: Vec::new(),
        };

        for (run, result) in plan.iter().zip(measurements) {
            let (distance, duration) = match result {
                Ok(measurement) => (measurement.distance, measurement.duration),
                Err(err) => {
                    let error = measurement_unavailable_error(&err);
                    tracing::warn!(
                        from = run.from,
                        to = run.to,
                        code = error.code,
                        "{}",
                        error.message
                    );
                    estimate.failures.push(MeasurementFailure {
                        from: coords[run.from],
                        to: coords[run.to],
                        error,
                    });
                    (0.0, 0.0)
                }
            };

            estimate.push_run(coords, run, distance, duration);
        }

        tracing::debug!(
            records = estimate.records.len(),
            requests = estimate.requests,
            failures = estimate.failures.len(),
            "estimated velocities"
        );

        Ok(estimate)
    }

    /// Like [`estimate`](Self::estimate), but drops every in-flight request and
    /// fails as soon as `token` is cancelled.
    pub async fn estimate_with_cancellation(
        &self,
        coords: &[Coordinates],
        token: &CancellationToken,
    ) -> Result<VelocityEstimate, Error> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::warn!("velocity estimation cancelled");
                Err(cancelled_error())
            }
            result = self.estimate(coords) => result,
        }
    }

    /// Like [`estimate`](Self::estimate), but fails once `deadline` passes.
    pub async fn estimate_before(
        &self,
        coords: &[Coordinates],
        deadline: Instant,
    ) -> Result<VelocityEstimate, Error> {
        match tokio::time::timeout_at(deadline, self.estimate(coords)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("velocity estimation deadline exceeded");
                Err(deadline_exceeded_error())
            }
        }
    }
}
