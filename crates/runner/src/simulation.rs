//! Real-time lifecycle around the integrator: run/pause/resume/reset, the
//! wall-clock tick loop and the recorded sample series.

use std::time::Instant;

use dynamics::{Integrator, SemiImplicitEuler};
use simcore::{KinematicState, RunStatus, Sample, SimError, SimParams};

/// Drives an [`Integrator`] on wall-clock ticks and records the resulting
/// sample series.
///
/// The runner owns its state and series exclusively; callers read them
/// through accessors. Ticks delivered in any state other than
/// [`RunStatus::Running`] are ignored, which makes stale ticks after a pause
/// or reset harmless rather than errors.
#[derive(Debug, Clone)]
pub struct SimulationRunner<I: Integrator = SemiImplicitEuler> {
    integrator: I,
    params: SimParams,
    state: KinematicState,
    series: Vec<Sample>,
    status: RunStatus,
    last_tick: Option<Instant>,
}

impl SimulationRunner {
    /// Creates a runner with the default semi-implicit Euler integrator.
    pub fn new(params: SimParams) -> Result<Self, SimError> {
        SimulationRunner::with_integrator(params, SemiImplicitEuler)
    }
}

impl<I: Integrator> SimulationRunner<I> {
    /// Creates a runner around a specific integration strategy.
    pub fn with_integrator(params: SimParams, integrator: I) -> Result<Self, SimError> {
        params.validate()?;
        Ok(SimulationRunner {
            integrator,
            params,
            state: KinematicState::at_rest(&params),
            series: Vec::new(),
            status: RunStatus::Idle,
            last_tick: None,
        })
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Current kinematic state of the body.
    pub fn state(&self) -> KinematicState {
        self.state
    }

    /// Every committed sample of the current run, in time order.
    pub fn samples(&self) -> &[Sample] {
        &self.series
    }

    /// Starts a run, anchoring the wall clock at `now`.
    ///
    /// A finished run is implicitly reset first. Starting while paused acts
    /// as a resume; starting while already running does nothing, so there is
    /// never more than one run in flight.
    pub fn start(&mut self, now: Instant) {
        match self.status {
            RunStatus::Running => {}
            RunStatus::Paused => self.resume(now),
            RunStatus::Idle | RunStatus::Finished => {
                if self.status == RunStatus::Finished {
                    self.reset();
                }
                self.status = RunStatus::Running;
                self.last_tick = Some(now);
                log::debug!("run started: release from {} m", self.params.initial_height);
            }
        }
    }

    /// Pauses a running simulation; state and series stay as they are.
    pub fn pause(&mut self) {
        if self.status == RunStatus::Running {
            self.status = RunStatus::Paused;
            log::debug!("run paused at t={:.3} s", self.state.time);
        }
    }

    /// Resumes a paused run, re-anchoring the wall clock at `now` so the
    /// paused interval is not simulated.
    pub fn resume(&mut self, now: Instant) {
        if self.status == RunStatus::Paused {
            self.status = RunStatus::Running;
            self.last_tick = Some(now);
        }
    }

    /// Returns to [`RunStatus::Idle`] with the body back at the release
    /// height and the series cleared.
    pub fn reset(&mut self) {
        self.status = RunStatus::Idle;
        self.state = KinematicState::at_rest(&self.params);
        self.series.clear();
        self.last_tick = None;
    }

    /// Validates and installs new parameters, then resets the run.
    ///
    /// On error the runner is left exactly as it was, old parameters
    /// included; a run never continues against half-applied parameters.
    pub fn set_params(&mut self, params: SimParams) -> Result<(), SimError> {
        params.validate()?;
        self.params = params;
        self.reset();
        Ok(())
    }

    /// Advances the simulation by the wall time elapsed since the previous
    /// tick and appends one sample. Returns the status after the tick.
    ///
    /// Call once per frame with `Instant::now()`. Ticks while not running
    /// are no-ops, as are ticks with no elapsed wall time.
    pub fn tick(&mut self, now: Instant) -> RunStatus {
        if self.status != RunStatus::Running {
            return self.status;
        }
        let anchor = match self.last_tick {
            Some(anchor) => anchor,
            None => {
                // First tick of a run only anchors the clock; idle wall time
                // must never turn into one giant timestep.
                self.last_tick = Some(now);
                return self.status;
            }
        };

        let dt = now.duration_since(anchor).as_secs_f64();
        if dt <= 0.0 {
            return self.status;
        }
        self.last_tick = Some(now);

        match self.integrator.step(&self.state, &self.params, dt) {
            Ok(next) => {
                if next.height <= 0.0 {
                    // Clamp the crossing step to the ground; the series ends
                    // on an exact zero.
                    self.state = KinematicState { height: 0.0, ..next };
                    self.series.push(Sample::from(self.state));
                    self.status = RunStatus::Finished;
                    self.last_tick = None;
                    log::debug!(
                        "impact at t={:.3} s, velocity {:.2} m/s",
                        self.state.time,
                        self.state.velocity
                    );
                } else {
                    self.state = next;
                    self.series.push(Sample::from(next));
                }
            }
            Err(err) => {
                log::error!("integration step failed: {err}");
                self.status = RunStatus::Idle;
                self.last_tick = None;
            }
        }
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn skydiver_from(initial_height: f64) -> SimParams {
        SimParams { initial_height, ..Default::default() }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_rejects_invalid_params() {
        let params = SimParams { mass: -1.0, ..Default::default() };
        assert!(SimulationRunner::new(params).is_err());
    }

    #[test]
    fn test_new_runner_idles_at_the_release_height() {
        let runner = SimulationRunner::new(skydiver_from(800.0)).unwrap();

        assert_eq!(runner.status(), RunStatus::Idle);
        assert!(runner.samples().is_empty());

        let state = runner.state();
        assert!((state.time).abs() < 1e-12);
        assert!((state.height - 800.0).abs() < 1e-12);
        assert!((state.velocity).abs() < 1e-12);
        assert!((state.acceleration - 9.81).abs() < 1e-12);
    }

    #[test]
    fn test_start_transitions_to_running() {
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();
        runner.start(Instant::now());
        assert_eq!(runner.status(), RunStatus::Running);
    }

    #[test]
    fn test_tick_advances_state_and_appends_samples() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        runner.tick(t0 + ms(16));
        assert_eq!(runner.samples().len(), 1);
        assert!((runner.state().time - 0.016).abs() < 1e-9);
        assert!(runner.state().height < 1000.0);

        runner.tick(t0 + ms(32));
        assert_eq!(runner.samples().len(), 2);
        assert!((runner.state().time - 0.032).abs() < 1e-9);
    }

    #[test]
    fn test_sample_times_strictly_increase() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        for i in 1..=50u64 {
            runner.tick(t0 + ms(16 * i));
        }

        let samples = runner.samples();
        assert_eq!(samples.len(), 50);
        for pair in samples.windows(2) {
            assert!(pair[1].time > pair[0].time);
        }
    }

    #[test]
    fn test_tick_before_start_is_ignored() {
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        assert_eq!(runner.tick(Instant::now()), RunStatus::Idle);
        assert!(runner.samples().is_empty());
    }

    #[test]
    fn test_tick_with_no_elapsed_time_is_skipped() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        runner.tick(t0);
        assert!(runner.samples().is_empty());

        runner.tick(t0 + ms(10));
        assert_eq!(runner.samples().len(), 1);
        assert!((runner.samples()[0].time - 0.010).abs() < 1e-9);
    }

    #[test]
    fn test_start_while_running_does_not_restart() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        runner.tick(t0 + ms(16));

        // A second start must neither clear the series nor move the anchor
        runner.start(t0 + ms(32));
        assert_eq!(runner.samples().len(), 1);

        runner.tick(t0 + ms(48));
        assert_eq!(runner.samples().len(), 2);
        assert!((runner.samples()[1].time - 0.048).abs() < 1e-9);
    }

    #[test]
    fn test_pause_freezes_state_and_ignores_stale_ticks() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        runner.tick(t0 + ms(16));
        runner.tick(t0 + ms(32));
        runner.pause();

        let frozen = runner.state();
        let frozen_len = runner.samples().len();

        // A tick scheduled before the pause landed must change nothing
        assert_eq!(runner.tick(t0 + ms(1000)), RunStatus::Paused);
        assert_eq!(runner.state(), frozen);
        assert_eq!(runner.samples().len(), frozen_len);
    }

    #[test]
    fn test_resume_excludes_paused_wall_time() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        runner.tick(t0 + ms(16));
        runner.pause();
        runner.tick(t0 + ms(50));

        runner.resume(t0 + ms(100));
        runner.tick(t0 + ms(116));

        // 84 ms of paused wall time never became simulated time
        let samples = runner.samples();
        assert_eq!(samples.len(), 2);
        assert!((samples[1].time - 0.032).abs() < 1e-9);
    }

    #[test]
    fn test_start_while_paused_acts_as_resume() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        runner.tick(t0 + ms(16));
        runner.pause();

        runner.start(t0 + ms(100));
        assert_eq!(runner.status(), RunStatus::Running);
        assert_eq!(runner.samples().len(), 1);

        runner.tick(t0 + ms(108));
        assert!((runner.samples()[1].time - 0.024).abs() < 1e-9);
    }

    #[test]
    fn test_pause_and_resume_do_nothing_when_idle() {
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.pause();
        assert_eq!(runner.status(), RunStatus::Idle);

        runner.resume(Instant::now());
        assert_eq!(runner.status(), RunStatus::Idle);
    }

    #[test]
    fn test_reset_returns_to_initial_conditions() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(skydiver_from(500.0)).unwrap();

        runner.start(t0);
        runner.tick(t0 + ms(16));
        runner.tick(t0 + ms(32));
        runner.reset();

        assert_eq!(runner.status(), RunStatus::Idle);
        assert!(runner.samples().is_empty());
        assert!((runner.state().height - 500.0).abs() < 1e-12);
        assert!((runner.state().time).abs() < 1e-12);

        // Resetting twice is the same as resetting once
        runner.reset();
        assert_eq!(runner.status(), RunStatus::Idle);
        assert!(runner.samples().is_empty());
    }

    #[test]
    fn test_set_params_installs_and_resets() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        runner.tick(t0 + ms(16));

        let new_params = skydiver_from(250.0);
        runner.set_params(new_params).unwrap();

        assert_eq!(runner.status(), RunStatus::Idle);
        assert!(runner.samples().is_empty());
        assert_eq!(*runner.params(), new_params);
        assert!((runner.state().height - 250.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_params_rejects_and_leaves_runner_untouched() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(SimParams::default()).unwrap();

        runner.start(t0);
        runner.tick(t0 + ms(16));

        let before_params = *runner.params();
        let before_state = runner.state();
        let before_len = runner.samples().len();

        let bad = SimParams { cross_sectional_area: -0.5, ..Default::default() };
        assert!(runner.set_params(bad).is_err());

        assert_eq!(*runner.params(), before_params);
        assert_eq!(runner.state(), before_state);
        assert_eq!(runner.samples().len(), before_len);
        assert_eq!(runner.status(), RunStatus::Running);
    }

    #[test]
    fn test_run_to_ground_ends_on_an_exact_zero() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(skydiver_from(10.0)).unwrap();

        runner.start(t0);
        let mut now = t0;
        for _ in 0..100 {
            now += ms(100);
            if runner.tick(now) == RunStatus::Finished {
                break;
            }
        }

        assert_eq!(runner.status(), RunStatus::Finished);

        let samples = runner.samples();
        let last = samples.last().unwrap();
        assert_eq!(last.height, 0.0);
        assert!(last.time > 0.0);
        assert!(last.velocity > 0.0);
        assert_eq!(runner.state().height, 0.0);

        // Only the final sample touches the ground
        for sample in &samples[..samples.len() - 1] {
            assert!(sample.height > 0.0);
        }
        for pair in samples.windows(2) {
            assert!(pair[1].time > pair[0].time);
        }
    }

    #[test]
    fn test_finished_run_ignores_further_ticks() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(skydiver_from(10.0)).unwrap();

        runner.start(t0);
        let mut now = t0;
        for _ in 0..100 {
            now += ms(100);
            if runner.tick(now) == RunStatus::Finished {
                break;
            }
        }
        let len = runner.samples().len();

        assert_eq!(runner.tick(now + ms(100)), RunStatus::Finished);
        assert_eq!(runner.samples().len(), len);
    }

    #[test]
    fn test_start_after_finished_begins_a_fresh_run() {
        let t0 = Instant::now();
        let mut runner = SimulationRunner::new(skydiver_from(10.0)).unwrap();

        runner.start(t0);
        let mut now = t0;
        for _ in 0..100 {
            now += ms(100);
            if runner.tick(now) == RunStatus::Finished {
                break;
            }
        }

        let t1 = now + ms(500);
        runner.start(t1);
        assert_eq!(runner.status(), RunStatus::Running);
        assert!(runner.samples().is_empty());
        assert!((runner.state().height - 10.0).abs() < 1e-12);

        runner.tick(t1 + ms(16));
        assert_eq!(runner.samples().len(), 1);
        assert!(runner.samples()[0].height > 9.9);
    }

    #[test]
    fn test_zero_gravity_run_never_finishes() {
        let t0 = Instant::now();
        let params = SimParams { gravity: 0.0, ..Default::default() };
        let mut runner = SimulationRunner::new(params).unwrap();

        runner.start(t0);
        for i in 1..=200u64 {
            assert_eq!(runner.tick(t0 + ms(16 * i)), RunStatus::Running);
        }

        assert_eq!(runner.samples().len(), 200);
        assert!((runner.state().height - 1000.0).abs() < 1e-12);
        assert!((runner.state().velocity).abs() < 1e-12);
    }

    #[test]
    fn test_integrator_failure_stops_the_run() {
        struct ExplodingIntegrator;

        impl Integrator for ExplodingIntegrator {
            fn step(
                &self,
                _state: &KinematicState,
                _params: &SimParams,
                dt: f64,
            ) -> Result<KinematicState, SimError> {
                Err(SimError::InvalidTimestep(dt))
            }
        }

        let t0 = Instant::now();
        let mut runner =
            SimulationRunner::with_integrator(SimParams::default(), ExplodingIntegrator).unwrap();

        runner.start(t0);
        assert_eq!(runner.tick(t0 + ms(16)), RunStatus::Idle);
        assert!(runner.samples().is_empty());
    }
}
