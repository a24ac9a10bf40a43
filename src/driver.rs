//! Fixed-interval stepping loop with a shared run/stop gate

use crate::automaton::{Engine, Palette, TransitionRule};
use crate::config::DriverConfig;
use crate::error::CaResult;
use crate::render::Renderer;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct GateState {
    running: AtomicBool,
    cancelled: AtomicBool,
}

/// Cloneable run/stop/toggle switch checked once per tick
///
/// Flipping the gate never interrupts a step already in progress.
#[derive(Debug, Clone)]
pub struct RunGate {
    state: Arc<GateState>,
}

impl RunGate {
    pub fn new(running: bool) -> Self {
        Self {
            state: Arc::new(GateState {
                running: AtomicBool::new(running),
                cancelled: AtomicBool::new(false),
            }),
        }
    }

    pub fn run(&self) {
        self.state.running.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.state.running.store(false, Ordering::SeqCst);
    }

    /// Flip the gate and return the new running state
    pub fn toggle(&self) -> bool {
        !self.state.running.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }

    /// End the driver loop after the current tick
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for RunGate {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Counters describing a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverReport {
    /// Ticks that fired, whether or not the gate let them step
    pub ticks: u64,
    pub steps: u64,
    /// Deadlines missed because a previous tick overran
    pub skipped_ticks: u64,
    pub changed_cells: usize,
}

/// Paces `Engine::step` calls and forwards each delta to a renderer
///
/// The engine is borrowed mutably for the whole run, so steps are serialized.
#[derive(Debug, Clone)]
pub struct Driver {
    interval: Duration,
    max_ticks: Option<u64>,
    gate: RunGate,
}

impl Driver {
    pub fn new(interval: Duration, max_ticks: Option<u64>, gate: RunGate) -> Self {
        Self {
            interval,
            max_ticks,
            gate,
        }
    }

    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(
            Duration::from_millis(config.tick_interval_ms),
            config.max_ticks,
            RunGate::new(config.start_running),
        )
    }

    /// Handle for controlling the loop from elsewhere
    pub fn gate(&self) -> RunGate {
        self.gate.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// One tick: step and paint if the gate is open
    ///
    /// Returns the number of changed cells, or `None` when the gate is closed.
    pub fn tick<R, P>(&self, engine: &mut Engine<R>, renderer: &mut P, palette: &Palette) -> CaResult<Option<usize>>
    where
        R: TransitionRule,
        P: Renderer + ?Sized,
    {
        if !self.gate.is_running() {
            return Ok(None);
        }
        let changes = engine.step();
        renderer.paint_cells(&changes, palette)?;
        Ok(Some(changes.len()))
    }

    /// Paint the full grid, then tick until cancelled or `max_ticks` is reached
    ///
    /// Deadlines that passed while a tick was running are skipped, not queued.
    pub fn run<R, P>(&self, engine: &mut Engine<R>, renderer: &mut P, palette: &Palette) -> CaResult<DriverReport>
    where
        R: TransitionRule,
        P: Renderer + ?Sized,
    {
        info!(
            "[Driver] Starting at generation {}, interval {:?}, max ticks {:?}",
            engine.generation(),
            self.interval,
            self.max_ticks
        );
        renderer.paint_grid(engine.grid(), palette)?;

        let mut report = DriverReport::default();
        let mut deadline = Instant::now() + self.interval;

        while !self.gate.is_cancelled() && self.max_ticks.map_or(true, |max| report.ticks < max) {
            let now = Instant::now();
            if now < deadline {
                thread::sleep(deadline - now);
            }

            let late = Instant::now().saturating_duration_since(deadline);
            if !self.interval.is_zero() && late >= self.interval {
                let missed = (late.as_nanos() / self.interval.as_nanos()) as u64;
                warn!("[Driver] Tick overran, skipping {} tick(s)", missed);
                report.skipped_ticks += missed;
                deadline = Instant::now();
            }
            deadline += self.interval;

            if self.gate.is_cancelled() {
                break;
            }
            report.ticks += 1;

            if let Some(changed) = self.tick(engine, renderer, palette)? {
                report.steps += 1;
                report.changed_cells += changed;
            }
        }

        info!(
            "[Driver] Stopped at generation {} after {} ticks ({} steps)",
            engine.generation(),
            report.ticks,
            report.steps
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{CellChange, Grid, LifeRule, State};
    use crate::config::Boundary;
    use crate::render::PixelSurface;

    /// Records what it is asked to paint
    #[derive(Default)]
    struct Recorder {
        full_paints: usize,
        deltas: Vec<Vec<CellChange>>,
    }

    impl Renderer for Recorder {
        fn paint_grid(&mut self, _grid: &Grid, _palette: &Palette) -> CaResult<()> {
            self.full_paints += 1;
            Ok(())
        }

        fn paint_cells(&mut self, changes: &[CellChange], _palette: &Palette) -> CaResult<()> {
            self.deltas.push(changes.to_vec());
            Ok(())
        }
    }

    fn blinker_engine() -> Engine<LifeRule> {
        let rows: Vec<Vec<State>> = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 2, 2, 2, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let grid = Grid::from_cells(rows, Boundary::Clamped).unwrap();
        Engine::new(grid, LifeRule::game_of_life())
    }

    #[test]
    fn test_gate_controls() {
        let gate = RunGate::new(false);
        let shared = gate.clone();
        assert!(!gate.is_running());
        shared.run();
        assert!(gate.is_running());
        assert!(!gate.toggle());
        assert!(!shared.is_running());
        assert!(shared.toggle());
        gate.stop();
        assert!(!shared.is_running());
        assert!(!gate.is_cancelled());
        shared.cancel();
        assert!(gate.is_cancelled());
    }

    #[test]
    fn test_bounded_run() {
        let driver = Driver::new(Duration::from_millis(1), Some(3), RunGate::default());
        let mut engine = blinker_engine();
        let mut recorder = Recorder::default();

        let report = driver.run(&mut engine, &mut recorder, &Palette::life()).unwrap();

        assert_eq!(report.ticks, 3);
        assert_eq!(report.steps, 3);
        assert_eq!(engine.generation(), 3);
        assert_eq!(recorder.full_paints, 1);
        assert_eq!(recorder.deltas.len(), 3);
        assert_eq!(recorder.deltas[0].len(), 4);
        assert_eq!(report.changed_cells, recorder.deltas.iter().map(Vec::len).sum::<usize>());
    }

    /// Takes longer to paint a delta than one tick lasts
    struct SlowRenderer {
        delay: Duration,
    }

    impl Renderer for SlowRenderer {
        fn paint_grid(&mut self, _grid: &Grid, _palette: &Palette) -> CaResult<()> {
            Ok(())
        }

        fn paint_cells(&mut self, _changes: &[CellChange], _palette: &Palette) -> CaResult<()> {
            thread::sleep(self.delay);
            Ok(())
        }
    }

    #[test]
    fn test_overrun_ticks_are_skipped() {
        let driver = Driver::new(Duration::from_millis(5), Some(3), RunGate::default());
        let mut engine = blinker_engine();
        let mut renderer = SlowRenderer {
            delay: Duration::from_millis(25),
        };

        let report = driver.run(&mut engine, &mut renderer, &Palette::life()).unwrap();

        assert_eq!(report.ticks, 3);
        assert_eq!(report.steps, report.ticks);
        assert!(report.skipped_ticks > 0);
        assert_eq!(engine.generation(), 3);
    }

    #[test]
    fn test_stopped_gate_skips_steps() {
        let driver = Driver::new(Duration::from_millis(1), Some(4), RunGate::new(false));
        let mut engine = blinker_engine();
        let mut recorder = Recorder::default();

        let report = driver.run(&mut engine, &mut recorder, &Palette::life()).unwrap();

        assert_eq!(report.ticks, 4);
        assert_eq!(report.steps, 0);
        assert_eq!(engine.generation(), 0);
        assert!(recorder.deltas.is_empty());
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let driver = Driver::new(Duration::from_millis(2), None, RunGate::default());
        let gate = driver.gate();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            gate.cancel();
        });

        let mut engine = blinker_engine();
        let mut surface = PixelSurface::new(10, 10, 2).unwrap();
        let report = driver.run(&mut engine, &mut surface, &Palette::life()).unwrap();
        canceller.join().unwrap();

        assert!(report.ticks >= 1);
        assert_eq!(engine.generation(), report.steps);
    }

    #[test]
    fn test_single_tick() {
        let driver = Driver::new(Duration::from_millis(10), None, RunGate::new(true));
        let mut engine = blinker_engine();
        let mut recorder = Recorder::default();

        assert_eq!(driver.tick(&mut engine, &mut recorder, &Palette::life()).unwrap(), Some(4));
        driver.gate().stop();
        assert_eq!(driver.tick(&mut engine, &mut recorder, &Palette::life()).unwrap(), None);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = DriverConfig {
            tick_interval_ms: 25,
            max_ticks: Some(10),
            start_running: false,
        };
        let driver = Driver::from_config(&config);
        assert_eq!(driver.interval(), Duration::from_millis(25));
        assert!(!driver.gate().is_running());
    }
}
