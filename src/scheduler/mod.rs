//! Periodic test scheduling loop
//!
//! Drives one run through its {Idle, Running, Stopping, Done} lifecycle.
//! Ticks are spaced by the configured interval measured from the start of the
//! previous tick (fixed-period schedule); a test that overruns the interval
//! delays subsequent ticks rather than bursting them. A failed or timed-out
//! tick is recorded and the loop proceeds to the next scheduled tick;
//! there is no mid-tick retry.

use crate::{
    error::Result,
    logging::Logger,
    models::RunConfig,
    output::Console,
    report::Aggregator,
    runner::SpeedTest,
    stats::RunStats,
};
use tokio::time::{Instant, MissedTickBehavior};

/// Scheduler lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Configuration fixed, loop not yet started
    Idle,
    /// Ticks are being scheduled and executed
    Running,
    /// Interrupt or duration cutoff observed; final flush in progress
    Stopping,
    /// Final flush complete
    Done,
}

/// Periodic scheduler owning the run lifecycle
pub struct Scheduler<R: SpeedTest> {
    config: RunConfig,
    runner: R,
    state: LoopState,
    interrupted: bool,
}

impl<R: SpeedTest> Scheduler<R> {
    /// Create a scheduler in the Idle state
    pub fn new(config: RunConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            state: LoopState::Idle,
            interrupted: false,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether the run ended on an external interrupt
    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Run to completion: ticks until the duration elapses or an interrupt
    /// arrives, then flushes the log and report once more so the on-disk
    /// state reflects every completed tick.
    pub async fn run(
        &mut self,
        aggregator: &mut Aggregator,
        console: &Console,
        logger: &Logger,
    ) -> Result<RunStats> {
        self.state = LoopState::Running;
        let started = Instant::now();
        let limit = self.config.duration.limit();

        let mut ticker = tokio::time::interval(self.config.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tick: u64 = 0;

        while self.state == LoopState::Running {
            // Wait for the next tick boundary, watching for Ctrl+C between ticks
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    logger.info("Interrupt received between ticks, stopping");
                    self.interrupted = true;
                    self.state = LoopState::Stopping;
                    break;
                }
            }

            // Duration cutoff is checked at the tick boundary, on the same
            // clock that paces the ticker
            if let Some(limit) = limit {
                if started.elapsed() >= limit {
                    logger.debug("Run duration elapsed");
                    self.state = LoopState::Stopping;
                    break;
                }
            }

            tick += 1;
            logger.debug(&format!("Tick {} starting", tick));

            // The in-flight subprocess is raced against Ctrl+C; kill-on-drop
            // in the runner terminates the child when the interrupt wins.
            let record = tokio::select! {
                record = self.runner.run_test() => record,
                _ = tokio::signal::ctrl_c() => {
                    logger.info("Interrupt received mid-test, stopping");
                    self.interrupted = true;
                    self.state = LoopState::Stopping;
                    break;
                }
            };

            console.tick_result(tick, &record);
            let tick_succeeded = record.is_successful();

            if let Err(e) = aggregator.record(record) {
                // Persistence failures never stop the run; the in-memory
                // record survives and the next append retries the file.
                console.warning(&e.to_string());
                logger.warn(&format!("{} failure on tick {}: log append failed", e.category(), tick));
            }

            let stats = aggregator.stats();
            let remaining = limit.map(|l| l.saturating_sub(started.elapsed()));
            console.progress(started.elapsed(), remaining, &stats);

            // Render every N ticks, and immediately after any non-success so
            // the report never hides a fresh failure for long.
            if tick % u64::from(self.config.report_every) == 0 || !tick_succeeded {
                logger.debug(&format!("Rendering report at tick {}", tick));
                if let Err(e) = aggregator.render_report() {
                    console.warning(&e.to_string());
                }
            }
        }

        self.state = LoopState::Stopping;

        // Final flush: the on-disk report must reflect all completed ticks
        // even when no mid-run render aligned with the last one.
        if let Err(e) = aggregator.render_report() {
            console.warning(&e.to_string());
            logger.warn("Final report render failed");
        }

        self.state = LoopState::Done;
        logger.debug(&format!("Run done after {} tick(s)", tick));

        Ok(aggregator.stats())
    }
}
