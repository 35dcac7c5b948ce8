//! Process CPU time accounting.
//!
//! One `CpuTimer` belongs to one algorithm. Every trial advances it by
//! exactly one start/stop pair; nesting or stopping an idle timer is a
//! contract violation reported as [`TimerError`].

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer started while already running")]
    AlreadyRunning,
    #[error("Timer stopped without a matching start")]
    NotRunning,
    #[error("Failed to read process CPU clock (errno {0})")]
    ClockRead(i32),
}

pub type TimerResult<T> = Result<T, TimerError>;

#[derive(Debug, Default)]
pub struct CpuTimer {
    started_at: Option<Duration>,
    total: Duration,
    laps: u64,
}

impl CpuTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) -> TimerResult<()> {
        if self.started_at.is_some() {
            return Err(TimerError::AlreadyRunning);
        }
        self.started_at = Some(process_cpu_time()?);
        Ok(())
    }

    /// Stops the timer and returns the length of the finished lap.
    pub fn stop(&mut self) -> TimerResult<Duration> {
        let started_at = self.started_at.ok_or(TimerError::NotRunning)?;
        let now = process_cpu_time()?;
        self.started_at = None;

        let lap = now.saturating_sub(started_at);
        self.total += lap;
        self.laps += 1;
        Ok(lap)
    }

    /// Runs `f` between one start/stop pair.
    pub fn time<R>(&mut self, f: impl FnOnce() -> R) -> TimerResult<R> {
        self.start()?;
        let result = f();
        self.stop()?;
        Ok(result)
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn laps(&self) -> u64 {
        self.laps
    }
}

#[cfg(unix)]
pub fn process_cpu_time() -> TimerResult<Duration> {
    // SAFETY: a zeroed timespec is a valid value and clock_gettime only
    // writes through the pointer it is given.
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
    if rc != 0 {
        let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(rc);
        return Err(TimerError::ClockRead(errno));
    }
    Ok(Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32))
}

/// Monotonic wall time since the first call; used where no process CPU
/// clock is available.
#[cfg(not(unix))]
pub fn process_cpu_time() -> TimerResult<Duration> {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    Ok(ORIGIN.get_or_init(Instant::now).elapsed())
}
