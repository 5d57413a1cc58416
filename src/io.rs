//! Byte-level I/O adapters passed into an [`crate::exec::Executor`] run.

use std::io::{Read, Write};
use std::time::{Duration, Instant};

/// Polymorphic byte I/O capability an executor calls for `.` and `,`.
pub trait IoAdapter {
    /// Emit one byte. Returns `false` on write failure; execution continues
    /// regardless (standard Brainfuck tolerance, spec'd write-failure rule).
    fn write(&mut self, byte: u8) -> bool;

    /// Read one byte. Returns `0` on end-of-input.
    fn read(&mut self) -> u8;
}

/// Default adapter: reads from stdin, writes to stdout, one byte at a time.
///
/// Ported from `BrainfuckIODefault`: EOF on read maps to `0`, and a write is
/// considered failed only if the underlying stdout write itself fails.
#[derive(Default)]
pub struct StdIo;

impl StdIo {
    /// Create a new stdin/stdout adapter.
    pub fn new() -> StdIo {
        StdIo
    }
}

impl IoAdapter for StdIo {
    fn write(&mut self, byte: u8) -> bool {
        std::io::stdout().write_all(&[byte]).is_ok()
    }

    fn read(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        match std::io::stdin().read(&mut buf) {
            Ok(1) => buf[0],
            _ => 0,
        }
    }
}

/// Recognizer state for the `ESC '[' ('H'|'f')` cursor-home sequence.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    SawEsc,
    SawBracket,
}

/// Wraps any [`IoAdapter`] and throttles output to a target frame rate.
///
/// Every byte passed to `write` still reaches the inner adapter unchanged;
/// only the *timing* of cursor-home bytes is affected. Ported from
/// `BrainfuckIOGame`, with the original's `clock()`/`usleep` pair replaced by
/// `std::time::Instant`/`std::thread::sleep` and its `fprintf(stderr, ...)`
/// frame log replaced by `log::debug!`.
pub struct FramePacer<W> {
    inner: W,
    state: ScanState,
    frame_limit: Duration,
    log: bool,
    frame_count: u64,
    lag: Duration,
    last_frame: Instant,
}

impl<W: IoAdapter> FramePacer<W> {
    /// Wrap `inner`, pacing cursor-home frames to `fps` frames per second.
    pub fn new(inner: W, fps: u32, log: bool) -> FramePacer<W> {
        FramePacer {
            inner,
            state: ScanState::Idle,
            frame_limit: Duration::from_micros(1_000_000 / u64::from(fps.max(1))),
            log,
            frame_count: 0,
            lag: Duration::ZERO,
            last_frame: Instant::now(),
        }
    }

    fn advance_scan(&mut self, byte: u8) -> bool {
        self.state = match (self.state, byte) {
            (_, 0x1b) => ScanState::SawEsc,
            (ScanState::SawEsc, b'[') => ScanState::SawBracket,
            (ScanState::SawBracket, b'H' | b'f') => {
                self.state = ScanState::Idle;
                return true;
            }
            _ => ScanState::Idle,
        };
        false
    }

    fn on_cursor_home(&mut self) {
        self.frame_count += 1;

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        if delta < self.frame_limit {
            std::thread::sleep(self.frame_limit - delta);
        } else {
            self.lag += delta - self.frame_limit;
        }
        self.last_frame = Instant::now();

        if self.log {
            log::debug!(
                "Frame {} Delta {} Limit {} Lag {}",
                self.frame_count,
                delta.as_micros(),
                self.frame_limit.as_micros(),
                self.lag.as_micros(),
            );
        }
    }
}

impl<W: IoAdapter> IoAdapter for FramePacer<W> {
    fn write(&mut self, byte: u8) -> bool {
        if self.advance_scan(byte) {
            self.on_cursor_home();
        }
        self.inner.write(byte)
    }

    fn read(&mut self) -> u8 {
        self.inner.read()
    }
}
