use std::time::Duration;

pub const FRAME_CADENCE: Duration = Duration::from_millis(16);

/// Steps an index through a finished trajectory, one sample per cadence tick.
///
/// The clock only knows the trajectory's length. Time is fed in by the caller
/// through [`PlaybackClock::advance`], so the clock never sleeps or spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackClock {
    cadence: Duration,
    len: usize,
    index: usize,
    playing: bool,
    carry: Duration,
}

impl PlaybackClock {
    /// A clock that starts playing immediately.
    pub fn new(len: usize) -> Self {
        Self::with_cadence(len, FRAME_CADENCE)
    }

    pub fn with_cadence(len: usize, cadence: Duration) -> Self {
        Self {
            cadence: cadence.max(Duration::from_nanos(1)),
            len,
            index: 0,
            playing: true,
            carry: Duration::ZERO,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// True once the index rests on the last sample.
    pub fn is_finished(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// Restarts playback from the first sample.
    pub fn play(&mut self) {
        self.playing = true;
        self.rewind();
    }

    /// Stops playback and rewinds.
    pub fn reset(&mut self) {
        self.playing = false;
        self.rewind();
    }

    /// Points the clock at a newly computed trajectory. Playback restarts from
    /// the first sample; the playing flag is kept.
    pub fn replace(&mut self, len: usize) {
        self.len = len;
        self.rewind();
    }

    /// Feeds elapsed wall time and returns the index to display.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if !self.playing || self.is_finished() {
            return self.index;
        }

        self.carry += elapsed;
        while self.carry >= self.cadence && !self.is_finished() {
            self.carry -= self.cadence;
            self.index += 1;
        }
        if self.is_finished() {
            self.carry = Duration::ZERO;
        }
        self.index
    }

    fn rewind(&mut self) {
        self.index = 0;
        self.carry = Duration::ZERO;
    }
}
