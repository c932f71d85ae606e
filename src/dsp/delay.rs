use crate::error::ConfigError;

/*
Feedback Delay Line
===================

A fixed-size circular buffer with one write head and one read head that
move together. The read head trails the write head by `delay` slots:

    read_pos = (write_pos - delay) mod size

Per sample:

    y   = buffer[read_pos]                 the delayed tap
    out = x·(1 - feedback) + feedback·y
    buffer[write_pos] = out
    write_pos, read_pos advance by one, mod size

Because `out` (not `x`) is written back, this is a recursive (IIR) comb:
every echo is fed back in at `feedback`. The input is scaled by
(1 - feedback), so the DC gain is exactly 1 and a bounded input stays
bounded for any feedback in [0, 1).

Note that `out` is the mix of dry input and echo. With feedback = 0 the
line passes its input straight through; the delay is only audible through
the feedback path. `read()` exposes the raw delayed tap.

A delay of 0 makes the read head sit on the write head, which reads the
slot that was written `size` samples ago.
*/

pub struct FeedbackDelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
    read_pos: usize,
    delay_samples: usize,
    feedback: f32,
}

impl FeedbackDelayLine {
    pub const DEFAULT_FEEDBACK: f32 = 0.5;

    /// Allocate a zeroed buffer of `size` samples. This is the only
    /// allocation the line ever makes.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::EmptyDelayBuffer);
        }
        Ok(Self {
            buffer: vec![0.0; size],
            write_pos: 0,
            read_pos: 0,
            delay_samples: 0,
            feedback: Self::DEFAULT_FEEDBACK,
        })
    }

    pub fn set_delay_time_in_samples(&mut self, delay_samples: usize) -> Result<(), ConfigError> {
        let size = self.buffer.len();
        if delay_samples >= size {
            return Err(ConfigError::DelayOutOfRange {
                delay: delay_samples,
                size,
            });
        }
        self.delay_samples = delay_samples;
        self.read_pos = (self.write_pos + size - delay_samples) % size;
        Ok(())
    }

    /// Validates the incoming value; the stored feedback is left untouched
    /// on error.
    pub fn set_feedback(&mut self, feedback: f32) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&feedback) {
            return Err(ConfigError::InvalidFeedback(feedback));
        }
        self.feedback = feedback;
        Ok(())
    }

    /// The delayed sample the next [`process`](Self::process) call will mix in.
    #[inline]
    pub fn read(&self) -> f32 {
        self.buffer[self.read_pos]
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let delayed = self.buffer[self.read_pos];
        let out = sample * (1.0 - self.feedback) + self.feedback * delayed;

        self.buffer[self.write_pos] = out;

        let size = self.buffer.len();
        self.write_pos = (self.write_pos + 1) % size;
        self.read_pos = (self.read_pos + 1) % size;

        out
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear the buffer without moving the heads.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
    }

    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn delay_time_in_samples(&self) -> usize {
        self.delay_samples
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(size: usize, delay: usize, feedback: f32) -> FeedbackDelayLine {
        let mut line = FeedbackDelayLine::new(size).unwrap();
        line.set_delay_time_in_samples(delay).unwrap();
        line.set_feedback(feedback).unwrap();
        line
    }

    #[test]
    fn delayed_tap_is_a_pure_delay() {
        let mut line = line(4, 2, 0.0);
        let taps: Vec<f32> = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]
            .iter()
            .map(|&x| {
                let tap = line.read();
                line.process(x);
                tap
            })
            .collect();
        assert_eq!(taps, vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_feedback_passes_input_through() {
        let mut line = line(4, 2, 0.0);
        let mut buffer = [1.0, 0.0, 0.25, 0.0, -1.0, 0.0];
        let expected = buffer;
        line.render(&mut buffer);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn impulse_echoes_every_delay_period() {
        let mut line = line(4, 2, 0.5);
        let mut buffer = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        line.render(&mut buffer);
        assert_eq!(buffer, [0.5, 0.0, 0.25, 0.0, 0.125, 0.0]);
    }

    #[test]
    fn step_response_converges_without_overshoot() {
        let mut line = line(4, 2, 0.5);
        let mut last = 0.0;
        for i in 0..64 {
            let y = line.process(1.0);
            assert!(y <= 1.0, "sample {i} overshot: {y}");
            assert!(y >= last - 1e-6, "sample {i} went backwards: {y} < {last}");
            last = y;
        }
        assert!((last - 1.0).abs() < 1e-4, "did not converge: {last}");
    }

    #[test]
    fn read_head_wraps_backwards() {
        let mut line = line(8, 0, 0.0);
        for _ in 0..3 {
            line.process(0.0);
        }
        // write_pos = 3, asking for 5 samples back must land on slot 6.
        line.set_delay_time_in_samples(5).unwrap();
        assert_eq!(line.read_pos, 6);
        assert_eq!(line.delay_time_in_samples(), 5);
    }

    #[test]
    fn validates_incoming_feedback() {
        let mut line = FeedbackDelayLine::new(16).unwrap();
        assert_eq!(line.feedback(), FeedbackDelayLine::DEFAULT_FEEDBACK);
        assert_eq!(line.set_feedback(1.0), Err(ConfigError::InvalidFeedback(1.0)));
        assert!(line.set_feedback(-0.1).is_err());
        assert!(line.set_feedback(f32::NAN).is_err());
        assert_eq!(line.feedback(), FeedbackDelayLine::DEFAULT_FEEDBACK);

        line.set_feedback(0.99).unwrap();
        // A valid value must still be accepted even though the stored one is high.
        line.set_feedback(0.4).unwrap();
        assert_eq!(line.feedback(), 0.4);
    }

    #[test]
    fn rejects_bad_sizes_and_delays() {
        assert!(matches!(
            FeedbackDelayLine::new(0),
            Err(ConfigError::EmptyDelayBuffer)
        ));
        let mut line = FeedbackDelayLine::new(4).unwrap();
        assert_eq!(
            line.set_delay_time_in_samples(4),
            Err(ConfigError::DelayOutOfRange { delay: 4, size: 4 })
        );
        assert!(line.set_delay_time_in_samples(3).is_ok());
    }

    #[test]
    fn reset_clears_echoes() {
        let mut line = line(4, 2, 0.5);
        line.process(1.0);
        line.reset();
        let mut buffer = [0.0; 8];
        line.render(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
