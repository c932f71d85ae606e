// Purpose - the sample-stream boundary: stereo frames and offline buffers

/// One output frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

/// Planar stereo buffers for offline rendering.
#[derive(Debug, Default, Clone)]
pub struct AudioOutput {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl AudioOutput {
    pub fn with_frames(frames: usize) -> Self {
        Self {
            left: vec![0.0; frames],
            right: vec![0.0; frames],
        }
    }

    pub fn frames(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    pub fn frame(&self, index: usize) -> Option<StereoFrame> {
        Some(StereoFrame {
            left: *self.left.get(index)?,
            right: *self.right.get(index)?,
        })
    }

    /// Samples in L, R, L, R ... order.
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        self.left
            .iter()
            .zip(&self.right)
            .flat_map(|(&l, &r)| [l, r])
    }

    /// Largest absolute sample on either channel.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(&self.right)
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }
}
