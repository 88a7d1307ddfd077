use crate::prelude::SimulationError;

/// Simple scoped buffer pool that prevents unbounded allocations.
pub struct BufferPool {
    buffers: Vec<Vec<f32>>,
    outstanding: usize,
    max_capacity: usize,
}

impl BufferPool {
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            buffers: Vec::with_capacity(max_capacity),
            outstanding: 0,
            max_capacity,
        }
    }

    /// Hands out a zero-filled buffer, reusing a released one when possible.
    pub fn checkout(&mut self, length: usize) -> Result<Vec<f32>, SimulationError> {
        let mut buffer = if let Some(buffer) = self.buffers.pop() {
            buffer
        } else if self.outstanding < self.max_capacity {
            Vec::new()
        } else {
            return Err(SimulationError::Memory(format!(
                "buffer pool depleted ({} buffers in use)",
                self.outstanding
            )));
        };
        buffer.clear();
        buffer
            .try_reserve_exact(length)
            .map_err(|err| SimulationError::Memory(format!("allocating {length} samples: {err}")))?;
        buffer.resize(length, 0.0);
        self.outstanding += 1;
        Ok(buffer)
    }

    /// Returns a buffer back to the pool for reuse.
    pub fn release(&mut self, mut buffer: Vec<f32>) {
        buffer.clear();
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.buffers.len() < self.max_capacity {
            self.buffers.push(buffer);
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn reset(&mut self) {
        self.buffers.clear();
        self.outstanding = 0;
    }
}
