use crate::domain::AppError;
use crate::ports::LogSink;

#[derive(Default)]
pub struct MemoryLogSink {
    pub bytes: Vec<u8>,
}

impl MemoryLogSink {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl LogSink for MemoryLogSink {
    fn append(&mut self, bytes: &[u8]) -> Result<(), AppError> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

/// Sink that rejects every write after the first `accept` calls.
pub struct FailingLogSink {
    pub accept: usize,
}

impl FailingLogSink {
    pub fn new(accept: usize) -> Self {
        Self { accept }
    }
}

impl LogSink for FailingLogSink {
    fn append(&mut self, _bytes: &[u8]) -> Result<(), AppError> {
        if self.accept == 0 {
            return Err(std::io::Error::other("disk full").into());
        }
        self.accept -= 1;
        Ok(())
    }
}
