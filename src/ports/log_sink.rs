use crate::domain::AppError;

/// Single-writer, append-only destination for job output.
pub trait LogSink {
    /// Append raw bytes exactly as received.
    fn append(&mut self, bytes: &[u8]) -> Result<(), AppError>;

    /// Append a timestamped status line.
    fn append_line(&mut self, message: &str) -> Result<(), AppError> {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        self.append(format!("[{stamp}] {message}\n").as_bytes())
    }
}
