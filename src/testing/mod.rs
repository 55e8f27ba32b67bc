pub mod ports;

#[allow(unused_imports)]
pub use ports::FailingLogSink;
#[allow(unused_imports)]
pub use ports::FakeJobInvoker;
#[allow(unused_imports)]
pub use ports::FakeScheduler;
#[allow(unused_imports)]
pub use ports::MemoryLogSink;
