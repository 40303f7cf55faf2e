//! Scripted transport for unit tests

use std::collections::VecDeque;

use avt414_hal::{UartRx, UartTx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    WriteFailed,
    FlushFailed,
    /// Nothing left in the response script
    NoData,
}

/// Records every write and replays scripted responses
///
/// Each scripted response is delivered by at most one read call, so a
/// response queued as two chunks arrives split across two reads.
#[derive(Debug, Default)]
pub struct MockUart {
    /// Successful writes, one entry per `write_blocking` call
    pub writes: Vec<Vec<u8>>,
    /// Number of `read_blocking` calls
    pub reads: usize,
    pub flushes: usize,
    /// Fail every write
    pub fail_writes: bool,
    /// Fail every write once this many have succeeded
    pub fail_after: Option<usize>,
    pub fail_flush: bool,
    rx: VecDeque<Vec<u8>>,
}

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response chunk
    pub fn respond(&mut self, bytes: &[u8]) {
        self.rx.push_back(bytes.to_vec());
    }

    pub fn rx_is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl UartTx for MockUart {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), MockError> {
        let limit_hit = self.fail_after.is_some_and(|n| self.writes.len() >= n);
        if self.fail_writes || limit_hit {
            return Err(MockError::WriteFailed);
        }
        self.writes.push(data.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        if self.fail_flush {
            return Err(MockError::FlushFailed);
        }
        self.flushes += 1;
        Ok(())
    }
}

impl UartRx for MockUart {
    type Error = MockError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, MockError> {
        self.reads += 1;
        let mut chunk = self.rx.pop_front().ok_or(MockError::NoData)?;
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.rx.push_front(chunk.split_off(n));
        }
        Ok(n)
    }
}
