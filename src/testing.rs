use crate::bus::{Bus, MAX_REG_BYTES};
use crate::register::{Readable, Reg, Writable};
use embedded_hal::delay::DelayNs;
use heapless::{LinearMap, Vec};

const QUEUE_DEPTH: usize = 20;
const LOG_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Write { addr: u8, value: u8 },
    Read { addr: u8, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError;

#[derive(Debug, Clone, Copy)]
struct RegisterValue {
    bytes: [u8; MAX_REG_BYTES],
    len: usize,
}

/// Bus double with per-register response queues.
///
/// Each read pops the front of its register's queue; the last queued value keeps being
/// returned once the queue is down to one entry. Every transfer is logged, including
/// failed ones.
pub struct FakeBus<const N: usize> {
    regs: LinearMap<u8, Vec<RegisterValue, QUEUE_DEPTH>, N>,
    failing_reads: Vec<u8, N>,
    failing_writes: Vec<u8, N>,
    log: Vec<Transaction, LOG_DEPTH>,
}

#[derive(Default)]
pub struct FakeDelay {
    pub calls: u32,
    pub total_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += ns as u64;
    }
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            regs: LinearMap::new(),
            failing_reads: Vec::new(),
            failing_writes: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Queues one response for reads of `R`.
    pub fn with_response<R: Readable>(&mut self, data: &[u8]) {
        assert_eq!(R::N, data.len(), "response length does not match register 0x{:x}", R::ADDR);

        let mut value = RegisterValue { bytes: [0u8; MAX_REG_BYTES], len: data.len() };
        value.bytes[..data.len()].copy_from_slice(data);

        if !self.regs.contains_key(&R::ADDR) {
            self.regs.insert(R::ADDR, Vec::new()).unwrap();
        }
        self.regs.get_mut(&R::ADDR).unwrap().push(value).unwrap();
    }

    pub fn fail_reads_of<R: Reg>(&mut self) {
        self.failing_reads.push(R::ADDR).unwrap();
    }

    pub fn fail_writes_to<W: Writable>(&mut self) {
        self.failing_writes.push(W::ADDR).unwrap();
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.log
    }

    pub fn reads_of<R: Reg>(&self) -> usize {
        self.log
            .iter()
            .filter(|t| matches!(t, Transaction::Read { addr, .. } if *addr == R::ADDR))
            .count()
    }

    /// Values written to `W`, oldest first.
    pub fn writes_to<W: Writable>(&self) -> Vec<u8, LOG_DEPTH> {
        self.log
            .iter()
            .filter_map(|t| match t {
                Transaction::Write { addr, value } if *addr == W::ADDR => Some(*value),
                _ => None,
            })
            .collect()
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = FakeBusError;

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        self.log.push(Transaction::Write { addr, value }).unwrap();

        if self.failing_writes.contains(&addr) {
            return Err(FakeBusError);
        }
        Ok(())
    }

    fn read_registers(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.log.push(Transaction::Read { addr, len: data.len() }).unwrap();

        if self.failing_reads.contains(&addr) {
            return Err(FakeBusError);
        }

        let queue = match self.regs.get_mut(&addr) {
            Some(queue) if !queue.is_empty() => queue,
            _ => panic!("No mocked value for register 0x{:x} and length {}", addr, data.len()),
        };
        let value = if queue.len() > 1 { queue.remove(0) } else { queue[0] };

        assert_eq!(value.len, data.len(), "read length mismatch for register 0x{:x}", addr);
        data.copy_from_slice(&value.bytes[..value.len]);

        Ok(())
    }
}
