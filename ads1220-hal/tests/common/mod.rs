//! Simulated ADS1220 for exercising the driver without hardware.
#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

/// State shared between the simulated device and the test holding a handle to it.
#[derive(Debug, Default)]
struct State {
    /// Configuration register contents.
    registers: [u8; 4],
    /// Register contents loaded by RESET.
    reset_values: [u8; 4],
    /// Bits forced on readback, per register, as `(mask, value)`.
    stuck_bits: [(u8, u8); 4],
    /// Bytes returned by RDATA.
    conversion_data: [u8; 3],
    /// Bytes written in each transaction, in order.
    exchanges: Vec<Vec<u8>>,
    /// Number of START/SYNC commands received.
    starts: usize,
    /// True after POWERDOWN until the next START/SYNC.
    powered_down: bool,
}

impl State {
    fn read_back(&self, register: usize) -> u8 {
        let (mask, value) = self.stuck_bits[register];
        (self.registers[register] & !mask) | (value & mask)
    }

    /// Bytes clocked out for the command that started with `sent`.
    fn respond(&self, sent: &[u8]) -> Vec<u8> {
        let opcode = sent[0];
        match opcode & 0xF0 {
            0x10 => self.conversion_data.to_vec(),
            0x20 => {
                let first = usize::from((opcode >> 2) & 0x03);
                let count = usize::from(opcode & 0x03) + 1;
                (first..first + count)
                    .map(|r| self.read_back(r % 4))
                    .collect()
            }
            _ => panic!("read after unexpected opcode {opcode:#04x}"),
        }
    }

    /// Act on a complete write-only command.
    fn execute(&mut self, sent: &[u8]) {
        let opcode = sent[0];
        match opcode {
            0x06 | 0x07 => self.registers = self.reset_values,
            0x08 | 0x09 => {
                self.starts += 1;
                self.powered_down = false;
            }
            0x02 | 0x03 => self.powered_down = true,
            op if op & 0xF0 == 0x40 => {
                let first = usize::from((op >> 2) & 0x03);
                let count = usize::from(op & 0x03) + 1;
                assert_eq!(sent.len(), count + 1, "WREG length mismatch");
                for (offset, &value) in sent[1..].iter().enumerate() {
                    self.registers[(first + offset) % 4] = value;
                }
            }
            op => panic!("unexpected write-only opcode {op:#04x}"),
        }
    }
}

/// An ADS1220 answering the SPI commands the driver uses.
///
/// Clones share the same device state, so a test can keep one handle while the
/// driver owns another.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAds1220(Rc<RefCell<State>>);

impl SimulatedAds1220 {
    /// A device that comes out of reset with all registers cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// A device whose registers hold `values` after every reset.
    pub fn with_reset_values(values: [u8; 4]) -> Self {
        let device = Self::new();
        device.0.borrow_mut().reset_values = values;
        device
    }

    /// Force the bits in `mask` to read back as the matching bits of `value`.
    pub fn stick_bits(&self, register: usize, mask: u8, value: u8) {
        self.0.borrow_mut().stuck_bits[register] = (mask, value);
    }

    /// Set the bytes returned by the next RDATA commands.
    pub fn set_conversion_data(&self, data: [u8; 3]) {
        self.0.borrow_mut().conversion_data = data;
    }

    /// Overwrite register contents directly, as if another host had written them.
    pub fn poke(&self, register: usize, value: u8) {
        self.0.borrow_mut().registers[register] = value;
    }

    /// Current register contents.
    pub fn registers(&self) -> [u8; 4] {
        self.0.borrow().registers
    }

    /// Bytes written in each transaction so far.
    pub fn exchanges(&self) -> Vec<Vec<u8>> {
        self.0.borrow().exchanges.clone()
    }

    /// Number of transactions so far.
    pub fn exchange_count(&self) -> usize {
        self.0.borrow().exchanges.len()
    }

    /// Forget the transactions recorded so far.
    pub fn clear_exchanges(&self) {
        self.0.borrow_mut().exchanges.clear();
    }

    /// Number of START/SYNC commands received.
    pub fn starts(&self) -> usize {
        self.0.borrow().starts
    }

    /// True if in power-down mode.
    pub fn powered_down(&self) -> bool {
        self.0.borrow().powered_down
    }
}

impl ErrorType for SimulatedAds1220 {
    type Error = Infallible;
}

impl SpiDevice for SimulatedAds1220 {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        let mut sent = Vec::new();
        let mut read = false;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(words) => sent.extend_from_slice(words),
                Operation::Read(words) => {
                    let response = state.respond(&sent);
                    words.copy_from_slice(&response[..words.len()]);
                    read = true;
                }
                _ => panic!("Not an expected operation"),
            }
        }
        if !read {
            state.execute(&sent);
        }
        state.exchanges.push(sent);
        Ok(())
    }
}
