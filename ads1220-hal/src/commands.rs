/// SPI commands understood by the ADS1220.
///
/// See section 8.5.3 and table 16 of the datasheet. Every command is a single
/// opcode byte, the register commands carrying the register index in bits 3..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Reset the device to its power-on configuration (`0000 011x`).
    Reset,
    /// Start a conversion, or restart the digital filter (`0000 100x`).
    StartSync,
    /// Enter power-down mode once any ongoing conversion completes (`0000 001x`).
    PowerDown,
    /// Read the latest 24-bit conversion result (`0001 xxxx`).
    ReadData,
    /// Read one configuration register (`0010 rr00`).
    ReadRegister(u8),
    /// Write one configuration register (`0100 rr00`) followed by the data byte.
    WriteRegister {
        /// Register index, `0..=3`.
        register: u8,
        /// New register value.
        value: u8,
    },
}

impl Command {
    /// The opcode byte sent to the ADS1220.
    ///
    /// The register index must already have been checked by the caller; only its
    /// two low bits are used.
    pub(crate) fn opcode(&self) -> u8 {
        match self {
            Command::Reset => 0x06,
            Command::StartSync => 0x08,
            Command::PowerDown => 0x02,
            Command::ReadData => 0x10,
            Command::ReadRegister(register) => 0x20 | (register & 0x03) << 2,
            Command::WriteRegister { register, .. } => 0x40 | (register & 0x03) << 2,
        }
    }

    /// Number of bytes clocked out of the ADS1220 in response.
    pub(crate) fn response_len(&self) -> usize {
        match self {
            Command::ReadData => 3,
            Command::ReadRegister(_) => 1,
            _ => 0,
        }
    }

    /// Bytes written to the bus for a command that has no response.
    pub(crate) fn frame(&self) -> Frame {
        match *self {
            Command::WriteRegister { value, .. } => Frame {
                bytes: [self.opcode(), value],
                len: 2,
            },
            _ => Frame {
                bytes: [self.opcode(), 0],
                len: 1,
            },
        }
    }
}

/// Outgoing bytes for a single write-only SPI transaction.
pub(crate) struct Frame {
    bytes: [u8; 2],
    len: usize,
}

impl Frame {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_opcodes() {
        let reads: Vec<u8> = (0..4).map(|r| Command::ReadRegister(r).opcode()).collect();
        assert_eq!(reads, [0x20, 0x24, 0x28, 0x2C]);
        let writes: Vec<u8> = (0..4)
            .map(|register| Command::WriteRegister { register, value: 0 }.opcode())
            .collect();
        assert_eq!(writes, [0x40, 0x44, 0x48, 0x4C]);
    }

    #[test]
    fn write_register_frame_carries_value() {
        let frame = Command::WriteRegister {
            register: 3,
            value: 0xAA,
        }
        .frame();
        assert_eq!(frame.as_bytes(), [0x4C, 0xAA]);
    }

    #[test]
    fn simple_commands_are_one_byte() {
        assert_eq!(Command::Reset.frame().as_bytes(), [0x06]);
        assert_eq!(Command::StartSync.frame().as_bytes(), [0x08]);
        assert_eq!(Command::PowerDown.frame().as_bytes(), [0x02]);
        assert_eq!(Command::ReadData.response_len(), 3);
        assert_eq!(Command::PowerDown.response_len(), 0);
    }
}
