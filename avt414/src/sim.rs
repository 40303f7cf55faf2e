//! Board-side simulator
//!
//! Interprets the byte stream the way the board firmware does, keeping its
//! own command context, and answers reads and conversions. Used to check
//! that every abbreviated command means to the board exactly what the
//! host intended.

use std::collections::VecDeque;

use avt414_hal::{UartRx, UartTx};
use avt414_protocol::command::{CMD_ADC, CMD_READ, CMD_SETUP, CMD_WRITE, MODE_BINARY};
use avt414_protocol::{hex, Channel, Command, IoMask, Port, ESC};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Bytes the board could not make sense of
    Garbage,
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    None,
    Write(Port),
    Read,
    Adc,
}

#[derive(Debug)]
pub struct SimBoard {
    /// Commands as the board understood them
    pub log: Vec<Command>,
    /// Output latches
    pub latches: [u8; 3],
    /// Deliver ADC responses one byte per read
    pub split_adc: bool,
    context: Context,
    pending: Vec<u8>,
    rx: VecDeque<Vec<u8>>,
}

fn latch_index(port: Port) -> usize {
    match port {
        Port::B => 0,
        Port::C => 1,
        Port::D => 2,
    }
}

/// Conversion result the simulated board reports for a line
pub fn sample_for(channel: Channel) -> u16 {
    100 * channel.index() as u16 + 7
}

impl SimBoard {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            latches: [0; 3],
            split_adc: false,
            context: Context::None,
            pending: Vec::new(),
            rx: VecDeque::new(),
        }
    }

    /// Parse one command off the front of `pending`
    ///
    /// `Ok(None)` when more bytes are needed.
    fn parse(&self) -> Result<Option<(Command, usize)>, SimError> {
        let p = &self.pending;
        let port = |b: u8| Port::from_byte(b).map_err(|_| SimError::Garbage);
        let byte = |digits: &[u8]| hex::decode_byte([digits[0], digits[1]]).map_err(|_| SimError::Garbage);
        let channel = |d: u8| {
            hex::decode_nibble(d)
                .ok()
                .and_then(|n| Channel::new(n).ok())
                .ok_or(SimError::Garbage)
        };

        let Some(&first) = p.first() else {
            return Ok(None);
        };
        if first == ESC {
            let Some(&cmd) = p.get(1) else {
                return Ok(None);
            };
            let needed = match cmd {
                CMD_SETUP | CMD_WRITE => 5,
                CMD_READ | CMD_ADC => 4,
                _ => return Err(SimError::Garbage),
            };
            if p.len() < needed {
                return Ok(None);
            }
            let parsed = match cmd {
                CMD_SETUP => Command::Setup {
                    port: port(p[2])?,
                    mask: IoMask::new(byte(&p[3..5])?),
                },
                CMD_WRITE => Command::Write {
                    port: port(p[2])?,
                    value: byte(&p[3..5])?,
                },
                CMD_READ if p[3] == MODE_BINARY => Command::Read { port: port(p[2])? },
                CMD_ADC if p[2] == MODE_BINARY => Command::Adc {
                    channel: channel(p[3])?,
                },
                _ => return Err(SimError::Garbage),
            };
            return Ok(Some((parsed, needed)));
        }

        match self.context {
            Context::None => Err(SimError::Garbage),
            Context::Write(port) => {
                if p.len() < 2 {
                    return Ok(None);
                }
                Ok(Some((Command::Write { port, value: byte(&p[..2])? }, 2)))
            }
            Context::Read => Ok(Some((Command::Read { port: port(first)? }, 1))),
            Context::Adc => Ok(Some((Command::Adc { channel: channel(first)? }, 1))),
        }
    }

    fn execute(&mut self, cmd: Command) {
        self.context = match cmd {
            Command::Setup { .. } => Context::None,
            Command::Write { port, value } => {
                self.latches[latch_index(port)] = value;
                Context::Write(port)
            }
            Command::Read { port } => {
                self.rx.push_back(vec![self.latches[latch_index(port)]]);
                Context::Read
            }
            Command::Adc { channel } => {
                let bytes = sample_for(channel).to_be_bytes();
                if self.split_adc {
                    self.rx.push_back(vec![bytes[0]]);
                    self.rx.push_back(vec![bytes[1]]);
                } else {
                    self.rx.push_back(bytes.to_vec());
                }
                Context::Adc
            }
        };
        self.log.push(cmd);
    }
}

impl UartTx for SimBoard {
    type Error = SimError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SimError> {
        self.pending.extend_from_slice(data);
        while let Some((cmd, used)) = self.parse()? {
            self.pending.drain(..used);
            self.execute(cmd);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

impl UartRx for SimBoard {
    type Error = SimError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, SimError> {
        let mut chunk = self.rx.pop_front().ok_or(SimError::NoData)?;
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.rx.push_front(chunk.split_off(n));
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Avt414;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Setup(Port, u8),
        Write(Port, u8),
        Read(Port),
        Adc(u8),
        Stream(Port, Vec<u8>),
    }

    fn arb_port() -> impl Strategy<Value = Port> {
        prop_oneof![Just(Port::B), Just(Port::C), Just(Port::D)]
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (arb_port(), any::<u8>()).prop_map(|(p, m)| Op::Setup(p, m)),
            (arb_port(), any::<u8>()).prop_map(|(p, v)| Op::Write(p, v)),
            arb_port().prop_map(Op::Read),
            (0u8..8).prop_map(Op::Adc),
            (arb_port(), proptest::collection::vec(any::<u8>(), 0..6))
                .prop_map(|(p, bytes)| Op::Stream(p, bytes)),
        ]
    }

    #[test]
    fn test_sim_understands_reference_session() {
        let mut board = Avt414::new(SimBoard::new());
        board.setup('D', 0).unwrap();
        board.write('D', 0x80).unwrap();
        board.write('D', 0x00).unwrap();
        board.write('B', 0x3C).unwrap();
        assert_eq!(board.read('B').unwrap(), 0x3C);
        assert_eq!(board.read('D').unwrap(), 0x00);
        assert_eq!(board.adc(2).unwrap(), 207);
        assert_eq!(board.adc(2).unwrap(), 207);

        let sim = board.transport().unwrap();
        assert_eq!(sim.log.len(), 8);
        assert!(sim.pending.is_empty());
    }

    proptest! {
        /// Whatever the operation sequence, the board ends up executing
        /// exactly the operations the host issued
        #[test]
        fn prop_board_sees_issued_commands(ops in proptest::collection::vec(arb_op(), 1..30), split in any::<bool>()) {
            let mut sim = SimBoard::new();
            sim.split_adc = split;
            let mut board = Avt414::new(sim);
            let mut expected = Vec::new();
            let mut latches = [0u8; 3];

            for op in &ops {
                match op {
                    Op::Setup(port, mask) => {
                        board.setup(*port, *mask).unwrap();
                        expected.push(Command::Setup { port: *port, mask: IoMask::new(*mask).for_port(*port) });
                    }
                    Op::Write(port, value) => {
                        board.write(*port, *value).unwrap();
                        latches[latch_index(*port)] = *value;
                        expected.push(Command::Write { port: *port, value: *value });
                    }
                    Op::Read(port) => {
                        prop_assert_eq!(board.read(*port).unwrap(), latches[latch_index(*port)]);
                        expected.push(Command::Read { port: *port });
                    }
                    Op::Adc(line) => {
                        let channel = Channel::new(*line).unwrap();
                        prop_assert_eq!(board.adc(channel).unwrap(), sample_for(channel));
                        expected.push(Command::Adc { channel });
                    }
                    Op::Stream(port, bytes) => {
                        prop_assert_eq!(board.stream_write(*port, bytes).unwrap(), bytes.len());
                        for &value in bytes {
                            latches[latch_index(*port)] = value;
                            expected.push(Command::Write { port: *port, value });
                        }
                    }
                }
            }

            let sim = board.transport().unwrap();
            prop_assert_eq!(&sim.log, &expected);
            prop_assert!(sim.pending.is_empty());
        }
    }
}
