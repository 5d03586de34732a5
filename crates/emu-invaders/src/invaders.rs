//! Top-level Space Invaders machine.
//!
//! The 8080 runs at 2 MHz and the monitor refreshes at 60 Hz, giving
//! 33,333 CPU cycles per frame. The video hardware raises two interrupts
//! per frame: RST 1 when the beam reaches mid-screen and RST 2 at the
//! start of vertical blank. The firmware redraws the half of the screen
//! the beam is not currently scanning from each handler.

use emu_core::{Cpu, MasterClock, Observable, Step, Ticks, Value, parse_address};
use intel_8080::{I8080, OPCODES};
use tracing::{debug, warn};

use crate::bus::InvadersBus;
use crate::config::{CPU_HZ, FRAMES_PER_SECOND, InvadersConfig, RomSource, UnimplementedPolicy};
use crate::error::{InvadersError, Result};
use crate::input::{Button, DipSwitches};
use crate::rom::{self, RomSet};
use crate::video::{self, VRAM_LEN, VRAM_START};

/// Restart vector raised when the beam reaches mid-screen.
pub const MID_SCREEN_VECTOR: u8 = 1;

/// Restart vector raised at the start of vertical blank.
pub const VBLANK_VECTOR: u8 = 2;

/// Space Invaders machine.
pub struct Invaders {
    cpu: I8080,
    bus: InvadersBus,
    policy: UnimplementedPolicy,
    /// CPU cycles per frame.
    cycles_per_frame: Ticks,
    /// CPU cycles run by the frame driver.
    cycles: Ticks,
    /// Cycle count at which the current frame started.
    frame_start: Ticks,
    /// Completed frame counter.
    frame_count: u64,
}

impl Invaders {
    /// Create a machine and load its ROMs.
    ///
    /// # Errors
    ///
    /// Returns an error if a ROM image cannot be read or does not fit.
    pub fn new(config: &InvadersConfig) -> Result<Self> {
        let roms = match &config.roms {
            RomSource::Directory(dir) => rom::load_rom_set(dir)?,
            RomSource::Combined(path) => rom::load_combined(path)?,
            RomSource::Bytes(bytes) => RomSet::combined("<memory>", bytes.clone())?,
        };

        let mut machine = Self::blank(config.dip, config.policy);
        for (offset, bytes) in &roms.images {
            machine.load(*offset, bytes);
        }
        Ok(machine)
    }

    /// A machine with zeroed memory and no ROMs.
    #[must_use]
    pub fn blank(dip: DipSwitches, policy: UnimplementedPolicy) -> Self {
        let clock = MasterClock::new(CPU_HZ);
        Self {
            cpu: I8080::new(),
            bus: InvadersBus::new(dip),
            policy,
            cycles_per_frame: clock.ticks_per_frame(FRAMES_PER_SECOND),
            cycles: Ticks::ZERO,
            frame_start: Ticks::ZERO,
            frame_count: 0,
        }
    }

    /// Copy bytes verbatim into memory at `offset`.
    pub fn load(&mut self, offset: u16, bytes: &[u8]) {
        self.bus.load(offset, bytes);
    }

    /// Execute one instruction, applying the unimplemented-opcode policy.
    ///
    /// Returns the cycles consumed.
    ///
    /// # Errors
    ///
    /// Returns [`InvadersError::Halted`] if the CPU halts, or
    /// [`InvadersError::UnimplementedOpcode`] under the fatal policy.
    pub fn step(&mut self) -> Result<u32> {
        let cycles = match self.cpu.step(&mut self.bus) {
            Step::Continue { cycles } => cycles,
            Step::Halted => {
                return Err(InvadersError::Halted {
                    address: self.cpu.pc().wrapping_sub(1),
                });
            }
            Step::Unimplemented { opcode, address } => match self.policy {
                UnimplementedPolicy::Fatal => {
                    return Err(InvadersError::UnimplementedOpcode { opcode, address });
                }
                UnimplementedPolicy::Skip => {
                    warn!(
                        opcode = format_args!("{opcode:#04X}"),
                        address = format_args!("{address:#06X}"),
                        "skipping unimplemented opcode"
                    );
                    self.cpu.set_pc(address.wrapping_add(1));
                    u32::from(OPCODES[usize::from(opcode)].cycles)
                }
            },
        };
        self.cycles += Ticks::from(cycles);
        Ok(cycles)
    }

    /// Run one frame: half a frame of instructions, the mid-screen
    /// interrupt, the second half, then the vblank interrupt.
    ///
    /// Returns the number of CPU cycles executed. Overshoot past a frame
    /// boundary is carried into the next frame.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Invaders::step`].
    pub fn run_frame(&mut self) -> Result<u64> {
        let start = self.cycles;
        let mid = self.frame_start + Ticks::new(self.cycles_per_frame.get() / 2);
        let end = self.frame_start + self.cycles_per_frame;

        while self.cycles < mid {
            self.step()?;
        }
        self.request_interrupt(MID_SCREEN_VECTOR);

        while self.cycles < end {
            self.step()?;
        }
        self.request_interrupt(VBLANK_VECTOR);

        self.frame_start = end;
        self.frame_count += 1;
        Ok((self.cycles - start).get())
    }

    /// Offer restart `vector` to the CPU. Dropped when interrupts are
    /// disabled.
    pub fn request_interrupt(&mut self, vector: u8) -> bool {
        let accepted = self.cpu.interrupt(&mut self.bus, vector);
        if !accepted {
            debug!(vector, "interrupt dropped, interrupts disabled");
        }
        accepted
    }

    /// Copy of video RAM, safe to hand to a renderer.
    #[must_use]
    pub fn video_snapshot(&self) -> Box<[u8; VRAM_LEN]> {
        let mut snapshot = Box::new([0u8; VRAM_LEN]);
        snapshot.copy_from_slice(self.bus.slice(VRAM_START, VRAM_LEN));
        snapshot
    }

    /// Rasterise the current video RAM into an upright RGBA frame.
    pub fn render_rgba(&self, frame: &mut [u8]) {
        video::render_rgba(&self.video_snapshot(), frame);
    }

    pub fn press(&mut self, button: Button) {
        self.bus.ports.press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.bus.ports.release(button);
    }

    /// Reset the CPU and frame timing. Memory is left as it is.
    pub fn reset(&mut self) {
        self.cpu = I8080::new();
        self.cycles = Ticks::ZERO;
        self.frame_start = Ticks::ZERO;
        self.frame_count = 0;
    }

    /// Read memory without side effects.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.bus.peek(address)
    }

    #[must_use]
    pub fn cpu(&self) -> &I8080 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut I8080 {
        &mut self.cpu
    }

    #[must_use]
    pub fn bus(&self) -> &InvadersBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut InvadersBus {
        &mut self.bus
    }

    #[must_use]
    pub fn cycles_per_frame(&self) -> u64 {
        self.cycles_per_frame.get()
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// CPU cycles run since power-on or reset.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles.get()
    }
}

impl Observable for Invaders {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("memory.") {
            parse_address(rest).map(|addr| Value::U8(self.bus.peek(addr)))
        } else if let Some(rest) = path.strip_prefix("ports.") {
            let ports = &self.bus.ports;
            match rest {
                "in1" => Some(ports.in1().into()),
                "in2" => Some(ports.in2().into()),
                "shift_amount" => Some(ports.shift().amount().into()),
                "shift_result" => Some(ports.shift().read().into()),
                "sound1" => Some(ports.sound().0.into()),
                "sound2" => Some(ports.sound().1.into()),
                "watchdog" => Some(ports.watchdog().into()),
                _ => None,
            }
        } else {
            match path {
                "cycles" => Some(self.cycles.get().into()),
                "frame_count" => Some(self.frame_count.into()),
                _ => self.cpu.query(path),
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.<8080_paths>",
            "memory.<address>",
            "ports.in1",
            "ports.in2",
            "ports.shift_amount",
            "ports.shift_result",
            "ports.sound1",
            "ports.sound2",
            "ports.watchdog",
            "cycles",
            "frame_count",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_budget_is_33333_cycles() {
        let machine = Invaders::blank(DipSwitches::default(), UnimplementedPolicy::Fatal);
        assert_eq!(machine.cycles_per_frame(), 33_333);
    }

    #[test]
    fn zeroed_memory_runs_as_nops() {
        let mut machine = Invaders::blank(DipSwitches::default(), UnimplementedPolicy::Fatal);
        let cycles = machine.run_frame().expect("NOPs never fail");
        // 33,333 is not a multiple of 4, so the frame overshoots by 3.
        assert_eq!(cycles, 33_336);
        assert_eq!(machine.frame_count(), 1);
        let cycles = machine.run_frame().expect("NOPs never fail");
        assert_eq!(cycles, 33_332);
    }

    #[test]
    fn frame_starts_stay_on_exact_multiples() {
        let mut machine = Invaders::blank(DipSwitches::default(), UnimplementedPolicy::Fatal);
        let mut total = Ticks::ZERO;
        for _ in 0..10 {
            total += Ticks::new(machine.run_frame().expect("NOPs never fail"));
        }
        assert_eq!(machine.frame_start, Ticks::new(10 * 33_333));
        assert_eq!(total.get(), machine.cycles());
        assert!((total - machine.frame_start) < Ticks::new(4));
    }

    #[test]
    fn queries_reach_cpu_memory_and_ports() {
        let mut machine = Invaders::blank(DipSwitches::default(), UnimplementedPolicy::Fatal);
        machine.load(0x2000, &[0x5A]);
        assert_eq!(machine.query("memory.0x2000"), Some(Value::U8(0x5A)));
        assert_eq!(machine.query("cpu.pc"), Some(Value::U16(0)));
        assert_eq!(machine.query("pc"), Some(Value::U16(0)));
        assert_eq!(machine.query("ports.in1"), Some(Value::U8(0x08)));
        assert_eq!(machine.query("frame_count"), Some(Value::U64(0)));
        assert_eq!(machine.query("ports.bogus"), None);
    }
}
