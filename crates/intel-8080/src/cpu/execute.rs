//! Instruction execution for the 8080.

use emu_core::{Bus, IoBus};

use crate::alu;
use crate::opcodes::Instruction;
use crate::registers::RegisterPair;

use super::I8080;

impl I8080 {
    /// Execute a decoded instruction whose opcode byte has already been
    /// fetched. Operand bytes are fetched here.
    ///
    /// Returns true when a conditional call or return was taken, so the
    /// caller can charge the longer timing.
    pub(super) fn execute<B: IoBus>(&mut self, bus: &mut B, instruction: Instruction) -> bool {
        match instruction {
            Instruction::Nop => {}
            Instruction::Hlt => self.halted = true,

            // Data transfer
            Instruction::Mov(dst, src) => {
                let value = self.read_reg(bus, src);
                self.write_reg(bus, dst, value);
            }
            Instruction::Mvi(reg) => {
                let value = self.fetch_byte(bus);
                self.write_reg(bus, reg, value);
            }
            Instruction::Lxi(rp) => {
                let value = self.fetch_word(bus);
                self.regs.set_pair(rp, value);
            }
            Instruction::Lda => {
                let address = self.fetch_word(bus);
                self.regs.a = bus.read(address);
            }
            Instruction::Sta => {
                let address = self.fetch_word(bus);
                bus.write(address, self.regs.a);
            }
            Instruction::Lhld => {
                let address = self.fetch_word(bus);
                let value = Self::read_word(bus, address);
                self.regs.set_hl(value);
            }
            Instruction::Shld => {
                let address = self.fetch_word(bus);
                Self::write_word(bus, address, self.regs.hl());
            }
            Instruction::Ldax(rp) => {
                self.regs.a = bus.read(self.regs.pair(rp));
            }
            Instruction::Stax(rp) => {
                bus.write(self.regs.pair(rp), self.regs.a);
            }
            Instruction::Xchg => {
                let de = self.regs.de();
                self.regs.set_de(self.regs.hl());
                self.regs.set_hl(de);
            }

            // Arithmetic and logic
            Instruction::Inr(reg) => {
                let result = alu::inr(self.read_reg(bus, reg), self.flags);
                self.write_reg(bus, reg, result.value);
                self.flags = result.flags;
            }
            Instruction::Dcr(reg) => {
                let result = alu::dcr(self.read_reg(bus, reg), self.flags);
                self.write_reg(bus, reg, result.value);
                self.flags = result.flags;
            }
            Instruction::Inx(rp) => {
                let value = self.regs.pair(rp).wrapping_add(1);
                self.regs.set_pair(rp, value);
            }
            Instruction::Dcx(rp) => {
                let value = self.regs.pair(rp).wrapping_sub(1);
                self.regs.set_pair(rp, value);
            }
            Instruction::Dad(rp) => {
                let (value, carry) = alu::dad(self.regs.hl(), self.regs.pair(rp));
                self.regs.set_hl(value);
                self.flags.carry = carry;
            }
            Instruction::Alu(op, reg) => {
                let operand = self.read_reg(bus, reg);
                let result = alu::apply(op, self.regs.a, operand, self.flags);
                self.regs.a = result.value;
                self.flags = result.flags;
            }
            Instruction::AluImm(op) => {
                let operand = self.fetch_byte(bus);
                let result = alu::apply(op, self.regs.a, operand, self.flags);
                self.regs.a = result.value;
                self.flags = result.flags;
            }
            Instruction::Daa => {
                let result = alu::daa(self.regs.a, self.flags);
                self.regs.a = result.value;
                self.flags = result.flags;
            }
            Instruction::Cma => self.regs.a = !self.regs.a,
            Instruction::Stc => self.flags.carry = true,
            Instruction::Cmc => self.flags.carry = !self.flags.carry,

            // Rotates
            Instruction::Rlc | Instruction::Rrc | Instruction::Ral | Instruction::Rar => {
                let rotate = match instruction {
                    Instruction::Rlc => alu::rlc,
                    Instruction::Rrc => alu::rrc,
                    Instruction::Ral => alu::ral,
                    _ => alu::rar,
                };
                let result = rotate(self.regs.a, self.flags);
                self.regs.a = result.value;
                self.flags = result.flags;
            }

            // Branches
            Instruction::Jmp => {
                self.regs.pc = self.fetch_word(bus);
            }
            Instruction::Jcc(cc) => {
                let target = self.fetch_word(bus);
                if self.condition(cc) {
                    self.regs.pc = target;
                }
            }
            Instruction::Call => {
                let target = self.fetch_word(bus);
                self.push(bus, self.regs.pc);
                self.regs.pc = target;
            }
            Instruction::Ccc(cc) => {
                let target = self.fetch_word(bus);
                if self.condition(cc) {
                    self.push(bus, self.regs.pc);
                    self.regs.pc = target;
                    return true;
                }
            }
            Instruction::Ret => {
                self.regs.pc = self.pop(bus);
            }
            Instruction::Rcc(cc) => {
                if self.condition(cc) {
                    self.regs.pc = self.pop(bus);
                    return true;
                }
            }
            Instruction::Rst(n) => {
                self.push(bus, self.regs.pc);
                self.regs.pc = u16::from(n) * 8;
            }
            Instruction::Pchl => self.regs.pc = self.regs.hl(),

            // Stack
            Instruction::Push(rp) => {
                let value = match rp {
                    RegisterPair::Psw => self.psw(),
                    _ => self.regs.pair(rp),
                };
                self.push(bus, value);
            }
            Instruction::Pop(rp) => {
                let value = self.pop(bus);
                match rp {
                    RegisterPair::Psw => self.set_psw(value),
                    _ => self.regs.set_pair(rp, value),
                }
            }
            Instruction::Xthl => {
                let sp = self.regs.sp;
                let top = Self::read_word(bus, sp);
                Self::write_word(bus, sp, self.regs.hl());
                self.regs.set_hl(top);
            }
            Instruction::Sphl => self.regs.sp = self.regs.hl(),

            // I/O and interrupt control
            Instruction::In => {
                let port = self.fetch_byte(bus);
                self.regs.a = bus.read_io(port);
            }
            Instruction::Out => {
                let port = self.fetch_byte(bus);
                bus.write_io(port, self.regs.a);
            }
            Instruction::Ei => self.inte = true,
            Instruction::Di => self.inte = false,

            // Filtered out by `step` before dispatch.
            Instruction::Undefined => {}
        }
        false
    }
}
