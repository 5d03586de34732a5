//! Table-driven flag checks for the accumulator instructions.
//!
//! Each vector runs one immediate-operand instruction followed by HLT and
//! compares the accumulator and the packed PSW flag byte
//! (bit0 Z, bit1 S, bit2 P, bit3 CY, bit4 AC).

use emu_core::{Cpu, SimpleBus, Step};
use intel_8080::I8080;
use serde::Deserialize;

const VECTORS: &str = r#"[
    { "name": "ADI wraps to zero",      "opcode": "C6", "a": "FF", "operand": "01", "carry": false, "result": "00", "flags": "1D" },
    { "name": "ADI no carries",         "opcode": "C6", "a": "3D", "operand": "42", "carry": false, "result": "7F", "flags": "00" },
    { "name": "ADI high bits only",     "opcode": "C6", "a": "80", "operand": "80", "carry": false, "result": "00", "flags": "0D" },
    { "name": "ACI carry into bit 4",   "opcode": "CE", "a": "3D", "operand": "42", "carry": true,  "result": "80", "flags": "12" },
    { "name": "SUI borrow",             "opcode": "D6", "a": "00", "operand": "01", "carry": false, "result": "FF", "flags": "0E" },
    { "name": "SUI equal",              "opcode": "D6", "a": "3E", "operand": "3E", "carry": false, "result": "00", "flags": "15" },
    { "name": "SBI borrow in",          "opcode": "DE", "a": "04", "operand": "02", "carry": true,  "result": "01", "flags": "10" },
    { "name": "SBI borrow out",         "opcode": "DE", "a": "02", "operand": "02", "carry": true,  "result": "FF", "flags": "0E" },
    { "name": "ANI clears carry",       "opcode": "E6", "a": "F0", "operand": "0F", "carry": true,  "result": "00", "flags": "05" },
    { "name": "XRI complement",         "opcode": "EE", "a": "5A", "operand": "FF", "carry": false, "result": "A5", "flags": "06" },
    { "name": "ORI even parity",        "opcode": "F6", "a": "01", "operand": "02", "carry": true,  "result": "03", "flags": "04" },
    { "name": "CPI less than",          "opcode": "FE", "a": "10", "operand": "20", "carry": false, "result": "10", "flags": "1E" },
    { "name": "CPI equal",              "opcode": "FE", "a": "42", "operand": "42", "carry": true,  "result": "42", "flags": "15" }
]"#;

#[derive(Deserialize)]
struct Vector {
    name: String,
    opcode: String,
    a: String,
    operand: String,
    carry: bool,
    result: String,
    flags: String,
}

fn hex(text: &str) -> u8 {
    u8::from_str_radix(text, 16).unwrap_or_else(|_| panic!("bad hex byte {text:?}"))
}

#[test]
fn accumulator_flag_vectors() {
    let vectors: Vec<Vector> = serde_json::from_str(VECTORS).expect("vector table parses");
    let mut failures = Vec::new();

    for vector in &vectors {
        let mut bus = SimpleBus::new();
        bus.load(0x0000, &[hex(&vector.opcode), hex(&vector.operand), 0x76]);

        let mut cpu = I8080::new();
        cpu.registers_mut().a = hex(&vector.a);
        cpu.flags_mut().carry = vector.carry;

        assert!(matches!(cpu.step(&mut bus), Step::Continue { cycles: 7 }));
        assert_eq!(cpu.step(&mut bus), Step::Halted);

        let got = (cpu.registers().a, cpu.flags().pack());
        let want = (hex(&vector.result), hex(&vector.flags));
        if got != want {
            failures.push(format!(
                "{}: got A={:02X} F={:02X}, want A={:02X} F={:02X}",
                vector.name, got.0, got.1, want.0, want.1
            ));
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
