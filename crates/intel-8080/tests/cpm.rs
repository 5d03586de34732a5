//! Minimal CP/M harness for 8080 diagnostic programs.
//!
//! CP/M memory layout:
//! - 0x0000: Warm boot (HLT here; reaching it ends the run)
//! - 0x0005: BDOS entry (intercepted, then the RET placed there runs)
//! - 0x0006-0x0007: Top of TPA (programs read this for stack init)
//! - 0x0100: Program load address (TPA start)

use emu_core::{Cpu, SimpleBus, Step};
use intel_8080::I8080;

const MAX_INSTRUCTIONS: u64 = 50_000_000;

/// Run a CP/M program and return everything it printed.
fn run_cpm(binary: &[u8]) -> String {
    let mut bus = SimpleBus::new();
    bus.load(0x0100, binary);
    bus.load(0x0000, &[0x76]); // HLT
    bus.load(0x0005, &[0xC9]); // RET
    bus.load(0x0006, &[0x00, 0xFE]); // 0xFE00

    let mut cpu = I8080::new();
    cpu.set_pc(0x0100);
    cpu.set_sp(0xFE00);

    let mut output = String::new();
    let mut instructions: u64 = 0;

    while instructions < MAX_INSTRUCTIONS {
        let pc = cpu.pc();

        if pc == 0x0000 {
            eprintln!("Warm boot at instruction {instructions}");
            break;
        }

        if pc == 0x0005 {
            let regs = cpu.registers();
            match regs.c {
                2 => output.push(char::from(regs.e)),
                9 => {
                    let mut addr = regs.de();
                    loop {
                        let ch = bus.peek(addr);
                        if ch == b'$' {
                            break;
                        }
                        output.push(char::from(ch));
                        addr = addr.wrapping_add(1);
                    }
                }
                func => eprintln!("Unknown BDOS function: {func}"),
            }
        }

        match cpu.step(&mut bus) {
            Step::Continue { .. } => {}
            Step::Halted => {
                eprintln!("HLT at {:#06X}", cpu.pc().wrapping_sub(1));
                break;
            }
            Step::Unimplemented { opcode, address } => {
                panic!("unimplemented opcode {opcode:#04X} at {address:#06X}");
            }
        }
        instructions += 1;
    }

    eprintln!("{output}");
    output
}

#[test]
fn bdos_string_and_char_output() {
    #[rustfmt::skip]
    let program = [
        0x1E, b'>',        // 0100 MVI E,'>'
        0x0E, 0x02,        // 0102 MVI C,2
        0xCD, 0x05, 0x00,  // 0104 CALL 5
        0x11, 0x10, 0x01,  // 0107 LXI D,0110h
        0x0E, 0x09,        // 010A MVI C,9
        0xCD, 0x05, 0x00,  // 010C CALL 5
        0xC7,              // 010F RST 0
        b'h', b'i', b'$',  // 0110
    ];
    assert_eq!(run_cpm(&program), ">hi");
}

#[test]
fn summing_loop_reports_pass() {
    #[rustfmt::skip]
    let program = [
        0x31, 0x00, 0xFE,  // 0100 LXI SP,FE00h
        0x3E, 0x00,        // 0103 MVI A,0
        0x06, 0x0A,        // 0105 MVI B,10
        0x80,              // 0107 ADD B
        0x05,              // 0108 DCR B
        0xC2, 0x07, 0x01,  // 0109 JNZ 0107h
        0xFE, 0x37,        // 010C CPI 55
        0x11, 0x1F, 0x01,  // 010E LXI D,PASS
        0xCA, 0x17, 0x01,  // 0111 JZ 0117h
        0x11, 0x24, 0x01,  // 0114 LXI D,FAIL
        0x0E, 0x09,        // 0117 MVI C,9
        0xCD, 0x05, 0x00,  // 0119 CALL 5
        0xC3, 0x00, 0x00,  // 011C JMP 0
        b'P', b'A', b'S', b'S', b'$', // 011F
        b'F', b'A', b'I', b'L', b'$', // 0124
    ];
    assert_eq!(run_cpm(&program), "PASS");
}

#[test]
fn subroutine_preserves_registers_through_stack() {
    #[rustfmt::skip]
    let program = [
        0x01, 0x34, 0x12,  // 0100 LXI B,1234h
        0xCD, 0x0F, 0x01,  // 0103 CALL 010Fh
        0x78,              // 0106 MOV A,B
        0xFE, 0x12,        // 0107 CPI 12h
        0xC2, 0x00, 0x00,  // 0109 JNZ 0
        0xC3, 0x17, 0x01,  // 010C JMP 0117h
        0xC5,              // 010F PUSH B
        0x01, 0x00, 0x00,  // 0110 LXI B,0
        0xC1,              // 0113 POP B
        0xC9,              // 0114 RET
        0x00, 0x00,        // 0115
        0x1E, b'=',        // 0117 MVI E,'='
        0x0E, 0x02,        // 0119 MVI C,2
        0xCD, 0x05, 0x00,  // 011B CALL 5
        0xC3, 0x00, 0x00,  // 011E JMP 0
    ];
    assert_eq!(run_cpm(&program), "=");
}

#[test]
#[ignore]
fn cpudiag() {
    let binary = std::fs::read("tests/data/cpudiag.bin")
        .expect("tests/data/cpudiag.bin not found");
    let output = run_cpm(&binary);
    assert!(output.contains("CPU IS OPERATIONAL"), "CPUDIAG failed: {output}");
}
