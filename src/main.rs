use std::{env, fs, thread, time::Duration};

use mcs51emu::Mcs51;

fn main() {
    let path = env::args().nth(1).expect("Usage: mcs51emu <image.bin>");
    let image = fs::read(&path).expect("Failed to read program image");

    let mut proc = Mcs51::new();
    proc.load_code(&image);
    proc.init();

    // 11.0592MHz / 12 is roughly one machine cycle per microsecond, so a
    // short sleep per cycle keeps the pace in the right ballpark. Stop once
    // the program falls into a NOP, the "finished" sentinel.
    loop {
        proc.step_machine_cycle();

        if proc.instruction_register.opcode.code == 0x00 {
            break;
        }

        thread::sleep(Duration::from_micros(1));
    }

    println!("\n\nFinished with {} oscillator periods.", proc.osc_periods);
    println!("That's {:.2}ms.", proc.execution_time_ms());
}
