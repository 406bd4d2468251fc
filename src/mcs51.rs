use std::io::Write;

use crate::nvic::Nvic;
use crate::opcodes::{Opcode, OPCODE_MAP};
use crate::sfr::{
    self, Auxr, Ie, Scon, Sfr, Tcon, SFR_AUXR, SFR_BDRCON, SFR_BRL, SFR_IE, SFR_IP, SFR_PCON,
    SFR_SADDR, SFR_SADEN, SFR_SBUF, SFR_SCON, SFR_SP, SFR_TCON, SFR_TH0, SFR_TH1, SFR_TL0,
    SFR_TL1, SFR_TMOD, SFR_MAP,
};

/// Standard crystal for 8051 boards: 11.0592 MHz divides evenly into the
/// common UART baud rates.
const OSC_FREQUENCY_HERTZ_DEFAULT: u64 = 11_059_200;

/// The instruction currently in flight. Holds a copy of the decoded opcode
/// record: its `cycles` field counts down the machine cycles until the next
/// fetch, and its `actor` slot is swapped for the idle actor once the body
/// has run. The cached argument bytes exist for display only; actors consume
/// the authoritative operands from PC themselves.
#[derive(Clone, Copy)]
pub struct InstructionRegister {
    pub opcode: Opcode,
    pub args: [u8; 3],

    // Set by the IE/IP access hooks, consulted by the interrupt controller,
    // cleared by the next fetch.
    pub accessed_sfr_ie: bool,
    pub accessed_sfr_ip: bool,
}

impl Default for InstructionRegister {
    fn default() -> Self {
        Self {
            opcode: Opcode {
                code: 0x00,
                bytes: 0,
                cycles: 0,
                mnemonic: "",
                actor: Mcs51::handle_idle,
            },
            args: [0; 3],
            accessed_sfr_ie: false,
            accessed_sfr_ip: false,
        }
    }
}

/// Intel MCS-51 MCU (aka. 8051).
///
/// Address spaces:
/// DATA    D:00 - D:7F     directly addressable on-chip RAM
/// BIT     D:20 - D:2F     bit addressable RAM, reached by the bit instructions
/// IDATA   I:00 - I:FF     indirectly addressable on-chip RAM (@R0 / @R1)
/// XDATA   X:0000 - X:FFFF 64 KB external RAM, reached by MOVX
/// CODE    C:0000 - C:FFFF 64 KB program ROM, read only
///
/// One machine cycle is 12 oscillator periods, grouped into six states of
/// two phases each (S1P1 .. S6P2). Indirect addresses below 0x80 map into
/// the lower DATA region; indirect addresses at or above 0x80 map into the
/// upper region at 0x100. The SFR window at 0x80-0xFF is only reachable by
/// direct addressing.
pub struct Mcs51 {
    /// Program counter, the only register that is not memory mapped.
    pub pc: u16,

    /// 128 DATA, 128 SFRs, 128 IDATA, 128 unused.
    pub data: [u8; 0x200],
    pub xdata: [u8; 0x10000],
    pub code: [u8; 0x10000],

    /// Describes and hooks every directly addressable byte.
    pub sfr_map: [Sfr; 0x100],
    pub opcode_map: [Opcode; 0x100],

    pub osc_frequency_hertz: u64,
    pub osc_periods: u64,

    pub instruction_register: InstructionRegister,

    /// Address Latch Enable. The signal is pulsed twice per machine cycle
    /// (S1P2-S2P2 and S4P2-S5P2) for external bus hardware, even when the
    /// cycle involves no external fetch, so in a system without external
    /// data memory it runs at a constant 1/6 of the oscillator frequency.
    /// AUXR.A0 suppresses the pulses.
    pub ale: bool,

    state_phases: [fn(&mut Mcs51); 12],

    pub nvic: Nvic,

    /// Armed by a write to SBUF, consumed at the next Timer 1 reload.
    pub sfr_dirty_sbuf: bool,

    pub on_serial_tx: Box<dyn FnMut(u8)>,
    pub abort_on_unimplemented_opcode: bool,
}

fn on_serial_tx_default_handler(byte: u8) {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(&[byte]);
    let _ = stdout.flush();
}

const STATE_PHASES: [fn(&mut Mcs51); 12] = [
    Mcs51::s1p1,
    Mcs51::s1p2,
    Mcs51::s2p1,
    Mcs51::s2p2,
    Mcs51::s3p1,
    Mcs51::s3p2,
    Mcs51::s4p1,
    Mcs51::s4p2,
    Mcs51::s5p1,
    Mcs51::s5p2,
    Mcs51::s6p1,
    Mcs51::s6p2,
];

impl Mcs51 {
    pub fn new() -> Self {
        Self {
            pc: 0x0000,
            data: [0; 0x200],
            xdata: [0; 0x10000],
            code: [0; 0x10000],
            sfr_map: *SFR_MAP,
            opcode_map: *OPCODE_MAP,
            osc_frequency_hertz: OSC_FREQUENCY_HERTZ_DEFAULT,
            osc_periods: 0,
            instruction_register: InstructionRegister::default(),
            ale: false,
            state_phases: STATE_PHASES,
            nvic: Nvic::new(),
            sfr_dirty_sbuf: false,
            on_serial_tx: Box::new(on_serial_tx_default_handler),
            abort_on_unimplemented_opcode: true,
        }
    }

    /// Install the opcode and SFR tables, the phase handlers, the default
    /// oscillator frequency and serial sink, then apply the reset state.
    /// The host loads CODE before calling this.
    pub fn init(&mut self) {
        self.register_opcodes();
        self.register_sfrs();

        self.nvic = Nvic::new();
        self.state_phases = STATE_PHASES;
        self.osc_frequency_hertz = OSC_FREQUENCY_HERTZ_DEFAULT;

        self.reset();

        self.on_serial_tx = Box::new(on_serial_tx_default_handler);
        self.abort_on_unimplemented_opcode = true;
    }

    fn register_opcodes(&mut self) {
        self.opcode_map = *OPCODE_MAP;
    }

    fn register_sfrs(&mut self) {
        self.sfr_map = *SFR_MAP;

        self.sfr_map[SFR_SBUF as usize].on_write = sfr::on_write_sbuf;

        self.sfr_map[SFR_IE as usize].on_write = sfr::on_read_write_ie;
        self.sfr_map[SFR_IE as usize].on_read = sfr::on_read_write_ie;

        self.sfr_map[SFR_IP as usize].on_write = sfr::on_read_write_ip;
        self.sfr_map[SFR_IP as usize].on_read = sfr::on_read_write_ip;
    }

    /// Apply the documented SFR reset values. Everything not listed keeps
    /// its content, as on the real device.
    pub fn reset(&mut self) {
        self.nvic.reset();

        self.data[SFR_SP as usize] = 0x07;
        self.data[SFR_TCON as usize] = 0x00;

        self.data[SFR_PCON as usize] &= 0b0010_0000; // Bit 6 is don't care
        self.data[SFR_PCON as usize] |= 0b0001_0000;

        self.data[SFR_TMOD as usize] = 0x00;
        self.data[SFR_TH0 as usize] = 0x00;
        self.data[SFR_TL0 as usize] = 0x00;
        self.data[SFR_TH1 as usize] = 0x00;
        self.data[SFR_TL1 as usize] = 0x00;
        self.data[SFR_SCON as usize] = 0x00;
        self.data[SFR_AUXR as usize] &= !0b11;

        self.data[SFR_BRL as usize] = 0x00;
        self.data[SFR_BDRCON as usize] &= 0b1110_0000;
        self.data[SFR_SADDR as usize] = 0x00;
        self.data[SFR_SADEN as usize] = 0x00;
    }

    /// Copy a raw program image into CODE memory, starting at address 0.
    pub fn load_code(&mut self, image: &[u8]) {
        if image.len() > self.code.len() {
            panic!("Program image exceeds CODE memory bounds");
        }
        self.code[..image.len()].copy_from_slice(image);
    }

    /// Advance the processor by one oscillator period.
    ///
    /// Typically, arithmetic and logical operations take place during
    /// phase 1 and internal register-to-register transfers during phase 2.
    pub fn step_oscillator_period(&mut self) {
        let phase = self.state_phases[(self.osc_periods % 12) as usize];
        phase(self);
        self.osc_periods += 1;
    }

    /// Twelve oscillator periods make one machine cycle.
    pub fn step_machine_cycle(&mut self) {
        for _ in 0..12 {
            self.step_oscillator_period();
        }
    }

    pub fn execution_time_ms(&self) -> f64 {
        self.osc_periods as f64 * 1000.0 / self.osc_frequency_hertz as f64
    }

    pub fn print_state(&self) {
        let state = (self.osc_periods / 2) % 6 + 1;
        let phase = self.osc_periods % 2 + 1;
        print!("S{state}P{phase}");
    }

    pub fn print_current_instruction(&self) {
        let opcode = &self.instruction_register.opcode;

        print!("{:#06x}: {}", self.pc, opcode.mnemonic);

        if opcode.bytes > 1 {
            print!(" ({:02x}", self.instruction_register.args[0]);
            if opcode.bytes > 2 {
                print!(", {:02x}", self.instruction_register.args[1]);
            }
            print!(")");
        }

        println!();
    }

    //////////// Phases ////////////

    fn s1p1(&mut self) {}

    fn s1p2(&mut self) {
        self.set_address_latch_enable();

        // Select a pending interrupt if applicable. A dispatch replaces the
        // instruction register, so the fetch below is skipped for it.
        self.nvic_run_interrupt_controller();

        // Latch the next opcode into the instruction register (fetch)
        if self.instruction_register.opcode.cycles == 0 {
            let code = self.code[self.pc as usize];
            let opcode = self.opcode_map[code as usize];
            self.reset_and_load_instruction_register(opcode);

            // Note: the cached argument bytes are for display only
            self.load_instruction_register_arguments(
                self.code[self.pc.wrapping_add(1) as usize],
                self.code[self.pc.wrapping_add(2) as usize],
                self.code[self.pc.wrapping_add(3) as usize],
            );

            // The actor pops its arguments from PC itself
            self.pc = self.pc.wrapping_add(1);
        }
    }

    fn s2p1(&mut self) {}

    fn s2p2(&mut self) {
        self.reset_address_latch_enable();
    }

    fn s3p1(&mut self) {}

    fn s3p2(&mut self) {}

    fn s4p1(&mut self) {}

    fn s4p2(&mut self) {
        self.set_address_latch_enable();

        let actor = self.instruction_register.opcode.actor;
        actor(self);

        // The body of a multi-cycle instruction runs exactly once, in its
        // first machine cycle; the remaining cycles only burn time.
        self.instruction_register.opcode.actor = Mcs51::handle_idle;

        self.instruction_register.opcode.cycles -= 1;
    }

    fn s5p1(&mut self) {}

    fn s5p2(&mut self) {
        self.reset_address_latch_enable();
        self.nvic_latch_interrupt_flags();
    }

    fn s6p1(&mut self) {}

    fn s6p2(&mut self) {
        self.timer_cycle();
    }

    //////////// Instruction register ////////////

    pub(crate) fn reset_and_load_instruction_register(&mut self, opcode: Opcode) {
        self.instruction_register = InstructionRegister {
            opcode,
            ..Default::default()
        };
    }

    pub(crate) fn load_instruction_register_arguments(&mut self, arg1: u8, arg2: u8, arg3: u8) {
        self.instruction_register.args = [arg1, arg2, arg3];
    }

    pub(crate) fn handle_idle(&mut self) {
        // NOP
    }

    pub(crate) fn handle_unimplemented(&mut self) {
        if self.abort_on_unimplemented_opcode {
            panic!(
                "Unimplemented opcode: {:#04x}",
                self.instruction_register.opcode.code
            );
        }
    }

    //////////// ALE ////////////

    fn set_address_latch_enable(&mut self) {
        self.ale = self.data[SFR_AUXR as usize] & Auxr::A0.bits() == 0;
    }

    fn reset_address_latch_enable(&mut self) {
        self.ale = false;
    }

    //////////// Timers ////////////

    /// Run the timer subsystem, once per machine cycle at S6P2.
    fn timer_cycle(&mut self) {
        let tcon = Tcon::from_bits_truncate(self.data[SFR_TCON as usize]);
        let tmod = self.data[SFR_TMOD as usize];
        let ie = Ie::from_bits_truncate(self.data[SFR_IE as usize]);

        // Timer 0 running
        if tcon.contains(Tcon::TR0) {
            let mode = tmod & 0b11;

            // Mode 0: 13-bit timer. TL0 acts as a 5-bit prescaler for TH0;
            // the counter rolls over from 0x1FFF to zero to raise the flag.
            if mode == 0 {
                let tl0 = self.data[SFR_TL0 as usize].wrapping_add(1);
                if tl0 > 0b11111 {
                    self.data[SFR_TL0 as usize] = 0x00;

                    let th0 = self.data[SFR_TH0 as usize].wrapping_add(1);
                    self.data[SFR_TH0 as usize] = th0;
                    if th0 == 0x00 && ie.contains(Ie::EA | Ie::ET0) {
                        self.data[SFR_TCON as usize] |= Tcon::TF0.bits();
                    }
                } else {
                    self.data[SFR_TL0 as usize] = tl0;
                }
            }
            // Mode 1: 16-bit timer
            else if mode == 1 {
                let tl0 = self.data[SFR_TL0 as usize].wrapping_add(1);
                self.data[SFR_TL0 as usize] = tl0;
                if tl0 == 0x00 {
                    let th0 = self.data[SFR_TH0 as usize].wrapping_add(1);
                    self.data[SFR_TH0 as usize] = th0;
                    if th0 == 0x00 && ie.contains(Ie::EA | Ie::ET0) {
                        self.data[SFR_TCON as usize] |= Tcon::TF0.bits();
                    }
                }
            } else {
                panic!("Unimplemented timer 0 mode: {mode}");
            }
        }

        // Timer 1 running
        if tcon.contains(Tcon::TR1) {
            let mode = (tmod >> 4) & 0b11;

            // Mode 2: 8-bit auto-reload from TH1
            if mode == 2 {
                let tl1 = self.data[SFR_TL1 as usize].wrapping_add(1);
                self.data[SFR_TL1 as usize] = tl1;
                if tl1 == 0x00 {
                    // Reload
                    self.data[SFR_TL1 as usize] = self.data[SFR_TH1 as usize];

                    if ie.contains(Ie::EA | Ie::ET1) {
                        self.data[SFR_TCON as usize] |= Tcon::TF1.bits();
                    }

                    let scon = self.data[SFR_SCON as usize];
                    let serial_mode = (scon >> 6) & 0b11;

                    // Serial mode 1: 8-bit UART, one stop bit. A reload that
                    // finds SBUF armed completes the frame.
                    if serial_mode == 1 {
                        if self.sfr_dirty_sbuf {
                            self.sfr_dirty_sbuf = false;

                            // Transmit interrupt flag, cleared by software
                            self.data[SFR_SCON as usize] |= Scon::TI.bits();

                            let byte = self.data[SFR_SBUF as usize];
                            (self.on_serial_tx)(byte);
                        }
                    } else {
                        panic!("Unimplemented serial mode: {serial_mode}");
                    }
                }
            } else {
                panic!("Unimplemented timer 1 mode: {mode}");
            }
        }
    }
}

impl Default for Mcs51 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sfr::{SFR_ACC, SFR_PSW};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn with_code(image: &[u8]) -> Mcs51 {
        let mut p = Mcs51::new();
        p.load_code(image);
        p.init();
        p
    }

    /// Run machine cycles until the instruction register holds a NOP, the
    /// "program finished" sentinel used by the host driver.
    fn run_until_nop(p: &mut Mcs51) {
        loop {
            p.step_machine_cycle();
            if p.instruction_register.opcode.code == 0x00 {
                break;
            }
        }
    }

    #[test]
    fn test_nop() {
        let mut p = with_code(&[0x00]);

        run_until_nop(&mut p);

        // One machine cycle
        assert_eq!(p.osc_periods, 12);
    }

    #[test]
    fn test_nop_only_program_costs_twelve_periods_each() {
        let mut p = with_code(&[0x00; 5]);

        for _ in 0..5 {
            p.step_machine_cycle();
        }

        assert_eq!(p.pc, 5);
        assert_eq!(p.osc_periods, 5 * 12);
    }

    /// Exchange the content of FFh and FF00h.
    /// MOV dptr, #0FF00h     ; take the address in dptr
    /// MOVX a, @dptr         ; get the content of 0FF00h in a
    /// MOV r0, 0FFh          ; save the content of FFh in r0
    /// MOV 0FFh, a           ; move a to FFh
    /// MOV a, r0             ; get content of FFh in a
    /// MOVX @dptr, a         ; move it to 0FF00h
    #[test]
    fn test_data_xdata_exchange() {
        let mut p = with_code(&[0x90, 0xff, 0x00, 0xe0, 0xa8, 0xff, 0xf5, 0xff, 0xe8, 0xf0]);

        p.data[0xFF] = 0xAD;
        p.xdata[0xFF00] = 0xDE;

        run_until_nop(&mut p);

        assert_eq!(p.data[0xFF], 0xDE);
        assert_eq!(p.xdata[0xFF00], 0xAD);
    }

    /// Store the higher nibble of r7 into both nibbles of r6.
    /// Mov a, r7          ; get the content in acc
    /// Anl a, #0F0h       ; mask lower bits
    /// Mov r6, a          ; send it to r6
    /// Swap a             ; exchange upper and lower nibbles of acc
    /// Orl a, r6          ; OR operation
    /// Mov r6, a          ; finally load content in r6
    #[test]
    fn test_swap_nibble_copy() {
        let mut p = with_code(&[0xef, 0x54, 0xf0, 0xfe, 0xc4, 0x4e, 0xfe]);

        p.data[0x07] = 0xBE; // Set R7
        p.data[0x06] = 0x69; // Pollute R6

        run_until_nop(&mut p);

        assert_eq!(p.data[0x06], 0xBB);
    }

    #[test]
    fn test_swap_round_trip() {
        let mut p = with_code(&[0xc4]); // SWAP A

        p.data[SFR_ACC as usize] = 0x5A;
        run_until_nop(&mut p);
        assert_eq!(p.data[SFR_ACC as usize], 0xA5);

        // A second SWAP restores the original value
        let mut p = with_code(&[0xc4, 0xc4]);
        p.data[SFR_ACC as usize] = 0x5A;
        run_until_nop(&mut p);
        assert_eq!(p.data[SFR_ACC as usize], 0x5A);
    }

    /// Treat r6-r7 and r4-r5 as two 16-bit registers and subtract them,
    /// result into 20h (low byte) and 21h (high byte).
    /// Clr c              ; clear carry
    /// Mov a, r4          ; get first lower byte
    /// Subb a, r6         ; subtract it with the other
    /// Mov 20h, a         ; store the result
    /// Mov a, r5          ; get the first higher byte
    /// Subb a, r7         ; subtract from the other
    /// Mov 21h, a         ; store the higher byte
    fn subtract_u16(a: u16, b: u16) -> u16 {
        let mut p = with_code(&[0xc3, 0xec, 0x9e, 0xf5, 0x20, 0xed, 0x9f, 0xf5, 0x21]);

        p.data[0x05] = (a >> 8) as u8;
        p.data[0x04] = a as u8;

        p.data[0x07] = (b >> 8) as u8;
        p.data[0x06] = b as u8;

        run_until_nop(&mut p);

        (u16::from(p.data[0x21]) << 8) | u16::from(p.data[0x20])
    }

    #[test]
    fn test_subtract_u16() {
        assert_eq!(subtract_u16(0xCDAB, 0x35DD), 0x97CE);
        assert_eq!(subtract_u16(0x1234, 0x1122), 0x0112);
        assert_eq!(subtract_u16(0, 1), 0xFFFF);
        assert_eq!(subtract_u16(1, 3), 0xFFFE);
    }

    #[test]
    fn test_accumulator_store() {
        let mut p = with_code(&[0xf5, 0x30]); // MOV 0x30, A

        p.data[SFR_ACC as usize] = 0xDE;

        run_until_nop(&mut p);

        assert_eq!(p.data[0x30], 0xDE);
    }

    #[test]
    fn test_sbuf_write_arms_transmitter() {
        let mut p = with_code(&[0xf5, SFR_SBUF]); // MOV SBUF, A

        p.data[SFR_ACC as usize] = 0xDE;

        run_until_nop(&mut p);

        assert!(p.sfr_dirty_sbuf);
    }

    /// MOV R0, #0x80
    /// MOV @R0, #0xAB
    #[test]
    fn test_indirect_addressing_skips_sfr_window() {
        let mut p = with_code(&[0x78, 0x80, 0x76, 0xab]);

        p.data[0x80] = 0xFF;

        run_until_nop(&mut p);

        // The SFR at 0x80 is untouched; the write landed in upper IDATA.
        assert_eq!(p.data[0x80], 0xFF);
        assert_eq!(p.data[0x80 + 0x80], 0xAB);
    }

    /// MOV TMOD, #0x01 ; Timer 0 into 16-bit mode
    /// SETB TR0
    /// PUSH TL0 ; (6x)
    ///
    /// The timer ticks at S6P2 of every machine cycle once TR0 is set, and
    /// PUSH costs two cycles, so the stacked samples step by two.
    #[test]
    fn test_timer_0_observed_through_stack() {
        let mut p = with_code(&[
            0x75, 0x89, 0x01, 0xd2, 0x8c, 0xc0, 0x8a, 0xc0, 0x8a, 0xc0, 0x8a, 0xc0, 0x8a, 0xc0,
            0x8a, 0xc0, 0x8a,
        ]);

        run_until_nop(&mut p);

        assert_eq!(p.data[0x07], 0);
        assert_eq!(p.data[0x08], 1);
        assert_eq!(p.data[0x09], 3);
        assert_eq!(p.data[0x0a], 5);
        assert_eq!(p.data[0x0b], 7);
        assert_eq!(p.data[0x0c], 9);
        assert_eq!(p.data[0x0d], 11);
        assert_eq!(p.data[0x0e], 0);
    }

    /// .ORG 0000h
    ///     SJMP main
    ///
    /// .ORG 000Bh           ; Timer 0 vector
    ///     MOV R1, #0xDE
    ///     RETI
    ///
    /// main:
    ///     SETB EA
    ///     SETB ET0
    ///     MOV TMOD, #0x01  ; Timer 0 into 16-bit mode
    ///     MOV TH0, #0xFF
    ///     MOV TL0, #0xF8
    ///     NOP
    ///     SETB TR0         ; S6P2 of this cycle: TL0 0xF9
    ///
    /// From TR0 on, TL0 counts 0xF9..0xFF and wraps at the 8th tick, which
    /// raises TF0 at S6P2. The flag is latched at S5P2 of the following
    /// cycle, dispatch happens at the S1P2 after that, the inserted LJMP
    /// burns two cycles, and the first ISR instruction lands one cycle
    /// later.
    #[test]
    fn test_timer_0_isr_dispatch_latency() {
        let mut p = with_code(&[
            0x80, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x79, 0xde, 0x32,
            0xd2, 0xaf, 0xd2, 0xa9, 0x75, 0x89, 0x01, 0x75, 0x8c, 0xff, 0x75, 0x8a, 0xf8, 0x00,
            0xd2, 0x8c,
        ]);

        run_until_nop(&mut p);

        p.step_machine_cycle(); // SETB TR0

        for _ in 0..8 {
            p.step_machine_cycle();
            assert_eq!(p.data[0x01], 0x00);
            assert_eq!(p.nvic.isr_active_msk, 0);
        }

        // The flags are sampled, the next instruction is hardware generated

        // The inserted LJMP takes 2 cycles
        for _ in 0..2 {
            p.step_machine_cycle();
            assert_eq!(p.data[0x01], 0x00);
            assert_ne!(p.nvic.isr_active_msk, 0);
        }

        p.step_machine_cycle(); // MOV of the ISR

        assert_eq!(p.data[0x01], 0xDE);
    }

    /// .ORG 0000h
    ///      LJMP main
    ///
    /// .ORG 0003h ... 001Bh  ; all four hardware vectors:
    ///     MOV @R0, #<marker>
    ///     INC R0
    ///     RETI
    ///
    /// main:
    ///     MOV R0, #0x30
    ///     MOV IE, #0b10001111 ; Enable EA, ET1, EX1, ET0, EX0
    ///
    /// Each flag is raised right after the previous dispatch, so every ISR
    /// is preempted by the next, higher priority one before its first
    /// instruction runs. The markers unwind in priority order.
    #[test]
    fn test_isr_nesting_with_priorities() {
        let mut p = with_code(&[
            0x02, 0x00, 0x1f, 0x76, 0xde, 0x08, 0x32, 0x00, 0x00, 0x00, 0x00, 0x76, 0xad, 0x08,
            0x32, 0x00, 0x00, 0x00, 0x00, 0x76, 0xbe, 0x08, 0x32, 0x00, 0x00, 0x00, 0x00, 0x76,
            0xef, 0x08, 0x32, 0x78, 0x30, 0x75, 0xa8, 0x8f, 0x00,
        ]);

        run_until_nop(&mut p);

        p.data[SFR_TCON as usize] |= Tcon::TF1.bits();

        p.step_machine_cycle();
        p.step_machine_cycle();

        p.data[SFR_TCON as usize] |= Tcon::IE1.bits();

        p.step_machine_cycle();
        p.step_machine_cycle();

        p.data[SFR_TCON as usize] |= Tcon::TF0.bits();

        p.step_machine_cycle();
        p.step_machine_cycle();

        p.data[SFR_TCON as usize] |= Tcon::IE0.bits();

        run_until_nop(&mut p);

        assert_eq!(p.data[0x30], 0xDE);
        assert_eq!(p.data[0x31], 0xAD);
        assert_eq!(p.data[0x32], 0xBE);
        assert_eq!(p.data[0x33], 0xEF);
    }

    /// .ORG 0000h
    ///     LJMP main
    ///
    /// .ORG 0003h           ; INT0 vector
    ///     MOV R0, #0xAB
    ///     RETI
    ///
    /// main:
    ///     MOV IE, #0b10000001 ; Enable EA, EX0
    ///     NOP
    ///     MOV IP, #0
    ///     MUL AB
    ///
    /// The MOV IP instruction touches IP, so dispatch is held off past it
    /// and past the 4-cycle MUL that follows.
    #[test]
    fn test_ie_ip_access_defers_dispatch() {
        let mut p = with_code(&[
            0x02, 0x00, 0x06, 0x78, 0xab, 0x32, 0x75, 0xa8, 0x81, 0x00, 0x75, 0xb8, 0x00, 0xa4,
        ]);

        run_until_nop(&mut p);

        p.data[SFR_TCON as usize] |= Tcon::IE0.bits();

        p.step_machine_cycle(); // MOV IP, #0 and sample of the NVIC flags
        p.step_machine_cycle(); // MOV IP, #0
        // MOV IP, #0 had/has IP access, thus no interrupt

        // 4 cycles of MUL
        p.step_machine_cycle();
        p.step_machine_cycle();
        p.step_machine_cycle();
        p.step_machine_cycle();

        p.step_machine_cycle(); // LJMP
        p.step_machine_cycle(); // LJMP

        assert_eq!(p.data[0x00], 0x00);

        p.step_machine_cycle(); // MOV

        assert_eq!(p.data[0x00], 0xAB);
    }

    #[test]
    fn test_disabled_interrupt_is_never_dispatched() {
        // EA set, but EX0 clear: a raised IE0 flag must go nowhere.
        let mut p = with_code(&[0x00; 8]);

        p.data[SFR_IE as usize] = Ie::EA.bits();
        p.data[SFR_TCON as usize] |= Tcon::IE0.bits();

        for _ in 0..6 {
            p.step_machine_cycle();
            assert_eq!(p.nvic.isr_active_msk, 0);
        }

        // With EA clear the same holds even for an enabled source.
        let mut p = with_code(&[0x00; 8]);
        p.data[SFR_IE as usize] = Ie::EX0.bits();
        p.data[SFR_TCON as usize] |= Tcon::IE0.bits();

        for _ in 0..6 {
            p.step_machine_cycle();
            assert_eq!(p.nvic.isr_active_msk, 0);
        }
    }

    #[test]
    fn test_isr_restores_stack_pointer() {
        // Trigger INT0 with an ISR that only returns; SP must come back to
        // its pre-entry value once the RETI has retired.
        let mut p = with_code(&[
            0x02, 0x00, 0x04, // LJMP main
            0x32, // 0x0003: RETI
            0x75, 0xa8, 0x81, // main: MOV IE, #0b10000001
            0x00,
        ]);

        run_until_nop(&mut p);
        let sp_before = p.data[SFR_SP as usize];

        p.data[SFR_TCON as usize] |= Tcon::IE0.bits();

        // Latch, dispatch (2 cycles), RETI (2 cycles), plus slack
        for _ in 0..8 {
            p.step_machine_cycle();
        }

        assert_eq!(p.nvic.isr_active_msk, 0);
        assert_eq!(p.data[SFR_SP as usize], sp_before);
    }

    /// MOV SCON, #0x40  ; 8-bit UART, mode 1
    /// MOV TMOD, #0x20  ; Timer 1 into 8-bit auto-reload
    /// MOV TH1, #0xFF   ; reload value: overflow every tick
    /// MOV TL1, #0xFF
    /// MOV SBUF, #0x41  ; arm the transmitter
    /// SETB TR1
    #[test]
    fn test_serial_tx_on_timer_1_reload() {
        let mut p = with_code(&[
            0x75, 0x98, 0x40, 0x75, 0x89, 0x20, 0x75, 0x8d, 0xff, 0x75, 0x8b, 0xff, 0x75, 0x99,
            0x41, 0xd2, 0x8e, 0x00,
        ]);

        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sent);
        p.on_serial_tx = Box::new(move |byte| sink.borrow_mut().push(byte));

        run_until_nop(&mut p);
        for _ in 0..4 {
            p.step_machine_cycle();
        }

        // Exactly one frame left the device, and TI is set for software.
        assert_eq!(*sent.borrow(), vec![0x41]);
        assert!(!p.sfr_dirty_sbuf);
        assert_ne!(p.data[SFR_SCON as usize] & Scon::TI.bits(), 0);
    }

    #[test]
    fn test_ale_pulses_twice_per_machine_cycle() {
        let mut p = with_code(&[0x00; 4]);

        let mut trace = Vec::new();
        for _ in 0..12 {
            p.step_oscillator_period();
            trace.push(p.ale);
        }

        // High S1P2-S2P2 and S4P2-S5P2, low elsewhere
        assert_eq!(
            trace,
            [false, true, true, false, false, false, false, true, true, false, false, false]
        );
    }

    #[test]
    fn test_auxr_a0_inhibits_ale() {
        let mut p = with_code(&[0x00; 4]);
        p.data[SFR_AUXR as usize] |= Auxr::A0.bits();

        for _ in 0..24 {
            p.step_oscillator_period();
            assert!(!p.ale);
        }
    }

    #[test]
    #[should_panic(expected = "Unimplemented opcode")]
    fn test_unimplemented_opcode_aborts_by_default() {
        let mut p = with_code(&[0x03]); // not populated in the opcode table
        p.step_machine_cycle();
    }

    #[test]
    fn test_unimplemented_opcode_as_noop_when_softened() {
        let mut p = with_code(&[0x03, 0x00]);
        p.abort_on_unimplemented_opcode = false;

        p.step_machine_cycle();

        // One byte, one machine cycle, no other effect
        assert_eq!(p.pc, 1);
        assert_eq!(p.osc_periods, 12);
    }

    #[test]
    fn test_reset_applies_sfr_defaults() {
        let mut p = Mcs51::new();
        p.data[SFR_TCON as usize] = 0xFF;
        p.data[SFR_PCON as usize] = 0xFF;
        p.data[SFR_AUXR as usize] = 0xFF;
        p.data[SFR_PSW as usize] = 0x00;

        p.reset();

        assert_eq!(p.data[SFR_SP as usize], 0x07);
        assert_eq!(p.data[SFR_TCON as usize], 0x00);
        // Bit 5 survives, bit 4 is forced on, the rest is cleared
        assert_eq!(p.data[SFR_PCON as usize], 0b0011_0000);
        assert_eq!(p.data[SFR_AUXR as usize], 0xFC);
        assert_eq!(p.data[SFR_SCON as usize], 0x00);
    }

    #[test]
    fn test_execution_time_ms() {
        let mut p = with_code(&[0x00]);
        run_until_nop(&mut p);

        let expected = 12.0 * 1000.0 / 11_059_200.0;
        assert!((p.execution_time_ms() - expected).abs() < 1e-12);
    }
}
