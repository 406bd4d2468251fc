use crate::mcs51::{InstructionRegister, Mcs51};
use crate::sfr::{Ie, Scon, Tcon, SFR_IE, SFR_IP, SFR_SCON, SFR_TCON};

/// One interrupt source. `bit_mask` is the source's position in the shared
/// mask layout (compatible with the IE and IP enable bits), `sfr_address`
/// and `sfr_bit_mask` locate the request flag, and `clears_flag` says
/// whether the hardware clears that flag on dispatch (the serial source
/// leaves TI/RI for software to clear).
#[derive(Clone, Copy)]
pub struct Interrupt {
    pub name: &'static str,
    pub bit_mask: u8,

    pub vector: u16,

    pub sfr_address: u8,
    pub sfr_bit_mask: u8,
    pub clears_flag: bool,
}

/// Interrupt controller state.
///
/// | Name    | Flag  | Address |
/// | Reset   | -     | 0x0000  |
/// | INT0    | IE0   | 0x0003  |
/// | Timer 0 | TF0   | 0x000B  |
/// | INT1    | IE1   | 0x0013  |
/// | Timer 1 | TF1   | 0x001B  |
/// | Serial  | TI/RI | 0x0023  |
///
/// All masks share the bit layout MSB [ RI/TI | TF1 | IE1 | TF0 | IE0 ] LSB,
/// with the LSB being the highest priority.
pub struct Nvic {
    pub map: [Interrupt; 5],

    /// Pending ISRs, latched from the flag SFRs at S5P2 of every machine cycle.
    pub isr_pending: u8,
    /// ISRs that have been dispatched and not yet returned from.
    pub isr_active_msk: u8,
    /// The single ISR currently executing (one bit or zero).
    pub isr_running_msk: u8,

    /// Vector consumed by the inserted LJMP.
    pub ljmp_vector: u16,
}

impl Nvic {
    pub fn new() -> Self {
        Self {
            map: [
                Interrupt { name: "INT0 (IE0)", bit_mask: Ie::EX0.bits(), vector: 0x0003, sfr_address: SFR_TCON, sfr_bit_mask: Tcon::IE0.bits(), clears_flag: true },
                Interrupt { name: "Timer 0 (TF0)", bit_mask: Ie::ET0.bits(), vector: 0x000B, sfr_address: SFR_TCON, sfr_bit_mask: Tcon::TF0.bits(), clears_flag: true },
                Interrupt { name: "INT1 (IE1)", bit_mask: Ie::EX1.bits(), vector: 0x0013, sfr_address: SFR_TCON, sfr_bit_mask: Tcon::IE1.bits(), clears_flag: true },
                Interrupt { name: "Timer 1 (TF1)", bit_mask: Ie::ET1.bits(), vector: 0x001B, sfr_address: SFR_TCON, sfr_bit_mask: Tcon::TF1.bits(), clears_flag: true },
                Interrupt { name: "Serial (TI/RI)", bit_mask: Ie::ES.bits(), vector: 0x0023, sfr_address: SFR_SCON, sfr_bit_mask: Scon::RI.bits() | Scon::TI.bits(), clears_flag: false },
            ],
            isr_pending: 0,
            isr_active_msk: 0,
            isr_running_msk: 0,
            ljmp_vector: 0,
        }
    }

    pub fn reset(&mut self) {
        self.isr_pending = 0;
        self.isr_active_msk = 0;
    }
}

impl Default for Nvic {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan a mask from LSB (high priority) to MSB (low priority) and return
/// the first set bit, or zero.
fn scan(interrupt_bit_mask: u8) -> u8 {
    let mut mask = 1;
    while mask < 0x80 && interrupt_bit_mask & mask == 0 {
        mask <<= 1;
    }
    interrupt_bit_mask & mask
}

/// Two-level scan: sources raised to high priority in IP win over the rest;
/// within a level the fixed LSB-first order decides.
fn priority_scan(priority_mask: u8, interrupt_bit_mask: u8) -> u8 {
    let high = scan(priority_mask & interrupt_bit_mask);
    if high != 0 {
        return high;
    }
    scan(interrupt_bit_mask)
}

impl Mcs51 {
    /// All interrupt flags are latched into the controller during state 5 of
    /// every machine cycle. The samples are polled during the following
    /// machine cycle; if the flag for an enabled interrupt is found set, the
    /// controller generates a long jump to the appropriate location in
    /// program memory, unless some other condition blocks it.
    pub(crate) fn nvic_latch_interrupt_flags(&mut self) {
        let tcon = Tcon::from_bits_truncate(self.data[SFR_TCON as usize]);
        let scon = Scon::from_bits_truncate(self.data[SFR_SCON as usize]);

        let mut pending = 0;
        if tcon.contains(Tcon::IE0) {
            pending |= Ie::EX0.bits();
        }
        if tcon.contains(Tcon::TF0) {
            pending |= Ie::ET0.bits();
        }
        if tcon.contains(Tcon::IE1) {
            pending |= Ie::EX1.bits();
        }
        if tcon.contains(Tcon::TF1) {
            pending |= Ie::ET1.bits();
        }
        if scon.intersects(Scon::RI | Scon::TI) {
            pending |= Ie::ES.bits();
        }

        self.nvic.isr_pending = pending;
    }

    /// The dispatch gate, run at S1P2 right before the fetch. Dispatch is
    /// considered only at an instruction boundary, with EA set, and never in
    /// the shadow of RETI or of an instruction that touched IE or IP. The
    /// active mask joins the candidates so a higher priority source can
    /// preempt the ISR in progress.
    pub(crate) fn nvic_run_interrupt_controller(&mut self) {
        let interrupt_enable = self.data[SFR_IE as usize];
        let pending_and_enabled = self.nvic.isr_pending & interrupt_enable;

        let ir = &self.instruction_register;
        if ir.opcode.cycles == 0
            && ir.opcode.code != 0x32
            && interrupt_enable & Ie::EA.bits() != 0
            && !ir.accessed_sfr_ie
            && !ir.accessed_sfr_ip
        {
            self.nvic_select_next_interrupt(self.nvic.isr_active_msk | pending_and_enabled);
        }
    }

    fn nvic_select_next_interrupt(&mut self, interrupt_bit_mask: u8) {
        let interrupt_mask = priority_scan(self.data[SFR_IP as usize], interrupt_bit_mask);

        if interrupt_mask == 0 {
            return;
        }

        // The winner is already in service (running or preempted); whatever
        // is pending is of equal or lower priority and has to wait.
        if self.nvic.isr_active_msk & interrupt_mask != 0 {
            return;
        }

        let interrupt = self.nvic.map[interrupt_mask.trailing_zeros() as usize];

        if interrupt.clears_flag {
            self.data[interrupt.sfr_address as usize] &= !interrupt.sfr_bit_mask;
        }

        self.nvic_jump_to_isr(interrupt);
    }

    /// Dispatch by rewriting the instruction register with a fabricated
    /// two-cycle LJMP to the vector. Routing interrupt entry through an
    /// ordinary instruction keeps the cycle accounting in one place and
    /// makes the entry cost the architectural two machine cycles.
    fn nvic_jump_to_isr(&mut self, interrupt: Interrupt) {
        self.nvic.isr_running_msk = interrupt.bit_mask;
        self.nvic.isr_active_msk |= interrupt.bit_mask;
        self.nvic.ljmp_vector = interrupt.vector;

        let mut opcode = self.opcode_map[0x02]; // LJMP addr16
        opcode.mnemonic = "NVIC LJMP";
        opcode.actor = Mcs51::handle_nvic_inserted_ljmp;

        self.instruction_register = InstructionRegister {
            opcode,
            args: [interrupt.vector as u8, (interrupt.vector >> 8) as u8, 0x00],
            ..Default::default()
        };
    }

    pub(crate) fn handle_nvic_inserted_ljmp(&mut self) {
        self.push_u16(self.pc);
        self.pc = self.nvic.ljmp_vector;
    }

    /// RETI retires the running ISR and re-derives which interrupted ISR, if
    /// any, execution is falling back into.
    pub(crate) fn nvic_reti(&mut self) {
        self.nvic.isr_active_msk &= !self.nvic.isr_running_msk;
        self.nvic.isr_running_msk =
            priority_scan(self.data[SFR_IP as usize], self.nvic.isr_active_msk);
    }
}
