use bitflags::bitflags;
use once_cell::sync::Lazy;
use phf::phf_map;

use crate::mcs51::Mcs51;

// Special Function Register addresses in the direct address space.
// Everything from 0x80 to 0xFF is SFR territory; only the addresses below
// are actually decoded by this device. The layout follows the AT89C51RB2/RC2
// register map (the classic 8051 set plus AUXR and the baud rate registers).
pub const SFR_P0: u8 = 0x80;
pub const SFR_SP: u8 = 0x81;
pub const SFR_DPL: u8 = 0x82;
pub const SFR_DPH: u8 = 0x83;
pub const SFR_PCON: u8 = 0x87;
pub const SFR_TCON: u8 = 0x88;
pub const SFR_TMOD: u8 = 0x89;
pub const SFR_TL0: u8 = 0x8A;
pub const SFR_TL1: u8 = 0x8B;
pub const SFR_TH0: u8 = 0x8C;
pub const SFR_TH1: u8 = 0x8D;
pub const SFR_AUXR: u8 = 0x8E;
pub const SFR_P1: u8 = 0x90;
pub const SFR_SCON: u8 = 0x98;
pub const SFR_SBUF: u8 = 0x99;
pub const SFR_BRL: u8 = 0x9A;
pub const SFR_BDRCON: u8 = 0x9B;
pub const SFR_P2: u8 = 0xA0;
pub const SFR_IE: u8 = 0xA8;
pub const SFR_SADDR: u8 = 0xA9;
pub const SFR_P3: u8 = 0xB0;
pub const SFR_IP: u8 = 0xB8;
pub const SFR_SADEN: u8 = 0xB9;
pub const SFR_PSW: u8 = 0xD0;
pub const SFR_ACC: u8 = 0xE0;
pub const SFR_B: u8 = 0xF0;

bitflags! {
    /// Program Status Word.
    pub struct Psw: u8 {
        const CY = 0x80;  // Carry
        const AC = 0x40;  // Auxiliary carry
        const F0 = 0x20;  // User flag 0
        const RS1 = 0x10; // Register bank select, high bit
        const RS0 = 0x08; // Register bank select, low bit
        const OV = 0x04;  // Overflow
        const P = 0x01;   // Parity
    }
}

bitflags! {
    /// Timer/counter control. The low nibble holds the external interrupt
    /// flags and trigger-type bits, the high nibble the timer run/overflow bits.
    pub struct Tcon: u8 {
        const TF1 = 0x80;
        const TR1 = 0x40;
        const TF0 = 0x20;
        const TR0 = 0x10;
        const IE1 = 0x08;
        const IT1 = 0x04;
        const IE0 = 0x02;
        const IT0 = 0x01;
    }
}

bitflags! {
    /// Timer/counter mode. Each timer gets a nibble: GATE, C/T, M1, M0.
    pub struct Tmod: u8 {
        const GATE1 = 0x80;
        const CT1 = 0x40;
        const T1M1 = 0x20;
        const T1M0 = 0x10;
        const GATE0 = 0x08;
        const CT0 = 0x04;
        const T0M1 = 0x02;
        const T0M0 = 0x01;
    }
}

bitflags! {
    /// Interrupt enable. EA gates everything; the low five bits enable the
    /// individual sources and double as the NVIC's pending/active mask layout.
    pub struct Ie: u8 {
        const EA = 0x80;
        const ES = 0x10;
        const ET1 = 0x08;
        const EX1 = 0x04;
        const ET0 = 0x02;
        const EX0 = 0x01;
    }
}

bitflags! {
    /// Serial port control. SM0/SM1 select the UART mode.
    pub struct Scon: u8 {
        const SM0 = 0x80;
        const SM1 = 0x40;
        const SM2 = 0x20;
        const REN = 0x10;
        const TB8 = 0x08;
        const RB8 = 0x04;
        const TI = 0x02;
        const RI = 0x01;
    }
}

bitflags! {
    /// Auxiliary register. A0 disables the ALE output pulses.
    pub struct Auxr: u8 {
        const EXTRAM = 0x02;
        const A0 = 0x01;
    }
}

/// Describes one directly addressable byte: its display name, whether the
/// bit-addressing instructions can reach it, and the access hooks the core
/// fires on direct reads and writes of the address.
#[derive(Clone, Copy)]
pub struct Sfr {
    pub address: u8,
    pub name: &'static str,
    pub bit_addressable: bool,

    pub on_read: fn(&mut Mcs51),
    pub on_write: fn(&mut Mcs51),
}

pub(crate) fn hook_noop(_p: &mut Mcs51) {}

/// A write to SBUF arms the transmitter; the byte leaves the device at the
/// next Timer 1 reload (see the timer tick).
pub(crate) fn on_write_sbuf(p: &mut Mcs51) {
    p.sfr_dirty_sbuf = true;
}

// IE and IP accesses are flagged on the in-flight instruction so that the
// interrupt controller can hold off dispatching until the next instruction.
pub(crate) fn on_read_write_ie(p: &mut Mcs51) {
    p.instruction_register.accessed_sfr_ie = true;
}

pub(crate) fn on_read_write_ip(p: &mut Mcs51) {
    p.instruction_register.accessed_sfr_ip = true;
}

struct SfrName {
    name: &'static str,
    bit_addressable: bool,
}

const fn named(name: &'static str) -> SfrName {
    SfrName { name, bit_addressable: false }
}

const fn named_bits(name: &'static str) -> SfrName {
    SfrName { name, bit_addressable: true }
}

/// Display names for the decoded SFRs. Registers aligned on 8-byte
/// boundaries are reachable by the bit instructions.
static SFR_NAMES: phf::Map<u8, SfrName> = phf_map! {
    0x80u8 => named_bits("P0"),
    0x81u8 => named("SP"),
    0x82u8 => named("DPL"),
    0x83u8 => named("DPH"),
    0x87u8 => named("PCON"),
    0x88u8 => named_bits("TCON"),
    0x89u8 => named("TMOD"),
    0x8Au8 => named("TL0"),
    0x8Bu8 => named("TL1"),
    0x8Cu8 => named("TH0"),
    0x8Du8 => named("TH1"),
    0x8Eu8 => named("AUXR"),
    0x90u8 => named_bits("P1"),
    0x98u8 => named_bits("SCON"),
    0x99u8 => named("SBUF"),
    0x9Au8 => named("BRL"),
    0x9Bu8 => named("BDRCON"),
    0xA0u8 => named_bits("P2"),
    0xA8u8 => named_bits("IE"),
    0xA9u8 => named("SADDR"),
    0xB0u8 => named_bits("P3"),
    0xB8u8 => named_bits("IP"),
    0xB9u8 => named("SADEN"),
    0xD0u8 => named_bits("PSW"),
    0xE0u8 => named_bits("ACC"),
    0xF0u8 => named_bits("B"),
};

/// The default descriptor table: every address carries its own index, named
/// entries get their display name, and all hooks start out as no-ops.
/// `Mcs51::init` copies this into the instance and then overrides the SBUF,
/// IE and IP hooks.
pub(crate) static SFR_MAP: Lazy<[Sfr; 0x100]> = Lazy::new(|| {
    let mut map = [Sfr {
        address: 0,
        name: "",
        bit_addressable: false,
        on_read: hook_noop,
        on_write: hook_noop,
    }; 0x100];

    for (address, entry) in map.iter_mut().enumerate() {
        entry.address = address as u8;
        if let Some(named) = SFR_NAMES.get(&(address as u8)) {
            entry.name = named.name;
            entry.bit_addressable = named.bit_addressable;
        }
    }

    map
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sfr_map_addresses_match_indices() {
        assert_eq!(SFR_MAP.len(), 256);
        for (i, sfr) in SFR_MAP.iter().enumerate() {
            assert_eq!(sfr.address as usize, i);
        }
    }

    #[test]
    fn test_sfr_map_names() {
        assert_eq!(SFR_MAP[SFR_ACC as usize].name, "ACC");
        assert_eq!(SFR_MAP[SFR_IE as usize].name, "IE");
        assert!(SFR_MAP[SFR_PSW as usize].bit_addressable);
        assert!(!SFR_MAP[SFR_SBUF as usize].bit_addressable);
    }

    #[test]
    fn test_interrupt_enable_mask_layout() {
        // The NVIC relies on the individual enable bits occupying the low
        // five positions in priority order.
        assert_eq!(Ie::EX0.bits(), 1 << 0);
        assert_eq!(Ie::ET0.bits(), 1 << 1);
        assert_eq!(Ie::EX1.bits(), 1 << 2);
        assert_eq!(Ie::ET1.bits(), 1 << 3);
        assert_eq!(Ie::ES.bits(), 1 << 4);
    }
}
