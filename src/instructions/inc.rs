use crate::mcs51::Mcs51;
use crate::sfr::{SFR_ACC, SFR_DPH, SFR_DPL};

impl Mcs51 {
    pub(crate) fn handle_inc_a(&mut self) {
        self.data[SFR_ACC as usize] = self.data[SFR_ACC as usize].wrapping_add(1);
    }

    pub(crate) fn handle_inc_rn(&mut self) {
        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.rn(n).wrapping_add(1);
        *self.rn_mut(n) = value;
    }

    pub(crate) fn handle_inc_direct(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.data[direct as usize].wrapping_add(1);
        self.write_direct(direct, value);
    }

    pub(crate) fn handle_inc_at_ri(&mut self) {
        let n = self.instruction_register.opcode.code & 0x01;
        let address = self.rn(n);
        let value = self.read_indirect(address).wrapping_add(1);
        self.write_indirect(address, value);
    }

    /// The data pointer is the only 16-bit increment the device has.
    pub(crate) fn handle_inc_dptr(&mut self) {
        let dpl = self.data[SFR_DPL as usize].wrapping_add(1);
        self.data[SFR_DPL as usize] = dpl;
        if dpl == 0 {
            self.data[SFR_DPH as usize] = self.data[SFR_DPH as usize].wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc_rn_decodes_register_from_opcode() {
        let mut p = Mcs51::new();
        p.init();

        p.data[0x06] = 0x41; // bank 0 R6
        p.instruction_register.opcode.code = 0x0E; // INC R6
        p.handle_inc_rn();
        assert_eq!(p.data[0x06], 0x42);
    }

    #[test]
    fn test_inc_a_wraps() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0xFF;
        p.handle_inc_a();
        assert_eq!(p.data[SFR_ACC as usize], 0x00);
    }

    #[test]
    fn test_inc_dptr_carries_into_dph() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_DPL as usize] = 0xFF;
        p.data[SFR_DPH as usize] = 0x12;
        p.handle_inc_dptr();
        assert_eq!(p.dptr(), 0x1300);
    }

    #[test]
    fn test_inc_at_ri_uses_indirect_translation() {
        let mut p = Mcs51::new();
        p.init();

        p.data[0x01] = 0x90; // R1 points above the SFR window
        p.data[0x110] = 0x07;
        p.instruction_register.opcode.code = 0x07; // INC @R1
        p.handle_inc_at_ri();
        assert_eq!(p.data[0x110], 0x08);
    }
}
