use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

// Compare and jump if not equal. Branches on inequality and leaves the
// carry flag set iff the left operand is below the right one, so code can
// follow up with JC/JNC for a three-way decision.
impl Mcs51 {
    fn cjne(&mut self, left: u8, right: u8, offset: i8) {
        if left != right {
            self.pc = self.pc.wrapping_add(offset as u16);
        }
        self.set_carry(left < right);
    }

    pub(crate) fn handle_cjne_a_immed(&mut self) {
        let immed = self.pc_read_u8();
        let offset = self.pc_read_i8();

        let acc = self.data[SFR_ACC as usize];
        self.cjne(acc, immed, offset);
    }

    pub(crate) fn handle_cjne_a_direct(&mut self) {
        let direct = self.pc_read_u8();
        let offset = self.pc_read_i8();

        let value = self.read_direct(direct);
        let acc = self.data[SFR_ACC as usize];
        self.cjne(acc, value, offset);
    }

    pub(crate) fn handle_cjne_at_ri_immed(&mut self) {
        let immed = self.pc_read_u8();
        let offset = self.pc_read_i8();

        let n = self.instruction_register.opcode.code & 0x01;
        let at = self.read_indirect(self.rn(n));
        self.cjne(at, immed, offset);
    }

    pub(crate) fn handle_cjne_rn_immed(&mut self) {
        let immed = self.pc_read_u8();
        let offset = self.pc_read_i8();

        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.rn(n);
        self.cjne(value, immed, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjne_branches_on_inequality() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x10;
        p.code[0] = 0x20; // immed
        p.code[1] = 0x05; // offset
        p.handle_cjne_a_immed();

        assert_eq!(p.pc, 2 + 5);
        assert!(p.get_carry()); // 0x10 < 0x20
    }

    #[test]
    fn test_cjne_falls_through_on_equality() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x20;
        p.code[0] = 0x20;
        p.code[1] = 0x05;
        p.handle_cjne_a_immed();

        assert_eq!(p.pc, 2);
        assert!(!p.get_carry());
    }

    #[test]
    fn test_cjne_rn_negative_offset() {
        let mut p = Mcs51::new();
        p.init();

        p.pc = 0x10;
        p.data[0x02] = 0x01; // bank 0 R2
        p.code[0x10] = 0x00; // immed
        p.code[0x11] = 0xFC; // offset -4
        p.instruction_register.opcode.code = 0xBA; // CJNE R2, #immed, offset
        p.handle_cjne_rn_immed();

        assert_eq!(p.pc, 0x12 - 4);
        assert!(!p.get_carry());
    }
}
