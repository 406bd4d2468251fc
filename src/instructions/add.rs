use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    fn add_to_acc(&mut self, value: u8) {
        self.data[SFR_ACC as usize] = self.data[SFR_ACC as usize].wrapping_add(value);
    }

    pub(crate) fn handle_add_a_immed(&mut self) {
        let immed = self.pc_read_u8();
        self.add_to_acc(immed);
    }

    pub(crate) fn handle_add_a_direct(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.read_direct(direct);
        self.add_to_acc(value);
    }

    pub(crate) fn handle_add_a_at_ri(&mut self) {
        let n = self.instruction_register.opcode.code & 0x01;
        let value = self.read_indirect(self.rn(n));
        self.add_to_acc(value);
    }

    pub(crate) fn handle_add_a_rn(&mut self) {
        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.rn(n);
        self.add_to_acc(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_a_immed() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x10;
        p.code[0] = 0x32;
        p.handle_add_a_immed();
        assert_eq!(p.data[SFR_ACC as usize], 0x42);
    }

    #[test]
    fn test_add_a_rn_wraps() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0xF0;
        p.data[0x02] = 0x20; // bank 0 R2
        p.instruction_register.opcode.code = 0x2A; // ADD A, R2
        p.handle_add_a_rn();
        assert_eq!(p.data[SFR_ACC as usize], 0x10);
    }

    #[test]
    fn test_add_a_direct_reads_through_hook_path() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x01;
        p.data[0x40] = 0x02;
        p.code[0] = 0x40;
        p.handle_add_a_direct();
        assert_eq!(p.data[SFR_ACC as usize], 0x03);
    }
}
