use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    pub(crate) fn handle_dec_a(&mut self) {
        self.data[SFR_ACC as usize] = self.data[SFR_ACC as usize].wrapping_sub(1);
    }

    pub(crate) fn handle_dec_rn(&mut self) {
        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.rn(n).wrapping_sub(1);
        *self.rn_mut(n) = value;
    }

    pub(crate) fn handle_dec_direct(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.data[direct as usize].wrapping_sub(1);
        self.write_direct(direct, value);
    }

    pub(crate) fn handle_dec_at_ri(&mut self) {
        let n = self.instruction_register.opcode.code & 0x01;
        let address = self.rn(n);
        let value = self.read_indirect(address).wrapping_sub(1);
        self.write_indirect(address, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dec_rn_wraps() {
        let mut p = Mcs51::new();
        p.init();

        p.instruction_register.opcode.code = 0x18; // DEC R0
        p.handle_dec_rn();
        assert_eq!(p.data[0x00], 0xFF);
    }

    #[test]
    fn test_dec_direct() {
        let mut p = Mcs51::new();
        p.init();

        p.data[0x30] = 0x10;
        p.code[0] = 0x30;
        p.handle_dec_direct();
        assert_eq!(p.data[0x30], 0x0F);
        assert_eq!(p.pc, 1);
    }
}
