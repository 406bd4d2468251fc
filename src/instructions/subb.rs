use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    /// A <- A - C - value, with C set afterwards iff a borrow occurred.
    fn subb_from_acc(&mut self, value: u8) {
        let acc = self.data[SFR_ACC as usize];
        let carry = u8::from(self.get_carry());

        let underflow = u16::from(acc) < u16::from(carry) + u16::from(value);

        self.data[SFR_ACC as usize] = acc.wrapping_sub(carry).wrapping_sub(value);
        self.set_carry(underflow);
    }

    pub(crate) fn handle_subb_a_immed(&mut self) {
        let immed = self.pc_read_u8();
        self.subb_from_acc(immed);
    }

    pub(crate) fn handle_subb_a_direct(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.read_direct(direct);
        self.subb_from_acc(value);
    }

    pub(crate) fn handle_subb_a_at_ri(&mut self) {
        let n = self.instruction_register.opcode.code & 0x01;
        let value = self.read_indirect(self.rn(n));
        self.subb_from_acc(value);
    }

    pub(crate) fn handle_subb_a_rn(&mut self) {
        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.rn(n);
        self.subb_from_acc(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subb_without_borrow() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x10;
        p.data[0x06] = 0x05; // bank 0 R6
        p.instruction_register.opcode.code = 0x9E; // SUBB A, R6
        p.handle_subb_a_rn();

        assert_eq!(p.data[SFR_ACC as usize], 0x0B);
        assert!(!p.get_carry());
    }

    #[test]
    fn test_subb_sets_borrow() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0xAB;
        p.data[0x06] = 0xDD;
        p.instruction_register.opcode.code = 0x9E;
        p.handle_subb_a_rn();

        assert_eq!(p.data[SFR_ACC as usize], 0xCE);
        assert!(p.get_carry());
    }

    #[test]
    fn test_subb_consumes_incoming_borrow() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0xCD;
        p.data[0x07] = 0x35; // bank 0 R7
        p.set_carry(true);
        p.instruction_register.opcode.code = 0x9F; // SUBB A, R7
        p.handle_subb_a_rn();

        assert_eq!(p.data[SFR_ACC as usize], 0x97);
        assert!(!p.get_carry());
    }

    #[test]
    fn test_subb_borrow_on_equal_operands_with_carry() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x42;
        p.set_carry(true);
        p.code[0] = 0x42;
        p.handle_subb_a_immed();

        // 0x42 - 1 - 0x42 borrows
        assert_eq!(p.data[SFR_ACC as usize], 0xFF);
        assert!(p.get_carry());
    }
}
