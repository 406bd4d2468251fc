use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    pub(crate) fn handle_xrl_a_immed(&mut self) {
        let immed = self.pc_read_u8();
        self.data[SFR_ACC as usize] ^= immed;
    }

    pub(crate) fn handle_xrl_a_direct(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.read_direct(direct);
        self.data[SFR_ACC as usize] ^= value;
    }

    pub(crate) fn handle_xrl_a_at_ri(&mut self) {
        let n = self.instruction_register.opcode.code & 0x01;
        let value = self.read_indirect(self.rn(n));
        self.data[SFR_ACC as usize] ^= value;
    }

    pub(crate) fn handle_xrl_a_rn(&mut self) {
        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.rn(n);
        self.data[SFR_ACC as usize] ^= value;
    }

    pub(crate) fn handle_xrl_direct_a(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.data[direct as usize] ^ self.data[SFR_ACC as usize];
        self.write_direct(direct, value);
    }

    pub(crate) fn handle_xrl_direct_immed(&mut self) {
        let direct = self.pc_read_u8();
        let immed = self.pc_read_u8();
        let value = self.data[direct as usize] ^ immed;
        self.write_direct(direct, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xrl_a_immed_self_inverse() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x5A;
        p.code[0] = 0xFF;
        p.code[1] = 0xFF;
        p.handle_xrl_a_immed();
        assert_eq!(p.data[SFR_ACC as usize], 0xA5);

        p.handle_xrl_a_immed();
        assert_eq!(p.data[SFR_ACC as usize], 0x5A);
    }
}
