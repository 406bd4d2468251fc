use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    pub(crate) fn handle_anl_a_immed(&mut self) {
        let immed = self.pc_read_u8();
        self.data[SFR_ACC as usize] &= immed;
    }

    pub(crate) fn handle_anl_a_direct(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.read_direct(direct);
        self.data[SFR_ACC as usize] &= value;
    }

    pub(crate) fn handle_anl_a_at_ri(&mut self) {
        let n = self.instruction_register.opcode.code & 0x01;
        let value = self.read_indirect(self.rn(n));
        self.data[SFR_ACC as usize] &= value;
    }

    pub(crate) fn handle_anl_a_rn(&mut self) {
        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.rn(n);
        self.data[SFR_ACC as usize] &= value;
    }

    pub(crate) fn handle_anl_direct_a(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.data[direct as usize] & self.data[SFR_ACC as usize];
        self.write_direct(direct, value);
    }

    pub(crate) fn handle_anl_direct_immed(&mut self) {
        let direct = self.pc_read_u8();
        let immed = self.pc_read_u8();
        let value = self.data[direct as usize] & immed;
        self.write_direct(direct, value);
    }

    /// C <- C AND NOT bit. The addressed bit is read only, never written.
    pub(crate) fn handle_anl_c_not_bit(&mut self) {
        let bit = self.pc_read_u8();

        let mask = Self::bit_mask(bit);
        let byte_idx = Self::bit_byte_index(bit);

        let set = self.data[byte_idx as usize] & mask != 0;
        let carry = self.get_carry() && !set;
        self.set_carry(carry);
    }
}
