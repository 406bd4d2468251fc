use crate::mcs51::Mcs51;
use crate::sfr::{SFR_ACC, SFR_DPH, SFR_DPL};

// The MOV family. Direct-addressed operands go through the hook-firing
// accessors; @Ri operands use the indirect translation and never touch the
// hooks; Rn operands resolve through the current register bank.
impl Mcs51 {
    pub(crate) fn handle_mov_a_immed(&mut self) {
        let immed = self.pc_read_u8();
        self.data[SFR_ACC as usize] = immed;
    }

    pub(crate) fn handle_mov_a_direct(&mut self) {
        let direct = self.pc_read_u8();
        self.data[SFR_ACC as usize] = self.read_direct(direct);
    }

    pub(crate) fn handle_mov_a_at_ri(&mut self) {
        let n = self.instruction_register.opcode.code & 0x01;
        self.data[SFR_ACC as usize] = self.read_indirect(self.rn(n));
    }

    pub(crate) fn handle_mov_a_rn(&mut self) {
        let n = self.instruction_register.opcode.code & 0x07;
        self.data[SFR_ACC as usize] = self.rn(n);
    }

    pub(crate) fn handle_mov_rn_immed(&mut self) {
        let immed = self.pc_read_u8();
        let n = self.instruction_register.opcode.code & 0x07;
        *self.rn_mut(n) = immed;
    }

    pub(crate) fn handle_mov_rn_direct(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.read_direct(direct);
        let n = self.instruction_register.opcode.code & 0x07;
        *self.rn_mut(n) = value;
    }

    pub(crate) fn handle_mov_rn_a(&mut self) {
        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.data[SFR_ACC as usize];
        *self.rn_mut(n) = value;
    }

    pub(crate) fn handle_mov_direct_immed(&mut self) {
        let direct = self.pc_read_u8();
        let immed = self.pc_read_u8();
        self.write_direct(direct, immed);
    }

    pub(crate) fn handle_mov_direct_a(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.data[SFR_ACC as usize];
        self.write_direct(direct, value);
    }

    pub(crate) fn handle_mov_direct_rn(&mut self) {
        let direct = self.pc_read_u8();
        let n = self.instruction_register.opcode.code & 0x07;
        let value = self.rn(n);
        self.write_direct(direct, value);
    }

    pub(crate) fn handle_mov_direct_at_ri(&mut self) {
        let direct = self.pc_read_u8();
        let n = self.instruction_register.opcode.code & 0x01;
        let value = self.read_indirect(self.rn(n));
        self.write_direct(direct, value);
    }

    /// Fires the read hook of the source and the write hook of the
    /// destination within the same instruction.
    pub(crate) fn handle_mov_direct_direct(&mut self) {
        let direct1 = self.pc_read_u8();
        let direct2 = self.pc_read_u8();
        let value = self.read_direct(direct2);
        self.write_direct(direct1, value);
    }

    pub(crate) fn handle_mov_at_ri_immed(&mut self) {
        let immed = self.pc_read_u8();
        let n = self.instruction_register.opcode.code & 0x01;
        let address = self.rn(n);
        self.write_indirect(address, immed);
    }

    pub(crate) fn handle_mov_at_ri_a(&mut self) {
        let n = self.instruction_register.opcode.code & 0x01;
        let address = self.rn(n);
        let value = self.data[SFR_ACC as usize];
        self.write_indirect(address, value);
    }

    pub(crate) fn handle_mov_at_ri_direct(&mut self) {
        let direct = self.pc_read_u8();
        let value = self.read_direct(direct);
        let n = self.instruction_register.opcode.code & 0x01;
        let address = self.rn(n);
        self.write_indirect(address, value);
    }

    pub(crate) fn handle_mov_dptr_immed(&mut self) {
        let immed = self.pc_read_u16();

        self.data[SFR_DPL as usize] = immed as u8;
        self.data[SFR_DPH as usize] = (immed >> 8) as u8;
    }

    pub(crate) fn handle_mov_c_bit(&mut self) {
        let bit = self.pc_read_u8();

        let mask = Self::bit_mask(bit);
        let byte_idx = Self::bit_byte_index(bit);

        let set = self.data[byte_idx as usize] & mask != 0;
        self.set_carry(set);
    }
}
