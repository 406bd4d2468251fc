use crate::mcs51::Mcs51;

impl Mcs51 {
    pub(crate) fn handle_setb_c(&mut self) {
        self.set_carry(true);
    }

    pub(crate) fn handle_setb_bit(&mut self) {
        let bit = self.pc_read_u8();

        let mask = Self::bit_mask(bit);
        let byte_idx = Self::bit_byte_index(bit);

        let value = self.data[byte_idx as usize] | mask;
        self.write_direct(byte_idx, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sfr::SFR_IE;

    #[test]
    fn test_setb_bit_in_data_region() {
        let mut p = Mcs51::new();
        p.init();

        p.code[0] = 0x0F; // bit 7 of 0x21
        p.handle_setb_bit();
        assert_eq!(p.data[0x21], 0x80);
    }

    #[test]
    fn test_setb_ea_flags_ie_access() {
        let mut p = Mcs51::new();
        p.init();

        p.code[0] = 0xAF; // EA, bit 7 of IE
        p.handle_setb_bit();
        assert_eq!(p.data[SFR_IE as usize], 0x80);
        // The write went through the IE hook
        assert!(p.instruction_register.accessed_sfr_ie);
    }
}
