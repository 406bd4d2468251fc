use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    pub(crate) fn handle_clr_a(&mut self) {
        self.data[SFR_ACC as usize] = 0;
    }

    pub(crate) fn handle_clr_c(&mut self) {
        self.set_carry(false);
    }

    pub(crate) fn handle_clr_bit(&mut self) {
        let bit = self.pc_read_u8();

        let mask = Self::bit_mask(bit);
        let byte_idx = Self::bit_byte_index(bit);

        let value = self.data[byte_idx as usize] & !mask;
        self.write_direct(byte_idx, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sfr::SFR_TCON;

    #[test]
    fn test_clr_bit_in_data_region() {
        let mut p = Mcs51::new();
        p.init();

        p.data[0x20] = 0xFF;
        p.code[0] = 0x03; // bit 3 of 0x20
        p.handle_clr_bit();
        assert_eq!(p.data[0x20], 0xF7);
    }

    #[test]
    fn test_clr_bit_in_sfr_region() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_TCON as usize] = 0xFF;
        p.code[0] = 0x8C; // TR0, bit 4 of TCON
        p.handle_clr_bit();
        assert_eq!(p.data[SFR_TCON as usize], 0xEF);
    }
}
