use crate::mcs51::Mcs51;
use crate::sfr::{Psw, SFR_ACC, SFR_B, SFR_PSW};

impl Mcs51 {
    /// Multiplies the unsigned 8-bit integers in the accumulator and the B
    /// register into a 16-bit product: low byte into ACC, high byte into B.
    /// OV is set iff the product exceeds 0xFF; the carry flag is always
    /// cleared.
    pub(crate) fn handle_mul_ab(&mut self) {
        let product =
            u16::from(self.data[SFR_ACC as usize]) * u16::from(self.data[SFR_B as usize]);

        self.data[SFR_ACC as usize] = product as u8;
        self.data[SFR_B as usize] = (product >> 8) as u8;

        if product > 0xFF {
            self.data[SFR_PSW as usize] |= Psw::OV.bits();
        } else {
            self.data[SFR_PSW as usize] &= !Psw::OV.bits();
        }

        self.data[SFR_PSW as usize] &= !Psw::CY.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_small_product_clears_ov() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x0A;
        p.data[SFR_B as usize] = 0x0B;
        p.data[SFR_PSW as usize] = (Psw::OV | Psw::CY).bits();
        p.handle_mul_ab();

        assert_eq!(p.data[SFR_ACC as usize], 0x6E); // 110
        assert_eq!(p.data[SFR_B as usize], 0x00);
        assert_eq!(p.data[SFR_PSW as usize] & Psw::OV.bits(), 0);
        assert!(!p.get_carry());
    }

    #[test]
    fn test_mul_wide_product_sets_ov() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x50; // 80
        p.data[SFR_B as usize] = 0xA0; // 160 -> 12800 = 0x3200
        p.handle_mul_ab();

        assert_eq!(p.data[SFR_ACC as usize], 0x00);
        assert_eq!(p.data[SFR_B as usize], 0x32);
        assert_ne!(p.data[SFR_PSW as usize] & Psw::OV.bits(), 0);
        assert!(!p.get_carry());
    }
}
