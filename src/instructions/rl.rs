use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    /// Rotate the accumulator left by one position, bit 7 into bit 0. The
    /// carry flag is not involved (RLC would rotate through it).
    pub(crate) fn handle_rl_a(&mut self) {
        let acc = self.data[SFR_ACC as usize];
        self.data[SFR_ACC as usize] = acc.rotate_left(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rl_rotates_msb_into_lsb() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0b1000_0001;
        p.handle_rl_a();
        assert_eq!(p.data[SFR_ACC as usize], 0b0000_0011);
        assert!(!p.get_carry());
    }
}
