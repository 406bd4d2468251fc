use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    pub(crate) fn handle_swap_a(&mut self) {
        let acc = self.data[SFR_ACC as usize];
        self.data[SFR_ACC as usize] = (acc >> 4) | (acc << 4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_exchanges_nibbles() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x5A;
        p.handle_swap_a();
        assert_eq!(p.data[SFR_ACC as usize], 0xA5);

        p.handle_swap_a();
        assert_eq!(p.data[SFR_ACC as usize], 0x5A);
    }
}
