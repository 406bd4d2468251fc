use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    /// Table lookup from program memory: A <- CODE[A + DPTR].
    pub(crate) fn handle_movc_a_at_a_plus_dptr(&mut self) {
        let address = self.dptr().wrapping_add(u16::from(self.data[SFR_ACC as usize]));
        self.data[SFR_ACC as usize] = self.code[address as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sfr::{SFR_DPH, SFR_DPL};

    #[test]
    fn test_movc_indexes_code_by_a_plus_dptr() {
        let mut p = Mcs51::new();
        p.init();

        p.code[0x0105] = 0x99;
        p.data[SFR_DPH as usize] = 0x01;
        p.data[SFR_DPL as usize] = 0x00;
        p.data[SFR_ACC as usize] = 0x05;

        p.handle_movc_a_at_a_plus_dptr();
        assert_eq!(p.data[SFR_ACC as usize], 0x99);
    }
}
