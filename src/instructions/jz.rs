use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    pub(crate) fn handle_jz(&mut self) {
        let offset = self.pc_read_i8();

        if self.data[SFR_ACC as usize] == 0 {
            self.pc = self.pc.wrapping_add(offset as u16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jz_branches_on_zero_acc() {
        let mut p = Mcs51::new();
        p.init();

        p.code[0] = 0x10;
        p.handle_jz();
        assert_eq!(p.pc, 0x11);
    }

    #[test]
    fn test_jz_falls_through_on_nonzero_acc() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0x01;
        p.code[0] = 0x10;
        p.handle_jz();
        assert_eq!(p.pc, 0x01);
    }
}
