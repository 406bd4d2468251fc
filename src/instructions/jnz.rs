use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

impl Mcs51 {
    pub(crate) fn handle_jnz(&mut self) {
        let offset = self.pc_read_i8();

        if self.data[SFR_ACC as usize] != 0 {
            self.pc = self.pc.wrapping_add(offset as u16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jnz_branches_on_nonzero_acc() {
        let mut p = Mcs51::new();
        p.init();

        p.data[SFR_ACC as usize] = 0xFF;
        p.code[0] = 0x08;
        p.handle_jnz();
        assert_eq!(p.pc, 0x09);
    }
}
