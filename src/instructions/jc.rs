use crate::mcs51::Mcs51;

impl Mcs51 {
    pub(crate) fn handle_jc(&mut self) {
        let offset = self.pc_read_i8();

        if self.get_carry() {
            self.pc = self.pc.wrapping_add(offset as u16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jc_branches_only_with_carry() {
        let mut p = Mcs51::new();
        p.init();

        p.code[0] = 0x10;
        p.code[1] = 0x10;
        p.handle_jc();
        assert_eq!(p.pc, 0x01);

        p.set_carry(true);
        p.handle_jc();
        assert_eq!(p.pc, 0x12);
    }
}
