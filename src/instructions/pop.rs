use crate::mcs51::Mcs51;

impl Mcs51 {
    pub(crate) fn handle_pop_direct(&mut self) {
        let direct = self.pc_read_u8();

        let value = self.pop_u8();
        self.write_direct(direct, value);
    }
}
