use crate::mcs51::Mcs51;

impl Mcs51 {
    pub(crate) fn handle_push_direct(&mut self) {
        let direct = self.pc_read_u8();

        let value = self.read_direct(direct);
        self.push_u8(value);
    }
}
