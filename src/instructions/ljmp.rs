use crate::mcs51::Mcs51;

impl Mcs51 {
    pub(crate) fn handle_ljmp(&mut self) {
        let addr16 = self.pc_read_u16();
        self.pc = addr16;
    }
}
