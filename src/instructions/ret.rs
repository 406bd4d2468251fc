use crate::mcs51::Mcs51;

impl Mcs51 {
    pub(crate) fn handle_ret(&mut self) {
        self.pc = self.pop_u16();
    }
}
