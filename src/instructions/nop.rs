use crate::mcs51::Mcs51;

impl Mcs51 {
    pub(crate) fn handle_nop(&mut self) {}
}
