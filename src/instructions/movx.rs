use crate::mcs51::Mcs51;
use crate::sfr::SFR_ACC;

// External data memory access through the 16-bit data pointer.
impl Mcs51 {
    pub(crate) fn handle_movx_a_at_dptr(&mut self) {
        let dptr = self.dptr();
        self.data[SFR_ACC as usize] = self.xdata[dptr as usize];
    }

    pub(crate) fn handle_movx_at_dptr_a(&mut self) {
        let dptr = self.dptr();
        self.xdata[dptr as usize] = self.data[SFR_ACC as usize];
    }
}
