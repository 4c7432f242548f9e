use crate::{
    control::{Control, EdgeConfigError, ExtInt},
    hal,
};

/// External interrupt controller for the three button lines.
pub struct ExtInts {
    p: hal::pac::EXINT,
}

impl ExtInts {
    #[must_use]
    pub fn new(p: hal::pac::EXINT) -> Self {
        Self { p }
    }

    /// Set up the sense control of every button line and enable them.
    pub fn configure(&mut self) -> Result<(), EdgeConfigError> {
        for control in Control::ALL {
            let binding = control.binding();
            let isc = binding.line.sense_control(binding.edge)?.field();

            // Changing ISC2 can raise a spurious request, keep the line
            // disabled while it is written.
            self.disable(binding.line);
            match binding.line {
                // ISC01:00 / ISC11:10: 00 low level, 01 any change, 10 falling, 11 rising.
                ExtInt::Int0 => {
                    self.p.mcucr.modify(|_, w| w.isc0().bits(isc));
                }
                ExtInt::Int1 => {
                    self.p.mcucr.modify(|_, w| w.isc1().bits(isc));
                }
                // ISC2: 0 falling, 1 rising.
                ExtInt::Int2 => {
                    self.p.mcucsr.modify(|_, w| w.isc2().bit(isc != 0));
                }
            }
            self.clear(binding.line);
            self.enable(binding.line);
        }
        Ok(())
    }

    pub fn enable(&mut self, line: ExtInt) {
        self.p
            .gicr
            .modify(|r, w| unsafe { w.bits(r.bits() | line.enable_mask()) });
    }

    pub fn disable(&mut self, line: ExtInt) {
        self.p
            .gicr
            .modify(|r, w| unsafe { w.bits(r.bits() & !line.enable_mask()) });
    }

    /// Drop a pending request of `line`.
    pub fn clear(&self, line: ExtInt) {
        // Writing a one clears the flag, zeroes leave the other lines alone.
        self.p.gifr.write(|w| unsafe { w.bits(line.flag_mask()) });
    }
}
