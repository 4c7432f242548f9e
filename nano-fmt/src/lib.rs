#![no_std]

/// Writer trait for resource constrained systems.
pub trait NanoWrite {
    /// Write a byte to the writer.
    fn write_byte(&mut self, b: u8);

    /// Write all bytes of `bytes` in order.
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

/// Display trait for resource constrained systems.
pub trait NanoDisplay {
    /// Write formatted representation of `self` to `f`.
    fn fmt<F: NanoWrite>(self, f: &mut F);
}

impl NanoDisplay for &str {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        f.write_bytes(self.as_bytes());
    }
}

/// Unsigned value printed with leading zeroes up to `WIDTH` digits.
///
/// Values with more digits than `WIDTH` are printed in full.
#[derive(Clone, Copy)]
pub struct ZeroPad<T, const WIDTH: u8>(pub T);

/// Implement NanoDisplay for an unsigned type and its zero padded form.
macro_rules! display_unsigned {
    ($ty:ident) => {
        impl $crate::NanoDisplay for $ty {
            fn fmt<F: $crate::NanoWrite>(self, f: &mut F) {
                $crate::ZeroPad::<$ty, 1>(self).fmt(f);
            }
        }

        impl<const WIDTH: u8> $crate::NanoDisplay for $crate::ZeroPad<$ty, WIDTH> {
            fn fmt<F: $crate::NanoWrite>(self, f: &mut F) {
                const DIGITS: u32 = $ty::MAX.ilog10() + 1;

                let mut value = self.0;
                let mut div = <$ty>::pow(10, DIGITS - 1);
                let mut place = DIGITS;
                let mut print = false;

                while div > 0 {
                    let dig = (value / div) as u8;
                    value %= div;
                    div /= 10;

                    if dig > 0 || place <= WIDTH as u32 {
                        print = true;
                    }
                    place -= 1;

                    if print {
                        f.write_byte(b'0' + dig);
                    }
                }
            }
        }
    };
}

display_unsigned!(u8);
display_unsigned!(u16);
display_unsigned!(u32);
display_unsigned!(u64);
display_unsigned!(u128);
display_unsigned!(usize);
