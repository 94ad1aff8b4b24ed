use packed_bitvec::{BitVector, BitVectorError};

// A driver-side register of output pins, kept as an opaque flag container.
struct OutputPins {
    high: BitVector,
}

impl OutputPins {
    fn new() -> Self {
        Self {
            high: BitVector::new(),
        }
    }

    fn drive(&mut self, pin: usize, level: bool) {
        self.high.set_value(pin, level);
    }

    fn drive_bank(&mut self, first: usize, last: usize, level: bool) -> Result<(), BitVectorError> {
        self.high.set_value_range(first..last + 1, level)
    }

    fn first_idle(&self) -> usize {
        self.high.next_clear_bit(0)
    }
}

fn main() {
    let mut pins = OutputPins::new();
    pins.drive(17, true);
    pins.drive_bank(0, 7, true).unwrap();
    pins.drive(3, false);

    assert_eq!(pins.first_idle(), 3);
    assert_eq!(pins.high.to_set_notation(), "{0, 1, 2, 4, 5, 6, 7, 17}");

    let mut bank = BitVector::new();
    bank.set_range(0..8).unwrap();
    assert!(pins.high.intersects(&bank));
    assert!(!pins.high.contains_all(&bank));
}
