//! Numeric evaluation of a generated multiplier. Every partial product,
//! adder and passthrough is simulated for concrete operand values, so the
//! reduction can be checked value-for-value rather than symbolically.

use num_traits::{One as _, Zero as _};

use crate::Multiplier;
use crate::assemble::sign_bit;
use crate::net::{AdderId, Bit, PassId};
use crate::partial::{Mode, complement};

pub struct Evaluator<'a> {
	multiplier: &'a Multiplier,
	mode: Mode,
	a: Vec<bool>,
	b: Vec<bool>,
	adders: std::collections::BTreeMap<AdderId, &'a [Bit]>,
	passes: std::collections::BTreeMap<PassId, Bit>,
}

impl<'a> Evaluator<'a> {
	/// Binds a generated multiplier to concrete operand values. Operands are
	/// taken modulo `2^W`.
	pub fn new(
		multiplier: &'a Multiplier,
		mode: Mode,
		a: &num_bigint::BigUint,
		b: &num_bigint::BigUint,
	) -> Self {
		let adders = multiplier.full_adders.iter()
			.map(|adder| (adder.id(), &adder.inputs[..]))
			.chain(multiplier.half_adders.iter().map(|adder| (adder.id(), &adder.inputs[..])))
			.collect();
		let passes = multiplier.passes.iter()
			.map(|pass| (pass.id, pass.input))
			.collect();

		Self {
			multiplier,
			mode,
			a: operand_bits(a, multiplier.width),
			b: operand_bits(b, multiplier.width),
			adders,
			passes,
		}
	}

	/// The value of the emitted `p` output: both final vectors plus the
	/// sign-correction vector, truncated to `2W` bits.
	pub fn product(&self) -> num_bigint::BigUint {
		let width = usize::from(self.multiplier.width);

		let mut product = num_bigint::BigUint::zero();
		for vector in [&self.multiplier.vector_a, &self.multiplier.vector_b] {
			for (weight, slot) in vector.iter().enumerate() {
				if let Some(bit) = *slot && self.bit(bit) {
					product += num_bigint::BigUint::one() << weight;
				}
			}
		}
		for weight in 0..2 * width {
			if sign_bit(width, weight).active(self.mode) {
				product += num_bigint::BigUint::one() << weight;
			}
		}

		product & ((num_bigint::BigUint::one() << (2 * width)) - num_bigint::BigUint::one())
	}

	/// The weighted sum of every occupied slot, computed for each retained
	/// layer snapshot in order. The reduction is value-preserving, so all
	/// entries are equal.
	pub fn layer_values(&self) -> Vec<num_bigint::BigUint> {
		self.multiplier.layers.iter().map(|layer| self.layer_value(layer)).collect()
	}

	fn layer_value(&self, layer: &[Vec<Bit>]) -> num_bigint::BigUint {
		let mut value = num_bigint::BigUint::zero();
		for (weight, column) in layer.iter().enumerate() {
			for &bit in column {
				if self.bit(bit) {
					value += num_bigint::BigUint::one() << weight;
				}
			}
		}
		value
	}

	fn bit(&self, bit: Bit) -> bool {
		match bit {
			Bit::Partial { row, col } => {
				let value = self.a[col] & self.b[row];
				let width = usize::from(self.multiplier.width);
				if complement(width, row, col).active(self.mode) { !value } else { value }
			},
			Bit::Pass(id) => self.bit(self.passes[&id]),
			Bit::Sum(id) => self.adder_count(id) & 1 != 0,
			Bit::Carry(id) => self.adder_count(id) >= 2,
		}
	}

	fn adder_count(&self, id: AdderId) -> u8 {
		self.adders[&id].iter().map(|&input| u8::from(self.bit(input))).sum()
	}
}

fn operand_bits(value: &num_bigint::BigUint, width: u8) -> Vec<bool> {
	(0..u64::from(width)).map(|i| value.bit(i)).collect()
}

#[cfg(test)]
mod tests {
	use super::Evaluator;
	use crate::{Mode, Multiplier};

	fn product(multiplier: &Multiplier, mode: Mode, a: u64, b: u64) -> num_bigint::BigUint {
		Evaluator::new(multiplier, mode, &a.into(), &b.into()).product()
	}

	// The product the generated hardware must compute: both operands
	// truncated to `width` bits, interpreted per mode, result in `2 * width`
	// bit two's complement.
	fn expected(width: u32, mode: Mode, a: u64, b: u64) -> num_bigint::BigUint {
		#[allow(clippy::cast_possible_wrap)]
		fn interpret(width: u32, signed: bool, value: u64) -> i64 {
			let value = value & ((1 << width) - 1);
			if signed && value >> (width - 1) != 0 {
				(value as i64) - (1_i64 << width)
			}
			else {
				value as i64
			}
		}

		let a = interpret(width, mode.a_is_signed(), a);
		let b = interpret(width, mode.b_is_signed(), b);
		#[allow(clippy::cast_sign_loss)]
		let product = (a.wrapping_mul(b) as u64) & ((1 << (2 * width)) - 1);
		product.into()
	}

	#[test]
	fn four_bit_spot_checks() {
		let multiplier = Multiplier::generate(4).unwrap();

		// 11 * 6 == 66, unsigned.
		assert_eq!(product(&multiplier, Mode::UnsignedUnsigned, 0b1011, 0b0110), 66_u32.into());
		// -1 * 1 == -1 in 8-bit two's complement.
		assert_eq!(product(&multiplier, Mode::SignedSigned, 0b1111, 0b0001), 0xffff_u32.into());
		// -1 * 15 == -15, signed * unsigned.
		assert_eq!(product(&multiplier, Mode::SignedUnsigned, 0b1111, 0b1111), 0xfff1_u32.into());
	}

	#[test]
	fn four_bit_exhaustive() {
		let multiplier = Multiplier::generate(4).unwrap();
		for a in 0..16_u64 {
			for b in 0..16_u64 {
				for mode in Mode::ALL {
					assert_eq!(
						product(&multiplier, mode, a, b),
						expected(4, mode, a, b),
						"a={a} b={b} mode={mode:?}",
					);
				}
			}
		}
	}

	#[test]
	fn two_bit_exhaustive() {
		let multiplier = Multiplier::generate(2).unwrap();
		for a in 0..4_u64 {
			for b in 0..4_u64 {
				for mode in Mode::ALL {
					assert_eq!(
						product(&multiplier, mode, a, b),
						expected(2, mode, a, b),
						"a={a} b={b} mode={mode:?}",
					);
				}
			}
		}
	}

	#[test]
	fn wider_widths() {
		static TESTS: &[(u64, u64)] = &[
			(0, 0),
			(1, 1),
			(3, 250),
			(85, 170),
			(127, 129),
			(128, 128),
			(200, 100),
			(255, 255),
		];
		for width in [8_u8, 16] {
			let multiplier = Multiplier::generate(width).unwrap();
			for &(a, b) in TESTS {
				for mode in Mode::ALL {
					assert_eq!(
						product(&multiplier, mode, a, b),
						expected(width.into(), mode, a, b),
						"width={width} a={a} b={b} mode={mode:?}",
					);
				}
			}
		}
	}

	#[test]
	fn value_preservation() {
		static OPERANDS: &[(u64, u64)] = &[(0, 0), (1, 1), (5, 10), (9, 13), (11, 6), (15, 15)];
		for width in [4_u8, 6, 8] {
			let multiplier = Multiplier::generate(width).unwrap();
			for &(a, b) in OPERANDS {
				for mode in Mode::ALL {
					let evaluator = Evaluator::new(&multiplier, mode, &a.into(), &b.into());
					let values = evaluator.layer_values();
					for (i, value) in values.iter().enumerate().skip(1) {
						assert_eq!(
							*value,
							values[0],
							"width={width} a={a} b={b} mode={mode:?} layer={i}",
						);
					}
				}
			}
		}
	}
}
