//! Partial-product construction. One shared array of `W * W` AND terms
//! serves all three sign interpretations: terms on the sign boundary are
//! conditionally complemented by the mode selector, and the assembler's
//! sign-correction vector supplies the matching two's-complement offsets.

use crate::net::Bit;

/// The live encodings of the 2-bit `mul_type` selector. `2'b11` is reserved
/// and deliberately unrepresentable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
	/// `2'b00`, both operands unsigned.
	UnsignedUnsigned,
	/// `2'b01`, both operands signed.
	SignedSigned,
	/// `2'b10`, operand `a` signed, operand `b` unsigned.
	SignedUnsigned,
}

impl Mode {
	pub const ALL: [Self; 3] = [Self::UnsignedUnsigned, Self::SignedSigned, Self::SignedUnsigned];

	pub fn selector(self) -> u8 {
		match self {
			Self::UnsignedUnsigned => 0b00,
			Self::SignedSigned => 0b01,
			Self::SignedUnsigned => 0b10,
		}
	}

	pub(crate) fn a_is_signed(self) -> bool {
		match self {
			Self::UnsignedUnsigned => false,
			Self::SignedSigned | Self::SignedUnsigned => true,
		}
	}

	pub(crate) fn b_is_signed(self) -> bool {
		match self {
			Self::UnsignedUnsigned | Self::SignedUnsigned => false,
			Self::SignedSigned => true,
		}
	}
}

/// When a partial product is emitted complemented instead of plain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Complement {
	Never,
	/// Terms `a[W-1] & b[row]`, `row < W-1`.
	IfASigned,
	/// Terms `a[col] & b[W-1]`, `col < W-1`.
	IfBSigned,
	/// The corner term `a[W-1] & b[W-1]`, complemented only when exactly one
	/// operand is signed.
	IfMixed,
}

impl Complement {
	pub(crate) fn active(self, mode: Mode) -> bool {
		match self {
			Self::Never => false,
			Self::IfASigned => mode.a_is_signed(),
			Self::IfBSigned => mode.b_is_signed(),
			Self::IfMixed => mode.a_is_signed() && !mode.b_is_signed(),
		}
	}
}

pub(crate) fn complement(width: usize, row: usize, col: usize) -> Complement {
	match (row == width - 1, col == width - 1) {
		(false, false) => Complement::Never,
		(false, true) => Complement::IfASigned,
		(true, false) => Complement::IfBSigned,
		(true, true) => Complement::IfMixed,
	}
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PartialProduct {
	pub(crate) row: usize,
	pub(crate) col: usize,
	pub(crate) complement: Complement,
}

impl PartialProduct {
	pub(crate) fn bit(&self) -> Bit {
		Bit::Partial { row: self.row, col: self.col }
	}
}

/// Builds the initial reduction array, one column per weight `0..=2W-2`,
/// with the term for `(row, col)` occupying column `row + col`.
pub(crate) fn build(width: usize) -> (Vec<Vec<Bit>>, Vec<PartialProduct>) {
	let mut columns = vec![Vec::new(); 2 * width - 1];
	let mut partials = Vec::with_capacity(width * width);

	for row in 0..width {
		for col in 0..width {
			let partial = PartialProduct { row, col, complement: complement(width, row, col) };
			columns[row + col].push(partial.bit());
			partials.push(partial);
		}
	}

	(columns, partials)
}
