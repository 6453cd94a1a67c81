//! Collapses the terminal two-row array into the two addend vectors and
//! models the sign-correction vector whose three mode-dependent bits fix up
//! the two's-complement boundary terms.

use crate::Error;
use crate::net::Bit;
use crate::partial::Mode;

/// The two final addends, indexed by weight `0..=2W-2`. `None` is an absent
/// slot, emitted (and evaluated) as a constant zero.
pub(crate) struct FinalVectors {
	pub(crate) row0: Vec<Option<Bit>>,
	pub(crate) row1: Vec<Option<Bit>>,
}

pub(crate) fn final_vectors(layer: usize, terminal: &[Vec<Bit>]) -> Result<FinalVectors, Error> {
	let mut vectors = FinalVectors {
		row0: Vec::with_capacity(terminal.len()),
		row1: Vec::with_capacity(terminal.len()),
	};

	for (col, column) in terminal.iter().enumerate() {
		match *column.as_slice() {
			[] => {
				vectors.row0.push(None);
				vectors.row1.push(None);
			},
			[a] => {
				vectors.row0.push(Some(a));
				vectors.row1.push(None);
			},
			[a, b] => {
				vectors.row0.push(Some(a));
				vectors.row1.push(Some(b));
			},
			_ => return Err(Error::InconsistentArray { layer, col }),
		}
	}

	Ok(vectors)
}

/// One bit of the 2W-wide sign-correction vector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SignBit {
	Zero,
	/// Weight `2W-1`: set for every signed interpretation.
	UnlessUnsigned,
	/// Weight `W`: set for signed × signed.
	IfSignedSigned,
	/// Weight `W-1`: set for signed × unsigned.
	IfSignedUnsigned,
}

impl SignBit {
	pub(crate) fn active(self, mode: Mode) -> bool {
		match self {
			Self::Zero => false,
			Self::UnlessUnsigned => mode != Mode::UnsignedUnsigned,
			Self::IfSignedSigned => mode == Mode::SignedSigned,
			Self::IfSignedUnsigned => mode == Mode::SignedUnsigned,
		}
	}
}

pub(crate) fn sign_bit(width: usize, weight: usize) -> SignBit {
	if weight == 2 * width - 1 {
		SignBit::UnlessUnsigned
	}
	else if weight == width {
		SignBit::IfSignedSigned
	}
	else if weight == width - 1 {
		SignBit::IfSignedUnsigned
	}
	else {
		SignBit::Zero
	}
}

#[cfg(test)]
mod tests {
	use super::{SignBit, sign_bit};
	use crate::partial::Mode;

	#[test]
	fn three_correction_bits() {
		for width in 2..=64_usize {
			let bits: Vec<_> = (0..2 * width).map(|weight| sign_bit(width, weight)).collect();
			assert_eq!(bits.iter().filter(|&&bit| bit != SignBit::Zero).count(), 3);
			assert_eq!(bits[2 * width - 1], SignBit::UnlessUnsigned);
			assert_eq!(bits[width], SignBit::IfSignedSigned);
			assert_eq!(bits[width - 1], SignBit::IfSignedUnsigned);
		}
	}

	#[test]
	fn sign_vector_values() {
		// (mode, weight 2W-1, weight W, weight W-1) for width 4.
		static TESTS: &[(Mode, bool, bool, bool)] = &[
			(Mode::UnsignedUnsigned, false, false, false),
			(Mode::SignedSigned, true, true, false),
			(Mode::SignedUnsigned, true, false, true),
		];
		for &(mode, top, mid, low) in TESTS {
			assert_eq!(sign_bit(4, 7).active(mode), top);
			assert_eq!(sign_bit(4, 4).active(mode), mid);
			assert_eq!(sign_bit(4, 3).active(mode), low);
			assert!(!sign_bit(4, 0).active(mode));
		}
	}
}
