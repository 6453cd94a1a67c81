//! Structural generator for a fixed-width combinational multiplier. The
//! partial-product array is shared between unsigned, signed and
//! signed-times-unsigned interpretation through boundary complements and a
//! sign-correction vector, and is summed by a Dadda reduction tree: layer by
//! layer, columns are reduced with full and half adders toward a shrinking
//! height threshold until two addends remain.
//!
//! [`Multiplier::generate`] produces the circuit, [`Multiplier::write_module`]
//! serializes it as a SystemVerilog module, and [`Evaluator`] computes the
//! numeric product of the generated netlist for concrete operands.

mod assemble;

mod emit;

mod eval;
pub use eval::Evaluator;

mod net;
use net::{Bit, FullAdder, HalfAdder, Pass};

mod partial;
pub use partial::Mode;
use partial::PartialProduct;

mod reduce;
pub use reduce::LayerStatistics;

/// A fully generated multiplier: every signal and equation needed to reduce
/// the `W * W` partial products of two `W`-bit operands to the final
/// `2W`-bit product.
pub struct Multiplier {
	width: u8,
	partials: Vec<PartialProduct>,
	/// Per-layer snapshots of the reduction array, the raw partial-product
	/// array first and the terminal two-row array last.
	layers: Vec<Vec<Vec<Bit>>>,
	full_adders: Vec<FullAdder>,
	half_adders: Vec<HalfAdder>,
	passes: Vec<Pass>,
	vector_a: Vec<Option<Bit>>,
	vector_b: Vec<Option<Bit>>,
	layer_statistics: Vec<LayerStatistics>,
}

impl Multiplier {
	pub fn generate(width: u8) -> Result<Self, Error> {
		if width < 2 {
			return Err(Error::InvalidWidth { width });
		}

		let (initial, partials) = partial::build(usize::from(width));
		let reduction = reduce::run(usize::from(width), initial)?;

		let terminal = reduction.layers.len() - 1;
		let vectors = assemble::final_vectors(terminal, &reduction.layers[terminal])?;

		Ok(Self {
			width,
			partials,
			layers: reduction.layers,
			full_adders: reduction.full_adders,
			half_adders: reduction.half_adders,
			passes: reduction.passes,
			vector_a: vectors.row0,
			vector_b: vectors.row1,
			layer_statistics: reduction.layer_statistics,
		})
	}

	pub fn width(&self) -> u8 {
		self.width
	}

	/// Writes the SystemVerilog module. The output is deterministic: the
	/// same width always serializes to the same bytes.
	pub fn write_module(&self, w: impl std::io::Write) -> std::io::Result<()> {
		emit::write_module(self, w)
	}

	pub fn statistics(&self) -> Statistics {
		Statistics {
			width: self.width,
			partial_products: self.partials.len(),
			layers: self.layer_statistics.clone(),
		}
	}
}

pub struct Statistics {
	pub width: u8,
	pub partial_products: usize,
	pub layers: Vec<LayerStatistics>,
}

impl std::fmt::Display for Statistics {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "width {}: {} partial products, {} reduction layers", self.width, self.partial_products, self.layers.len())?;
		for (i, layer) in self.layers.iter().enumerate() {
			writeln!(
				f,
				"layer {}: threshold {}, {} full adders, {} half adders, {} passthroughs",
				i + 1,
				layer.threshold,
				layer.full_adders,
				layer.half_adders,
				layer.passthroughs,
			)?;
		}
		Ok(())
	}
}

#[derive(Debug)]
pub enum Error {
	/// Widths below 2 have no reduction schedule.
	InvalidWidth { width: u8 },
	/// The reducer broke its own bookkeeping: a column ended taller than the
	/// layer threshold, an adder was starved of inputs, or a carry was aimed
	/// past the top column. Never recoverable.
	InconsistentArray { layer: usize, col: usize },
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidWidth { width } => write!(f, "invalid width {width}, expected at least 2"),
			Self::InconsistentArray { layer, col } => write!(f, "inconsistent reduction array at layer {layer} column {col}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Error, Multiplier};

	#[test]
	fn rejects_invalid_widths() {
		for width in 0..2 {
			let Err(Error::InvalidWidth { width: reported }) = Multiplier::generate(width) else {
				panic!("width {width} must be rejected");
			};
			assert_eq!(reported, width);
		}
	}

	#[test]
	fn terminal_array_has_at_most_two_rows() {
		for width in 2..=64_u8 {
			let multiplier = Multiplier::generate(width).unwrap();
			let terminal = &multiplier.layers[multiplier.layers.len() - 1];
			assert_eq!(terminal.len(), 2 * usize::from(width) - 1);
			for (col, column) in terminal.iter().enumerate() {
				assert!(column.len() <= 2, "width {width} column {col} height {}", column.len());
				// Every weight had at least one partial product routed into
				// it, and adders always repay their column with a sum, so no
				// column may end empty.
				assert!(!column.is_empty(), "width {width} column {col} is empty");
			}
		}
	}

	#[test]
	fn layer_count_follows_the_sequence() {
		static TESTS: &[(u8, usize)] = &[
			(2, 1),
			(3, 1),
			(4, 2),
			(8, 4),
			(16, 6),
			(32, 8),
			(64, 10),
		];
		for &(width, layers) in TESTS {
			let multiplier = Multiplier::generate(width).unwrap();
			// The snapshots include the initial array.
			assert_eq!(multiplier.layers.len(), layers + 1);
			assert_eq!(multiplier.statistics().layers.len(), layers);
			assert_eq!(multiplier.partials.len(), usize::from(width) * usize::from(width));
		}
	}
}
