//! The Dadda reduction proper: the threshold sequence, the single-layer
//! column reducer, and the driver that runs the countdown until every column
//! holds at most two bits.
//!
//! Layers are immutable snapshots. Each pass reads the previous layer's
//! columns and appends into a fresh one; the only state threaded through a
//! layer is the count of carries the column to the left has already
//! deposited into the column under evaluation.

use crate::Error;
use crate::net::{AdderId, Bit, FullAdder, HalfAdder, Pass, PassId};

/// The ascending threshold sequence `2, 3, 4, 6, 9, 13, ...`, each entry
/// `⌊1.5·previous⌋`, generated while below `width`. The driver consumes it
/// highest-first. Always contains the initial `2` so that `width == 2` still
/// runs one (passthrough-only) layer.
pub(crate) fn dadda_sequence(width: usize) -> Vec<usize> {
	let mut sequence = vec![2];
	let mut d = 3;
	while d < width {
		sequence.push(d);
		d = d * 3 / 2;
	}
	sequence
}

pub(crate) struct Reduction {
	/// `layers[0]` is the raw partial-product array; each pass appends its
	/// output, so `layers.last()` is the terminal two-row array.
	pub(crate) layers: Vec<Vec<Vec<Bit>>>,
	pub(crate) full_adders: Vec<FullAdder>,
	pub(crate) half_adders: Vec<HalfAdder>,
	pub(crate) passes: Vec<Pass>,
	pub(crate) layer_statistics: Vec<LayerStatistics>,
}

#[derive(Clone, Copy, Debug)]
pub struct LayerStatistics {
	pub threshold: usize,
	pub full_adders: usize,
	pub half_adders: usize,
	pub passthroughs: usize,
}

pub(crate) fn run(width: usize, initial: Vec<Vec<Bit>>) -> Result<Reduction, Error> {
	let sequence = dadda_sequence(width);

	let mut reduction = Reduction {
		layers: Vec::with_capacity(sequence.len() + 1),
		full_adders: Vec::new(),
		half_adders: Vec::new(),
		passes: Vec::new(),
		layer_statistics: Vec::with_capacity(sequence.len()),
	};

	let mut current = initial;
	for (i, threshold) in sequence.into_iter().rev().enumerate() {
		let layer = i + 1;
		let output = reduce_layer(layer, threshold, &current)?;

		reduction.layer_statistics.push(LayerStatistics {
			threshold,
			full_adders: output.full_adders.len(),
			half_adders: output.half_adders.len(),
			passthroughs: output.passes.len(),
		});
		reduction.full_adders.extend(output.full_adders);
		reduction.half_adders.extend(output.half_adders);
		reduction.passes.extend(output.passes);

		reduction.layers.push(std::mem::replace(&mut current, output.columns));
	}
	reduction.layers.push(current);

	Ok(reduction)
}

struct LayerOutput {
	columns: Vec<Vec<Bit>>,
	full_adders: Vec<FullAdder>,
	half_adders: Vec<HalfAdder>,
	passes: Vec<Pass>,
}

/// Reduces one layer toward `threshold`. Walking columns left to right,
/// allocates full adders while the column's total (own slots plus carries
/// already received from the left neighbor) exceeds `threshold + 1`, one
/// half adder if the total then equals `threshold + 1` exactly, and
/// passthroughs for whatever remains. Adders consume the most recently
/// appended slots first; carries land in the next column of the output
/// layer ahead of that column's own outputs.
fn reduce_layer(layer: usize, threshold: usize, current: &[Vec<Bit>]) -> Result<LayerOutput, Error> {
	let mut output = LayerOutput {
		columns: vec![Vec::new(); current.len()],
		full_adders: Vec::new(),
		half_adders: Vec::new(),
		passes: Vec::new(),
	};

	// Carries deposited into the column under evaluation by its left
	// neighbor's adders, this same layer.
	let mut offset = 0;

	for (col, column) in current.iter().enumerate() {
		let mut slots = column.clone();
		let mut total = offset + slots.len();
		let mut carries = 0;

		let mut index = 0;
		while total > threshold + 1 {
			let &[.., c, b, a] = slots.as_slice() else {
				return Err(Error::InconsistentArray { layer, col });
			};
			slots.truncate(slots.len() - 3);

			let adder = FullAdder { layer, col, index, inputs: [a, b, c] };
			deposit(&mut output.columns, layer, col, adder.id())?;
			output.full_adders.push(adder);

			index += 1;
			carries += 1;
			total -= 2;
		}

		if total == threshold + 1 {
			let &[.., b, a] = slots.as_slice() else {
				return Err(Error::InconsistentArray { layer, col });
			};
			slots.truncate(slots.len() - 2);

			let adder = HalfAdder { layer, col, inputs: [a, b] };
			deposit(&mut output.columns, layer, col, adder.id())?;
			output.half_adders.push(adder);

			carries += 1;
			#[allow(unused_assignments)]
			{
				total -= 1;
			}
		}

		for (index, input) in slots.into_iter().enumerate() {
			let id = PassId { layer, col, index };
			output.passes.push(Pass { id, input });
			output.columns[col].push(Bit::Pass(id));
		}

		if output.columns[col].len() > threshold {
			return Err(Error::InconsistentArray { layer, col });
		}
		offset = carries;
	}

	Ok(output)
}

/// Places an adder's sum in the same column and its carry in the next column
/// of the output layer. A carry aimed past the top column means the schedule
/// is broken.
fn deposit(columns: &mut [Vec<Bit>], layer: usize, col: usize, id: AdderId) -> Result<(), Error> {
	columns[col].push(Bit::Sum(id));
	let Some(next) = columns.get_mut(col + 1) else {
		return Err(Error::InconsistentArray { layer, col });
	};
	next.push(Bit::Carry(id));
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::dadda_sequence;

	#[test]
	fn sequence() {
		static TESTS: &[(usize, &[usize])] = &[
			(2, &[2]),
			(3, &[2]),
			(4, &[2, 3]),
			(6, &[2, 3, 4]),
			(8, &[2, 3, 4, 6]),
			(16, &[2, 3, 4, 6, 9, 13]),
			(32, &[2, 3, 4, 6, 9, 13, 19, 28]),
			(64, &[2, 3, 4, 6, 9, 13, 19, 28, 42, 63]),
		];
		for &(width, expected) in TESTS {
			assert_eq!(dadda_sequence(width), expected);
		}
	}

	#[test]
	fn sequence_is_strictly_increasing_from_two() {
		for width in 2..=255_usize {
			let sequence = dadda_sequence(width);
			assert_eq!(sequence[0], 2);
			for pair in sequence.windows(2) {
				assert!(pair[0] < pair[1]);
			}
			if width > 2 {
				assert!(sequence[sequence.len() - 1] < width);
			}
		}
	}
}
