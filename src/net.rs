//! Typed handles for every signal the generator allocates. The textual
//! SystemVerilog names only exist in the `Display` impls, so two distinct
//! handles can never collide by formatting accident.

/// One bit occupying a slot of the reduction array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Bit {
	/// The AND of `a[col]` and `b[row]`, possibly complemented at the sign
	/// boundary.
	Partial { row: usize, col: usize },
	Pass(PassId),
	Sum(AdderId),
	Carry(AdderId),
}

impl std::fmt::Display for Bit {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Partial { row, col } => write!(f, "a{col}b{row}"),
			Self::Pass(id) => id.fmt(f),
			Self::Sum(id) => write!(f, "{id}[0]"),
			Self::Carry(id) => write!(f, "{id}[1]"),
		}
	}
}

/// An identity relabeling carrying one bit into the next layer unchanged.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct PassId {
	pub(crate) layer: usize,
	pub(crate) col: usize,
	pub(crate) index: usize,
}

impl std::fmt::Display for PassId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let Self { layer, col, index } = self;
		write!(f, "pass_layer{layer}_col{col}_{index}")
	}
}

/// A 2-bit adder output, bit 0 the sum and bit 1 the carry.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) enum AdderId {
	Full { layer: usize, col: usize, index: usize },
	Half { layer: usize, col: usize },
}

impl std::fmt::Display for AdderId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Full { layer, col, index } => write!(f, "fa{index}_layer{layer}_col{col}"),
			Self::Half { layer, col } => write!(f, "ha_layer{layer}_col{col}"),
		}
	}
}

/// A full adder: three same-weight bits in, sum at the same weight and carry
/// at the next weight out.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FullAdder {
	pub(crate) layer: usize,
	pub(crate) col: usize,
	pub(crate) index: usize,
	pub(crate) inputs: [Bit; 3],
}

impl FullAdder {
	pub(crate) fn id(&self) -> AdderId {
		AdderId::Full { layer: self.layer, col: self.col, index: self.index }
	}
}

/// A half adder: two same-weight bits in, same output placement as a full
/// adder. At most one is allocated per column per layer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HalfAdder {
	pub(crate) layer: usize,
	pub(crate) col: usize,
	pub(crate) inputs: [Bit; 2],
}

impl HalfAdder {
	pub(crate) fn id(&self) -> AdderId {
		AdderId::Half { layer: self.layer, col: self.col }
	}
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Pass {
	pub(crate) id: PassId,
	pub(crate) input: Bit,
}
