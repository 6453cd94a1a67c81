//! Serialization of a generated multiplier into a SystemVerilog module.
//! Pure formatting: declarations grouped by signal kind, equations in
//! generation order, then the closing three-vector addition.

use std::io::Write;

use crate::Multiplier;
use crate::assemble::{SignBit, sign_bit};
use crate::net::{Bit, FullAdder, HalfAdder};
use crate::partial::{Complement, PartialProduct};

pub(crate) fn write_module(multiplier: &Multiplier, mut w: impl Write) -> std::io::Result<()> {
	let width = usize::from(multiplier.width);
	let top = width - 1;
	let product_top = 2 * width - 1;

	writeln!(w, "/* Generated by dadda-multiplier-generator, do not change. */")?;
	writeln!(w, "module multiplier_combinational (")?;
	writeln!(w, "  input logic [{top}:0]    a,")?;
	writeln!(w, "  input logic [{top}:0]    b,")?;
	writeln!(w, "  input logic [1:0]  mul_type,")?;
	writeln!(w, "  output logic [{product_top}:0] p")?;
	writeln!(w, ");")?;
	writeln!(w)?;

	write_declarations(&mut w, "logic", multiplier.partials.iter().map(PartialProduct::bit))?;
	write_declarations(&mut w, "logic", multiplier.passes.iter().map(|pass| pass.id))?;
	write_declarations(&mut w, "logic [1:0]", multiplier.full_adders.iter().map(FullAdder::id))?;
	write_declarations(&mut w, "logic [1:0]", multiplier.half_adders.iter().map(HalfAdder::id))?;

	for partial in &multiplier.partials {
		let name = partial.bit();
		let PartialProduct { row, col, complement } = *partial;
		match complement {
			Complement::Never =>
				writeln!(w, "assign {name} = (a[{col}] & b[{row}]);")?,
			Complement::IfASigned =>
				writeln!(w, "assign {name} = (mul_type == 2'b00 ? (a[{col}] & b[{row}]) : ~(a[{col}] & b[{row}]));")?,
			Complement::IfBSigned =>
				writeln!(w, "assign {name} = (mul_type == 2'b01 ? ~(a[{col}] & b[{row}]) : (a[{col}] & b[{row}]));")?,
			Complement::IfMixed =>
				writeln!(w, "assign {name} = (mul_type == 2'b10 ? ~(a[{col}] & b[{row}]) : (a[{col}] & b[{row}]));")?,
		}
	}

	for pass in &multiplier.passes {
		writeln!(w, "assign {} = {};", pass.id, pass.input)?;
	}

	for adder in &multiplier.full_adders {
		let [a, b, c] = adder.inputs;
		writeln!(w, "assign {} = {a} + {b} + {c};", adder.id())?;
	}

	for adder in &multiplier.half_adders {
		let [a, b] = adder.inputs;
		writeln!(w, "assign {} = {a} + {b};", adder.id())?;
	}

	write!(w, "assign p = ")?;
	write_vector(&mut w, &multiplier.vector_a)?;
	write!(w, " + ")?;
	write_vector(&mut w, &multiplier.vector_b)?;
	write!(w, " + ")?;
	write_sign_vector(&mut w, width)?;
	writeln!(w, ";")?;

	writeln!(w, "endmodule : multiplier_combinational")?;

	Ok(())
}

fn write_declarations<T: std::fmt::Display>(
	w: &mut impl Write,
	keyword: &str,
	names: impl Iterator<Item = T>,
) -> std::io::Result<()> {
	let mut first = true;
	for name in names {
		if first {
			write!(w, "{keyword} {name}")?;
			first = false;
		}
		else {
			write!(w, ", {name}")?;
		}
	}
	if !first {
		writeln!(w, ";")?;
	}
	Ok(())
}

// MSB-first concatenation, absent weights filled with a literal zero.
fn write_vector(w: &mut impl Write, vector: &[Option<Bit>]) -> std::io::Result<()> {
	write!(w, "{{ ")?;
	let mut first = true;
	for slot in vector.iter().rev() {
		if first {
			first = false;
		}
		else {
			write!(w, ", ")?;
		}
		match slot {
			Some(bit) => write!(w, "{bit}")?,
			None => write!(w, "1'b0")?,
		}
	}
	write!(w, " }}")
}

fn write_sign_vector(w: &mut impl Write, width: usize) -> std::io::Result<()> {
	write!(w, "{{ ")?;
	for weight in (0..2 * width).rev() {
		match sign_bit(width, weight) {
			SignBit::Zero => write!(w, "1'b0")?,
			SignBit::UnlessUnsigned => write!(w, "mul_type == 2'b00 ? 1'b0 : 1'b1")?,
			SignBit::IfSignedSigned => write!(w, "mul_type == 2'b01 ? 1'b1 : 1'b0")?,
			SignBit::IfSignedUnsigned => write!(w, "mul_type == 2'b10 ? 1'b1 : 1'b0")?,
		}
		if weight > 0 {
			write!(w, ", ")?;
		}
	}
	write!(w, " }}")
}
