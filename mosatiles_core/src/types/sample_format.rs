use anyhow::{Result, bail};

/// The numeric sample types a raster can carry.
///
/// All bands of a raster share one format, and all sources of a mosaic must
/// agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
	/// 8-bit unsigned integer
	U8,
	/// 16-bit unsigned integer
	U16,
	/// 16-bit signed integer
	I16,
	/// 32-bit signed integer
	I32,
	/// 32-bit IEEE float
	F32,
	/// 64-bit IEEE float
	F64,
}

impl SampleFormat {
	/// Bit width of one sample.
	#[must_use]
	pub fn bits(&self) -> u8 {
		match self {
			SampleFormat::U8 => 8,
			SampleFormat::U16 | SampleFormat::I16 => 16,
			SampleFormat::I32 | SampleFormat::F32 => 32,
			SampleFormat::F64 => 64,
		}
	}

	/// Byte width of one sample.
	#[must_use]
	pub fn byte_size(&self) -> usize {
		usize::from(self.bits() / 8)
	}

	/// Whether samples of this format are IEEE floats.
	#[must_use]
	pub fn is_float(&self) -> bool {
		matches!(self, SampleFormat::F32 | SampleFormat::F64)
	}
}

impl std::str::FromStr for SampleFormat {
	type Err = anyhow::Error;

	/// Parses a format from its short name (`"u8"`, `"f32"`, …).
	fn from_str(name: &str) -> Result<SampleFormat> {
		use SampleFormat::*;
		Ok(match name.to_ascii_lowercase().as_str() {
			"u8" => U8,
			"u16" => U16,
			"i16" => I16,
			"i32" => I32,
			"f32" => F32,
			"f64" => F64,
			_ => bail!("Unsupported sample format: '{name}'"),
		})
	}
}

impl std::fmt::Display for SampleFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			SampleFormat::U8 => "u8",
			SampleFormat::U16 => "u16",
			SampleFormat::I16 => "i16",
			SampleFormat::I32 => "i32",
			SampleFormat::F32 => "f32",
			SampleFormat::F64 => "f64",
		};
		write!(f, "{name}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(SampleFormat::U8, 8, 1, false)]
	#[case(SampleFormat::U16, 16, 2, false)]
	#[case(SampleFormat::I16, 16, 2, false)]
	#[case(SampleFormat::I32, 32, 4, false)]
	#[case(SampleFormat::F32, 32, 4, true)]
	#[case(SampleFormat::F64, 64, 8, true)]
	fn widths_and_float_flag(
		#[case] format: SampleFormat,
		#[case] bits: u8,
		#[case] bytes: usize,
		#[case] is_float: bool,
	) {
		assert_eq!(format.bits(), bits);
		assert_eq!(format.byte_size(), bytes);
		assert_eq!(format.is_float(), is_float);
	}

	#[test]
	fn parse_roundtrip() {
		use std::str::FromStr;
		for format in [
			SampleFormat::U8,
			SampleFormat::U16,
			SampleFormat::I16,
			SampleFormat::I32,
			SampleFormat::F32,
			SampleFormat::F64,
		] {
			assert_eq!(SampleFormat::from_str(&format.to_string()).unwrap(), format);
		}
		assert!(SampleFormat::from_str("u64").is_err());
	}
}
