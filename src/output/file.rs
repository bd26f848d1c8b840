//! Output formats for evaluated field batches.

use crate::error::FieldError;
use crate::field::Field;
use nalgebra::Vector3;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

extern crate byteorder;
use byteorder::{LittleEndian, WriteBytesExt};

/// A trait implemented for each output format.
pub trait Format<W> {
    /// Writes data preceding the rows of a batch.
    fn write_header(writer: &mut W, field: Field, count: usize) -> Result<(), FieldError>;

    /// Writes the field value found at one observer.
    fn write_row(
        writer: &mut W,
        observer: &Vector3<f64>,
        value: &Vector3<f64>,
    ) -> Result<(), FieldError>;

    fn flush(writer: &mut W) -> Result<(), FieldError>;
}

/// Writes a batch of field values in the [Format] `F`.
///
/// For example, `write_field::<Text, _>(&mut stdout, Field::B, &observers, output.as_slice())`.
pub fn write_field<F, W>(
    writer: &mut W,
    field: Field,
    observers: &[Vector3<f64>],
    values: &[Vector3<f64>],
) -> Result<(), FieldError>
where
    F: Format<W>,
{
    if observers.len() != values.len() {
        let mut lengths = BTreeMap::new();
        lengths.insert("observer", observers.len());
        lengths.insert("field", values.len());
        return Err(FieldError::LengthMismatch { lengths });
    }
    F::write_header(writer, field, values.len())?;
    for (observer, value) in observers.iter().zip(values) {
        F::write_row(writer, observer, value)?;
    }
    F::flush(writer)
}

/// Opens a buffered file for writing, replacing existing content.
pub fn create<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>, FieldError> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Prints batches in a [Format] that is human readable.
///
/// A batch starts with the line `field count`, e.g. `B [mT], 3`, followed by one line
/// `(x,y,z): (fx,fy,fz)` per observer.
pub struct Text {}
impl<W: Write> Format<W> for Text {
    fn write_header(writer: &mut W, field: Field, count: usize) -> Result<(), FieldError> {
        writeln!(writer, "{}, {:?}", field, count)?;
        Ok(())
    }

    fn write_row(
        writer: &mut W,
        observer: &Vector3<f64>,
        value: &Vector3<f64>,
    ) -> Result<(), FieldError> {
        writeln!(
            writer,
            "({:?},{:?},{:?}): ({:?},{:?},{:?})",
            observer[0], observer[1], observer[2], value[0], value[1], value[2]
        )?;
        Ok(())
    }

    fn flush(writer: &mut W) -> Result<(), FieldError> {
        writer.flush()?;
        Ok(())
    }
}

/// Comma separated values with a header record, one record per observer.
pub struct Csv {}
impl<W: Write> Format<csv::Writer<W>> for Csv {
    fn write_header(
        writer: &mut csv::Writer<W>,
        field: Field,
        _count: usize,
    ) -> Result<(), FieldError> {
        let components = match field {
            Field::B => ["Bx", "By", "Bz"],
            Field::H => ["Hx", "Hy", "Hz"],
        };
        writer.write_record(&[
            "Observer_X",
            "Observer_Y",
            "Observer_Z",
            components[0],
            components[1],
            components[2],
        ])?;
        Ok(())
    }

    fn write_row(
        writer: &mut csv::Writer<W>,
        observer: &Vector3<f64>,
        value: &Vector3<f64>,
    ) -> Result<(), FieldError> {
        writer.serialize([
            observer[0], observer[1], observer[2], value[0], value[1], value[2],
        ])?;
        Ok(())
    }

    fn flush(writer: &mut csv::Writer<W>) -> Result<(), FieldError> {
        writer.flush()?;
        Ok(())
    }
}

type Endianness = LittleEndian;

/// Little endian binary output.
///
/// The header is a `u8` field tag (0 for B, 1 for H) and the `u64` row count, each row holds
/// six `f64`: the observer followed by the field value.
pub struct Binary {}
impl<W: Write> Format<W> for Binary {
    fn write_header(writer: &mut W, field: Field, count: usize) -> Result<(), FieldError> {
        let tag = match field {
            Field::B => 0,
            Field::H => 1,
        };
        writer.write_u8(tag)?;
        writer.write_u64::<Endianness>(count as u64)?;
        Ok(())
    }

    fn write_row(
        writer: &mut W,
        observer: &Vector3<f64>,
        value: &Vector3<f64>,
    ) -> Result<(), FieldError> {
        for element in observer.iter().chain(value.iter()) {
            writer.write_f64::<Endianness>(*element)?;
        }
        Ok(())
    }

    fn flush(writer: &mut W) -> Result<(), FieldError> {
        writer.flush()?;
        Ok(())
    }
}
