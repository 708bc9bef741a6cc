use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes little-endian values for saving a trained network.
pub struct OutputBinWriter<W: Write> {
    writer: W
}

impl OutputBinWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at the given path.
    pub fn create<P: AsRef<Path>>(file_path: P) -> io::Result<Self> {
        let file = File::create(file_path)?;
        Ok(OutputBinWriter::new(BufWriter::new(file)))
    }
}

impl<W: Write> OutputBinWriter<W> {
    pub fn new(writer: W) -> Self {
        OutputBinWriter { writer }
    }

    /// Sizes are always stored as u64 so files move between platforms.
    pub fn write_usize(&mut self, value: usize) -> io::Result<()> {
        self.writer.write_all(&(value as u64).to_le_bytes())
    }

    pub fn write_slice_f64(&mut self, data: &[f64]) -> io::Result<()> {
        for &value in data {
            self.writer.write_all(&value.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Hands back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let mut writer = OutputBinWriter::new(Vec::new());
        writer.write_usize(3).unwrap();
        writer.write_slice_f64(&[1.5, -2.0]).unwrap();

        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), 8 + 16);
        assert_eq!(&bytes[..8], &3u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &1.5f64.to_le_bytes());
        assert_eq!(&bytes[16..], &(-2.0f64).to_le_bytes());
    }
}
