use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Reads back what [`crate::output_bin_writer::OutputBinWriter`] wrote.
pub struct InputBinReader<R: Read> {
    reader: R
}

impl InputBinReader<BufReader<File>> {
    /// Opens file and creates reader.
    pub fn open<P: AsRef<Path>>(file_path: P) -> io::Result<Self> {
        let file = File::open(file_path)?;
        Ok(InputBinReader::new(BufReader::new(file)))
    }
}

impl<R: Read> InputBinReader<R> {
    pub fn new(reader: R) -> Self {
        InputBinReader { reader }
    }

    pub fn read_usize(&mut self) -> io::Result<usize> {
        let mut bytes = [0u8; 8];
        self.reader.read_exact(&mut bytes)?;

        usize::try_from(u64::from_le_bytes(bytes))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn read_f64(&mut self) -> io::Result<f64> {
        let mut bytes = [0u8; 8];
        self.reader.read_exact(&mut bytes)?;
        Ok(f64::from_le_bytes(bytes))
    }

    /// Reads exactly count values.
    pub fn read_vec_f64(&mut self, count: usize) -> io::Result<Vec<f64>> {
        // Grow as values arrive instead of trusting count from the file up front.
        let mut values = Vec::new();
        for _ in 0..count {
            values.push(self.read_f64()?);
        }
        Ok(values)
    }
}
