use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Unified input reader that handles both file and pipe input
pub struct InputReader {
    reader: Box<dyn Read>,
}

impl InputReader {
    /// Create a new InputReader from a path
    /// Use "-" for stdin pipe input
    pub fn new<P: AsRef<Path>>(input_path: P) -> Result<Self> {
        let input_path = input_path.as_ref();
        let reader: Box<dyn Read> = if is_stdin(input_path) {
            Box::new(io::stdin().lock())
        } else {
            let file = File::open(input_path)
                .with_context(|| format!("Could not open {}", input_path.display()))?;
            Box::new(BufReader::new(file))
        };

        Ok(Self { reader })
    }

    /// Read all remaining data. Stratec files are decoded from one
    /// in-memory buffer, so inputs are always consumed whole.
    pub fn read_all(mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        Ok(data)
    }
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
