use std::io::Write;

use crate::error::Result;

/// Writes one line per case, each holding that case's outputs separated by
/// single spaces.
pub fn write_outputs<W: Write>(mut writer: W, outputs: &[Vec<f64>]) -> Result<()> {
    for row in outputs {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_outputs(path: &str, outputs: &[Vec<f64>]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_outputs(std::io::BufWriter::new(file), outputs)
}
