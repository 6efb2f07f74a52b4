use crate::error::{Result, SymgpError};
use std::io::{BufRead, Cursor};
use std::path::Path;
use super::types::RegressionData;

/// Lines preceding the sample table (title and blank separator)
const HEADER_LINES: usize = 2;

pub struct RegressionConnector;

impl RegressionConnector {
    /// Load whitespace-separated `input expected` pairs
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RegressionData> {
        let contents =
            std::fs::read_to_string(&path).map_err(|e| SymgpError::resource(&path, e))?;
        let data = Self::load_from_reader(Cursor::new(contents))?;

        log::info!(
            "Loaded {} regression samples from {}",
            data.len(),
            path.as_ref().display()
        );
        Ok(data)
    }

    pub fn load_from_reader<R: BufRead>(reader: R) -> Result<RegressionData> {
        let mut lines = reader.lines();
        for skipped in 0..HEADER_LINES {
            if lines.next().transpose()?.is_none() {
                return Err(SymgpError::Parse {
                    line: skipped + 1,
                    message: "unexpected end of file in header".to_string(),
                });
            }
        }

        let mut data = RegressionData::default();
        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line_no = idx + HEADER_LINES + 1;
            let values: Vec<&str> = line.split_whitespace().collect();
            match values.as_slice() {
                [] => continue,
                [input, output, ..] => {
                    data.inputs.push(parse_value(input, line_no)?);
                    data.outputs.push(parse_value(output, line_no)?);
                }
                [single] => {
                    return Err(SymgpError::Parse {
                        line: line_no,
                        message: format!("expected two values, found '{}'", single),
                    })
                }
            }
        }

        if data.is_empty() {
            return Err(SymgpError::Validation(
                "Regression file contains no samples".to_string(),
            ));
        }

        Ok(data)
    }
}

fn parse_value(token: &str, line: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| SymgpError::Parse {
        line,
        message: format!("invalid number '{}'", token),
    })
}
