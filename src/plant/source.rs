//! Turbine parameter sources.
//!
//! A [`TurbineSource`] supplies the operating limits and efficiency
//! coefficients of every turbine in a plant. [`CsvTurbineSource`] reads the
//! legacy three-file semicolon format:
//!
//! - power limits: first row minima, second row maxima, `;`-separated
//! - flow limits: same layout
//! - efficiency coefficients: one value per line, shared by every turbine

use crate::error::{DispatchError, Result};
use std::path::{Path, PathBuf};

/// Number of efficiency polynomial coefficients.
pub const COEFFICIENT_COUNT: usize = 6;

/// Raw construction parameters of one turbine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurbineParams {
    pub min_power: f64,
    pub max_power: f64,
    pub min_flow: f64,
    pub max_flow: f64,
    /// `[c0..c5]` of `c0 + c1·H + c2·Q + c3·H·Q + c4·H² + c5·Q²`.
    pub coefficients: [f64; COEFFICIENT_COUNT],
}

/// Anything able to produce the turbine parameters of a plant.
pub trait TurbineSource {
    /// Loads one parameter set per turbine, in plant order.
    fn load(&self) -> Result<Vec<TurbineParams>>;
}

impl TurbineSource for Vec<TurbineParams> {
    fn load(&self) -> Result<Vec<TurbineParams>> {
        Ok(self.clone())
    }
}

/// Legacy semicolon-separated parameter files.
#[derive(Debug, Clone)]
pub struct CsvTurbineSource {
    power_limits: PathBuf,
    flow_limits: PathBuf,
    coefficients: PathBuf,
}

const SEPARATOR: char = ';';

impl CsvTurbineSource {
    pub fn new(
        power_limits: impl Into<PathBuf>,
        flow_limits: impl Into<PathBuf>,
        coefficients: impl Into<PathBuf>,
    ) -> Self {
        Self {
            power_limits: power_limits.into(),
            flow_limits: flow_limits.into(),
            coefficients: coefficients.into(),
        }
    }

    /// Files under `dir` with their conventional names:
    /// `limitesPotencia.csv`, `limitesVazoes.csv`, `parametrosRendimento.csv`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join("limitesPotencia.csv"),
            dir.join("limitesVazoes.csv"),
            dir.join("parametrosRendimento.csv"),
        )
    }

    /// Parses already-read file contents.
    pub fn parse(&self, power: &str, flow: &str, coefficients: &str) -> Result<Vec<TurbineParams>> {
        let (min_power, max_power) = limit_rows(&self.power_limits, power)?;
        let (min_flow, max_flow) = limit_rows(&self.flow_limits, flow)?;
        let coefficients = coefficient_column(&self.coefficients, coefficients)?;

        if min_power.len() != max_power.len()
            || min_flow.len() != max_flow.len()
            || min_power.len() != min_flow.len()
        {
            return Err(DispatchError::Source {
                file: self.power_limits.clone(),
                detail: format!(
                    "limit rows differ in width (power {}/{}, flow {}/{})",
                    min_power.len(),
                    max_power.len(),
                    min_flow.len(),
                    max_flow.len()
                ),
            });
        }

        Ok((0..min_power.len())
            .map(|i| TurbineParams {
                min_power: min_power[i],
                max_power: max_power[i],
                min_flow: min_flow[i],
                max_flow: max_flow[i],
                coefficients,
            })
            .collect())
    }
}

impl TurbineSource for CsvTurbineSource {
    fn load(&self) -> Result<Vec<TurbineParams>> {
        let power = read(&self.power_limits)?;
        let flow = read(&self.flow_limits)?;
        let coefficients = read(&self.coefficients)?;
        let params = self.parse(&power, &flow, &coefficients)?;
        tracing::debug!(
            turbines = params.len(),
            file = %self.power_limits.display(),
            "Loaded turbine parameters"
        );
        Ok(params)
    }
}

fn read(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).map_err(|source| DispatchError::Io {
        file: file.to_path_buf(),
        source,
    })
}

fn limit_rows(file: &Path, text: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut lines = text.lines();
    let mut row = |name: &str| -> Result<Vec<f64>> {
        let line = lines.next().ok_or_else(|| DispatchError::Source {
            file: file.to_path_buf(),
            detail: format!("missing {name} row"),
        })?;
        line.split(SEPARATOR)
            .map(|cell| parse_number(file, cell))
            .collect()
    };
    let minima = row("minimum")?;
    let maxima = row("maximum")?;
    Ok((minima, maxima))
}

fn coefficient_column(file: &Path, text: &str) -> Result<[f64; COEFFICIENT_COUNT]> {
    let mut values = Vec::with_capacity(COEFFICIENT_COUNT);
    for (n, line) in text.lines().enumerate() {
        if line.split(SEPARATOR).count() != 1 {
            return Err(DispatchError::Source {
                file: file.to_path_buf(),
                detail: format!("line {} must hold exactly one coefficient", n + 1),
            });
        }
        values.push(parse_number(file, line)?);
    }
    values.try_into().map_err(|values: Vec<f64>| DispatchError::Source {
        file: file.to_path_buf(),
        detail: format!(
            "expected {COEFFICIENT_COUNT} coefficients, found {}",
            values.len()
        ),
    })
}

fn parse_number(file: &Path, cell: &str) -> Result<f64> {
    cell.trim().parse::<f64>().map_err(|_| DispatchError::Source {
        file: file.to_path_buf(),
        detail: format!("not a number: {cell:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const COEFFS: &str = "0.1463\n0.018076\n0.0050502\n-3.5254e-05\n-0.00012337\n-1.4507e-05\n";

    fn source() -> CsvTurbineSource {
        CsvTurbineSource::new("power.csv", "flow.csv", "coeffs.csv")
    }

    #[test]
    fn test_parse_aligned_rows() {
        let params = source()
            .parse("35;40\n66;70\n", "70;75\n140;150\n", COEFFS)
            .unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].min_power, 40.0);
        assert_eq!(params[1].max_power, 70.0);
        assert_eq!(params[0].min_flow, 70.0);
        assert_eq!(params[1].max_flow, 150.0);
        assert!((params[0].coefficients[3] + 3.5254e-05).abs() < 1e-18);
        assert_eq!(params[0].coefficients, params[1].coefficients);
    }

    #[test]
    fn test_mismatched_widths() {
        let err = source()
            .parse("35;40\n66\n", "70;75\n140;150\n", COEFFS)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Source);
    }

    #[test]
    fn test_missing_row() {
        let err = source().parse("35;40\n", "70;75\n140;150\n", COEFFS).unwrap_err();
        assert!(err.to_string().contains("missing maximum row"), "{err}");
    }

    #[test]
    fn test_non_numeric_cell() {
        let err = source()
            .parse("35;abc\n66;70\n", "70;75\n140;150\n", COEFFS)
            .unwrap_err();
        assert!(err.to_string().contains("not a number"), "{err}");
    }

    #[test]
    fn test_coefficient_line_with_two_fields() {
        let err = source()
            .parse("35\n66\n", "70\n140\n", "0.1;0.2\n")
            .unwrap_err();
        assert!(err.to_string().contains("exactly one coefficient"), "{err}");
    }

    #[test]
    fn test_wrong_coefficient_count() {
        let err = source().parse("35\n66\n", "70\n140\n", "0.1\n0.2\n").unwrap_err();
        assert!(err.to_string().contains("expected 6 coefficients"), "{err}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CsvTurbineSource::in_dir("/nonexistent/turbines").load().unwrap_err();
        assert!(matches!(err, DispatchError::Io { .. }));
        assert_eq!(err.kind(), ErrorKind::Source);
    }

    #[test]
    fn test_load_from_files() {
        let dir = std::env::temp_dir().join(format!("hydro-dispatch-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("limitesPotencia.csv"), "35;35;35\n66;66;66\n").unwrap();
        std::fs::write(dir.join("limitesVazoes.csv"), "70;70;70\n140;140;140\n").unwrap();
        std::fs::write(dir.join("parametrosRendimento.csv"), COEFFS).unwrap();

        let params = CsvTurbineSource::in_dir(&dir).load().unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(params.len(), 3);
        assert!(params.iter().all(|p| p.min_flow == 70.0 && p.max_flow == 140.0));
    }

    #[test]
    fn test_vec_source() {
        let params = source().parse("35\n66\n", "70\n140\n", COEFFS).unwrap();
        assert_eq!(params.load().unwrap(), params);
    }
}
