use crate::error::{CbbocError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

/// Largest supported row arity; a row's table holds `2^arity` values.
pub const MAX_ARITY: usize = 24;

/// Layout of an instance file.
///
/// - `Current`: header `numGenes maxEvals K M`, then `M` rows of `K` indices
///   and `2^K` values.
/// - `Legacy2015`: header `numGenes maxEvals K`, then `numGenes` rows of
///   `K + 1` indices and `2^(K + 1)` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceFormat {
    #[default]
    Current,
    Legacy2015,
}

impl InstanceFormat {
    fn arity(self, k: usize) -> usize {
        match self {
            InstanceFormat::Current => k,
            InstanceFormat::Legacy2015 => k + 1,
        }
    }
}

impl FromStr for InstanceFormat {
    type Err = CbbocError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(InstanceFormat::Current),
            "legacy2015" | "legacy" => Ok(InstanceFormat::Legacy2015),
            other => Err(CbbocError::Configuration(format!(
                "unknown instance format '{}'",
                other
            ))),
        }
    }
}

/// One row of the function: the genes it reads and its contribution table.
#[derive(Debug, Clone, PartialEq)]
pub struct SubFunction {
    pub variables: Vec<usize>,
    pub table: Vec<f64>,
}

impl SubFunction {
    /// Folds the referenced bits MSB-first into a table index.
    fn table_index(&self, candidate: &[bool]) -> usize {
        self.variables
            .iter()
            .fold(0usize, |index, &gene| (index << 1) | usize::from(candidate[gene]))
    }
}

/// An immutable k-bounded pseudo-Boolean function.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    num_genes: usize,
    max_evals_per_instance: i64,
    k: usize,
    sub_functions: Vec<SubFunction>,
}

impl ProblemInstance {
    /// Builds an instance in the current format, checking every invariant.
    pub fn new(
        num_genes: usize,
        max_evals_per_instance: i64,
        k: usize,
        sub_functions: Vec<SubFunction>,
    ) -> Result<Self> {
        let instance = Self {
            num_genes,
            max_evals_per_instance,
            k,
            sub_functions,
        };
        instance.validate(k)?;
        Ok(instance)
    }

    pub fn from_file<P: AsRef<Path>>(path: P, format: InstanceFormat) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CbbocError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, format).map_err(|e| match e {
            CbbocError::InstanceFormat(msg) => {
                CbbocError::InstanceFormat(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn parse(text: &str, format: InstanceFormat) -> Result<Self> {
        let mut tokens = Tokens::new(text);

        let num_genes = tokens.next_usize("numGenes")?;
        let max_evals_per_instance = tokens.next_i64("maxEvalsPerInstance")?;
        let k = tokens.next_usize("K")?;
        let num_rows = match format {
            InstanceFormat::Current => tokens.next_usize("M")?,
            InstanceFormat::Legacy2015 => num_genes,
        };

        let arity = format.arity(k);
        if arity == 0 || arity > MAX_ARITY {
            return Err(CbbocError::InstanceFormat(format!(
                "row arity must be in 1..={}, found {} (K={})",
                MAX_ARITY, arity, k
            )));
        }
        let table_len = 1usize << arity;

        let mut sub_functions = Vec::with_capacity(num_rows);
        for row in 0..num_rows {
            let variables = (0..arity)
                .map(|_| tokens.next_usize("gene index"))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| row_context(row, e))?;
            let table = (0..table_len)
                .map(|_| tokens.next_f64("table value"))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| row_context(row, e))?;
            sub_functions.push(SubFunction { variables, table });
        }

        let trailing = tokens.remaining();
        if trailing > 0 {
            return Err(CbbocError::InstanceFormat(format!(
                "{} unexpected tokens after {} rows",
                trailing, num_rows
            )));
        }

        let instance = Self {
            num_genes,
            max_evals_per_instance,
            k,
            sub_functions,
        };
        instance.validate(arity)?;
        Ok(instance)
    }

    fn validate(&self, arity: usize) -> Result<()> {
        if self.num_genes == 0 {
            return Err(CbbocError::InstanceFormat("numGenes must be positive".to_string()));
        }
        if self.max_evals_per_instance <= 0 {
            return Err(CbbocError::InstanceFormat(
                "maxEvalsPerInstance must be positive".to_string(),
            ));
        }
        if arity == 0 || arity > MAX_ARITY {
            return Err(CbbocError::InstanceFormat(format!(
                "row arity must be in 1..={}, found {}",
                MAX_ARITY, arity
            )));
        }

        let table_len = 1usize << arity;
        for (row, f) in self.sub_functions.iter().enumerate() {
            if f.variables.len() != arity || f.table.len() != table_len {
                return Err(CbbocError::InstanceFormat(format!(
                    "row {}: expected {} indices and {} values, found {} and {}",
                    row,
                    arity,
                    table_len,
                    f.variables.len(),
                    f.table.len()
                )));
            }
            if let Some(&v) = f.table.iter().find(|v| !v.is_finite()) {
                return Err(CbbocError::InstanceFormat(format!(
                    "row {}: table value {} is not finite",
                    row, v
                )));
            }
            if let Some(&gene) = f.variables.iter().find(|&&g| g >= self.num_genes) {
                return Err(CbbocError::InstanceFormat(format!(
                    "row {}: gene index {} out of range for {} genes",
                    row, gene, self.num_genes
                )));
            }
        }
        Ok(())
    }

    pub fn num_genes(&self) -> usize {
        self.num_genes
    }

    pub fn max_evals_per_instance(&self) -> i64 {
        self.max_evals_per_instance
    }

    /// The `K` header value.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of sub-function rows (`M`).
    pub fn num_sub_functions(&self) -> usize {
        self.sub_functions.len()
    }

    /// Sums every row's table entry selected by the candidate's bits.
    pub fn value(&self, candidate: &[bool]) -> Result<f64> {
        if candidate.len() != self.num_genes {
            return Err(CbbocError::InvalidCandidate {
                expected: self.num_genes,
                actual: candidate.len(),
            });
        }

        Ok(self
            .sub_functions
            .iter()
            .fold(0.0, |total, f| total + f.table[f.table_index(candidate)]))
    }
}

impl fmt::Display for ProblemInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProblemInstance(numGenes={}, maxEvalsPerInstance={}, K={}, M={})",
            self.num_genes,
            self.max_evals_per_instance,
            self.k,
            self.sub_functions.len()
        )
    }
}

fn row_context(row: usize, err: CbbocError) -> CbbocError {
    match err {
        CbbocError::InstanceFormat(msg) => {
            CbbocError::InstanceFormat(format!("row {}: {}", row, msg))
        }
        other => other,
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str> {
        self.inner
            .next()
            .ok_or_else(|| CbbocError::InstanceFormat(format!("missing {}", what)))
    }

    fn next_parsed<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.next_token(what)?;
        token.parse::<T>().map_err(|_| {
            CbbocError::InstanceFormat(format!("invalid {} '{}'", what, token))
        })
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        self.next_parsed(what)
    }

    fn next_i64(&mut self, what: &str) -> Result<i64> {
        self.next_parsed(what)
    }

    fn next_f64(&mut self, what: &str) -> Result<f64> {
        self.next_parsed(what)
    }

    fn remaining(&self) -> usize {
        self.inner.clone().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_gene(a: f64, b: f64) -> ProblemInstance {
        ProblemInstance::new(
            1,
            10,
            1,
            vec![SubFunction {
                variables: vec![0],
                table: vec![a, b],
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_single_gene_table_lookup() {
        let instance = single_gene(1.5, -2.0);
        assert_eq!(instance.value(&[false]).unwrap(), 1.5);
        assert_eq!(instance.value(&[true]).unwrap(), -2.0);
    }

    #[test]
    fn test_index_is_built_most_significant_bit_first() {
        // Row reads gene 2 then gene 0: pattern (g2, g0) = (1, 0) selects entry 2.
        let text = "3 100 2 1\n2 0  0.0 1.0 2.0 3.0\n";
        let instance = ProblemInstance::parse(text, InstanceFormat::Current).unwrap();

        assert_eq!(instance.value(&[false, false, true]).unwrap(), 2.0);
        assert_eq!(instance.value(&[true, false, false]).unwrap(), 1.0);
        assert_eq!(instance.value(&[true, true, true]).unwrap(), 3.0);
    }

    #[test]
    fn test_rows_are_summed() {
        let text = "2 5 1 2\n0 1.0 10.0\n1 100.0 1000.0\n";
        let instance = ProblemInstance::parse(text, InstanceFormat::Current).unwrap();

        assert_eq!(instance.num_sub_functions(), 2);
        assert_eq!(instance.value(&[true, false]).unwrap(), 110.0);
        assert_eq!(instance.value(&[false, true]).unwrap(), 1001.0);
    }

    #[test]
    fn test_value_is_deterministic() {
        let text = "4 5 2 3\n0 1 0.1 0.2 0.3 0.4\n1 2 1.0 2.0 3.0 4.0\n3 0 -1.0 -2.0 -3.0 -4.0\n";
        let instance = ProblemInstance::parse(text, InstanceFormat::Current).unwrap();
        let candidate = vec![true, false, true, true];

        let first = instance.value(&candidate).unwrap();
        for _ in 0..10 {
            assert_eq!(instance.value(&candidate).unwrap(), first);
        }
    }

    #[test]
    fn test_wrong_length_candidate_is_rejected() {
        let instance = single_gene(0.0, 1.0);
        let err = instance.value(&[true, false]).unwrap_err();
        assert!(matches!(
            err,
            CbbocError::InvalidCandidate { expected: 1, actual: 2 }
        ));
        assert!(instance.value(&[]).is_err());
    }

    #[test]
    fn test_short_row_is_a_format_error() {
        let text = "2 5 1 2\n0 1.0 10.0\n1 100.0\n";
        let err = ProblemInstance::parse(text, InstanceFormat::Current).unwrap_err();
        assert!(matches!(err, CbbocError::InstanceFormat(_)));
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        assert!(ProblemInstance::parse("0 5 1 0", InstanceFormat::Current).is_err());
        assert!(ProblemInstance::parse("2 0 1 0", InstanceFormat::Current).is_err());
        assert!(ProblemInstance::parse("2 5 0 0", InstanceFormat::Current).is_err());
        assert!(ProblemInstance::parse("2 five 1 0", InstanceFormat::Current).is_err());
    }

    #[test]
    fn test_out_of_range_gene_index_is_rejected() {
        let text = "2 5 1 1\n2 1.0 10.0\n";
        let err = ProblemInstance::parse(text, InstanceFormat::Current).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_non_finite_table_values_are_rejected() {
        for bad in ["NaN", "inf", "-inf"] {
            let text = format!("1 10 1 1\n0 {} 1.0\n", bad);
            let err = ProblemInstance::parse(&text, InstanceFormat::Current).unwrap_err();
            assert!(matches!(err, CbbocError::InstanceFormat(_)));
        }

        let built = ProblemInstance::new(
            1,
            10,
            1,
            vec![SubFunction {
                variables: vec![0],
                table: vec![f64::NAN, 1.0],
            }],
        );
        assert!(built.is_err());
    }

    #[test]
    fn test_legacy_format_reads_one_row_per_gene() {
        let text = "2 7 1\n0 1 0.0 1.0 2.0 3.0\n1 0 0.0 10.0 20.0 30.0\n";
        let instance = ProblemInstance::parse(text, InstanceFormat::Legacy2015).unwrap();

        assert_eq!(instance.num_sub_functions(), 2);
        assert_eq!(instance.k(), 1);
        // (g0, g1) = (1, 0) -> 2.0 ; (g1, g0) = (0, 1) -> 10.0
        assert_eq!(instance.value(&[true, false]).unwrap(), 12.0);
    }

    #[test]
    fn test_legacy_k_zero_has_single_gene_rows() {
        let text = "2 7 0\n0 0.0 1.0\n1 0.0 2.0\n";
        let instance = ProblemInstance::parse(text, InstanceFormat::Legacy2015).unwrap();
        assert_eq!(instance.value(&[true, true]).unwrap(), 3.0);
    }

    #[test]
    fn test_format_is_not_inferred() {
        let legacy = "2 7 1\n0 1 0.0 1.0 2.0 3.0\n1 0 0.0 10.0 20.0 30.0\n";
        assert!(ProblemInstance::parse(legacy, InstanceFormat::Current).is_err());
    }
}
