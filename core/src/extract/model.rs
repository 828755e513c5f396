use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How ERROR lines are grouped into emissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// ERROR line plus its continuation lines, closed by the next ERROR line.
    #[default]
    Block,
    /// Every ERROR line on its own, emitted as soon as it is read.
    Line,
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(ScanMode::Block),
            "line" => Ok(ScanMode::Line),
            other => Err(format!("invalid scan mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MismatchPair {
    pub actual: String,
    pub expected: String,
}

/// One closed block, as handed to the reporting side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Emission {
    /// 1-based line number of the ERROR line that opened the block.
    pub line: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<MismatchPair>,
    /// First diverging char index; `len(actual) - 1` when none is found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<isize>,
}
