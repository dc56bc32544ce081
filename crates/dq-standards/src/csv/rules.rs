#![deny(unsafe_code)]

use std::path::Path;

use dq_model::ErrorCode;
use tracing::warn;

use crate::csv::{HeaderIndex, cell, line_of, open_reader};
use crate::error::StandardsError;
use crate::rules::{RuleConfig, RuleSetting, parse_flag};

/// Parse a rule configuration file (`CODE,DETECT,CORRECT,MESSAGE`).
///
/// Unknown codes are logged and skipped. Codes missing from the file stay
/// disabled.
pub fn parse_rules_csv(path: &Path) -> Result<RuleConfig, StandardsError> {
    let mut reader = open_reader(path)?;
    let headers = HeaderIndex::new(reader.headers().map_err(|e| StandardsError::csv(path, e))?);

    let code_i = headers.require(path, &["CODE", "ERROR_CODE"])?;
    let detect_i = headers.require(path, &["DETECT", "SHOULD_DETECT"])?;
    let correct_i = headers.require(path, &["CORRECT", "SHOULD_CORRECT"])?;
    let message_i = headers.position(&["MESSAGE", "DESCRIPTION"]);

    let mut config = RuleConfig::default();
    for row in reader.records() {
        let row = row.map_err(|e| StandardsError::csv(path, e))?;
        let line = line_of(&row);

        let Some(raw_code) = cell(&row, code_i) else {
            continue;
        };
        let code = match raw_code.parse::<ErrorCode>() {
            Ok(code) => code,
            Err(_) => {
                warn!(path = %path.display(), line, code = raw_code, "unknown rule code ignored");
                config.push_unknown(raw_code.to_string());
                continue;
            }
        };

        let flag = |idx: usize, column: &str| -> Result<bool, StandardsError> {
            let raw = row.get(idx).unwrap_or_default();
            parse_flag(raw).ok_or_else(|| StandardsError::InvalidValue {
                path: path.to_path_buf(),
                line,
                message: format!("{column} for {code} is not a boolean: {raw:?}"),
            })
        };

        let setting = RuleSetting {
            detect: flag(detect_i, "DETECT")?,
            correct: flag(correct_i, "CORRECT")?,
            message: message_i
                .and_then(|i| cell(&row, i))
                .map(str::to_string),
        };
        if config.insert(code, setting).is_some() {
            warn!(path = %path.display(), line, %code, "duplicate rule code, last row wins");
        }
    }

    Ok(config)
}
