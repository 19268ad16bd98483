use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};
use crate::policy::PolicyKind;
use crate::variate::check_rate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub arrival_seed: u64,
    pub service_seed: u64,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 1.0,
            service_rate: 1.0,
            arrival_seed: 1,
            service_seed: 2,
        }
    }
}

/// Everything one invocation of the simulator needs.
///
/// The text form is a `K,H,N,R,P` header followed by H lines of
/// `arrival_rate,service_rate,arrival_seed,service_seed`. The JSON form is
/// the serde representation of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// K
    pub servers: usize,
    /// N, admitted arrivals per run.
    pub max_jobs: u64,
    /// R
    pub runs: u32,
    pub policy: PolicyKind,
    pub categories: Vec<CategoryConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            servers: 1,
            max_jobs: 1,
            runs: 1,
            policy: PolicyKind::RoundRobin,
            categories: vec![CategoryConfig::default()],
        }
    }
}

const HEADER_FIELDS: usize = 5;
const CATEGORY_FIELDS: usize = 4;

impl SimConfig {
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&text)
        } else {
            Self::parse(&text)
        }
    }

    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses the comma-separated text form.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (line, header) = lines.next().ok_or(ConfigError::MissingHeader)?;
        let fields = split_fields(line, header, HEADER_FIELDS)?;
        let servers: usize = parse_field(line, "server count", fields[0])?;
        let declared: usize = parse_field(line, "category count", fields[1])?;
        let max_jobs: u64 = parse_field(line, "job cap", fields[2])?;
        let runs: u32 = parse_field(line, "run count", fields[3])?;
        let selector: u8 = parse_field(line, "policy selector", fields[4])?;
        let policy = PolicyKind::from_selector(selector)?;

        let categories = lines
            .map(|(line, text)| -> ConfigResult<CategoryConfig> {
                let fields = split_fields(line, text, CATEGORY_FIELDS)?;
                Ok(CategoryConfig {
                    arrival_rate: parse_field(line, "arrival rate", fields[0])?,
                    service_rate: parse_field(line, "service rate", fields[1])?,
                    arrival_seed: parse_seed(line, "arrival seed", fields[2])?,
                    service_seed: parse_seed(line, "service seed", fields[3])?,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        if categories.len() != declared {
            return Err(ConfigError::CategoryCount {
                declared,
                found: categories.len(),
            });
        }

        let config = Self {
            servers,
            max_jobs,
            runs,
            policy,
            categories,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.servers == 0 {
            return Err(ConfigError::ZeroServers);
        }
        if self.runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        if self.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        for (id, category) in self.categories.iter().enumerate() {
            for rate in [category.arrival_rate, category.service_rate] {
                check_rate(rate).map_err(|source| ConfigError::Category {
                    category: id,
                    source: Box::new(source),
                })?;
            }
        }
        Ok(())
    }

    /// H
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Per-event tracing is only meaningful for a single short round-robin run.
    pub fn trace_enabled(&self) -> bool {
        self.runs == 1
            && self.max_jobs <= crate::TRACE_MAX_JOBS
            && self.policy == PolicyKind::RoundRobin
    }

    /// Renders the `K,H,N,R,P` header of the text form.
    pub fn header_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.servers,
            self.category_count(),
            self.max_jobs,
            self.runs,
            self.policy.selector()
        )
    }
}

impl FromStr for SimConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn split_fields(line: usize, text: &str, expected: usize) -> ConfigResult<Vec<&str>> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != expected {
        return Err(ConfigError::FieldCount {
            line,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

fn parse_field<T: FromStr>(line: usize, field: &'static str, value: &str) -> ConfigResult<T> {
    value.parse().map_err(|_| ConfigError::Field {
        line,
        field,
        value: value.to_string(),
    })
}

// Seeds are signed integers in the text form; negative values keep their bit pattern.
fn parse_seed(line: usize, field: &'static str, value: &str) -> ConfigResult<u64> {
    parse_field::<i64>(line, field, value).map(|seed| seed as u64)
}
