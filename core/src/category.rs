use crate::config::CategoryConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::traits::CategoryId;
use crate::variate::ExpVariate;

/// A job category with its own interarrival and service streams.
///
/// Categories outlive individual runs: their streams keep advancing from one
/// run to the next.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    arrivals: ExpVariate,
    service: ExpVariate,
}

impl Category {
    pub fn new(id: CategoryId, arrivals: ExpVariate, service: ExpVariate) -> Self {
        Self {
            id,
            arrivals,
            service,
        }
    }

    pub fn from_config(id: CategoryId, config: &CategoryConfig) -> ConfigResult<Self> {
        let build = || -> ConfigResult<Self> {
            Ok(Self::new(
                id,
                ExpVariate::new(config.arrival_seed, config.arrival_rate)?,
                ExpVariate::new(config.service_seed, config.service_rate)?,
            ))
        };
        build().map_err(|source| ConfigError::Category {
            category: id,
            source: Box::new(source),
        })
    }

    pub fn next_interarrival(&mut self) -> f64 {
        self.arrivals.sample()
    }

    pub fn next_service(&mut self) -> f64 {
        self.service.sample()
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrivals.rate()
    }

    pub fn service_rate(&self) -> f64 {
        self.service.rate()
    }
}
