use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

use super::{RangeSummary, TimelineConfig};

pub const TIMELINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const RANGE_SUMMARY_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: TimelineConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummaryJsonContractV1 {
    pub schema_version: u32,
    pub summary: RangeSummary,
}

impl TimelineConfig {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineConfigJsonContractV1 {
            schema_version: TIMELINE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidConfig(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses either the versioned envelope or a bare config object, then
    /// validates the result.
    ///
    /// The envelope is tried first: every config field has a default, so a
    /// bare parse would accept an envelope and silently drop its contents.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        let config = match serde_json::from_str::<TimelineConfigJsonContractV1>(input) {
            Ok(payload) => {
                if payload.schema_version != TIMELINE_CONFIG_JSON_SCHEMA_V1 {
                    return Err(TimelineError::InvalidConfig(format!(
                        "unsupported config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
            Err(_) => serde_json::from_str::<TimelineConfig>(input).map_err(|e| {
                TimelineError::InvalidConfig(format!("failed to parse config json payload: {e}"))
            })?,
        };
        config.validate()
    }
}

impl RangeSummary {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = RangeSummaryJsonContractV1 {
            schema_version: RANGE_SUMMARY_JSON_SCHEMA_V1,
            summary: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize range summary contract v1: {e}"))
        })
    }
}
