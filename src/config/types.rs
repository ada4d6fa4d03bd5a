//! Configuration types for the course engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calculation::DEFAULT_SESSION_TOPIC;
use crate::models::{ATTENDANCE_BAND_SET, AttendancePolicy, ThresholdBand};

/// Engine-wide defaults, read from `engine.yaml`.
///
/// Missing keys fall back to the built-in defaults.
///
/// # Example
///
/// ```
/// use course_engine::config::EngineConfig;
/// use course_engine::models::AttendancePolicy;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.default_session_topic, "Conteúdo a definir");
/// assert_eq!(config.attendance_policy, AttendancePolicy::PresentOnly);
/// assert_eq!(config.attendance_band_set, "attendance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Topic given to generated sessions.
    pub default_session_topic: String,
    /// Which statuses count toward attendance.
    pub attendance_policy: AttendancePolicy,
    /// The band set used to classify attendance percentages.
    pub attendance_band_set: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_session_topic: DEFAULT_SESSION_TOPIC.to_string(),
            attendance_policy: AttendancePolicy::default(),
            attendance_band_set: ATTENDANCE_BAND_SET.to_string(),
        }
    }
}

/// Threshold configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    /// Map of band set name to its bands, in any order.
    pub band_sets: BTreeMap<String, Vec<ThresholdBand>>,
}
