//! Daemon configuration: TOML file, environment overrides, validation.
//!
//! Geometry and threshold mistakes are configuration errors, so they fail
//! here, before the loop starts, never at runtime.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::detect::ClassMap;
use crate::geometry::{Point, Polygon};
use crate::ingest::CameraConfig;
use crate::sink::{AlarmSettings, MqttSettings};

const DEFAULT_DETECTOR_BACKEND: &str = "stub";
const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;
const DEFAULT_LATENCY_LIMIT_S: f32 = 1.0;
const DEFAULT_JOURNAL_PATH: &str = "events.log";
const DEFAULT_POLYGON: [[f32; 2]; 4] = [[0.2, 0.6], [0.8, 0.6], [0.8, 1.0], [0.2, 1.0]];

#[derive(Debug, Deserialize, Default)]
struct SipadConfigFile {
    camera: Option<CameraSection>,
    detector: Option<DetectorSection>,
    classes: Option<ClassesSection>,
    perimeter: Option<PerimeterSection>,
    thresholds: Option<ThresholdsSection>,
    mqtt: Option<MqttSection>,
    alarm: Option<AlarmSection>,
    journal: Option<JournalSection>,
}

#[derive(Debug, Deserialize, Default)]
struct CameraSection {
    source: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectorSection {
    backend: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ClassesSection {
    person: Option<i64>,
    helmet: Option<i64>,
    harness: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
struct PerimeterSection {
    polygon: Option<Vec<[f32; 2]>>,
}

#[derive(Debug, Deserialize, Default)]
struct ThresholdsSection {
    min_confidence_for_detection: Option<f32>,
    alert_latency_limit_s: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct MqttSection {
    enabled: Option<bool>,
    host: Option<String>,
    port: Option<u16>,
    topic: Option<String>,
    client_id: Option<String>,
    username: Option<String>,
    password: Option<String>,
    tls: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct AlarmSection {
    enabled: Option<bool>,
    strobe_pin: Option<u8>,
    buzzer_pin: Option<u8>,
    critical_pulse_s: Option<f32>,
    intrusion_pulse_s: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct JournalSection {
    path: Option<PathBuf>,
}

/// Resolved, validated daemon configuration. Read-only after load.
#[derive(Clone, Debug)]
pub struct SipadConfig {
    pub camera: CameraConfig,
    pub detector_backend: String,
    pub classes: ClassMap,
    pub perimeter: Polygon,
    pub min_confidence: f32,
    pub alert_latency_limit: Duration,
    pub mqtt: MqttSettings,
    pub alarm: AlarmSettings,
    pub journal_path: PathBuf,
}

impl SipadConfig {
    /// Loads from `path`, or from `SIPA_CONFIG` when unset, or defaults
    /// when neither names a file. Env overrides apply last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var("SIPA_CONFIG").ok().map(PathBuf::from);
        let chosen = path.map(Path::to_path_buf).or(env_path);
        let file_cfg = match chosen.as_deref() {
            Some(path) => read_config_file(path)?,
            None => SipadConfigFile::default(),
        };
        let mut cfg = Self::from_file(file_cfg)?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: SipadConfigFile) -> Result<Self> {
        let camera_defaults = CameraConfig::default();
        let camera = CameraConfig {
            source: file
                .camera
                .as_ref()
                .and_then(|camera| camera.source.clone())
                .unwrap_or(camera_defaults.source),
            width: file
                .camera
                .as_ref()
                .and_then(|camera| camera.width)
                .unwrap_or(camera_defaults.width),
            height: file
                .camera
                .and_then(|camera| camera.height)
                .unwrap_or(camera_defaults.height),
        };

        let detector_backend = file
            .detector
            .and_then(|detector| detector.backend)
            .unwrap_or_else(|| DEFAULT_DETECTOR_BACKEND.to_string());

        let class_defaults = ClassMap::default();
        let classes = ClassMap {
            person: file
                .classes
                .as_ref()
                .and_then(|classes| classes.person)
                .unwrap_or(class_defaults.person),
            helmet: file
                .classes
                .as_ref()
                .and_then(|classes| classes.helmet)
                .unwrap_or(class_defaults.helmet),
            harness: file
                .classes
                .and_then(|classes| classes.harness)
                .unwrap_or(class_defaults.harness),
        };

        let vertices = file
            .perimeter
            .and_then(|perimeter| perimeter.polygon)
            .unwrap_or_else(|| DEFAULT_POLYGON.to_vec());
        let perimeter = Polygon::new(
            vertices
                .iter()
                .map(|[x, y]| Point::new(*x, *y))
                .collect(),
        )?;

        let min_confidence = file
            .thresholds
            .as_ref()
            .and_then(|thresholds| thresholds.min_confidence_for_detection)
            .unwrap_or(DEFAULT_MIN_CONFIDENCE);
        let latency_limit_s = file
            .thresholds
            .and_then(|thresholds| thresholds.alert_latency_limit_s)
            .unwrap_or(DEFAULT_LATENCY_LIMIT_S);

        let mqtt_defaults = MqttSettings::default();
        let mqtt = match file.mqtt {
            Some(section) => MqttSettings {
                enabled: section.enabled.unwrap_or(mqtt_defaults.enabled),
                host: section.host.unwrap_or(mqtt_defaults.host),
                port: section.port.unwrap_or(mqtt_defaults.port),
                topic: section.topic.unwrap_or(mqtt_defaults.topic),
                client_id: section.client_id.unwrap_or(mqtt_defaults.client_id),
                username: section.username,
                password: section.password,
                tls: section.tls.unwrap_or(mqtt_defaults.tls),
            },
            None => mqtt_defaults,
        };

        let alarm_defaults = AlarmSettings::default();
        let alarm = match file.alarm {
            Some(section) => AlarmSettings {
                enabled: section.enabled.unwrap_or(alarm_defaults.enabled),
                strobe_pin: section.strobe_pin.unwrap_or(alarm_defaults.strobe_pin),
                buzzer_pin: section.buzzer_pin.unwrap_or(alarm_defaults.buzzer_pin),
                critical_pulse: match section.critical_pulse_s {
                    Some(secs) => seconds_to_duration(secs, "critical_pulse_s")?,
                    None => alarm_defaults.critical_pulse,
                },
                intrusion_pulse: match section.intrusion_pulse_s {
                    Some(secs) => seconds_to_duration(secs, "intrusion_pulse_s")?,
                    None => alarm_defaults.intrusion_pulse,
                },
            },
            None => alarm_defaults,
        };

        let journal_path = file
            .journal
            .and_then(|journal| journal.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JOURNAL_PATH));

        Ok(Self {
            camera,
            detector_backend,
            classes,
            perimeter,
            min_confidence,
            alert_latency_limit: seconds_to_duration(latency_limit_s, "alert_latency_limit_s")?,
            mqtt,
            alarm,
            journal_path,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(source) = std::env::var("SIPA_CAMERA_SOURCE") {
            if !source.trim().is_empty() {
                self.camera.source = source;
            }
        }
        if let Ok(host) = std::env::var("SIPA_MQTT_HOST") {
            if !host.trim().is_empty() {
                self.mqtt.host = host;
            }
        }
        if let Ok(topic) = std::env::var("SIPA_MQTT_TOPIC") {
            if !topic.trim().is_empty() {
                self.mqtt.topic = topic;
            }
        }
        if let Ok(path) = std::env::var("SIPA_JOURNAL_PATH") {
            if !path.trim().is_empty() {
                self.journal_path = PathBuf::from(path);
            }
        }
        if let Ok(min_conf) = std::env::var("SIPA_MIN_CONFIDENCE") {
            self.min_confidence = min_conf
                .parse()
                .map_err(|_| anyhow!("SIPA_MIN_CONFIDENCE must be a float in [0, 1]"))?;
        }
        if let Ok(enabled) = std::env::var("SIPA_ALARM_ENABLED") {
            self.alarm.enabled = matches!(enabled.trim(), "1" | "true" | "yes");
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(anyhow!(
                "camera dimensions {}x{} must be positive",
                self.camera.width,
                self.camera.height
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(anyhow!(
                "min_confidence_for_detection {} must be within [0, 1]",
                self.min_confidence
            ));
        }
        if self.alert_latency_limit.is_zero() {
            return Err(anyhow!("alert_latency_limit_s must be greater than zero"));
        }
        if self.alarm.critical_pulse.is_zero() || self.alarm.intrusion_pulse.is_zero() {
            return Err(anyhow!("alarm pulse durations must be greater than zero"));
        }
        Ok(())
    }
}

/// Converts a configured seconds value into a `Duration`, rejecting
/// negative and non-finite inputs with a config error instead of letting
/// `Duration::from_secs_f32` panic on them. Zero is allowed through here;
/// fields that require a positive value reject it in `validate`.
fn seconds_to_duration(secs: f32, field: &str) -> Result<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(anyhow!(
            "{} must be a finite, non-negative number of seconds, got {}",
            field,
            secs
        ));
    }
    Ok(Duration::from_secs_f32(secs))
}

fn read_config_file(path: &Path) -> Result<SipadConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = toml::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
