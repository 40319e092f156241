//! sipad - SIPA edge safety daemon
//!
//! This daemon:
//! 1. Ingests frames from the configured camera source
//! 2. Runs the detector backend on each frame
//! 3. Classifies per-person PPE and perimeter state into safety events
//! 4. Fans events out to the journal, the MQTT broker, and the alarm
//! 5. Watches per-cycle latency against the configured ceiling
//!
//! Only initialization failures terminate the process; any single-cycle
//! anomaly is logged and the loop continues.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sipa_edge::{
    local_timestamp, open_source, AlarmController, AlarmPolicy, CycleWatchdog, Detector,
    EventJournal, EventSinks, MqttPublisher, PerimeterZone, SafetyEngine, SimulatedAlarm,
    SipadConfig, StubDetector,
};

/// Backoff after a missed frame before retrying capture.
const FRAME_RETRY_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(author, version, about = "SIPA industrial-safety edge daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, env = "SIPA_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = SipadConfig::load(args.config.as_deref())?;
    log::info!(
        "sipad starting: camera={} {}x{}, detector={}, journal={}",
        cfg.camera.source,
        cfg.camera.width,
        cfg.camera.height,
        cfg.detector_backend,
        cfg.journal_path.display()
    );

    // Startup failures are fatal by design; everything past this point
    // recovers locally.
    let engine = SafetyEngine::new(
        cfg.classes,
        cfg.min_confidence,
        PerimeterZone::new(cfg.perimeter.clone(), cfg.camera.width, cfg.camera.height)?,
        cfg.camera.source.clone(),
    );
    let mut detector = build_detector(&cfg.detector_backend)?;
    detector.warm_up()?;
    log::info!("detector backend {} ready", detector.name());
    let mut source = open_source(&cfg.camera)?;

    let journal = EventJournal::open(&cfg.journal_path)?;
    let publisher = if cfg.mqtt.enabled {
        match MqttPublisher::connect(&cfg.mqtt) {
            Ok(publisher) => Some(publisher),
            Err(e) => {
                log::warn!("mqtt publisher unavailable, journal-only mode: {}", e);
                None
            }
        }
    } else {
        None
    };
    let alarm = AlarmController::spawn(Box::new(SimulatedAlarm::new(
        cfg.alarm.strobe_pin,
        cfg.alarm.buzzer_pin,
    )));
    if cfg.alarm.enabled {
        log::warn!("alarm actuation enabled but no GPIO driver is built in; simulating");
    }
    let mut sinks = EventSinks {
        journal,
        publisher,
        alarm,
        policy: AlarmPolicy::from_settings(&cfg.alarm),
    };

    let watchdog = CycleWatchdog::new(cfg.alert_latency_limit);

    let running = Arc::new(AtomicBool::new(true));
    let running_flag = running.clone();
    ctrlc::set_handler(move || {
        running_flag.store(false, Ordering::SeqCst);
    })?;

    log::info!("sipad running (ctrl-c to stop)");
    let mut cycles = 0u64;
    let mut events_total = 0u64;

    while running.load(Ordering::SeqCst) {
        let timer = watchdog.begin();

        let frame = match source.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("frame not received, retrying: {}", e);
                std::thread::sleep(FRAME_RETRY_BACKOFF);
                continue;
            }
        };

        let batch = match detector.infer(&frame) {
            Ok(batch) => batch,
            Err(e) => {
                log::warn!("inference failed, skipping cycle: {}", e);
                watchdog.observe(timer, 0);
                continue;
            }
        };

        let events = match engine.evaluate(&batch, &local_timestamp()) {
            Ok(events) => events,
            Err(e) => {
                log::warn!("evaluation failed, skipping cycle: {}", e);
                watchdog.observe(timer, 0);
                continue;
            }
        };
        for event in &events {
            sinks.dispatch(event);
        }

        cycles += 1;
        events_total += events.len() as u64;
        watchdog.observe(timer, events.len());
    }

    log::info!(
        "shutting down after {} cycles, {} events",
        cycles,
        events_total
    );
    source.release();
    sinks.shutdown();
    log::info!("sipad stopped");
    Ok(())
}

fn build_detector(backend: &str) -> Result<Box<dyn Detector>> {
    match backend {
        "stub" => Ok(Box::new(StubDetector::new())),
        other => Err(anyhow!(
            "unknown detector backend {:?} (only \"stub\" is built in)",
            other
        )),
    }
}
