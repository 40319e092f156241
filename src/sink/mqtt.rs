//! Best-effort MQTT event publisher.
//!
//! Publishes each event's JSON record to a configured topic with QoS 1.
//! Failures are logged and never retried by this crate; the broker link is
//! an optional convenience, not a delivery guarantee.

use anyhow::Result;
use rumqttc::v5::{mqttbytes::QoS, Client, Connection, Event as MqttEvent, MqttOptions};
use rumqttc::Transport;
use std::time::Duration;

use crate::event::Event;

const CHANNEL_CAPACITY: usize = 16;
const KEEP_ALIVE: Duration = Duration::from_secs(60);

/// Broker connection settings.
#[derive(Clone, Debug)]
pub struct MqttSettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub topic: String,
    pub client_id: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: bool,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "localhost".to_string(),
            port: 1883,
            topic: "sipa-ind/events".to_string(),
            client_id: "sipa-edge-01".to_string(),
            username: None,
            password: None,
            tls: false,
        }
    }
}

/// MQTT client plus the background thread driving its connection.
pub struct MqttPublisher {
    client: Client,
    topic: String,
    connection_handle: Option<std::thread::JoinHandle<()>>,
}

impl MqttPublisher {
    pub fn connect(settings: &MqttSettings) -> Result<Self> {
        let mut options =
            MqttOptions::new(settings.client_id.as_str(), settings.host.as_str(), settings.port);
        options.set_keep_alive(KEEP_ALIVE);
        options.set_clean_start(true);
        if let Some(username) = &settings.username {
            options.set_credentials(username.as_str(), settings.password.clone().unwrap_or_default());
        }
        if settings.tls {
            options.set_transport(Transport::tls_with_default_config());
        }

        let (client, connection) = Client::new(options, CHANNEL_CAPACITY);
        let handle = spawn_connection_driver(connection);
        log::info!(
            "mqtt publisher targeting {}:{} topic {}",
            settings.host,
            settings.port,
            settings.topic
        );
        Ok(Self {
            client,
            topic: settings.topic.clone(),
            connection_handle: Some(handle),
        })
    }

    /// Best-effort publish of one event record.
    pub fn publish(&self, event: &Event) {
        let payload = match serde_json::to_vec(event) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("failed to encode event for publish: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .client
            .publish(self.topic.as_str(), QoS::AtLeastOnce, false, payload)
        {
            log::warn!("mqtt publish failed: {}", e);
        }
    }

    pub fn disconnect(mut self) -> Result<()> {
        self.client.disconnect()?;
        if let Some(handle) = self.connection_handle.take() {
            let _ = handle.join();
        }
        Ok(())
    }
}

fn spawn_connection_driver(mut connection: Connection) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for event in connection.iter() {
            match event {
                Ok(MqttEvent::Incoming(_)) | Ok(MqttEvent::Outgoing(_)) => {}
                Err(e) => {
                    log::warn!("mqtt connection error: {}", e);
                    break;
                }
            }
        }
    })
}
