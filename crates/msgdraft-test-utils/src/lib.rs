//! Testing utilities for the msgdraft workspace
//!
//! Shared schema fixtures and helpers. The fixtures model the
//! device-instrumentation messages the composer is typically pointed at:
//! signal requests, pin and PWM configuration.

#![allow(missing_docs)]

use msgdraft_schema::{FieldDescriptor, MessageSchema, SchemaRegistry, SchemaSource};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Install a fmt subscriber for test logs; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn pwm_config_schema() -> MessageSchema {
    MessageSchema::new(
        "PwmConfig",
        vec![
            FieldDescriptor::scalar("frequency", "int32"),
            FieldDescriptor::scalar("dutyCycle", "float"),
        ],
    )
}

pub fn pin_schema() -> MessageSchema {
    MessageSchema::new(
        "Pin",
        vec![
            FieldDescriptor::scalar("name", "string"),
            FieldDescriptor::scalar("mode", "enum"),
            FieldDescriptor::scalar("value", "int32"),
        ],
    )
}

pub fn servo_schema() -> MessageSchema {
    MessageSchema::new(
        "Servo",
        vec![
            FieldDescriptor::scalar("angle", "int32"),
            FieldDescriptor::oneof(
                "drive",
                vec![
                    FieldDescriptor::scalar("sweep", "bool"),
                    FieldDescriptor::message("pwm", "PwmConfig"),
                ],
            ),
        ],
    )
}

/// Top-level request schema: scalars, a nested message, a repeated scalar
/// and a oneof with scalar and message options.
pub fn signal_request_schema() -> MessageSchema {
    MessageSchema::new(
        "SignalRequest",
        vec![
            FieldDescriptor::scalar("deviceId", "string"),
            FieldDescriptor::scalar("period", "float"),
            FieldDescriptor::message("pin", "Pin"),
            FieldDescriptor::scalar("thresholds", "float").repeated(),
            FieldDescriptor::oneof(
                "output",
                vec![
                    FieldDescriptor::scalar("digital", "bool"),
                    FieldDescriptor::message("pwm", "PwmConfig"),
                ],
            ),
        ],
    )
}

pub fn fixture_registry() -> SchemaRegistry {
    SchemaRegistry::with_schemas([
        pwm_config_schema(),
        pin_schema(),
        servo_schema(),
        signal_request_schema(),
    ])
}

/// Schema source wrapper counting lookups, for cache idempotence tests.
pub struct CountingSource {
    inner: SchemaRegistry,
    lookups: AtomicUsize,
}

impl CountingSource {
    #[must_use]
    pub fn new(inner: SchemaRegistry) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl SchemaSource for CountingSource {
    fn lookup(&self, field: &FieldDescriptor) -> Option<MessageSchema> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.inner.lookup(field)
    }
}
