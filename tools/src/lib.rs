//! Inspection and debugging tools for meshsensor.
//!
//! This crate backs the `meshsensor-tools` binary:
//!
//! - Load and validate a sensor registry from JSON
//! - Describe each sensor's descriptor in physical units
//! - Push a hex-encoded request through a model and capture the reply
//! - Decode a Descriptor Status message into its entries
//!
//! # Design Principles
//!
//! - **Same code path as the device** - Requests go through the real dispatcher.
//! - **Human-readable output** - Every report also serializes to JSON.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use registry::SensorRegistry;
use serde::Serialize;
use server::{
    decode_descriptor_status_message, dispatch, sensor_models, BufferedTransport,
    DescriptorEntry, DispatchOutcome, MessageContext, Model,
};
use wire::Limits;

/// Unicast address used as the requester when dispatching from the CLI.
pub const CLI_ADDR: u16 = 0x0001;

/// Which of the two sensor models handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Server,
    Setup,
}

/// Reads and validates a registry from a JSON file.
pub fn load_registry(path: &Path) -> Result<SensorRegistry> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read registry {}", path.display()))?;
    parse_registry(&contents)
}

/// Parses and validates a registry from JSON text.
pub fn parse_registry(json: &str) -> Result<SensorRegistry> {
    let registry: SensorRegistry = serde_json::from_str(json).context("parse registry json")?;
    registry
        .validate()
        .map_err(|err| anyhow::anyhow!("registry validation failed: {err}"))?;
    Ok(registry)
}

/// Parses hex input, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let compact: String = input.split_whitespace().collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).with_context(|| format!("invalid hex input {input:?}"))
}

/// Formats bytes as space-separated uppercase hex pairs.
#[must_use]
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .chunks(1)
        .map(hex::encode_upper)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One sensor as shown by `describe`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSummary {
    pub id: u16,
    pub tolerance_pos_percent: Option<f64>,
    pub tolerance_neg_percent: Option<f64>,
    pub sampling_function: String,
    pub period_secs: Option<f64>,
    pub interval_secs: Option<f64>,
    pub settings: Vec<u16>,
    /// Descriptor Status entry for this sensor.
    pub entry_hex: String,
}

/// Summarizes every sensor in registry order.
pub fn describe_registry(registry: &SensorRegistry) -> Result<Vec<SensorSummary>> {
    registry
        .iter()
        .map(|sensor| {
            let reply = server::descriptor_get(registry, &sensor.id.to_le_bytes())
                .with_context(|| format!("encode descriptor for 0x{:04X}", sensor.id))?;
            let desc = &sensor.descriptor;
            Ok(SensorSummary {
                id: sensor.id,
                tolerance_pos_percent: desc.tolerance_pos_percent(),
                tolerance_neg_percent: desc.tolerance_neg_percent(),
                sampling_function: format!("{:?}", desc.sampling_function()),
                period_secs: desc.period_secs(),
                interval_secs: desc.interval_secs(),
                settings: sensor.settings.iter().map(|setting| setting.id).collect(),
                entry_hex: format_hex(reply.payload()),
            })
        })
        .collect()
}

/// Result of pushing one request through a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub model_id: u16,
    pub outcome: String,
    /// Reply bytes (opcode + payload), if one was sent.
    pub reply_hex: Option<String>,
}

/// Dispatches `request` (opcode + payload) to the chosen model.
#[must_use]
pub fn run_dispatch(
    registry: Arc<SensorRegistry>,
    kind: ModelKind,
    request: &[u8],
    limits: &Limits,
) -> DispatchReport {
    let (srv, setup) = sensor_models(registry);
    let model: &dyn Model = match kind {
        ModelKind::Server => &srv,
        ModelKind::Setup => &setup,
    };

    let mut transport = BufferedTransport::new(limits.clone());
    let ctx = MessageContext::new(0, 0, CLI_ADDR);
    let outcome = dispatch(model, &ctx, request, limits, &mut transport);

    DispatchReport {
        model_id: model.model_id(),
        outcome: describe_outcome(&outcome),
        reply_hex: transport
            .last()
            .map(|sent| format_hex(sent.message.as_bytes())),
    }
}

fn describe_outcome(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Replied { opcode, len } => format!("replied {opcode} ({len} bytes)"),
        DispatchOutcome::Completed => "completed without reply".to_string(),
        DispatchOutcome::Dropped(reason) => format!("dropped: {reason}"),
        DispatchOutcome::Unhandled(handler) => format!("unhandled: {handler} not implemented"),
        DispatchOutcome::HandlerFailed(err) => format!("handler failed: {err}"),
        DispatchOutcome::SendFailed(err) => format!("send failed: {err}"),
    }
}

/// One entry of a decoded Descriptor Status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusEntry {
    Known {
        id: u16,
        tolerance_pos: u16,
        tolerance_neg: u16,
        sampling_func: u8,
        period: u8,
        interval: u8,
    },
    Unknown {
        id: u16,
    },
}

impl From<DescriptorEntry> for StatusEntry {
    fn from(entry: DescriptorEntry) -> Self {
        match entry {
            DescriptorEntry::Known { id, descriptor } => Self::Known {
                id,
                tolerance_pos: descriptor.tolerance_pos,
                tolerance_neg: descriptor.tolerance_neg,
                sampling_func: descriptor.sampling_func,
                period: descriptor.period,
                interval: descriptor.interval,
            },
            DescriptorEntry::Unknown { id } => Self::Unknown { id },
        }
    }
}

/// Decodes a full Descriptor Status message (opcode included).
pub fn decode_status(bytes: &[u8], limits: &Limits) -> Result<Vec<StatusEntry>> {
    let entries =
        decode_descriptor_status_message(bytes, limits).context("decode descriptor status")?;
    Ok(entries.into_iter().map(StatusEntry::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{"sensors": [
        {"id": 86, "descriptor": {"tolerance_pos": 10, "tolerance_neg": 10, "sampling_func": 1, "period": 5, "interval": 2},
         "settings": [{"id": 87}]}
    ]}"#;

    #[test]
    fn hex_roundtrip() {
        assert_eq!(parse_hex("82 30 99 00").unwrap(), vec![0x82, 0x30, 0x99, 0x00]);
        assert_eq!(parse_hex("0x8230").unwrap(), vec![0x82, 0x30]);
        assert_eq!(format_hex(&[0x51, 0x0A]), "51 0A");
        assert_eq!(format_hex(&[]), "");
        let bytes = [0x51, 0x56, 0x00, 0xFF];
        assert_eq!(parse_hex(&format_hex(&bytes)).unwrap(), bytes);
        assert!(parse_hex("823").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn parse_registry_validates() {
        let registry = parse_registry(CONFIG).unwrap();
        assert_eq!(registry.len(), 1);

        let dup = r#"{"sensors": [
            {"id": 1, "descriptor": {"tolerance_pos": 0, "tolerance_neg": 0, "sampling_func": 0, "period": 0, "interval": 0}},
            {"id": 1, "descriptor": {"tolerance_pos": 0, "tolerance_neg": 0, "sampling_func": 0, "period": 0, "interval": 0}}
        ]}"#;
        let err = parse_registry(dup).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn describe_includes_entry_bytes() {
        let registry = parse_registry(CONFIG).unwrap();
        let summary = describe_registry(&registry).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].id, 0x0056);
        assert_eq!(summary[0].sampling_function, "Instantaneous");
        assert_eq!(summary[0].settings, vec![87]);
        assert_eq!(summary[0].entry_hex, "56 00 0A A0 00 01 05 02");
    }

    #[test]
    fn dispatch_through_server() {
        let registry = Arc::new(parse_registry(CONFIG).unwrap());
        let report = run_dispatch(registry, ModelKind::Server, &[0x82, 0x30, 0x99, 0x00], &Limits::default());
        assert_eq!(report.model_id, 0x1100);
        assert_eq!(report.reply_hex.as_deref(), Some("51 99 00"));
        assert!(report.outcome.starts_with("replied"));
    }

    #[test]
    fn dispatch_setup_stub() {
        let registry = Arc::new(parse_registry(CONFIG).unwrap());
        let report = run_dispatch(registry, ModelKind::Setup, &[0x82, 0x35, 0x56, 0x00], &Limits::default());
        assert_eq!(report.model_id, 0x1101);
        assert_eq!(report.reply_hex, None);
        assert!(report.outcome.contains("not implemented"));
    }

    #[test]
    fn decode_status_entries() {
        let entries = decode_status(
            &[0x51, 0x56, 0x00, 0x0A, 0xA0, 0x00, 0x01, 0x05, 0x02, 0x99, 0x00],
            &Limits::default(),
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], StatusEntry::Unknown { id: 0x99 });

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["kind"], "known");
        assert_eq!(json["tolerance_neg"], 10);
    }
}
