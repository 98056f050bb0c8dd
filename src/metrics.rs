use prometheus::{Encoder, GaugeVec, TextEncoder};
use pvoutput_rs::model::{Api, CurrentStatus, Status};
use pvoutput_rs::{Error, StatusQuery};

lazy_static! {
    static ref ENERGY_GENERATION_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "energy_generation",
            "energy generated in current day (in Wh)",
        ),
        &["system_id"],
    )
    .unwrap();
    static ref POWER_GENERATION_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("power_generation", "current power generation (in W)",),
        &["system_id"],
    )
    .unwrap();
    static ref ENERGY_CONSUMPTION_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "energy_consumption",
            "energy consumed in current day (in Wh)",
        ),
        &["system_id"],
    )
    .unwrap();
    static ref POWER_CONSUMPTION_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("power_consumption", "current power consumption (in W)",),
        &["system_id"],
    )
    .unwrap();
    static ref NORMALISED_OUTPUT_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "normalised_output",
            "generation normalised to system size (in kW/kW)",
        ),
        &["system_id"],
    )
    .unwrap();
    static ref TEMPERATURE_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("temperature", "reported temperature (in °C)",),
        &["system_id"],
    )
    .unwrap();
    static ref VOLTAGE_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("voltage", "reported voltage (in V)",),
        &["system_id"],
    )
    .unwrap();
}

fn set_optional(gauge: &GaugeVec, system_id: &str, value: Option<f64>) {
    if let Some(value) = value {
        gauge.with_label_values(&[system_id]).set(value);
    }
}

/// Feed `status` to Prometheus gauges. Absent values leave their gauge untouched.
fn process_status(status: &CurrentStatus, system_id: &str) {
    ENERGY_GENERATION_GAUGE
        .with_label_values(&[system_id])
        .set(status.energy_generation as f64);
    POWER_GENERATION_GAUGE
        .with_label_values(&[system_id])
        .set(status.power_generation as f64);
    NORMALISED_OUTPUT_GAUGE
        .with_label_values(&[system_id])
        .set(status.normalised_output);
    set_optional(
        &ENERGY_CONSUMPTION_GAUGE,
        system_id,
        status.energy_consumption.map(|v| v as f64),
    );
    set_optional(
        &POWER_CONSUMPTION_GAUGE,
        system_id,
        status.power_consumption.map(|v| v as f64),
    );
    set_optional(&TEMPERATURE_GAUGE, system_id, status.temperature);
    set_optional(&VOLTAGE_GAUGE, system_id, status.voltage);
}

fn current(status: Status) -> Result<CurrentStatus, Error> {
    match status {
        Status::Current(status) => Ok(status),
        other => Err(Error::Format(format!(
            "Unexpected status shape for current status: {:?}",
            other
        ))),
    }
}

/// Collect the current status of the system behind `api`, updating Prometheus exporter registry.
pub async fn collect(api: &Api) -> Result<(), Error> {
    let status = current(pvoutput_rs::get_status(api, &StatusQuery::default()).await?)?;
    process_status(&status, &api.system_id.to_string());
    Ok(())
}

/// Read metrics from Prometheus exporter registry.
pub fn read() -> Result<String, Error> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| Error::Format(format!("Unable to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| Error::Format(format!("Metrics are not valid UTF-8: {}", e)))
}
