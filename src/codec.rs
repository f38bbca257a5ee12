use serde_json::{Map, Value, json};

use crate::error::DecodeError;
use crate::types::*;

pub(crate) const OPERATION_STATUS: &str = "operation_status";
pub(crate) const OPERATION_MODE: &str = "operation_mode";
pub(crate) const WIND_VOLUME: &str = "wind_volume";
pub(crate) const WIND_DIRECTION: &str = "wind_direction";
pub(crate) const TEMPERATURE: &str = "temperature";
pub(crate) const INSIDE_TEMP: &str = "inside_temp";
pub(crate) const OUTSIDE_TEMP: &str = "outside_temp";

/// Fields the firmware rejects a write without. `airquality` must stay
/// false or the service answers 400.
const FIXED_FIELDS: [(&str, bool); 3] = [
    ("airquality", false),
    ("nanoex", true),
    ("silence_control", false),
];
const TIMER_VALUE: &str = "timer_value";

/// Decode a status document into typed parameters.
pub fn read_parameters(doc: &Value) -> Result<Parameters, DecodeError> {
    let obj = doc.as_object().ok_or(DecodeError::NotAnObject)?;

    Ok(Parameters {
        power: decode_code(obj, OPERATION_STATUS, Power::from_eolia_code)?,
        mode: decode_code(obj, OPERATION_MODE, OperationMode::from_eolia_code)?,
        fan_speed: decode_code(obj, WIND_VOLUME, FanSpeed::from_eolia_code)?,
        air_swing_vertical: decode_code(obj, WIND_DIRECTION, AirSwingVertical::from_eolia_code)?,
        temperature: decode_number(obj, TEMPERATURE)?,
        temperature_inside: decode_number(obj, INSIDE_TEMP)?,
        temperature_outside: decode_number(obj, OUTSIDE_TEMP)?,
    })
}

/// Build the PUT body for a status write. Only supplied settings are
/// included, plus the fixed firmware fields.
pub fn build_payload(settings: &Settings) -> Map<String, Value> {
    let mut payload = Map::new();

    if let Some(power) = settings.power {
        payload.insert(OPERATION_STATUS.into(), json!(power.as_eolia_code()));
    }
    if let Some(temp) = settings.temperature {
        payload.insert(TEMPERATURE.into(), json!(temp));
    }
    if let Some(mode) = settings.mode {
        payload.insert(OPERATION_MODE.into(), json!(mode.as_eolia_code()));
    }
    if let Some(speed) = settings.fan_speed {
        payload.insert(WIND_VOLUME.into(), json!(speed.as_eolia_code()));
    }
    if let Some(position) = settings.air_swing_vertical {
        payload.insert(WIND_DIRECTION.into(), json!(position.as_eolia_code()));
    }

    for (key, value) in FIXED_FIELDS {
        payload.insert(key.into(), Value::Bool(value));
    }
    payload.insert(TIMER_VALUE.into(), json!(0));

    payload
}

fn decode_code<T>(
    obj: &Map<String, Value>,
    field: &'static str,
    from_code: fn(&Value) -> Option<T>,
) -> Result<Option<T>, DecodeError> {
    match obj.get(field) {
        None => Ok(None),
        Some(code) => from_code(code)
            .map(Some)
            .ok_or_else(|| DecodeError::UnknownCode {
                field,
                code: code.clone(),
            }),
    }
}

fn decode_number(obj: &Map<String, Value>, field: &'static str) -> Result<Option<f64>, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or(DecodeError::InvalidType {
            field,
            expected: "number",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_full_status() {
        let doc = json!({
            "appliance_id": "abc",
            "operation_status": true,
            "operation_mode": "Cooling",
            "wind_volume": 3,
            "wind_direction": 0,
            "temperature": 26.5,
            "inside_temp": 28,
            "outside_temp": 31,
            "nanoex": true
        });
        let params = read_parameters(&doc).unwrap();
        assert_eq!(params.power, Some(Power::On));
        assert_eq!(params.mode, Some(OperationMode::Cool));
        assert_eq!(params.fan_speed, Some(FanSpeed::Medium));
        assert_eq!(params.air_swing_vertical, Some(AirSwingVertical::Auto));
        assert_eq!(params.temperature, Some(26.5));
        assert_eq!(params.temperature_inside, Some(28.0));
        assert_eq!(params.temperature_outside, Some(31.0));
    }

    #[test]
    fn absent_keys_stay_unset() {
        let params = read_parameters(&json!({"operation_mode": "Heating"})).unwrap();
        assert_eq!(
            params,
            Parameters {
                mode: Some(OperationMode::Heat),
                ..Parameters::default()
            }
        );

        let params = read_parameters(&json!({})).unwrap();
        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn null_temperature_is_absent() {
        let params = read_parameters(&json!({"outside_temp": null})).unwrap();
        assert_eq!(params.temperature_outside, None);
    }

    #[test]
    fn unknown_mode_code_fails() {
        let err = read_parameters(&json!({"operation_mode": 999})).unwrap_err();
        match err {
            DecodeError::UnknownCode { field, code } => {
                assert_eq!(field, "operation_mode");
                assert_eq!(code, json!(999));
            }
            other => panic!("expected UnknownCode, got {other:?}"),
        }
    }

    #[test]
    fn unknown_fan_code_fails() {
        let err = read_parameters(&json!({"wind_volume": 42})).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownCode { field: "wind_volume", .. }));
    }

    #[test]
    fn non_numeric_temperature_fails() {
        let err = read_parameters(&json!({"inside_temp": "warm"})).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidType { field: "inside_temp", .. }));
    }

    #[test]
    fn non_object_document_fails() {
        assert!(matches!(
            read_parameters(&json!([1, 2])),
            Err(DecodeError::NotAnObject)
        ));
    }

    #[test]
    fn payload_power_and_temperature() {
        let settings = Settings::new().power(Power::On).temperature(23.0);
        let payload = build_payload(&settings);

        assert_eq!(payload["operation_status"], json!(true));
        assert_eq!(payload["temperature"], json!(23.0));
        for key in [OPERATION_MODE, WIND_VOLUME, WIND_DIRECTION] {
            assert!(!payload.contains_key(key), "unexpected {key}");
        }
        assert_eq!(payload.len(), 6);
    }

    #[test]
    fn payload_always_carries_fixed_fields() {
        let payload = build_payload(&Settings::default());
        assert_eq!(
            Value::Object(payload),
            json!({
                "airquality": false,
                "nanoex": true,
                "silence_control": false,
                "timer_value": 0
            })
        );
    }

    #[test]
    fn payload_skips_mistyped_named_settings() {
        let settings = Settings::from_named([
            ("power", Setting::Number(1.0)),
            ("mode", Setting::Mode(OperationMode::Dry)),
            ("fanSpeed", Setting::AirSwingVertical(AirSwingVertical::Top)),
            ("airSwingVertical", Setting::AirSwingVertical(AirSwingVertical::Bottom)),
            ("humidity", Setting::Number(40.0)),
        ]);
        let payload = build_payload(&settings);

        assert!(!payload.contains_key("operation_status"));
        assert!(!payload.contains_key("wind_volume"));
        assert_eq!(payload["operation_mode"], "CoolDehumidifying");
        assert_eq!(payload["wind_direction"], 5);
    }
}
