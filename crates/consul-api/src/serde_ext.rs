//! Serde helpers for Consul's wire conventions.

/// Base64-encoded byte fields (`Value` in KV entries, `Payload` in user
/// events). Consul sends `null` for keys without a value (directory
/// entries), which maps to `None`.
pub mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt {
            None => Ok(None),
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}

/// Consul answers some list fields with an explicit `null` instead of `[]`.
/// Deserialize those into the type's default.
pub fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize as _;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Go-style duration fields (`LockDelay`, `TTL`, the `wait` query parameter).
///
/// Consul emits these either as duration strings (`"15s"`) or, in older list
/// responses, as nanosecond numbers. Serialization always uses the string
/// form, millisecond-precise.
pub mod go_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Render a duration the way Consul expects it in query parameters and
    /// request bodies: whole seconds as `"10s"`, anything finer as `"1500ms"`.
    pub fn format(duration: Duration) -> String {
        if duration.subsec_millis() == 0 {
            format!("{}s", duration.as_secs())
        } else {
            format!("{}ms", duration.as_millis())
        }
    }

    fn parse(text: &str) -> Option<Duration> {
        let (digits, unit) = match text.find(|c: char| !c.is_ascii_digit() && c != '.') {
            Some(pos) => text.split_at(pos),
            None => return None,
        };
        let amount: f64 = digits.parse().ok()?;
        let millis = match unit {
            "ns" => amount / 1_000_000.0,
            "us" | "µs" => amount / 1_000.0,
            "ms" => amount,
            "s" => amount * 1_000.0,
            "m" => amount * 60_000.0,
            "h" => amount * 3_600_000.0,
            _ => return None,
        };
        Some(Duration::from_millis(millis as u64))
    }

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer.serialize_str(&format(*duration)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<serde_json::Value> = Option::deserialize(deserializer)?;
        match opt {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(text)) => parse(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid duration string: {text}"))),
            Some(serde_json::Value::Number(nanos)) => {
                let nanos = nanos
                    .as_f64()
                    .ok_or_else(|| D::Error::custom("invalid duration number"))?;
                Ok(Some(Duration::from_nanos(nanos as u64)))
            }
            Some(other) => Err(D::Error::custom(format!("invalid duration: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super::base64_bytes")]
        value: Option<Vec<u8>>,
    }

    #[derive(Serialize, Deserialize)]
    struct DurationWrapper {
        #[serde(with = "super::go_duration")]
        delay: Option<Duration>,
    }

    #[test]
    fn base64_decodes_wire_value() {
        let decoded: Wrapper = serde_json::from_str(r#"{"value":"YmFy"}"#).unwrap();
        assert_eq!(decoded.value.as_deref(), Some(b"bar".as_slice()));
    }

    #[test]
    fn base64_null_is_none() {
        let decoded: Wrapper = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert!(decoded.value.is_none());
    }

    #[test]
    fn base64_round_trips() {
        let encoded = serde_json::to_string(&Wrapper {
            value: Some(b"hello".to_vec()),
        })
        .unwrap();
        assert_eq!(encoded, r#"{"value":"aGVsbG8="}"#);
    }

    #[test]
    fn duration_formats_like_go() {
        assert_eq!(super::go_duration::format(Duration::from_secs(10)), "10s");
        assert_eq!(
            super::go_duration::format(Duration::from_millis(1500)),
            "1500ms"
        );
    }

    #[test]
    fn duration_accepts_strings_and_nanos() {
        let from_string: DurationWrapper = serde_json::from_str(r#"{"delay":"15s"}"#).unwrap();
        assert_eq!(from_string.delay, Some(Duration::from_secs(15)));

        let from_nanos: DurationWrapper =
            serde_json::from_str(r#"{"delay":15000000000}"#).unwrap();
        assert_eq!(from_nanos.delay, Some(Duration::from_secs(15)));
    }
}
