use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// A [`Secret<String>`] that can cross serialization boundaries.
///
/// [`Secret`] deliberately does not implement [`Serialize`], but passwords
/// loaded from configuration files have to. This wrapper exposes the inner
/// value to serde only; `Debug` output stays redacted.
#[derive(Clone)]
pub struct SerializableSecretString {
    inner: Secret<String>,
}

impl Deref for SerializableSecretString {
    type Target = Secret<String>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<String> for SerializableSecretString {
    fn from(value: String) -> Self {
        Self {
            inner: Secret::new(value),
        }
    }
}

impl From<&str> for SerializableSecretString {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

impl From<Secret<String>> for SerializableSecretString {
    fn from(inner: Secret<String>) -> Self {
        Self { inner }
    }
}

impl From<SerializableSecretString> for Secret<String> {
    fn from(value: SerializableSecretString) -> Self {
        value.inner
    }
}

impl Serialize for SerializableSecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.inner.expose_secret())
    }
}

impl<'de> Deserialize<'de> for SerializableSecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Into::into)
    }
}

impl fmt::Debug for SerializableSecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = SerializableSecretString::from("hunter2");

        let debug = format!("{secret:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn secret_round_trips_through_serde() {
        let secret = SerializableSecretString::from("hunter2");

        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"hunter2\"");

        let back: SerializableSecretString = serde_json::from_str(&json).unwrap();
        assert_eq!(back.expose_secret(), "hunter2");
    }
}
