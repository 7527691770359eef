/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (with `#[serde(default)]` on
/// optional fields) and name their env prefix, e.g. `LENDING_`. A field
/// `return_delay_ms` is then read from `LENDING_RETURN_DELAY_MS`.
pub trait Config: Sized + serde::de::DeserializeOwned {
    const ENV_PREFIX: &'static str;

    fn try_from_env() -> Result<Self, envy::Error> {
        envy::prefixed(Self::ENV_PREFIX).from_env()
    }

    /// Load from an explicit set of pairs instead of the process environment.
    fn from_pairs<I, K, V>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        envy::prefixed(Self::ENV_PREFIX)
            .from_iter(pairs.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}
