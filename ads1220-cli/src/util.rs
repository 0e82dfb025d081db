use ads1220_hal::Field;

/// A configuration field and the raw value to set it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldSetting {
    pub(crate) field: Field,
    pub(crate) value: u8,
}

/// Parse a byte in decimal, or in hexadecimal with a `0x` prefix.
pub(crate) fn u8_from_str(value: &str) -> Result<u8, std::num::ParseIntError> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

/// Parse `FIELD=VALUE`, where FIELD is a field name such as `idac1_mux`.
///
/// Dashes are accepted in place of underscores. The value is not range-checked
/// here; the driver rejects values the field cannot hold.
pub(crate) fn field_setting(arg: &str) -> Result<FieldSetting, String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{arg}'"))?;
    let name = name.trim().replace('-', "_");
    let field = Field::ALL
        .into_iter()
        .find(|field| field.name() == name)
        .ok_or_else(|| {
            let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
            format!("unknown field '{name}' (expected one of: {})", names.join(", "))
        })?;
    let value = u8_from_str(value.trim()).map_err(|e| format!("invalid value '{value}': {e}"))?;
    Ok(FieldSetting { field, value })
}
