use serde::{self, Deserialize, Deserializer, Serializer};
use time::{Date, OffsetDateTime, macros::format_description};

// Bill.com business dates are plain ISO dates (yyyy-MM-dd). Timestamps such
// as createdTime/updatedTime come back as "2016-11-27T07:58:09.000+0000",
// which is almost RFC3339 except for the colon-less offset.

pub fn parse_bdc_date(date_str: &str) -> Result<Date, String> {
    // Some endpoints return a full timestamp where a date is documented;
    // take just the date part in that case.
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(date_part, &format)
        .map_err(|e| format!("Failed to parse date '{date_str}': {e}"))
}

pub fn parse_bdc_datetime(datetime_str: &str) -> Result<OffsetDateTime, String> {
    // Standard RFC3339 first ("2016-11-27T07:58:09.000+00:00" / trailing Z)
    let rfc3339 = time::format_description::well_known::Rfc3339;
    if let Ok(dt) = OffsetDateTime::parse(datetime_str, &rfc3339) {
        return Ok(dt);
    }

    // Bill.com's own shape: fractional seconds plus a "+0000" offset
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory][offset_minute]"
    );
    if let Ok(dt) = OffsetDateTime::parse(datetime_str, &format) {
        return Ok(dt);
    }

    // No fractional seconds, no offset: assume UTC
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(dt) = time::PrimitiveDateTime::parse(datetime_str, &format) {
        return Ok(dt.assume_utc());
    }

    Err(format!(
        "Failed to parse datetime '{datetime_str}': no matching format"
    ))
}

/// Serialization module for required `time::Date` fields.
pub mod bdc_date_format {
    use super::{Date, Deserialize, Deserializer, Serializer, format_description, parse_bdc_date, serde};

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date
            .format(&format_description!("[year]-[month]-[day]"))
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let date_str = String::deserialize(deserializer)?;
        parse_bdc_date(&date_str).map_err(serde::de::Error::custom)
    }
}

/// Serialization module for optional `time::Date` fields.
pub mod bdc_date_format_option {
    use super::{Date, Deserialize, Deserializer, Serializer, format_description, serde};

    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => {
                let formatted = date
                    .format(&format_description!("[year]-[month]-[day]"))
                    .map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        match opt {
            Some(s) if !s.is_empty() => match super::parse_bdc_date(&s) {
                Ok(date) => Ok(Some(date)),
                // Null-ish or malformed server dates read as absent
                Err(_) => Ok(None),
            },
            _ => Ok(None),
        }
    }
}

/// Serialization module for optional `time::OffsetDateTime` fields
/// (createdTime/updatedTime and friends).
pub mod bdc_datetime_format_option {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use time::{OffsetDateTime, format_description::well_known::Rfc3339};

    pub fn serialize<S>(datetime: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match datetime {
            Some(dt) => {
                let formatted = dt.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        match opt {
            Some(s) if !s.is_empty() => match super::parse_bdc_datetime(&s) {
                Ok(dt) => Ok(Some(dt)),
                Err(_) => Ok(None),
            },
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;

    #[test]
    fn parses_plain_iso_dates() {
        assert_eq!(parse_bdc_date("2025-06-30").unwrap(), date!(2025 - 06 - 30));
    }

    #[test]
    fn parses_timestamps_passed_where_dates_are_documented() {
        assert_eq!(
            parse_bdc_date("2025-06-30T00:00:00.000+0000").unwrap(),
            date!(2025 - 06 - 30)
        );
    }

    #[test]
    fn parses_bdc_offset_timestamps() {
        assert_eq!(
            parse_bdc_datetime("2016-11-27T07:58:09.000+0000").unwrap(),
            datetime!(2016-11-27 07:58:09 UTC)
        );
    }
}
