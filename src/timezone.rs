//! Resolving canonical timezone names to UTC offsets.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset of `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// Returns `None` if the name is not a known IANA timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Like [get_local_offset], falling back to UTC for unknown names.
pub fn local_offset_or_utc(canonical_timezone: &str) -> UtcOffset {
    get_local_offset(canonical_timezone).unwrap_or_else(|| {
        tracing::warn!("Unknown timezone {canonical_timezone:?}, falling back to UTC");
        UtcOffset::UTC
    })
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use super::{get_local_offset, local_offset_or_utc};

    #[test]
    fn utc_has_zero_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn fixed_offset_zone_resolves() {
        // Etc zones invert the sign: Etc/GMT-5 is five hours ahead of UTC.
        let offset = get_local_offset("Etc/GMT-5").unwrap();

        assert_eq!(offset.whole_hours(), 5);
    }

    #[test]
    fn unknown_zone_is_none() {
        assert_eq!(get_local_offset("Mars/Olympus_Mons"), None);
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        assert_eq!(local_offset_or_utc("Mars/Olympus_Mons"), UtcOffset::UTC);
    }
}
