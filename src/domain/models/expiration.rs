use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// When an upload stops being available.
///
/// `Never` goes over the wire as the zero timestamp `0001-01-01T00:00:00Z`
/// and reads back as `Never`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    Never,
    At(DateTime<Utc>),
}

impl Expiration {
    pub fn unset_sentinel() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(1, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Resolves a parsed TTL against `now`. No TTL never expires.
    pub fn from_ttl(ttl: Option<Duration>, now: DateTime<Utc>) -> Self {
        match ttl {
            None => Expiration::Never,
            Some(duration) => Expiration::after(duration, now),
        }
    }

    pub fn after(duration: Duration, now: DateTime<Utc>) -> Self {
        Expiration::At(now + duration)
    }

    pub fn as_timestamp(&self) -> DateTime<Utc> {
        match self {
            Expiration::Never => Self::unset_sentinel(),
            Expiration::At(instant) => *instant,
        }
    }
}

impl Serialize for Expiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_timestamp().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expiration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let instant = DateTime::<Utc>::deserialize(deserializer)?;
        if instant == Self::unset_sentinel() {
            Ok(Expiration::Never)
        } else {
            Ok(Expiration::At(instant))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_hour_ttl() {
        let expiration = Expiration::from_ttl(Some(Duration::hours(1)), t0());
        assert_eq!(expiration, Expiration::At(t0() + Duration::hours(1)));
    }

    #[test]
    fn test_composed_ttl() {
        let expiration = Expiration::from_ttl(Some(Duration::minutes(90)), t0());
        assert_eq!(expiration.as_timestamp(), t0() + Duration::minutes(90));
    }

    #[test]
    fn test_negative_ttl_lands_in_the_past() {
        let expiration = Expiration::from_ttl(Some(-Duration::hours(1)), t0());
        assert_eq!(expiration, Expiration::At(t0() - Duration::hours(1)));
    }

    #[test]
    fn test_missing_ttl_never_expires() {
        assert_eq!(Expiration::from_ttl(None, t0()), Expiration::Never);
        assert_eq!(
            Expiration::Never.as_timestamp(),
            Expiration::unset_sentinel()
        );
    }

    #[test]
    fn test_sentinel_serialization() {
        let json = serde_json::to_string(&Expiration::Never).unwrap();
        assert_eq!(json, "\"0001-01-01T00:00:00Z\"");

        let back: Expiration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Expiration::Never);
    }

    #[test]
    fn test_instant_serialization() {
        let expiration = Expiration::At(t0());
        let json = serde_json::to_string(&expiration).unwrap();
        assert_eq!(json, "\"2024-03-01T12:00:00Z\"");
        assert_eq!(serde_json::from_str::<Expiration>(&json).unwrap(), expiration);
    }
}
