//! Time quantities at the edges of the crate.
//!
//! Configuration carries durations as typed [`qtty`] quantities so callers can
//! write a deadline in whatever time unit they like; the supervisor needs a
//! [`std::time::Duration`] to wait on.

use std::time::Duration;

use qtty::{Quantity, Second, Unit};

use crate::config::ConfigError;

/// Marker trait for units that share the same physical dimension.
///
/// Implemented for any pair of units where `From::Dim == To::Dim`, so a
/// deadline given in minutes or hours is accepted wherever seconds are.
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity to another unit of the same dimension.
#[inline]
pub const fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to_const::<To>()
}

/// Converts any time quantity to a [`Duration`].
///
/// Negative, NaN and overflowing values are rejected; `field` names the
/// setting in the error.
pub fn to_duration<U>(field: &'static str, q: Quantity<U>) -> Result<Duration, ConfigError>
where
    U: SameDim<Second>,
{
    let seconds: Quantity<Second> = convert(q);
    Duration::try_from_secs_f64(seconds.value()).map_err(|_| ConfigError::InvalidDuration {
        field,
        seconds: seconds.value(),
    })
}

/// Wraps a measured [`Duration`] as seconds.
pub fn from_duration(d: Duration) -> Quantity<Second> {
    Quantity::<Second>::new(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Minute, Second};

    #[test]
    fn minutes_become_durations() {
        let d = to_duration("timeout", Quantity::<Minute>::new(1.5)).unwrap();
        assert_eq!(d, Duration::from_secs(90));
    }

    #[test]
    fn fractional_seconds_survive() {
        let d = to_duration("timeout", Quantity::<Second>::new(0.25)).unwrap();
        assert_eq!(d, Duration::from_millis(250));
    }

    #[test]
    fn negative_and_nan_are_rejected() {
        assert!(matches!(
            to_duration("timeout", Quantity::<Second>::new(-1.0)),
            Err(ConfigError::InvalidDuration { field: "timeout", .. })
        ));
        assert!(to_duration("cancel_grace", Quantity::<Second>::new(f64::NAN)).is_err());
        assert!(to_duration("cancel_grace", Quantity::<Second>::new(f64::INFINITY)).is_err());
    }

    #[test]
    fn round_trip_through_duration() {
        let q = from_duration(Duration::from_millis(1500));
        assert!((q.value() - 1.5).abs() < 1e-12);
    }
}
