use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::weekday::Weekday;

/// Raw row of the delivery_configuration table.
/// Labels are kept as TEXT so a mistyped row never breaks the read.
#[derive(Debug, Clone, FromRow)]
pub struct DeliveryConfigRow {
    pub alimentary_day: String,
    pub delivery_day: String,
}

/// One entry of POST /api/configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryConfigEntry {
    pub alimentary_day: Weekday,
    pub delivery_day: Weekday,
}

/// Total mapping alimentary day -> delivery day.
///
/// Every weekday has exactly one slot; days without an override map to
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryMapping([Weekday; 7]);

impl Default for DeliveryMapping {
    fn default() -> Self {
        Self(Weekday::ALL)
    }
}

impl DeliveryMapping {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Weekday, Weekday)>,
    {
        let mut mapping = Self::default();
        for (alimentary, delivery) in entries {
            mapping.set(alimentary, delivery);
        }
        mapping
    }

    pub fn set(&mut self, alimentary: Weekday, delivery: Weekday) {
        self.0[alimentary.offset()] = delivery;
    }

    pub fn delivery_day(&self, alimentary: Weekday) -> Weekday {
        self.0[alimentary.offset()]
    }

    pub fn entries(&self) -> impl Iterator<Item = DeliveryConfigEntry> + '_ {
        Weekday::ALL.into_iter().map(move |d| DeliveryConfigEntry {
            alimentary_day: d,
            delivery_day: self.delivery_day(d),
        })
    }
}

/// Which alimentary days of a week were ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayFlags([bool; 7]);

impl DayFlags {
    pub fn new(flags: [bool; 7]) -> Self {
        Self(flags)
    }

    pub fn is_set(&self, day: Weekday) -> bool {
        self.0[day.offset()]
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|f| **f).count()
    }

    /// Ordered days, Monday first.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(move |d| self.is_set(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_is_identity() {
        let mapping = DeliveryMapping::default();
        for day in Weekday::ALL {
            assert_eq!(mapping.delivery_day(day), day);
        }
    }

    #[test]
    fn partial_overrides_keep_identity_elsewhere() {
        let mapping = DeliveryMapping::from_entries([(Weekday::Tuesday, Weekday::Monday)]);
        assert_eq!(mapping.delivery_day(Weekday::Tuesday), Weekday::Monday);
        assert_eq!(mapping.delivery_day(Weekday::Monday), Weekday::Monday);
        assert_eq!(mapping.delivery_day(Weekday::Sunday), Weekday::Sunday);
        assert_eq!(mapping.entries().count(), 7);
    }

    #[test]
    fn day_flags_iterate_monday_first() {
        let flags = DayFlags::new([false, false, true, false, true, false, true]);
        let days: Vec<_> = flags.days().collect();
        assert_eq!(days, vec![Weekday::Wednesday, Weekday::Friday, Weekday::Sunday]);
        assert_eq!(flags.count(), 3);
    }
}
