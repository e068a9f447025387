use std::collections::{hash_map::Entry, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{
    delivery::DeliveryMapping,
    manifest::{ExportMode, ManifestRow, OrderedWeek},
    weekday::Weekday,
};

/// ISO-8601 week of a date (Monday start, week 1 holds the first Thursday).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoWeekRef {
    pub week: u32,
    pub year: i32,
}

impl IsoWeekRef {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self { week: iso.week(), year: iso.year() }
    }
}

/// `None` when the Monday falls before `NaiveDate::MIN`.
pub fn monday_of_week(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_monday())))
}

fn day_in_week(monday: NaiveDate, day: Weekday) -> Option<NaiveDate> {
    monday.checked_add_signed(Duration::days(day.offset() as i64))
}

pub struct DeliveryResolver;

impl DeliveryResolver {
    /// Bundle the ordered meals of the reference date's week into delivery rows.
    ///
    /// `orders` must be the orders of `IsoWeekRef::of(reference_date)`.
    /// Rows are keyed by (beneficiary, delivery date) and sorted by
    /// (delivery date, route); ties keep first-seen order.
    ///
    /// In day mode a meal is kept when its consumption date is the reference
    /// date, whatever day it is delivered on.
    ///
    /// Days that fall outside chrono's date range are left out.
    pub fn resolve(
        reference_date: NaiveDate,
        mode: ExportMode,
        mapping: &DeliveryMapping,
        orders: &[OrderedWeek],
    ) -> Vec<ManifestRow> {
        let Some(monday) = monday_of_week(reference_date) else {
            return Vec::new();
        };
        let mut index: HashMap<(i64, NaiveDate), usize> = HashMap::new();
        let mut rows: Vec<ManifestRow> = Vec::new();

        for order in orders {
            for day in order.days.days() {
                let Some(consumption_date) = day_in_week(monday, day) else {
                    continue;
                };
                if mode == ExportMode::Day && consumption_date != reference_date {
                    continue;
                }
                let Some(delivery_date) = day_in_week(monday, mapping.delivery_day(day)) else {
                    continue;
                };

                match index.entry((order.beneficiary.id, delivery_date)) {
                    Entry::Occupied(slot) => rows[*slot.get()].push(consumption_date),
                    Entry::Vacant(slot) => {
                        slot.insert(rows.len());
                        rows.push(ManifestRow::new(&order.beneficiary, delivery_date, consumption_date));
                    }
                }
            }
        }

        rows.sort_by(|a, b| {
            a.delivery_date
                .cmp(&b.delivery_date)
                .then_with(|| a.route().cmp(b.route()))
        });
        rows
    }
}
